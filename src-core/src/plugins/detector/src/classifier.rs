//! 内容分类
//!
//! 检测顺序：颜色 → URL → 代码 → 文本
//! 匹配到某个类型立即返回，不会继续检测其他类型

use snipwise_common::{ClassificationResult, ContentType, DetectionOptions};

use crate::detectors::{is_code, is_color, is_url};
use crate::metadata::extract_metadata;

/// 判定内容类型（按优先级）
pub fn categorize(content: &str, options: &DetectionOptions) -> ContentType {
    let trimmed = content.trim();

    if options.detect_color && is_color(trimmed) {
        return ContentType::Color;
    }

    if options.detect_url && is_url(trimmed) {
        return ContentType::Url;
    }

    if options.detect_code && is_code(trimmed, options.code_min_length) {
        return ContentType::Code;
    }

    ContentType::Text
}

/// 使用自定义选项分类
pub fn classify_with(content: &str, options: &DetectionOptions) -> ClassificationResult {
    let content_type = categorize(content, options);
    let metadata = extract_metadata(content, content_type);

    log::debug!(
        "[Detector] 分类结果: {} ({} 字符)",
        content_type,
        metadata.char_count
    );

    ClassificationResult {
        content_type,
        metadata,
    }
}

/// 分类剪贴板文本，永远不会失败
pub fn classify(content: &str) -> ClassificationResult {
    classify_with(content, &DetectionOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color() {
        let result = classify("#FF5733");
        assert_eq!(result.content_type, ContentType::Color);
        assert_eq!(result.metadata.color_value.as_deref(), Some("#FF5733"));
        assert_eq!(result.metadata.domain, None);
        assert_eq!(result.metadata.language, None);
    }

    #[test]
    fn test_url() {
        let result = classify("https://example.com/path?a=1");
        assert_eq!(result.content_type, ContentType::Url);
        assert_eq!(result.metadata.domain.as_deref(), Some("example.com"));
        assert_eq!(result.metadata.color_value, None);
    }

    #[test]
    fn test_bare_domain_url() {
        let result = classify("example.com/path");
        assert_eq!(result.content_type, ContentType::Url);
        assert_eq!(result.metadata.domain.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_code() {
        let result = classify("function foo() { return 1; }");
        assert_eq!(result.content_type, ContentType::Code);
        assert_eq!(result.metadata.language.as_deref(), Some("javascript"));
    }

    #[test]
    fn test_text() {
        let result = classify("Hello there, nice weather today.");
        assert_eq!(result.content_type, ContentType::Text);
        assert_eq!(result.metadata.word_count, 5);
        assert_eq!(result.metadata.line_count, 1);
    }

    #[test]
    fn test_empty() {
        let result = classify("");
        assert_eq!(result.content_type, ContentType::Text);
        assert_eq!(result.metadata.char_count, 0);
        assert_eq!(result.metadata.word_count, 0);
        assert_eq!(result.metadata.line_count, 1);
    }

    #[test]
    fn test_short_brackets_are_text() {
        assert_eq!(classify("{}").content_type, ContentType::Text);
        assert_eq!(classify("[1, 2]").content_type, ContentType::Text);
    }

    #[test]
    fn test_color_wins_over_url_and_code() {
        // 同时像颜色和代码（python 的 # 注释签名）
        assert_eq!(classify("#abcdef").content_type, ContentType::Color);
        assert_eq!(classify("rgb(10, 20, 30)").content_type, ContentType::Color);
    }

    #[test]
    fn test_color_value_reclassifies_as_color() {
        for input in ["#fff", " rgb(1, 2, 3) ", "hsl(200, 50%, 50%)"] {
            let first = classify(input);
            let value = first.metadata.color_value.unwrap();
            assert_eq!(classify(&value).content_type, ContentType::Color);
        }
    }

    #[test]
    fn test_disabled_stages() {
        let options = DetectionOptions {
            detect_color: false,
            ..Default::default()
        };
        assert_eq!(categorize("#FF5733", &options), ContentType::Text);

        let options = DetectionOptions {
            detect_code: false,
            ..Default::default()
        };
        assert_eq!(
            categorize("function foo() { return 1; }", &options),
            ContentType::Text
        );
    }

    #[test]
    fn test_custom_code_threshold() {
        let options = DetectionOptions {
            code_min_length: 2,
            ..Default::default()
        };
        // "[1];" 只命中一项通用特征，但 json 签名命中
        assert_eq!(categorize("[1];", &options), ContentType::Code);
    }
}
