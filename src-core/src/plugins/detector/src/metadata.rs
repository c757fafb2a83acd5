//! 元数据提取

use snipwise_common::{ContentType, Metadata};
use url::Url;

use crate::detectors::detect_code_language;
use crate::patterns::DOMAIN_FALLBACK;

/// 未识别出语言时的代码语言标识
pub const PLAIN_LANGUAGE: &str = "plain";

/// 空白分隔的非空词数
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `\n` 分隔的行数（不含换行时为 1）
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// 正则兜底提取域名，失败返回 None
pub fn extract_domain_fallback(text: &str) -> Option<String> {
    DOMAIN_FALLBACK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// 是否以 `http://` 或 `https://` 开头（协议不区分大小写）
pub fn has_http_scheme(text: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        text.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

/// 没有 http(s) 协议时补上 `https://`
pub fn with_http_scheme(text: &str) -> String {
    if has_http_scheme(text) {
        text.to_string()
    } else {
        format!("https://{}", text)
    }
}

/// 解析 URL 得到主机名，解析失败时回退到正则提取
fn extract_domain(content: &str) -> Option<String> {
    let content = content.trim();
    let candidate = with_http_scheme(content);

    match Url::parse(&candidate) {
        Ok(url) => match url.host_str() {
            Some(host) if !host.is_empty() => Some(host.to_string()),
            _ => extract_domain_fallback(content),
        },
        Err(e) => {
            log::debug!("[Detector] URL 解析失败，使用正则提取域名: {}", e);
            extract_domain_fallback(content)
        }
    }
}

/// 提取元数据
///
/// 计数字段总是存在；类型相关字段仅在类型匹配时填充
pub fn extract_metadata(content: &str, content_type: ContentType) -> Metadata {
    let mut metadata = Metadata {
        char_count: content.chars().count(),
        word_count: count_words(content),
        line_count: count_lines(content),
        ..Default::default()
    };

    match content_type {
        ContentType::Url => {
            metadata.domain = extract_domain(content);
        }
        ContentType::Color => {
            metadata.color_value = Some(content.trim().to_string());
        }
        ContentType::Code => {
            metadata.language = Some(
                detect_code_language(content)
                    .unwrap_or(PLAIN_LANGUAGE)
                    .to_string(),
            );
        }
        ContentType::Text | ContentType::Image => {}
    }

    metadata
}
