//! 转换注册表
//!
//! 按内容类型列出可用的转换。注册表本身无状态、不缓存结果；
//! 需要参数的转换（二维码、颜色调整、URL 缩短）从 `SnipwiseConfig` 读取。

use once_cell::sync::Lazy;
use serde::Serialize;
use snipwise_common::{ContentType, ConversionOutput, ConvertError, ConvertResult, SnipwiseConfig};
use snipwise_detector::detect_code_language;

use crate::converters::{case, code, color, qr, text, url};

type ApplyFn = fn(&str, &SnipwiseConfig) -> ConvertResult<ConversionOutput>;

static DEFAULT_CONFIG: Lazy<SnipwiseConfig> = Lazy::new(SnipwiseConfig::default);

/// 未知内容类型时提供的通用转换
const UNIVERSAL_IDS: [&str; 3] = ["to-uppercase", "to-lowercase", "to-base64"];

/// JSON 内容始终提供的转换，让格式错误的 JSON 也能看到解析错误
const JSON_IDS: [&str; 4] = ["json-to-yaml", "beautify-json", "minify-json", "sort-json-keys"];

/// 一个可用的转换
#[derive(Debug, Clone, Copy)]
pub struct ConversionOption {
    /// 稳定的 kebab-case 标识
    pub id: &'static str,
    /// 显示名称
    pub label: &'static str,
    run: ApplyFn,
}

impl ConversionOption {
    fn new(id: &'static str, label: &'static str, run: ApplyFn) -> Self {
        Self { id, label, run }
    }

    /// 使用默认配置执行转换
    pub fn apply(&self, input: &str) -> ConvertResult<ConversionOutput> {
        self.apply_with(input, &DEFAULT_CONFIG)
    }

    /// 使用指定配置执行转换
    pub fn apply_with(&self, input: &str, config: &SnipwiseConfig) -> ConvertResult<ConversionOutput> {
        let result = (self.run)(input, config);
        if let Err(e) = &result {
            log::warn!("[Converter] 转换 {} 失败: {}", self.id, e);
        }
        result
    }
}

/// 不会失败的文本转换
macro_rules! infallible {
    ($f:path) => {
        |input: &str, _: &SnipwiseConfig| Ok(ConversionOutput::Text($f(input)))
    };
}

/// 可能失败的文本转换
macro_rules! fallible {
    ($f:path) => {
        |input: &str, _: &SnipwiseConfig| $f(input).map(ConversionOutput::Text)
    };
}

/// 返回颜色列表的配色转换，输出以 ", " 连接
macro_rules! palette {
    ($f:path) => {
        |input: &str, _: &SnipwiseConfig| $f(input).map(|colors| ConversionOutput::Text(colors.join(", ")))
    };
}

fn json_output<T: Serialize>(value: &T) -> ConvertResult<ConversionOutput> {
    serde_json::to_string_pretty(value)
        .map(ConversionOutput::Text)
        .map_err(|e| ConvertError::InvalidJson(e.to_string()))
}

fn code_conversions() -> Vec<ConversionOption> {
    vec![
        ConversionOption::new("json-to-yaml", "JSON → YAML", fallible!(code::json_to_yaml)),
        ConversionOption::new("yaml-to-json", "YAML → JSON", fallible!(code::yaml_to_json)),
        ConversionOption::new("beautify-json", "Beautify JSON", fallible!(code::beautify_json)),
        ConversionOption::new("minify-json", "Minify JSON", fallible!(code::minify_json)),
        ConversionOption::new("sort-json-keys", "Sort Keys", fallible!(code::sort_json_keys)),
        ConversionOption::new("json-to-csv", "JSON → CSV", fallible!(code::json_to_csv)),
        ConversionOption::new("csv-to-json", "CSV → JSON", fallible!(code::csv_to_json)),
    ]
}

fn text_conversions() -> Vec<ConversionOption> {
    vec![
        ConversionOption::new("markdown-to-html", "Markdown → HTML", infallible!(text::markdown_to_html)),
        ConversionOption::new("html-to-markdown", "HTML → Markdown", fallible!(text::html_to_markdown)),
        ConversionOption::new("to-uppercase", "UPPERCASE", infallible!(text::to_upper_case)),
        ConversionOption::new("to-lowercase", "lowercase", infallible!(text::to_lower_case)),
        ConversionOption::new("to-title-case", "Title Case", infallible!(case::to_title_case)),
        ConversionOption::new("to-sentence-case", "Sentence case", infallible!(case::to_sentence_case)),
        ConversionOption::new("to-camel-case", "camelCase", infallible!(case::to_camel_case)),
        ConversionOption::new("to-pascal-case", "PascalCase", infallible!(case::to_pascal_case)),
        ConversionOption::new("to-snake-case", "snake_case", infallible!(case::to_snake_case)),
        ConversionOption::new("to-kebab-case", "kebab-case", infallible!(case::to_kebab_case)),
        ConversionOption::new("to-constant-case", "CONST_CASE", infallible!(case::to_constant_case)),
        ConversionOption::new("to-dot-case", "dot.case", infallible!(case::to_dot_case)),
        ConversionOption::new("to-path-case", "path/case", infallible!(case::to_path_case)),
        ConversionOption::new("to-words", "Split Words", infallible!(case::to_words)),
        ConversionOption::new("to-base64", "Base64 Encode", infallible!(text::to_base64)),
        ConversionOption::new("from-base64", "Base64 Decode", fallible!(text::from_base64)),
        ConversionOption::new("encode-html", "Encode HTML Entities", infallible!(text::encode_html_entities)),
        ConversionOption::new("decode-html", "Decode HTML Entities", infallible!(text::decode_html_entities)),
        ConversionOption::new("reverse", "Reverse", infallible!(text::reverse_string)),
        ConversionOption::new("trim-whitespace", "Trim Whitespace", infallible!(text::trim_whitespace)),
        ConversionOption::new("text-stats", "Text Stats", |input, _| {
            json_output(&text::get_text_stats(input))
        }),
    ]
}

fn color_conversions() -> Vec<ConversionOption> {
    vec![
        ConversionOption::new("to-hex", "To HEX", fallible!(color::to_hex)),
        ConversionOption::new("to-rgb", "To RGB", fallible!(color::to_rgb)),
        ConversionOption::new("to-rgba", "To RGBA", fallible!(color::to_rgba)),
        ConversionOption::new("to-hsl", "To HSL", fallible!(color::to_hsl)),
        ConversionOption::new("to-hsla", "To HSLA", fallible!(color::to_hsla)),
        ConversionOption::new("to-hsv", "To HSV", fallible!(color::to_hsv)),
        ConversionOption::new("complementary", "Complementary", fallible!(color::get_complementary)),
        ConversionOption::new("analogous", "Analogous", palette!(color::get_analogous)),
        ConversionOption::new("triadic", "Triadic", palette!(color::get_triadic)),
        ConversionOption::new(
            "split-complementary",
            "Split Complementary",
            palette!(color::get_split_complementary),
        ),
        ConversionOption::new("lighten", "Lighten", |input, config| {
            color::lighten(input, config.color.adjust_amount).map(ConversionOutput::Text)
        }),
        ConversionOption::new("darken", "Darken", |input, config| {
            color::darken(input, config.color.adjust_amount).map(ConversionOutput::Text)
        }),
        ConversionOption::new("saturate", "Saturate", |input, config| {
            color::saturate(input, config.color.adjust_amount).map(ConversionOutput::Text)
        }),
        ConversionOption::new("desaturate", "Desaturate", |input, config| {
            color::desaturate(input, config.color.adjust_amount).map(ConversionOutput::Text)
        }),
        ConversionOption::new(
            "readable-text-color",
            "Readable Text Color",
            fallible!(color::get_readable_text_color),
        ),
        ConversionOption::new("color-info", "Color Info", |input, _| {
            let info = color::parse_color(input)
                .ok_or_else(|| ConvertError::InvalidColor(input.trim().to_string()))?;
            json_output(&info)
        }),
    ]
}

fn url_conversions() -> Vec<ConversionOption> {
    vec![
        ConversionOption::new("generate-qr", "QR Code", |input, config| {
            qr::generate_qr_code(input, &config.qr).map(ConversionOutput::DataUrl)
        }),
        ConversionOption::new("url-encode", "URL Encode", infallible!(url::url_encode)),
        ConversionOption::new("url-decode", "URL Decode", fallible!(url::url_decode)),
        ConversionOption::new("parse-url", "Parse URL", |input, _| {
            json_output(&url::get_url_info(input)?)
        }),
        ConversionOption::new("parse-params", "Parse Params", |input, _| {
            json_output(&url::parse_url_params(input)?)
        }),
        ConversionOption::new("extract-domain", "Extract Domain", fallible!(url::extract_domain)),
        ConversionOption::new("extract-path", "Extract Path", fallible!(url::extract_path)),
        ConversionOption::new("shorten-url", "Shorten URL", |input, config| {
            Ok(ConversionOutput::Text(url::shorten_url(
                input,
                config.url.shorten_max_length,
            )))
        }),
    ]
}

/// 图片转换仅透传原始 data URL，实际编码由宿主完成
fn image_conversions() -> Vec<ConversionOption> {
    vec![
        ConversionOption::new("to-png", "Download PNG", |input, _| {
            Ok(ConversionOutput::DataUrl(input.to_string()))
        }),
        ConversionOption::new("to-jpg", "Download JPG", |input, _| {
            Ok(ConversionOutput::DataUrl(input.to_string()))
        }),
        ConversionOption::new("to-webp", "Download WebP", |input, _| {
            Ok(ConversionOutput::DataUrl(input.to_string()))
        }),
    ]
}

/// 某内容类型的全部转换
pub fn conversions_for(content_type: ContentType, has_binary_payload: bool) -> Vec<ConversionOption> {
    match content_type {
        ContentType::Code => code_conversions(),
        ContentType::Text => text_conversions(),
        ContentType::Color => color_conversions(),
        ContentType::Url => url_conversions(),
        ContentType::Image if has_binary_payload => image_conversions(),
        ContentType::Image => Vec::new(),
    }
}

/// 按类型标签查找转换，未知标签返回通用转换
pub fn conversions_for_label(label: &str, has_binary_payload: bool) -> Vec<ConversionOption> {
    match label.parse::<ContentType>() {
        Ok(content_type) => conversions_for(content_type, has_binary_payload),
        Err(_) => {
            log::debug!("[Converter] 未知内容类型 {}，使用通用转换", label);
            text_conversions()
                .into_iter()
                .filter(|option| UNIVERSAL_IDS.contains(&option.id))
                .collect()
        }
    }
}

/// 按 ID 查找转换
pub fn find_conversion(content_type: ContentType, id: &str) -> Option<ConversionOption> {
    conversions_for(content_type, true)
        .into_iter()
        .find(|option| option.id == id)
}

/// 按 ID 执行转换
pub fn apply_conversion(
    content_type: ContentType,
    id: &str,
    input: &str,
) -> ConvertResult<ConversionOutput> {
    apply_conversion_with(content_type, id, input, &DEFAULT_CONFIG)
}

/// 按 ID 执行转换（指定配置）
pub fn apply_conversion_with(
    content_type: ContentType,
    id: &str,
    input: &str,
    config: &SnipwiseConfig,
) -> ConvertResult<ConversionOutput> {
    let option = find_conversion(content_type, id).ok_or_else(|| {
        log::warn!("[Converter] {} 类型没有转换 {}", content_type, id);
        ConvertError::UnknownConversion(format!("{}/{}", content_type, id))
    })?;
    option.apply_with(input, config)
}

/// 针对具体内容筛选转换
///
/// 代码类型按内容探测结果过滤，其余类型与 `conversions_for` 相同。
pub fn applicable_conversions(
    content_type: ContentType,
    content: &str,
    has_binary_payload: bool,
) -> Vec<ConversionOption> {
    let all = conversions_for(content_type, has_binary_payload);
    if content_type != ContentType::Code {
        return all;
    }

    let mut advised = code::get_code_conversions(content);
    if detect_code_language(content) == Some("json") {
        advised.extend(JSON_IDS);
    }

    let filtered: Vec<ConversionOption> = all
        .iter()
        .filter(|option| advised.contains(&option.id))
        .copied()
        .collect();

    if filtered.is_empty() {
        all
    } else {
        filtered
    }
}
