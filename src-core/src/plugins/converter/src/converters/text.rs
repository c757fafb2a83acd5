//! 文本转换
//!
//! 纯字符串变换；只有 Base64 解码与 HTML 转换可能失败。

use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use htmd::options::{CodeBlockStyle, HeadingStyle, Options as HtmlOptions};
use htmd::HtmlToMarkdown;
use pulldown_cmark::{html, Options as MarkdownOptions, Parser};
use serde::{Deserialize, Serialize};
use snipwise_common::{ConvertError, ConvertResult};

/// 解码时不强制填充
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// 文本统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
    pub sentences: usize,
}

/// Markdown 转 HTML（CommonMark + 表格/删除线/任务列表）
pub fn markdown_to_html(markdown: &str) -> String {
    let options = MarkdownOptions::ENABLE_TABLES
        | MarkdownOptions::ENABLE_STRIKETHROUGH
        | MarkdownOptions::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// HTML 转 Markdown（ATX 标题，围栏代码块）
pub fn html_to_markdown(html: &str) -> ConvertResult<String> {
    let converter = HtmlToMarkdown::builder()
        .options(HtmlOptions {
            heading_style: HeadingStyle::Atx,
            code_block_style: CodeBlockStyle::Fenced,
            ..Default::default()
        })
        .skip_tags(vec!["script", "style"])
        .build();

    converter
        .convert(html)
        .map_err(|e| ConvertError::InvalidHtml(e.to_string()))
}

pub fn to_upper_case(text: &str) -> String {
    text.to_uppercase()
}

pub fn to_lower_case(text: &str) -> String {
    text.to_lowercase()
}

/// UTF-8 安全的 Base64 编码
pub fn to_base64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Base64 解码，忽略空白；非法输入或非 UTF-8 内容返回 Decode 错误
pub fn from_base64(input: &str) -> ConvertResult<String> {
    let compact: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = LENIENT_BASE64
        .decode(compact.as_bytes())
        .map_err(|e| ConvertError::Decode(format!("Invalid Base64 input: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|_| ConvertError::Decode("Base64 payload is not valid UTF-8".to_string()))
}

/// 编码五个保留字符
pub fn encode_html_entities(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#039;"),
            _ => output.push(c),
        }
    }
    output
}

/// 解码命名与数字实体
pub fn decode_html_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// 按 Unicode 标量反转
pub fn reverse_string(text: &str) -> String {
    text.chars().rev().collect()
}

/// 合并连续空白并去除首尾空白
pub fn trim_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn get_text_stats(text: &str) -> TextStats {
    TextStats {
        characters: text.chars().count(),
        words: text.split_whitespace().count(),
        lines: text.split('\n').count(),
        sentences: text
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count(),
    }
}
