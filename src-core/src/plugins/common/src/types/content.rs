//! 内容类型数据模型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 内容类型
///
/// `Image` 只来自图片捕获路径，文本分类永远不会产出它，
/// 但它是一个合法的转换类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Url,
    Code,
    Color,
    Text,
    Image,
}

impl ContentType {
    /// 全部类型（按声明顺序）
    pub const ALL: [ContentType; 5] = [
        ContentType::Url,
        ContentType::Code,
        ContentType::Color,
        ContentType::Text,
        ContentType::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Code => "code",
            ContentType::Color => "color",
            ContentType::Text => "text",
            ContentType::Image => "image",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url" => Ok(ContentType::Url),
            "code" => Ok(ContentType::Code),
            "color" => Ok(ContentType::Color),
            "text" => Ok(ContentType::Text),
            "image" => Ok(ContentType::Image),
            other => Err(format!("unknown content type: {}", other)),
        }
    }
}

/// 内容元数据
///
/// 计数字段对任何输入都存在；类型相关字段仅在类型匹配时存在。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub char_count: usize,
    pub word_count: usize,
    pub line_count: usize,
    /// 域名（仅 url）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// 颜色原值（仅 color）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_value: Option<String>,
    /// 代码语言（仅 code），未识别时为 "plain"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// 分类结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub metadata: Metadata,
}

/// 转换输出
///
/// `DataUrl` 表示结果是可下载的二进制数据（二维码、图片）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ConversionOutput {
    Text(String),
    DataUrl(String),
}

impl ConversionOutput {
    pub fn as_str(&self) -> &str {
        match self {
            ConversionOutput::Text(s) | ConversionOutput::DataUrl(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            ConversionOutput::Text(s) | ConversionOutput::DataUrl(s) => s,
        }
    }

    pub fn is_data_url(&self) -> bool {
        matches!(self, ConversionOutput::DataUrl(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_labels() {
        for ty in ContentType::ALL {
            assert_eq!(ty.as_str().parse::<ContentType>(), Ok(ty));
        }
        assert!("markdown".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_metadata_serialization_skips_absent_fields() {
        let result = ClassificationResult {
            content_type: ContentType::Color,
            metadata: Metadata {
                char_count: 7,
                word_count: 1,
                line_count: 1,
                color_value: Some("#FF5733".to_string()),
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "color");
        assert_eq!(json["metadata"]["colorValue"], "#FF5733");
        assert_eq!(json["metadata"]["charCount"], 7);
        assert!(json["metadata"].get("domain").is_none());
        assert!(json["metadata"].get("language").is_none());
    }
}
