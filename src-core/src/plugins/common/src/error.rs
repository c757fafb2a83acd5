//! 转换错误类型
//!
//! 分类永远不会失败；只有显式的转换操作（`apply`）会返回错误，
//! 错误信息直接展示给调用方，不重试也不回退。

use thiserror::Error;

/// 转换结果类型
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

/// 转换错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// 输入不是合法的 JSON
    #[error("Invalid JSON input: {0}")]
    InvalidJson(String),

    /// 输入不是合法的 YAML
    #[error("Invalid YAML input: {0}")]
    InvalidYaml(String),

    /// 输入不是可转换的 CSV
    #[error("Invalid CSV input: {0}")]
    InvalidCsv(String),

    /// 无法解析的颜色
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// 无法解析的 URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Base64 / 百分号编码解码失败
    #[error("Decode error: {0}")]
    Decode(String),

    /// 二维码生成失败
    #[error("Failed to generate QR code: {0}")]
    QrGeneration(String),

    /// HTML 转换失败
    #[error("Invalid HTML input: {0}")]
    InvalidHtml(String),

    /// 注册表中不存在该转换
    #[error("Unknown conversion: {0}")]
    UnknownConversion(String),
}

impl ConvertError {
    /// 错误类别名称，供 UI 区分展示
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::InvalidJson(_) => "InvalidJSON",
            ConvertError::InvalidYaml(_) => "InvalidYAML",
            ConvertError::InvalidCsv(_) => "InvalidCSV",
            ConvertError::InvalidColor(_) => "InvalidColor",
            ConvertError::InvalidUrl(_) => "InvalidURL",
            ConvertError::Decode(_) => "DecodeError",
            ConvertError::QrGeneration(_) => "QrGenerationError",
            ConvertError::InvalidHtml(_) => "InvalidHTML",
            ConvertError::UnknownConversion(_) => "UnknownConversion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_names_format() {
        let err = ConvertError::InvalidJson("expected value at line 1 column 1".to_string());
        assert!(err.to_string().starts_with("Invalid JSON input"));
        assert_eq!(err.kind(), "InvalidJSON");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(ConvertError::Decode(String::new()).kind(), "DecodeError");
        assert_eq!(ConvertError::QrGeneration(String::new()).kind(), "QrGenerationError");
        assert_eq!(ConvertError::InvalidUrl(String::new()).kind(), "InvalidURL");
    }
}
