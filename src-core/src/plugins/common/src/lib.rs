//! Snipwise 公共模块
//! 提供各插件共享的类型定义、错误类型、配置与 ID 生成

pub mod config;
pub mod error;
pub mod id;
pub mod types;

pub use config::{ColorOptions, QrOptions, SnipwiseConfig, UrlOptions};
pub use error::{ConvertError, ConvertResult};
pub use types::{
    ClassificationResult, ContentType, ConversionOutput, DetectionOptions, Metadata,
};
