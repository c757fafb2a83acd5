//! Snipwise 格式转换插件
//!
//! 提供代码 / 文本 / 颜色 / URL 的格式转换函数，以及按内容类型列出
//! 可用转换的注册表。所有转换都是同步纯函数。

pub mod converters;
mod registry;

pub use converters::color::{parse_color, ColorInfo, DEFAULT_ADJUST_AMOUNT};
pub use converters::text::TextStats;
pub use converters::url::{UrlInfo, DEFAULT_SHORTEN_LENGTH};
pub use registry::{
    applicable_conversions, apply_conversion, apply_conversion_with, conversions_for,
    conversions_for_label, find_conversion, ConversionOption,
};
pub use snipwise_common::{ContentType, ConversionOutput, ConvertError, ConvertResult};
