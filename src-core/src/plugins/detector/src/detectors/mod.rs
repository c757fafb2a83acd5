//! 检测器模块
//!
//! 提供各种内容类型检测器，可独立使用或组合使用

mod code;
mod color;
mod url;

pub use code::{code_indicator_count, detect_code_language, is_code, language_scores};
pub use color::is_color;
pub use url::is_url;
