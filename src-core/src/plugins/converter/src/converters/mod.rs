//! 各内容类型的格式转换函数

pub mod case;
pub mod code;
pub mod color;
mod color_names;
pub mod qr;
pub mod text;
pub mod url;
