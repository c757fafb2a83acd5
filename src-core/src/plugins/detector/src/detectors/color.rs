//! 颜色检测器
//! 支持 HEX、RGB(A)、HSL(A) 格式检测

use crate::patterns::{HEX_COLOR, HSLA_COLOR, HSL_COLOR, RGBA_COLOR, RGB_COLOR};

/// 检测是否为颜色值
pub fn is_color(text: &str) -> bool {
    let trimmed = text.trim();

    HEX_COLOR.is_match(trimmed)
        || RGB_COLOR.is_match(trimmed)
        || RGBA_COLOR.is_match(trimmed)
        || HSL_COLOR.is_match(trimmed)
        || HSLA_COLOR.is_match(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert!(is_color("#FFF"));
        assert!(is_color("#FF5733"));
        assert!(is_color("  #ff5733\n"));
        assert!(!is_color("#FFFF"));
        assert!(!is_color("#GGGGGG"));
        assert!(!is_color("FF5733"));
    }

    #[test]
    fn test_rgb_color() {
        assert!(is_color("rgb(255, 87, 51)"));
        assert!(is_color("RGB(0,0,0)"));
        assert!(is_color("rgba(255, 255, 255, 0.5)"));
        assert!(!is_color("rgb(255, 87)"));
        assert!(!is_color("rgb(1000, 0, 0)"));
    }

    #[test]
    fn test_hsl_color() {
        assert!(is_color("hsl(120, 100%, 50%)"));
        assert!(is_color("HSL(0,0%,0%)"));
        assert!(is_color("hsla(120, 100%, 50%, 0.3)"));
        assert!(!is_color("hsl(120, 100, 50)"));
    }

    #[test]
    fn test_not_color() {
        assert!(!is_color("red"));
        assert!(!is_color("not a color"));
        assert!(!is_color(""));
    }
}
