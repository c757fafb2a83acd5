//! 颜色转换
//!
//! `parse_color` 对无法解析的输入返回 None；其余格式转换与配色操作
//! 对无法解析的输入返回 `InvalidColor` 错误。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use snipwise_common::{ConvertError, ConvertResult};

use super::color_names::{hex_for_name, name_for_hex};

/// lighten / darken / saturate / desaturate 的默认百分比
pub const DEFAULT_ADJUST_AMOUNT: f64 = 10.0;

static RGB_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^rgba?\(\s*([+-]?[\d.]+%?)\s*,\s*([+-]?[\d.]+%?)\s*,\s*([+-]?[\d.]+%?)\s*(?:,\s*([\d.]+%?)\s*)?\)$",
    )
    .expect("内置正则必须合法")
});

static HSL_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^hsla?\(\s*([+-]?[\d.]+)(?:deg)?\s*,\s*([\d.]+)%?\s*,\s*([\d.]+)%?\s*(?:,\s*([\d.]+%?)\s*)?\)$",
    )
    .expect("内置正则必须合法")
});

/// 颜色完整信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInfo {
    pub hex: String,
    pub rgb: String,
    pub rgba: String,
    pub hsl: String,
    pub hsla: String,
    pub hsv: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_light: bool,
    pub is_dark: bool,
    /// WCAG 相对亮度，0.0 – 1.0
    pub luminance: f64,
}

/// RGB 通道 0–255（未取整），alpha 0–1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// 色相 0–360，饱和度与亮度 0–1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// 通道值，支持百分比
fn parse_channel(raw: &str) -> Option<f64> {
    let value = parse_number(raw)?;
    let value = if raw.ends_with('%') { value * 255.0 / 100.0 } else { value };
    Some(value.clamp(0.0, 255.0))
}

fn parse_alpha(raw: Option<regex::Match<'_>>) -> Option<f64> {
    let Some(raw) = raw else {
        return Some(1.0);
    };
    let raw = raw.as_str();
    let value = parse_number(raw)?;
    let value = if raw.ends_with('%') { value / 100.0 } else { value };
    Some(value.clamp(0.0, 1.0))
}

fn parse_hex(input: &str) -> Option<Rgba> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => return None,
    };

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&expanded[range], 16).ok().map(f64::from)
    };

    Some(Rgba {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
        a: 1.0,
    })
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// 归一化 RGB 的色相（0–1）
fn hue_of(r: f64, g: f64, b: f64, max: f64, d: f64) -> f64 {
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    h / 6.0
}

/// 整数输出不带小数点（1 而不是 1.0），小数按最短形式输出
fn format_alpha(a: f64) -> String {
    format!("{}", a)
}

impl Rgba {
    /// 解析颜色字符串：CSS 名称、HEX、rgb()/rgba()、hsl()/hsla()
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        if trimmed.eq_ignore_ascii_case("transparent") {
            return Some(Rgba {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.0,
            });
        }

        if let Some(hex) = hex_for_name(trimmed) {
            return parse_hex(hex);
        }

        if let Some(rgba) = parse_hex(trimmed) {
            return Some(rgba);
        }

        if let Some(caps) = RGB_FUNCTION.captures(trimmed) {
            return Some(Rgba {
                r: parse_channel(&caps[1])?,
                g: parse_channel(&caps[2])?,
                b: parse_channel(&caps[3])?,
                a: parse_alpha(caps.get(4))?,
            });
        }

        if let Some(caps) = HSL_FUNCTION.captures(trimmed) {
            let hsl = Hsla {
                h: parse_number(&caps[1])?.rem_euclid(360.0),
                s: (parse_number(&caps[2])? / 100.0).clamp(0.0, 1.0),
                l: (parse_number(&caps[3])? / 100.0).clamp(0.0, 1.0),
                a: parse_alpha(caps.get(4))?,
            };
            return Some(Rgba::from_hsl(hsl));
        }

        None
    }

    pub fn from_hsl(hsl: Hsla) -> Self {
        let h = hsl.h / 360.0;
        let (r, g, b) = if hsl.s == 0.0 {
            (hsl.l, hsl.l, hsl.l)
        } else {
            let q = if hsl.l < 0.5 {
                hsl.l * (1.0 + hsl.s)
            } else {
                hsl.l + hsl.s - hsl.l * hsl.s
            };
            let p = 2.0 * hsl.l - q;
            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Rgba {
            r: r * 255.0,
            g: g * 255.0,
            b: b * 255.0,
            a: hsl.a,
        }
    }

    pub fn to_hsl(&self) -> Hsla {
        let (r, g, b) = (self.r / 255.0, self.g / 255.0, self.b / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsla {
                h: 0.0,
                s: 0.0,
                l,
                a: self.a,
            };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        Hsla {
            h: hue_of(r, g, b, max, d) * 360.0,
            s,
            l,
            a: self.a,
        }
    }

    /// (色相 0–360, 饱和度 0–1, 明度 0–1)
    pub fn to_hsv(&self) -> (f64, f64, f64) {
        let (r, g, b) = (self.r / 255.0, self.g / 255.0, self.b / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;
        let s = if max == 0.0 { 0.0 } else { d / max };
        let h = if d == 0.0 { 0.0 } else { hue_of(r, g, b, max, d) * 360.0 };
        (h, s, max)
    }

    /// 取整后的 RGB
    pub fn rounded(&self) -> (u8, u8, u8) {
        let round = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        (round(self.r), round(self.g), round(self.b))
    }

    /// 取整后的 RGBA 字节
    pub fn to_bytes(&self) -> [u8; 4] {
        let (r, g, b) = self.rounded();
        [r, g, b, (self.a * 255.0).round().clamp(0.0, 255.0) as u8]
    }

    pub fn hex_string(&self) -> String {
        let (r, g, b) = self.rounded();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    pub fn rgb_string(&self) -> String {
        let (r, g, b) = self.rounded();
        format!("rgb({}, {}, {})", r, g, b)
    }

    pub fn rgba_string(&self) -> String {
        let (r, g, b) = self.rounded();
        format!("rgba({}, {}, {}, {})", r, g, b, format_alpha(self.a))
    }

    pub fn hsl_string(&self) -> String {
        let hsl = self.to_hsl();
        format!(
            "hsl({}, {}%, {}%)",
            hsl.h.round(),
            (hsl.s * 100.0).round(),
            (hsl.l * 100.0).round()
        )
    }

    pub fn hsla_string(&self) -> String {
        let hsl = self.to_hsl();
        format!(
            "hsla({}, {}%, {}%, {})",
            hsl.h.round(),
            (hsl.s * 100.0).round(),
            (hsl.l * 100.0).round(),
            format_alpha(self.a)
        )
    }

    pub fn hsv_string(&self) -> String {
        let (h, s, v) = self.to_hsv();
        format!(
            "hsv({}, {}%, {}%)",
            h.round(),
            (s * 100.0).round(),
            (v * 100.0).round()
        )
    }

    /// 感知亮度 0–255
    pub fn brightness(&self) -> f64 {
        let (r, g, b) = self.rounded();
        (f64::from(r) * 299.0 + f64::from(g) * 587.0 + f64::from(b) * 114.0) / 1000.0
    }

    pub fn is_light(&self) -> bool {
        self.brightness() >= 128.0
    }

    /// WCAG 相对亮度
    pub fn luminance(&self) -> f64 {
        let (r, g, b) = self.rounded();
        let linear = |c: u8| {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
    }

    /// CSS 名称（仅不透明颜色；完全透明为 transparent）
    pub fn name(&self) -> Option<&'static str> {
        if self.a == 0.0 {
            return Some("transparent");
        }
        if self.a < 1.0 {
            return None;
        }
        name_for_hex(&self.hex_string())
    }

    fn rotate_hue(&self, degrees: f64) -> Rgba {
        let mut hsl = self.to_hsl();
        hsl.h = (hsl.h + degrees).rem_euclid(360.0);
        Rgba::from_hsl(hsl)
    }

    fn adjust(&self, ds: f64, dl: f64) -> Rgba {
        let mut hsl = self.to_hsl();
        hsl.s = (hsl.s + ds / 100.0).clamp(0.0, 1.0);
        hsl.l = (hsl.l + dl / 100.0).clamp(0.0, 1.0);
        Rgba::from_hsl(hsl)
    }

    pub fn info(&self) -> ColorInfo {
        let is_light = self.is_light();
        ColorInfo {
            hex: self.hex_string(),
            rgb: self.rgb_string(),
            rgba: self.rgba_string(),
            hsl: self.hsl_string(),
            hsla: self.hsla_string(),
            hsv: self.hsv_string(),
            name: self.name().map(str::to_string),
            is_light,
            is_dark: !is_light,
            luminance: self.luminance(),
        }
    }
}

fn require_color(input: &str) -> ConvertResult<Rgba> {
    Rgba::parse(input).ok_or_else(|| ConvertError::InvalidColor(input.trim().to_string()))
}

/// 解析任意格式的颜色并返回全部表示，无法解析时返回 None
pub fn parse_color(input: &str) -> Option<ColorInfo> {
    Rgba::parse(input).map(|color| color.info())
}

pub fn to_hex(input: &str) -> ConvertResult<String> {
    Ok(require_color(input)?.hex_string())
}

pub fn to_rgb(input: &str) -> ConvertResult<String> {
    Ok(require_color(input)?.rgb_string())
}

pub fn to_rgba(input: &str) -> ConvertResult<String> {
    Ok(require_color(input)?.rgba_string())
}

pub fn to_hsl(input: &str) -> ConvertResult<String> {
    Ok(require_color(input)?.hsl_string())
}

pub fn to_hsla(input: &str) -> ConvertResult<String> {
    Ok(require_color(input)?.hsla_string())
}

pub fn to_hsv(input: &str) -> ConvertResult<String> {
    Ok(require_color(input)?.hsv_string())
}

/// 互补色（色相 +180°）
pub fn get_complementary(input: &str) -> ConvertResult<String> {
    Ok(require_color(input)?.rotate_hue(180.0).hex_string())
}

fn palette(input: &str, offsets: &[f64]) -> ConvertResult<Vec<String>> {
    let color = require_color(input)?;
    Ok(std::iter::once(color.hex_string())
        .chain(offsets.iter().map(|&d| color.rotate_hue(d).hex_string()))
        .collect())
}

/// 类似色：原色、-30°、+30°
pub fn get_analogous(input: &str) -> ConvertResult<Vec<String>> {
    palette(input, &[-30.0, 30.0])
}

/// 三角色：原色、+120°、+240°
pub fn get_triadic(input: &str) -> ConvertResult<Vec<String>> {
    palette(input, &[120.0, 240.0])
}

/// 分裂互补色：原色、+150°、+210°
pub fn get_split_complementary(input: &str) -> ConvertResult<Vec<String>> {
    palette(input, &[150.0, 210.0])
}

pub fn lighten(input: &str, amount: f64) -> ConvertResult<String> {
    Ok(require_color(input)?.adjust(0.0, amount).hex_string())
}

pub fn darken(input: &str, amount: f64) -> ConvertResult<String> {
    Ok(require_color(input)?.adjust(0.0, -amount).hex_string())
}

pub fn saturate(input: &str, amount: f64) -> ConvertResult<String> {
    Ok(require_color(input)?.adjust(amount, 0.0).hex_string())
}

pub fn desaturate(input: &str, amount: f64) -> ConvertResult<String> {
    Ok(require_color(input)?.adjust(-amount, 0.0).hex_string())
}

/// WCAG 对比度（1 – 21）
pub fn get_contrast_ratio(first: &str, second: &str) -> ConvertResult<f64> {
    let l1 = require_color(first)?.luminance();
    let l2 = require_color(second)?.luminance();
    Ok((l1.max(l2) + 0.05) / (l1.min(l2) + 0.05))
}

/// WCAG AA：普通文本 4.5，大号文本 3.0
pub fn is_wcag_aa(first: &str, second: &str, large_text: bool) -> ConvertResult<bool> {
    let ratio = get_contrast_ratio(first, second)?;
    Ok(if large_text { ratio >= 3.0 } else { ratio >= 4.5 })
}

/// WCAG AAA：普通文本 7.0，大号文本 4.5
pub fn is_wcag_aaa(first: &str, second: &str, large_text: bool) -> ConvertResult<bool> {
    let ratio = get_contrast_ratio(first, second)?;
    Ok(if large_text { ratio >= 4.5 } else { ratio >= 7.0 })
}

/// 背景色上可读的文字颜色（纯黑或纯白）
pub fn get_readable_text_color(background: &str) -> ConvertResult<String> {
    let color = require_color(background)?;
    Ok(if color.is_light() { "#000000" } else { "#FFFFFF" }.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!(to_rgb("#FF5733").unwrap(), "rgb(255, 87, 51)");
        assert_eq!(to_rgb("#f00").unwrap(), "rgb(255, 0, 0)");
        assert_eq!(to_hex("rgb(255, 87, 51)").unwrap(), "#ff5733");
        assert_eq!(to_hex("hsl(120, 100%, 50%)").unwrap(), "#00ff00");
        assert_eq!(to_hex("RebeccaPurple").unwrap(), "#663399");
        assert_eq!(to_hex("rgb(100%, 0%, 0%)").unwrap(), "#ff0000");
        assert_eq!(to_hex("ff5733").unwrap(), "#ff5733");
    }

    #[test]
    fn test_output_formats() {
        assert_eq!(to_rgba("#FF5733").unwrap(), "rgba(255, 87, 51, 1)");
        assert_eq!(to_rgba("rgba(10, 20, 30, 0.5)").unwrap(), "rgba(10, 20, 30, 0.5)");
        assert_eq!(to_hsl("#FF5733").unwrap(), "hsl(11, 100%, 60%)");
        assert_eq!(to_hsla("#FF5733").unwrap(), "hsla(11, 100%, 60%, 1)");
        assert_eq!(to_hsv("#FF5733").unwrap(), "hsv(11, 80%, 100%)");
        assert_eq!(to_hsl("#808080").unwrap(), "hsl(0, 0%, 50%)");
    }

    #[test]
    fn test_parse_color_info() {
        let info = parse_color("#ffffff").unwrap();
        assert_eq!(info.hex, "#ffffff");
        assert_eq!(info.name.as_deref(), Some("white"));
        assert!(info.is_light);
        assert!(!info.is_dark);
        assert!((info.luminance - 1.0).abs() < 1e-9);

        let info = parse_color("rgb(0, 0, 0)").unwrap();
        assert!(info.is_dark);
        assert_eq!(info.luminance, 0.0);

        assert_eq!(parse_color("transparent").unwrap().name.as_deref(), Some("transparent"));
        assert_eq!(parse_color("rgba(255, 0, 0, 0.5)").unwrap().name, None);
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert!(parse_color("not a color").is_none());
        assert!(parse_color("").is_none());
        assert!(parse_color("#12345").is_none());
        assert!(parse_color("rgb(1, 2)").is_none());
    }

    #[test]
    fn test_invalid_color_errors() {
        assert!(matches!(to_hex("nope"), Err(ConvertError::InvalidColor(_))));
        assert!(matches!(to_rgb("nope"), Err(ConvertError::InvalidColor(_))));
        assert!(matches!(get_triadic("nope"), Err(ConvertError::InvalidColor(_))));
        assert!(matches!(get_contrast_ratio("#fff", "nope"), Err(ConvertError::InvalidColor(_))));
    }

    #[test]
    fn test_palettes() {
        assert_eq!(get_complementary("#ff0000").unwrap(), "#00ffff");
        assert_eq!(
            get_triadic("#ff0000").unwrap(),
            vec!["#ff0000", "#00ff00", "#0000ff"]
        );
        assert_eq!(
            get_analogous("#ff0000").unwrap(),
            vec!["#ff0000", "#ff0080", "#ff8000"]
        );
        assert_eq!(get_split_complementary("#ff0000").unwrap().len(), 3);
    }

    #[test]
    fn test_adjustments_clamp() {
        assert_eq!(lighten("#000000", DEFAULT_ADJUST_AMOUNT).unwrap(), "#1a1a1a");
        assert_eq!(darken("#ffffff", DEFAULT_ADJUST_AMOUNT).unwrap(), "#e6e6e6");
        assert_eq!(lighten("#ffffff", 50.0).unwrap(), "#ffffff");
        assert_eq!(darken("#000000", 50.0).unwrap(), "#000000");
        assert_eq!(desaturate("#ff0000", 100.0).unwrap(), "#808080");
        assert_eq!(saturate("#ff0000", 10.0).unwrap(), "#ff0000");
    }

    #[test]
    fn test_contrast() {
        let ratio = get_contrast_ratio("#000000", "#ffffff").unwrap();
        assert!((ratio - 21.0).abs() < 1e-9);
        assert_eq!(get_contrast_ratio("#abcdef", "#abcdef").unwrap(), 1.0);
        assert!(is_wcag_aa("#000", "#fff", false).unwrap());
        assert!(is_wcag_aaa("#000", "#fff", false).unwrap());
        // #777777 on white ≈ 4.48
        assert!(!is_wcag_aa("#777777", "#ffffff", false).unwrap());
        assert!(is_wcag_aa("#777777", "#ffffff", true).unwrap());
        assert!(!is_wcag_aaa("#777777", "#ffffff", true).unwrap());
    }

    #[test]
    fn test_readable_text_color() {
        assert_eq!(get_readable_text_color("#ffff00").unwrap(), "#000000");
        assert_eq!(get_readable_text_color("navy").unwrap(), "#FFFFFF");
    }
}
