//! 二维码生成
//!
//! 输出 `data:image/png;base64,...`，图片边长等于配置的宽度。

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, Rgba as Pixel, RgbaImage};
use qrcode::{Color as Module, EcLevel, QrCode};
use snipwise_common::{ConvertError, ConvertResult, QrOptions};

use super::color::Rgba;

/// 宽度不足以容纳全部模块时使用的缩放倍数
const FALLBACK_SCALE: f64 = 4.0;

/// 输出图片边长上限（像素）
const MAX_IMAGE_SIDE: u32 = 4096;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

fn parse_module_color(value: &str) -> ConvertResult<Pixel<u8>> {
    Rgba::parse(value)
        .map(|color| Pixel(color.to_bytes()))
        .ok_or_else(|| ConvertError::QrGeneration(format!("invalid color: {}", value)))
}

/// 先用 M 级纠错，容量不足时降到 L
fn encode(content: &str) -> ConvertResult<QrCode> {
    QrCode::with_error_correction_level(content.as_bytes(), EcLevel::M)
        .or_else(|_| QrCode::with_error_correction_level(content.as_bytes(), EcLevel::L))
        .map_err(|e| ConvertError::QrGeneration(e.to_string()))
}

/// 生成二维码 PNG 的 data URL
pub fn generate_qr_code(content: &str, options: &QrOptions) -> ConvertResult<String> {
    let dark = parse_module_color(&options.dark_color)?;
    let light = parse_module_color(&options.light_color)?;

    let code = encode(content)?;
    let modules = code.width();
    let colors = code.to_colors();

    let oversized = || {
        ConvertError::QrGeneration(format!("image side exceeds {} pixels", MAX_IMAGE_SIDE))
    };

    let margin = usize::try_from(options.margin).map_err(|_| oversized())?;
    let total = margin
        .checked_mul(2)
        .and_then(|m| m.checked_add(modules))
        .ok_or_else(oversized)?;

    // 宽度足够时图片边长就是配置宽度，否则每个模块固定 4 像素
    let (size, scale) = if options.width as usize >= total {
        (options.width, f64::from(options.width) / total as f64)
    } else {
        let size = u32::try_from(total)
            .ok()
            .and_then(|total| total.checked_mul(FALLBACK_SCALE as u32))
            .ok_or_else(oversized)?;
        (size, FALLBACK_SCALE)
    };
    if size > MAX_IMAGE_SIDE {
        return Err(oversized());
    }
    let scaled_margin = margin as f64 * scale;

    let image = RgbaImage::from_fn(size, size, |x, y| {
        let col = ((f64::from(x) - scaled_margin) / scale).floor();
        let row = ((f64::from(y) - scaled_margin) / scale).floor();
        if col < 0.0 || row < 0.0 {
            return light;
        }

        let (col, row) = (col as usize, row as usize);
        if col >= modules || row >= modules {
            return light;
        }

        match colors[row * modules + col] {
            Module::Dark => dark,
            Module::Light => light,
        }
    });

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ConvertError::QrGeneration(e.to_string()))?;

    log::debug!(
        "[Converter] 生成二维码: {} 模块, {}x{} 像素",
        modules,
        size,
        size
    );

    Ok(format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_png(data_url: &str) -> RgbaImage {
        let encoded = data_url.strip_prefix(PNG_DATA_URL_PREFIX).unwrap();
        let bytes = STANDARD.decode(encoded).unwrap();
        image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8()
    }

    #[test]
    fn test_generate_qr_default_options() {
        let url = generate_qr_code("https://example.com", &QrOptions::default()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let image = decode_png(&url);
        assert_eq!(image.width(), 256);
        assert_eq!(image.height(), 256);
        // 静区为背景色
        assert_eq!(image.get_pixel(0, 0), &Pixel([255, 255, 255, 255]));
    }

    #[test]
    fn test_generate_qr_custom_colors() {
        let options = QrOptions {
            width: 200,
            margin: 0,
            dark_color: "#ff0000".to_string(),
            light_color: "white".to_string(),
        };
        let image = decode_png(&generate_qr_code("hello", &options).unwrap());
        assert_eq!(image.width(), 200);
        // 无边距时左上角是定位图案的深色模块
        assert_eq!(image.get_pixel(0, 0), &Pixel([255, 0, 0, 255]));
    }

    #[test]
    fn test_generate_qr_small_width_uses_fallback_scale() {
        let options = QrOptions {
            width: 10,
            ..QrOptions::default()
        };
        let image = decode_png(&generate_qr_code("hi", &options).unwrap());
        // 版本 1：21 模块 + 2×2 边距
        assert_eq!(image.width(), 100);
    }

    #[test]
    fn test_generate_qr_invalid_color() {
        let options = QrOptions {
            dark_color: "not-a-color".to_string(),
            ..QrOptions::default()
        };
        assert!(matches!(
            generate_qr_code("hello", &options),
            Err(ConvertError::QrGeneration(_))
        ));
    }

    #[test]
    fn test_generate_qr_oversized_image() {
        let huge_margin = QrOptions {
            margin: u32::MAX,
            ..QrOptions::default()
        };
        assert!(matches!(
            generate_qr_code("hi", &huge_margin),
            Err(ConvertError::QrGeneration(_))
        ));

        let huge_width = QrOptions {
            width: MAX_IMAGE_SIDE + 1,
            ..QrOptions::default()
        };
        assert!(matches!(
            generate_qr_code("hi", &huge_width),
            Err(ConvertError::QrGeneration(_))
        ));

        // 宽度不足时按每模块 4 像素放大，同样受上限约束
        let wide_margin = QrOptions {
            width: 10,
            margin: 600,
            ..QrOptions::default()
        };
        assert!(matches!(
            generate_qr_code("hi", &wide_margin),
            Err(ConvertError::QrGeneration(_))
        ));
    }

    #[test]
    fn test_generate_qr_too_long() {
        let content = "x".repeat(5000);
        assert!(matches!(
            generate_qr_code(&content, &QrOptions::default()),
            Err(ConvertError::QrGeneration(_))
        ));
    }
}
