//! 配置模块
//!
//! 所有字段都有默认值，宿主应用只需提供想要覆盖的部分。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::DetectionOptions;

/// 配置在宿主配置文件中的根键
pub const CONFIG_ROOT_KEY: &str = "snipwise";

/// 二维码选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrOptions {
    /// 输出图片边长（像素）
    pub width: u32,
    /// 静区宽度（模块数）
    pub margin: u32,
    pub dark_color: String,
    pub light_color: String,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            width: 256,
            margin: 2,
            dark_color: "#000000".to_string(),
            light_color: "#FFFFFF".to_string(),
        }
    }
}

/// 颜色调整选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorOptions {
    /// lighten/darken/saturate/desaturate 的百分比
    pub adjust_amount: f64,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self { adjust_amount: 10.0 }
    }
}

/// URL 显示选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UrlOptions {
    /// shorten_url 的最大显示长度
    pub shorten_max_length: usize,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self {
            shorten_max_length: 50,
        }
    }
}

/// Snipwise 总配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnipwiseConfig {
    pub detection: DetectionOptions,
    pub qr: QrOptions,
    pub color: ColorOptions,
    pub url: UrlOptions,
}

impl SnipwiseConfig {
    /// 从 JSON 文本解析配置
    pub fn from_json_str(content: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| format!("解析配置失败: {}", e))?;
        Self::from_value(&value)
    }

    /// 从 JSON 值解析配置
    ///
    /// 同时接受顶层配置和嵌套在 `"snipwise"` 键下的配置
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let section = get_nested(value, &[CONFIG_ROOT_KEY]).unwrap_or(value);
        if !section.is_object() {
            return Err("配置必须是 JSON 对象".to_string());
        }

        let config: SnipwiseConfig = serde_json::from_value(section.clone())
            .map_err(|e| format!("解析配置失败: {}", e))?;

        if config.qr.width == 0 {
            log::warn!("[Config] 二维码宽度为 0，使用默认值");
            return Ok(SnipwiseConfig {
                qr: QrOptions {
                    width: QrOptions::default().width,
                    ..config.qr
                },
                ..config
            });
        }

        Ok(config)
    }
}

/// 从配置中获取嵌套值
///
/// # 示例
/// ```
/// use serde_json::json;
/// use snipwise_common::config::get_nested;
///
/// let config = json!({ "snipwise": { "qr": { "width": 512 } } });
/// let value = get_nested(&config, &["snipwise", "qr", "width"]);
/// assert_eq!(value, Some(&json!(512)));
/// ```
pub fn get_nested<'a>(config: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let mut current = config;
    for &key in keys {
        current = current.get(key)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = SnipwiseConfig::default();
        assert_eq!(config.qr.width, 256);
        assert_eq!(config.qr.margin, 2);
        assert_eq!(config.qr.dark_color, "#000000");
        assert_eq!(config.detection.code_min_length, 10);
        assert_eq!(config.url.shorten_max_length, 50);
        assert_eq!(config.color.adjust_amount, 10.0);
    }

    #[test]
    fn test_partial_config() {
        let config =
            SnipwiseConfig::from_json_str(r#"{"detection": {"detectCode": false}, "qr": {"width": 512}}"#)
                .unwrap();
        assert!(!config.detection.detect_code);
        assert!(config.detection.detect_url);
        assert_eq!(config.qr.width, 512);
        assert_eq!(config.qr.margin, 2);
    }

    #[test]
    fn test_nested_config() {
        let value = json!({ "snipwise": { "url": { "shortenMaxLength": 30 } }, "other": 1 });
        let config = SnipwiseConfig::from_value(&value).unwrap();
        assert_eq!(config.url.shorten_max_length, 30);
    }

    #[test]
    fn test_zero_width_falls_back() {
        let config = SnipwiseConfig::from_json_str(r#"{"qr": {"width": 0, "margin": 4}}"#).unwrap();
        assert_eq!(config.qr.width, 256);
        assert_eq!(config.qr.margin, 4);
    }

    #[test]
    fn test_invalid_config() {
        assert!(SnipwiseConfig::from_json_str("not json").is_err());
        assert!(SnipwiseConfig::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn test_get_nested_missing() {
        let config = json!({ "a": { "b": 1 } });
        assert_eq!(get_nested(&config, &["a", "c"]), None);
    }
}
