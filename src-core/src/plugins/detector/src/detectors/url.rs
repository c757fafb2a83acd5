//! URL 检测器

use crate::patterns::{LOOSE_URL, STRICT_URL};

/// 检测是否为 URL
///
/// 先匹配严格模式（带协议），失败后再接受裸域名
pub fn is_url(text: &str) -> bool {
    let trimmed = text.trim();
    STRICT_URL.is_match(trimmed) || LOOSE_URL.is_match(trimmed)
}
