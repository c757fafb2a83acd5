//! ID 生成模块
//! 提供全局唯一 ID 生成功能

use std::sync::atomic::{AtomicU64, Ordering};

/// 同一纳秒内多次生成时用于区分的序号
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// 生成唯一 ID（基于时间戳的纳秒级十六进制 + 序号）
#[inline]
pub fn generate_id() -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}", timestamp, seq)
}
