//! 检测类型模块
//! 提供内容检测相关的类型定义

use serde::{Deserialize, Serialize};

/// 默认代码最小长度（短于此长度的文本永远不是代码）
pub const DEFAULT_CODE_MIN_LENGTH: usize = 10;

/// 检测选项
///
/// 关闭某项检测只会跳过该阶段，不会改变检测优先级：颜色 → URL → 代码 → 文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectionOptions {
    pub detect_color: bool,
    pub detect_url: bool,
    pub detect_code: bool,
    pub code_min_length: usize,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            detect_color: true,
            detect_url: true,
            detect_code: true,
            code_min_length: DEFAULT_CODE_MIN_LENGTH,
        }
    }
}
