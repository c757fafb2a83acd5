//! 剪贴板捕获
//!
//! 把宿主读到的剪贴板内容整理成 `ClipboardItem`。连续两次相同的内容
//! 只记录一次；去重状态由调用方持有的 `CaptureState` 保存，持久化交给宿主。

use serde::{Deserialize, Serialize};
use snipwise_common::id::generate_id;
use snipwise_common::{ContentType, DetectionOptions, Metadata, SnipwiseConfig};
use snipwise_detector::classify_with;

/// 没有提供哈希时，取图片数据前多少个字符用于去重
const IMAGE_HASH_PREFIX_LEN: usize = 100;

/// 预览文本的最大字符数
const PREVIEW_LEN: usize = 40;

/// 内容来源页面
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// 图片条目的原始数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    /// data URL
    pub image_data: String,
    pub mime_type: String,
    pub image_hash: String,
}

/// 一条剪贴板记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardItem {
    pub id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// 目前总是 "plain"
    pub format: String,
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePayload>,
    /// 毫秒时间戳
    pub timestamp: i64,
    pub source: CaptureSource,
    pub tags: Vec<String>,
    pub pinned: bool,
    pub use_count: u32,
    pub last_used: i64,
}

impl ClipboardItem {
    fn new(content: String, content_type: ContentType, metadata: Metadata) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: generate_id(),
            content,
            content_type,
            format: "plain".to_string(),
            metadata,
            image: None,
            timestamp: now,
            source: CaptureSource::default(),
            tags: Vec::new(),
            pinned: false,
            use_count: 0,
            last_used: now,
        }
    }

    /// 通知用的短预览
    pub fn preview(&self) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(PREVIEW_LEN).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}

/// 一次捕获的结果
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// 与上一次捕获的内容相同
    Duplicate,
    /// 内容为空白
    Empty,
    Captured(ClipboardItem),
}

impl CaptureOutcome {
    pub fn item(&self) -> Option<&ClipboardItem> {
        match self {
            CaptureOutcome::Captured(item) => Some(item),
            CaptureOutcome::Duplicate | CaptureOutcome::Empty => None,
        }
    }
}

/// 捕获状态：保存上一次的内容（文本为原文，图片为哈希）
#[derive(Debug, Clone, Default)]
pub struct CaptureState {
    last_content: String,
    options: DetectionOptions,
}

impl CaptureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DetectionOptions) -> Self {
        Self {
            last_content: String::new(),
            options,
        }
    }

    pub fn from_config(config: &SnipwiseConfig) -> Self {
        Self::with_options(config.detection.clone())
    }

    pub fn last_content(&self) -> &str {
        &self.last_content
    }

    /// 清空去重状态（例如清空历史后）
    pub fn reset(&mut self) {
        self.last_content.clear();
    }

    /// 捕获文本
    pub fn capture_text(&mut self, content: &str, source: CaptureSource) -> CaptureOutcome {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return CaptureOutcome::Empty;
        }

        if trimmed == self.last_content.trim() {
            log::debug!("[Capture] 内容与上一次相同，跳过");
            return CaptureOutcome::Duplicate;
        }

        self.last_content = content.to_string();

        let classification = classify_with(content, &self.options);
        let mut item = ClipboardItem::new(
            trimmed.to_string(),
            classification.content_type,
            classification.metadata,
        );
        item.source = source;

        log::info!(
            "[Capture] 新条目 {}: 类型 {}, {} 字符",
            item.id,
            item.content_type,
            item.metadata.char_count
        );

        CaptureOutcome::Captured(item)
    }

    /// 捕获图片
    ///
    /// 优先用宿主提供的哈希去重，没有时取数据前 100 个字符
    pub fn capture_image(
        &mut self,
        image_data: &str,
        mime_type: &str,
        hash: Option<&str>,
    ) -> CaptureOutcome {
        if image_data.is_empty() {
            return CaptureOutcome::Empty;
        }

        let image_hash = match hash {
            Some(hash) if !hash.is_empty() => hash.to_string(),
            _ => image_data.chars().take(IMAGE_HASH_PREFIX_LEN).collect(),
        };

        if image_hash == self.last_content {
            log::debug!("[Capture] 图片与上一次相同，跳过");
            return CaptureOutcome::Duplicate;
        }

        self.last_content = image_hash.clone();

        let mut item = ClipboardItem::new(
            format!("Image ({})", mime_type),
            ContentType::Image,
            Metadata::default(),
        );
        item.image = Some(ImagePayload {
            image_data: image_data.to_string(),
            mime_type: mime_type.to_string(),
            image_hash,
        });

        log::info!("[Capture] 新图片条目 {}: {}", item.id, mime_type);

        CaptureOutcome::Captured(item)
    }
}
