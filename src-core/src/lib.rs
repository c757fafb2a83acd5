//! Snipwise 剪贴板内容引擎
//!
//! 判断剪贴板文本属于哪种内容（URL / 颜色 / 代码 / 文本），并提供该类型
//! 可用的格式转换。检测与转换分别由 `snipwise-detector` 和
//! `snipwise-converter` 实现，这里统一导出并提供带配置的入口。

pub mod capture;

pub use capture::{CaptureOutcome, CaptureSource, CaptureState, ClipboardItem, ImagePayload};
pub use snipwise_common::{
    ClassificationResult, ContentType, ConversionOutput, ConvertError, ConvertResult,
    DetectionOptions, Metadata, SnipwiseConfig,
};
pub use snipwise_converter::{
    applicable_conversions, apply_conversion, conversions_for, conversions_for_label,
    converters, find_conversion, parse_color, ColorInfo, ConversionOption, TextStats, UrlInfo,
};
pub use snipwise_detector::{classify, classify_with, detect_code_language};

/// 带配置的引擎入口
#[derive(Debug, Clone, Default)]
pub struct Snipwise {
    config: SnipwiseConfig,
}

impl Snipwise {
    pub fn new(config: SnipwiseConfig) -> Self {
        Self { config }
    }

    /// 从 JSON 配置文本创建，配置可以嵌套在 `"snipwise"` 键下
    pub fn from_json_config(content: &str) -> Result<Self, String> {
        let config = SnipwiseConfig::from_json_str(content)?;
        log::info!("[Snipwise] 已加载配置");
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &SnipwiseConfig {
        &self.config
    }

    pub fn classify(&self, content: &str) -> ClassificationResult {
        classify_with(content, &self.config.detection)
    }

    /// 分类并返回该内容适用的转换
    pub fn conversions(&self, content: &str) -> (ClassificationResult, Vec<ConversionOption>) {
        let classification = self.classify(content);
        let options = applicable_conversions(classification.content_type, content, false);
        (classification, options)
    }

    pub fn apply(
        &self,
        content_type: ContentType,
        id: &str,
        input: &str,
    ) -> ConvertResult<ConversionOutput> {
        snipwise_converter::apply_conversion_with(content_type, id, input, &self.config)
    }

    /// 新建一个使用相同检测选项的捕获状态
    pub fn capture_state(&self) -> CaptureState {
        CaptureState::from_config(&self.config)
    }
}
