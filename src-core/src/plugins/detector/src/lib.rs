//! Snipwise 内容检测插件
//!
//! 对剪贴板文本进行分类（颜色 / URL / 代码 / 文本）并提取元数据。
//! 全部为纯函数：相同输入永远得到相同结果，可在任意线程并发调用。

mod classifier;
mod detectors;
mod metadata;
pub mod patterns;

pub use classifier::{categorize, classify, classify_with};
pub use detectors::{
    code_indicator_count, detect_code_language, is_code, is_color, is_url, language_scores,
};
pub use metadata::{
    count_lines, count_words, extract_domain_fallback, extract_metadata, has_http_scheme,
    with_http_scheme,
};
pub use snipwise_common::{ClassificationResult, ContentType, DetectionOptions, Metadata};
