//! 检测模块：CMS 识别核心逻辑
pub mod global;
pub mod detector;

// 导出核心接口
pub use self::global::{init_detector, init_detector_with_config, identify_cms};
pub use self::detector::CmsDetector;
