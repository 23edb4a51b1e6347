//! 规则模块：负责规则的加载、数据模型定义
pub mod model;
pub mod loader;

// 导出核心接口
pub use self::model::{CmsMatch, FingerRule, DEFAULT_METHOD, DEFAULT_PATH};
pub use self::loader::RuleLoader;
