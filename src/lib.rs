//! rswhatcms - Rust CMS 指纹识别工具

// 导出全局错误类型
pub use self::error::{WhatCmsError, CmsResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder, DEFAULT_TARGET};

// 导出规则模块核心接口
pub use self::rule::{CmsMatch, FingerRule, RuleLoader};

// 导出探测与信号提取接口
pub use self::probe::{HttpProbe, ProbeRequest, ProbeTransport, RawResponse};
pub use self::signal::{FaviconHasher, SignalExtractor, Signals};

// 导出规则判定接口
pub use self::matcher::{MatchOutcome, RuleEvaluator};

// 导出工具模块核心接口
pub use self::utils::HeaderConverter;

// 导出检测模块核心接口
pub use self::detector::{
    CmsDetector,
    init_detector,
    init_detector_with_config,
    identify_cms,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod probe;
pub mod signal;
pub mod matcher;
pub mod utils;
pub mod detector;
