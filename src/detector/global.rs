//! 全局检测器单例管理
//! reqwest::Client 可安全并发复用，进程内共享一个检测器即可复用连接池
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::detector::CmsDetector;
use crate::config::{ConfigManager, GlobalConfig};
use crate::error::{CmsResult, WhatCmsError};
use crate::rule::CmsMatch;

/// 全局检测器实例
static GLOBAL_DETECTOR: Lazy<Arc<OnceCell<CmsDetector>>> = Lazy::new(|| {
    Arc::new(OnceCell::new())
});

/// 初始化全局检测器（默认配置）
pub async fn init_detector() -> CmsResult<()> {
    init_detector_with_config(ConfigManager::get_default()).await
}

/// 带自定义配置初始化全局检测器，重复调用时保留首次初始化的实例
pub async fn init_detector_with_config(config: GlobalConfig) -> CmsResult<()> {
    GLOBAL_DETECTOR
        .get_or_try_init(|| CmsDetector::new(config))
        .await?;
    Ok(())
}

/// 获取全局检测器
pub(crate) fn get_global_detector() -> CmsResult<&'static CmsDetector> {
    GLOBAL_DETECTOR.get().ok_or(WhatCmsError::DetectorNotInitialized)
}

/// 使用全局检测器识别目标站点
pub async fn identify_cms(url: &str) -> CmsResult<Option<CmsMatch>> {
    get_global_detector()?.identify(url).await
}
