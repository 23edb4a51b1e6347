//! 全局错误类型定义

use thiserror::Error;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum WhatCmsError {
    // 规则相关错误（致命，探测前终止）
    #[error("规则加载失败：{0}")]
    RuleLoadError(String),
    #[error("规则解析失败：{0}")]
    RuleParseError(String),

    // 探测相关错误
    #[error("无法连接到目标站点 {url}：{reason}")]
    Unreachable { url: String, reason: String },
    #[error("请求失败 :{path}，{reason}")]
    RuleProbeError { path: String, reason: String },
    #[error("favicon 获取失败：{0}")]
    FaviconFetchError(String),

    // 检测器相关错误
    #[error("检测器未初始化")]
    DetectorNotInitialized,

    // 网络相关错误
    #[error("HTTP客户端初始化失败：{0}")]
    HttpClientError(#[from] reqwest::Error),

    // 基础错误
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

impl WhatCmsError {
    /// 是否为致命错误（需终止本次识别）
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            WhatCmsError::RuleProbeError { .. } | WhatCmsError::FaviconFetchError(_)
        )
    }
}

// 全局Result类型
pub type CmsResult<T> = Result<T, WhatCmsError>;
