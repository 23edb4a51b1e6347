//! 探测模块：向目标发起HTTP请求并缓冲完整响应
pub mod http_probe;

use std::collections::HashMap;
use async_trait::async_trait;
use tracing::debug;

use crate::error::{CmsResult, WhatCmsError};
use crate::rule::{FingerRule, DEFAULT_METHOD, DEFAULT_PATH};
use crate::signal::FaviconHasher;
use crate::utils::join_path;

pub use self::http_probe::HttpProbe;

/// favicon 固定路径
pub const FAVICON_PATH: &str = "/favicon.ico";

/// 单次探测请求
#[derive(Debug, Clone, Copy)]
pub struct ProbeRequest<'a> {
    pub method: &'a str,
    pub base_url: &'a str,
    pub path: &'a str,
    pub headers: Option<&'a HashMap<String, String>>,
    pub body: &'a str,
}

impl<'a> ProbeRequest<'a> {
    /// 基线请求：GET 根路径，无自定义请求头和请求体
    pub fn baseline(base_url: &'a str) -> Self {
        Self::get(base_url, DEFAULT_PATH)
    }

    /// favicon 请求
    pub fn favicon(base_url: &'a str) -> Self {
        Self::get(base_url, FAVICON_PATH)
    }

    /// 按规则声明的请求形态构造请求
    pub fn for_rule(base_url: &'a str, rule: &'a FingerRule) -> Self {
        Self {
            method: rule.method(),
            base_url,
            path: rule.path(),
            headers: Some(&rule.request_headers).filter(|h| !h.is_empty()),
            body: &rule.request_data,
        }
    }

    fn get(base_url: &'a str, path: &'a str) -> Self {
        Self {
            method: DEFAULT_METHOD,
            base_url,
            path,
            headers: None,
            body: "",
        }
    }

    /// 完整请求地址
    pub fn url(&self) -> String {
        join_path(self.base_url, self.path)
    }
}

/// 原始响应（响应体已完整读取）
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status_code: u16,
    /// 小写Header名称 -> 按出现顺序排列的全部值
    pub headers: HashMap<String, Vec<String>>,
    pub body: Vec<u8>,
}

/// HTTP 探测能力
///
/// 实现方负责超时与连接复用；传输层失败（DNS、连接拒绝、超时、读取响应体失败）
/// 一律返回 [`WhatCmsError::Unreachable`]，不做重试。
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// 发送一次请求并读取完整响应
    async fn fetch(&self, request: &ProbeRequest<'_>) -> CmsResult<RawResponse>;

    /// 获取 `/favicon.ico` 并计算其 MD5
    ///
    /// 请求失败或状态码非 200 时返回 [`WhatCmsError::FaviconFetchError`]。
    async fn fetch_favicon_hash(&self, base_url: &str) -> CmsResult<String> {
        let request = ProbeRequest::favicon(base_url);
        let response = self
            .fetch(&request)
            .await
            .map_err(|e| WhatCmsError::FaviconFetchError(e.to_string()))?;

        if response.status_code != 200 {
            return Err(WhatCmsError::FaviconFetchError(format!(
                "{} 返回状态码 {}",
                request.url(),
                response.status_code
            )));
        }

        let hash = FaviconHasher::hash(&response.body);
        debug!("favicon 哈希计算完成：{}，大小：{} 字节", hash, response.body.len());
        Ok(hash)
    }
}
