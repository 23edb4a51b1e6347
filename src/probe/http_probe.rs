//! 基于 reqwest 的探测实现
//! 客户端可在多次识别之间共享（reqwest::Client 内部按目标主机维护空闲连接池）

use std::time::Instant;
use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;

use super::{ProbeRequest, ProbeTransport, RawResponse};
use crate::config::GlobalConfig;
use crate::error::{CmsResult, WhatCmsError};
use crate::utils::HeaderConverter;

/// HTTP 探测器
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// 按配置创建探测器
    ///
    /// 关闭透明解压，保证响应体字节可直接用于哈希与关键字比较。
    pub fn new(config: &GlobalConfig) -> CmsResult<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout())
            .no_gzip();

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// 使用外部构建好的客户端
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn parse_method(method: &str) -> CmsResult<Method> {
        Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
            .map_err(|e| WhatCmsError::InvalidInput(format!("无效请求方法：{}，错误：{}", method, e)))
    }
}

#[async_trait]
impl ProbeTransport for HttpProbe {
    async fn fetch(&self, request: &ProbeRequest<'_>) -> CmsResult<RawResponse> {
        let start = Instant::now();
        let url = request.url();
        let method = Self::parse_method(request.method)?;

        let mut builder = self.client.request(method.clone(), &url);
        if let Some(headers) = request.headers {
            builder = builder.headers(HeaderConverter::to_header_map(headers)?);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.to_string());
        }

        let unreachable = |e: reqwest::Error| WhatCmsError::Unreachable {
            url: url.clone(),
            reason: e.to_string(),
        };

        let response = builder.send().await.map_err(unreachable)?;
        let status_code = response.status().as_u16();
        let headers = HeaderConverter::to_hashmap(response.headers());
        let body = response.bytes().await.map_err(unreachable)?.to_vec();

        debug!(
            "{} {} -> {}，响应体{}字节，耗时{:?}",
            method,
            url,
            status_code,
            body.len(),
            start.elapsed()
        );

        Ok(RawResponse {
            status_code,
            headers,
            body,
        })
    }
}
