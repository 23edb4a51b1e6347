//! 集成测试公共工具：内存探测器与本地模拟站点

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use rswhatcms::{CmsResult, ProbeRequest, ProbeTransport, RawResponse, WhatCmsError};

/// 模拟页面
#[derive(Debug, Clone)]
pub struct MockPage {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl MockPage {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status_code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// 收到的一次请求
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// 小写Header名称 -> 值
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// 请求记录
pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// 按顺序列出 (方法, 路径)
pub fn method_paths(log: &RequestLog) -> Vec<(String, String)> {
    log.lock()
        .unwrap()
        .iter()
        .map(|r| (r.method.clone(), r.path.clone()))
        .collect()
}

/// 按路径返回固定页面的内存探测器，未登记的路径视为连接失败
#[derive(Debug, Default)]
pub struct MockTransport {
    pages: HashMap<String, MockPage>,
    pub log: RequestLog,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, path: &str, page: MockPage) -> Self {
        self.pages.insert(path.to_string(), page);
        self
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        method_paths(&self.log)
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|(_, path)| path).collect()
    }
}

#[async_trait]
impl ProbeTransport for MockTransport {
    async fn fetch(&self, request: &ProbeRequest<'_>) -> CmsResult<RawResponse> {
        let headers: HashMap<String, String> = request
            .headers
            .map(|h| h.iter().map(|(k, v)| (k.to_lowercase(), v.clone())).collect())
            .unwrap_or_default();
        self.log.lock().unwrap().push(RecordedRequest {
            method: request.method.to_string(),
            path: request.path.to_string(),
            headers,
            body: request.body.to_string(),
        });

        let page = self.pages.get(request.path).ok_or_else(|| WhatCmsError::Unreachable {
            url: request.url(),
            reason: "connection refused".to_string(),
        })?;

        let mut headers: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in &page.headers {
            headers.entry(name.to_lowercase()).or_default().push(value.clone());
        }

        Ok(RawResponse {
            status_code: page.status_code,
            headers,
            body: page.body.clone(),
        })
    }
}

/// 启动本地模拟站点，返回监听地址与请求记录
pub async fn start_mock_site(pages: HashMap<&'static str, MockPage>) -> (SocketAddr, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let pages = Arc::new(pages);

    let server_log = Arc::clone(&log);
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let pages = Arc::clone(&pages);
            let log = Arc::clone(&server_log);
            tokio::spawn(async move {
                let Some(request) = read_request(&mut socket).await else {
                    return;
                };
                let path = request.path.clone();
                log.lock().unwrap().push(request);

                let page = pages
                    .get(path.as_str())
                    .cloned()
                    .unwrap_or_else(|| MockPage::with_status(404, "not found"));

                let mut head = format!(
                    "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                    page.status_code,
                    reason_phrase(page.status_code),
                    page.body.len()
                );
                for (name, value) in &page.headers {
                    head.push_str(&format!("{}: {}\r\n", name, value));
                }
                head.push_str("\r\n");

                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&page.body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, log)
}

/// 获取一个当前无人监听的本地地址
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.lines();
    let mut parts = lines.next()?.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_lowercase(), value.trim().to_string()))
        .collect();
    let content_length = headers
        .get("content-length")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0);

    // 读完请求体，避免未读数据导致连接被重置
    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = buf.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).into_owned();
    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn reason_phrase(status_code: u16) -> &'static str {
    match status_code {
        200 => "OK",
        301 => "Moved Permanently",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
