//! 信号提取器
//! 将原始响应转换为规则比较所需的状态码、Header、响应体文本和 favicon 哈希

use std::collections::HashMap;

use crate::probe::RawResponse;
use crate::utils::HeaderConverter;

/// 单次响应的可比较信号
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
    pub status_code: u16,
    /// 小写Header名称 -> 第一个值
    pub headers: HashMap<String, String>,
    pub body: String,
    /// favicon 的 MD5，获取失败时为空串
    pub favicon_hash: String,
}

impl Signals {
    /// 按名称读取Header（名称不区分大小写），不存在时返回空串
    pub fn header(&self, name: &str) -> &str {
        HeaderConverter::lookup(&self.headers, name)
    }
}

/// 信号提取器（无状态）
pub struct SignalExtractor;

impl SignalExtractor {
    /// 提取信号；响应体按 UTF-8 解码，非法字节以替换字符代替
    pub fn extract(raw: RawResponse, favicon_hash: &str) -> Signals {
        let body = match String::from_utf8(raw.body) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };

        Signals {
            status_code: raw.status_code,
            headers: HeaderConverter::to_single_value(&raw.headers),
            body,
            favicon_hash: favicon_hash.to_string(),
        }
    }
}
