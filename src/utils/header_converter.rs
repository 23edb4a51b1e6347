//! Header格式转换工具
//! reqwest HeaderMap 与规则比较用的 HashMap 之间的转换

use std::collections::HashMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

use crate::error::{CmsResult, WhatCmsError};

// 单个响应的 Header 数量上限
const MAX_HEADER_COUNT: usize = 1000;

/// Header转换工具
pub struct HeaderConverter;

impl HeaderConverter {
    /// 将HeaderMap转换为HashMap<String, Vec<String>>，名称统一小写，保留同名多值的顺序
    pub fn to_hashmap(header_map: &HeaderMap) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();

        for (iter_count, (key, value)) in header_map.iter().enumerate() {
            if iter_count >= MAX_HEADER_COUNT {
                warn!("Header数量超过{}条，忽略剩余部分", MAX_HEADER_COUNT);
                break;
            }

            // 值按原始字节解码，非ASCII内容（如中文）保持可比较
            let value_str = String::from_utf8_lossy(value.as_bytes()).into_owned();
            map.entry(key.as_str().to_lowercase())
                .or_default()
                .push(value_str);
        }

        map
    }

    /// 将多值Header转换为单值，仅保留每个名称的第一个值
    pub fn to_single_value(hashmap: &HashMap<String, Vec<String>>) -> HashMap<String, String> {
        hashmap
            .iter()
            .filter_map(|(key, values)| values.first().map(|v| (key.to_lowercase(), v.clone())))
            .collect()
    }

    /// 按名称查找Header（名称不区分大小写），不存在时返回空串
    pub fn lookup<'a>(headers: &'a HashMap<String, String>, name: &str) -> &'a str {
        headers
            .get(&name.to_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// 将规则中的请求头转换为HeaderMap
    pub fn to_header_map(headers: &HashMap<String, String>) -> CmsResult<HeaderMap> {
        let mut header_map = HeaderMap::new();
        for (key, value) in headers {
            let header_name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| WhatCmsError::InvalidInput(format!("无效Header名称：{}，错误：{}", key, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| WhatCmsError::InvalidInput(format!("无效Header值：{}，错误：{}", value, e)))?;
            header_map.append(header_name, header_value);
        }
        Ok(header_map)
    }
}
