//! 规则数据模型定义
//! 仅存储规则数据，无任何业务逻辑，支持序列化/反序列化

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Deserializer, Serialize};

/// 默认请求路径
pub const DEFAULT_PATH: &str = "/";
/// 默认请求方法
pub const DEFAULT_METHOD: &str = "GET";

/// CMS 识别结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsMatch {
    pub name: String,
    /// 命中规则在规则列表中的下标
    pub rule_index: usize,
    /// 命中规则实际使用的请求路径
    pub path: String,
    /// 命中时的响应状态码
    pub status_code: u16,
}

// ======== 为 CmsMatch 实现 Display trait（用于 CLI 输出） ========
impl fmt::Display for CmsMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// 指纹规则定义（从 finger.json 解析）
///
/// 除 `name` 外所有字段均可缺省或为 `null`，缺省即“不关心”。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FingerRule {
    pub name: String,
    #[serde(default = "default_path", deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(rename = "request_method", default = "default_method", deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_headers: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_data: String,

    // 匹配条件
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_code: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyword: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favicon_hash: Vec<String>,
}

impl FingerRule {
    /// 仅指定名称的空规则（所有条件均为“不关心”）
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: default_path(),
            method: default_method(),
            request_headers: HashMap::new(),
            request_data: String::new(),
            status_code: 0,
            headers: HashMap::new(),
            keyword: Vec::new(),
            favicon_hash: Vec::new(),
        }
    }

    /// 请求路径，空值视为根路径
    pub fn path(&self) -> &str {
        if self.path.is_empty() { DEFAULT_PATH } else { &self.path }
    }

    /// 请求方法，空值视为 GET
    pub fn method(&self) -> &str {
        if self.method.trim().is_empty() { DEFAULT_METHOD } else { self.method.trim() }
    }

    /// 是否为默认请求形态（GET 根路径、无自定义请求头和请求体）
    ///
    /// 默认形态的规则直接复用基线响应，其余规则需要单独发起一次探测。
    pub fn is_default_request(&self) -> bool {
        self.path() == DEFAULT_PATH
            && self.method().eq_ignore_ascii_case(DEFAULT_METHOD)
            && self.request_headers.is_empty()
            && self.request_data.is_empty()
    }
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

// null 与字段缺省同等处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
