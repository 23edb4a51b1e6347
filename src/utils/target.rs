//! 目标地址处理：校验目标URL并拼接规则路径

use url::Url;

use crate::error::{CmsResult, WhatCmsError};

/// 校验并规范化目标地址
///
/// 缺少协议时补全为 `http://`，仅接受 http/https。
/// 返回值保留调用方给出的原始形式（不做路径重写），便于与规则路径直接拼接。
pub fn normalize_target(raw: &str) -> CmsResult<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(WhatCmsError::InvalidInput("目标地址为空".to_string()));
    }

    let target = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };

    let parsed = Url::parse(&target)?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(WhatCmsError::InvalidInput(format!("不支持的协议：{}", other)));
        }
    }
    if parsed.host_str().is_none() {
        return Err(WhatCmsError::InvalidInput(format!("目标地址缺少主机名：{}", raw)));
    }

    Ok(target)
}

/// 将规则路径拼接到目标地址后，避免出现重复的 `/`
///
/// 根路径 `/` 表示目标地址本身，原样返回，不追加斜杠。
pub fn join_path(base: &str, path: &str) -> String {
    if path.is_empty() || path == "/" {
        return base.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
