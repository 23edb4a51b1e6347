//! 规则加载管理器
//! 负责从本地 finger.json 读取并校验指纹规则，保留文件中的顺序

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use super::model::{FingerRule, DEFAULT_PATH};
use crate::config::GlobalConfig;
use crate::error::{CmsResult, WhatCmsError};

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 按配置加载规则库
    pub async fn load(config: &GlobalConfig) -> CmsResult<Arc<[FingerRule]>> {
        Self::load_from_file(&config.rule_path).await
    }

    /// 从本地文件加载规则库
    pub async fn load_from_file(path: impl AsRef<Path>) -> CmsResult<Arc<[FingerRule]>> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await.map_err(|e| {
            WhatCmsError::RuleLoadError(format!("无法读取配置文件 {}：{}", path.display(), e))
        })?;

        let rules = Self::load_from_slice(&content)?;
        debug!("从 {} 加载规则库成功，规则总数：{}", path.display(), rules.len());
        Ok(rules)
    }

    /// 从 JSON 字符串加载规则库
    pub fn load_from_str(json: &str) -> CmsResult<Arc<[FingerRule]>> {
        Self::load_from_slice(json.as_bytes())
    }

    /// 从 JSON 字节加载规则库
    pub fn load_from_slice(bytes: &[u8]) -> CmsResult<Arc<[FingerRule]>> {
        let rules: Vec<FingerRule> = serde_json::from_slice(bytes)
            .map_err(|e| WhatCmsError::RuleParseError(format!("无法解析配置文件：{}", e)))?;

        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| Self::normalize(index, rule))
            .collect::<CmsResult<Vec<_>>>()?;

        if rules.is_empty() {
            warn!("规则库为空，所有目标都将无法识别");
        }
        Self::debug_count_rules(&rules);

        Ok(rules.into())
    }

    /// 校验并规范化单条规则
    fn normalize(index: usize, mut rule: FingerRule) -> CmsResult<FingerRule> {
        rule.name = rule.name.trim().to_string();
        if rule.name.is_empty() {
            return Err(WhatCmsError::RuleParseError(format!("第 {} 条规则缺少 name", index)));
        }

        let path = rule.path.trim();
        rule.path = if path.is_empty() {
            DEFAULT_PATH.to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Ok(rule)
    }

    // ===== 统计各类匹配条件数量 =====
    fn debug_count_rules(rules: &[FingerRule]) {
        let dedicated = rules.iter().filter(|r| !r.is_default_request()).count();
        let with_headers = rules.iter().filter(|r| !r.headers.is_empty()).count();
        let with_keyword = rules.iter().filter(|r| !r.keyword.is_empty()).count();
        let with_favicon = rules.iter().filter(|r| !r.favicon_hash.is_empty()).count();

        debug!("===== 规则库统计 =====");
        debug!("  规则总数：{}", rules.len());
        debug!("  需要单独请求的规则数：{}", dedicated);
        debug!("  含headers条件：{}，含keyword条件：{}，含favicon_hash条件：{}", with_headers, with_keyword, with_favicon);
    }
}
