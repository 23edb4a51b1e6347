//! 检测器核心：基线探测一次，按规则顺序逐条判定，首条命中即返回
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::GlobalConfig;
use crate::error::{CmsResult, WhatCmsError};
use crate::matcher::{MatchOutcome, RuleEvaluator};
use crate::probe::{HttpProbe, ProbeRequest, ProbeTransport};
use crate::rule::{CmsMatch, FingerRule, RuleLoader};
use crate::signal::{SignalExtractor, Signals};
use crate::utils::normalize_target;

/// CMS 检测器
///
/// 规则列表与探测器在构造时注入，识别过程只读，可在多个目标之间复用。
/// 同一次识别内严格串行：上一条规则判定结束后才开始下一条。
#[derive(Debug)]
pub struct CmsDetector<T: ProbeTransport = HttpProbe> {
    transport: Arc<T>,
    rules: Arc<[FingerRule]>,
}

impl<T: ProbeTransport> Clone for CmsDetector<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            rules: Arc::clone(&self.rules),
        }
    }
}

impl CmsDetector<HttpProbe> {
    /// 创建检测器：加载规则文件并初始化 HTTP 客户端
    pub async fn new(config: GlobalConfig) -> CmsResult<Self> {
        let rules = RuleLoader::load(&config).await?;
        let transport = HttpProbe::new(&config)?;
        Ok(Self::with_transport(transport, rules))
    }
}

impl<T: ProbeTransport> CmsDetector<T> {
    pub fn with_transport(transport: T, rules: Arc<[FingerRule]>) -> Self {
        Self::from_shared(Arc::new(transport), rules)
    }

    /// 与其他检测器共享同一个探测器（连接池）
    pub fn from_shared(transport: Arc<T>, rules: Arc<[FingerRule]>) -> Self {
        Self { transport, rules }
    }

    pub fn rules(&self) -> &[FingerRule] {
        &self.rules
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// 识别目标站点
    ///
    /// - 基线请求失败：返回 [`WhatCmsError::Unreachable`]，不判定任何规则
    /// - favicon 获取失败：哈希置空，仅影响声明了 favicon_hash 的规则
    /// - 规则专属请求失败：跳过该规则，继续判定后续规则
    /// - 全部规则未命中：返回 `Ok(None)`
    pub async fn identify(&self, url: &str) -> CmsResult<Option<CmsMatch>> {
        let start = Instant::now();
        let target = normalize_target(url)?;

        // 1. 基线请求（整个识别过程只请求一次）
        let baseline_raw = self.transport.fetch(&ProbeRequest::baseline(&target)).await?;

        // 2. favicon 哈希（同样只计算一次）
        let favicon_hash = match self.transport.fetch_favicon_hash(&target).await {
            Ok(hash) => hash,
            Err(e) => {
                warn!("{}，依赖favicon_hash的规则将无法命中", e);
                String::new()
            }
        };

        let baseline = SignalExtractor::extract(baseline_raw, &favicon_hash);
        debug!(
            "基线请求完成：{} -> {}，favicon={}",
            target,
            baseline.status_code,
            if favicon_hash.is_empty() { "<无>" } else { favicon_hash.as_str() }
        );

        // 3. 按声明顺序判定规则
        for (index, rule) in self.rules.iter().enumerate() {
            let dedicated;
            let signals = if rule.is_default_request() {
                &baseline
            } else {
                match self.probe_rule(&target, rule, &favicon_hash).await {
                    Ok(signals) => {
                        dedicated = signals;
                        &dedicated
                    }
                    Err(e) => {
                        warn!("规则 [{}] {}，跳过", rule.name, e);
                        continue;
                    }
                }
            };

            match RuleEvaluator::evaluate(rule, signals) {
                MatchOutcome::Matched => {
                    info!(
                        "识别成功：{} => {}（规则#{}，路径{}，耗时{:?}）",
                        target,
                        rule.name,
                        index,
                        rule.path(),
                        start.elapsed()
                    );
                    return Ok(Some(CmsMatch {
                        name: rule.name.clone(),
                        rule_index: index,
                        path: rule.path().to_string(),
                        status_code: signals.status_code,
                    }));
                }
                outcome => {
                    debug!("规则 [{}] 未命中：{}", rule.name, outcome);
                }
            }
        }

        debug!("{} 全部{}条规则均未命中，耗时{:?}", target, self.rules.len(), start.elapsed());
        Ok(None)
    }

    /// 识别目标站点，仅返回名称；无法识别或出错时返回空串
    pub async fn identify_name(&self, url: &str) -> String {
        match self.identify(url).await {
            Ok(Some(matched)) => matched.name,
            Ok(None) => String::new(),
            Err(e) => {
                warn!("{}", e);
                String::new()
            }
        }
    }

    /// 按规则声明的请求形态单独发起一次请求，结果仅用于该规则
    async fn probe_rule(&self, target: &str, rule: &FingerRule, favicon_hash: &str) -> CmsResult<Signals> {
        let request = ProbeRequest::for_rule(target, rule);
        let raw = self
            .transport
            .fetch(&request)
            .await
            .map_err(|e| WhatCmsError::RuleProbeError {
                path: rule.path().to_string(),
                reason: e.to_string(),
            })?;
        Ok(SignalExtractor::extract(raw, favicon_hash))
    }
}
