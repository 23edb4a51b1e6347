//! 规则判定器
//! 按 状态码 -> headers -> keyword -> favicon_hash 的顺序逐项判定，任一项失败立即返回

use std::collections::HashMap;
use std::fmt;

use crate::rule::FingerRule;
use crate::signal::Signals;
use crate::utils::HeaderConverter;

/// 单条规则的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched,
    StatusMismatch,
    HeaderMismatch,
    KeywordMissing,
    FaviconMismatch,
}

impl MatchOutcome {
    pub fn is_match(self) -> bool {
        self == MatchOutcome::Matched
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MatchOutcome::Matched => "命中",
            MatchOutcome::StatusMismatch => "状态码不匹配",
            MatchOutcome::HeaderMismatch => "Header不匹配",
            MatchOutcome::KeywordMissing => "缺少关键字",
            MatchOutcome::FaviconMismatch => "favicon哈希不匹配",
        };
        f.write_str(text)
    }
}

/// 规则判定器
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// 规则是否命中
    pub fn matches(rule: &FingerRule, signals: &Signals) -> bool {
        Self::evaluate(rule, signals).is_match()
    }

    /// 判定规则，并给出首个失败的条件
    ///
    /// 为空（或状态码为 0）的条件视为“不关心”，直接跳过。
    pub fn evaluate(rule: &FingerRule, signals: &Signals) -> MatchOutcome {
        if !Self::status_match(rule.status_code, signals.status_code) {
            return MatchOutcome::StatusMismatch;
        }
        if !rule.headers.is_empty() && !Self::headers_match(&signals.headers, &rule.headers) {
            return MatchOutcome::HeaderMismatch;
        }
        if !rule.keyword.is_empty() && !Self::keywords_match(&signals.body, &rule.keyword) {
            return MatchOutcome::KeywordMissing;
        }
        if !rule.favicon_hash.is_empty() && !Self::favicon_hash_match(&signals.favicon_hash, &rule.favicon_hash) {
            return MatchOutcome::FaviconMismatch;
        }
        MatchOutcome::Matched
    }

    /// 期望状态码为 0 时不做要求
    pub fn status_match(expected: u16, actual: u16) -> bool {
        expected == 0 || expected == actual
    }

    /// 所有声明的Header都必须存在、非空且与期望值完全一致（值区分大小写）
    pub fn headers_match(headers: &HashMap<String, String>, expected: &HashMap<String, String>) -> bool {
        expected.iter().all(|(name, value)| {
            let actual = HeaderConverter::lookup(headers, name);
            !actual.is_empty() && actual == value
        })
    }

    /// 所有关键字都必须作为子串出现在响应体中（区分大小写）
    pub fn keywords_match(body: &str, keywords: &[String]) -> bool {
        keywords.iter().all(|keyword| body.contains(keyword.as_str()))
    }

    /// 计算出的哈希非空，且等于列表中任意一项
    pub fn favicon_hash_match(hash: &str, expected: &[String]) -> bool {
        !hash.is_empty() && expected.iter().any(|h| h == hash)
    }
}
