//! 匹配模块：判定单条指纹规则是否命中
pub mod evaluator;

pub use self::evaluator::{MatchOutcome, RuleEvaluator};
