//! 工具模块：提供通用工具函数
pub mod header_converter;
pub mod target;

pub use self::header_converter::HeaderConverter;
pub use self::target::{join_path, normalize_target};
