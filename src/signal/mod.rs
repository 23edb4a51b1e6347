//! 信号提取模块：从探测响应中得到可比较的信号
pub mod extractor;
pub mod favicon;

pub use self::extractor::{SignalExtractor, Signals};
pub use self::favicon::FaviconHasher;
