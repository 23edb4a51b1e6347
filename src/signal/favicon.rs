//! favicon 哈希计算

use md5::{Digest, Md5};

/// favicon 哈希工具
pub struct FaviconHasher;

impl FaviconHasher {
    /// 对原始字节计算 MD5，输出小写十六进制
    pub fn hash(bytes: &[u8]) -> String {
        format!("{:x}", Md5::digest(bytes))
    }
}
