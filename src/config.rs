//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;
use std::time::Duration;

/// 默认识别目标
pub const DEFAULT_TARGET: &str = "https://www.lnsec.cn/";

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 指纹规则文件路径
    pub rule_path: PathBuf,
    // 单次请求超时（单位：秒）
    pub http_timeout: u64,
    // 每个目标主机的最大空闲连接数
    pub max_idle_per_host: usize,
    // 空闲连接超时（单位：秒）
    pub idle_timeout: u64,
    // 自定义 User-Agent，None 时使用 reqwest 默认值
    pub user_agent: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            rule_path: PathBuf::from("./res/finger.json"),
            http_timeout: 5,
            max_idle_per_host: 100,
            idle_timeout: 90,
            user_agent: None,
        }
    }
}

impl GlobalConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout)
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn rule_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rule_path = path.into();
        self
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn max_idle_per_host(mut self, max_idle: usize) -> Self {
        self.config.max_idle_per_host = max_idle;
        self
    }

    pub fn idle_timeout(mut self, timeout: u64) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}
