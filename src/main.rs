//! rswhatcms 命令行入口

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use rswhatcms::{CmsDetector, ConfigManager, HttpProbe, RuleLoader, WhatCmsError, DEFAULT_TARGET};

const BANNER: &str = r"__        ___           _    ____
\ \      / / |__   __ _| |_ / ___|_ __ ___  ___
 \ \ /\ / /| '_ \ / _` | __| |   | '_ ` _ \/ __|
  \ V  V / | | | | (_| | |_| |___| | | | | \__ \
   \_/\_/  |_| |_|\__,_|\__|\____|_| |_| |_|___/
_________________________________________________";

/// 基于指纹规则的 CMS 识别工具
#[derive(Debug, Parser)]
#[command(name = "rswhatcms", version, about)]
struct Cli {
    /// 识别目标（可指定多个，按顺序逐个识别）
    #[arg(default_value = DEFAULT_TARGET)]
    targets: Vec<String>,

    /// 指纹规则文件
    #[arg(short, long, default_value = "./res/finger.json")]
    rules: PathBuf,

    /// 单次请求超时（秒）
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,

    /// 自定义 User-Agent
    #[arg(long)]
    user_agent: Option<String>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut builder = ConfigManager::custom()
        .rule_path(cli.rules)
        .http_timeout(cli.timeout);
    if let Some(user_agent) = cli.user_agent {
        builder = builder.user_agent(user_agent);
    }
    let config = builder.build();

    // 规则加载失败直接退出
    let rules = RuleLoader::load(&config)
        .await
        .with_context(|| format!("无法加载规则文件 {}", config.rule_path.display()))?;
    let transport = Arc::new(HttpProbe::new(&config).context("HTTP客户端初始化失败")?);

    println!("{}", BANNER);

    let mut all_reachable = true;
    for target in &cli.targets {
        let detector = CmsDetector::from_shared(Arc::clone(&transport), Arc::clone(&rules));
        match detector.identify(target).await {
            Ok(Some(matched)) => println!("[+] {} => {}", target, matched),
            Ok(None) => println!("[-] {} => 无法识别目标站点CMS", target),
            Err(e @ WhatCmsError::InvalidInput(_)) | Err(e @ WhatCmsError::UrlError(_)) => {
                error!("{}", e);
                all_reachable = false;
            }
            Err(e) => {
                error!("{}", e);
                println!("[!] {} => 无法连接到目标站点", target);
                all_reachable = false;
            }
        }
    }

    Ok(if all_reachable { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
