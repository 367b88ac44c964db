//! # 示例应用程序
//!
//! 演示惰性依赖注入容器：子容器委托、类型断言和自动装配。

mod services;
mod wiring;

use anyhow::Context;
use clap::{Parser, Subcommand};
use di_abstractions::{Instance, Resolver};
use di_common::ContainerSettings;
use std::path::PathBuf;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "惰性依赖注入容器示例")]
struct Args {
    /// 容器配置文件路径，默认读取 config/container.*
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 解析条目，支持点分子容器标识符
    Resolve {
        /// 条目标识符
        identifier: String,
    },
    /// 检查条目是否存在
    Has {
        /// 条目标识符
        identifier: String,
    },
    /// 自动装配类型，额外参数按位置作为字符串传入
    Autowire {
        /// 类型名称
        type_name: String,
        /// 显式参数
        args: Vec<String>,
    },
    /// 列出已注册条目
    List,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&args.log_level))
        .init();

    let settings = match &args.config {
        Some(path) => ContainerSettings::load_from(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => ContainerSettings::load().context("无法加载容器配置")?,
    };
    info!("容器配置: {:?}", settings);

    let container = wiring::build_container(settings);

    match args.command {
        Command::Resolve { identifier } => {
            let instance = container
                .get(&identifier)
                .with_context(|| format!("解析 {identifier} 失败"))?;
            println!("{}", wiring::describe(&instance));
        }
        Command::Has { identifier } => {
            println!("{}", container.has(&identifier));
        }
        Command::Autowire { type_name, args } => {
            let args = args.into_iter().map(Instance::new).collect();
            let instance = container
                .autowire(&type_name, args)
                .with_context(|| format!("自动装配 {type_name} 失败"))?;
            println!("{}", wiring::describe(&instance));
        }
        Command::List => {
            for identifier in container.ids() {
                println!("{identifier}");
            }
        }
    }

    Ok(())
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
