//! CLI 日志系统初始化
//!
//! 基于 `tracing-subscriber` 实现分阶段日志控制。
//! 标准输出留给程序本身，日志一律写到 stderr（或文件）。

use std::io;
use std::path::Path;

use clap::ValueEnum;
use tapevm_config::Phase;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use crate::config::LogConfig;

/// 日志输出格式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    Pretty,
    /// 紧凑格式
    #[default]
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

/// 按阶段构建过滤器
fn targets(log_config: &LogConfig) -> Targets {
    [Phase::Validator, Phase::Compiler, Phase::Vm, Phase::Cli]
        .into_iter()
        .fold(
            Targets::new().with_default(log_config.global),
            |targets, phase| targets.with_target(phase.target(), log_config.level_for(phase)),
        )
}

/// 使用指定格式和日志配置初始化日志系统
pub fn init_with_file(log_config: &LogConfig, format: LogFormat, file: Option<&Path>) -> io::Result<()> {
    let targets = targets(log_config);

    // If file specified, output to both stderr and file
    if let Some(path) = file {
        let file_handle = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        let stderr_layer = create_format_layer(format, io::stderr).with_filter(targets.clone());
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file_handle))
            .with_filter(targets);

        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        let stderr_layer = create_format_layer(format, io::stderr).with_filter(targets);
        tracing_subscriber::registry().with(stderr_layer).init();
    }
    Ok(())
}

/// Create formatter layer based on format
fn create_format_layer<S, W, F>(format: LogFormat, make_writer: F) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    W: io::Write + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
    }
}
