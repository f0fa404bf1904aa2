//! CLI 配置
//!
//! 包含 CLI 特有的配置：日志配置和项目文件（tapevm.json）

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tapevm_config::{CompilerConfig, MachineConfig, Phase};
use tracing::Level;

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub validator: Option<Level>,
    pub compiler: Option<Level>,
    pub vm: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::WARN,
            validator: None,
            compiler: None,
            vm: None,
        }
    }
}

impl LogConfig {
    /// Get log level for a specific phase
    pub fn level_for(&self, phase: Phase) -> Level {
        match phase {
            Phase::Validator => self.validator.unwrap_or(self.global),
            Phase::Compiler => self.compiler.unwrap_or(self.global),
            Phase::Vm => self.vm.unwrap_or(self.global),
            Phase::Cli => self.global,
        }
    }
}

/// Parse log level string
pub fn parse_log_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "silent" => Some(Level::ERROR), // silent = only errors
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// tapevm.json 结构
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    /// 入口文件路径（相对于项目文件）
    pub entry: Option<String>,
    /// 编译器配置
    pub compiler: CompilerConfig,
    /// 虚拟机配置
    pub machine: MachineConfig,
    /// 日志级别: "silent", "error", "warn", "info", "debug", "trace"
    pub log_level: Option<String>,
    /// 分阶段日志级别
    pub log_phases: PhaseLevels,
}

/// 分阶段日志级别（字符串形式）
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PhaseLevels {
    pub validator: Option<String>,
    pub compiler: Option<String>,
    pub vm: Option<String>,
}

impl ProjectFile {
    /// Read and parse the project file
    pub fn read(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Err(format!("project file '{}' not found", path.display()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse '{}': {}", path.display(), e))
    }

    /// Resolve entry file path relative to the project file directory
    pub fn entry_path(&self, project_path: &Path) -> Option<PathBuf> {
        let entry = self.entry.as_deref().filter(|e| !e.is_empty())?;
        let base_dir = project_path.parent().unwrap_or(Path::new("."));
        Some(base_dir.join(entry))
    }

    /// Build the log configuration described by this file
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig::default();
        if let Some(level) = self.log_level.as_deref().and_then(parse_log_level) {
            config.global = level;
        }
        config.validator = self.log_phases.validator.as_deref().and_then(parse_log_level);
        config.compiler = self.log_phases.compiler.as_deref().and_then(parse_log_level);
        config.vm = self.log_phases.vm.as_deref().and_then(parse_log_level);
        config
    }
}
