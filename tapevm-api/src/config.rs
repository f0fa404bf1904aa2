//! API 层配置
//!
//! 包含执行配置 RunConfig 和全局单例（供 CLI 使用）

use once_cell::sync::OnceCell;
use tapevm_config::{CompilerConfig, MachineConfig};

/// Execution configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Whether to dump the program listing after compilation
    pub dump_program: bool,
    /// Compiler configuration
    pub compiler: CompilerConfig,
    /// Machine configuration and execution limits
    pub machine: MachineConfig,
}

impl RunConfig {
    pub fn with_compiler(mut self, compiler: CompilerConfig) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn with_machine(mut self, machine: MachineConfig) -> Self {
        self.machine = machine;
        self
    }
}

// Global config singleton for CLI convenience
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration
///
/// Returns the rejected config if one was already installed.
pub fn init(config: RunConfig) -> Result<(), RunConfig> {
    GLOBAL_CONFIG.set(config)
}

/// Get global config reference, installing the default on first use
pub fn config() -> &'static RunConfig {
    GLOBAL_CONFIG.get_or_init(RunConfig::default)
}

/// Check if config is initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapevm_config::BoundsPolicy;

    #[test]
    fn test_default_run_config() {
        let cfg = RunConfig::default();
        assert!(!cfg.dump_program);
        assert!(cfg.compiler.custom_instructions);
        assert_eq!(cfg.machine.memory_size, 30_000);
        assert_eq!(cfg.machine.bounds, BoundsPolicy::Halt);
    }

    #[test]
    fn test_builder() {
        let cfg = RunConfig::default().with_machine(MachineConfig {
            memory_size: 16,
            ..MachineConfig::default()
        });
        assert_eq!(cfg.machine.memory_size, 16);
    }

    #[test]
    fn test_global_config_get_and_init() {
        // 全局状态：无论先后顺序，config() 之后一定已初始化，再次 init 必然被拒绝
        let current = config();
        assert!(is_initialized());
        assert_eq!(init(RunConfig::default()), Err(RunConfig::default()));
        assert_eq!(current, config());
    }
}
