//! Tapevm CLI - Command line interface
//!
//! Runs a source file (or a line typed at the prompt) on the tape machine.
//! Settings come from an optional tapevm.json project file, overridden by flags.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

mod commands;
mod config;
mod logging;
mod platform;

use crate::commands::BuiltinCommands;
use crate::config::{parse_log_level, LogConfig, ProjectFile};
use crate::logging::LogFormat;
use crate::platform::{print_error_with_source, print_warning_with_source};
use tapevm_api::{
    compile_with_config, execute_with_config, init_config, BoundsPolicy, CompileOutput,
    ErrorReport, Halt, Instruction, Program, RunConfig,
};
use tracing::{debug, info};

/// Log target of this binary
pub(crate) const LOG_TARGET: &str = "tapevm::cli";

const CODE_PROMPT: &str = "Please enter the code here (hit Enter key at the end):";
const INPUT_PROMPT: &str = "Please enter input string to be used in code (hit Enter key at the end):";

#[derive(Parser)]
#[command(
    name = "tapevm",
    about = "Tape machine for brainfuck-style programs with {name}arg custom instructions",
    version
)]
struct Cli {
    /// Source file; prompts for a line of code when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Project file (tapevm.json)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Print the compiled program as JSON
    #[arg(long)]
    dump: bool,

    /// Compile only, do not execute
    #[arg(long)]
    compile_only: bool,

    /// Number of cells on the tape
    #[arg(long, value_name = "CELLS")]
    memory_size: Option<usize>,

    /// Treat leaving the tape as an error instead of a silent halt
    #[arg(long)]
    strict_bounds: bool,

    /// Abort after this many executed instructions
    #[arg(long, value_name = "STEPS")]
    max_steps: Option<u64>,

    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let project = match &cli.config {
        Some(path) => match ProjectFile::read(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => ProjectFile::default(),
    };

    let log_config = match build_log_config(&cli, &project) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = logging::init_with_file(&log_config, cli.log_format, cli.log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {}", e);
        process::exit(1);
    }

    let entry_path = cli
        .file
        .clone()
        .or_else(|| cli.config.as_deref().and_then(|path| project.entry_path(path)));

    let source = match &entry_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: Cannot read source file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => match prompt_for_code() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: Cannot read code from stdin: {}", e);
                process::exit(1);
            }
        },
    };

    let run_config = build_run_config(&cli, project);

    // Global singleton for convenience; installed once per process
    if init_config(run_config.clone()).is_err() {
        debug!(target: LOG_TARGET, "run config already initialised");
    }

    info!(
        target: LOG_TARGET,
        entry = %entry_path.as_deref().map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string()),
        memory_size = run_config.machine.memory_size,
        "starting"
    );

    let compiled = handle_compile(&source, &run_config, cli.dump);

    if cli.compile_only {
        println!(
            "✅ Compilation successful: {} instructions",
            compiled.program.len()
        );
    } else {
        handle_run(&source, &compiled.program, &run_config);
    }
}

/// Log levels from the project file, then `--log-level`
fn build_log_config(cli: &Cli, project: &ProjectFile) -> Result<LogConfig, String> {
    let mut log_config = project.log_config();
    if let Some(level) = &cli.log_level {
        log_config.global =
            parse_log_level(level).ok_or_else(|| format!("unknown log level '{}'", level))?;
    }
    Ok(log_config)
}

/// Build run configuration: project file first, command line flags on top
fn build_run_config(cli: &Cli, project: ProjectFile) -> RunConfig {
    let mut machine = project.machine;
    if let Some(size) = cli.memory_size {
        machine.memory_size = size;
    }
    if cli.strict_bounds {
        machine.bounds = BoundsPolicy::Error;
    }
    if cli.max_steps.is_some() {
        machine.max_steps = cli.max_steps;
    }

    RunConfig {
        dump_program: cli.dump,
        compiler: project.compiler,
        machine,
    }
}

/// Read a single line of code; if it reads input, announce the input prompt too
fn prompt_for_code() -> io::Result<String> {
    let stdout = io::stdout();
    read_code(io::stdin().lock(), stdout.lock())
}

/// Prompts stay on the line the user types on
fn read_code<R: BufRead, W: Write>(mut input: R, mut prompt: W) -> io::Result<String> {
    write!(prompt, "{}", CODE_PROMPT)?;
    prompt.flush()?;
    let mut code = String::new();
    input.read_line(&mut code)?;

    if code.contains(',') {
        write!(prompt, "{}", INPUT_PROMPT)?;
        prompt.flush()?;
    }
    Ok(code)
}

/// Compile, print diagnostics, optionally dump; exits on syntax errors
fn handle_compile(source: &str, config: &RunConfig, dump: bool) -> CompileOutput {
    match compile_with_config(source, config) {
        Ok(output) => {
            for diagnostic in &output.diagnostics {
                print_warning_with_source(&ErrorReport::from_diagnostic(diagnostic), source);
            }
            if dump {
                dump_json_output(&output.program, "main");
            }
            output
        }
        Err(e) => {
            print_error_with_source(&e, source);
            process::exit(1);
        }
    }
}

fn handle_run(source: &str, program: &Program, config: &RunConfig) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut commands = BuiltinCommands::new(io::stderr());

    let result = execute_with_config(program, stdin.lock(), stdout.lock(), Some(&mut commands), config);

    match result {
        Ok(output) => {
            if let Halt::OutOfBounds { instruction, target } = output.halt {
                debug!(target: LOG_TARGET, instruction, position = target, "halted at tape boundary");
            }
            info!(target: LOG_TARGET, steps = output.steps, "finished");
            println!("\nExecution finished");
            let _ = io::stdout().flush();
        }
        Err(e) => {
            let _ = io::stdout().flush();
            print_error_with_source(&e, source);
            process::exit(1);
        }
    }
}

/// JSON 格式输出编译结果
fn dump_json_output(program: &Program, name: &str) {
    let output = build_json_output(program, name);
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: cannot serialise program: {}", e),
    }
}

fn build_json_output(program: &Program, name: &str) -> serde_json::Value {
    use serde_json::json;

    let instructions: Vec<serde_json::Value> = program
        .iter()
        .enumerate()
        .map(|(index, instruction)| match instruction {
            Instruction::LoopOpen(target) | Instruction::LoopClose(target) => json!({
                "index": index,
                "opcode": instruction.kind().name(),
                "target": target
            }),
            Instruction::Custom { name, arg } => json!({
                "index": index,
                "opcode": instruction.kind().name(),
                "name": name,
                "arg": arg
            }),
            _ => json!({
                "index": index,
                "opcode": instruction.kind().name(),
                "repeat": instruction.repeat()
            }),
        })
        .collect();

    json!({
        "name": name,
        "instructions": instructions
    })
}
