//! Command construction and execution for the external toolchain.
//!
//! Builders are pure: they turn a test identity and a toolchain into a
//! [`ToolInvocation`]. Execution goes through [`CommandRunner`] so the
//! orchestrator can be driven without a real toolchain.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{HarnessError, Result};
use crate::registry::{Configuration, TestId};
use crate::toolchain::{Frontend, Toolchain};

pub const MARCH: &str = "-march=rv64gc";
pub const MRELAX: &str = "-mrelax";
pub const CLANG_TARGET: &str = "--target=riscv64-unknown-linux-gnu";

/// A fully-formed external command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Pipeline step, used in diagnostics ("assembling", "linking", ...).
    pub step: &'static str,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// `-defsym SYM=1` pairs for GNU `as`.
pub fn gas_defsym_flags(config: Configuration) -> Vec<String> {
    config
        .define_assignments()
        .into_iter()
        .flat_map(|def| ["-defsym".to_string(), def])
        .collect()
}

/// `-Wa,-defsym,SYM=1`, one flag per symbol, for a compiler driver.
pub fn clang_defsym_flags(config: Configuration) -> Vec<String> {
    config
        .define_assignments()
        .into_iter()
        .map(|def| format!("-Wa,-defsym,{}", def))
        .collect()
}

pub fn assemble(tc: &Toolchain, id: &TestId) -> ToolInvocation {
    let source = id.source.path().to_string();
    let object = id.object_file();
    match &tc.frontend {
        Frontend::Gas => {
            let mut args = vec![
                source,
                "-o".to_string(),
                object,
                MARCH.to_string(),
                MRELAX.to_string(),
            ];
            args.extend(gas_defsym_flags(id.config));
            ToolInvocation {
                step: "assembling",
                program: tc.assembler.clone(),
                args,
            }
        }
        Frontend::Clang(clang) => {
            let mut args = vec![
                CLANG_TARGET.to_string(),
                MARCH.to_string(),
                MRELAX.to_string(),
                "-c".to_string(),
                source,
                "-o".to_string(),
                object,
            ];
            args.extend(clang_defsym_flags(id.config));
            ToolInvocation {
                step: "assembling",
                program: clang.clone(),
                args,
            }
        }
    }
}

pub fn link(tc: &Toolchain, id: &TestId) -> ToolInvocation {
    ToolInvocation {
        step: "linking",
        program: tc.linker.clone(),
        args: vec![
            format!("-T{}", tc.linker_script),
            id.object_file(),
            "-o".to_string(),
            id.elf_file(),
        ],
    }
}

pub fn disassemble(tc: &Toolchain, id: &TestId) -> ToolInvocation {
    ToolInvocation {
        step: "disassembling",
        program: tc.objdump.clone(),
        args: vec!["-d".to_string(), id.elf_file()],
    }
}

/// Dump-to-expectation conversion used by the binutils generator.
pub fn convert_dump(tc: &Toolchain, dump: &Path) -> ToolInvocation {
    ToolInvocation {
        step: "converting",
        program: tc.converter.clone(),
        args: vec![dump.display().to_string()],
    }
}

/// Executes invocations and returns captured standard output.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    fn run(&self, invocation: &ToolInvocation, cwd: &Path) -> Result<String>;
}

/// Runs commands as blocking child processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &ToolInvocation, cwd: &Path) -> Result<String> {
        log::info!("Running: {}", invocation);
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .output()
            .map_err(|source| HarnessError::ToolNotFound {
                tool: invocation.step,
                path: invocation.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(HarnessError::ToolFailed {
                tool: invocation.step,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
