use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use relax_align::command::{CommandRunner, ToolInvocation};
use relax_align::{Harness, HarnessError, Toolchain};
use tempfile::TempDir;

pub const ALIGNED: &str = "\
0000000000001000 <_start>:
    1000:\t00000013          \tnop

0000000000001008 <SHOULD_ALIGN_8_HERE>:
    1008:\t00000013          \tnop
";

pub const MISALIGNED: &str = "0000000000001006 <SHOULD_ALIGN_4_HERE>:\n";

/// Answers tool invocations from a script and records every call.
///
/// The disassembler returns the dump registered for its ELF argument, or
/// [`ALIGNED`] by default. Any step whose arguments mention a registered
/// failure substring fails as if the binary were missing.
#[derive(Default)]
pub struct ScriptedRunner {
    pub calls: RefCell<Vec<ToolInvocation>>,
    dumps: HashMap<String, String>,
    failures: Vec<(&'static str, String)>,
    converter: Option<String>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dump_for(mut self, elf: &str, text: &str) -> Self {
        self.dumps.insert(elf.to_string(), text.to_string());
        self
    }

    pub fn fail(mut self, step: &'static str, arg: &str) -> Self {
        self.failures.push((step, arg.to_string()));
        self
    }

    pub fn converter_output(mut self, text: &str) -> Self {
        self.converter = Some(text.to_string());
        self
    }

    pub fn steps(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(|c| c.step).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &ToolInvocation, _cwd: &Path) -> Result<String, HarnessError> {
        self.calls.borrow_mut().push(invocation.clone());

        let fails = self.failures.iter().any(|(step, arg)| {
            *step == invocation.step && invocation.args.iter().any(|a| a.contains(arg.as_str()))
        });
        if fails {
            return Err(HarnessError::ToolNotFound {
                tool: invocation.step,
                path: invocation.program.clone(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }

        match invocation.step {
            "disassembling" => {
                let elf = invocation.args.last().cloned().unwrap_or_default();
                Ok(self.dumps.get(&elf).cloned().unwrap_or_else(|| ALIGNED.to_string()))
            }
            "converting" => self.converter.clone().ok_or_else(|| HarnessError::ToolNotFound {
                tool: invocation.step,
                path: invocation.program.clone(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
            _ => Ok(String::new()),
        }
    }
}

/// A harness over `runner` working in a fresh temporary directory that
/// already holds every source and the linker script.
pub struct Fixture {
    pub dir: TempDir,
    pub harness: Harness<ScriptedRunner>,
}

impl Fixture {
    pub fn new(runner: ScriptedRunner) -> Self {
        Self::with_toolchain(runner, Toolchain::with_base("/tc"))
    }

    pub fn with_toolchain(runner: ScriptedRunner, toolchain: Toolchain) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        for source in relax_align::Source::ALL {
            fs::write(
                dir.path().join(source.path()),
                format!("  .text\n# {}\nSHOULD_ALIGN_8_HERE:\n  nop\n", source.name()),
            )
            .expect("write source");
        }
        fs::write(dir.path().join("x.ld"), "SECTIONS { . = 0x1000; .text : { *(.text) } }\n")
            .expect("write linker script");
        let harness = Harness::new(toolchain, runner, dir.path());
        Self { dir, harness }
    }

    pub fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    pub fn runner(&self) -> &ScriptedRunner {
        self.harness.runner()
    }
}
