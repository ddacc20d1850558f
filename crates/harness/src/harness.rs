//! Test orchestration.
//!
//! A [`Harness`] owns the resolved toolchain, a command runner and the
//! working directory. Each test runs the assemble → link → disassemble
//! pipeline, writes the disassembly next to the other artifacts and checks
//! the alignment markers in it. Tests run strictly one after another.

use std::fs;
use std::path::{Path, PathBuf};

use crate::alignment::{self, AlignmentReport};
use crate::command::{self, CommandRunner, SystemRunner, ToolInvocation};
use crate::error::{HarnessError, Result};
use crate::registry::{Configuration, Source, TestId};
use crate::summary::TestResults;
use crate::toolchain::Toolchain;

/// Extensions of the files a run leaves behind.
pub const ARTIFACT_EXTENSIONS: [&str; 3] = ["o", "elf", "dump"];

pub struct Harness<R = SystemRunner> {
    toolchain: Toolchain,
    runner: R,
    work_dir: PathBuf,
}

impl Harness<SystemRunner> {
    pub fn with_system_runner(toolchain: Toolchain, work_dir: impl Into<PathBuf>) -> Self {
        Self::new(toolchain, SystemRunner, work_dir)
    }
}

impl<R: CommandRunner> Harness<R> {
    pub fn new(toolchain: Toolchain, runner: R, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            toolchain,
            runner,
            work_dir: work_dir.into(),
        }
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub(crate) fn run_tool(&self, invocation: &ToolInvocation) -> Result<String> {
        self.runner.run(invocation, &self.work_dir)
    }

    /// The three commands for one test, in execution order.
    pub fn pipeline(&self, id: &TestId) -> [ToolInvocation; 3] {
        [
            command::assemble(&self.toolchain, id),
            command::link(&self.toolchain, id),
            command::disassemble(&self.toolchain, id),
        ]
    }

    /// Runs the pipeline and writes the dump file, returning its path.
    ///
    /// The first failing step aborts the rest.
    pub fn build_dump(&self, id: &TestId) -> Result<PathBuf> {
        let [asm, ld, objdump] = self.pipeline(id);
        self.run_tool(&asm)?;
        self.run_tool(&ld)?;
        let disassembly = self.run_tool(&objdump)?;

        let dump = self.work_dir.join(id.dump_file());
        fs::write(&dump, disassembly).map_err(|e| HarnessError::io(&dump, e))?;
        Ok(dump)
    }

    /// Runs one test and reports its verdict.
    pub fn run_test(&self, id: TestId) -> bool {
        let label = id.label();
        println!("\n=== Running test: {} ===", label);

        match self.build_dump(&id) {
            Ok(dump) => self.check_alignment(&dump, &label),
            Err(err) => {
                log::error!("{}", err);
                if let Some(stderr) = err.stderr() {
                    eprintln!("stderr: {}", stderr.trim_end());
                }
                false
            }
        }
    }

    /// Checks the markers in an existing dump file.
    pub fn check_alignment(&self, dump: &Path, label: &str) -> bool {
        match check_dump_file(dump) {
            Ok(report) => {
                alignment::print_report(label, &report);
                report.passed()
            }
            Err(err) => {
                println!("✗ Alignment check failed for {}", label);
                println!("  Error: {}", err);
                false
            }
        }
    }

    /// Runs every selected test in order.
    pub fn run_all(&self, tests: &[TestId]) -> TestResults {
        let mut results = TestResults::default();
        for id in tests {
            let passed = self.run_test(*id);
            results.record(id.label(), passed);
        }
        results
    }

    /// Lists the commands each test would run, marking every test as not run.
    pub fn render_dry_run(&self, tests: &[TestId]) -> String {
        let mut out = String::new();
        for id in tests {
            out.push_str(&format!("\n=== {} ===\n", id.label()));
            for invocation in self.pipeline(id) {
                out.push_str(&format!("  {}\n", invocation));
            }
            out.push_str(&format!("{:25} NOT RUN\n", id.label()));
        }
        out.push_str(&format!("\nDry run: {} test(s) not run\n", tests.len()));
        out
    }

    pub fn dry_run(&self, tests: &[TestId]) {
        print!("{}", self.render_dry_run(tests));
    }
}

pub fn check_dump_file(dump: &Path) -> Result<AlignmentReport> {
    let text = fs::read_to_string(dump).map_err(|source| HarnessError::DumpUnreadable {
        path: dump.to_path_buf(),
        source,
    })?;
    alignment::check_text(&text)
}

/// Resolves user-supplied names into tests, sources outer and configs inner.
///
/// `None` selects the whole registry. Unknown names are warned about and
/// skipped.
pub fn select_tests(sources: Option<&[String]>, configs: Option<&[String]>) -> Vec<TestId> {
    let sources: Vec<Source> = match sources {
        None => Source::ALL.to_vec(),
        Some(names) => names
            .iter()
            .filter_map(|name| {
                let found = Source::from_name(name);
                if found.is_none() {
                    log::warn!("Unknown source '{}', skipping", name);
                }
                found
            })
            .collect(),
    };
    let configs: Vec<Configuration> = match configs {
        None => Configuration::ALL.to_vec(),
        Some(names) => names
            .iter()
            .filter_map(|name| {
                let found = Configuration::from_name(name);
                if found.is_none() {
                    log::warn!("Unknown config '{}', skipping", name);
                }
                found
            })
            .collect(),
    };

    sources
        .iter()
        .flat_map(|&source| configs.iter().map(move |&config| TestId::new(source, config)))
        .collect()
}

/// Deletes generated objects, images and dumps directly under `dir`.
///
/// Removal is best effort; files that cannot be removed are logged and
/// skipped. Returns the files that were removed.
pub fn clean(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| HarnessError::io(dir, e))?;

    let mut targets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_artifact(path))
        .collect();
    targets.sort();

    let mut removed = Vec::with_capacity(targets.len());
    for path in targets {
        println!("Removing {}", path.display());
        match fs::remove_file(&path) {
            Ok(()) => removed.push(path),
            Err(e) => log::warn!("could not remove {}: {}", path.display(), e),
        }
    }
    Ok(removed)
}

fn is_artifact(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ARTIFACT_EXTENSIONS.contains(&ext))
}
