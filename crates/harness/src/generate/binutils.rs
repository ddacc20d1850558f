//! binutils `run_dump_test` descriptors (`.d` files).
//!
//! The header reproduces the harness pipeline as `#source:`/`#as:`/`#ld:`
//! directives. The expected disassembly body comes from an external
//! dump-to-expectation converter; when it fails a placeholder comment is
//! written so the descriptor can be completed by hand.

use std::path::{Path, PathBuf};

use super::{emit, generation_targets, prepare_output_dir};
use crate::command::{self, CommandRunner, MARCH, MRELAX};
use crate::error::Result;
use crate::harness::Harness;
use crate::registry::{Configuration, TestId};

/// Assembler flags as they appear on the `#as:` line.
pub fn as_flags(config: Configuration) -> String {
    let mut flags = vec![MARCH.to_string(), MRELAX.to_string()];
    for def in config.define_assignments() {
        flags.push(format!("--defsym {}", def));
    }
    flags.join(" ")
}

pub fn descriptor_name(id: &TestId) -> String {
    format!("{}-{}.d", id.source.stem(), id.config.name())
}

pub fn placeholder(dump_file: &str) -> String {
    format!(
        "# converter unavailable: regenerate expectations from {}\n",
        dump_file
    )
}

pub fn render_descriptor(id: &TestId, linker_script: &str, expectations: &str) -> String {
    let mut out = format!(
        "#source: {}\n#as: {}\n#ld: -T{}\n#objdump: -d\n\n",
        id.source.path(),
        as_flags(id.config),
        linker_script
    );
    out.push_str(expectations);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

impl<R: CommandRunner> Harness<R> {
    /// Writes one `.d` descriptor per non-smoke test into `out_dir`.
    pub fn generate_binutils_tests(&self, tests: &[TestId], out_dir: &Path) -> Result<Vec<PathBuf>> {
        prepare_output_dir(out_dir)?;

        let mut written = Vec::new();
        for id in generation_targets(tests) {
            let body = match self.refresh_dump(id) {
                Some(_) => self.expectations(&id),
                None => placeholder(&id.dump_file()),
            };
            let text = render_descriptor(&id, &self.toolchain().linker_script, &body);
            emit(out_dir.join(descriptor_name(&id)), &text, &mut written);
        }
        Ok(written)
    }

    fn expectations(&self, id: &TestId) -> String {
        let dump = id.dump_file();
        let invocation = command::convert_dump(self.toolchain(), Path::new(&dump));
        match self.run_tool(&invocation) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("converter failed for {}: {}", dump, err);
                placeholder(&dump)
            }
        }
    }
}
