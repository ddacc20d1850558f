//! lld lit tests.
//!
//! One script per source. The assembly and the linker script are embedded
//! verbatim as `split-file` sections; each configuration contributes a
//! stanza that assembles, links and checks the marker symbols with
//! `llvm-nm | FileCheck` against the addresses the GNU toolchain produced.

use std::fs;
use std::path::{Path, PathBuf};

use super::{emit, generation_targets, prepare_output_dir};
use crate::alignment::{self, AlignmentMarker};
use crate::command::CommandRunner;
use crate::error::{HarnessError, Result};
use crate::harness::Harness;
use crate::registry::{Configuration, Source, TestId};

pub fn check_prefix(config: Configuration) -> String {
    config.name().to_uppercase()
}

pub fn script_name(source: Source) -> String {
    format!("{}.s", source.stem())
}

/// Assemble, link and check lines for one configuration.
pub fn render_stanza(
    source: Source,
    config: Configuration,
    linker_script: &str,
    markers: &[AlignmentMarker],
) -> String {
    let name = config.name();
    let prefix = check_prefix(config);
    let defsyms: String = config
        .define_assignments()
        .iter()
        .map(|def| format!(" --defsym {}", def))
        .collect();

    let mut out = format!("## {}\n", name);
    out.push_str(&format!(
        "# RUN: llvm-mc -filetype=obj -triple=riscv64 -mattr=+c,+relax{} {} -o {}.o\n",
        defsyms,
        source.path(),
        name
    ));
    out.push_str(&format!(
        "# RUN: ld.lld -T {} {}.o -o {}.elf\n",
        linker_script, name, name
    ));

    let checks: Vec<(u64, u64)> = markers
        .iter()
        .filter_map(|m| Some((m.address?, m.alignment?)))
        .collect();
    if checks.is_empty() {
        out.push_str(&format!("## no SHOULD_ALIGN markers captured for {}\n", name));
        return out;
    }

    out.push_str(&format!(
        "# RUN: llvm-nm {}.elf | FileCheck %s --check-prefix={}\n",
        name, prefix
    ));
    for (address, boundary) in checks {
        out.push_str(&format!(
            "# {}: {:016x} {{{{.}}}} SHOULD_ALIGN_{}_HERE\n",
            prefix, address, boundary
        ));
    }
    out
}

/// Full lit script: header, stanzas, then the embedded input files.
pub fn render_script(
    source: Source,
    stanzas: &[String],
    source_text: &str,
    linker_script: &str,
    linker_script_text: &str,
) -> String {
    let mut out = format!(
        "## Generated from {}: SHOULD_ALIGN_<N>_HERE labels must stay aligned\n\
         ## after linker relaxation.\n\
         # REQUIRES: riscv\n\
         # RUN: rm -rf %t && split-file %s %t && cd %t\n",
        source.path()
    );
    for stanza in stanzas {
        out.push('\n');
        out.push_str(stanza);
    }
    out.push_str(&format!("\n#--- {}\n", source.path()));
    push_verbatim(&mut out, source_text);
    out.push_str(&format!("#--- {}\n", linker_script));
    push_verbatim(&mut out, linker_script_text);
    out
}

fn push_verbatim(out: &mut String, text: &str) {
    out.push_str(text);
    if !text.is_empty() && !text.ends_with('\n') {
        out.push('\n');
    }
}

impl<R: CommandRunner> Harness<R> {
    /// Writes one lit script per non-smoke source into `out_dir`.
    pub fn generate_lld_tests(&self, tests: &[TestId], out_dir: &Path) -> Result<Vec<PathBuf>> {
        prepare_output_dir(out_dir)?;

        let targets = generation_targets(tests);
        let mut sources: Vec<Source> = Vec::new();
        for id in &targets {
            if !sources.contains(&id.source) {
                sources.push(id.source);
            }
        }

        let script = self.toolchain().linker_script.clone();
        let mut written = Vec::new();
        for source in sources {
            let inputs = self
                .read_input(source.path())
                .and_then(|src| Ok((src, self.read_input(&script)?)));
            let (source_text, script_text) = match inputs {
                Ok(texts) => texts,
                Err(err) => {
                    log::error!("skipping {}: {}", source.name(), err);
                    continue;
                }
            };

            let stanzas: Vec<String> = targets
                .iter()
                .filter(|id| id.source == source)
                .map(|id| {
                    let markers = self
                        .refresh_dump(*id)
                        .and_then(|dump| fs::read_to_string(dump).ok())
                        .map(|text| alignment::scan_markers(&text))
                        .unwrap_or_default();
                    render_stanza(source, id.config, &script, &markers)
                })
                .collect();

            let text = render_script(source, &stanzas, &source_text, &script, &script_text);
            emit(out_dir.join(script_name(source)), &text, &mut written);
        }
        Ok(written)
    }

    fn read_input(&self, name: &str) -> Result<String> {
        let path = self.work_dir().join(name);
        fs::read_to_string(&path).map_err(|e| HarnessError::io(path, e))
    }
}
