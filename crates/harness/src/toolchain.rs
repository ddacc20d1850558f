//! Toolchain locations.
//!
//! Paths are never validated here; a wrong path only shows up when the
//! corresponding pipeline step tries to spawn it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HarnessError, Result};

pub const DEFAULT_TOOLCHAIN_BASE: &str = "/opt/riscv/bin";
pub const TOOL_PREFIX: &str = "riscv64-unknown-linux-gnu-";
pub const DEFAULT_CONVERTER: &str = "dump2expect";
pub const DEFAULT_LINKER_SCRIPT: &str = "x.ld";

/// Which program assembles the sources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frontend {
    /// GNU `as` invoked directly.
    Gas,
    /// A compiler driver; defines are forwarded with `-Wa,`.
    Clang(PathBuf),
}

/// Resolved tool paths used by the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    pub base: PathBuf,
    pub assembler: PathBuf,
    pub linker: PathBuf,
    pub objdump: PathBuf,
    pub frontend: Frontend,
    pub converter: PathBuf,
    pub linker_script: String,
}

impl Toolchain {
    /// Toolchain rooted at `base` with the default tool names.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            assembler: tool_in(&base, "as"),
            linker: tool_in(&base, "ld"),
            objdump: tool_in(&base, "objdump"),
            frontend: Frontend::Gas,
            converter: PathBuf::from(DEFAULT_CONVERTER),
            linker_script: DEFAULT_LINKER_SCRIPT.to_string(),
            base,
        }
    }

    pub fn default_clang(&self) -> PathBuf {
        self.base.join("clang")
    }

    pub fn uses_clang(&self) -> bool {
        matches!(self.frontend, Frontend::Clang(_))
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::with_base(DEFAULT_TOOLCHAIN_BASE)
    }
}

fn tool_in(base: &Path, tool: &str) -> PathBuf {
    base.join(format!("{}{}", TOOL_PREFIX, tool))
}

/// One layer of toolchain overrides.
///
/// Used both for the optional TOML settings file and for command-line
/// flags; later layers win field by field.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainSettings {
    pub toolchain_base: Option<PathBuf>,
    pub as_path: Option<PathBuf>,
    pub ld_path: Option<PathBuf>,
    pub objdump_path: Option<PathBuf>,
    pub clang_path: Option<PathBuf>,
    pub use_clang: Option<bool>,
    pub converter_path: Option<PathBuf>,
    pub linker_script: Option<String>,
}

impl ToolchainSettings {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| HarnessError::Settings(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| HarnessError::Settings(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    /// Fields set in `over` replace the ones in `self`.
    pub fn merge(self, over: ToolchainSettings) -> Self {
        Self {
            toolchain_base: over.toolchain_base.or(self.toolchain_base),
            as_path: over.as_path.or(self.as_path),
            ld_path: over.ld_path.or(self.ld_path),
            objdump_path: over.objdump_path.or(self.objdump_path),
            clang_path: over.clang_path.or(self.clang_path),
            use_clang: over.use_clang.or(self.use_clang),
            converter_path: over.converter_path.or(self.converter_path),
            linker_script: over.linker_script.or(self.linker_script),
        }
    }

    /// Applies the settings on top of the built-in defaults.
    ///
    /// A changed base re-derives every tool that was not overridden
    /// individually. Clang mode is selected only by `use_clang`; a clang
    /// path alone just says where clang lives.
    pub fn resolve(self) -> Toolchain {
        let mut tc = match self.toolchain_base {
            Some(base) => Toolchain::with_base(base),
            None => Toolchain::default(),
        };
        if let Some(p) = self.as_path {
            tc.assembler = p;
        }
        if let Some(p) = self.ld_path {
            tc.linker = p;
        }
        if let Some(p) = self.objdump_path {
            tc.objdump = p;
        }
        if let Some(p) = self.converter_path {
            tc.converter = p;
        }
        if let Some(script) = self.linker_script {
            tc.linker_script = script;
        }
        if self.use_clang.unwrap_or(false) {
            let path = self.clang_path.unwrap_or_else(|| tc.default_clang());
            tc.frontend = Frontend::Clang(path);
        }
        tc
    }
}
