//! Fixed registries of configuration variants and assembly sources.
//!
//! Both registries are closed enums so the set of tests is known at compile
//! time. Name lookup is the only way user input reaches them; unknown names
//! resolve to `None` and are skipped by the orchestrator.

/// Name of the smoke-test source. It is excluded from artifact generation.
pub const SMOKE_TEST: &str = "test";

/// A relaxation/compression variant passed to the assembler as `-defsym`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Configuration {
    Norvc,
    NorvcNorelax,
    Norelax,
    RelaxRvc,
}

impl Configuration {
    /// All variants in registry order.
    pub const ALL: [Configuration; 4] = [
        Configuration::Norvc,
        Configuration::NorvcNorelax,
        Configuration::Norelax,
        Configuration::RelaxRvc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Configuration::Norvc => "norvc",
            Configuration::NorvcNorelax => "norvc-norelax",
            Configuration::Norelax => "norelax",
            Configuration::RelaxRvc => "relax-rvc",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Symbols defined for this variant, in command-line order.
    ///
    /// Each entry is `(symbol, flag)`; every symbol currently maps to `true`,
    /// rendered as `SYM=1`.
    pub fn defines(self) -> &'static [(&'static str, bool)] {
        match self {
            Configuration::Norvc => &[("NORVC", true)],
            Configuration::NorvcNorelax => &[("NORVC", true), ("NORELAX", true)],
            Configuration::Norelax => &[("NORELAX", true)],
            Configuration::RelaxRvc => &[],
        }
    }

    /// `SYM=1` / `SYM=0` assignments in registry order.
    pub fn define_assignments(self) -> Vec<String> {
        self.defines()
            .iter()
            .map(|(sym, on)| format!("{}={}", sym, u8::from(*on)))
            .collect()
    }

    /// Name with dashes turned into dots, as used in artifact file names.
    pub fn dotted(self) -> String {
        self.name().replace('-', ".")
    }
}

/// One of the assembly sources under test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    Test,
    Relax1,
    Relax2,
    Relax3,
    Relax4,
    Relax5,
    Relax6,
    Relax7,
    Relax8,
    Relax9,
    Relax10,
    Relax11,
    Relax12,
}

impl Source {
    pub const ALL: [Source; 13] = [
        Source::Test,
        Source::Relax1,
        Source::Relax2,
        Source::Relax3,
        Source::Relax4,
        Source::Relax5,
        Source::Relax6,
        Source::Relax7,
        Source::Relax8,
        Source::Relax9,
        Source::Relax10,
        Source::Relax11,
        Source::Relax12,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Source::Test => SMOKE_TEST,
            Source::Relax1 => "relax1",
            Source::Relax2 => "relax2",
            Source::Relax3 => "relax3",
            Source::Relax4 => "relax4",
            Source::Relax5 => "relax5",
            Source::Relax6 => "relax6",
            Source::Relax7 => "relax7",
            Source::Relax8 => "relax8",
            Source::Relax9 => "relax9",
            Source::Relax10 => "relax10",
            Source::Relax11 => "relax11",
            Source::Relax12 => "relax12",
        }
    }

    /// Source file path, relative to the working directory.
    pub fn path(self) -> &'static str {
        match self {
            Source::Test => "test.s",
            Source::Relax1 => "relax-align-1.s",
            Source::Relax2 => "relax-align-2.s",
            Source::Relax3 => "relax-align-3.s",
            Source::Relax4 => "relax-align-4.s",
            Source::Relax5 => "relax-align-5.s",
            Source::Relax6 => "relax-align-6.s",
            Source::Relax7 => "relax-align-7.s",
            Source::Relax8 => "relax-align-8.s",
            Source::Relax9 => "relax-align-9.s",
            Source::Relax10 => "relax-align-10.s",
            Source::Relax11 => "relax-align-11.s",
            Source::Relax12 => "relax-align-12.s",
        }
    }

    /// File name without the `.s` extension.
    pub fn stem(self) -> &'static str {
        self.path().strip_suffix(".s").unwrap_or(self.path())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    pub fn is_smoke_test(self) -> bool {
        self.name() == SMOKE_TEST
    }
}

/// A (source, configuration) pair; the unit the harness runs and reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TestId {
    pub source: Source,
    pub config: Configuration,
}

impl TestId {
    pub fn new(source: Source, config: Configuration) -> Self {
        Self { source, config }
    }

    /// Display label. The smoke test is labelled by its configuration alone.
    pub fn label(&self) -> String {
        if self.source.is_smoke_test() {
            self.config.name().to_string()
        } else {
            format!("{}-{}", self.source.name(), self.config.name())
        }
    }

    fn artifact(&self, ext: &str) -> String {
        format!("{}.{}.{}", self.source.name(), self.config.dotted(), ext)
    }

    pub fn object_file(&self) -> String {
        self.artifact("o")
    }

    pub fn elf_file(&self) -> String {
        self.artifact("elf")
    }

    pub fn dump_file(&self) -> String {
        self.artifact("dump")
    }
}
