//! RISC-V relaxation alignment test runner CLI.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process;

use relax_align::{Configuration, Harness, Source, TestId, ToolchainSettings};

#[derive(Parser, Debug)]
#[command(
    name = "relax-align",
    author,
    version,
    about = "RISC-V alignment test runner",
    long_about = None,
)]
struct Cli {
    /// Source files to test (default: all).
    #[arg(long, num_args = 0..)]
    sources: Option<Vec<String>>,

    /// Configurations to test (default: all).
    #[arg(long, num_args = 0..)]
    configs: Option<Vec<String>>,

    /// Remove generated .o, .elf and .dump files.
    #[arg(long)]
    clean: bool,

    /// List available sources and configurations.
    #[arg(long)]
    list: bool,

    /// Emit binutils run_dump_test descriptors (requires --output-dir).
    #[arg(long, requires = "output_dir")]
    gen_binutils_test: bool,

    /// Emit lld lit tests (requires --output-dir).
    #[arg(long, requires = "output_dir")]
    gen_llvm_test: bool,

    /// Destination directory for generated tests.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory holding the sources and linker script; artifacts land here.
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,

    /// TOML file with toolchain settings. Flags override it.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Toolchain installation bin directory.
    #[arg(long)]
    toolchain_base: Option<PathBuf>,

    /// Assemble through clang instead of GNU as.
    #[arg(long)]
    clang: bool,

    /// Path to clang, used when --clang is given.
    #[arg(long)]
    clang_path: Option<PathBuf>,

    #[arg(long)]
    as_path: Option<PathBuf>,

    #[arg(long)]
    ld_path: Option<PathBuf>,

    #[arg(long)]
    objdump_path: Option<PathBuf>,

    /// Dump-to-expectation converter used by --gen-binutils-test.
    #[arg(long)]
    converter_path: Option<PathBuf>,

    /// Write results as JSON to this file.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print the commands each test would run without running them.
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn flag_settings(&self) -> ToolchainSettings {
        ToolchainSettings {
            toolchain_base: self.toolchain_base.clone(),
            as_path: self.as_path.clone(),
            ld_path: self.ld_path.clone(),
            objdump_path: self.objdump_path.clone(),
            clang_path: self.clang_path.clone(),
            use_clang: self.clang.then_some(true),
            converter_path: self.converter_path.clone(),
            linker_script: None,
        }
    }

    fn settings(&self) -> Result<ToolchainSettings, relax_align::HarnessError> {
        let file = match &self.settings {
            Some(path) => ToolchainSettings::load(path)?,
            None => ToolchainSettings::default(),
        };
        Ok(file.merge(self.flag_settings()))
    }

    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    if cli.clean {
        cmd_clean(&cli);
        return;
    }

    if cli.list {
        cmd_list();
        return;
    }

    let settings = cli.settings().unwrap_or_else(|e| {
        Cli::command().error(ErrorKind::ValueValidation, e).exit();
    });
    let harness = Harness::with_system_runner(settings.resolve(), &cli.work_dir);
    let tests = relax_align::select_tests(cli.sources.as_deref(), cli.configs.as_deref());

    if cli.gen_binutils_test || cli.gen_llvm_test {
        cmd_generate(&cli, &harness, &tests);
        return;
    }

    if cli.dry_run {
        harness.dry_run(&tests);
        return;
    }

    let results = harness.run_all(&tests);
    print!("{}", results.render_summary());

    if let Some(path) = &cli.report {
        if let Err(e) = results.write_json(path) {
            log::error!("could not write report: {}", e);
        }
    }

    process::exit(if results.all_passed() { 0 } else { 1 });
}

fn cmd_clean(cli: &Cli) {
    if let Err(e) = relax_align::clean(&cli.work_dir) {
        eprintln!("\x1b[1;31merror:\x1b[0m {}", e);
        process::exit(1);
    }
}

fn cmd_list() {
    let sources: Vec<&str> = Source::ALL.iter().map(|s| s.name()).collect();
    let configs: Vec<&str> = Configuration::ALL.iter().map(|c| c.name()).collect();
    println!("Available sources: {:?}", sources);
    println!("Available configs: {:?}", configs);
    println!();
    println!("Example usage:");
    println!("  relax-align --sources test relax1 --configs norvc norelax");
}

fn cmd_generate(cli: &Cli, harness: &Harness, tests: &[TestId]) {
    // clap enforces this through `requires`
    let Some(out_dir) = cli.output_dir.as_deref() else {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "--output-dir is required")
            .exit();
    };

    let mut failed = false;
    if cli.gen_binutils_test {
        match harness.generate_binutils_tests(tests, out_dir) {
            Ok(paths) => println!("\nWrote {} binutils test(s)", paths.len()),
            Err(e) => {
                eprintln!("\x1b[1;31merror:\x1b[0m {}", e);
                failed = true;
            }
        }
    }
    if cli.gen_llvm_test {
        match harness.generate_lld_tests(tests, out_dir) {
            Ok(paths) => println!("\nWrote {} lld test(s)", paths.len()),
            Err(e) => {
                eprintln!("\x1b[1;31merror:\x1b[0m {}", e);
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}
