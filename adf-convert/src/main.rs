use adf_core::MergePolicy;
use anyhow::{bail, Result};
use clap::Parser as ClapParser;
use std::path::{Path, PathBuf};

use config::{ConvertConfig, OutputFormat};
use convert::Converter;

mod config;
mod convert;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Export,
    Import,
}

#[derive(ClapParser, Debug)]
#[command(version, about = "Convert ADF instance containers to XML or YAML", long_about = None)]
struct Args {
    input: PathBuf,

    output: Option<PathBuf>,

    /// binary -> text (default unless INPUT ends in .xml)
    #[arg(short, long, conflicts_with = "import")]
    export: bool,

    /// text -> binary
    #[arg(short, long)]
    import: bool,

    /// type library container, may be repeated
    #[arg(short = 't', long = "type-library")]
    type_libraries: Vec<PathBuf>,

    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// later libraries replace conflicting definitions instead of failing
    #[arg(long)]
    allow_type_overrides: bool,

    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn mode(&self) -> Mode {
        if self.import {
            Mode::Import
        } else if self.export {
            Mode::Export
        } else if has_extension(&self.input, "xml") {
            Mode::Import
        } else {
            Mode::Export
        }
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Command line merged over the optional config file.
#[derive(Debug, PartialEq)]
struct Settings {
    type_libraries: Vec<PathBuf>,
    format: OutputFormat,
    policy: MergePolicy,
}

impl Settings {
    fn new(args: &Args, config: ConvertConfig) -> Self {
        let mut type_libraries = config.type_libraries;
        type_libraries.extend(args.type_libraries.iter().cloned());

        let policy = if args.allow_type_overrides || config.allow_type_overrides {
            MergePolicy::Replace
        } else {
            MergePolicy::Reject
        };

        Self {
            type_libraries,
            format: args.format.or(config.format).unwrap_or_default(),
            policy,
        }
    }
}

fn output_path(input: &Path, output: Option<&Path>, format: OutputFormat) -> Result<PathBuf> {
    let output = match output {
        Some(output) => output.to_path_buf(),
        None => input.with_extension(format.extension()),
    };
    if output == input {
        bail!("output would overwrite the input {}", input.display());
    }
    Ok(output)
}

fn export(args: &Args, settings: &Settings) -> Result<()> {
    let mut converter = Converter::new(settings.policy);
    for library in &settings.type_libraries {
        converter.load_library(library)?;
    }
    log::debug!("catalog holds {} type(s)", converter.catalog().len());

    let output = output_path(&args.input, args.output.as_deref(), settings.format)?;
    converter.export(&args.input, &output, settings.format)?;
    log::info!("wrote {}", output.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ConvertConfig::new(path)?,
        None => ConvertConfig::default(),
    };
    let settings = Settings::new(&args, config);

    match args.mode() {
        Mode::Export => export(&args, &settings),
        Mode::Import => bail!("import (text -> ADF) is not implemented"),
    }
}
