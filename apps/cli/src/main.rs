//! `openfeature-gen`: generate typed flag bindings from an OpenFeature manifest

mod config;
mod logging;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use openfeature_codegen::generators::nestjs;
use tracing::info;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "openfeature-gen", version, about = "Generate typed OpenFeature flag bindings")]
struct Cli {
    /// Configuration file (defaults to ./openfeature-gen.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. "debug"
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate bindings for a target language
    Generate {
        #[arg(value_enum)]
        target: Target,

        /// Flag manifest to read
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Directory to write generated files into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List available generators
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// NestJS parameter decorators
    Nestjs,
}

impl Target {
    fn output_file(self) -> &'static str {
        match self {
            Target::Nestjs => nestjs::OUTPUT_FILE,
        }
    }

    /// Load `manifest`, render it into `output` and return the written file
    fn generate(self, manifest: &Path, output: &Path) -> anyhow::Result<PathBuf> {
        match self {
            Target::Nestjs => openfeature_codegen::generate_nestjs_from_manifest(manifest, output),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.log_json {
        config.logging.json = true;
    }
    logging::init_logging(&config.logging)?;

    match cli.command {
        Command::Generate {
            target,
            manifest,
            output,
        } => {
            let manifest = manifest.unwrap_or(config.manifest);
            let output = output.unwrap_or(config.output);

            let path = target.generate(&manifest, &output)?;
            info!(path = %path.display(), "Done");
        }
        Command::List => {
            for target in Target::value_variants() {
                if let Some(value) = target.to_possible_value() {
                    println!("{}\t{}", value.get_name(), target.output_file());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_arguments() {
        let cli = Cli::parse_from([
            "openfeature-gen",
            "generate",
            "nestjs",
            "--manifest",
            "flags.json",
            "-o",
            "out",
            "--log-level",
            "debug",
        ]);

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Command::Generate {
                target,
                manifest,
                output,
            } => {
                assert_eq!(target, Target::Nestjs);
                assert_eq!(manifest, Some(PathBuf::from("flags.json")));
                assert_eq!(output, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn target_writes_its_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("flags.json");
        std::fs::write(
            &manifest,
            r#"{"flags": {"enableFoo": {"flagType": "boolean", "defaultValue": true}}}"#,
        )
        .unwrap();

        let path = Target::Nestjs.generate(&manifest, dir.path()).unwrap();

        assert_eq!(path, dir.path().join(Target::Nestjs.output_file()));
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("export function EnableFoo("));
    }

    #[test]
    fn target_reports_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();

        let err = Target::Nestjs
            .generate(&dir.path().join("missing.json"), dir.path())
            .unwrap_err();

        assert!(format!("{:#}", err).contains("missing.json"));
    }
}
