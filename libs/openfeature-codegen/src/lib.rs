//! OpenFeature Code Generator
//!
//! Translates a feature-flag manifest into strongly-typed binding code for a
//! target language.
//!
//! ## Architecture
//!
//! 1. **Flag set**: the language-agnostic flag model, loaded from a manifest
//! 2. **Generators**: one plugin per target language, each supplying a type
//!    mapping, value serialization and a template function registry
//! 3. **Driver**: renders a template against the registry and writes the file
//!
//! Generators never touch the filesystem themselves, so a new target language
//! only needs a template and its functions.

pub mod driver;
pub mod error;
pub mod flagset;
pub mod generators;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use anyhow::Context;
use flagset::Flagset;
use generators::nestjs::{NestJsGenerator, OUTPUT_FILE};
use generators::{GenerationParams, Generator};
use tracing::info;

/// Convenience helper to run the NestJS generator from a manifest file.
///
/// Returns the path of the generated file.
pub fn generate_nestjs_from_manifest(manifest: &Path, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let flagset = Flagset::load(manifest)
        .with_context(|| format!("loading flag manifest {}", manifest.display()))?;
    info!(manifest = %manifest.display(), flags = flagset.len(), "Loaded flag manifest");

    NestJsGenerator::new(flagset)
        .generate(&GenerationParams::new(output_dir))
        .context("running NestJS generator")?;

    Ok(output_dir.join(OUTPUT_FILE))
}
