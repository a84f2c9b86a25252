//! Code generators for different target languages
//!
//! Each language has its own module that implements the `Generator` trait on
//! top of the shared [`GeneratorCore`].

mod functions;
mod helpers;
pub mod nestjs;

pub use functions::{FunctionRegistry, TemplateFn};
pub use helpers::{common_functions, doc_comment, quote, quote_string};

use crate::driver::{RenderDriver, TeraDriver};
use crate::error::Result;
use crate::flagset::{Flagset, UnsupportedTypes};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Trait that all language generators must implement
pub trait Generator {
    /// Generator-specific configuration carried in [`GenerationParams::custom`]
    type Params;

    /// Render and write this generator's output under `params.output_path`
    fn generate(&self, params: &GenerationParams<Self::Params>) -> Result<()>;

    /// Flag types this target language cannot express
    fn unsupported_types(&self) -> &UnsupportedTypes;
}

/// Parameters of a single generator run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams<C> {
    /// Directory the generated file is written into
    pub output_path: PathBuf,
    pub custom: C,
}

impl<C: Default> GenerationParams<C> {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            custom: C::default(),
        }
    }
}

/// Root object handed to templates
#[derive(Serialize)]
struct TemplateData<'a, C> {
    flagset: &'a Flagset,
    params: &'a GenerationParams<C>,
}

/// State and behaviour shared by all generators: the bound flag set, the
/// declared unsupported types, and the driver that renders and writes.
#[derive(Debug, Clone)]
pub struct GeneratorCore<D = TeraDriver> {
    flagset: Flagset,
    unsupported: UnsupportedTypes,
    driver: D,
}

impl GeneratorCore {
    pub fn new(flagset: Flagset, unsupported: UnsupportedTypes) -> Self {
        Self::with_driver(flagset, unsupported, TeraDriver)
    }
}

impl<D: RenderDriver> GeneratorCore<D> {
    pub fn with_driver(flagset: Flagset, unsupported: UnsupportedTypes, driver: D) -> Self {
        Self {
            flagset,
            unsupported,
            driver,
        }
    }

    pub fn flagset(&self) -> &Flagset {
        &self.flagset
    }

    pub fn unsupported_types(&self) -> &UnsupportedTypes {
        &self.unsupported
    }

    /// Render `template` and write it to `params.output_path/file_name`.
    ///
    /// `functions` is layered over [`common_functions`]. Flags with an
    /// unsupported type are left out of the template data. Driver errors are
    /// returned as-is. Returns the path of the written file.
    pub fn generate_file<C: Serialize>(
        &self,
        functions: &FunctionRegistry,
        template: &str,
        params: &GenerationParams<C>,
        file_name: &str,
    ) -> Result<PathBuf> {
        let functions = common_functions().merge(functions.clone());
        let flagset = self.flagset.filter(&self.unsupported);

        debug!(
            file = file_name,
            flags = flagset.len(),
            skipped = self.flagset.len() - flagset.len(),
            functions = functions.len(),
            "Rendering generator template"
        );

        let data = serde_json::to_value(TemplateData {
            flagset: &flagset,
            params,
        })?;
        let contents = self.driver.render(file_name, template, &functions, &data)?;

        let path = params.output_path.join(file_name);
        self.driver.write(&path, &contents)?;

        info!(path = %path.display(), flags = flagset.len(), "Generated file");
        Ok(path)
    }
}
