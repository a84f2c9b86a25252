//! NestJS decorator generator
//!
//! Emits a single TypeScript module with one parameter decorator per flag,
//! built on the typed decorators of `@openfeature/nestjs-sdk`.

mod types;

pub use types::{
    colliding_decorator_names, decorator_name, open_feature_type, to_json_string,
    FALLBACK_LITERAL,
};

use crate::driver::{RenderDriver, TeraDriver};
use crate::error::Result;
use crate::flagset::{Flagset, UnsupportedTypes};
use crate::generators::{FunctionRegistry, GenerationParams, Generator, GeneratorCore};
use serde::Serialize;
use tracing::warn;

/// Name of the generated file
pub const OUTPUT_FILE: &str = "openfeature-decorators.ts";

static TEMPLATE: &str = include_str!("nestjs.tera");

/// NestJS takes no generator-specific configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NestJsParams {}

/// NestJS code generator
#[derive(Debug, Clone)]
pub struct NestJsGenerator<D = TeraDriver> {
    core: GeneratorCore<D>,
}

impl NestJsGenerator {
    /// Bind a generator to a flag set. Every flag type is supported.
    pub fn new(flagset: Flagset) -> Self {
        Self::with_driver(flagset, TeraDriver)
    }
}

impl<D: RenderDriver> NestJsGenerator<D> {
    pub fn with_driver(flagset: Flagset, driver: D) -> Self {
        Self {
            core: GeneratorCore::with_driver(flagset, UnsupportedTypes::none(), driver),
        }
    }

    /// Functions the NestJS template calls on top of the common helpers
    pub fn functions() -> FunctionRegistry {
        FunctionRegistry::new()
            .with("OpenFeatureType", types::open_feature_type_fn)
            .with("ToJSONString", types::to_json_string_fn)
            .with("DecoratorName", types::decorator_name_fn)
    }
}

impl<D: RenderDriver> Generator for NestJsGenerator<D> {
    type Params = NestJsParams;

    fn generate(&self, params: &GenerationParams<NestJsParams>) -> Result<()> {
        let functions = Self::functions();

        // Rendered anyway; the resulting module fails to type-check.
        for (name, keys) in colliding_decorator_names(self.core.flagset()) {
            warn!(decorator = %name, keys = ?keys, "Flag keys map to the same decorator name");
        }

        // Only the output path carries over; NestJS has no custom settings.
        let params = GenerationParams {
            output_path: params.output_path.clone(),
            custom: NestJsParams::default(),
        };

        self.core
            .generate_file(&functions, TEMPLATE, &params, OUTPUT_FILE)
            .map(|_| ())
    }

    fn unsupported_types(&self) -> &UnsupportedTypes {
        self.core.unsupported_types()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flagset::{Flag, FlagType};
    use serde_json::json;

    fn render(flagset: Flagset) -> String {
        let generator = NestJsGenerator::new(flagset);
        let dir = tempfile::tempdir().unwrap();
        generator
            .generate(&GenerationParams::new(dir.path()))
            .unwrap();
        std::fs::read_to_string(dir.path().join(OUTPUT_FILE)).unwrap()
    }

    #[test]
    fn registry_exposes_template_contract_names() {
        let functions = NestJsGenerator::<TeraDriver>::functions();
        assert!(functions.contains("OpenFeatureType"));
        assert!(functions.contains("ToJSONString"));
        assert!(functions.contains("DecoratorName"));
    }

    #[test]
    fn supports_every_flag_type() {
        let generator = NestJsGenerator::new(Flagset::new());
        assert!(generator.unsupported_types().is_empty());
    }

    #[test]
    fn renders_typed_decorators() {
        let out = render(Flagset::from_flags(vec![
            Flag::new("discountPercentage", FlagType::Float, json!(0.15)),
            Flag::new("welcome-message", FlagType::String, json!("Hi"))
                .with_description("Greeting shown on the landing page"),
            Flag::new("themeCustomization", FlagType::Object, json!({ "color": "#fff" })),
        ]));

        assert!(out.contains("export function DiscountPercentage(props?: TypedFeatureProps)"));
        assert!(out.contains("return NumberFeatureFlag({"));
        assert!(out.contains("defaultValue: 0.15,"));

        assert!(out.contains(" * Greeting shown on the landing page"));
        assert!(out.contains("export function WelcomeMessage("));
        assert!(out.contains(r#"flagKey: "welcome-message","#));
        assert!(out.contains(r#"defaultValue: "Hi","#));

        assert!(out.contains("return ObjectFeatureFlag({"));
        assert!(out.contains(r##"defaultValue: {"color":"#fff"},"##));
    }

    #[test]
    fn unknown_type_renders_with_empty_type() {
        let out = render(Flagset::from_flags(vec![Flag::new(
            "mystery",
            FlagType::Unknown,
            json!(1),
        )]));

        assert!(out.contains(" * - type: ``"));
        assert!(out.contains("return ObjectFeatureFlag({"));
        assert!(!out.contains("return FeatureFlag("));
    }

    #[test]
    fn description_cannot_escape_the_doc_comment() {
        let out = render(Flagset::from_flags(vec![Flag::new(
            "banner",
            FlagType::String,
            json!("*/ alert(1) /*"),
        )
        .with_description("ends */ here\nsecond line")]));

        assert!(out.contains("/**\n * ends *\\/ here\n * second line\n *\n * **Details:**"));
        assert!(out.contains(r#" * - default value: `"*\/ alert(1) /*"`"#));

        let docs = &out[..out.find("export function Banner(").unwrap()];
        assert_eq!(docs.matches("*/").count(), docs.matches("/**").count());
    }

    #[test]
    fn keys_starting_with_a_digit_get_a_valid_name() {
        let out = render(Flagset::from_flags(vec![Flag::new(
            "2fa-enabled",
            FlagType::Boolean,
            json!(false),
        )]));

        assert!(out.contains("export function _2faEnabled(props?: TypedFeatureProps)"));
        assert!(out.contains(r#"flagKey: "2fa-enabled","#));
    }

    #[test]
    fn colliding_names_still_render() {
        let out = render(Flagset::from_flags(vec![
            Flag::new("enable-foo", FlagType::Boolean, json!(true)),
            Flag::new("enableFoo", FlagType::Boolean, json!(false)),
        ]));

        assert_eq!(out.matches("export function EnableFoo(").count(), 2);
    }
}
