//! Rendering driver
//!
//! Evaluates a template against a function registry and persists the result.
//! Generators only see the two-operation [`RenderDriver`] interface.

use crate::error::{Error, Result};
use crate::generators::FunctionRegistry;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::debug;

/// Name of the argument carrying the input of a template function call
pub const FUNCTION_ARG: &str = "value";

pub trait RenderDriver {
    /// Render `template` with `data` as the root context
    fn render(
        &self,
        name: &str,
        template: &str,
        functions: &FunctionRegistry,
        data: &Value,
    ) -> Result<String>;

    /// Write `contents` to `path`, replacing any existing file
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

impl<D: RenderDriver + ?Sized> RenderDriver for &D {
    fn render(
        &self,
        name: &str,
        template: &str,
        functions: &FunctionRegistry,
        data: &Value,
    ) -> Result<String> {
        (**self).render(name, template, functions, data)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        (**self).write(path, contents)
    }
}

/// Driver backed by the Tera template engine and the local filesystem.
///
/// Every registry entry is available both as a filter (`{{ x | Name }}`) and
/// as a function (`{{ Name(value=x) }}`). Output is never HTML-escaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeraDriver;

impl TeraDriver {
    fn engine(functions: &FunctionRegistry) -> Tera {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        for (name, function) in functions.iter() {
            let filter = Arc::clone(function);
            tera.register_filter(
                name,
                move |value: &Value, _: &HashMap<String, Value>| Ok(filter(value)),
            );

            let function = Arc::clone(function);
            tera.register_function(name, move |args: &HashMap<String, Value>| {
                args.get(FUNCTION_ARG).map(|value| function(value)).ok_or_else(|| {
                    tera::Error::msg(format!(
                        "Function `{}` expects a `{}` argument",
                        name, FUNCTION_ARG
                    ))
                })
            });
        }

        tera
    }
}

impl RenderDriver for TeraDriver {
    fn render(
        &self,
        name: &str,
        template: &str,
        functions: &FunctionRegistry,
        data: &Value,
    ) -> Result<String> {
        let mut tera = Self::engine(functions);
        tera.add_raw_template(name, template)?;

        let context = Context::from_value(data.clone())?;
        let rendered = tera.render(name, &context)?;

        debug!(template = name, bytes = rendered.len(), "Rendered template");
        Ok(rendered)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        fs::write(path, contents).map_err(|e| Error::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> FunctionRegistry {
        FunctionRegistry::new().with("Shout", |v| json!(v.as_str().unwrap_or("").to_uppercase()))
    }

    #[test]
    fn registry_entries_work_as_filters_and_functions() {
        let out = TeraDriver
            .render(
                "t",
                "{{ name | Shout }} {{ Shout(value=name) }}",
                &registry(),
                &json!({ "name": "hi" }),
            )
            .unwrap();
        assert_eq!(out, "HI HI");
    }

    #[test]
    fn output_is_not_escaped() {
        let out = TeraDriver
            .render("x.html", "{{ s }}", &registry(), &json!({ "s": "<a & \"b\">" }))
            .unwrap();
        assert_eq!(out, "<a & \"b\">");
    }

    #[test]
    fn unknown_filter_is_a_render_error() {
        let err = TeraDriver
            .render("t", "{{ name | Whisper }}", &registry(), &json!({ "name": "hi" }))
            .unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn function_without_value_argument_fails() {
        let err = TeraDriver
            .render("t", "{{ Shout(other=1) }}", &registry(), &json!({}))
            .unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn syntax_error_is_a_template_error() {
        let err = TeraDriver
            .render("t", "{{ unclosed", &registry(), &json!({}))
            .unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn write_creates_parent_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.ts");

        TeraDriver.write(&path, "first").unwrap();
        TeraDriver.write(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
