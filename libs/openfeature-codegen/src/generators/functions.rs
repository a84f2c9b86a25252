//! Named functions exposed to templates
//!
//! The registry is the whole API surface a template may call. Entry names are
//! a versioned interface with the template text: a renamed or missing entry
//! only shows up as a render-time error.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A template function: takes one value, returns one value, never fails
pub type TemplateFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<&'static str, TemplateFn>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, replacing any previous entry with the same name
    pub fn insert<F>(&mut self, name: &'static str, function: F)
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.functions.insert(name, Arc::new(function));
    }

    /// Builder form of [`FunctionRegistry::insert`]
    pub fn with<F>(mut self, name: &'static str, function: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.insert(name, function);
        self
    }

    /// Layer `other` on top of this registry. Entries in `other` win.
    pub fn merge(mut self, other: FunctionRegistry) -> Self {
        self.functions.extend(other.functions);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TemplateFn> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Invoke a function by name
    pub fn call(&self, name: &str, value: &Value) -> Option<Value> {
        self.get(name).map(|function| function(value))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &TemplateFn)> {
        self.functions.iter().map(|(name, function)| (*name, function))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn call_dispatches_by_name() {
        let registry = FunctionRegistry::new().with("Double", |v| json!(v.as_i64().unwrap_or(0) * 2));

        assert_eq!(registry.call("Double", &json!(21)), Some(json!(42)));
        assert_eq!(registry.call("Missing", &json!(21)), None);
    }

    #[test]
    fn merge_prefers_the_overlay() {
        let base = FunctionRegistry::new()
            .with("Name", |_| json!("base"))
            .with("Keep", |_| json!("kept"));
        let overlay = FunctionRegistry::new().with("Name", |_| json!("overlay"));

        let merged = base.merge(overlay);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.call("Name", &Value::Null), Some(json!("overlay")));
        assert_eq!(merged.call("Keep", &Value::Null), Some(json!("kept")));
    }

    #[test]
    fn names_are_sorted() {
        let registry = FunctionRegistry::new()
            .with("b", |v| v.clone())
            .with("a", |v| v.clone());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(format!("{:?}", registry), r#"{"a", "b"}"#);
    }
}
