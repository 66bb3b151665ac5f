use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Extra context key advertising the page template to the rendering layer.
pub const PAGE_TEMPLATE: &str = "page_template";

pub type ExtraContext = Map<String, Value>;

/// Arguments a decorated view is called with.
///
/// `args` and `kwargs` are forwarded to the view untouched apart from the
/// override template, which lands in `kwargs` under the configured variable
/// name. `extra_context` is merged into the view's rendering context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewArgs {
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
    #[serde(default)]
    pub extra_context: Option<ExtraContext>,
}

impl ViewArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    /// Returns the extra context, creating an empty one when absent.
    pub fn extra_context_mut(&mut self) -> &mut ExtraContext {
        self.extra_context.get_or_insert_with(Map::new)
    }

    /// The override template injected under `varname`, if any.
    pub fn template(&self, varname: &str) -> Option<&str> {
        self.kwargs.get(varname).and_then(Value::as_str)
    }

    /// `None` when no selector ran, `Some(Value::Null)` when one ran without a match.
    pub fn page_template(&self) -> Option<&Value> {
        self.extra_context
            .as_ref()
            .and_then(|context| context.get(PAGE_TEMPLATE))
    }
}

/// Querystring key to template name, fixed once a decorator is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateMapping {
    templates: HashMap<String, String>,
}

impl TemplateMapping {
    pub(super) fn insert(&mut self, key: String, template: String) -> Option<String> {
        self.templates.insert(key, template)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn extra_context_is_created_on_demand() {
        let mut args = ViewArgs::new();
        assert_eq!(args.page_template(), None);

        args.extra_context_mut();
        assert_eq!(args.extra_context, Some(Map::new()));
        assert_eq!(args.page_template(), None);

        args.extra_context_mut()
            .insert(PAGE_TEMPLATE.to_string(), Value::Null);
        assert_eq!(args.page_template(), Some(&Value::Null));
    }

    #[test]
    fn existing_extra_context_is_kept() {
        let mut args = ViewArgs {
            extra_context: Some(Map::from_iter([("title".to_string(), json!("Feed"))])),
            ..ViewArgs::default()
        };

        args.extra_context_mut()
            .insert(PAGE_TEMPLATE.to_string(), json!("entries.html"));

        let context = args.extra_context.unwrap();
        assert_eq!(context.get("title"), Some(&json!("Feed")));
        assert_eq!(context.get(PAGE_TEMPLATE), Some(&json!("entries.html")));
    }

    #[test]
    fn template_reads_the_configured_kwarg() {
        let args = ViewArgs::new()
            .with_kwarg("template", "entries.html")
            .with_kwarg("tpl", 3);

        assert_eq!(args.template("template"), Some("entries.html"));
        assert_eq!(args.template("tpl"), None);
        assert_eq!(args.template("missing"), None);
    }
}
