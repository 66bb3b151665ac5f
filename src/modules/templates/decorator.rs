//! View decorators switching to a page template on ajax pagination requests.
//!
//! A page with several paginated regions tells them apart through the
//! `querystring_key` parameter sent along with each ajax request. The
//! decorators here look at that parameter and, when it names the region they
//! manage, hand the view the smaller page template to render instead of the
//! full page.

use super::types::{TemplateMapping, ViewArgs, PAGE_TEMPLATE};
use crate::{
    types::{Error, Result, Settings, QUERYSTRING_KEY_PARAM},
    utils::request::PaginationRequest,
};
use serde_json::Value;

/// A view callable: anything taking the request and its arguments.
pub trait View<R: ?Sized> {
    type Output;

    fn call(&self, request: &R, args: ViewArgs) -> Self::Output;
}

impl<R: ?Sized, F, T> View<R> for F
where
    F: Fn(&R, ViewArgs) -> T,
{
    type Output = T;

    fn call(&self, request: &R, args: ViewArgs) -> T {
        self(request, args)
    }
}

/// Updates the view arguments for a request without calling any view.
pub trait Selector: Send + Sync {
    fn select(&self, request: &dyn PaginationRequest, args: &mut ViewArgs);

    fn decorate<V>(self, view: V) -> Decorated<Self, V>
    where
        Self: Sized,
    {
        Decorated {
            selector: self,
            view,
        }
    }
}

/// A view wrapped by a selector. Calls keep the view's calling convention.
#[derive(Debug, Clone)]
pub struct Decorated<S, V> {
    selector: S,
    view: V,
}

impl<S, V> Decorated<S, V> {
    pub fn selector(&self) -> &S {
        &self.selector
    }
}

impl<R, S, V> View<R> for Decorated<S, V>
where
    R: PaginationRequest,
    S: Selector,
    V: View<R>,
{
    type Output = V::Output;

    fn call(&self, request: &R, mut args: ViewArgs) -> V::Output {
        self.selector.select(request, &mut args);
        self.view.call(request, args)
    }
}

pub type PageTemplate<V> = Decorated<PageTemplateSelector, V>;
pub type PageTemplates<V> = Decorated<PageTemplatesSelector, V>;

#[derive(Debug, Clone, PartialEq)]
pub struct PageTemplateSelector {
    template: String,
    key: String,
    varname: String,
}

impl PageTemplateSelector {
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Switches to `template` on ajax requests whose `querystring_key` equals
/// `key` (the configured page label when `None`).
///
/// The template name is always given to the view as `page_template` in the
/// extra context, ajax or not, so the full page can include the fragment.
pub fn page_template(
    template: impl Into<String>,
    key: Option<&str>,
    settings: &Settings,
) -> PageTemplateSelector {
    PageTemplateSelector {
        template: template.into(),
        key: key.unwrap_or(&settings.page_label).to_string(),
        varname: settings.template_varname.clone(),
    }
}

impl Selector for PageTemplateSelector {
    fn select(&self, request: &dyn PaginationRequest, args: &mut ViewArgs) {
        args.extra_context_mut()
            .insert(PAGE_TEMPLATE.to_string(), Value::from(self.template.as_str()));

        let querystring_key = request.query_param(QUERYSTRING_KEY_PARAM);
        if request.is_ajax() && querystring_key.as_deref() == Some(self.key.as_str()) {
            tracing::debug!(
                "Switching to page template {} for querystring key {}",
                self.template,
                self.key
            );
            args.kwargs
                .insert(self.varname.clone(), Value::from(self.template.as_str()));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageTemplatesSelector {
    templates: TemplateMapping,
    varname: String,
}

impl PageTemplatesSelector {
    pub fn templates(&self) -> &TemplateMapping {
        &self.templates
    }
}

fn resolve_keys<I, T, K>(mapping: I, page_label: &str) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (T, Option<K>)>,
    T: Into<String>,
    K: Into<String>,
{
    let page_label = page_label.to_string();

    mapping.into_iter().map(move |(template, key)| {
        let key = key.map(Into::into).unwrap_or_else(|| page_label.clone());
        (key, template.into())
    })
}

/// Like [`page_template`] for pages with several paginated regions.
///
/// `mapping` pairs each page template with the querystring key of its region;
/// `None` stands for the configured page label. When two templates end up on
/// the same key the later one replaces the earlier.
pub fn page_templates<I, T, K>(mapping: I, settings: &Settings) -> PageTemplatesSelector
where
    I: IntoIterator<Item = (T, Option<K>)>,
    T: Into<String>,
    K: Into<String>,
{
    let mut templates = TemplateMapping::default();

    for (key, template) in resolve_keys(mapping, &settings.page_label) {
        if let Some(previous) = templates.insert(key.clone(), template.clone()) {
            tracing::warn!(
                "Querystring key {} already mapped to {}, replaced with {}",
                key,
                previous,
                template
            );
        }
    }

    PageTemplatesSelector {
        templates,
        varname: settings.template_varname.clone(),
    }
}

/// Same as [`page_templates`] but refuses two templates on one querystring key.
pub fn page_templates_strict<I, T, K>(
    mapping: I,
    settings: &Settings,
) -> Result<PageTemplatesSelector>
where
    I: IntoIterator<Item = (T, Option<K>)>,
    T: Into<String>,
    K: Into<String>,
{
    let mut templates = TemplateMapping::default();

    for (key, template) in resolve_keys(mapping, &settings.page_label) {
        if let Some(previous) = templates.get(&key) {
            return Err(Error::DuplicateQuerystringKey {
                previous: previous.to_string(),
                key,
                template,
            });
        }
        templates.insert(key, template);
    }

    Ok(PageTemplatesSelector {
        templates,
        varname: settings.template_varname.clone(),
    })
}

impl Selector for PageTemplatesSelector {
    fn select(&self, request: &dyn PaginationRequest, args: &mut ViewArgs) {
        let querystring_key = request.query_param(QUERYSTRING_KEY_PARAM);
        let template = querystring_key
            .as_deref()
            .and_then(|key| self.templates.get(key));

        args.extra_context_mut().insert(
            PAGE_TEMPLATE.to_string(),
            template.map(Value::from).unwrap_or(Value::Null),
        );

        if let Some(template) = template.filter(|template| !template.is_empty()) {
            if request.is_ajax() {
                tracing::debug!(
                    "Switching to page template {} for querystring key {:?}",
                    template,
                    querystring_key
                );
                args.kwargs
                    .insert(self.varname.clone(), Value::from(template));
            }
        }
    }
}
