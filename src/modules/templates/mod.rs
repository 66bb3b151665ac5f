pub mod decorator;
pub mod middleware;
pub mod types;

pub use decorator::{
    page_template, page_templates, page_templates_strict, Decorated, PageTemplate,
    PageTemplateSelector, PageTemplates, PageTemplatesSelector, Selector, View,
};
pub use middleware::{select_page_template, shared, PageContext, SharedSelector};
pub use types::{ExtraContext, TemplateMapping, ViewArgs, PAGE_TEMPLATE};
