pub mod app;
pub mod modules;
pub mod types;
pub mod utils;

pub use modules::templates::{
    page_template, page_templates, page_templates_strict, PageContext, Selector, View, ViewArgs,
};
pub use types::{Error, Settings};
pub use utils::request::PaginationRequest;
