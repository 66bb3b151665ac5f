use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::{env, fmt};

pub const DEFAULT_PAGE_LABEL: &str = "page";
pub const DEFAULT_TEMPLATE_VARNAME: &str = "template";

/// Name of the query parameter telling which paginated region issued the request.
pub const QUERYSTRING_KEY_PARAM: &str = "querystring_key";

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidConfig(String),
    DuplicateQuerystringKey {
        key: String,
        previous: String,
        template: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(reason) => write!(f, "Invalid configuration: {}", reason),
            Self::DuplicateQuerystringKey {
                key,
                previous,
                template,
            } => write!(
                f,
                "Querystring key '{}' is mapped to both '{}' and '{}'",
                key, previous, template
            ),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Names the pagination layer agrees on with views and templates.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Querystring key used when a decorator is not given one.
    pub page_label: String,
    /// Keyword argument receiving the override template.
    pub template_varname: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_label: DEFAULT_PAGE_LABEL.to_string(),
            template_varname: DEFAULT_TEMPLATE_VARNAME.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub settings: Settings,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct PaginationConfig {
    pub page_label: String,
    pub template_varname: String,
}

#[derive(Clone)]
pub struct Config {
    pub app: AppConfig,
    pub pagination: PaginationConfig,
}

fn non_empty(name: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::InvalidConfig(format!("{} must not be empty", name)));
    }

    Ok(value)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .map_err(|_| Error::InvalidConfig("Invalid PORT number".to_string()))?;
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let page_label = non_empty(
            "ENDLESS_PAGINATION_PAGE_LABEL",
            env::var("ENDLESS_PAGINATION_PAGE_LABEL")
                .unwrap_or_else(|_| DEFAULT_PAGE_LABEL.to_string()),
        )?;
        let template_varname = non_empty(
            "ENDLESS_PAGINATION_TEMPLATE_VARNAME",
            env::var("ENDLESS_PAGINATION_TEMPLATE_VARNAME")
                .unwrap_or_else(|_| DEFAULT_TEMPLATE_VARNAME.to_string()),
        )?;

        Ok(Self {
            app: AppConfig { host, port, url },
            pagination: PaginationConfig {
                page_label,
                template_varname,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        let host = "0.0.0.0".to_string();
        let port = 8000;

        Self {
            app: AppConfig {
                url: format!("http://{}:{}", host, port),
                host,
                port,
            },
            pagination: PaginationConfig {
                page_label: DEFAULT_PAGE_LABEL.to_string(),
                template_varname: DEFAULT_TEMPLATE_VARNAME.to_string(),
            },
        }
    }
}

pub trait ToContext {
    fn to_context(self) -> Context;
}

impl ToContext for Config {
    fn to_context(self) -> Context {
        Context {
            app: AppContext {
                host: self.app.host,
                port: self.app.port,
                url: self.app.url,
            },
            settings: Settings {
                page_label: self.pagination.page_label,
                template_varname: self.pagination.template_varname,
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config_carries_default_settings() {
        let ctx = Config::default().to_context();

        assert_eq!(ctx.settings, Settings::default());
        assert_eq!(ctx.settings.page_label, "page");
        assert_eq!(ctx.settings.template_varname, "template");
        assert_eq!(ctx.app.url, "http://0.0.0.0:8000");
    }

    #[test]
    fn empty_values_are_rejected() {
        assert!(matches!(
            non_empty("X", "  ".to_string()),
            Err(Error::InvalidConfig(_))
        ));
        assert_eq!(non_empty("X", "page".to_string()), Ok("page".to_string()));
    }

    #[test]
    fn errors_render_as_json_responses() {
        let response = Error::InvalidConfig("Invalid PORT number".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn duplicate_key_message_names_both_templates() {
        let err = Error::DuplicateQuerystringKey {
            key: "page".to_string(),
            previous: "a.html".to_string(),
            template: "b.html".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Querystring key 'page' is mapped to both 'a.html' and 'b.html'"
        );
    }
}
