use super::{decorator::Selector, types::ViewArgs};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::{convert::Infallible, sync::Arc};

pub type SharedSelector = Arc<dyn Selector>;

pub fn shared(selector: impl Selector + 'static) -> SharedSelector {
    Arc::new(selector)
}

/// Runs `selector` before the handler, for use with
/// `axum::middleware::from_fn_with_state`.
///
/// View arguments left in the request extensions by an outer selector are
/// picked up and updated, so stacked layers behave like stacked decorators.
pub async fn select_page_template(
    State(selector): State<SharedSelector>,
    mut req: Request,
    next: Next,
) -> Response {
    let mut args = req
        .extensions_mut()
        .remove::<ViewArgs>()
        .unwrap_or_default();

    selector.select(&req, &mut args);
    req.extensions_mut().insert(args);

    next.run(req).await
}

/// The view arguments prepared for this request; empty when no selector ran.
#[derive(Debug, Clone, Default)]
pub struct PageContext(pub ViewArgs);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PageContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<ViewArgs>()
                .cloned()
                .unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        modules::templates::{decorator::page_template, types::PAGE_TEMPLATE},
        types::Settings,
    };
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::get, Json, Router};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn echo(PageContext(args): PageContext) -> Json<ViewArgs> {
        Json(args)
    }

    async fn call(router: Router, uri: &str, ajax: bool) -> ViewArgs {
        let mut builder = HttpRequest::builder().uri(uri);
        if ajax {
            builder = builder.header("X-Requested-With", "XMLHttpRequest");
        }

        let response = router
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn extractor_is_empty_without_selector() {
        let router = Router::new().route("/", get(echo));

        assert_eq!(call(router, "/", true).await, ViewArgs::default());
    }

    #[tokio::test]
    async fn layer_applies_the_selector() {
        let selector = shared(page_template("entries.html", None, &Settings::default()));
        let router = Router::new()
            .route("/", get(echo))
            .route_layer(middleware::from_fn_with_state(
                selector,
                select_page_template,
            ));

        let args = call(router.clone(), "/?querystring_key=page", true).await;
        assert_eq!(args.template("template"), Some("entries.html"));

        let args = call(router, "/?querystring_key=page", false).await;
        assert_eq!(args.template("template"), None);
        assert_eq!(
            args.extra_context.unwrap().get(PAGE_TEMPLATE),
            Some(&Value::from("entries.html"))
        );
    }

    #[tokio::test]
    async fn stacked_layers_compose_like_decorators() {
        let settings = Settings::default();
        let entries = shared(page_template("entries.html", Some("entries"), &settings));
        let comments = shared(page_template("comments.html", Some("comments"), &settings));

        // The last layer added runs first.
        let router = Router::new()
            .route("/", get(echo))
            .route_layer(middleware::from_fn_with_state(
                comments,
                select_page_template,
            ))
            .route_layer(middleware::from_fn_with_state(
                entries,
                select_page_template,
            ));

        let args = call(router, "/?querystring_key=entries", true).await;
        assert_eq!(args.template("template"), Some("entries.html"));
        assert_eq!(args.page_template(), Some(&json!("comments.html")));
    }
}
