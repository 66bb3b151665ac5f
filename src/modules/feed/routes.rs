use std::sync::Arc;

use axum::{extract::State, middleware, response::IntoResponse, routing::get, Router};

use super::types::{
    response, COMMENTS_KEY, COMMENTS_PAGE_TEMPLATE, ENTRIES_PAGE_TEMPLATE, ENTRIES_TEMPLATE,
    FEED_TEMPLATE,
};
use crate::{
    modules::templates::{
        page_template, page_templates, select_page_template, shared, PageContext, ViewArgs,
    },
    types::{Context, Settings},
};

fn page(settings: &Settings, default_template: &str, args: ViewArgs) -> response::Success {
    let template = args
        .template(&settings.template_varname)
        .unwrap_or(default_template)
        .to_string();

    tracing::debug!("Serving {} with template {}", default_template, template);

    response::Success::Page(response::Page {
        template,
        extra_context: args.extra_context.unwrap_or_default(),
    })
}

async fn feed(
    State(ctx): State<Arc<Context>>,
    PageContext(args): PageContext,
) -> impl IntoResponse {
    page(&ctx.settings, FEED_TEMPLATE, args)
}

async fn entries(
    State(ctx): State<Arc<Context>>,
    PageContext(args): PageContext,
) -> impl IntoResponse {
    page(&ctx.settings, ENTRIES_TEMPLATE, args)
}

pub fn get_router(settings: &Settings) -> Router<Arc<Context>> {
    let feed_templates = shared(page_templates(
        [
            (ENTRIES_PAGE_TEMPLATE, None),
            (COMMENTS_PAGE_TEMPLATE, Some(COMMENTS_KEY)),
        ],
        settings,
    ));
    let entries_template = shared(page_template(ENTRIES_PAGE_TEMPLATE, None, settings));

    Router::new()
        .route(
            "/",
            get(feed).route_layer(middleware::from_fn_with_state(
                feed_templates,
                select_page_template,
            )),
        )
        .route(
            "/entries",
            get(entries).route_layer(middleware::from_fn_with_state(
                entries_template,
                select_page_template,
            )),
        )
}
