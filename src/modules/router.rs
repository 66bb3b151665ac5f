use super::feed;
use crate::types::{Context, Settings};
use axum::Router;
use std::sync::Arc;

pub fn get_router(settings: &Settings) -> Router<Arc<Context>> {
    Router::new().nest("/feed", feed::routes::get_router(settings))
}
