use crate::{modules, types::Context, utils::request::X_REQUESTED_WITH};
use axum::{
    http::{header, Method},
    Router,
};
use std::{io, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors, trace};

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

impl App {
    pub fn new(ctx: Context) -> Self {
        let ctx = Arc::new(ctx);

        let router = Router::new()
            .nest("/api", modules::get_router(&ctx.settings))
            .with_state(ctx.clone())
            .layer(trace::TraceLayer::new_for_http())
            .layer(
                cors::CorsLayer::new()
                    .allow_methods([Method::OPTIONS, Method::GET])
                    .allow_headers([header::CONTENT_TYPE, X_REQUESTED_WITH])
                    .allow_origin(cors::Any),
            );

        Self { ctx, router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn serve(self) -> io::Result<()> {
        let listener =
            TcpListener::bind(format!("{}:{}", self.ctx.app.host, self.ctx.app.port)).await?;

        tracing::info!(
            "App is running on {}:{} ({})",
            self.ctx.app.host,
            self.ctx.app.port,
            self.ctx.app.url
        );

        axum::serve(listener, self.router).await
    }
}
