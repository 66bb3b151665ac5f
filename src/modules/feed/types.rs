pub const FEED_TEMPLATE: &str = "feed/index.html";
pub const ENTRIES_TEMPLATE: &str = "feed/entries.html";
pub const ENTRIES_PAGE_TEMPLATE: &str = "feed/entries_page.html";
pub const COMMENTS_PAGE_TEMPLATE: &str = "feed/comments_page.html";

/// Querystring key of the comments region; entries use the page label.
pub const COMMENTS_KEY: &str = "comments_page";

pub mod response {
    use crate::modules::templates::ExtraContext;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    pub struct Page {
        pub template: String,
        pub extra_context: ExtraContext,
    }

    pub enum Success {
        Page(Page),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Page(page) => (StatusCode::OK, Json(json!(page))).into_response(),
            }
        }
    }
}
