pub mod feed;
pub mod templates;

mod router;
pub use router::get_router;
