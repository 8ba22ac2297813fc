mod handlers;
mod routes;
mod state;

pub use handlers::{resolve_count, resolve_mode, resolve_title, RecommendRequest};
pub use routes::create_router;
pub use state::{AppState, RecommendationLimits};
