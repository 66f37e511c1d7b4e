pub mod middleware;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod assignments;
    pub mod common;
    pub mod health;
    pub mod metrics;
}

pub use middleware::REQUEST_ID_HEADER;
pub use router::{create_router, ApiDoc};
pub use types::AppState;
