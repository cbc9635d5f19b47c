//! HTTP surface: router, handlers and response bodies.

pub mod handlers;
pub mod responses;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
