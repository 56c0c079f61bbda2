//! HTTP surface: router, shared state, and handlers.

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
