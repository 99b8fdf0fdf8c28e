//! HTTP presentation layer
//!
//! Axum server exposing the assessment pipeline and cache administration
//! as a JSON API.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
