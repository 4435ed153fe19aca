//! Web layer for the walking tour planner.
//!
//! Provides HTTP endpoints for one-shot tour planning and for step-by-step
//! planning sessions.

mod dto;
mod maps;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use maps::directions_url;
pub use routes::{AppError, create_router};
pub use state::{AppState, DEFAULT_SESSION_IDLE, SessionStore, SharedSession};
pub use templates::*;
