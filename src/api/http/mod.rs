//! HTTP transport: a thin shim over the engine's operation contract.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
