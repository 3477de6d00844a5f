//! Domain types and the error taxonomy shared by the engine and the gateway.

pub mod error;
pub mod model;

pub use error::{CoreError, CoreResult};
pub use model::{BestRow, LoginOutcome, Recommendation, RestaurantRow};
