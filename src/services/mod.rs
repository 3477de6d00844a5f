//! Service layer.

pub mod recommender;

pub use recommender::Recommender;
