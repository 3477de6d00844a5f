//! Platepick - a graph-backed restaurant recommendation service.
//!
//! Exposes social and recommendation queries (friends, restaurant search,
//! friend recommendations, best-restaurant aggregation) over a graph of
//! people and restaurants, plus the mutations that keep the graph
//! consistent (like/dislike, friend/unfriend, user creation).

pub mod api;
pub mod config;
pub mod core;
pub mod query;
pub mod services;
pub mod store;
