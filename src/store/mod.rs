//! Graph store abstraction.
//!
//! The engine talks to the graph through [`GraphStore`]; the Bolt backend
//! translates each operation into a parameterized Cypher statement built by
//! [`crate::query`], while the memory backend executes the same semantics
//! against an in-process adjacency model. Every write call is atomic on the
//! store side.

pub mod bolt;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use bolt::BoltStore;
pub use memory::MemoryStore;

use crate::core::model::{BestRow, Recommendation, RestaurantRow};

#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("unexpected result shape: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Optional filters for the restaurant search. `None` means wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantFilter {
    pub cuisine: Option<String>,
    pub location: Option<String>,
    pub person: Option<String>,
}

/// Filters for the best-restaurant aggregation. An empty `persons` list
/// means likes from anyone count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BestFilter {
    pub cuisine: Option<String>,
    pub location: Option<String>,
    pub persons: Vec<String>,
}

/// Which edge a person holds toward a restaurant. Setting one always clears
/// the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Likes,
    Dislikes,
}

/// Result of a guarded node creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    Conflict,
}

/// Result of an edge mutation: either the referenced nodes were found and
/// the mutation applied (possibly as a no-op), or a node was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    MissingEntity,
}

/// Stored login record. Only the engine sees the hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub name: String,
    pub password_hash: String,
}

/// Connection/session owner for the graph database. Reads run in read-only
/// transactions and never mutate; writes are atomic per call. Safe for
/// concurrent use by in-flight requests.
#[async_trait]
pub trait GraphStore: Send + Sync + 'static {
    async fn friends_of(&self, person: &str) -> StoreResult<Vec<String>>;

    async fn non_friends_of(&self, person: &str) -> StoreResult<Vec<String>>;

    async fn all_persons(&self) -> StoreResult<Vec<String>>;

    async fn restaurants(&self, filter: &RestaurantFilter) -> StoreResult<Vec<RestaurantRow>>;

    /// Raw per-restaurant aggregates for friend recommendations; ordering and
    /// tie-breaking are the engine's job.
    async fn recommendations_for(&self, person: &str) -> StoreResult<Vec<Recommendation>>;

    /// Raw group-by rows for the best-restaurant aggregation; the engine
    /// applies ordering and the strict-maximum second pass.
    async fn best_restaurants(&self, filter: &BestFilter) -> StoreResult<Vec<BestRow>>;

    async fn credentials(&self, login: &str) -> StoreResult<Option<StoredCredentials>>;

    async fn create_person(
        &self,
        name: &str,
        login: &str,
        password_hash: &str,
    ) -> StoreResult<CreateOutcome>;

    async fn add_friendship(&self, p1: &str, p2: &str) -> StoreResult<MutationOutcome>;

    async fn remove_friendship(&self, p1: &str, p2: &str) -> StoreResult<MutationOutcome>;

    async fn set_preference(
        &self,
        person: &str,
        restaurant: &str,
        preference: Preference,
    ) -> StoreResult<MutationOutcome>;
}
