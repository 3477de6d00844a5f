//! Result shapes returned by the recommendation engine.

use serde::{Deserialize, Serialize};

/// One restaurant row from a filtered restaurant search, grouped by
/// restaurant/cuisine/location with the distinct set of persons liking it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRow {
    pub restaurant: String,
    pub cuisine: String,
    pub location: String,
    pub likers: Vec<String>,
}

/// A restaurant recommended to a person by their friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub recommenders: Vec<String>,
    pub count: u64,
}

/// One group from the "best restaurant" aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestRow {
    pub restaurant: String,
    pub likers: Vec<String>,
    pub occurrence: u64,
}

/// Outcome of a credential check. The stored hash never leaves the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub name: Option<String>,
    pub authenticated: bool,
}
