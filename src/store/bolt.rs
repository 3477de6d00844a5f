//! Neo4j-backed [`GraphStore`] speaking Bolt through `neo4rs`.
//!
//! Each write operation is a single Cypher statement and therefore runs in
//! its own transaction on the server: either every mutation in the statement
//! persists or none does. Connection parameters come from configuration;
//! credentials are never compiled in.

use async_trait::async_trait;
use neo4rs::{query, Graph, Query, Row};
use tracing::{debug, warn};

use crate::core::model::{BestRow, Recommendation, RestaurantRow};
use crate::query::{self as templates, Param, Statement};
use crate::store::{
    BestFilter, CreateOutcome, GraphStore, MutationOutcome, Preference, RestaurantFilter,
    StoreError, StoreResult, StoredCredentials,
};

const SCHEMA_CONSTRAINTS: &[&str] = &[
    "CREATE CONSTRAINT person_name IF NOT EXISTS FOR (p:Person) REQUIRE p.name IS UNIQUE",
    "CREATE CONSTRAINT person_login IF NOT EXISTS FOR (p:Person) REQUIRE p.login IS UNIQUE",
    "CREATE CONSTRAINT restaurant_name IF NOT EXISTS FOR (r:Restaurant) REQUIRE r.name IS UNIQUE",
];

pub struct BoltStore {
    graph: Graph,
}

impl BoltStore {
    /// Connects to the graph database and installs uniqueness constraints.
    pub async fn connect(uri: &str, user: &str, password: &str) -> StoreResult<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        debug!(uri, "connected to graph store");

        let store = Self { graph };
        store.install_constraints().await;
        Ok(store)
    }

    async fn install_constraints(&self) {
        for constraint in SCHEMA_CONSTRAINTS {
            if let Err(e) = self.graph.run(query(constraint)).await {
                warn!(constraint, error = ?e, "constraint setup skipped");
            }
        }
    }

    fn to_query(stmt: Statement) -> Query {
        let mut q = query(&stmt.text);
        for (name, param) in stmt.params {
            q = match param {
                Param::Str(value) => q.param(name, value),
                Param::StrList(values) => q.param(name, values),
            };
        }
        q
    }

    async fn fetch(&self, stmt: Statement) -> StoreResult<Vec<Row>> {
        let mut stream = self
            .graph
            .execute(Self::to_query(stmt))
            .await
            .map_err(map_err)?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await.map_err(map_err)? {
            rows.push(row);
        }
        Ok(rows)
    }

    fn column_strings(rows: &[Row], column: &str) -> StoreResult<Vec<String>> {
        rows.iter()
            .map(|row| get_value::<String>(row, column))
            .collect()
    }
}

fn map_err(err: neo4rs::Error) -> StoreError {
    match &err {
        neo4rs::Error::ConnectionError => StoreError::Unavailable(format!("{err:?}")),
        _ => StoreError::Query(format!("{err:?}")),
    }
}

fn get_value<T: serde::de::DeserializeOwned>(row: &Row, column: &str) -> StoreResult<T> {
    row.get::<T>(column)
        .map_err(|e| StoreError::Corrupt(format!("column '{column}': {e:?}")))
}

fn mutation_outcome(rows: &[Row]) -> MutationOutcome {
    if rows.is_empty() {
        MutationOutcome::MissingEntity
    } else {
        MutationOutcome::Applied
    }
}

#[async_trait]
impl GraphStore for BoltStore {
    async fn friends_of(&self, person: &str) -> StoreResult<Vec<String>> {
        let rows = self.fetch(templates::friends_of(person)).await?;
        Self::column_strings(&rows, "name")
    }

    async fn non_friends_of(&self, person: &str) -> StoreResult<Vec<String>> {
        let rows = self.fetch(templates::non_friends_of(person)).await?;
        Self::column_strings(&rows, "name")
    }

    async fn all_persons(&self) -> StoreResult<Vec<String>> {
        let rows = self.fetch(templates::all_persons()).await?;
        Self::column_strings(&rows, "name")
    }

    async fn restaurants(&self, filter: &RestaurantFilter) -> StoreResult<Vec<RestaurantRow>> {
        let rows = self.fetch(templates::restaurants(filter)).await?;
        rows.iter()
            .map(|row| {
                Ok(RestaurantRow {
                    restaurant: get_value(row, "restaurant")?,
                    cuisine: get_value(row, "cuisine")?,
                    location: get_value(row, "location")?,
                    likers: get_value(row, "likers")?,
                })
            })
            .collect()
    }

    async fn recommendations_for(&self, person: &str) -> StoreResult<Vec<Recommendation>> {
        let rows = self.fetch(templates::recommendations_for(person)).await?;
        rows.iter()
            .map(|row| {
                Ok(Recommendation {
                    name: get_value(row, "name")?,
                    recommenders: get_value(row, "recommenders")?,
                    count: get_value::<i64>(row, "votes")? as u64,
                })
            })
            .collect()
    }

    async fn best_restaurants(&self, filter: &BestFilter) -> StoreResult<Vec<BestRow>> {
        let rows = self.fetch(templates::best_restaurants(filter)).await?;
        rows.iter()
            .map(|row| {
                Ok(BestRow {
                    restaurant: get_value(row, "restaurant")?,
                    likers: get_value(row, "likers")?,
                    occurrence: get_value::<i64>(row, "occurrence")? as u64,
                })
            })
            .collect()
    }

    async fn credentials(&self, login: &str) -> StoreResult<Option<StoredCredentials>> {
        let rows = self.fetch(templates::credentials_by_login(login)).await?;
        match rows.first() {
            None => Ok(None),
            Some(row) => Ok(Some(StoredCredentials {
                name: get_value(row, "name")?,
                password_hash: get_value(row, "password_hash")?,
            })),
        }
    }

    async fn create_person(
        &self,
        name: &str,
        login: &str,
        password_hash: &str,
    ) -> StoreResult<CreateOutcome> {
        let rows = self
            .fetch(templates::create_person(name, login, password_hash))
            .await?;
        if rows.is_empty() {
            Ok(CreateOutcome::Conflict)
        } else {
            Ok(CreateOutcome::Created)
        }
    }

    async fn add_friendship(&self, p1: &str, p2: &str) -> StoreResult<MutationOutcome> {
        let rows = self.fetch(templates::add_friendship(p1, p2)).await?;
        Ok(mutation_outcome(&rows))
    }

    async fn remove_friendship(&self, p1: &str, p2: &str) -> StoreResult<MutationOutcome> {
        let rows = self.fetch(templates::remove_friendship(p1, p2)).await?;
        Ok(mutation_outcome(&rows))
    }

    async fn set_preference(
        &self,
        person: &str,
        restaurant: &str,
        preference: Preference,
    ) -> StoreResult<MutationOutcome> {
        let rows = self
            .fetch(templates::set_preference(person, restaurant, preference))
            .await?;
        Ok(mutation_outcome(&rows))
    }
}
