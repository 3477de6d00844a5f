//! Recommendation Engine: the domain operations behind the HTTP contract.
//!
//! Generic over the [`GraphStore`] backend. The engine validates inputs,
//! maps store outcomes onto the error taxonomy, owns credential hashing, and
//! applies deterministic ordering (count descending, restaurant name
//! ascending) so both backends agree on results.

use std::sync::Arc;

use tokio::task;

use crate::core::error::{CoreError, CoreResult};
use crate::core::model::{BestRow, LoginOutcome, Recommendation, RestaurantRow};
use crate::store::{
    BestFilter, CreateOutcome, GraphStore, MutationOutcome, Preference, RestaurantFilter,
};

pub struct Recommender<S> {
    store: Arc<S>,
}

impl<S> Clone for Recommender<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

fn required<'a>(value: &'a str, field: &str) -> CoreResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CoreError::Validation(format!(
            "field '{field}' must not be blank"
        )))
    } else {
        Ok(trimmed)
    }
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

impl<S: GraphStore> Recommender<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn find_friends(&self, person: &str) -> CoreResult<Vec<String>> {
        let person = required(person, "person")?;
        Ok(sorted(self.store.friends_of(person).await?))
    }

    pub async fn find_non_friends(&self, person: &str) -> CoreResult<Vec<String>> {
        let person = required(person, "person")?;
        Ok(sorted(self.store.non_friends_of(person).await?))
    }

    pub async fn find_all_persons(&self) -> CoreResult<Vec<String>> {
        Ok(sorted(self.store.all_persons().await?))
    }

    pub async fn find_restaurants(
        &self,
        filter: RestaurantFilter,
    ) -> CoreResult<Vec<RestaurantRow>> {
        let mut rows = self.store.restaurants(&filter).await?;
        for row in &mut rows {
            row.likers.sort();
        }
        rows.sort_by(|a, b| a.restaurant.cmp(&b.restaurant));
        Ok(rows)
    }

    pub async fn find_recommendations(&self, person: &str) -> CoreResult<Vec<Recommendation>> {
        let person = required(person, "person")?;
        let mut rows = self.store.recommendations_for(person).await?;
        for row in &mut rows {
            row.recommenders.sort();
        }
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        Ok(rows)
    }

    /// Group-by is the store's pass; the strict-maximum filter is the second
    /// pass here, shared by both backends.
    pub async fn find_best(
        &self,
        filter: BestFilter,
        strict_max: bool,
    ) -> CoreResult<Vec<BestRow>> {
        let mut rows = self.store.best_restaurants(&filter).await?;
        for row in &mut rows {
            row.likers.sort();
        }
        rows.sort_by(|a, b| {
            b.occurrence
                .cmp(&a.occurrence)
                .then_with(|| a.restaurant.cmp(&b.restaurant))
        });
        if strict_max {
            let max = rows.first().map(|row| row.occurrence).unwrap_or(0);
            rows.retain(|row| row.occurrence == max);
        }
        Ok(rows)
    }

    /// Checks a login/password pair against the stored bcrypt hash. An
    /// unknown login is a negative outcome, not an error, and the stored
    /// hash is never part of the result.
    pub async fn verify_login(&self, login: &str, password: &str) -> CoreResult<LoginOutcome> {
        let login = required(login, "login")?;
        let password = required(password, "password")?.to_string();

        let Some(stored) = self.store.credentials(login).await? else {
            return Ok(LoginOutcome {
                name: None,
                authenticated: false,
            });
        };

        let hash = stored.password_hash.clone();
        let authenticated =
            task::spawn_blocking(move || bcrypt::verify(&password, &hash).unwrap_or(false))
                .await
                .map_err(|e| CoreError::Internal(format!("verify task failed: {e}")))?;

        Ok(LoginOutcome {
            name: authenticated.then_some(stored.name),
            authenticated,
        })
    }

    pub async fn create_user(
        &self,
        name: &str,
        login: &str,
        password: &str,
    ) -> CoreResult<String> {
        let name = required(name, "name")?;
        let login = required(login, "login")?;
        let password = required(password, "password")?.to_string();

        let hash = task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| CoreError::Internal(format!("hashing task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("password hashing failed: {e}")))?;

        match self.store.create_person(name, login, &hash).await? {
            CreateOutcome::Created => Ok(name.to_string()),
            CreateOutcome::Conflict => Err(CoreError::Conflict(format!(
                "a person with name '{name}' or login '{login}' already exists"
            ))),
        }
    }

    pub async fn make_friends(&self, p1: &str, p2: &str) -> CoreResult<()> {
        let p1 = required(p1, "p1")?;
        let p2 = required(p2, "p2")?;
        if p1 == p2 {
            return Err(CoreError::Validation(
                "cannot befriend yourself".to_string(),
            ));
        }
        match self.store.add_friendship(p1, p2).await? {
            MutationOutcome::Applied => Ok(()),
            MutationOutcome::MissingEntity => Err(CoreError::NotFound(format!(
                "person '{p1}' or '{p2}' does not exist"
            ))),
        }
    }

    pub async fn delete_friends(&self, p1: &str, p2: &str) -> CoreResult<()> {
        let p1 = required(p1, "p1")?;
        let p2 = required(p2, "p2")?;
        match self.store.remove_friendship(p1, p2).await? {
            MutationOutcome::Applied => Ok(()),
            MutationOutcome::MissingEntity => Err(CoreError::NotFound(format!(
                "person '{p1}' or '{p2}' does not exist"
            ))),
        }
    }

    pub async fn like_restaurant(&self, person: &str, restaurant: &str) -> CoreResult<()> {
        self.set_preference(person, restaurant, Preference::Likes)
            .await
    }

    pub async fn dislike_restaurant(&self, person: &str, restaurant: &str) -> CoreResult<()> {
        self.set_preference(person, restaurant, Preference::Dislikes)
            .await
    }

    async fn set_preference(
        &self,
        person: &str,
        restaurant: &str,
        preference: Preference,
    ) -> CoreResult<()> {
        let person = required(person, "person")?;
        let restaurant = required(restaurant, "restaurant")?;
        match self
            .store
            .set_preference(person, restaurant, preference)
            .await?
        {
            MutationOutcome::Applied => Ok(()),
            MutationOutcome::MissingEntity => Err(CoreError::NotFound(format!(
                "person '{person}' or restaurant '{restaurant}' does not exist"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn engine() -> Recommender<MemoryStore> {
        Recommender::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn blank_person_is_a_validation_error() {
        let err = engine().find_friends("   ").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn self_friendship_is_rejected() {
        let err = engine().make_friends("ann", "ann").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn befriending_unknown_person_is_not_found() {
        let err = engine().make_friends("ann", "bob").await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_login_is_a_negative_outcome_not_an_error() {
        let outcome = engine().verify_login("unknown", "pw").await.unwrap();
        assert_eq!(
            outcome,
            LoginOutcome {
                name: None,
                authenticated: false
            }
        );
    }
}
