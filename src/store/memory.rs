//! In-process [`GraphStore`] used for development and hermetic tests.
//!
//! Mirrors the Bolt backend's semantics over a plain adjacency model. Every
//! trait call takes the lock exactly once, so each write is atomic.

use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::core::model::{BestRow, Recommendation, RestaurantRow};
use crate::store::{
    BestFilter, CreateOutcome, GraphStore, MutationOutcome, Preference, RestaurantFilter,
    StoreResult, StoredCredentials,
};

#[derive(Debug, Clone)]
struct PersonRecord {
    login: String,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct RestaurantRecord {
    cuisine: String,
    location: String,
}

#[derive(Default)]
struct GraphData {
    persons: HashMap<String, PersonRecord>,
    restaurants: HashMap<String, RestaurantRecord>,
    /// Undirected IS_FRIEND_OF edges, stored as canonically ordered pairs.
    friendships: HashSet<(String, String)>,
    likes: HashSet<(String, String)>,
    dislikes: HashSet<(String, String)>,
}

fn pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl GraphData {
    fn are_friends(&self, a: &str, b: &str) -> bool {
        self.friendships.contains(&pair(a, b))
    }

    fn likers_of(&self, restaurant: &str) -> BTreeSet<String> {
        self.likes
            .iter()
            .filter(|(_, r)| r == restaurant)
            .map(|(p, _)| p.clone())
            .collect()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<GraphData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a restaurant with its reference edges. Restaurants have no
    /// creation operation in the service contract, so dev setups and tests
    /// seed them directly.
    pub fn add_restaurant(&self, name: &str, cuisine: &str, location: &str) {
        let mut data = self.data.write();
        data.restaurants.insert(
            name.to_string(),
            RestaurantRecord {
                cuisine: cuisine.to_string(),
                location: location.to_string(),
            },
        );
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn friends_of(&self, person: &str) -> StoreResult<Vec<String>> {
        let data = self.data.read();
        let friends = data
            .friendships
            .iter()
            .filter_map(|(a, b)| {
                if a == person {
                    Some(b.clone())
                } else if b == person {
                    Some(a.clone())
                } else {
                    None
                }
            })
            .collect();
        Ok(friends)
    }

    async fn non_friends_of(&self, person: &str) -> StoreResult<Vec<String>> {
        let data = self.data.read();
        if !data.persons.contains_key(person) {
            return Ok(Vec::new());
        }
        let strangers = data
            .persons
            .keys()
            .filter(|name| name.as_str() != person && !data.are_friends(name, person))
            .cloned()
            .collect();
        Ok(strangers)
    }

    async fn all_persons(&self) -> StoreResult<Vec<String>> {
        Ok(self.data.read().persons.keys().cloned().collect())
    }

    async fn restaurants(&self, filter: &RestaurantFilter) -> StoreResult<Vec<RestaurantRow>> {
        let data = self.data.read();
        let rows = data
            .restaurants
            .iter()
            .filter(|(name, record)| {
                filter
                    .cuisine
                    .as_ref()
                    .is_none_or(|c| &record.cuisine == c)
                    && filter
                        .location
                        .as_ref()
                        .is_none_or(|l| &record.location == l)
                    && filter
                        .person
                        .as_ref()
                        .is_none_or(|p| data.likes.contains(&(p.clone(), (*name).clone())))
            })
            .map(|(name, record)| RestaurantRow {
                restaurant: name.clone(),
                cuisine: record.cuisine.clone(),
                location: record.location.clone(),
                likers: data.likers_of(name).into_iter().collect(),
            })
            .collect();
        Ok(rows)
    }

    async fn recommendations_for(&self, person: &str) -> StoreResult<Vec<Recommendation>> {
        let data = self.data.read();
        let friends: Vec<&str> = data
            .friendships
            .iter()
            .filter_map(|(a, b)| {
                if a == person {
                    Some(b.as_str())
                } else if b == person {
                    Some(a.as_str())
                } else {
                    None
                }
            })
            .collect();

        let mut by_restaurant: HashMap<String, BTreeSet<String>> = HashMap::new();
        for friend in friends {
            for (liker, restaurant) in &data.likes {
                if liker != friend {
                    continue;
                }
                // Never recommend something the person already likes.
                if data.likes.contains(&(person.to_string(), restaurant.clone())) {
                    continue;
                }
                by_restaurant
                    .entry(restaurant.clone())
                    .or_default()
                    .insert(friend.to_string());
            }
        }

        let rows = by_restaurant
            .into_iter()
            .map(|(name, recommenders)| Recommendation {
                count: recommenders.len() as u64,
                recommenders: recommenders.into_iter().collect(),
                name,
            })
            .collect();
        Ok(rows)
    }

    async fn best_restaurants(&self, filter: &BestFilter) -> StoreResult<Vec<BestRow>> {
        let data = self.data.read();
        let rows = data
            .restaurants
            .iter()
            .filter(|(_, record)| {
                filter
                    .cuisine
                    .as_ref()
                    .is_none_or(|c| &record.cuisine == c)
                    && filter
                        .location
                        .as_ref()
                        .is_none_or(|l| &record.location == l)
            })
            .filter_map(|(name, _)| {
                let likers: BTreeSet<String> = data
                    .likers_of(name)
                    .into_iter()
                    .filter(|liker| {
                        filter.persons.is_empty() || filter.persons.contains(liker)
                    })
                    .collect();
                // Restaurants nobody (in scope) likes do not form a group.
                if likers.is_empty() {
                    return None;
                }
                Some(BestRow {
                    restaurant: name.clone(),
                    occurrence: likers.len() as u64,
                    likers: likers.into_iter().collect(),
                })
            })
            .collect();
        Ok(rows)
    }

    async fn credentials(&self, login: &str) -> StoreResult<Option<StoredCredentials>> {
        let data = self.data.read();
        let record = data
            .persons
            .iter()
            .find(|(_, person)| person.login == login)
            .map(|(name, person)| StoredCredentials {
                name: name.clone(),
                password_hash: person.password_hash.clone(),
            });
        Ok(record)
    }

    async fn create_person(
        &self,
        name: &str,
        login: &str,
        password_hash: &str,
    ) -> StoreResult<CreateOutcome> {
        let mut data = self.data.write();
        if data.persons.contains_key(name) || data.persons.values().any(|p| p.login == login) {
            return Ok(CreateOutcome::Conflict);
        }
        data.persons.insert(
            name.to_string(),
            PersonRecord {
                login: login.to_string(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(CreateOutcome::Created)
    }

    async fn add_friendship(&self, p1: &str, p2: &str) -> StoreResult<MutationOutcome> {
        let mut data = self.data.write();
        if !data.persons.contains_key(p1) || !data.persons.contains_key(p2) {
            return Ok(MutationOutcome::MissingEntity);
        }
        data.friendships.insert(pair(p1, p2));
        Ok(MutationOutcome::Applied)
    }

    async fn remove_friendship(&self, p1: &str, p2: &str) -> StoreResult<MutationOutcome> {
        let mut data = self.data.write();
        if !data.persons.contains_key(p1) || !data.persons.contains_key(p2) {
            return Ok(MutationOutcome::MissingEntity);
        }
        data.friendships.remove(&pair(p1, p2));
        Ok(MutationOutcome::Applied)
    }

    async fn set_preference(
        &self,
        person: &str,
        restaurant: &str,
        preference: Preference,
    ) -> StoreResult<MutationOutcome> {
        let mut data = self.data.write();
        if !data.persons.contains_key(person) || !data.restaurants.contains_key(restaurant) {
            return Ok(MutationOutcome::MissingEntity);
        }
        let key = (person.to_string(), restaurant.to_string());
        match preference {
            Preference::Likes => {
                data.dislikes.remove(&key);
                data.likes.insert(key);
            }
            Preference::Dislikes => {
                data.likes.remove(&key);
                data.dislikes.insert(key);
            }
        }
        Ok(MutationOutcome::Applied)
    }
}
