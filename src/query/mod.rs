//! Query Builder: precompiled graph-pattern templates for the Bolt backend.
//!
//! Every template is assembled from fixed fragments selected by filter
//! presence. User-supplied values travel exclusively as bound parameters;
//! they never appear in query text.

use crate::store::{BestFilter, Preference, RestaurantFilter};

/// A bound query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Str(String),
    StrList(Vec<String>),
}

/// A parameterized graph query, ready for the store client to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub text: String,
    pub params: Vec<(&'static str, Param)>,
}

impl Statement {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    fn bind_str(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, Param::Str(value.into())));
        self
    }

    fn bind_list(mut self, name: &'static str, values: Vec<String>) -> Self {
        self.params.push((name, Param::StrList(values)));
        self
    }
}

// Pattern fragments. An absent filter keeps the label-only node so the
// relationship type alone constrains the match; a present filter adds an
// exact-match property bound to a parameter.
const CUISINE_ANY: &str = "(cuisine:Cuisine)";
const CUISINE_NAMED: &str = "(cuisine:Cuisine {name: $cuisine})";
const LOCATION_ANY: &str = "(location:Location)";
const LOCATION_NAMED: &str = "(location:Location {name: $location})";

fn cuisine_fragment(filter: Option<&str>) -> &'static str {
    if filter.is_some() {
        CUISINE_NAMED
    } else {
        CUISINE_ANY
    }
}

fn location_fragment(filter: Option<&str>) -> &'static str {
    if filter.is_some() {
        LOCATION_NAMED
    } else {
        LOCATION_ANY
    }
}

pub fn friends_of(person: &str) -> Statement {
    Statement::new(
        "MATCH (:Person {name: $person})-[:IS_FRIEND_OF]-(friend:Person) \
         RETURN DISTINCT friend.name AS name",
    )
    .bind_str("person", person)
}

pub fn non_friends_of(person: &str) -> Statement {
    Statement::new(
        "MATCH (other:Person), (me:Person {name: $person}) \
         WHERE other.name <> $person AND NOT (other)-[:IS_FRIEND_OF]-(me) \
         RETURN other.name AS name",
    )
    .bind_str("person", person)
}

pub fn all_persons() -> Statement {
    Statement::new("MATCH (p:Person) RETURN p.name AS name")
}

pub fn restaurants(filter: &RestaurantFilter) -> Statement {
    let person_clause = if filter.person.is_some() {
        ", (:Person {name: $person})-[:LIKES]->(restaurant)"
    } else {
        ""
    };
    let text = format!(
        "MATCH (restaurant:Restaurant)-[:LOCATED_IN]->{location}, \
         (restaurant)-[:SERVES]->{cuisine}{person_clause} \
         OPTIONAL MATCH (liker:Person)-[:LIKES]->(restaurant) \
         RETURN restaurant.name AS restaurant, cuisine.name AS cuisine, \
         location.name AS location, collect(DISTINCT liker.name) AS likers",
        location = location_fragment(filter.location.as_deref()),
        cuisine = cuisine_fragment(filter.cuisine.as_deref()),
    );

    let mut stmt = Statement::new(text);
    if let Some(cuisine) = &filter.cuisine {
        stmt = stmt.bind_str("cuisine", cuisine.clone());
    }
    if let Some(location) = &filter.location {
        stmt = stmt.bind_str("location", location.clone());
    }
    if let Some(person) = &filter.person {
        stmt = stmt.bind_str("person", person.clone());
    }
    stmt
}

pub fn recommendations_for(person: &str) -> Statement {
    Statement::new(
        "MATCH (me:Person {name: $person})-[:IS_FRIEND_OF]-(friend:Person), \
         (friend)-[:LIKES]->(restaurant:Restaurant) \
         WHERE NOT (me)-[:LIKES]->(restaurant) \
         RETURN restaurant.name AS name, \
         collect(DISTINCT friend.name) AS recommenders, \
         count(DISTINCT friend) AS votes",
    )
    .bind_str("person", person)
}

pub fn best_restaurants(filter: &BestFilter) -> Statement {
    // An empty person list means no person filtering at all.
    let person_clause = if filter.persons.is_empty() {
        ""
    } else {
        " WHERE person.name IN $persons"
    };
    let text = format!(
        "MATCH (restaurant:Restaurant)-[:LOCATED_IN]->{location}, \
         (restaurant)-[:SERVES]->{cuisine}, \
         (person:Person)-[:LIKES]->(restaurant){person_clause} \
         RETURN restaurant.name AS restaurant, \
         collect(DISTINCT person.name) AS likers, \
         count(DISTINCT person) AS occurrence",
        location = location_fragment(filter.location.as_deref()),
        cuisine = cuisine_fragment(filter.cuisine.as_deref()),
    );

    let mut stmt = Statement::new(text);
    if let Some(cuisine) = &filter.cuisine {
        stmt = stmt.bind_str("cuisine", cuisine.clone());
    }
    if let Some(location) = &filter.location {
        stmt = stmt.bind_str("location", location.clone());
    }
    if !filter.persons.is_empty() {
        stmt = stmt.bind_list("persons", filter.persons.clone());
    }
    stmt
}

pub fn credentials_by_login(login: &str) -> Statement {
    Statement::new(
        "MATCH (p:Person {login: $login}) \
         RETURN p.name AS name, p.password_hash AS password_hash",
    )
    .bind_str("login", login)
}

/// Creates a Person only when neither the name nor the login is taken.
/// Returns zero rows on conflict; the check and the create share one
/// transaction so concurrent creates cannot race past it.
pub fn create_person(name: &str, login: &str, password_hash: &str) -> Statement {
    Statement::new(
        "OPTIONAL MATCH (existing:Person) \
         WHERE existing.name = $name OR existing.login = $login \
         WITH count(existing) AS conflicts \
         WHERE conflicts = 0 \
         CREATE (p:Person {name: $name, login: $login, password_hash: $password_hash}) \
         RETURN p.name AS name",
    )
    .bind_str("name", name)
    .bind_str("login", login)
    .bind_str("password_hash", password_hash)
}

/// Friendship is undirected: a single edge per unordered pair, merged and
/// matched without direction. MERGE makes repeated calls a no-op.
pub fn add_friendship(p1: &str, p2: &str) -> Statement {
    Statement::new(
        "MATCH (a:Person {name: $p1}), (b:Person {name: $p2}) \
         MERGE (a)-[:IS_FRIEND_OF]-(b) \
         RETURN a.name AS name",
    )
    .bind_str("p1", p1)
    .bind_str("p2", p2)
}

/// Removing a friendship that does not exist is a no-op, but both persons
/// must exist (zero rows means a missing person).
pub fn remove_friendship(p1: &str, p2: &str) -> Statement {
    Statement::new(
        "MATCH (a:Person {name: $p1}), (b:Person {name: $p2}) \
         OPTIONAL MATCH (a)-[r:IS_FRIEND_OF]-(b) \
         DELETE r \
         RETURN a.name AS name",
    )
    .bind_str("p1", p1)
    .bind_str("p2", p2)
}

/// Flips a (Person, Restaurant) pair to the target preference in one
/// statement: drop the opposite edge, then idempotently ensure the target
/// edge. Keeps the pair from ever holding LIKES and DISLIKES at once.
pub fn set_preference(person: &str, restaurant: &str, preference: Preference) -> Statement {
    let text = match preference {
        Preference::Likes => {
            "MATCH (p:Person {name: $person}), (r:Restaurant {name: $restaurant}) \
             OPTIONAL MATCH (p)-[opposite:DISLIKES]->(r) \
             DELETE opposite \
             MERGE (p)-[:LIKES]->(r) \
             RETURN p.name AS name"
        }
        Preference::Dislikes => {
            "MATCH (p:Person {name: $person}), (r:Restaurant {name: $restaurant}) \
             OPTIONAL MATCH (p)-[opposite:LIKES]->(r) \
             DELETE opposite \
             MERGE (p)-[:DISLIKES]->(r) \
             RETURN p.name AS name"
        }
    };
    Statement::new(text)
        .bind_str("person", person)
        .bind_str("restaurant", restaurant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param_names(stmt: &Statement) -> Vec<&'static str> {
        stmt.params.iter().map(|(name, _)| *name).collect()
    }

    #[test]
    fn restaurants_without_filters_uses_wildcard_fragments() {
        let stmt = restaurants(&RestaurantFilter::default());
        assert!(stmt.text.contains("(cuisine:Cuisine)"));
        assert!(stmt.text.contains("(location:Location)"));
        assert!(!stmt.text.contains("$cuisine"));
        assert!(!stmt.text.contains("$location"));
        assert!(!stmt.text.contains("$person"));
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn restaurants_with_all_filters_binds_parameters() {
        let filter = RestaurantFilter {
            cuisine: Some("italian".into()),
            location: Some("warsaw".into()),
            person: Some("ann".into()),
        };
        let stmt = restaurants(&filter);
        assert!(stmt.text.contains("{name: $cuisine}"));
        assert!(stmt.text.contains("{name: $location}"));
        assert!(stmt.text.contains("{name: $person}"));
        assert_eq!(param_names(&stmt), vec!["cuisine", "location", "person"]);
    }

    #[test]
    fn filter_values_never_appear_in_query_text() {
        let filter = RestaurantFilter {
            cuisine: Some("italian') DETACH DELETE (n".into()),
            location: Some("warsaw".into()),
            person: Some("ann".into()),
        };
        let stmt = restaurants(&filter);
        assert!(!stmt.text.contains("italian"));
        assert!(!stmt.text.contains("warsaw"));
        assert!(!stmt.text.contains("ann"));
    }

    #[test]
    fn best_with_empty_person_list_has_no_in_clause() {
        let stmt = best_restaurants(&BestFilter::default());
        assert!(!stmt.text.contains("IN $persons"));
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn best_with_person_list_binds_the_list() {
        let filter = BestFilter {
            persons: vec!["ann".into(), "bob".into()],
            ..BestFilter::default()
        };
        let stmt = best_restaurants(&filter);
        assert!(stmt.text.contains("WHERE person.name IN $persons"));
        assert_eq!(
            stmt.params,
            vec![(
                "persons",
                Param::StrList(vec!["ann".into(), "bob".into()])
            )]
        );
    }

    #[test]
    fn friendship_statements_are_undirected() {
        let add = add_friendship("ann", "bob");
        let remove = remove_friendship("ann", "bob");
        assert!(add.text.contains("-[:IS_FRIEND_OF]-"));
        assert!(!add.text.contains("-[:IS_FRIEND_OF]->"));
        assert!(remove.text.contains("-[r:IS_FRIEND_OF]-"));
    }

    #[test]
    fn set_preference_removes_the_opposite_edge() {
        let like = set_preference("ann", "pasta", Preference::Likes);
        assert!(like.text.contains("[opposite:DISLIKES]"));
        assert!(like.text.contains("MERGE (p)-[:LIKES]->(r)"));

        let dislike = set_preference("ann", "pasta", Preference::Dislikes);
        assert!(dislike.text.contains("[opposite:LIKES]"));
        assert!(dislike.text.contains("MERGE (p)-[:DISLIKES]->(r)"));
    }
}
