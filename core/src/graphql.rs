//! GraphQL documents and the request envelope for the Pokémon endpoint.
//!
//! The endpoint only supports lookups by name and paged listings; lookups by
//! id go to the REST endpoint instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GET_POKEMON_OPERATION: &str = "getPokemon";
pub const GET_POKEMONS_OPERATION: &str = "getPokemons";

pub const GET_POKEMON_QUERY: &str = r#"query getPokemon($name: String!) {
  pokemon(name: $name) {
    id
    name
    types {
      type {
        name
      }
    }
    abilities {
      ability {
        name
      }
    }
    message
    status
  }
}"#;

pub const GET_POKEMONS_QUERY: &str = r#"query getPokemons($limit: Int, $offset: Int) {
  pokemons(limit: $limit, offset: $offset) {
    count
    next
    previous
    status
    message
    results {
      url
      name
      image
    }
  }
}"#;

/// Body of a GraphQL POST.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub operation_name: String,
    pub query: String,
    pub variables: Value,
}

impl GraphqlRequest {
    pub fn new(operation_name: &str, query: &str, variables: Value) -> Self {
        Self {
            operation_name: operation_name.to_string(),
            query: query.to_string(),
            variables,
        }
    }
}

/// Standard GraphQL response envelope. `data` may be absent when `errors`
/// is present; some servers send `"errors": null` on success.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlErrorEntry>>,
}

impl<T> GraphqlResponse<T> {
    /// Messages of every reported error; empty when `errors` is missing or null.
    pub fn error_messages(&mut self) -> Vec<String> {
        self.errors
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.message)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlErrorEntry {
    pub message: String,
}
