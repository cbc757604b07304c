//! Stateless HTTP request builder and response parser for the Pokémon APIs.
//!
//! # Design
//! `PokeApiClient` holds only its `ClientConfig` and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`, so the core stays deterministic and free of I/O.
//!
//! Transport selection lives here: lookups by name and page listings go to
//! the GraphQL endpoint, lookups by id go to the REST endpoint. Parsers
//! validate the upstream shape, tag it as a `SourceRecord` and normalize it
//! immediately.

use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

use crate::config::ClientConfig;
use crate::error::{ApiError, Lookup};
use crate::graphql::{
    GraphqlRequest, GraphqlResponse, GET_POKEMONS_OPERATION, GET_POKEMONS_QUERY,
    GET_POKEMON_OPERATION, GET_POKEMON_QUERY,
};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    GraphqlPageData, GraphqlPokemon, GraphqlPokemonData, Pokemon, PokemonSummary, RestPokemon,
    SourceRecord,
};

/// Synchronous, stateless client for the GraphQL and REST Pokémon APIs.
#[derive(Debug, Clone, Default)]
pub struct PokeApiClient {
    config: ClientConfig,
}

impl PokeApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // By name (GraphQL)
    // -----------------------------------------------------------------------

    /// The name is sent lowercased, so lookups are case-insensitive.
    pub fn build_pokemon_by_name(&self, name: &str) -> Result<HttpRequest, ApiError> {
        let name = normalize_name(name)?;
        self.graphql_request(GraphqlRequest::new(
            GET_POKEMON_OPERATION,
            GET_POKEMON_QUERY,
            json!({ "name": name }),
        ))
    }

    pub fn parse_pokemon_by_name(&self, name: &str, response: HttpResponse) -> Result<Pokemon, ApiError> {
        let lookup = || Lookup::Name(name.to_string());

        check_status(&response, 200).map_err(|e| e.into_not_found(lookup()))?;
        let data: GraphqlPokemonData =
            decode_graphql(&response).map_err(|e| e.into_not_found(lookup()))?;
        let payload = data.pokemon.ok_or_else(|| ApiError::NotFound {
            lookup: lookup(),
            cause: None,
        })?;
        let record = GraphqlPokemon::from_payload(payload).map_err(|e| e.into_not_found(lookup()))?;

        Ok(SourceRecord::Graphql(record).into())
    }

    // -----------------------------------------------------------------------
    // By id (REST)
    // -----------------------------------------------------------------------

    pub fn build_pokemon_by_id(&self, id: u32) -> Result<HttpRequest, ApiError> {
        if id == 0 {
            return Err(ApiError::InvalidInput("Pokémon id must be positive".to_string()));
        }
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/pokemon/{id}", self.config.rest_base_url.trim_end_matches('/')),
            headers: Vec::new(),
            body: None,
        })
    }

    /// Any non-200 answer from the REST endpoint counts as "not found".
    pub fn parse_pokemon_by_id(&self, id: u32, response: HttpResponse) -> Result<Pokemon, ApiError> {
        check_status(&response, 200).map_err(|e| e.into_not_found(Lookup::Id(id)))?;
        let record: RestPokemon = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()).into_not_found(Lookup::Id(id)))?;

        Ok(SourceRecord::Rest(record).into())
    }

    // -----------------------------------------------------------------------
    // Pages (GraphQL)
    // -----------------------------------------------------------------------

    pub fn build_pokemons_page(&self, limit: u32, offset: u32) -> Result<HttpRequest, ApiError> {
        self.graphql_request(GraphqlRequest::new(
            GET_POKEMONS_OPERATION,
            GET_POKEMONS_QUERY,
            json!({ "limit": limit, "offset": offset }),
        ))
    }

    /// Summary entries in upstream order. Entries whose URL carries no
    /// numeric id are kept with `id: None`.
    pub fn parse_pokemons_page(&self, response: HttpResponse) -> Result<Vec<PokemonSummary>, ApiError> {
        check_status(&response, 200).map_err(ApiError::into_page_unavailable)?;
        let data: GraphqlPageData = decode_graphql(&response).map_err(ApiError::into_page_unavailable)?;
        let page = data.pokemons.ok_or_else(|| {
            ApiError::DeserializationError("response has no `pokemons` field".to_string())
                .into_page_unavailable()
        })?;
        if page.status == Some(false) {
            let message = page
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "page lookup failed".to_string());
            return Err(ApiError::Upstream(message).into_page_unavailable());
        }

        Ok(page
            .results
            .unwrap_or_default()
            .into_iter()
            .map(PokemonSummary::from)
            .collect())
    }

    // -----------------------------------------------------------------------
    // Randomness
    // -----------------------------------------------------------------------

    /// Uniform id in `[1, max_random_id]`.
    pub fn pick_random_id<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<u32, ApiError> {
        let max = self.config.max_random_id;
        if max == 0 {
            return Err(ApiError::InvalidInput("max_random_id must be positive".to_string()));
        }
        Ok(rng.random_range(1..=max))
    }

    /// Uniform offset in `[0, random_offset_span)`; `0` when the span is empty.
    pub fn pick_random_offset<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        match self.config.random_offset_span {
            0 => 0,
            span => rng.random_range(0..span),
        }
    }

    fn graphql_request(&self, body: GraphqlRequest) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.config.graphql_url.clone(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Uniformly shuffle `items` (Fisher–Yates) and keep the first `count`.
pub fn shuffle_and_take<T, R: Rng + ?Sized>(mut items: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items.truncate(count);
    items
}

fn normalize_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput("Pokémon name must not be empty".to_string()));
    }
    Ok(trimmed.to_lowercase())
}

/// Map a non-`expected` status to `ApiError::HttpError`.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Decode a GraphQL envelope, surfacing `errors` and a missing `data`.
fn decode_graphql<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    let mut envelope: GraphqlResponse<T> =
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    let errors = envelope.error_messages();
    if !errors.is_empty() {
        return Err(ApiError::GraphqlError(errors));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::DeserializationError("response has no `data` field".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::error::Error;

    fn client() -> PokeApiClient {
        PokeApiClient::new(ClientConfig::for_host("http://localhost:3000"))
    }

    fn body_json(req: &HttpRequest) -> serde_json::Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn build_pokemon_by_name_produces_graphql_post() {
        let req = client().build_pokemon_by_name("Pikachu").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/graphql");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body = body_json(&req);
        assert_eq!(body["operationName"], "getPokemon");
        assert_eq!(body["variables"], json!({ "name": "pikachu" }));
    }

    #[test]
    fn build_pokemon_by_name_is_case_insensitive() {
        let c = client();
        let upper = c.build_pokemon_by_name("PIKACHU").unwrap();
        let lower = c.build_pokemon_by_name("pikachu").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn build_pokemon_by_name_rejects_blank() {
        let err = client().build_pokemon_by_name("   ").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn build_pokemon_by_id_targets_rest() {
        let req = client().build_pokemon_by_id(25).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/v2/pokemon/25");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_pokemon_by_id_rejects_zero() {
        assert!(matches!(
            client().build_pokemon_by_id(0).unwrap_err(),
            ApiError::InvalidInput(_)
        ));
    }

    #[test]
    fn build_pokemons_page_sends_limit_and_offset() {
        let req = client().build_pokemons_page(12, 40).unwrap();
        let body = body_json(&req);
        assert_eq!(body["operationName"], "getPokemons");
        assert_eq!(body["variables"], json!({ "limit": 12, "offset": 40 }));
    }

    #[test]
    fn parse_pokemon_by_name_success() {
        let response = HttpResponse::new(
            200,
            r#"{"data":{"pokemon":{"id":25,"name":"pikachu",
                "types":[{"type":{"name":"electric"}}],
                "abilities":[{"ability":{"name":"static"}},{"ability":{"name":"lightning-rod"}}],
                "message":"","status":true}}}"#,
        );
        let pokemon = client().parse_pokemon_by_name("pikachu", response).unwrap();
        assert_eq!(pokemon.id, 25);
        assert_eq!(pokemon.types, vec!["electric"]);
        assert_eq!(pokemon.abilities, vec!["static", "lightning-rod"]);
        assert_eq!(pokemon.height, 0);
    }

    #[test]
    fn parse_pokemon_by_name_status_false_is_not_found() {
        let response = HttpResponse::new(
            200,
            r#"{"data":{"pokemon":{"id":null,"name":null,"types":null,"abilities":null,
                "message":"Not Found","status":false}}}"#,
        );
        let err = client().parse_pokemon_by_name("MissingNo", response).unwrap_err();
        assert!(err.to_string().contains("MissingNo"));
        match &err {
            ApiError::NotFound { lookup, cause } => {
                assert_eq!(lookup, &Lookup::Name("MissingNo".to_string()));
                assert!(matches!(cause.as_deref(), Some(ApiError::Upstream(_))));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_pokemon_by_name_graphql_errors_are_chained() {
        let response = HttpResponse::new(200, r#"{"data":null,"errors":[{"message":"boom"}]}"#);
        let err = client().parse_pokemon_by_name("pikachu", response).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.source().unwrap().to_string(), "GraphQL error: boom");
    }

    #[test]
    fn parse_pokemon_by_name_accepts_null_errors() {
        let response = HttpResponse::new(
            200,
            r#"{"data":{"pokemon":{"id":25,"name":"pikachu",
                "types":[{"type":{"name":"electric"}}],"abilities":[],
                "message":"","status":true}},"errors":null}"#,
        );
        let pokemon = client().parse_pokemon_by_name("pikachu", response).unwrap();
        assert_eq!(pokemon.id, 25);
        assert_eq!(pokemon.types, vec!["electric"]);
    }

    #[test]
    fn parse_pokemon_by_name_null_record_is_not_found() {
        let response = HttpResponse::new(200, r#"{"data":{"pokemon":null}}"#);
        let err = client().parse_pokemon_by_name("pikachu", response).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.source().is_none());
    }

    #[test]
    fn parse_pokemon_by_id_success_defaults_null_experience() {
        let response = HttpResponse::new(
            200,
            r#"{"id":132,"name":"ditto","height":3,"weight":40,"base_experience":null,
                "sprites":{"front_default":"https://example.com/ignored.png"},
                "types":[{"slot":1,"type":{"name":"normal","url":"https://pokeapi.co/api/v2/type/1/"}}],
                "abilities":[{"ability":{"name":"limber","url":""},"is_hidden":false,"slot":1}]}"#,
        );
        let pokemon = client().parse_pokemon_by_id(132, response).unwrap();
        assert_eq!(pokemon.name, "ditto");
        assert_eq!(pokemon.base_experience, 0);
        assert_eq!(pokemon.weight, 40);
        assert!(pokemon.sprites.front_default.ends_with("/132.png"));
    }

    #[test]
    fn parse_pokemon_by_id_non_success_is_not_found() {
        for status in [404, 500] {
            let err = client()
                .parse_pokemon_by_id(9999, HttpResponse::new(status, "Not Found"))
                .unwrap_err();
            assert!(err.is_not_found(), "status {status}");
            assert!(err.to_string().contains("9999"));
            assert!(matches!(
                err.source().and_then(|s| s.downcast_ref::<ApiError>()),
                Some(ApiError::HttpError { status: s, .. }) if *s == status
            ));
        }
    }

    #[test]
    fn parse_pokemon_by_id_bad_json() {
        let err = client()
            .parse_pokemon_by_id(1, HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::NotFound { cause: Some(ref c), .. } if matches!(**c, ApiError::DeserializationError(_))
        ));
    }

    #[test]
    fn parse_pokemons_page_extracts_ids() {
        let response = HttpResponse::new(
            200,
            r#"{"data":{"pokemons":{"count":151,"next":null,"previous":null,"status":true,"message":"",
                "results":[
                    {"url":"https://pokeapi.co/api/v2/pokemon/25/","name":"pikachu","image":"a.png"},
                    {"url":"https://pokeapi.co/api/v2/pokemon/mew","name":"mew","image":"b.png"}
                ]}}}"#,
        );
        let page = client().parse_pokemons_page(response).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, Some(25));
        assert_eq!(page[0].image, "a.png");
        assert_eq!(page[1].id, None);
    }

    #[test]
    fn parse_pokemons_page_failure_is_page_unavailable() {
        let err = client()
            .parse_pokemons_page(HttpResponse::new(502, "bad gateway"))
            .unwrap_err();
        assert!(matches!(err, ApiError::PageUnavailable { .. }));
        assert_eq!(err.source().unwrap().to_string(), "HTTP 502: bad gateway");
    }

    #[test]
    fn random_id_stays_in_configured_range() {
        let c = client();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let id = c.pick_random_id(&mut rng).unwrap();
            assert!((1..=151).contains(&id), "id {id} out of range");
        }
    }

    #[test]
    fn random_id_respects_custom_ceiling() {
        let c = PokeApiClient::new(ClientConfig::default().with_max_random_id(3));
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[c.pick_random_id(&mut rng).unwrap() as usize] = true;
        }
        assert_eq!(seen, [false, true, true, true]);
    }

    #[test]
    fn random_offset_stays_below_span() {
        let c = client();
        let mut rng = StdRng::seed_from_u64(3);
        assert!((0..500).all(|_| c.pick_random_offset(&mut rng) < 100));

        let empty = PokeApiClient::new(ClientConfig::default().with_random_offset_span(0));
        assert_eq!(empty.pick_random_offset(&mut rng), 0);
    }

    #[test]
    fn shuffle_and_take_keeps_a_subset() {
        let mut rng = StdRng::seed_from_u64(11);
        let picked = shuffle_and_take((1..=12).collect::<Vec<u32>>(), 6, &mut rng);
        assert_eq!(picked.len(), 6);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 6);
        assert!(picked.iter().all(|n| (1..=12).contains(n)));
    }

    #[test]
    fn shuffle_and_take_with_short_input_returns_everything() {
        let mut rng = StdRng::seed_from_u64(5);
        let picked = shuffle_and_take(vec!["a", "b"], 6, &mut rng);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn shuffle_is_roughly_uniform_over_first_slot() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 4];
        for _ in 0..8_000 {
            let first = shuffle_and_take(vec![0usize, 1, 2, 3], 1, &mut rng)[0];
            counts[first] += 1;
        }
        // Expected 2000 each.
        assert!(counts.iter().all(|&c| (1_700..=2_300).contains(&c)), "{counts:?}");
    }
}
