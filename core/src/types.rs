//! Upstream wire shapes and the normalized records callers consume.
//!
//! # Design
//! The GraphQL and REST upstreams describe the same Pokémon with different
//! JSON. Each shape has its own struct here and only lives long enough to be
//! validated and wrapped in `SourceRecord`, which `normalize` turns into a
//! `Pokemon`. Nothing outside this crate ever sees a wire shape.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Normalized records
// ---------------------------------------------------------------------------

/// The single Pokémon shape every caller depends on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub base_experience: u32,
    pub sprites: Sprites,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
}

/// Image URLs derived from the Pokémon id, never copied from a payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sprites {
    pub front_default: String,
    pub official_artwork: String,
}

/// Lightweight page-listing entry. `id` is `None` when the entry URL has no
/// trailing numeric segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonSummary {
    pub id: Option<u32>,
    pub name: String,
    pub image: String,
}

// ---------------------------------------------------------------------------
// GraphQL shapes
// ---------------------------------------------------------------------------

/// `data` of a `getPokemon` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlPokemonData {
    pub pokemon: Option<GraphqlPokemonPayload>,
}

/// `pokemon` as sent by the GraphQL endpoint. A failed lookup still answers
/// 200, with `status: false`, a `message` and null `id`/`name`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlPokemonPayload {
    pub id: Option<u32>,
    pub name: Option<String>,
    #[serde(default)]
    pub types: Option<Vec<GraphqlTypeSlot>>,
    #[serde(default)]
    pub abilities: Option<Vec<GraphqlAbilitySlot>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GraphqlTypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GraphqlAbilitySlot {
    pub ability: NamedRef,
}

/// A GraphQL record that passed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphqlPokemon {
    pub id: u32,
    pub name: String,
    pub types: Vec<GraphqlTypeSlot>,
    pub abilities: Vec<GraphqlAbilitySlot>,
}

/// `data` of a `getPokemons` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlPageData {
    pub pokemons: Option<GraphqlPage>,
}

/// `pokemons` of a page response. `count`, `next` and `previous` are
/// requested by the query but not needed for a single page, so serde skips
/// them.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlPage {
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<GraphqlPageEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlPageEntry {
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// REST shapes
// ---------------------------------------------------------------------------

/// `GET /pokemon/{id}` body. Only the fields the normalized record needs are
/// read; the nested sprite block and slot metadata are skipped because
/// sprite URLs are derived and list order is kept as sent.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RestPokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub types: Vec<RestTypeSlot>,
    #[serde(default)]
    pub abilities: Vec<RestAbilitySlot>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RestTypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RestAbilitySlot {
    pub ability: NamedRef,
}

/// `{ name, url }` reference used by both upstreams. Only `name` is kept;
/// GraphQL does not send `url` at all.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NamedRef {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Tagged source
// ---------------------------------------------------------------------------

/// A validated upstream record, tagged with the transport that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRecord {
    Graphql(GraphqlPokemon),
    Rest(RestPokemon),
}
