//! Conversion of upstream records into the normalized `Pokemon`.
//!
//! Sprite URLs are always rebuilt from the id, so a record looks the same to
//! callers whichever upstream produced it.

use crate::error::ApiError;
use crate::types::{
    GraphqlPageEntry, GraphqlPokemon, GraphqlPokemonPayload, Pokemon, PokemonSummary,
    RestPokemon, SourceRecord, Sprites,
};

const SPRITE_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

pub fn front_sprite_url(id: u32) -> String {
    format!("{SPRITE_BASE}/{id}.png")
}

pub fn official_artwork_url(id: u32) -> String {
    format!("{SPRITE_BASE}/other/official-artwork/{id}.png")
}

impl Sprites {
    pub fn for_id(id: u32) -> Self {
        Self {
            front_default: front_sprite_url(id),
            official_artwork: official_artwork_url(id),
        }
    }
}

/// Numeric id from a resource URL ending in `/<digits>/`, e.g.
/// `https://pokeapi.co/api/v2/pokemon/25/` gives `Some(25)`.
///
/// Anything else, including ids that overflow `u32`, gives `None`.
pub fn extract_id_from_url(url: &str) -> Option<u32> {
    let trimmed = url.strip_suffix('/')?;
    let (_, segment) = trimmed.rsplit_once('/')?;
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

impl GraphqlPokemon {
    /// Validate a raw GraphQL payload. `status: false` or a missing id/name
    /// means the upstream did not find the Pokémon.
    pub fn from_payload(payload: GraphqlPokemonPayload) -> Result<Self, ApiError> {
        let message = payload.message.filter(|m| !m.trim().is_empty());
        if payload.status == Some(false) {
            return Err(ApiError::Upstream(
                message.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }
        match (payload.id, payload.name) {
            (Some(id), Some(name)) => Ok(Self {
                id,
                name,
                types: payload.types.unwrap_or_default(),
                abilities: payload.abilities.unwrap_or_default(),
            }),
            _ => Err(ApiError::Upstream(
                message.unwrap_or_else(|| "record has no id or name".to_string()),
            )),
        }
    }
}

impl From<GraphqlPokemon> for Pokemon {
    fn from(p: GraphqlPokemon) -> Self {
        Pokemon {
            sprites: Sprites::for_id(p.id),
            id: p.id,
            name: p.name,
            height: 0,
            weight: 0,
            base_experience: 0,
            types: p.types.into_iter().map(|t| t.kind.name).collect(),
            abilities: p.abilities.into_iter().map(|a| a.ability.name).collect(),
        }
    }
}

impl From<RestPokemon> for Pokemon {
    fn from(p: RestPokemon) -> Self {
        Pokemon {
            sprites: Sprites::for_id(p.id),
            id: p.id,
            name: p.name,
            height: p.height.unwrap_or(0),
            weight: p.weight.unwrap_or(0),
            base_experience: p.base_experience.unwrap_or(0),
            types: p.types.into_iter().map(|t| t.kind.name).collect(),
            abilities: p.abilities.into_iter().map(|a| a.ability.name).collect(),
        }
    }
}

impl From<SourceRecord> for Pokemon {
    fn from(record: SourceRecord) -> Self {
        match record {
            SourceRecord::Graphql(p) => p.into(),
            SourceRecord::Rest(p) => p.into(),
        }
    }
}

impl From<GraphqlPageEntry> for PokemonSummary {
    fn from(entry: GraphqlPageEntry) -> Self {
        PokemonSummary {
            id: extract_id_from_url(&entry.url),
            name: entry.name,
            image: entry.image.unwrap_or_default(),
        }
    }
}
