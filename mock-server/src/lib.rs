//! Local stand-in for the GraphQL and REST Pokémon endpoints.
//!
//! Serves a deterministic generation-1 dex: a handful of species carry real
//! stats, the rest are synthesized as `pokemon-{id}` with no height, weight
//! or base experience, which exercises the client's defaulting.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info};

pub const DEX_SIZE: u32 = 151;

const REST_BASE: &str = "https://pokeapi.co/api/v2";
const ARTWORK_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Species {
    pub id: u32,
    pub name: String,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub base_experience: Option<u32>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
}

/// (id, name, height, weight, base experience, types, abilities)
type KnownSpecies = (u32, &'static str, u32, u32, u32, &'static [&'static str], &'static [&'static str]);

const KNOWN: &[KnownSpecies] = &[
    (1, "bulbasaur", 7, 69, 64, &["grass", "poison"], &["overgrow", "chlorophyll"]),
    (4, "charmander", 6, 85, 62, &["fire"], &["blaze", "solar-power"]),
    (7, "squirtle", 5, 90, 63, &["water"], &["torrent", "rain-dish"]),
    (25, "pikachu", 4, 60, 112, &["electric"], &["static", "lightning-rod"]),
    (39, "jigglypuff", 5, 55, 95, &["normal", "fairy"], &["cute-charm", "competitive", "friend-guard"]),
    (94, "gengar", 15, 405, 250, &["ghost", "poison"], &["cursed-body"]),
    (132, "ditto", 3, 40, 101, &["normal"], &["limber", "imposter"]),
    (133, "eevee", 3, 65, 65, &["normal"], &["run-away", "adaptability", "anticipation"]),
    (143, "snorlax", 21, 4600, 189, &["normal"], &["immunity", "thick-fat", "gluttony"]),
    (150, "mewtwo", 20, 1220, 340, &["psychic"], &["pressure", "unnerve"]),
    (151, "mew", 4, 40, 300, &["psychic"], &["synchronize"]),
];

/// The in-memory dex, ordered by id.
#[derive(Debug)]
pub struct Dex {
    species: Vec<Species>,
}

impl Default for Dex {
    fn default() -> Self {
        Self::generation_one()
    }
}

impl Dex {
    pub fn generation_one() -> Self {
        let species = (1..=DEX_SIZE)
            .map(|id| match KNOWN.iter().find(|k| k.0 == id) {
                Some(&(id, name, height, weight, exp, types, abilities)) => Species {
                    id,
                    name: name.to_string(),
                    height: Some(height),
                    weight: Some(weight),
                    base_experience: Some(exp),
                    types: types.iter().map(|t| t.to_string()).collect(),
                    abilities: abilities.iter().map(|a| a.to_string()).collect(),
                },
                None => Species {
                    id,
                    name: format!("pokemon-{id}"),
                    height: None,
                    weight: None,
                    base_experience: None,
                    types: vec!["normal".to_string()],
                    abilities: Vec::new(),
                },
            })
            .collect();
        Self { species }
    }

    pub fn by_id(&self, id: u32) -> Option<&Species> {
        self.species.iter().find(|s| s.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.name == name)
    }

    pub fn page(&self, limit: usize, offset: usize) -> &[Species] {
        let start = offset.min(self.species.len());
        let end = start.saturating_add(limit).min(self.species.len());
        &self.species[start..end]
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

pub type SharedDex = Arc<Dex>;

/// Body of a GraphQL POST.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlBody {
    pub operation_name: Option<String>,
    pub query: String,
    #[serde(default)]
    pub variables: Value,
}

pub fn app() -> Router {
    app_with(Arc::new(Dex::generation_one()))
}

pub fn app_with(dex: SharedDex) -> Router {
    Router::new()
        .route("/graphql", post(graphql))
        .route("/api/v2/pokemon/{id}", get(rest_pokemon))
        .with_state(dex)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock PokéAPI listening");
    }
    axum::serve(listener, app()).await
}

async fn graphql(State(dex): State<SharedDex>, Json(body): Json<GraphqlBody>) -> Json<Value> {
    let operation = body
        .operation_name
        .clone()
        .or_else(|| detect_operation(&body.query).map(str::to_string));
    debug!(?operation, variables = %body.variables, "graphql request");

    let response = match operation.as_deref() {
        Some("getPokemon") => match body.variables.get("name").and_then(Value::as_str) {
            Some(name) => pokemon_data(&dex, name),
            None => graphql_error("Variable \"$name\" of required type \"String!\" was not provided."),
        },
        Some("getPokemons") => {
            let limit = variable_usize(&body.variables, "limit").unwrap_or(20);
            let offset = variable_usize(&body.variables, "offset").unwrap_or(0);
            pokemons_data(&dex, limit, offset)
        }
        _ => graphql_error("Unknown operation"),
    };
    Json(response)
}

async fn rest_pokemon(
    State(dex): State<SharedDex>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, (StatusCode, &'static str)> {
    let species = dex.by_id(id).ok_or((StatusCode::NOT_FOUND, "Not Found"))?;
    Ok(Json(rest_record(species)))
}

fn detect_operation(query: &str) -> Option<&'static str> {
    if query.contains("pokemons(") {
        Some("getPokemons")
    } else if query.contains("pokemon(") {
        Some("getPokemon")
    } else {
        None
    }
}

fn variable_usize(variables: &Value, key: &str) -> Option<usize> {
    variables.get(key).and_then(Value::as_u64).map(|v| v as usize)
}

fn graphql_error(message: &str) -> Value {
    json!({ "data": null, "errors": [{ "message": message }] })
}

fn pokemon_data(dex: &Dex, name: &str) -> Value {
    let pokemon = match dex.by_name(name) {
        Some(s) => json!({
            "id": s.id,
            "name": s.name,
            "types": s.types.iter().map(|t| json!({ "type": { "name": t } })).collect::<Vec<_>>(),
            "abilities": s.abilities.iter().map(|a| json!({ "ability": { "name": a } })).collect::<Vec<_>>(),
            "message": "",
            "status": true,
        }),
        None => json!({
            "id": null,
            "name": null,
            "types": null,
            "abilities": null,
            "message": "Not Found",
            "status": false,
        }),
    };
    json!({ "data": { "pokemon": pokemon } })
}

fn pokemons_data(dex: &Dex, limit: usize, offset: usize) -> Value {
    let results: Vec<Value> = dex
        .page(limit, offset)
        .iter()
        .map(|s| {
            json!({
                "url": format!("{REST_BASE}/pokemon/{}/", s.id),
                "name": s.name,
                "image": format!("{ARTWORK_BASE}/{}.png", s.id),
            })
        })
        .collect();
    let total = dex.len();
    let next = (offset.saturating_add(limit) < total)
        .then(|| format!("{REST_BASE}/pokemon/?offset={}&limit={limit}", offset + limit));
    let previous = (offset > 0)
        .then(|| format!("{REST_BASE}/pokemon/?offset={}&limit={limit}", offset.saturating_sub(limit)));

    json!({ "data": { "pokemons": {
        "count": total,
        "next": next,
        "previous": previous,
        "status": true,
        "message": "",
        "results": results,
    }}})
}

fn rest_record(s: &Species) -> Value {
    json!({
        "id": s.id,
        "name": s.name,
        "height": s.height,
        "weight": s.weight,
        "base_experience": s.base_experience,
        "sprites": {
            "front_default": format!("https://example.invalid/sprites/{}.png", s.id),
        },
        "types": s.types.iter().enumerate().map(|(i, t)| json!({
            "slot": i + 1,
            "type": { "name": t, "url": format!("{REST_BASE}/type/{t}/") },
        })).collect::<Vec<_>>(),
        "abilities": s.abilities.iter().enumerate().map(|(i, a)| json!({
            "ability": { "name": a, "url": format!("{REST_BASE}/ability/{a}/") },
            "is_hidden": false,
            "slot": i + 1,
        })).collect::<Vec<_>>(),
    })
}
