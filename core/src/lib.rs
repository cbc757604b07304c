//! Pokémon data client core.
//!
//! # Overview
//! Gives callers one normalized `Pokemon` record whichever upstream served
//! it: lookups by name and page listings go to a GraphQL endpoint, lookups
//! by id go to a REST endpoint. Both response shapes are validated at the
//! boundary and converted into the same record.
//!
//! # Design
//! - `PokeApiClient` is stateless and I/O-free: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse` (host-does-IO).
//! - `PokemonService` composes build, `Transport::execute` and parse, logs
//!   failures through `tracing` and chains the original error as the cause.
//! - `UreqTransport` (feature `ureq`, on by default) is the blocking
//!   transport used in production and by the integration tests.
//! - Wire DTOs are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod graphql;
pub mod http;
pub mod normalize;
pub mod service;
#[cfg(feature = "ureq")]
pub mod transport;
pub mod types;

pub use client::{shuffle_and_take, PokeApiClient};
pub use config::ClientConfig;
pub use error::{ApiError, Lookup};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use normalize::{extract_id_from_url, front_sprite_url, official_artwork_url};
pub use service::{PokemonService, Transport};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{Pokemon, PokemonSummary, SourceRecord, Sprites};
