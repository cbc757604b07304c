//! The Pokémon data service: build, execute, parse.
//!
//! # Design
//! `PokemonService` pairs a `PokeApiClient` with a `Transport` that performs
//! the actual HTTP exchange. Every operation is one independent round trip
//! (two for `fetch_random`), holds no state between calls and does not
//! retry. Failures are logged through `tracing` and then returned with the
//! original error chained as the cause.

use rand::Rng;
use tracing::{debug, error, warn};

use crate::client::{shuffle_and_take, PokeApiClient};
use crate::config::ClientConfig;
use crate::error::{ApiError, Lookup};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Pokemon, PokemonSummary};

/// Executes an `HttpRequest` and hands back the response as data.
///
/// Non-2xx statuses are *responses*, not errors; only failures to complete
/// the exchange (DNS, connect, I/O) should come back as
/// `ApiError::Transport`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

#[derive(Debug, Clone)]
pub struct PokemonService<T> {
    client: PokeApiClient,
    transport: T,
}

#[cfg(feature = "ureq")]
impl PokemonService<crate::transport::UreqTransport> {
    /// Service over the public upstreams with a default `ureq` agent.
    pub fn blocking(config: ClientConfig) -> Self {
        Self::new(config, crate::transport::UreqTransport::new())
    }
}

impl<T: Transport> PokemonService<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: PokeApiClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// Look a Pokémon up by name through the GraphQL endpoint.
    pub fn fetch_by_name(&self, name: &str) -> Result<Pokemon, ApiError> {
        let result = self
            .client
            .build_pokemon_by_name(name)
            .and_then(|req| self.round_trip(req))
            .and_then(|resp| self.client.parse_pokemon_by_name(name, resp))
            .map_err(|e| e.into_not_found(Lookup::Name(name.to_string())));

        if let Err(err) = &result {
            log_failure("fetch_by_name", err);
        }
        result
    }

    /// Look a Pokémon up by national dex number through the REST endpoint.
    pub fn fetch_by_id(&self, id: u32) -> Result<Pokemon, ApiError> {
        let result = self
            .client
            .build_pokemon_by_id(id)
            .and_then(|req| self.round_trip(req))
            .and_then(|resp| self.client.parse_pokemon_by_id(id, resp))
            .map_err(|e| e.into_not_found(Lookup::Id(id)));

        if let Err(err) = &result {
            log_failure("fetch_by_id", err);
        }
        result
    }

    pub fn fetch_page(&self, limit: u32, offset: u32) -> Result<Vec<PokemonSummary>, ApiError> {
        let result = self
            .client
            .build_pokemons_page(limit, offset)
            .and_then(|req| self.round_trip(req))
            .and_then(|resp| self.client.parse_pokemons_page(resp))
            .map_err(ApiError::into_page_unavailable);

        match &result {
            Ok(entries) => debug!(limit, offset, returned = entries.len(), "loaded Pokémon page"),
            Err(err) => log_failure("fetch_page", err),
        }
        result
    }

    /// `fetch_page` with the configured page size and offset 0.
    pub fn fetch_default_page(&self) -> Result<Vec<PokemonSummary>, ApiError> {
        self.fetch_page(self.client.config().default_page_size, 0)
    }

    pub fn fetch_random(&self) -> Result<Pokemon, ApiError> {
        self.fetch_random_with(&mut rand::rng())
    }

    /// Pick an id uniformly in `[1, max_random_id]` and fetch it by id.
    pub fn fetch_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Pokemon, ApiError> {
        let id = self.client.pick_random_id(rng).inspect_err(|err| {
            log_failure("fetch_random", err);
        })?;
        debug!(id, "picked random Pokémon");
        self.fetch_by_id(id)
    }

    pub fn fetch_random_page(&self, count: u32) -> Result<Vec<PokemonSummary>, ApiError> {
        self.fetch_random_page_with(count, &mut rand::rng())
    }

    /// `fetch_random_page` with the configured page size.
    pub fn fetch_default_random_page(&self) -> Result<Vec<PokemonSummary>, ApiError> {
        self.fetch_random_page(self.client.config().default_page_size)
    }

    /// Load `2 * count` entries from a random offset, shuffle them and keep
    /// `count` (fewer when the upstream page is short).
    pub fn fetch_random_page_with<R: Rng + ?Sized>(
        &self,
        count: u32,
        rng: &mut R,
    ) -> Result<Vec<PokemonSummary>, ApiError> {
        if count == 0 {
            let err = ApiError::InvalidInput("count must be positive".to_string());
            log_failure("fetch_random_page", &err);
            return Err(err);
        }
        let offset = self.client.pick_random_offset(rng);
        let entries = self.fetch_page(count.saturating_mul(2), offset)?;
        Ok(shuffle_and_take(entries, count as usize, rng))
    }

    fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

fn log_failure(operation: &'static str, err: &ApiError) {
    let cause = std::error::Error::source(err).map(|c| c.to_string());
    if is_clean_miss(err) {
        warn!(operation, error = %err, cause = ?cause, "Pokémon not found");
    } else {
        error!(operation, error = %err, cause = ?cause, "Pokémon request failed");
    }
}

/// A miss the upstream reported cleanly (404, `status: false`, null record)
/// as opposed to a transport or decoding failure.
fn is_clean_miss(err: &ApiError) -> bool {
    match err {
        ApiError::NotFound { cause: None, .. } => true,
        ApiError::NotFound { cause: Some(cause), .. } => matches!(
            cause.as_ref(),
            ApiError::Upstream(_) | ApiError::HttpError { status: 404, .. }
        ),
        _ => false,
    }
}
