//! Error types for the Pokémon data client.
//!
//! # Design
//! Callers mostly care about two outcomes: the Pokémon they asked for does
//! not exist (`NotFound`), or a page could not be loaded (`PageUnavailable`).
//! Both carry the failure that produced them as `cause`, exposed through
//! `std::error::Error::source`, so the low-level variants (`HttpError`,
//! `GraphqlError`, `Transport`, ...) stay reachable for diagnostics.

use std::error::Error;
use std::fmt;

/// What a failed single-record lookup was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Name(String),
    Id(u32),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Name(name) => write!(f, "Pokémon \"{name}\""),
            Lookup::Id(id) => write!(f, "Pokémon with ID {id}"),
        }
    }
}

/// Errors returned by `PokeApiClient` and `PokemonService`.
#[derive(Debug)]
pub enum ApiError {
    /// The requested Pokémon does not exist upstream, or the lookup failed.
    NotFound {
        lookup: Lookup,
        cause: Option<Box<ApiError>>,
    },

    /// A page of summary entries could not be loaded.
    PageUnavailable { cause: Box<ApiError> },

    /// The server returned a non-2xx status.
    HttpError { status: u16, body: String },

    /// The GraphQL response carried an `errors` array.
    GraphqlError(Vec<String>),

    /// The upstream signalled failure in-band (`status: false`).
    Upstream(String),

    /// The transport could not complete the HTTP exchange.
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),

    /// An argument violated the operation's input constraints.
    InvalidInput(String),
}

impl ApiError {
    /// Wrap `self` as the cause of a `NotFound` for `lookup`.
    ///
    /// A `NotFound` is returned as is, so a cause chain never nests two of
    /// them for the same request.
    pub fn into_not_found(self, lookup: Lookup) -> ApiError {
        match self {
            ApiError::NotFound { .. } | ApiError::InvalidInput(_) => self,
            other => ApiError::NotFound {
                lookup,
                cause: Some(Box::new(other)),
            },
        }
    }

    /// Wrap `self` as the cause of a `PageUnavailable`.
    pub fn into_page_unavailable(self) -> ApiError {
        match self {
            ApiError::PageUnavailable { .. } | ApiError::InvalidInput(_) => self,
            other => ApiError::PageUnavailable {
                cause: Box::new(other),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { lookup, .. } => write!(f, "{lookup} not found!"),
            ApiError::PageUnavailable { .. } => write!(f, "failed to load Pokémon data"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::GraphqlError(messages) => {
                write!(f, "GraphQL error: {}", messages.join("; "))
            }
            ApiError::Upstream(msg) => write!(f, "upstream reported failure: {msg}"),
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::NotFound { cause, .. } => cause.as_deref().map(|e| e as &(dyn Error + 'static)),
            ApiError::PageUnavailable { cause } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_lookup() {
        let by_name = ApiError::NotFound {
            lookup: Lookup::Name("missingno".to_string()),
            cause: None,
        };
        assert_eq!(by_name.to_string(), "Pokémon \"missingno\" not found!");

        let by_id = ApiError::NotFound {
            lookup: Lookup::Id(9999),
            cause: None,
        };
        assert!(by_id.to_string().contains("9999"));
    }

    #[test]
    fn wrapping_keeps_the_cause_as_source() {
        let err = ApiError::HttpError {
            status: 500,
            body: "boom".to_string(),
        }
        .into_not_found(Lookup::Id(25));

        let source = err.source().expect("cause should be chained");
        assert_eq!(source.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn not_found_is_not_wrapped_twice() {
        let inner = ApiError::NotFound {
            lookup: Lookup::Name("pikachu".to_string()),
            cause: Some(Box::new(ApiError::Upstream("Not Found".to_string()))),
        };
        let err = inner.into_not_found(Lookup::Name("pikachu".to_string()));
        match err {
            ApiError::NotFound { cause: Some(cause), .. } => {
                assert!(matches!(*cause, ApiError::Upstream(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn page_unavailable_chains_transport_failure() {
        let err = ApiError::Transport("connection refused".to_string()).into_page_unavailable();
        assert_eq!(err.to_string(), "failed to load Pokémon data");
        assert!(err.source().unwrap().to_string().contains("connection refused"));
    }
}
