//! Client configuration.
//!
//! Every field has a default pointing at the public upstreams, so
//! `ClientConfig::default()` is ready to use and a partial config file only
//! needs to name what it overrides.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GRAPHQL_URL: &str = "https://graphql-pokeapi.vercel.app/api/graphql";
pub const DEFAULT_REST_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Highest national dex number `fetch_random` may pick (generation 1).
pub const DEFAULT_MAX_RANDOM_ID: u32 = 151;

/// Random page offsets are drawn from `[0, DEFAULT_RANDOM_OFFSET_SPAN)`.
pub const DEFAULT_RANDOM_OFFSET_SPAN: u32 = 100;

pub const DEFAULT_PAGE_SIZE: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub graphql_url: String,
    pub rest_base_url: String,
    pub max_random_id: u32,
    pub random_offset_span: u32,
    pub default_page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            rest_base_url: DEFAULT_REST_BASE_URL.to_string(),
            max_random_id: DEFAULT_MAX_RANDOM_ID,
            random_offset_span: DEFAULT_RANDOM_OFFSET_SPAN,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Point both upstreams at a single host, laid out like the mock server
    /// (`{base}/graphql` and `{base}/api/v2`).
    pub fn for_host(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            graphql_url: format!("{base}/graphql"),
            rest_base_url: format!("{base}/api/v2"),
            ..Self::default()
        }
    }

    pub fn with_graphql_url(mut self, url: &str) -> Self {
        self.graphql_url = url.to_string();
        self
    }

    pub fn with_rest_base_url(mut self, url: &str) -> Self {
        self.rest_base_url = url.to_string();
        self
    }

    pub fn with_max_random_id(mut self, max: u32) -> Self {
        self.max_random_id = max;
        self
    }

    pub fn with_random_offset_span(mut self, span: u32) -> Self {
        self.random_offset_span = span;
        self
    }

    pub fn with_default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }
}
