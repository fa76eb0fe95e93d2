//! Query-parameter structs for the HTTP API.
//!
//! The beer DTO itself lives in [`crate::api`]; this module only carries
//! the request-side helper types used by the typed (v1) handlers.

use serde::{Deserialize, Deserializer, Serialize};

use crate::api::BeerStyle;

/// Deserialize a boolean query flag from its raw string form.
///
/// Only the literal string "true" (any casing) enables the flag; anything
/// else disables it. Both surfaces share this semantics.
fn flag_from_query<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|v| v.eq_ignore_ascii_case("true")))
}

/// Query parameters for single-beer lookups.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShowInventoryQuery {
    /// Include `quantityOnHand` in the response (default: false).
    #[serde(default, deserialize_with = "flag_from_query")]
    pub show_inventory: Option<bool>,
}

impl ShowInventoryQuery {
    pub fn show_inventory(&self) -> bool {
        self.show_inventory.unwrap_or(false)
    }
}

/// Query parameters for the beer listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListBeersQuery {
    /// Exact beer name filter (optional)
    #[serde(default)]
    pub beer_name: Option<String>,
    /// Beer style filter (optional)
    #[serde(default)]
    pub beer_style: Option<BeerStyle>,
    /// Zero-based page number (optional)
    #[serde(default)]
    pub page_number: Option<u32>,
    /// Page size (optional)
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Include `quantityOnHand` in the response (default: false)
    #[serde(default, deserialize_with = "flag_from_query")]
    pub show_inventory: Option<bool>,
}

impl ListBeersQuery {
    pub fn show_inventory(&self) -> bool {
        self.show_inventory.unwrap_or(false)
    }

    /// Build the optional page request: absent when the client sent no
    /// paging parameters at all, so the service applies its defaults.
    pub fn page_request(&self) -> Option<crate::api::PageRequest> {
        match (self.page_number, self.page_size) {
            (None, None) => None,
            (number, size) => Some(crate::api::PageRequest::new(
                number.unwrap_or(0),
                size.unwrap_or(crate::api::DEFAULT_PAGE_SIZE),
            )),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
