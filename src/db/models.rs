//! Domain models persisted by the repository layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::api::BeerStyle;

/// A beer row as stored in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Beer {
    pub id: i32,
    pub beer_name: String,
    pub beer_style: BeerStyle,
    /// Business-unique key, immutable after creation.
    pub upc: String,
    pub price: Decimal,
    pub quantity_on_hand: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable beer fields supplied by create and update operations.
///
/// The store assigns `id`, timestamps and the initial inventory count; on
/// update the `upc` field is ignored because the key is immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBeer {
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    pub price: Decimal,
}

/// One page of beers plus the total number of rows matching the filters.
#[derive(Debug, Clone, Default)]
pub struct BeerPage {
    pub beers: Vec<Beer>,
    pub total_elements: u64,
}
