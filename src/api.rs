//! Wire-facing Data Transfer Objects for the beer API.
//!
//! These types define the JSON contract shared by both API surfaces (v1 and
//! v2). Field names follow the camelCase convention expected by existing
//! clients. The payload validation applied before service dispatch lives here
//! as an explicit function rather than being attached to the types themselves.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default page size applied when a listing request carries no paging.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Beer style enumeration.
///
/// Serialized in SCREAMING_SNAKE_CASE on the wire (e.g. `PALE_ALE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerStyle {
    Lager,
    Pilsner,
    Stout,
    Gose,
    Porter,
    Ale,
    Wheat,
    Ipa,
    PaleAle,
    Saison,
}

impl BeerStyle {
    /// Wire representation of the style, matching the serde encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lager => "LAGER",
            Self::Pilsner => "PILSNER",
            Self::Stout => "STOUT",
            Self::Gose => "GOSE",
            Self::Porter => "PORTER",
            Self::Ale => "ALE",
            Self::Wheat => "WHEAT",
            Self::Ipa => "IPA",
            Self::PaleAle => "PALE_ALE",
            Self::Saison => "SAISON",
        }
    }
}

impl fmt::Display for BeerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LAGER" => Ok(Self::Lager),
            "PILSNER" => Ok(Self::Pilsner),
            "STOUT" => Ok(Self::Stout),
            "GOSE" => Ok(Self::Gose),
            "PORTER" => Ok(Self::Porter),
            "ALE" => Ok(Self::Ale),
            "WHEAT" => Ok(Self::Wheat),
            "IPA" => Ok(Self::Ipa),
            "PALE_ALE" => Ok(Self::PaleAle),
            "SAISON" => Ok(Self::Saison),
            other => Err(format!("Unknown beer style: {}", other)),
        }
    }
}

/// Beer DTO used for both request and response bodies.
///
/// All fields are optional at the type level; required fields are enforced by
/// [`validate_beer_payload`] before a payload reaches the service layer.
/// `quantityOnHand` is omitted from responses unless inventory was requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub beer_name: Option<String>,
    #[serde(default)]
    pub beer_style: Option<BeerStyle>,
    #[serde(default)]
    pub upc: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_on_hand: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// Paging parameters for listing operations. Page numbering is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Replace a zero page size with the default so offset math stays sane.
    pub fn normalized(self) -> Self {
        if self.page_size == 0 {
            Self {
                page_size: DEFAULT_PAGE_SIZE,
                ..self
            }
        } else {
            self
        }
    }

    /// Row offset for this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Page envelope returned by listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerPagedList {
    pub content: Vec<BeerDto>,
    pub total_elements: u64,
    pub total_pages: u32,
    /// Requested page size.
    pub size: u32,
    /// Zero-based page number.
    pub number: u32,
}

impl BeerPagedList {
    /// Assemble a page envelope from one page of content plus the total
    /// matching row count.
    pub fn new(content: Vec<BeerDto>, total_elements: u64, page: PageRequest) -> Self {
        let page = page.normalized();
        let total_pages = total_elements
            .div_ceil(u64::from(page.page_size))
            .try_into()
            .unwrap_or(u32::MAX);
        Self {
            content,
            total_elements,
            total_pages,
            size: page.page_size,
            number: page.page_number,
        }
    }
}

/// A single failed field constraint, reported back on 400 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a create/update payload before it is handed to the service layer.
///
/// Checks the required fields (`beerName`, `beerStyle`, `upc`) and the
/// non-negative price constraint. Returns all failed fields at once so a
/// client can fix the payload in one round trip.
pub fn validate_beer_payload(dto: &BeerDto) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    match dto.beer_name.as_deref() {
        None => errors.push(FieldError::new("beerName", "beerName is required")),
        Some(name) if name.trim().is_empty() => {
            errors.push(FieldError::new("beerName", "beerName must not be blank"))
        }
        Some(_) => {}
    }

    if dto.beer_style.is_none() {
        errors.push(FieldError::new("beerStyle", "beerStyle is required"));
    }

    match dto.upc.as_deref() {
        None => errors.push(FieldError::new("upc", "upc is required")),
        Some(upc) if upc.trim().is_empty() => {
            errors.push(FieldError::new("upc", "upc must not be blank"))
        }
        Some(_) => {}
    }

    match dto.price {
        None => errors.push(FieldError::new("price", "price is required")),
        Some(price) if price < Decimal::ZERO => {
            errors.push(FieldError::new("price", "price must not be negative"))
        }
        Some(_) => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> BeerDto {
        BeerDto {
            beer_name: Some("Sagres".to_string()),
            beer_style: Some(BeerStyle::PaleAle),
            upc: Some("0631234200036".to_string()),
            price: Some(Decimal::new(100, 2)),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        assert!(validate_beer_payload(&valid_payload()).is_ok());
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut dto = valid_payload();
        dto.beer_name = None;
        let errors = validate_beer_payload(&dto).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "beerName");
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut dto = valid_payload();
        dto.beer_name = Some("   ".to_string());
        assert!(validate_beer_payload(&dto).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut dto = valid_payload();
        dto.price = Some(Decimal::new(-1, 0));
        let errors = validate_beer_payload(&dto).unwrap_err();
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn test_all_failures_reported_together() {
        let errors = validate_beer_payload(&BeerDto::default()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["beerName", "beerStyle", "upc", "price"]);
    }

    #[test]
    fn test_beer_style_round_trip() {
        for style in [
            BeerStyle::Lager,
            BeerStyle::PaleAle,
            BeerStyle::Ipa,
            BeerStyle::Saison,
        ] {
            assert_eq!(style.as_str().parse::<BeerStyle>().unwrap(), style);
        }
    }

    #[test]
    fn test_beer_style_serde_wire_format() {
        let json = serde_json::to_string(&BeerStyle::PaleAle).unwrap();
        assert_eq!(json, "\"PALE_ALE\"");
        let style: BeerStyle = serde_json::from_str("\"PILSNER\"").unwrap();
        assert_eq!(style, BeerStyle::Pilsner);
    }

    #[test]
    fn test_unknown_beer_style_rejected() {
        assert!("HAND_GRENADE".parse::<BeerStyle>().is_err());
        assert!(serde_json::from_str::<BeerStyle>("\"HAND_GRENADE\"").is_err());
    }

    #[test]
    fn test_dto_json_field_names() {
        let dto = BeerDto {
            id: Some(1),
            quantity_on_hand: Some(12),
            ..valid_payload()
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["beerName"], "Sagres");
        assert_eq!(json["beerStyle"], "PALE_ALE");
        assert_eq!(json["quantityOnHand"], 12);
        assert_eq!(json["upc"], "0631234200036");
    }

    #[test]
    fn test_quantity_omitted_when_absent() {
        let dto = valid_payload();
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("quantityOnHand").is_none());
    }

    #[test]
    fn test_paged_list_math() {
        let page = PageRequest::new(0, 25);
        let list = BeerPagedList::new(vec![], 51, page);
        assert_eq!(list.total_pages, 3);
        assert_eq!(list.size, 25);
        assert_eq!(list.number, 0);
        assert_eq!(list.total_elements, 51);
    }

    #[test]
    fn test_paged_list_empty() {
        let list = BeerPagedList::new(vec![], 0, PageRequest::default());
        assert_eq!(list.total_pages, 0);
        assert_eq!(list.total_elements, 0);
        assert!(list.content.is_empty());
    }

    #[test]
    fn test_page_request_normalized_zero_size() {
        let page = PageRequest::new(2, 0).normalized();
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(page.page_number, 2);
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(0, 25).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 30);
    }
}
