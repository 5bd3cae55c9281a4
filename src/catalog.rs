// Lodging catalog: the fixed set of bookable suites
// Loaded once at start-up and shared read-only between requests

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Duplicate lodging id: {0}")]
    DuplicateId(String),

    #[error("Invalid lodging {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
}

// Nightly price kept as an integer amount in minor units plus an ISO-4217 code.
// The display string is only derived at the presentation edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub amount_minor_units: i64,
    pub currency: String,
}

impl Price {
    pub fn new(amount_minor_units: i64, currency: &str) -> Self {
        Self {
            amount_minor_units,
            currency: currency.to_uppercase(),
        }
    }

    // Human readable price, e.g. "Rp 4.500.000" or "$1,250.00"
    pub fn display(&self) -> String {
        let sign = if self.amount_minor_units < 0 { "-" } else { "" };
        let amount = self.amount_minor_units.unsigned_abs();

        match self.currency.as_str() {
            // Sen is not used in practice, IDR amounts are whole rupiah
            "IDR" => format!("{}Rp {}", sign, group_digits(amount, '.')),
            "USD" => format!("{}${}", sign, two_decimals(amount, ',')),
            "EUR" => format!("{}€{}", sign, two_decimals(amount, ',')),
            "GBP" => format!("{}£{}", sign, two_decimals(amount, ',')),
            code => format!("{}{} {}", sign, code, two_decimals(amount, ',')),
        }
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

fn two_decimals(minor_units: u64, separator: char) -> String {
    format!(
        "{}.{:02}",
        group_digits(minor_units / 100, separator),
        minor_units % 100
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LodgingRecord {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub price_per_night: Price,
    pub guests_capacity: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl LodgingRecord {
    fn check(&self) -> Result<(), CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidRecord {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.is_empty() {
            return Err(invalid("empty id"));
        }
        if self.guests_capacity == 0 {
            return Err(invalid("guests capacity must be positive"));
        }
        if self.bedrooms == 0 {
            return Err(invalid("bedrooms must be positive"));
        }
        if self.bathrooms == 0 {
            return Err(invalid("bathrooms must be positive"));
        }
        Ok(())
    }
}

// Read-only catalog, lookups never mutate and need no locking
#[derive(Debug, Clone)]
pub struct LodgingCatalog {
    lodgings: Vec<LodgingRecord>,
}

impl LodgingCatalog {
    /// Builds a catalog, rejecting duplicate ids and non-positive counts.
    /// Order of `lodgings` is kept as the listing order.
    pub fn new(lodgings: Vec<LodgingRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(lodgings.len());
        for lodging in &lodgings {
            lodging.check()?;
            if !seen.insert(lodging.id.as_str()) {
                return Err(CatalogError::DuplicateId(lodging.id.clone()));
            }
        }
        Ok(Self { lodgings })
    }

    // Load a catalog from a JSON array of lodging records
    pub fn from_json(json_str: &str) -> Result<Self, CatalogError> {
        let lodgings: Vec<LodgingRecord> = serde_json::from_str(json_str)
            .map_err(|e| CatalogError::JsonParseError(e.to_string()))?;
        Self::new(lodgings)
    }

    // Exact match only
    pub fn find_by_id(&self, id: &str) -> Option<&LodgingRecord> {
        self.lodgings.iter().find(|lodging| lodging.id == id)
    }

    pub fn list_all(&self) -> &[LodgingRecord] {
        &self.lodgings
    }

    // Ids in listing order, one detail page per id
    pub fn ids(&self) -> Vec<&str> {
        self.lodgings.iter().map(|l| l.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.lodgings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lodgings.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn lodging(
    id: &str,
    name: &str,
    location: &str,
    rupiah: i64,
    image_url: &str,
    description: &str,
    amenities: &[&str],
    guests_capacity: u32,
    bedrooms: u32,
    bathrooms: u32,
) -> LodgingRecord {
    LodgingRecord {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        price_per_night: Price::new(rupiah, "IDR"),
        guests_capacity,
        bedrooms,
        bathrooms,
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
    }
}

// The suites of the Green Coffee Estate
impl Default for LodgingCatalog {
    fn default() -> Self {
        Self {
            lodgings: vec![
                lodging(
                    "1",
                    "Emerald Suite",
                    "Upper Floor, Green Coffee Estate",
                    4_500_000,
                    "/images/gc-emerald-suite.jpg",
                    "Our most luxurious suite with breathtaking mountain views, a marble bathtub, a private lounge area and 24-hour butler service.",
                    &[
                        "Mountain View",
                        "Marble Bathtub",
                        "Lounge Area",
                        "Butler Service",
                        "Premium Minibar",
                        "Bose Audio System",
                        "Ultra-fast Wi-Fi",
                        "A La Carte Breakfast",
                    ],
                    2,
                    1,
                    1,
                ),
                lodging(
                    "2",
                    "Forest Retreat Villa",
                    "Secluded Forest Area, Green Coffee Estate",
                    6_000_000,
                    "/images/gc-forest-retreat.jpg",
                    "A secluded private villa in the middle of the coffee forest with an infinity-edge private pool and a wide outdoor terrace.",
                    &[
                        "Private Pool",
                        "Wide Terrace",
                        "Private Forest Access",
                        "Full Gourmet Kitchen",
                        "Private Security System",
                        "Electric Bike Rental",
                        "Bonfire Spot",
                        "In-villa Spa Service",
                    ],
                    4,
                    2,
                    2,
                ),
                lodging(
                    "3",
                    "Coffee Bean Loft",
                    "Main Building, Green Coffee Estate",
                    3_800_000,
                    "/images/gc-coffee-bean-loft.jpg",
                    "A modern industrial loft inspired by plantation architecture, with large windows facing the coffee garden.",
                    &[
                        "Coffee Garden View",
                        "Espresso Machine",
                        "Smart Home System",
                        "Modern Workspace",
                        "Private Mini Gym",
                        "Express Laundry",
                        "Executive Lounge Access",
                        "Curated Books & Magazines",
                    ],
                    2,
                    1,
                    1,
                ),
                lodging(
                    "4",
                    "Zen Garden Room",
                    "Ground Floor, Green Coffee Estate",
                    3_200_000,
                    "/images/gc-zen-garden-room.jpg",
                    "A calming room with a private Zen garden, minimalist natural wood design and an outdoor meditation area.",
                    &[
                        "Private Zen Garden",
                        "Meditation Area",
                        "Aromatherapy Diffuser",
                        "Ergonomic Pillows",
                        "Herbal Tea Selection",
                        "Direct Spa Access",
                        "Private Yoga Guide (optional)",
                        "Silk Bathrobe",
                    ],
                    2,
                    1,
                    1,
                ),
            ],
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_catalog_order_and_lookup() {
        let catalog = LodgingCatalog::default();

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.ids(), vec!["1", "2", "3", "4"]);

        let villa = catalog.find_by_id("2").unwrap();
        assert_eq!(villa.name, "Forest Retreat Villa");
        assert_eq!(villa.guests_capacity, 4);
        assert_eq!(villa.price_per_night.display(), "Rp 6.000.000");

        // Default data must pass the same checks as loaded data
        assert!(LodgingCatalog::new(catalog.list_all().to_vec()).is_ok());
    }

    #[test_case("1", true; "exact id")]
    #[test_case(" 1", false; "leading whitespace")]
    #[test_case("01", false; "zero padded")]
    #[test_case("", false; "empty id")]
    #[test_case("999", false; "unknown id")]
    fn test_find_by_id_exact_match(id: &str, found: bool) {
        let catalog = LodgingCatalog::default();
        assert_eq!(catalog.find_by_id(id).is_some(), found);
    }

    #[test]
    fn test_from_json_keeps_source_order() {
        let json = r#"[
            {"id": "b", "name": "B", "location": "L", "description": "D",
             "pricePerNight": {"amountMinorUnits": 1000000, "currency": "IDR"},
             "guestsCapacity": 2, "bedrooms": 1, "bathrooms": 1},
            {"id": "a", "name": "A", "location": "L", "description": "D",
             "pricePerNight": {"amountMinorUnits": 2000000, "currency": "IDR"},
             "guestsCapacity": 3, "bedrooms": 1, "bathrooms": 1,
             "amenities": ["Pool", "Wi-Fi"]}
        ]"#;

        let catalog = LodgingCatalog::from_json(json).unwrap();
        let names: Vec<&str> = catalog.list_all().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(catalog.find_by_id("a").unwrap().amenities, vec!["Pool", "Wi-Fi"]);
        assert!(catalog.find_by_id("b").unwrap().amenities.is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut lodgings = LodgingCatalog::default().list_all().to_vec();
        lodgings[1].id = "1".to_string();

        match LodgingCatalog::new(lodgings) {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id, "1"),
            other => panic!("Expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut lodgings = LodgingCatalog::default().list_all().to_vec();
        lodgings[0].guests_capacity = 0;
        assert!(matches!(
            LodgingCatalog::new(lodgings),
            Err(CatalogError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            LodgingCatalog::from_json("{not json"),
            Err(CatalogError::JsonParseError(_))
        ));
    }

    #[test_case(4_500_000, "IDR", "Rp 4.500.000")]
    #[test_case(950, "idr", "Rp 950")]
    #[test_case(125_050, "USD", "$1,250.50")]
    #[test_case(99, "GBP", "£0.99")]
    #[test_case(1_000_000, "EUR", "€10,000.00")]
    #[test_case(12_345, "CHF", "CHF 123.45")]
    #[test_case(-1_500, "USD", "-$15.00")]
    fn test_price_display(amount: i64, currency: &str, expected: &str) {
        assert_eq!(Price::new(amount, currency).display(), expected);
    }
}
