mod draft;
pub(crate) mod lenient;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use draft::{Draft, Field};

/// A car listing as persisted by a gateway
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub brand: String,
    pub model: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub year: i32,
    #[serde(rename = "km", default, deserialize_with = "lenient::int")]
    pub mileage: i64,
    #[serde(default, deserialize_with = "lenient::int")]
    pub price: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub owner_name: String,
    pub owner_phone: String,
    #[serde(default)]
    pub owner_email: Option<String>,
    /// Signed-in user that created the listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated listing payload. Only `validation::check` builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFields {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub mileage: i64,
    pub price: i64,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub owner_name: String,
    pub owner_phone: String,
    pub owner_email: Option<String>,
}

impl Listing {
    /// Build a freshly created listing; both timestamps are `now`
    pub fn create(
        id: String,
        owner_id: Option<String>,
        fields: ListingFields,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            brand: fields.brand,
            model: fields.model,
            year: fields.year,
            mileage: fields.mileage,
            price: fields.price,
            description: fields.description,
            images: fields.images,
            owner_name: fields.owner_name,
            owner_phone: fields.owner_phone,
            owner_email: fields.owner_email,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field, keeping id, owner and creation time.
    /// `updated_at` always moves strictly forward.
    pub fn apply(&mut self, fields: ListingFields, now: DateTime<Utc>) {
        self.brand = fields.brand;
        self.model = fields.model;
        self.year = fields.year;
        self.mileage = fields.mileage;
        self.price = fields.price;
        self.description = fields.description;
        self.images = fields.images;
        self.owner_name = fields.owner_name;
        self.owner_phone = fields.owner_phone;
        self.owner_email = fields.owner_email;
        self.updated_at = next_update_time(self.updated_at, now);
    }

    /// Short "Brand Model (Year)" title used by list rows
    pub fn title(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }
}

fn next_update_time(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + chrono::Duration::milliseconds(1)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ListingFields;

    pub fn fields(brand: &str, model: &str, year: i32, price: i64, mileage: i64) -> ListingFields {
        ListingFields {
            brand: brand.to_string(),
            model: model.to_string(),
            year,
            mileage,
            price,
            description: None,
            images: vec![],
            owner_name: "Anna".to_string(),
            owner_phone: "070 123 45 67".to_string(),
            owner_email: Some("anna@example.com".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn apply_keeps_identity_and_advances_updated_at() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut listing = Listing::create(
            "abc".to_string(),
            Some("user-1".to_string()),
            fixtures::fields("Volvo", "V70", 2018, 100_000, 150_000),
            created,
        );

        listing.apply(fixtures::fields("Saab", "9-5", 2005, 40_000, 300_000), created);

        assert_eq!(listing.id, "abc");
        assert_eq!(listing.owner_id.as_deref(), Some("user-1"));
        assert_eq!(listing.created_at, created);
        assert!(listing.updated_at > created);
        assert_eq!(listing.brand, "Saab");
        assert_eq!(listing.mileage, 300_000);
    }

    #[test]
    fn serializes_mileage_as_km_and_camel_case_keys() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let listing = Listing::create(
            "abc".to_string(),
            None,
            fixtures::fields("Volvo", "V70", 2018, 100_000, 150_000),
            now,
        );

        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["km"], 150_000);
        assert_eq!(value["ownerPhone"], "070 123 45 67");
        assert!(value.get("ownerId").is_none());
        assert!(value.get("mileage").is_none());
    }

    #[test]
    fn reads_legacy_string_numbers_and_falls_back_to_zero() {
        let json = r#"{
            "id": "1", "brand": "Volvo", "model": "V70",
            "year": "2019", "km": "abc", "price": null,
            "ownerName": "Anna", "ownerPhone": "070",
            "createdAt": "2024-05-01T12:00:00Z", "updatedAt": "2024-05-01T12:00:00Z"
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.year, 2019);
        assert_eq!(listing.mileage, 0);
        assert_eq!(listing.price, 0);
        assert!(listing.images.is_empty());
    }
}
