use crate::models::Listing;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

/// Ordering applied to the visible listing set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest first
    #[default]
    Date,
    /// Most expensive first
    Price,
    /// Lowest mileage first
    #[serde(rename = "km")]
    Mileage,
}

impl SortKey {
    /// Parse a sort key name; unknown names fall back to `Date`
    pub fn parse(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "price" => SortKey::Price,
            "km" => SortKey::Mileage,
            _ => SortKey::Date,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Price => "price",
            SortKey::Mileage => "km",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when the trimmed, case-insensitive search text occurs in the brand,
/// the model or the year of the listing. Blank text matches everything.
pub fn matches(listing: &Listing, search_text: &str) -> bool {
    let needle = search_text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    listing.brand.to_lowercase().contains(&needle)
        || listing.model.to_lowercase().contains(&needle)
        || listing.year.to_string().contains(&needle)
}

/// Filter and order listings for display. Ties keep their input order.
pub fn query(listings: &[Listing], search_text: &str, sort: SortKey) -> Vec<Listing> {
    let mut visible: Vec<Listing> = listings
        .iter()
        .filter(|l| matches(l, search_text))
        .cloned()
        .collect();

    match sort {
        SortKey::Date => visible.sort_by_key(|l| Reverse(l.created_at)),
        SortKey::Price => visible.sort_by_key(|l| Reverse(l.price)),
        SortKey::Mileage => visible.sort_by_key(|l| l.mileage),
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::fields;
    use chrono::{TimeZone, Utc};

    fn listing(
        id: &str,
        brand: &str,
        model: &str,
        year: i32,
        price: i64,
        km: i64,
        day: u32,
    ) -> Listing {
        Listing::create(
            id.to_string(),
            None,
            fields(brand, model, year, price, km),
            Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
        )
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("a", "Volvo", "V70", 2018, 100_000, 150_000, 1),
            listing("b", "Volvo", "V70", 2020, 300_000, 60_000, 3),
            listing("c", "Volvo", "V70", 2019, 200_000, 90_000, 2),
            listing("d", "Saab", "9-3", 2008, 40_000, 220_000, 4),
        ]
    }

    #[test]
    fn parse_falls_back_to_date() {
        assert_eq!(SortKey::parse("price"), SortKey::Price);
        assert_eq!(SortKey::parse(" KM "), SortKey::Mileage);
        assert_eq!(SortKey::parse("date"), SortKey::Date);
        assert_eq!(SortKey::parse("colour"), SortKey::Date);
        assert_eq!(SortKey::parse(""), SortKey::Date);
        assert_eq!(SortKey::default().to_string(), "date");
    }

    #[test]
    fn blank_search_matches_everything() {
        let all = sample();
        assert_eq!(query(&all, "   ", SortKey::Date).len(), 4);
    }

    #[test]
    fn search_is_case_insensitive_over_brand_model_and_year() {
        let all = sample();
        assert_eq!(ids(&query(&all, " SAAB ", SortKey::Date)), vec!["d"]);
        assert_eq!(ids(&query(&all, "9-3", SortKey::Date)), vec!["d"]);
        assert_eq!(ids(&query(&all, "2020", SortKey::Date)), vec!["b"]);
        assert!(query(&all, "tesla", SortKey::Date).is_empty());
    }

    #[test]
    fn sorts_by_each_key() {
        let all = sample();
        assert_eq!(ids(&query(&all, "", SortKey::Date)), vec!["d", "b", "c", "a"]);
        assert_eq!(ids(&query(&all, "", SortKey::Price)), vec!["b", "c", "a", "d"]);
        assert_eq!(ids(&query(&all, "", SortKey::Mileage)), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let all = vec![
            listing("x", "Volvo", "V70", 2018, 50_000, 10, 1),
            listing("y", "Volvo", "V70", 2018, 50_000, 10, 1),
            listing("z", "Volvo", "V70", 2018, 50_000, 10, 1),
        ];

        for key in [SortKey::Date, SortKey::Price, SortKey::Mileage] {
            assert_eq!(ids(&query(&all, "", key)), vec!["x", "y", "z"]);
        }
    }
}
