use crate::models::{Draft, Field, ListingFields};
use std::collections::BTreeMap;

pub const MIN_YEAR: i32 = 1900;

/// Field name to error message, in form order
pub type FieldErrors = BTreeMap<Field, String>;

const REQUIRED: [Field; 7] = [
    Field::Brand,
    Field::Model,
    Field::Year,
    Field::Mileage,
    Field::Price,
    Field::OwnerName,
    Field::OwnerPhone,
];

/// Check every rule against the draft and collect all violations.
///
/// Rules are independent: a blank year gets "Year is required" only, an
/// out-of-range year gets "Invalid year" only. Non-numeric text in a numeric
/// field is reported with that field's "Invalid ..." message.
pub fn validate(draft: &Draft, current_year: i32) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in REQUIRED {
        if draft.get(field).trim().is_empty() {
            errors.insert(field, format!("{} is required", field.label()));
        }
    }

    if let Some(year) = non_blank(&draft.year) {
        let in_range = year
            .parse::<i32>()
            .map(|y| (MIN_YEAR..=current_year + 1).contains(&y))
            .unwrap_or(false);
        if !in_range {
            errors.insert(Field::Year, "Invalid year".to_string());
        }
    }

    if let Some(mileage) = non_blank(&draft.mileage) {
        if !is_non_negative(mileage) {
            errors.insert(Field::Mileage, "Invalid mileage".to_string());
        }
    }

    if let Some(price) = non_blank(&draft.price) {
        if !is_non_negative(price) {
            errors.insert(Field::Price, "Invalid price".to_string());
        }
    }

    if let Some(email) = non_blank(&draft.owner_email) {
        if !email.contains('@') {
            errors.insert(Field::OwnerEmail, "Invalid email address".to_string());
        }
    }

    errors
}

/// Validate and, when the draft is acceptable, convert it to a typed payload
pub fn check(draft: &Draft, current_year: i32) -> Result<ListingFields, FieldErrors> {
    let errors = validate(draft, current_year);
    if !errors.is_empty() {
        return Err(errors);
    }

    // validate() guarantees these parse
    let int = |s: &str| s.trim().parse::<i64>().unwrap_or_default();

    Ok(ListingFields {
        brand: draft.brand.trim().to_string(),
        model: draft.model.trim().to_string(),
        year: draft.year.trim().parse().unwrap_or_default(),
        mileage: int(&draft.mileage),
        price: int(&draft.price),
        description: non_blank(&draft.description).map(str::to_string),
        images: draft.images.clone(),
        owner_name: draft.owner_name.trim().to_string(),
        owner_phone: draft.owner_phone.trim().to_string(),
        owner_email: non_blank(&draft.owner_email).map(str::to_string),
    })
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn is_non_negative(value: &str) -> bool {
    value.parse::<i64>().map(|n| n >= 0).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2025;

    fn complete() -> Draft {
        Draft {
            brand: "Volvo".to_string(),
            model: "V70".to_string(),
            year: "2018".to_string(),
            mileage: "150000".to_string(),
            price: "100000".to_string(),
            description: String::new(),
            images: vec![],
            owner_name: "Anna".to_string(),
            owner_phone: "0701234567".to_string(),
            owner_email: String::new(),
        }
    }

    #[test]
    fn complete_draft_has_no_errors() {
        assert!(validate(&complete(), YEAR).is_empty());
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = validate(&Draft::default(), YEAR);

        assert_eq!(errors.len(), 7);
        assert_eq!(errors[&Field::Brand], "Brand is required");
        assert_eq!(errors[&Field::Mileage], "Mileage is required");
        assert_eq!(errors[&Field::OwnerName], "Owner name is required");
        assert_eq!(errors[&Field::OwnerPhone], "Owner phone is required");
        assert!(!errors.contains_key(&Field::Description));
        assert!(!errors.contains_key(&Field::OwnerEmail));
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut draft = complete();
        draft.model = "   ".to_string();

        let errors = validate(&draft, YEAR);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&Field::Model], "Model is required");
    }

    #[test]
    fn year_bounds_are_inclusive() {
        for (year, ok) in [
            ("1899", false),
            ("1900", true),
            ("2026", true),
            ("2027", false),
        ] {
            let mut draft = complete();
            draft.year = year.to_string();
            let errors = validate(&draft, YEAR);
            assert_eq!(errors.is_empty(), ok, "year {year}");
            if !ok {
                assert_eq!(errors[&Field::Year], "Invalid year");
            }
        }
    }

    #[test]
    fn negative_and_non_numeric_amounts_are_invalid() {
        let mut draft = complete();
        draft.mileage = "-1".to_string();
        draft.price = "lots".to_string();
        draft.year = "abc".to_string();

        let errors = validate(&draft, YEAR);
        assert_eq!(errors[&Field::Mileage], "Invalid mileage");
        assert_eq!(errors[&Field::Price], "Invalid price");
        assert_eq!(errors[&Field::Year], "Invalid year");
    }

    #[test]
    fn email_is_optional_but_needs_an_at_sign() {
        let mut draft = complete();
        assert!(validate(&draft, YEAR).is_empty());

        draft.owner_email = "anna.example.com".to_string();
        assert_eq!(
            validate(&draft, YEAR)[&Field::OwnerEmail],
            "Invalid email address"
        );

        draft.owner_email = "anna@example.com".to_string();
        assert!(validate(&draft, YEAR).is_empty());
    }

    #[test]
    fn check_trims_and_types_the_draft() {
        let mut draft = complete();
        draft.brand = "  Volvo ".to_string();
        draft.year = " 2018".to_string();
        draft.description = "  ".to_string();
        draft.owner_email = " anna@example.com ".to_string();
        draft.add_images(["file:///a.jpg", "file:///b.jpg"]);

        let fields = check(&draft, YEAR).unwrap();
        assert_eq!(fields.brand, "Volvo");
        assert_eq!(fields.year, 2018);
        assert_eq!(fields.mileage, 150_000);
        assert_eq!(fields.description, None);
        assert_eq!(fields.owner_email.as_deref(), Some("anna@example.com"));
        assert_eq!(fields.images, vec!["file:///a.jpg", "file:///b.jpg"]);
    }

    #[test]
    fn check_rejects_invalid_drafts() {
        let errors = check(&Draft::default(), YEAR).unwrap_err();
        assert!(errors.contains_key(&Field::Brand));
    }
}
