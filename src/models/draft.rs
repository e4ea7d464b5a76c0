use super::Listing;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editable listing fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Brand,
    Model,
    Year,
    #[serde(rename = "km")]
    Mileage,
    Price,
    Description,
    OwnerName,
    OwnerPhone,
    OwnerEmail,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Brand,
        Field::Model,
        Field::Year,
        Field::Mileage,
        Field::Price,
        Field::Description,
        Field::OwnerName,
        Field::OwnerPhone,
        Field::OwnerEmail,
    ];

    /// Label shown next to the input and used in error messages
    pub fn label(self) -> &'static str {
        match self {
            Field::Brand => "Brand",
            Field::Model => "Model",
            Field::Year => "Year",
            Field::Mileage => "Mileage",
            Field::Price => "Price",
            Field::Description => "Description",
            Field::OwnerName => "Owner name",
            Field::OwnerPhone => "Owner phone",
            Field::OwnerEmail => "Owner email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// In-progress copy of a listing's editable fields, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub mileage: String,
    pub price: String,
    pub description: String,
    pub images: Vec<String>,
    pub owner_name: String,
    pub owner_phone: String,
    pub owner_email: String,
}

impl Draft {
    /// Preload an edit form from a stored listing
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            brand: listing.brand.clone(),
            model: listing.model.clone(),
            year: listing.year.to_string(),
            mileage: listing.mileage.to_string(),
            price: listing.price.to_string(),
            description: listing.description.clone().unwrap_or_default(),
            images: listing.images.clone(),
            owner_name: listing.owner_name.clone(),
            owner_phone: listing.owner_phone.clone(),
            owner_email: listing.owner_email.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Brand => &self.brand,
            Field::Model => &self.model,
            Field::Year => &self.year,
            Field::Mileage => &self.mileage,
            Field::Price => &self.price,
            Field::Description => &self.description,
            Field::OwnerName => &self.owner_name,
            Field::OwnerPhone => &self.owner_phone,
            Field::OwnerEmail => &self.owner_email,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Brand => self.brand = value,
            Field::Model => self.model = value,
            Field::Year => self.year = value,
            Field::Mileage => self.mileage = value,
            Field::Price => self.price = value,
            Field::Description => self.description = value,
            Field::OwnerName => self.owner_name = value,
            Field::OwnerPhone => self.owner_phone = value,
            Field::OwnerEmail => self.owner_email = value,
        }
    }

    /// Append picked or captured photo URIs after the existing ones
    pub fn add_images<I, S>(&mut self, uris: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images.extend(uris.into_iter().map(Into::into));
    }

    /// Remove the photo at `index`, returning its URI
    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Move a photo to a new display position. Out of range indexes are ignored.
    pub fn move_image(&mut self, from: usize, to: usize) -> bool {
        if from >= self.images.len() || to >= self.images.len() {
            return false;
        }
        let uri = self.images.remove(from);
        self.images.insert(to, uri);
        true
    }
}
