pub mod auth;
pub mod config;
pub mod contact;
pub mod controllers;
pub mod gateway;
pub mod models;
pub mod query;
pub mod validation;

pub use config::Config;
pub use gateway::{create_gateway, GatewayError, ListingGateway};
pub use models::{Draft, Field, Listing, ListingFields};
pub use query::SortKey;
