pub mod factory;
pub mod local;
pub mod remote;
pub mod traits;
pub mod types;

pub use factory::create_gateway;
pub use local::LocalStore;
pub use remote::{RemoteClient, RemoteTable};
pub use traits::ListingGateway;
pub use types::{GatewayError, GatewayResult};
