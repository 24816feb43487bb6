mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, ClientConfig, Endpoint, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{
    AdhesionQuery, ArpItemQuery, ArpQuery, ParamValue, Query, QueryCommon, QueryParams,
};
