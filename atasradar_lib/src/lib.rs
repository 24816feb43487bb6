//! Library layer for AtasRadar: configuration, validation, the generative-AI
//! client, and the view models the CLI renders.
//!
//! Wraps the `comprasgov_api` open-data client. Each view owns its loading
//! state through [`Resource`].

pub mod config;
pub mod error;
pub mod genai;
pub mod resource;
pub mod validation;
pub mod views;

pub use comprasgov_api;
pub use comprasgov_api::types;
pub use comprasgov_api::{AdhesionQuery, ArpItemQuery, ArpQuery, Client, ClientConfig, Query};

pub use config::Settings;
pub use error::AtasRadarError;
pub use genai::{GenAiClient, GenAiConfig, GenAiError, InlineImage};
pub use resource::{LoadError, LoadState, Resource};
pub use views::{
    last_year_window, AiAssistant, GeneralDashboard, ItemPage, ItemSearch, SearchFilters,
    SupplierDashboard,
};
