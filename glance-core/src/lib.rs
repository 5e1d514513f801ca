//! Core library for the `glance` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The location resolver and the OpenWeather fetcher
//! - Presentation state driving what gets rendered
//!
//! It is used by `glance-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod icon;
pub mod location;
pub mod model;
pub mod provider;
pub mod state;

pub use config::Config;
pub use error::{FetchError, LocationError};
pub use icon::ConditionIcon;
pub use location::Position;
pub use model::{WeatherQuery, WeatherReport};
pub use provider::{WeatherProvider, provider_from_config};
pub use state::{FetchTicket, LookupState, ViewState};
