//! Core library for the city weather widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather lookup behind a provider trait
//! - The widget state container, its renderer and event session
//!
//! It is used by `weather-cli`, but can also be driven by any other front-end
//! that can feed input events and draw a [`View`].

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod session;
pub mod widget;

pub use config::Config;
pub use error::LookupError;
pub use model::{IconRef, WeatherReport};
pub use provider::{WeatherProvider, provider_from_config};
pub use render::View;
pub use session::{Msg, Session, Step};
pub use widget::{FetchTicket, Phase, WeatherWidget};
