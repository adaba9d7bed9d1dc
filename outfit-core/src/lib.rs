//! Core library for the outfit weather pages.
//!
//! This crate defines:
//! - The `/api/weather` payload and an HTTP source for it
//! - Pure derivation of display strings and outfit hints
//! - Slot rendering with partial updates
//! - A cancellable five-minute poll loop
//! - Page controllers for home, coordination, my page and closet cleanup
//!
//! It is used by `outfit-cli`, but has no terminal or DOM dependency of its own.

pub mod carousel;
pub mod cleanup;
pub mod config;
pub mod derive;
pub mod error;
pub mod model;
pub mod page;
pub mod poll;
pub mod preference;
pub mod render;
pub mod slots;
pub mod source;
pub mod ui;

pub use config::Config;
pub use error::{FetchError, PollError, ValidationError};
pub use model::{DerivedDisplay, NowWeather, OutfitItem, TomorrowWeather, WeatherPayload};
pub use poll::{POLL_PERIOD, PollLoop, PollState};
pub use slots::{PageKind, Slot, SlotContent, SlotSet};
pub use source::{WeatherSource, http::HttpWeatherSource};
