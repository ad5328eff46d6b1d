pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::SiteConfig;

pub use adapters::{backend::SimulatedBackend, clock::SystemClock};
pub use core::{app::ClinicApp, engine::SiteEngine};
pub use domain::event::{Effect, Event, Step};
pub use utils::error::{Result, SiteError};
