// Adapters layer: concrete implementations of the domain ports plus script loading.

pub mod backend;
pub mod clock;
pub mod script;
