// Domain layer: page model, event/effect vocabulary and ports (interfaces).
// No runtime dependencies beyond serde/chrono/async-trait.

pub mod event;
pub mod model;
pub mod ports;
