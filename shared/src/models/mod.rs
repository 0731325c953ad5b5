//! Domain models for the AgroLens risk service

mod crop;
mod features;
mod recommendation;
mod risk;
mod satellite;
mod weather;

pub use crop::*;
pub use features::*;
pub use recommendation::*;
pub use risk::*;
pub use satellite::*;
pub use weather::*;
