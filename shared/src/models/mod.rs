//! Domain models for the CropAdviser platform

mod crop;
mod recommendation;
mod region;
mod user;
mod weather;

pub use crop::*;
pub use recommendation::*;
pub use region::*;
pub use user::*;
pub use weather::*;
