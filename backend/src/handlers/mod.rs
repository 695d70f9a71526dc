//! HTTP handlers for CropAdviser

pub mod health;
pub mod init;
pub mod recommendation;
pub mod region;
pub mod user;
pub mod weather;

pub use health::*;
pub use init::*;
pub use recommendation::*;
pub use region::*;
pub use user::*;
pub use weather::*;
