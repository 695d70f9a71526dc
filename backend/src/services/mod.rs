//! Business logic services for CropAdviser

pub mod recommendation;
pub mod seed;
pub mod user;
pub mod weather;

pub use recommendation::RecommendationService;
pub use seed::SeedService;
pub use user::UserService;
pub use weather::WeatherService;
