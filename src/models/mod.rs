// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetTier, Coordinates, Favorite, HistoryEntry, RecommendContext, ScoredVenue, Venue,
    VenueTag, VenueType, WeatherKind, WeatherReading,
};
pub use requests::{AddFavoriteRequest, QuestRequest, RecommendRequest};
pub use responses::{ErrorResponse, HealthResponse, MessageResponse, PlaceResponse};
