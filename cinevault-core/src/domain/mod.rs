pub mod actors;
pub mod likes;
pub mod movies;
pub mod reviews;
pub mod search;
pub mod users;
pub mod validation;

pub use actors::{ActorRequest, ActorResponse};
pub use likes::{LikeRequest, LikeResponse};
pub use movies::{
    MovieDeleteOutcome, MovieDeleteStatus, MovieDetailsResponse, MovieRequest,
    MovieResponse, ReviewUserResponse,
};
pub use reviews::{ReviewRequest, ReviewResponse};
pub use search::{MovieFilter, SearchMoviesAltRequest, SearchMoviesRequest};
pub use users::{
    SearchUsersRequest, UserQuery, UserRecord, UserRequest, UserResponse,
    UserStatsResponse,
};
pub use validation::{Validate, ValidationError};
