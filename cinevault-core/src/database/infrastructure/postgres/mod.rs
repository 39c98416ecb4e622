//! PostgreSQL infrastructure adapters implementing the database ports.

pub mod repositories;

pub use repositories::actors::PostgresActorsRepository;
pub use repositories::likes::PostgresLikesRepository;
pub use repositories::movies::PostgresMoviesRepository;
pub use repositories::reviews::PostgresReviewsRepository;
pub use repositories::users::PostgresUsersRepository;
