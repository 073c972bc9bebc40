//! One repository per table group.
//!
//! Repositories are stateless unit structs with associated async functions.
//! Single-statement functions take any `PgExecutor`, so they run against the
//! pool or inside a transaction; functions issuing several statements take
//! `&mut PgConnection` and are meant to be called within
//! [`crate::database::Database::atomic`].

pub mod actor_repo;
pub mod genre_repo;
pub mod hall_repo;
pub mod performance_repo;
pub mod play_repo;
pub mod reservation_repo;
pub mod ticket_repo;
pub mod user_repo;

pub use actor_repo::ActorRepo;
pub use genre_repo::GenreRepo;
pub use hall_repo::HallRepo;
pub use performance_repo::PerformanceRepo;
pub use play_repo::PlayRepo;
pub use reservation_repo::ReservationRepo;
pub use ticket_repo::TicketRepo;
pub use user_repo::UserRepo;
