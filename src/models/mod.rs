//! Row structs, create/update DTOs and the derived values computed from them.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - An update DTO (all `Option` fields) where the entity can be patched

pub mod actor;
pub mod genre;
pub mod hall;
pub mod performance;
pub mod play;
pub mod reservation;
pub mod ticket;
pub mod user;

pub use actor::Actor;
pub use genre::Genre;
pub use hall::TheatreHall;
pub use performance::{Performance, PerformanceDetail};
pub use play::{Play, PlayDetail};
pub use reservation::{Reservation, ReservationDetail};
pub use ticket::{NewTicket, Ticket, ValidTicket};
pub use user::User;
