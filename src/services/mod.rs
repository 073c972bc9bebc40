//! Operations callers use. Every write runs inside
//! [`crate::database::Database::atomic`].

pub mod booking;
pub mod catalog;

use tracing::{info, warn};

use crate::models::performance::PerformanceDetail;
use crate::types::DbId;

pub use booking::BookingService;
pub use catalog::{CascadeSummary, CatalogService};

/// Structured creation log shared by every service.
pub(crate) fn log_creation(entity: &'static str, id: DbId) {
    info!(entity, id, "Created {} with ID {}", entity, id);
}

/// Availability is never clamped; a performance with more tickets than seats
/// is reported at `warn` whenever it is read.
pub(crate) fn warn_if_overbooked(detail: &PerformanceDetail) {
    if detail.is_overbooked() {
        warn!(
            performance_id = detail.performance.id,
            capacity = detail.capacity(),
            tickets_sold = detail.tickets_sold,
            available = detail.available_tickets(),
            "Performance has more tickets than seats"
        );
    }
}
