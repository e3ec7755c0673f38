//! Per-store reservation configuration
//!
//! One `ReservationSettings` record per store, keyed by the store's id.
//!
//! Validation semantics:
//! - enabled implies `max_reservation_days` in `[1, 365]`
//! - enabled with 0 days is always rejected
//! - disabled records already holding a nonzero day count are accepted
//!   on read; writes through the disable path normalize the count to 0

mod settings;

pub use settings::{
    ReservationService, ReservationSettings, ReservationSettingsUpdate, MAX_RESERVATION_DAYS,
};
