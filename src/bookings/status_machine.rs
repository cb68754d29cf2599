use crate::bookings::models::BookingStatus;

/// Allowed booking status transitions
///
/// Pending → Confirmed | Cancelled, Confirmed → Completed | Cancelled.
/// Completed and Cancelled are terminal. Setting the current status again is
/// accepted as a no-op.
pub struct StatusMachine;

impl StatusMachine {
    pub fn is_valid_transition(from: BookingStatus, to: BookingStatus) -> bool {
        if from == to {
            return true;
        }

        use BookingStatus::*;
        match from {
            Pending => matches!(to, Confirmed | Cancelled),
            Confirmed => matches!(to, Completed | Cancelled),
            Completed | Cancelled => false,
        }
    }

    pub fn transition(from: BookingStatus, to: BookingStatus) -> Result<BookingStatus, String> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(format!("Invalid status transition from {} to {}", from, to))
        }
    }
}
