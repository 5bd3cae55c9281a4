// User-facing notices for the booking form dialog
// Pure mapping from outcomes to text, no validation happens here

use crate::booking::{BookingError, BookingRecord, DateRangeViolation, DATE_FORMAT};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    fn error(title: &str, message: String) -> Self {
        Self {
            title: title.to_string(),
            message,
            kind: NoticeKind::Error,
        }
    }

    pub fn booking_submitted(record: &BookingRecord) -> Self {
        let guests = if record.guests == 1 { "guest" } else { "guests" };
        Self {
            title: "Booking Received!".to_string(),
            message: format!(
                "You have booked {} from {} to {} for {} {}.",
                record.lodging_name,
                record.check_in_date.format(DATE_FORMAT),
                record.check_out_date.format(DATE_FORMAT),
                record.guests,
                guests
            ),
            kind: NoticeKind::Success,
        }
    }

    pub fn booking_failed(error: &BookingError) -> Self {
        match error {
            BookingError::NotAuthenticated => Self::error(
                "Authentication Required",
                "Please wait until your session is ready or refresh the page.".to_string(),
            ),
            BookingError::LodgingNotFound { .. } => Self::error(
                "Suite Not Found",
                "The suite you are trying to book does not exist.".to_string(),
            ),
            BookingError::IncompleteInput { .. } => Self::error(
                "Incomplete Input",
                "Please fill in both the check-in and check-out dates.".to_string(),
            ),
            BookingError::InvalidDateRange(DateRangeViolation::CheckInInPast) => Self::error(
                "Invalid Date",
                "The check-in date cannot be in the past.".to_string(),
            ),
            BookingError::InvalidDateRange(DateRangeViolation::CheckOutNotAfterCheckIn) => {
                Self::error(
                    "Invalid Date",
                    "The check-out date must be after the check-in date.".to_string(),
                )
            }
            BookingError::InvalidGuestCount(_) => Self::error(
                "Invalid Guest Count",
                "Please book for at least one guest.".to_string(),
            ),
            BookingError::PersistenceFailure(_) => Self::error(
                "Booking Failed",
                "We could not save your booking. Please try again.".to_string(),
            ),
        }
    }
}
