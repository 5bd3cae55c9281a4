// Booking requests, records and the validation rules applied before a
// request is handed to the booking store

use crate::catalog::LodgingCatalog;
use crate::store::StoreError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// Calendar dates arrive as HTML date input values
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Which semantic date rule was broken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeViolation {
    CheckInInPast,
    CheckOutNotAfterCheckIn,
}

impl DateRangeViolation {
    pub fn reason(&self) -> &'static str {
        match self {
            DateRangeViolation::CheckInInPast => "check-in in the past",
            DateRangeViolation::CheckOutNotAfterCheckIn => "check-out not after check-in",
        }
    }
}

impl fmt::Display for DateRangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Requester is not authenticated")]
    NotAuthenticated,

    #[error("Lodging not found: {lodging_id}")]
    LodgingNotFound { lodging_id: String },

    #[error("Missing or unparseable field: {field}")]
    IncompleteInput { field: &'static str },

    #[error("Invalid date range: {0}")]
    InvalidDateRange(DateRangeViolation),

    #[error("Invalid guest count: {0}")]
    InvalidGuestCount(i64),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] StoreError),
}

// Stable, payload-free error category for callers that branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingErrorKind {
    NotAuthenticated,
    LodgingNotFound,
    IncompleteInput,
    InvalidDateRange,
    InvalidGuestCount,
    PersistenceFailure,
}

// What the caller should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendedAction {
    RetryAfterWait,
    GiveUp,
    Reprompt,
    ManualRetry,
}

impl BookingError {
    pub fn kind(&self) -> BookingErrorKind {
        match self {
            BookingError::NotAuthenticated => BookingErrorKind::NotAuthenticated,
            BookingError::LodgingNotFound { .. } => BookingErrorKind::LodgingNotFound,
            BookingError::IncompleteInput { .. } => BookingErrorKind::IncompleteInput,
            BookingError::InvalidDateRange(_) => BookingErrorKind::InvalidDateRange,
            BookingError::InvalidGuestCount(_) => BookingErrorKind::InvalidGuestCount,
            BookingError::PersistenceFailure(_) => BookingErrorKind::PersistenceFailure,
        }
    }

    pub fn recommended_action(&self) -> RecommendedAction {
        match self.kind() {
            BookingErrorKind::NotAuthenticated => RecommendedAction::RetryAfterWait,
            BookingErrorKind::LodgingNotFound => RecommendedAction::GiveUp,
            BookingErrorKind::IncompleteInput
            | BookingErrorKind::InvalidDateRange
            | BookingErrorKind::InvalidGuestCount => RecommendedAction::Reprompt,
            BookingErrorKind::PersistenceFailure => RecommendedAction::ManualRetry,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

// Candidate booking as supplied by the caller. Dates stay raw so that
// missing and unparseable values can be reported as incomplete input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub lodging_id: String,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub guests: i64,
}

impl BookingRequest {
    pub fn new(lodging_id: &str, check_in_date: &str, check_out_date: &str, guests: i64) -> Self {
        Self {
            lodging_id: lodging_id.to_string(),
            check_in_date: Some(check_in_date.to_string()),
            check_out_date: Some(check_out_date.to_string()),
            guests,
        }
    }
}

/// A request that passed validation, ready for the booking store.
///
/// Carries no timestamp: the store stamps the document with its own clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub lodging_id: String,
    pub lodging_name: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: u64,
    pub submitter_id: String,
    pub status: BookingStatus,
}

impl NewBooking {
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }

    pub(crate) fn into_record(self, id: String, submitted_at: DateTime<Utc>) -> BookingRecord {
        BookingRecord {
            id,
            lodging_id: self.lodging_id,
            lodging_name: self.lodging_name,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            guests: self.guests,
            submitter_id: self.submitter_id,
            status: self.status,
            submitted_at,
        }
    }
}

// A booking as persisted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    pub lodging_id: String,
    pub lodging_name: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: u64,
    pub submitter_id: String,
    pub status: BookingStatus,
    pub submitted_at: DateTime<Utc>,
}

fn parse_date(value: Option<&str>, field: &'static str) -> Result<NaiveDate, BookingError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| NaiveDate::parse_from_str(v, DATE_FORMAT).ok())
        .ok_or(BookingError::IncompleteInput { field })
}

// Applies the booking rules in a fixed order; the first broken rule wins
#[derive(Debug, Clone)]
pub struct BookingValidator {
    catalog: Arc<LodgingCatalog>,
}

impl BookingValidator {
    pub fn new(catalog: Arc<LodgingCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &LodgingCatalog {
        &self.catalog
    }

    /// Validates `request` for the requester `identity` on the calendar day `today`.
    ///
    /// Rules, in order:
    /// 1. identity present and non-empty
    /// 2. lodging exists in the catalog
    /// 3. both dates present and `YYYY-MM-DD`
    /// 4. check-in not before `today`
    /// 5. check-out strictly after check-in
    /// 6. at least one guest
    pub fn validate(
        &self,
        request: &BookingRequest,
        identity: Option<&str>,
        today: NaiveDate,
    ) -> Result<NewBooking, BookingError> {
        let submitter_id = match identity {
            Some(id) if !id.is_empty() => id,
            _ => return Err(BookingError::NotAuthenticated),
        };

        let lodging = self.catalog.find_by_id(&request.lodging_id).ok_or_else(|| {
            BookingError::LodgingNotFound {
                lodging_id: request.lodging_id.clone(),
            }
        })?;

        let check_in = parse_date(request.check_in_date.as_deref(), "checkInDate")?;
        let check_out = parse_date(request.check_out_date.as_deref(), "checkOutDate")?;

        if check_in < today {
            return Err(BookingError::InvalidDateRange(
                DateRangeViolation::CheckInInPast,
            ));
        }

        if check_out <= check_in {
            return Err(BookingError::InvalidDateRange(
                DateRangeViolation::CheckOutNotAfterCheckIn,
            ));
        }

        let guests = u64::try_from(request.guests)
            .ok()
            .filter(|g| *g >= 1)
            .ok_or(BookingError::InvalidGuestCount(request.guests))?;

        Ok(NewBooking {
            lodging_id: lodging.id.clone(),
            lodging_name: lodging.name.clone(),
            check_in_date: check_in,
            check_out_date: check_out,
            guests,
            submitter_id: submitter_id.to_string(),
            status: BookingStatus::Pending,
        })
    }
}
