// Booking submission: validate, then hand the booking to the store once

use crate::booking::{BookingError, BookingRecord, BookingRequest, BookingValidator, NewBooking};
use crate::catalog::LodgingCatalog;
use crate::identity::IdentityProvider;
use crate::store::BookingStore;
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Validates booking requests and writes the accepted ones to a [`BookingStore`].
///
/// Holds no mutable state: every call is independent and concurrent calls for
/// the same lodging and dates are not reconciled. Nothing is retried.
pub struct BookingService {
    validator: BookingValidator,
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(
        catalog: Arc<LodgingCatalog>,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn BookingStore>,
    ) -> Self {
        Self {
            validator: BookingValidator::new(catalog),
            identity,
            store,
        }
    }

    pub fn catalog(&self) -> &LodgingCatalog {
        self.validator.catalog()
    }

    // `now` is the caller's local time, only its calendar date is used
    pub async fn validate(
        &self,
        request: &BookingRequest,
        now: NaiveDateTime,
    ) -> Result<NewBooking, BookingError> {
        let identity = self.identity.current_identity().await;
        self.validator
            .validate(request, identity.as_deref(), now.date())
    }

    // Exactly one store create per accepted request, none on rejection
    pub async fn submit_booking(
        &self,
        request: &BookingRequest,
        now: NaiveDateTime,
    ) -> Result<BookingRecord, BookingError> {
        let booking = self.validate(request, now).await?;
        let record = self.store.create(booking).await?;
        Ok(record)
    }
}
