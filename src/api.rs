// Request handlers for the site: catalog read endpoint and the booking form
//
// Handlers are framework-agnostic: they take already-extracted input and return
// a status code plus a JSON body for whatever HTTP layer embeds them.

use crate::booking::{BookingError, BookingErrorKind, BookingRequest};
use crate::catalog::{LodgingCatalog, LodgingRecord, Price};
use crate::notice::Notice;
use crate::service::BookingService;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn internal_error(detail: String) -> Self {
        Self::new(
            500,
            json!({ "message": "Internal Server Error", "error": detail }),
        )
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// Lodging as shown to visitors, price rendered for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LodgingView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub location: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub price_per_night: String,
    pub price: &'a Price,
    pub guests_capacity: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub amenities: &'a [String],
}

impl<'a> From<&'a LodgingRecord> for LodgingView<'a> {
    fn from(lodging: &'a LodgingRecord) -> Self {
        Self {
            id: &lodging.id,
            name: &lodging.name,
            location: &lodging.location,
            description: &lodging.description,
            image_url: &lodging.image_url,
            price_per_night: lodging.price_per_night.display(),
            price: &lodging.price_per_night,
            guests_capacity: lodging.guests_capacity,
            bedrooms: lodging.bedrooms,
            bathrooms: lodging.bathrooms,
            amenities: &lodging.amenities,
        }
    }
}

pub struct CatalogEndpoint {
    catalog: Arc<LodgingCatalog>,
}

impl CatalogEndpoint {
    pub fn new(catalog: Arc<LodgingCatalog>) -> Self {
        Self { catalog }
    }

    // GET /api/lodgings
    pub fn list_lodgings(&self) -> ApiResponse {
        let views: Vec<LodgingView> = self.catalog.list_all().iter().map(LodgingView::from).collect();
        match serde_json::to_value(&views) {
            Ok(body) => {
                info!(count = views.len(), "serving lodging catalog");
                ApiResponse::new(200, body)
            }
            Err(e) => {
                error!(error = %e, "failed to serialize lodging catalog");
                ApiResponse::internal_error(e.to_string())
            }
        }
    }

    // GET /api/lodgings/{id}
    pub fn get_lodging(&self, id: &str) -> ApiResponse {
        let Some(lodging) = self.catalog.find_by_id(id) else {
            return ApiResponse::new(404, json!({ "message": "Lodging not found" }));
        };
        match serde_json::to_value(LodgingView::from(lodging)) {
            Ok(body) => ApiResponse::new(200, body),
            Err(e) => {
                error!(error = %e, lodging_id = id, "failed to serialize lodging");
                ApiResponse::internal_error(e.to_string())
            }
        }
    }
}

/// Booking form fields as posted by the browser.
///
/// Guest counts below one are raised to one here. That is input shaping for
/// the form only; [`BookingRequest`] itself is validated strictly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub lodging_id: String,
    #[serde(default)]
    pub check_in_date: Option<String>,
    #[serde(default)]
    pub check_out_date: Option<String>,
    #[serde(default)]
    pub guests: Option<i64>,
}

impl BookingForm {
    pub fn into_request(self) -> BookingRequest {
        BookingRequest {
            lodging_id: self.lodging_id,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            guests: self.guests.unwrap_or(1).max(1),
        }
    }
}

fn error_status(kind: BookingErrorKind) -> u16 {
    match kind {
        BookingErrorKind::NotAuthenticated => 401,
        BookingErrorKind::LodgingNotFound => 404,
        BookingErrorKind::IncompleteInput
        | BookingErrorKind::InvalidDateRange
        | BookingErrorKind::InvalidGuestCount => 422,
        BookingErrorKind::PersistenceFailure => 502,
    }
}

pub struct BookingEndpoint {
    service: Arc<BookingService>,
}

impl BookingEndpoint {
    pub fn new(service: Arc<BookingService>) -> Self {
        Self { service }
    }

    // POST /api/bookings with a JSON form body
    pub async fn submit_json(&self, body: &str, now: NaiveDateTime) -> ApiResponse {
        match serde_json::from_str::<BookingForm>(body) {
            Ok(form) => self.submit(form, now).await,
            Err(e) => {
                warn!(error = %e, "malformed booking form");
                ApiResponse::new(
                    400,
                    json!({ "error": "badRequest", "message": format!("Malformed booking form: {}", e) }),
                )
            }
        }
    }

    pub async fn submit(&self, form: BookingForm, now: NaiveDateTime) -> ApiResponse {
        let request = form.into_request();

        match self.service.submit_booking(&request, now).await {
            Ok(record) => {
                info!(
                    lodging_id = %record.lodging_id,
                    booking_id = %record.id,
                    nights = (record.check_out_date - record.check_in_date).num_days(),
                    "booking request accepted"
                );
                let notice = Notice::booking_submitted(&record);
                ApiResponse::new(201, json!({ "booking": record, "notice": notice }))
            }
            Err(err) => {
                let kind = err.kind();
                if let BookingError::PersistenceFailure(source) = &err {
                    error!(lodging_id = %request.lodging_id, error = %source, "failed to store booking");
                } else {
                    warn!(lodging_id = %request.lodging_id, ?kind, reason = %err, "booking request rejected");
                }
                ApiResponse::new(
                    error_status(kind),
                    json!({
                        "error": kind,
                        "message": err.to_string(),
                        "notice": Notice::booking_failed(&err),
                    }),
                )
            }
        }
    }
}
