// Lodging catalog and booking request pipeline for the Green Coffee Estate site

pub mod api;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod http_store;
pub mod identity;
pub mod notice;
pub mod service;
pub mod store;

// Re-export key types for convenience
pub use api::{ApiResponse, BookingEndpoint, BookingForm, CatalogEndpoint};
pub use booking::{
    BookingError, BookingErrorKind, BookingRecord, BookingRequest, BookingStatus,
    BookingValidator, DateRangeViolation, NewBooking, RecommendedAction,
};
pub use catalog::{CatalogError, LodgingCatalog, LodgingRecord, Price};
pub use config::{ConfigError, SiteConfig, StoreConfig};
pub use http_store::HttpDocumentStore;
pub use identity::{AuthSession, IdentityProvider, StaticIdentity};
pub use notice::{Notice, NoticeKind};
pub use service::BookingService;
pub use store::{BookingStore, CollectionPath, InMemoryBookingStore, StoreError};
