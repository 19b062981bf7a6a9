//! Domain types, services, and form flows.
//!
//! Purpose: hold everything the application knows about accounts and
//! contacts independent of any storage backend or user interface. Records
//! document their serialisation contracts (serde) in each type's Rustdoc;
//! services stay generic over the storage port so tests can swap backends.
//!
//! Public surface:
//! - DomainError / ErrorCode — uniform failure payload for both stores.
//! - User / UserPatch / OwnerId — account records and the partition key.
//! - Contact / ContactId / ContactPatch — address-book records.
//! - Coordinates — a geocoded map pin.
//! - AccountService / ContactService — record stores over a key-value port.
//! - form / forms — the generic controller and the concrete screens.

pub mod account_service;
pub mod contact;
pub mod contact_service;
pub mod error;
pub mod form;
pub mod forms;
pub mod location;
pub mod ports;
pub mod routing;
pub mod user;
pub mod validation;

pub use self::account_service::AccountService;
pub use self::contact::{Contact, ContactId, ContactIdError, ContactPatch};
pub use self::contact_service::ContactService;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::location::Coordinates;
pub use self::user::{OwnerId, User, UserPatch};
