//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and infrastructure
//! concerns:
//!
//! - **storage**: in-memory and file-backed key-value stores
//! - **viacep**: reqwest-backed postal lookup against the ViaCEP API
//!
//! They contain no business logic.

pub mod storage;
pub mod viacep;
