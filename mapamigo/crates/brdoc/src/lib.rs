//! Masking and checksum primitives for Brazilian document and contact fields.
//!
//! The crate groups the pure text transformations shared by every form in the
//! address book: progressive input masks (CPF, CEP, phone), the CPF check-digit
//! algorithm, federative-unit shape checks, and the small text helpers used by
//! name and e-mail fields. Everything here is deterministic and free of I/O so
//! callers can run it on every keystroke.

pub mod cep;
pub mod cpf;
pub mod phone;
pub mod text;
pub mod uf;
