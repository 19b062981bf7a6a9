//! MapAmigo library modules.

pub mod domain;
pub mod outbound;
pub mod settings;
