//! Core configuration, order model, decimal engine, and validation.
//!
//! Everything here is synchronous and allocation-only: validated input
//! goes in, an immutable [`Order`] model comes out, and the decimal
//! engine guarantees exact financial arithmetic throughout.

mod config;
pub mod decimal;
mod error;
mod sanitize;
mod types;
mod validation;

pub use config::*;
pub use error::EdifactError;
pub use sanitize::{sanitize, strip_control};
pub use types::*;
pub use validation::validate_order;

pub(crate) use error::preview;
