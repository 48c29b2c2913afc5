//! # edifakt
//!
//! UN/EDIFACT ORDERS interchange generation: schema validation of raw
//! purchase-order input, charset-aware segment encoding, stateful
//! message assembly with envelope bookkeeping, batch interchanges, and
//! a best-effort partial decoder.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point — and financial totals round-trip exactly. The codec performs
//! no I/O: callers pass in-memory order data and receive the rendered
//! interchange text (or a structured [`EdifactError`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use edifakt::{OrdersConfig, generate};
//! use serde_json::json;
//!
//! let order = json!({
//!     "message_ref": "MSG001",
//!     "order_number": "PO-2024-001",
//!     "order_date": "20240615",
//!     "currency": "EUR",
//!     "parties": [
//!         {"qualifier": "BY", "id": "BUYER-GMBH", "name": "Buyer GmbH"},
//!         {"qualifier": "SU", "id": "SUPPLIER-AG"},
//!     ],
//!     "items": [
//!         {"product_code": "WIDGET-1", "quantity": "10.00", "price": "12.50"},
//!     ],
//! });
//!
//! let message = generate(&order, &OrdersConfig::default()).unwrap();
//! assert!(message.starts_with("UNA:+,? '"));
//! assert!(message.contains("MOA+86:125,00'"));
//! ```
//!
//! ## Pipeline
//!
//! raw mapping → [`validate_order`] → [`Order`] → [`assemble`] →
//! [`SegmentSequence`] → [`verify_structure`] → rendered text.
//! [`assemble_batch`] repeats the middle stage per order under one
//! shared envelope; [`decode`] runs independently on finished text.

pub mod core;
pub mod decode;
pub mod encode;

pub use crate::core::*;
pub use crate::decode::{DecodedOrder, DecodedParty, decode};
pub use crate::encode::{
    Segment, SegmentKind, SegmentSequence, assemble, assemble_batch, check_structure, escape,
    verify_structure,
};

use serde_json::Value;

/// Validate one raw order, assemble it, structurally check the result,
/// and render the full interchange text.
pub fn generate(raw: &Value, config: &OrdersConfig) -> Result<String, EdifactError> {
    let order = validate_order(raw, config)?;
    let sequence = assemble(&order, config)?;
    check_structure(sequence.segments())?;
    Ok(sequence.render(&config.line_ending))
}

/// Validate and assemble N raw orders under one shared envelope and
/// render the batch interchange text. Fails fast on the first invalid
/// member — partial batches are never emitted.
pub fn generate_batch(orders: &[Value], config: &OrdersConfig) -> Result<String, EdifactError> {
    let sequence = assemble_batch(orders, config)?;
    check_structure(sequence.segments())?;
    Ok(sequence.render(&config.line_ending))
}
