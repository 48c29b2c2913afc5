use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// NAD qualifier for the buyer role. Every order needs one.
pub const BUYER_QUALIFIER: &str = "BY";

/// NAD qualifier for the supplier role. Every order needs one.
pub const SUPPLIER_QUALIFIER: &str = "SU";

/// Default unit of measure when an item carries none.
pub const DEFAULT_UNIT: &str = "EA";

/// A validated purchase order — the only input the assembler accepts.
///
/// Built exclusively by [`validate_order`](crate::core::validate_order)
/// from sanitized raw input; never mutated afterwards. Dates are kept as
/// the digit strings that go on the wire (already checked against the
/// configured [`DateFormat`](crate::core::DateFormat)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Message reference carried in UNH/UNT, ≤ 14 chars.
    pub message_ref: String,
    /// Order (document) number carried in BGM, ≤ 35 chars.
    pub order_number: String,
    /// Order date digit string (DTM qualifier 137).
    pub order_date: String,
    /// Requested delivery date digit string (DTM qualifier 2).
    pub delivery_date: Option<String>,
    /// ISO 4217 currency code, ≤ 3 chars (CUX).
    pub currency: Option<String>,
    /// Delivery location, ≤ 35 chars (LOC).
    pub delivery_location: Option<String>,
    /// Payment terms text, ≤ 35 chars (PAT).
    pub payment_terms: Option<String>,
    /// Tax rate percentage applied to the order total (TAX).
    pub tax_rate: Option<Decimal>,
    /// Free-text instructions, chunked into FTX segments.
    pub special_instructions: Option<String>,
    /// Incoterms code, ≤ 3 chars (TOD).
    pub incoterms: Option<String>,
    /// Parties in input order; ≥ 2, with at least one buyer and one
    /// supplier role.
    pub parties: Vec<OrderParty>,
    /// Line items in input order; ≥ 1.
    pub items: Vec<OrderItem>,
}

/// One involved party (NAD, optionally CTA).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderParty {
    /// Role qualifier from the configured accepted set, exactly 2 chars.
    pub qualifier: String,
    /// Party identification, ≤ 35 chars.
    pub id: String,
    /// Display name; truncated to the configured field length.
    pub name: Option<String>,
    /// Address line; truncated to the configured field length.
    pub address: Option<String>,
    /// Contact value (phone, email, person).
    pub contact: Option<String>,
    /// Contact function code (CTA qualifier), defaults to "IC".
    pub contact_type: Option<String>,
}

/// One order line (LIN, QTY, PRI, optionally IMD).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product code, ≤ 35 chars; never truncated.
    pub product_code: String,
    /// Item description; truncated to the configured field length.
    pub description: Option<String>,
    /// Ordered quantity, > 0.
    pub quantity: Decimal,
    /// Unit price, ≥ 0.
    pub price: Decimal,
    /// Unit of measure, defaults to [`DEFAULT_UNIT`].
    pub unit: String,
}

impl Order {
    /// Whether any party carries the given role qualifier.
    pub fn has_role(&self, qualifier: &str) -> bool {
        self.parties.iter().any(|p| p.qualifier == qualifier)
    }
}
