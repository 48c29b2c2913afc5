//! Per-segment-type builders.
//!
//! Each builder takes typed, already-validated arguments plus the
//! configuration and returns one sealed [`Segment`]. Cross-cutting
//! rules applied uniformly: release-character escaping, free-text
//! truncation, precision gating on decimal fields, and the segment
//! length ceiling.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::escape::{ELEMENT_SEP, TERMINATOR, escape, truncate_field};
use crate::core::{EdifactError, OrderParty, OrdersConfig, decimal, preview};

/// DTM qualifier for the order date.
pub const DTM_ORDER_DATE: &str = "137";
/// DTM qualifier for the requested delivery date.
pub const DTM_DELIVERY_DATE: &str = "2";
/// MOA qualifier for the message grand total.
pub const MOA_GRAND_TOTAL: &str = "86";
/// MOA qualifier for the tax amount.
pub const MOA_TAX_AMOUNT: &str = "124";

/// Closed enumeration of the segment roles this codec emits.
///
/// Structural validation and batch envelope stripping key on this enum,
/// never on string-prefix matching of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// UNA — service string advice.
    ServiceAdvice,
    /// UNB — interchange header.
    InterchangeHeader,
    /// UNZ — interchange trailer.
    InterchangeTrailer,
    /// UNH — message header.
    MessageHeader,
    /// UNT — message trailer.
    MessageTrailer,
    /// BGM — beginning of message / document reference.
    DocumentReference,
    /// DTM — date/time/period.
    DateTime,
    /// NAD — name and address.
    Party,
    /// CTA — contact information.
    Contact,
    /// LIN — line item.
    LineItem,
    /// IMD — item description.
    ItemDescription,
    /// QTY — quantity.
    Quantity,
    /// PRI — price details.
    Price,
    /// MOA — monetary amount.
    MonetaryAmount,
    /// TAX — duty/tax/fee details.
    Tax,
    /// LOC — place/location identification.
    Location,
    /// PAT — payment terms basis.
    PaymentTerms,
    /// TOD — terms of delivery.
    DeliveryTerms,
    /// FTX — free text.
    FreeText,
    /// CUX — currencies.
    Currency,
}

impl SegmentKind {
    /// The three-letter segment tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ServiceAdvice => "UNA",
            Self::InterchangeHeader => "UNB",
            Self::InterchangeTrailer => "UNZ",
            Self::MessageHeader => "UNH",
            Self::MessageTrailer => "UNT",
            Self::DocumentReference => "BGM",
            Self::DateTime => "DTM",
            Self::Party => "NAD",
            Self::Contact => "CTA",
            Self::LineItem => "LIN",
            Self::ItemDescription => "IMD",
            Self::Quantity => "QTY",
            Self::Price => "PRI",
            Self::MonetaryAmount => "MOA",
            Self::Tax => "TAX",
            Self::Location => "LOC",
            Self::PaymentTerms => "PAT",
            Self::DeliveryTerms => "TOD",
            Self::FreeText => "FTX",
            Self::Currency => "CUX",
        }
    }
}

/// One sealed segment: its role and its rendered text (terminator
/// included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Enforce the configured segment length ceiling.
pub(crate) fn check_length(text: &str, config: &OrdersConfig) -> Result<(), EdifactError> {
    let length = text.chars().count();
    if length > config.max_segment_length {
        return Err(EdifactError::SegmentTooLong {
            length,
            max: config.max_segment_length,
            preview: preview(text),
        });
    }
    Ok(())
}

/// Trim trailing empty elements, join with the element separator,
/// terminate, and length-check.
fn seal(
    kind: SegmentKind,
    mut elements: Vec<String>,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    while elements.last().is_some_and(String::is_empty) {
        elements.pop();
    }
    let mut text = String::from(kind.tag());
    for element in &elements {
        text.push(ELEMENT_SEP);
        text.push_str(element);
    }
    text.push(TERMINATOR);
    check_length(&text, config)?;
    Ok(Segment { kind, text })
}

/// Precision-gate, round, and charset-format a decimal field. Values
/// carrying more precision than configured fail before any rounding —
/// rounding data the caller did not intend to round is silent loss.
fn amount_element(value: Decimal, config: &OrdersConfig) -> Result<String, EdifactError> {
    if !decimal::validate_precision(value, &config.decimal_template) {
        return Err(EdifactError::PrecisionExceeded {
            value: value.to_string(),
            template: config.decimal_template.clone(),
        });
    }
    let rounded = decimal::round(value, &config.decimal_template);
    Ok(decimal::format_for_charset(
        rounded,
        config.charset,
        config.decimal_scale(),
    ))
}

/// UNA — service string advice announcing the delimiters in use.
/// The decimal mark position follows the repertoire.
pub fn interchange_open(config: &OrdersConfig) -> Segment {
    let mark = if config.charset.decimal_comma() { ',' } else { '.' };
    Segment {
        kind: SegmentKind::ServiceAdvice,
        text: format!("UNA:+{mark}? '"),
    }
}

/// UNB — interchange header with syntax identity, sender/receiver,
/// timestamp, control reference, and the optional extension fields.
pub fn interchange_header(
    reference: &str,
    timestamp: DateTime<Utc>,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    let charset = config.charset;
    let elements = vec![
        format!("{}:{}", charset.code(), charset.syntax_version()),
        escape(&config.sender, charset),
        escape(&config.receiver, charset),
        timestamp.format("%y%m%d:%H%M").to_string(),
        escape(reference, charset),
        String::new(),
        config
            .application_reference
            .as_deref()
            .map(|r| escape(r, charset))
            .unwrap_or_default(),
        String::new(),
        if config.acknowledgement_request {
            "1".into()
        } else {
            String::new()
        },
        config
            .agreement_id
            .as_deref()
            .map(|a| escape(a, charset))
            .unwrap_or_default(),
        if config.test_indicator {
            "1".into()
        } else {
            String::new()
        },
    ];
    seal(SegmentKind::InterchangeHeader, elements, config)
}

/// UNZ — interchange trailer carrying the message count and the
/// control reference repeated from UNB.
pub fn interchange_close(
    message_count: usize,
    reference: &str,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    seal(
        SegmentKind::InterchangeTrailer,
        vec![message_count.to_string(), escape(reference, config.charset)],
        config,
    )
}

/// UNH — message header with the reference and message identity.
pub fn message_header(message_ref: &str, config: &OrdersConfig) -> Result<Segment, EdifactError> {
    let charset = config.charset;
    let identity = [
        &config.message_type,
        &config.version,
        &config.release,
        &config.controlling_agency,
    ]
    .iter()
    .map(|part| escape(part, charset))
    .collect::<Vec<_>>()
    .join(":");
    seal(
        SegmentKind::MessageHeader,
        vec![escape(message_ref, charset), identity],
        config,
    )
}

/// UNT — message trailer carrying the segment count (header through
/// trailer inclusive) and the message reference.
pub fn message_trailer(
    segment_count: usize,
    message_ref: &str,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    seal(
        SegmentKind::MessageTrailer,
        vec![
            segment_count.to_string(),
            escape(message_ref, config.charset),
        ],
        config,
    )
}

/// BGM — document reference; 220 is the UNTDID 1001 code for an order.
pub fn document_reference(
    order_number: &str,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    seal(
        SegmentKind::DocumentReference,
        vec![
            "220".into(),
            escape(order_number, config.charset),
            "9".into(),
        ],
        config,
    )
}

/// DTM — date/time with a UNTDID 2005 qualifier and the configured
/// format code.
pub fn date_time(
    qualifier: &str,
    date: &str,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    seal(
        SegmentKind::DateTime,
        vec![format!(
            "{qualifier}:{}:{}",
            escape(date, config.charset),
            config.date_format.code()
        )],
        config,
    )
}

/// NAD — party identification with optional name and address.
/// Name and address are free text and get truncated; the id is a
/// structured identifier and is never truncated.
pub fn party(p: &OrderParty, config: &OrdersConfig) -> Result<Segment, EdifactError> {
    let charset = config.charset;
    let max = config.max_field_length;
    seal(
        SegmentKind::Party,
        vec![
            escape(&p.qualifier, charset),
            format!("{}::91", escape(&p.id, charset)),
            p.name
                .as_deref()
                .map(|n| escape(truncate_field(n, max), charset))
                .unwrap_or_default(),
            p.address
                .as_deref()
                .map(|a| escape(truncate_field(a, max), charset))
                .unwrap_or_default(),
        ],
        config,
    )
}

/// CTA — contact with function code (defaults to "IC", information
/// contact).
pub fn contact(
    contact_type: Option<&str>,
    value: &str,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    let charset = config.charset;
    seal(
        SegmentKind::Contact,
        vec![
            escape(contact_type.unwrap_or("IC"), charset),
            format!(":{}", escape(value, charset)),
        ],
        config,
    )
}

/// LIN — line item with a 1-based line number and the product code.
pub fn line_item(
    line_number: usize,
    product_code: &str,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    seal(
        SegmentKind::LineItem,
        vec![
            line_number.to_string(),
            String::new(),
            format!("{}:IN", escape(product_code, config.charset)),
        ],
        config,
    )
}

/// IMD — free-form item description, truncated to the field ceiling.
pub fn item_description(
    description: &str,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    let text = escape(
        truncate_field(description, config.max_field_length),
        config.charset,
    );
    seal(
        SegmentKind::ItemDescription,
        vec!["F".into(), String::new(), format!(":::{text}")],
        config,
    )
}

/// QTY — ordered quantity (qualifier 21) with unit of measure.
pub fn quantity(
    value: Decimal,
    unit: &str,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    let amount = amount_element(value, config)?;
    seal(
        SegmentKind::Quantity,
        vec![format!("21:{amount}:{}", escape(unit, config.charset))],
        config,
    )
}

/// PRI — calculation net unit price (qualifier AAA).
pub fn price(value: Decimal, config: &OrdersConfig) -> Result<Segment, EdifactError> {
    let amount = amount_element(value, config)?;
    seal(SegmentKind::Price, vec![format!("AAA:{amount}")], config)
}

/// MOA — monetary amount with a UNTDID 5025 qualifier.
pub fn monetary_amount(
    qualifier: &str,
    value: Decimal,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    let amount = amount_element(value, config)?;
    seal(
        SegmentKind::MonetaryAmount,
        vec![format!("{qualifier}:{amount}")],
        config,
    )
}

/// TAX — VAT duty/tax with the rate percentage.
pub fn tax(rate: Decimal, config: &OrdersConfig) -> Result<Segment, EdifactError> {
    let amount = amount_element(rate, config)?;
    seal(
        SegmentKind::Tax,
        vec![
            "7".into(),
            "VAT".into(),
            String::new(),
            String::new(),
            format!(":::{amount}"),
        ],
        config,
    )
}

/// LOC — delivery location (qualifier 7, place of delivery).
pub fn location(place: &str, config: &OrdersConfig) -> Result<Segment, EdifactError> {
    seal(
        SegmentKind::Location,
        vec!["7".into(), escape(place, config.charset)],
        config,
    )
}

/// PAT — payment terms (basic, qualifier 1).
pub fn payment_terms(terms: &str, config: &OrdersConfig) -> Result<Segment, EdifactError> {
    seal(
        SegmentKind::PaymentTerms,
        vec!["1".into(), escape(terms, config.charset)],
        config,
    )
}

/// TOD — terms of delivery carrying the incoterms code.
pub fn delivery_terms(incoterms: &str, config: &OrdersConfig) -> Result<Segment, EdifactError> {
    seal(
        SegmentKind::DeliveryTerms,
        vec![
            "5".into(),
            String::new(),
            escape(incoterms, config.charset),
        ],
        config,
    )
}

/// FTX — one free-text chunk with its 1-based sequence number.
/// Chunking to the field ceiling is the assembler's job; the chunk
/// arrives already sized.
pub fn free_text(
    sequence: usize,
    chunk: &str,
    config: &OrdersConfig,
) -> Result<Segment, EdifactError> {
    seal(
        SegmentKind::FreeText,
        vec![
            "AAI".into(),
            sequence.to_string(),
            String::new(),
            escape(chunk, config.charset),
        ],
        config,
    )
}

/// CUX — reference currency (qualifier 2, invoicing currency).
pub fn currency(code: &str, config: &OrdersConfig) -> Result<Segment, EdifactError> {
    seal(
        SegmentKind::Currency,
        vec![format!("2:{}:9", escape(code, config.charset))],
        config,
    )
}
