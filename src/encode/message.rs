//! Assembly of one validated order into a full segment sequence.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::segment::{
    self, DTM_DELIVERY_DATE, DTM_ORDER_DATE, MOA_GRAND_TOTAL, MOA_TAX_AMOUNT,
};
use super::sequence::SegmentSequence;
use crate::core::{EdifactError, Order, OrdersConfig, decimal};

/// Assemble the fixed business ordering of segments for one order:
/// envelope, header block, parties, line items with a running total,
/// order-level tax and terms, chunked free text, grand total, and the
/// counted trailer pair.
///
/// All monetary arithmetic goes through the decimal engine; the running
/// total accumulates `round(price × quantity)` per line and the tax
/// amount (`total × rate ÷ 100`, rounded) when a rate is present.
pub fn assemble(order: &Order, config: &OrdersConfig) -> Result<SegmentSequence, EdifactError> {
    let mut seq = SegmentSequence::new();
    let scale = config.decimal_scale();

    seq.push(
        segment::interchange_header(&order.message_ref, Utc::now(), config)?,
        config,
    )?;
    seq.push(segment::message_header(&order.message_ref, config)?, config)?;
    seq.push(
        segment::document_reference(&order.order_number, config)?,
        config,
    )?;
    seq.push(
        segment::date_time(DTM_ORDER_DATE, &order.order_date, config)?,
        config,
    )?;
    if let Some(delivery) = &order.delivery_date {
        seq.push(
            segment::date_time(DTM_DELIVERY_DATE, delivery, config)?,
            config,
        )?;
    }
    if let Some(code) = &order.currency {
        seq.push(segment::currency(code, config)?, config)?;
    }

    for party in &order.parties {
        seq.push(segment::party(party, config)?, config)?;
        if let Some(value) = &party.contact {
            seq.push(
                segment::contact(party.contact_type.as_deref(), value, config)?,
                config,
            )?;
        }
    }

    let mut total = Decimal::ZERO;
    for (index, item) in order.items.iter().enumerate() {
        seq.push(
            segment::line_item(index + 1, &item.product_code, config)?,
            config,
        )?;
        if let Some(description) = &item.description {
            seq.push(segment::item_description(description, config)?, config)?;
        }
        seq.push(segment::quantity(item.quantity, &item.unit, config)?, config)?;
        seq.push(segment::price(item.price, config)?, config)?;

        let line_total = decimal::mul(item.price, item.quantity, scale);
        total = decimal::add(total, line_total, scale);
    }

    if let Some(rate) = order.tax_rate {
        seq.push(segment::tax(rate, config)?, config)?;
        let tax_amount = decimal::div(decimal::mul(total, rate, scale + 4), dec!(100), scale)?;
        seq.push(
            segment::monetary_amount(MOA_TAX_AMOUNT, tax_amount, config)?,
            config,
        )?;
        total = decimal::add(total, tax_amount, scale);
    }

    if let Some(place) = &order.delivery_location {
        seq.push(segment::location(place, config)?, config)?;
    }
    if let Some(terms) = &order.payment_terms {
        seq.push(segment::payment_terms(terms, config)?, config)?;
    }
    if let Some(incoterms) = &order.incoterms {
        seq.push(segment::delivery_terms(incoterms, config)?, config)?;
    }

    if let Some(instructions) = &order.special_instructions {
        let chars: Vec<char> = instructions.chars().collect();
        for (index, chunk) in chars.chunks(config.max_field_length).enumerate() {
            let chunk: String = chunk.iter().collect();
            seq.push(segment::free_text(index + 1, &chunk, config)?, config)?;
        }
    }

    seq.push(
        segment::monetary_amount(MOA_GRAND_TOTAL, total, config)?,
        config,
    )?;

    let count = seq.trailer_count(true)?;
    seq.push(
        segment::message_trailer(count, &order.message_ref, config)?,
        config,
    )?;
    seq.push(
        segment::interchange_close(1, &order.message_ref, config)?,
        config,
    )?;

    if config.include_una {
        seq.prepend_service_advice(config);
    }

    Ok(seq)
}
