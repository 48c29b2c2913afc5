//! Batch interchange assembly: one shared envelope around N orders.

use chrono::Utc;
use serde_json::Value;

use super::message::assemble;
use super::segment::{self, SegmentKind};
use super::sequence::SegmentSequence;
use crate::core::{EdifactError, OrdersConfig, validate_order};

/// Assemble N raw orders under one shared envelope.
///
/// The envelope (UNA/UNB) is emitted once with a generated batch
/// reference; each member contributes its UNH..=UNT slice, selected by
/// segment kind rather than text matching; the closing UNZ carries the
/// message count. Any member failure aborts the whole batch — partial
/// interchanges are never produced.
pub fn assemble_batch(
    orders: &[Value],
    config: &OrdersConfig,
) -> Result<SegmentSequence, EdifactError> {
    if orders.is_empty() {
        return Err(EdifactError::Schema {
            field: "orders".into(),
            message: "batch requires at least one order".into(),
        });
    }

    let reference = batch_reference(orders.len());
    let mut seq = SegmentSequence::new();
    seq.push(
        segment::interchange_header(&reference, Utc::now(), config)?,
        config,
    )?;

    for (index, raw) in orders.iter().enumerate() {
        let member = validate_order(raw, config)
            .and_then(|order| assemble(&order, config))
            .map_err(|source| EdifactError::BatchMember {
                index,
                source: Box::new(source),
            })?;
        for segment in message_body(member)? {
            seq.push(segment, config)?;
        }
    }

    seq.push(
        segment::interchange_close(orders.len(), &reference, config)?,
        config,
    )?;
    if config.include_una {
        seq.prepend_service_advice(config);
    }
    Ok(seq)
}

/// Extract the UNH..=UNT slice of one assembled member, dropping its
/// own envelope segments.
fn message_body(
    member: SegmentSequence,
) -> Result<impl Iterator<Item = segment::Segment>, EdifactError> {
    let segments = member.into_segments();
    let start = segments
        .iter()
        .position(|s| s.kind == SegmentKind::MessageHeader)
        .ok_or(EdifactError::MissingHeader)?;
    let end = segments
        .iter()
        .rposition(|s| s.kind == SegmentKind::MessageTrailer)
        .ok_or_else(|| {
            EdifactError::StructuralIntegrity("assembled member lacks a message trailer".into())
        })?;
    Ok(segments.into_iter().skip(start).take(end - start + 1))
}

fn batch_reference(count: usize) -> String {
    format!("B{}{count:03}", Utc::now().format("%y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::structure;
    use serde_json::json;

    fn raw_order(reference: &str) -> Value {
        json!({
            "message_ref": reference,
            "order_number": "PO-9",
            "order_date": "20240615",
            "parties": [
                {"qualifier": "BY", "id": "B1"},
                {"qualifier": "SU", "id": "S1"},
            ],
            "items": [
                {"product_code": "P1", "quantity": "1", "price": "2.00"},
            ],
        })
    }

    #[test]
    fn two_orders_share_one_envelope() {
        let config = OrdersConfig::default();
        let orders = vec![raw_order("M1"), raw_order("M2")];
        let seq = assemble_batch(&orders, &config).unwrap();
        let segments = seq.segments();

        assert!(structure::verify(segments));
        let count = |kind| segments.iter().filter(|s| s.kind == kind).count();
        assert_eq!(count(SegmentKind::ServiceAdvice), 1);
        assert_eq!(count(SegmentKind::InterchangeHeader), 1);
        assert_eq!(count(SegmentKind::MessageHeader), 2);
        assert_eq!(count(SegmentKind::MessageTrailer), 2);
        assert_eq!(count(SegmentKind::InterchangeTrailer), 1);
        assert!(segments.last().unwrap().text.starts_with("UNZ+2+"));
    }

    #[test]
    fn member_failure_aborts_batch() {
        let config = OrdersConfig::default();
        let mut bad = raw_order("M2");
        bad["parties"][1]["qualifier"] = json!("BY"); // no supplier
        let err = assemble_batch(&[raw_order("M1"), bad], &config).unwrap_err();
        match err {
            EdifactError::BatchMember { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source.code(), "MISSING_ROLE");
            }
            other => panic!("expected BatchMember, got {other:?}"),
        }
    }

    #[test]
    fn empty_batch_rejected() {
        let err = assemble_batch(&[], &OrdersConfig::default()).unwrap_err();
        assert_eq!(err.code(), "SCHEMA");
    }
}
