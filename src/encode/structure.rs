//! Post-assembly structural sanity check.
//!
//! Catches assembly bugs (a header without a matching trailer, a
//! missing envelope) before a malformed interchange can leave the
//! codec. Operates on the segment list, not on the order.

use super::segment::{Segment, SegmentKind};
use crate::core::EdifactError;

/// True iff the sequence starts with an envelope segment, ends with a
/// trailer segment, and message headers and trailers balance.
pub fn verify(segments: &[Segment]) -> bool {
    check(segments).is_ok()
}

/// Like [`verify`] but reports which rule failed.
pub fn check(segments: &[Segment]) -> Result<(), EdifactError> {
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return Err(EdifactError::StructuralIntegrity(
            "empty segment sequence".into(),
        ));
    };

    if !matches!(
        first.kind,
        SegmentKind::ServiceAdvice | SegmentKind::InterchangeHeader
    ) {
        return Err(EdifactError::StructuralIntegrity(format!(
            "interchange must open with UNA or UNB, found {}",
            first.kind.tag()
        )));
    }
    if !matches!(
        last.kind,
        SegmentKind::MessageTrailer | SegmentKind::InterchangeTrailer
    ) {
        return Err(EdifactError::StructuralIntegrity(format!(
            "interchange must close with UNT or UNZ, found {}",
            last.kind.tag()
        )));
    }

    let headers = count_kind(segments, SegmentKind::MessageHeader);
    let trailers = count_kind(segments, SegmentKind::MessageTrailer);
    if headers != trailers {
        return Err(EdifactError::StructuralIntegrity(format!(
            "{headers} message header(s) but {trailers} trailer(s)"
        )));
    }

    Ok(())
}

fn count_kind(segments: &[Segment], kind: SegmentKind) -> usize {
    segments.iter().filter(|s| s.kind == kind).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OrdersConfig;
    use crate::encode::segment;

    fn balanced() -> Vec<Segment> {
        let cfg = OrdersConfig::default();
        vec![
            segment::interchange_header("R1", chrono::Utc::now(), &cfg).unwrap(),
            segment::message_header("M1", &cfg).unwrap(),
            segment::message_trailer(2, "M1", &cfg).unwrap(),
            segment::interchange_close(1, "R1", &cfg).unwrap(),
        ]
    }

    #[test]
    fn accepts_balanced_interchange() {
        assert!(verify(&balanced()));
    }

    #[test]
    fn rejects_empty() {
        assert!(!verify(&[]));
    }

    #[test]
    fn rejects_wrong_opening() {
        let mut segs = balanced();
        segs.remove(0);
        let err = check(&segs).unwrap_err();
        assert_eq!(err.code(), "STRUCTURAL_INTEGRITY");
        assert!(err.to_string().contains("UNA or UNB"));
    }

    #[test]
    fn rejects_unbalanced_headers() {
        let cfg = OrdersConfig::default();
        let mut segs = balanced();
        segs.insert(2, segment::message_header("M2", &cfg).unwrap());
        let err = check(&segs).unwrap_err();
        assert!(err.to_string().contains("2 message header(s)"));
    }
}
