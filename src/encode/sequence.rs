//! Stateful segment accumulation with envelope bookkeeping.

use super::segment::{Segment, SegmentKind, check_length, interchange_open};
use crate::core::{EdifactError, OrdersConfig};

/// Append-only accumulator for one message assembly.
///
/// Tracks the position of the first message header (UNH) so the
/// trailer's segment count can be computed. One instance per assembly;
/// concurrent assemblies use independent instances.
#[derive(Debug, Default)]
pub struct SegmentSequence {
    segments: Vec<Segment>,
    header_index: Option<usize>,
}

impl SegmentSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate length (same rule as the encoder) and append. Records
    /// the position of the first UNH seen.
    pub fn push(&mut self, segment: Segment, config: &OrdersConfig) -> Result<(), EdifactError> {
        check_length(&segment.text, config)?;
        if segment.kind == SegmentKind::MessageHeader && self.header_index.is_none() {
            self.header_index = Some(self.segments.len());
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Insert the UNA service string advice at position 0, shifting the
    /// recorded header position.
    pub fn prepend_service_advice(&mut self, config: &OrdersConfig) {
        self.segments.insert(0, interchange_open(config));
        if let Some(idx) = self.header_index.as_mut() {
            *idx += 1;
        }
    }

    /// Segment count for the message trailer: everything from the first
    /// UNH through the end, plus one when the trailer itself has not
    /// been appended yet.
    pub fn trailer_count(&self, trailer_pending: bool) -> Result<usize, EdifactError> {
        let header = self.header_index.ok_or(EdifactError::MissingHeader)?;
        let mut count = self.segments.len() - header;
        if trailer_pending {
            count += 1;
        }
        Ok(count)
    }

    /// Join all segments with the given line ending. Non-destructive.
    pub fn render(&self, line_ending: &str) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(line_ending)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::segment;
    use crate::core::OrdersConfig;

    fn config() -> OrdersConfig {
        OrdersConfig::default()
    }

    fn header(config: &OrdersConfig) -> Segment {
        segment::message_header("M1", config).unwrap()
    }

    #[test]
    fn records_first_header_position() {
        let cfg = config();
        let mut seq = SegmentSequence::new();
        seq.push(segment::document_reference("X", &cfg).unwrap(), &cfg)
            .unwrap();
        assert!(seq.trailer_count(true).is_err());
        seq.push(header(&cfg), &cfg).unwrap();
        seq.push(segment::currency("EUR", &cfg).unwrap(), &cfg).unwrap();
        // UNH + CUX + pending UNT
        assert_eq!(seq.trailer_count(true).unwrap(), 3);
        assert_eq!(seq.trailer_count(false).unwrap(), 2);
    }

    #[test]
    fn prepend_shifts_header_index() {
        let cfg = config();
        let mut seq = SegmentSequence::new();
        seq.push(header(&cfg), &cfg).unwrap();
        seq.prepend_service_advice(&cfg);
        assert_eq!(seq.segments()[0].kind, SegmentKind::ServiceAdvice);
        // still just UNH + pending UNT
        assert_eq!(seq.trailer_count(true).unwrap(), 2);
    }

    #[test]
    fn missing_header_error() {
        let seq = SegmentSequence::new();
        let err = seq.trailer_count(true).unwrap_err();
        assert_eq!(err.code(), "MISSING_HEADER");
    }

    #[test]
    fn render_is_repeatable() {
        let cfg = config();
        let mut seq = SegmentSequence::new();
        seq.push(header(&cfg), &cfg).unwrap();
        seq.push(segment::currency("EUR", &cfg).unwrap(), &cfg).unwrap();
        let first = seq.render("\n");
        assert_eq!(first, "UNH+M1+ORDERS:D:96A:UN'\nCUX+2:EUR:9'");
        assert_eq!(seq.render("\n"), first);
    }

    #[test]
    fn push_rechecks_length() {
        let cfg = crate::core::OrdersConfigBuilder::new("S", "R")
            .max_segment_length(10)
            .build()
            .unwrap();
        let long = Segment {
            kind: SegmentKind::FreeText,
            text: "FTX+AAI+1++far too long for this ceiling'".into(),
        };
        let mut seq = SegmentSequence::new();
        let err = seq.push(long, &cfg).unwrap_err();
        assert_eq!(err.code(), "SEGMENT_TOO_LONG");
        assert!(seq.is_empty());
    }
}
