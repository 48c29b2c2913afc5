//! Best-effort partial decoding of a generated ORDERS interchange.
//!
//! A diagnostic aid, not a conformant inverse of the encoder: only a
//! small set of tags is recognized, and unknown tags or malformed
//! lines are skipped silently. Quantities, prices, totals, and free
//! text are not reconstructed.

use serde::Serialize;

use crate::encode::{COMPONENT_SEP, ELEMENT_SEP, RELEASE, TERMINATOR};

/// Fields recoverable from a rendered interchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodedOrder {
    pub message_ref: Option<String>,
    pub order_number: Option<String>,
    pub order_date: Option<String>,
    pub delivery_date: Option<String>,
    pub currency: Option<String>,
    pub parties: Vec<DecodedParty>,
    pub product_codes: Vec<String>,
}

/// Party role and identification recovered from a NAD segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedParty {
    pub qualifier: String,
    pub id: String,
}

/// Scan a rendered interchange line by line and reconstruct the known
/// fields. Never fails; unrecognized content is ignored.
pub fn decode(message: &str) -> DecodedOrder {
    let mut result = DecodedOrder::default();

    for line in message.lines() {
        let line = line.trim().trim_end_matches(TERMINATOR);
        let elements = split_on(line, ELEMENT_SEP);
        let Some(tag) = elements.first() else {
            continue;
        };

        match tag.as_str() {
            "UNH" => {
                if let Some(reference) = elements.get(1) {
                    result.message_ref = Some(reference.clone());
                }
            }
            "BGM" => {
                if let Some(number) = elements.get(2) {
                    result.order_number = Some(number.clone());
                }
            }
            "DTM" => {
                if let Some(composite) = elements.get(1) {
                    let parts = split_on(composite, COMPONENT_SEP);
                    match (parts.first().map(String::as_str), parts.get(1)) {
                        (Some("137"), Some(date)) => result.order_date = Some(date.clone()),
                        (Some("2"), Some(date)) => result.delivery_date = Some(date.clone()),
                        _ => {}
                    }
                }
            }
            "CUX" => {
                if let Some(composite) = elements.get(1) {
                    if let Some(code) = split_on(composite, COMPONENT_SEP).get(1) {
                        result.currency = Some(code.clone());
                    }
                }
            }
            "NAD" => {
                if let (Some(qualifier), Some(id_composite)) = (elements.get(1), elements.get(2)) {
                    if let Some(id) = split_on(id_composite, COMPONENT_SEP).first() {
                        result.parties.push(DecodedParty {
                            qualifier: qualifier.clone(),
                            id: id.clone(),
                        });
                    }
                }
            }
            "LIN" => {
                if let Some(composite) = elements.get(3) {
                    if let Some(code) = split_on(composite, COMPONENT_SEP).first() {
                        if !code.is_empty() {
                            result.product_codes.push(code.clone());
                        }
                    }
                }
            }
            _ => {}
        }
    }

    result
}

/// Split on a delimiter honoring the release character, unescaping as
/// it goes.
fn split_on(text: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut released = false;
    for ch in text.chars() {
        if released {
            current.push(ch);
            released = false;
        } else if ch == RELEASE {
            released = true;
        } else if ch == delimiter {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "UNA:+,? '\n\
        UNB+UNOA:2+SENDER+RECEIVER+240615:1030+MSG1'\n\
        UNH+MSG1+ORDERS:D:96A:UN'\n\
        BGM+220+PO-2024-001+9'\n\
        DTM+137:20240615:102'\n\
        DTM+2:20240630:102'\n\
        CUX+2:EUR:9'\n\
        NAD+BY+BUYER::91+Buyer GmbH'\n\
        NAD+SU+SUPPLIER::91'\n\
        LIN+1++WIDGET-1:IN'\n\
        QTY+21:10,00:EA'\n\
        PRI+AAA:12,50'\n\
        MOA+86:125,00'\n\
        UNT+12+MSG1'\n\
        UNZ+1+MSG1'";

    #[test]
    fn reconstructs_known_fields() {
        let decoded = decode(SAMPLE);
        assert_eq!(decoded.message_ref.as_deref(), Some("MSG1"));
        assert_eq!(decoded.order_number.as_deref(), Some("PO-2024-001"));
        assert_eq!(decoded.order_date.as_deref(), Some("20240615"));
        assert_eq!(decoded.delivery_date.as_deref(), Some("20240630"));
        assert_eq!(decoded.currency.as_deref(), Some("EUR"));
        assert_eq!(decoded.parties.len(), 2);
        assert_eq!(decoded.parties[0].qualifier, "BY");
        assert_eq!(decoded.parties[1].id, "SUPPLIER");
        assert_eq!(decoded.product_codes, vec!["WIDGET-1"]);
    }

    #[test]
    fn unknown_tags_and_garbage_ignored() {
        let decoded = decode("XYZ+1+2'\nnot a segment at all\n\nBGM+220+N-1+9'");
        assert_eq!(decoded.order_number.as_deref(), Some("N-1"));
        assert!(decoded.parties.is_empty());
    }

    #[test]
    fn released_delimiters_are_unescaped() {
        let decoded = decode("BGM+220+PO?+A?:B+9'");
        assert_eq!(decoded.order_number.as_deref(), Some("PO+A:B"));
    }

    #[test]
    fn empty_input() {
        assert_eq!(decode(""), DecodedOrder::default());
    }
}
