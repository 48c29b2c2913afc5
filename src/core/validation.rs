//! Two-phase schema validation of raw order input.
//!
//! Structural checks (required fields, length ceilings, list shapes)
//! run first, then semantic checks (dates, numeric ranges, party
//! roles), then control-character sanitization, and only then is the
//! immutable [`Order`] model built. Validation errors abort before any
//! segment is encoded.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::config::{DateFormat, OrdersConfig};
use super::decimal;
use super::error::EdifactError;
use super::sanitize::sanitize;
use super::types::{BUYER_QUALIFIER, DEFAULT_UNIT, Order, OrderItem, OrderParty, SUPPLIER_QUALIFIER};

const MAX_MESSAGE_REF: usize = 14;
const MAX_ORDER_NUMBER: usize = 35;
const MAX_CURRENCY: usize = 3;
const MAX_LOCATION: usize = 35;
const MAX_PAYMENT_TERMS: usize = 35;
const MAX_INCOTERMS: usize = 3;
const MAX_QUALIFIER: usize = 2;
const MAX_PARTY_ID: usize = 35;
const MAX_PRODUCT_CODE: usize = 35;

/// Validate raw order input and build the typed [`Order`] model.
///
/// Phases: structural → semantic → sanitize → build. The raw input is
/// the nested mapping described in the crate docs; the returned model
/// is the only thing the assembler accepts.
pub fn validate_order(raw: &Value, config: &OrdersConfig) -> Result<Order, EdifactError> {
    validate_structure(raw)?;
    validate_semantics(raw, config)?;
    let clean = sanitize(raw);
    build_order(&clean)
}

// ── Phase 1: structure ──────────────────────────────────────────────────────

fn validate_structure(raw: &Value) -> Result<(), EdifactError> {
    let obj = as_object(raw, "order")?;

    require_str(obj, "message_ref", MAX_MESSAGE_REF)?;
    require_str(obj, "order_number", MAX_ORDER_NUMBER)?;
    require_str(obj, "order_date", usize::MAX)?;

    optional_str(obj, "delivery_date", usize::MAX)?;
    optional_str(obj, "currency", MAX_CURRENCY)?;
    optional_str(obj, "delivery_location", MAX_LOCATION)?;
    optional_str(obj, "payment_terms", MAX_PAYMENT_TERMS)?;
    optional_str(obj, "incoterms", MAX_INCOTERMS)?;
    optional_str(obj, "special_instructions", usize::MAX)?;

    let parties = require_array(obj, "parties")?;
    if parties.len() < 2 {
        return Err(schema(
            "parties",
            format!("at least 2 parties required, got {}", parties.len()),
        ));
    }
    for (i, party) in parties.iter().enumerate() {
        let p = as_object(party, &format!("parties[{i}]"))?;
        require_str_at(p, "qualifier", &format!("parties[{i}]"), MAX_QUALIFIER)?;
        require_str_at(p, "id", &format!("parties[{i}]"), MAX_PARTY_ID)?;
    }

    let items = require_array(obj, "items")?;
    if items.is_empty() {
        return Err(schema("items", "at least 1 item required"));
    }
    for (i, item) in items.iter().enumerate() {
        let path = format!("items[{i}]");
        let it = as_object(item, &path)?;
        require_str_at(it, "product_code", &path, MAX_PRODUCT_CODE)?;
        require_scalar_at(it, "quantity", &path)?;
        require_scalar_at(it, "price", &path)?;
    }

    Ok(())
}

// ── Phase 2: semantics ──────────────────────────────────────────────────────

fn validate_semantics(raw: &Value, config: &OrdersConfig) -> Result<(), EdifactError> {
    let obj = as_object(raw, "order")?;

    let order_date = str_value(obj, "order_date").unwrap_or_default();
    validate_date(&order_date, config.date_format)?;
    if let Some(delivery) = str_value(obj, "delivery_date") {
        validate_date(&delivery, config.date_format)?;
    }

    if let Some(items) = obj.get("items").and_then(Value::as_array) {
        for (i, item) in items.iter().enumerate() {
            let it = as_object(item, &format!("items[{i}]"))?;
            let quantity = parse_decimal_field(it, "quantity", i)?;
            if quantity <= Decimal::ZERO {
                return Err(EdifactError::NumericRange {
                    field: format!("items[{i}].quantity"),
                    message: format!("quantity must be positive, got {quantity}"),
                });
            }
            let price = parse_decimal_field(it, "price", i)?;
            if price.is_sign_negative() {
                return Err(EdifactError::NumericRange {
                    field: format!("items[{i}].price"),
                    message: format!("price must not be negative, got {price}"),
                });
            }
        }
    }

    if let Some(rate_text) = scalar_text(obj.get("tax_rate")) {
        let rate = decimal::parse(&rate_text)?;
        if rate.is_sign_negative() {
            return Err(EdifactError::NumericRange {
                field: "tax_rate".into(),
                message: format!("tax rate must not be negative, got {rate}"),
            });
        }
    }

    let mut has_buyer = false;
    let mut has_supplier = false;
    if let Some(parties) = obj.get("parties").and_then(Value::as_array) {
        for (i, party) in parties.iter().enumerate() {
            let p = as_object(party, &format!("parties[{i}]"))?;
            let qualifier = str_value(p, "qualifier").unwrap_or_default();
            if !config.accepts_qualifier(&qualifier) {
                return Err(EdifactError::UnknownQualifier {
                    qualifier,
                    index: i,
                });
            }
            has_buyer |= qualifier == BUYER_QUALIFIER;
            has_supplier |= qualifier == SUPPLIER_QUALIFIER;
        }
    }
    if !has_buyer {
        return Err(EdifactError::MissingRole {
            role: BUYER_QUALIFIER,
        });
    }
    if !has_supplier {
        return Err(EdifactError::MissingRole {
            role: SUPPLIER_QUALIFIER,
        });
    }

    Ok(())
}

/// Check a date digit string against a UNTDID 2379 format. 102 and 203
/// carry a full calendar date and are parsed with chrono; 610 and 602
/// get digit-shape checks only.
pub(crate) fn validate_date(value: &str, format: DateFormat) -> Result<(), EdifactError> {
    let shape_ok =
        value.len() == format.digit_count() && value.bytes().all(|b| b.is_ascii_digit());
    let ok = shape_ok
        && match format {
            DateFormat::Ccyymmdd => NaiveDate::parse_from_str(value, "%Y%m%d").is_ok(),
            DateFormat::CcyymmddHhmm => {
                NaiveDateTime::parse_from_str(value, "%Y%m%d%H%M").is_ok()
            }
            DateFormat::Ccyymm => value[4..6]
                .parse::<u8>()
                .is_ok_and(|month| (1..=12).contains(&month)),
            DateFormat::Ccyy => true,
        };
    if ok {
        Ok(())
    } else {
        Err(EdifactError::DateFormat {
            value: value.to_string(),
            code: format.code(),
        })
    }
}

// ── Phase 4: model construction ─────────────────────────────────────────────

fn build_order(clean: &Value) -> Result<Order, EdifactError> {
    let obj = as_object(clean, "order")?;

    let mut parties = Vec::new();
    for (i, party) in require_array(obj, "parties")?.iter().enumerate() {
        let p = as_object(party, &format!("parties[{i}]"))?;
        parties.push(OrderParty {
            qualifier: str_value(p, "qualifier").unwrap_or_default(),
            id: str_value(p, "id").unwrap_or_default(),
            name: str_value(p, "name"),
            address: str_value(p, "address"),
            contact: str_value(p, "contact"),
            contact_type: str_value(p, "contact_type"),
        });
    }

    let mut items = Vec::new();
    for (i, item) in require_array(obj, "items")?.iter().enumerate() {
        let it = as_object(item, &format!("items[{i}]"))?;
        items.push(OrderItem {
            product_code: str_value(it, "product_code").unwrap_or_default(),
            description: str_value(it, "description"),
            quantity: parse_decimal_field(it, "quantity", i)?,
            price: parse_decimal_field(it, "price", i)?,
            unit: str_value(it, "unit").unwrap_or_else(|| DEFAULT_UNIT.into()),
        });
    }

    let tax_rate = match scalar_text(obj.get("tax_rate")) {
        Some(text) => Some(decimal::parse(&text)?),
        None => None,
    };

    Ok(Order {
        message_ref: str_value(obj, "message_ref").unwrap_or_default(),
        order_number: str_value(obj, "order_number").unwrap_or_default(),
        order_date: str_value(obj, "order_date").unwrap_or_default(),
        delivery_date: str_value(obj, "delivery_date"),
        currency: str_value(obj, "currency"),
        delivery_location: str_value(obj, "delivery_location"),
        payment_terms: str_value(obj, "payment_terms"),
        tax_rate,
        special_instructions: str_value(obj, "special_instructions"),
        incoterms: str_value(obj, "incoterms"),
        parties,
        items,
    })
}

// ── Raw-value helpers ───────────────────────────────────────────────────────

fn schema(field: impl Into<String>, message: impl Into<String>) -> EdifactError {
    EdifactError::Schema {
        field: field.into(),
        message: message.into(),
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, EdifactError> {
    value
        .as_object()
        .ok_or_else(|| schema(path, "expected an object"))
}

fn require_array<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Vec<Value>, EdifactError> {
    obj.get(field)
        .ok_or_else(|| schema(field, "required field missing"))?
        .as_array()
        .ok_or_else(|| schema(field, "expected an array"))
}

fn require_str(obj: &Map<String, Value>, field: &str, max: usize) -> Result<(), EdifactError> {
    require_str_at(obj, field, "", max)
}

fn require_str_at(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    max: usize,
) -> Result<(), EdifactError> {
    let path = if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    };
    match obj.get(field) {
        None | Some(Value::Null) => Err(schema(path, "required field missing")),
        Some(Value::String(s)) if s.trim().is_empty() => Err(schema(path, "must not be empty")),
        Some(Value::String(s)) if s.chars().count() > max => Err(schema(
            path,
            format!("exceeds maximum length {max} ({} chars)", s.chars().count()),
        )),
        Some(Value::String(_)) => Ok(()),
        // Quantities and prices arrive through require_scalar_at; everything
        // else must be a string.
        Some(_) => Err(schema(path, "expected a string")),
    }
}

fn require_scalar_at(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
) -> Result<(), EdifactError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(schema(
            format!("{prefix}.{field}"),
            "required field missing",
        )),
        Some(Value::String(_)) | Some(Value::Number(_)) => Ok(()),
        Some(_) => Err(schema(
            format!("{prefix}.{field}"),
            "expected a decimal string or number",
        )),
    }
}

fn optional_str(obj: &Map<String, Value>, field: &str, max: usize) -> Result<(), EdifactError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(()),
        Some(_) => require_str(obj, field, max),
    }
}

fn str_value(obj: &Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field).and_then(Value::as_str).map(str::to_string)
}

fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_decimal_field(
    obj: &Map<String, Value>,
    field: &str,
    index: usize,
) -> Result<Decimal, EdifactError> {
    let text = scalar_text(obj.get(field)).ok_or_else(|| {
        schema(format!("items[{index}].{field}"), "required field missing")
    })?;
    decimal::parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> OrdersConfig {
        OrdersConfig::default()
    }

    fn valid_raw() -> Value {
        json!({
            "message_ref": "MSG001",
            "order_number": "PO-2024-001",
            "order_date": "20240615",
            "parties": [
                {"qualifier": "BY", "id": "BUYER-GMBH", "name": "Buyer GmbH"},
                {"qualifier": "SU", "id": "SUPPLIER-AG"},
            ],
            "items": [
                {"product_code": "WIDGET-1", "quantity": "10.00", "price": "12.50"},
            ],
        })
    }

    #[test]
    fn accepts_minimal_valid_order() {
        let order = validate_order(&valid_raw(), &config()).unwrap();
        assert_eq!(order.message_ref, "MSG001");
        assert_eq!(order.parties.len(), 2);
        assert_eq!(order.items[0].unit, "EA");
        assert!(order.has_role("BY"));
    }

    #[test]
    fn missing_required_field() {
        let mut raw = valid_raw();
        raw.as_object_mut().unwrap().remove("order_number");
        let err = validate_order(&raw, &config()).unwrap_err();
        assert_eq!(err.code(), "SCHEMA");
        assert!(err.to_string().contains("order_number"));
    }

    #[test]
    fn message_ref_length_ceiling() {
        let mut raw = valid_raw();
        raw["message_ref"] = json!("X".repeat(15));
        let err = validate_order(&raw, &config()).unwrap_err();
        assert_eq!(err.code(), "SCHEMA");
    }

    #[test]
    fn fewer_than_two_parties() {
        let mut raw = valid_raw();
        raw["parties"] = json!([{"qualifier": "BY", "id": "X"}]);
        let err = validate_order(&raw, &config()).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn bad_order_date() {
        let mut raw = valid_raw();
        raw["order_date"] = json!("2024-06-15");
        let err = validate_order(&raw, &config()).unwrap_err();
        assert_eq!(err.code(), "DATE_FORMAT");

        raw["order_date"] = json!("20241315");
        let err = validate_order(&raw, &config()).unwrap_err();
        assert_eq!(err.code(), "DATE_FORMAT");
    }

    #[test]
    fn date_shapes_per_format() {
        assert!(validate_date("20240615", DateFormat::Ccyymmdd).is_ok());
        assert!(validate_date("202406151030", DateFormat::CcyymmddHhmm).is_ok());
        assert!(validate_date("202406", DateFormat::Ccyymm).is_ok());
        assert!(validate_date("202413", DateFormat::Ccyymm).is_err());
        assert!(validate_date("2024", DateFormat::Ccyy).is_ok());
        assert!(validate_date("20240615", DateFormat::Ccyy).is_err());
    }

    #[test]
    fn zero_quantity_rejected() {
        let mut raw = valid_raw();
        raw["items"][0]["quantity"] = json!("0");
        let err = validate_order(&raw, &config()).unwrap_err();
        assert_eq!(err.code(), "NUMERIC_RANGE");
    }

    #[test]
    fn negative_price_rejected() {
        let mut raw = valid_raw();
        raw["items"][0]["price"] = json!("-1.00");
        let err = validate_order(&raw, &config()).unwrap_err();
        assert_eq!(err.code(), "NUMERIC_RANGE");
    }

    #[test]
    fn unparseable_quantity_rejected() {
        let mut raw = valid_raw();
        raw["items"][0]["quantity"] = json!("ten");
        let err = validate_order(&raw, &config()).unwrap_err();
        assert_eq!(err.code(), "INVALID_DECIMAL");
    }

    #[test]
    fn unknown_qualifier_rejected() {
        let mut raw = valid_raw();
        raw["parties"][1]["qualifier"] = json!("ZZ");
        let err = validate_order(&raw, &config()).unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_QUALIFIER");
        assert!(err.to_string().contains("parties[1]"));
    }

    #[test]
    fn missing_supplier_role() {
        let mut raw = valid_raw();
        raw["parties"][1]["qualifier"] = json!("IV");
        let err = validate_order(&raw, &config()).unwrap_err();
        assert_eq!(err.code(), "MISSING_ROLE");
        assert!(err.to_string().contains("'SU'"));
    }

    #[test]
    fn control_characters_stripped_from_model() {
        let mut raw = valid_raw();
        raw["parties"][0]["name"] = json!("Buyer\x07 GmbH");
        let order = validate_order(&raw, &config()).unwrap();
        assert_eq!(order.parties[0].name.as_deref(), Some("Buyer GmbH"));
    }

    #[test]
    fn numeric_json_values_accepted() {
        let mut raw = valid_raw();
        raw["items"][0]["quantity"] = json!(3);
        raw["tax_rate"] = json!("19");
        let order = validate_order(&raw, &config()).unwrap();
        assert_eq!(order.items[0].quantity.to_string(), "3");
        assert!(order.tax_rate.is_some());
    }
}
