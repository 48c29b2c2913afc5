use edifakt::{Charset, OrdersConfigBuilder, decode, generate};
use serde_json::json;

fn main() {
    // A typical purchase order with two parties and two line items
    let order = json!({
        "message_ref": "MSG001",
        "order_number": "PO-2024-001",
        "order_date": "20240615",
        "delivery_date": "20240630",
        "currency": "EUR",
        "tax_rate": "19",
        "payment_terms": "Net 30",
        "special_instructions": "Deliver to rear entrance",
        "parties": [
            {
                "qualifier": "BY",
                "id": "BUYER-GMBH",
                "name": "Buyer GmbH",
                "address": "Berlin",
                "contact": "orders@buyer.example",
            },
            {"qualifier": "SU", "id": "SUPPLIER-AG", "name": "Supplier AG"},
        ],
        "items": [
            {
                "product_code": "WIDGET-1",
                "description": "Standard widget",
                "quantity": "10.00",
                "price": "12.50",
            },
            {"product_code": "GADGET-2", "quantity": "2", "price": "7.25", "unit": "BX"},
        ],
    });

    let config = OrdersConfigBuilder::new("BUYER-GMBH", "SUPPLIER-AG")
        .charset(Charset::Unoc)
        .build()
        .expect("config should be valid");

    let message = generate(&order, &config).expect("order should be valid");
    println!("--- rendered interchange ---");
    println!("{message}");

    // The partial decoder recovers identifying fields for diagnostics
    let decoded = decode(&message);
    println!("--- decoded ---");
    println!("order number: {:?}", decoded.order_number);
    println!("order date:   {:?}", decoded.order_date);
    println!("currency:     {:?}", decoded.currency);
    for party in &decoded.parties {
        println!("party {}: {}", party.qualifier, party.id);
    }
    println!("products:     {:?}", decoded.product_codes);
}
