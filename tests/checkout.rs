//! Integration tests for the checkout journey

use std::sync::{Arc, Mutex};

use rust_decimal_macros::dec;
use serde_json::json;
use testresult::TestResult;

use cortado::{
    cart::CartStore,
    checkout::{CheckoutContact, CheckoutError, CheckoutFlow, CheckoutSummary},
    error::ApiError,
    menu::MenuItem,
    orders::{MockOrdersApi, Order, OrderStatus},
};

fn catalog() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: "espresso".to_string(),
            name: "Espresso".to_string(),
            description: "Double shot".to_string(),
            cost: dec!(2.50),
            category: "coffee".to_string(),
            image: "espresso.jpg".to_string(),
        },
        MenuItem {
            id: "flat-white".to_string(),
            name: "Flat White".to_string(),
            description: "With ristretto base".to_string(),
            cost: dec!(3.80),
            category: "coffee".to_string(),
            image: "flat-white.jpg".to_string(),
        },
    ]
}

fn created(id: i64) -> Order {
    Order {
        id,
        for_name: "Kim".to_string(),
        for_email: "kim@example.com".to_string(),
        order_date: "2026-03-01 09:15:00".to_string(),
        status: OrderStatus::Pending,
        total: dec!(8.80),
        items: vec![],
        created_at: None,
        updated_at: None,
    }
}

fn contact() -> CheckoutContact {
    CheckoutContact {
        name: "Kim".to_string(),
        email: "kim@example.com".to_string(),
    }
}

#[tokio::test]
async fn a_cart_built_from_the_menu_submits_the_wire_contract() -> TestResult {
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);

    let mut api = MockOrdersApi::new();
    api.expect_create_order().returning(move |draft| {
        *sink.lock().expect("draft lock") = Some(draft.clone());
        Ok(created(42))
    });

    let catalog = catalog();
    let mut cart = CartStore::new();
    cart.add_item(&catalog[0]);
    cart.add_item(&catalog[0]);
    cart.add_item(&catalog[1]);
    cart.set_instructions("flat-white", Some("oat milk".to_string()));

    let summary = CheckoutSummary::of(&cart);
    assert_eq!(summary.subtotal, dec!(8.80));
    assert_eq!(summary.tax, dec!(0.70));
    assert_eq!(summary.total, dec!(9.50));

    let flow = CheckoutFlow::new(Arc::new(api));
    let confirmation = flow.submit(&mut cart, &contact()).await?;

    assert!(cart.is_empty());
    assert_eq!(confirmation.order_id, 42);

    let draft = seen
        .lock()
        .expect("draft lock")
        .clone()
        .expect("draft captured");

    // Exact shape of the POST body: decimal strings, lowercase status,
    // absent notes, display tax nowhere in sight.
    assert_eq!(
        serde_json::to_value(&draft)?,
        json!({
            "for_name": "Kim",
            "for_email": "kim@example.com",
            "order_date": draft.order_date,
            "status": "pending",
            "total": "8.80",
            "items": [
                {
                    "item_id": "espresso",
                    "item_name": "Espresso",
                    "quantity": 2,
                    "price": "2.50",
                    "notes": ""
                },
                {
                    "item_id": "flat-white",
                    "item_name": "Flat White",
                    "quantity": 1,
                    "price": "3.80",
                    "notes": "oat milk"
                }
            ]
        })
    );

    Ok(())
}

#[tokio::test]
async fn a_rejected_order_can_be_resubmitted() -> TestResult {
    let mut api = MockOrdersApi::new();
    api.expect_create_order().times(1).returning(|_| {
        Err(ApiError::Api {
            status: 422,
            message: "order_date is invalid".to_string(),
        })
    });
    api.expect_create_order()
        .times(1)
        .returning(|_| Ok(created(7)));

    let catalog = catalog();
    let mut cart = CartStore::new();
    cart.add_item(&catalog[0]);
    cart.add_item(&catalog[0]);
    cart.add_item(&catalog[1]);

    let flow = CheckoutFlow::new(Arc::new(api));

    let result = flow.submit(&mut cart, &contact()).await;
    assert!(
        matches!(
            result,
            Err(CheckoutError::Api(ApiError::Api { status: 422, .. }))
        ),
        "expected a 422 Api error, got {result:?}"
    );
    assert_eq!(cart.total_items(), 3, "a failed submit must keep the cart");

    let confirmation = flow.submit(&mut cart, &contact()).await?;
    assert_eq!(confirmation.order_id, 7);
    assert_eq!(confirmation.order.total.to_string(), "8.80");
    assert!(cart.is_empty());

    Ok(())
}
