mod common;

use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
#[ignore = "requires a running MongoDB at MONGODB_URI"]
async fn customer_crud_round_trip() {
    let app = TestApp::spawn().await;

    let created = app
        .client
        .post(format!("{}/customers", app.address))
        .json(&json!({
            "name": "Gulf Hardware WLL",
            "vat_no": "200000123456789",
            "address_lines": ["Shop 4, Block 338"],
            "email": "orders@gulfhardware.example"
        }))
        .send()
        .await
        .expect("Failed to create customer");
    assert_eq!(created.status(), 201);
    let customer: Value = created.json().await.expect("Invalid customer body");
    let id = customer["id"].as_str().expect("Missing customer id");

    let update = app
        .client
        .put(format!("{}/customers/{}", app.address, id))
        .json(&json!({ "name": "Gulf Hardware B.S.C." }))
        .send()
        .await
        .expect("Failed to update customer");
    assert_eq!(update.status(), 200);

    let list: Vec<Value> = app
        .client
        .get(format!("{}/customers", app.address))
        .send()
        .await
        .expect("Failed to list customers")
        .json()
        .await
        .expect("Invalid list body");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Gulf Hardware B.S.C.");

    let delete = app
        .client
        .delete(format!("{}/customers/{}", app.address, id))
        .send()
        .await
        .expect("Failed to delete customer");
    assert_eq!(delete.status(), 200);

    let missing = app
        .client
        .delete(format!("{}/customers/{}", app.address, id))
        .send()
        .await
        .expect("Failed to delete customer");
    assert_eq!(missing.status(), 404);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB at MONGODB_URI"]
async fn blank_customer_name_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/customers", app.address))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .expect("Failed to create customer");
    assert_eq!(response.status(), 422);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB at MONGODB_URI"]
async fn deleted_products_are_hidden_but_recoverable() {
    let app = TestApp::spawn().await;

    let created = app
        .client
        .post(format!("{}/products", app.address))
        .json(&json!({
            "name": "M8 Bolt",
            "sku": "BOLT-M8",
            "unit_label": "box",
            "default_price": 4.5,
            "is_taxable": true
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(created.status(), 201);
    let product: Value = created.json().await.expect("Invalid product body");
    let id = product["id"].as_str().expect("Missing product id");

    let delete = app
        .client
        .delete(format!("{}/products/{}", app.address, id))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(delete.status(), 200);

    // Gone from the default listing.
    let visible: Vec<Value> = app
        .client
        .get(format!("{}/products", app.address))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Invalid list body");
    assert!(visible.is_empty());

    // Still there when deleted rows are requested.
    let all: Vec<Value> = app
        .client
        .get(format!("{}/products?include_deleted=true", app.address))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Invalid list body");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["deleted"], true);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB at MONGODB_URI"]
async fn product_search_matches_name() {
    let app = TestApp::spawn().await;

    for name in ["Angle Grinder", "Grinding Disc", "Hammer"] {
        let response = app
            .client
            .post(format!("{}/products", app.address))
            .json(&json!({ "name": name, "default_price": 10 }))
            .send()
            .await
            .expect("Failed to create product");
        assert_eq!(response.status(), 201);
    }

    let matched: Vec<Value> = app
        .client
        .get(format!("{}/products?q=grind", app.address))
        .send()
        .await
        .expect("Failed to search products")
        .json()
        .await
        .expect("Invalid list body");
    assert_eq!(matched.len(), 2);

    app.cleanup().await;
}
