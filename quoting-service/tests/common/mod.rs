use quoting_service::config::QuotingConfig;
use quoting_service::services::QuoteDb;
use quoting_service::startup::Application;
use serde_json::{json, Value};
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub db: QuoteDb,
    pub db_name: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("quoting_test_{}", Uuid::new_v4());

        let mut config = QuotingConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            db,
            db_name,
            client,
        }
    }

    /// Create a draft quote and return its id.
    pub async fn create_draft(&self, payload: &Value) -> String {
        let response = self
            .client
            .post(format!("{}/quotes", self.address))
            .json(payload)
            .send()
            .await
            .expect("Failed to create draft");
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.expect("Invalid create response");
        body["id"].as_str().expect("Missing quote id").to_string()
    }

    /// Drop the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}

/// A fully-taxable two-unit draft: subtotal 200, 10% discount, 10% VAT.
pub fn taxable_draft() -> Value {
    json!({
        "customer": {
            "name": "Acme Trading",
            "address_lines": ["Building 12, Road 345", "Manama"]
        },
        "items": [{
            "product_name": "Consulting",
            "unit_price": 100,
            "quantity": 2,
            "unit_label": "days",
            "is_taxable": true
        }],
        "discount": { "type": "percent", "value": 10 },
        "vat_rate": 0.1,
        "currency": "BHD"
    })
}
