//! Database service for quoting-service.

use crate::models::{CompanySettings, Customer, Product, Quote, SequenceCounter};
use mongodb::{
    bson::{doc, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument, UpdateOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct QuoteDb {
    client: MongoClient,
    db: Database,
}

impl QuoteDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for quoting-service");

        // Compound index on (status, created_at) for the history listing
        let status_created_index = IndexModel::builder()
            .keys(doc! { "status": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("status_created_lookup".to_string())
                    .build(),
            )
            .build();

        self.quotes()
            .create_index(status_created_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create status index on quotes collection: {}", e);
                AppError::from(e)
            })?;

        // Unique sparse index on quote_number; drafts have no number yet,
        // finalized quotes must never share one.
        let quote_number_index = IndexModel::builder()
            .keys(doc! { "quote_number": 1 })
            .options(
                IndexOptions::builder()
                    .name("quote_number_unique".to_string())
                    .unique(true)
                    .sparse(true)
                    .build(),
            )
            .build();

        self.quotes()
            .create_index(quote_number_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create quote_number index: {}", e);
                AppError::from(e)
            })?;

        // Name index for catalog search
        let product_name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .name("product_name_lookup".to_string())
                    .build(),
            )
            .build();

        self.products()
            .create_index(product_name_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create name index on products collection: {}", e);
                AppError::from(e)
            })?;

        tracing::info!("MongoDB indexes ready");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn quotes(&self) -> Collection<Quote> {
        self.db.collection("quotes")
    }

    pub fn customers(&self) -> Collection<Customer> {
        self.db.collection("customers")
    }

    pub fn products(&self) -> Collection<Product> {
        self.db.collection("products")
    }

    pub fn settings(&self) -> Collection<CompanySettings> {
        self.db.collection("settings")
    }

    pub fn counters(&self) -> Collection<SequenceCounter> {
        self.db.collection("counters")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub async fn find_quote(&self, id: &str) -> Result<Option<Quote>, AppError> {
        let quote = self
            .quotes()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)?;
        Ok(quote)
    }

    /// Apply a `$set` patch to a quote only while it is still a draft.
    /// Returns false when no draft matched (missing id or already
    /// finalized); the caller decides which of the two it was.
    pub async fn update_draft(&self, id: &str, patch: Document) -> Result<bool, AppError> {
        let result = self
            .quotes()
            .update_one(doc! { "_id": id, "status": "draft" }, patch, None)
            .await
            .map_err(AppError::from)?;
        Ok(result.matched_count > 0)
    }

    /// The finalize write: same draft-status guard at write time, so two
    /// racing finalize calls can never both transition the quote.
    pub async fn finalize_draft(&self, id: &str, patch: Document) -> Result<bool, AppError> {
        self.update_draft(id, patch).await
    }

    /// Read the settings singleton, persisting synthesized defaults on
    /// first access so the UI and the finalize path see the same document.
    pub async fn load_or_init_settings(&self) -> Result<CompanySettings, AppError> {
        if let Some(settings) = self
            .settings()
            .find_one(doc! {}, None)
            .await
            .map_err(AppError::from)?
        {
            return Ok(settings);
        }

        let defaults = CompanySettings::default();
        self.settings()
            .insert_one(&defaults, None)
            .await
            .map_err(AppError::from)?;
        tracing::info!("Settings document missing, created defaults");
        Ok(defaults)
    }

    /// Upsert the settings singleton with a `$set` patch.
    pub async fn upsert_settings(&self, patch: Document) -> Result<(), AppError> {
        let options = UpdateOptions::builder().upsert(true).build();
        self.settings()
            .update_one(doc! {}, patch, options)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    /// Atomically increment and fetch the sequence counter for a scope.
    ///
    /// A single `findOneAndUpdate` with `$inc` + upsert: the counter is
    /// created at 1 when absent, and concurrent callers always receive
    /// strictly distinct, monotonically increasing values. Any failure here
    /// is an allocation failure; no quote state has been touched yet.
    pub async fn next_sequence(&self, scope: &str, year: i32) -> Result<i64, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters()
            .find_one_and_update(
                doc! { "_id": scope },
                doc! {
                    "$inc": { "seq": 1_i64 },
                    // Metadata only; $inc itself creates seq on insert.
                    "$setOnInsert": { "year": year },
                },
                options,
            )
            .await
            .map_err(|e| {
                tracing::error!(scope = %scope, "Counter increment failed: {}", e);
                AppError::AllocationFailure(anyhow::anyhow!(
                    "counter increment failed for scope '{}': {}",
                    scope,
                    e
                ))
            })?
            .ok_or_else(|| {
                AppError::AllocationFailure(anyhow::anyhow!(
                    "counter for scope '{}' missing after upsert",
                    scope
                ))
            })?;

        Ok(counter.seq)
    }
}
