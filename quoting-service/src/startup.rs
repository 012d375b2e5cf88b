use crate::config::QuotingConfig;
use crate::handlers;
use crate::services::{PdfRenderer, QuoteDb, QuoteRenderer};
use axum::{
    routing::{get, post, put},
    Router,
};
use service_core::error::AppError;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: QuotingConfig,
    pub db: QuoteDb,
    pub renderer: Arc<dyn QuoteRenderer>,
}

pub struct Application {
    port: u16,
    server: Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>,
    state: AppState,
}

impl Application {
    pub async fn build(config: QuotingConfig) -> Result<Self, AppError> {
        let db = QuoteDb::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let renderer: Arc<dyn QuoteRenderer> = Arc::new(PdfRenderer::new());

        let state = AppState {
            config: config.clone(),
            db: db.clone(),
            renderer,
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route(
                "/quotes",
                post(handlers::create_quote).get(handlers::list_quotes),
            )
            .route("/quotes/preview", post(handlers::preview_totals))
            .route(
                "/quotes/:id",
                get(handlers::get_quote).put(handlers::update_quote),
            )
            .route("/quotes/:id/finalize", post(handlers::finalize_quote))
            .route("/quotes/:id/pdf", get(handlers::quote_pdf))
            .route(
                "/customers",
                get(handlers::list_customers).post(handlers::create_customer),
            )
            .route(
                "/customers/:id",
                put(handlers::update_customer).delete(handlers::delete_customer),
            )
            .route(
                "/products",
                get(handlers::list_products).post(handlers::create_product),
            )
            .route(
                "/products/:id",
                put(handlers::update_product).delete(handlers::delete_product),
            )
            .route(
                "/settings",
                get(handlers::get_settings).put(handlers::update_settings),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::pin(server.into_future()),
            state,
        })
    }

    pub fn db(&self) -> &QuoteDb {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
