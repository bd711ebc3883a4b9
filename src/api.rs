// 🌐 REST API with Axum
//
// One ledger, one mutex. Every handler holds the lock for its whole
// read or mutate-and-persist cycle, so overlapping requests cannot
// clobber each other's writes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::LedgerError;
use crate::ledger::{Ledger, Summary};
use crate::transaction::{NewTransaction, Transaction};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    /// A panicked handler never leaves the ledger half-mutated (mutations
    /// only commit after a successful save), so a poisoned lock is still usable.
    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Response bodies
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

// ============================================================================
// Error mapping
// ============================================================================

pub struct ApiError(LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            LedgerError::NotFound(_) => (StatusCode::NOT_FOUND, "transaction not found".to_string()),
            LedgerError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            // Paths and OS errors stay in the log
            other => {
                tracing::error!(error = %other, "ledger operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /transactions - All transactions in insertion order
async fn list_transactions(State(state): State<AppState>) -> Json<Vec<Transaction>> {
    Json(state.ledger().list_transactions())
}

/// POST /transactions - Record a transaction
async fn create_transaction(
    State(state): State<AppState>,
    Json(input): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let tx = input.into_transaction()?;
    state.ledger().add_transaction(tx.clone())?;

    Ok((StatusCode::CREATED, Json(tx)))
}

/// DELETE /transactions/:id - Remove by id
async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.ledger().remove_transaction(&id)?;

    Ok(Json(DeletedResponse { deleted: id }))
}

/// GET /balance - Sum of all amounts
async fn get_balance(State(state): State<AppState>) -> Json<BalanceResponse> {
    Json(BalanceResponse {
        balance: state.ledger().get_balance(),
    })
}

/// GET /summary - Totals per category
async fn get_summary(State(state): State<AppState>) -> Json<Summary> {
    Json(state.ledger().summary_by_category())
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/:id", delete(delete_transaction))
        .route("/balance", get(get_balance))
        .route("/summary", get(get_summary))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
