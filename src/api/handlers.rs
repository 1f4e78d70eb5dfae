// Request handlers for API endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::api::requests::{CreateCardRequest, CreateListRequest};
use crate::api::responses::{ApiError, CreatedResponse, HealthResponse};
use crate::api::AppState;
use crate::core::errors::{StoreError, ValidationError};
use crate::core::models::{
    Card, CardId, CreateCardInput, CreateListInput, List, ListId, RecordKind,
};

/// Log a rejected store operation, count it, and map it to an HTTP error
fn store_failure(app_state: &AppState, kind: RecordKind, err: StoreError) -> ApiError {
    match &err {
        StoreError::Validation(ValidationError::InvalidCardReference { unresolved }) => {
            for card_id in unresolved {
                error!(
                    kind = %RecordKind::Card,
                    id = %card_id,
                    "Card with id {} not found in cards collection.",
                    card_id
                );
            }
            app_state.metrics.store_failure(kind, "validation");
        }
        StoreError::Validation(reason) => {
            error!(kind = %kind, reason = %reason, "Invalid {} data: {}", kind, reason);
            app_state.metrics.store_failure(kind, "validation");
        }
        StoreError::NotFound { kind, id } => {
            error!(kind = %kind, id = %id, "{} with id {} not found.", kind, id);
            app_state.metrics.store_failure(*kind, "not_found");
        }
    }
    ApiError::from(err)
}

/// Map a body the `Json` extractor refused
///
/// Syntax, shape and content-type problems are invalid data (400). Anything
/// else, such as an oversized body, keeps the extractor's own status.
fn rejected_body(app_state: &AppState, kind: RecordKind, rejection: JsonRejection) -> ApiError {
    let invalid_data = matches!(
        rejection,
        JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_)
    );
    if !invalid_data {
        return ApiError::new(rejection.status(), rejection.body_text());
    }
    let reason = ValidationError::MalformedBody {
        detail: rejection.body_text(),
    };
    store_failure(app_state, kind, reason.into())
}

fn created(location: String, id: String) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreatedResponse { id }),
    )
}

/// GET /card
pub async fn list_cards_handler(State(app_state): State<AppState>) -> Json<Vec<Card>> {
    Json(app_state.store.list_cards().await)
}

/// POST /card
///
/// Returns 201 with the new id and a `Location` header.
pub async fn create_card_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| rejected_body(&app_state, RecordKind::Card, e))?;
    let input = CreateCardInput::try_from(request)
        .map_err(|e| store_failure(&app_state, RecordKind::Card, e.into()))?;

    let card = app_state.store.create_card(input).await;
    app_state.metrics.record_created(RecordKind::Card);
    info!(kind = %RecordKind::Card, id = %card.id, "Card with id {} created", card.id);

    let location = app_state.config.record_url("card", card.id.as_str());
    Ok(created(location, card.id.to_string()))
}

/// GET /card/:id
pub async fn get_card_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    app_state
        .store
        .get_card(&CardId::from(id))
        .await
        .map(Json)
        .map_err(|e| store_failure(&app_state, RecordKind::Card, e))
}

/// DELETE /card/:id
///
/// Also strips the id from every List that references it.
pub async fn delete_card_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = CardId::from(id);
    app_state
        .store
        .delete_card(&id)
        .await
        .map_err(|e| store_failure(&app_state, RecordKind::Card, e))?;

    app_state.metrics.record_deleted(RecordKind::Card);
    info!(kind = %RecordKind::Card, id = %id, "Card with id {} deleted.", id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /list
pub async fn list_lists_handler(State(app_state): State<AppState>) -> Json<Vec<List>> {
    Json(app_state.store.list_lists().await)
}

/// POST /list
///
/// Rejected as a whole if any `cardIds` entry does not name an existing Card.
pub async fn create_list_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateListRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| rejected_body(&app_state, RecordKind::List, e))?;
    let input = CreateListInput::try_from(request)
        .map_err(|e| store_failure(&app_state, RecordKind::List, e.into()))?;

    let list = app_state
        .store
        .create_list(input)
        .await
        .map_err(|e| store_failure(&app_state, RecordKind::List, e))?;
    app_state.metrics.record_created(RecordKind::List);
    info!(kind = %RecordKind::List, id = %list.id, "List with id {} created", list.id);

    let location = app_state.config.record_url("list", list.id.as_str());
    Ok(created(location, list.id.to_string()))
}

/// GET /list/:id
pub async fn get_list_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<List>, ApiError> {
    app_state
        .store
        .get_list(&ListId::from(id))
        .await
        .map(Json)
        .map_err(|e| store_failure(&app_state, RecordKind::List, e))
}

/// DELETE /list/:id
pub async fn delete_list_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = ListId::from(id);
    app_state
        .store
        .delete_list(&id)
        .await
        .map_err(|e| store_failure(&app_state, RecordKind::List, e))?;

    app_state.metrics.record_deleted(RecordKind::List);
    info!(kind = %RecordKind::List, id = %id, "List with id {} deleted.", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Health check handler
///
/// GET /health - no auth
pub async fn health_handler(State(app_state): State<AppState>) -> Json<HealthResponse> {
    let counts = app_state.store.counts().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        cards: counts.cards,
        lists: counts.lists,
    })
}

/// Metrics handler
///
/// GET /metrics - Prometheus text format, no auth
pub async fn metrics_handler(State(app_state): State<AppState>) -> Result<String, ApiError> {
    app_state.metrics.render().map_err(|e| {
        error!(error = %e, "Failed to render metrics");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    })
}
