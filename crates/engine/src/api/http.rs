//! HTTP routes.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use armory_domain::{
    CharacterDataId, CharacterId, CharacterName, DomainError, EquipDirection, PlayerId,
    WeaponDataId, WeaponId, WeaponName,
};

use crate::app::App;
use crate::infrastructure::ports::ItemKey;
use crate::use_cases::inventory::{
    InventoryError, InventoryRequest, InventoryResponse, ObservedEquipState,
};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/characters/{player_id}", get(list_characters))
        .route("/characters/{player_id}/{character_id}", get(get_character))
        .route(
            "/characters/{player_id}/new/{character_data_id}",
            post(create_character),
        )
        .route("/weapons/{player_id}", get(list_weapons))
        .route("/weapons/{player_id}/{weapon_id}", get(get_weapon))
        .route(
            "/weapons/{player_id}/new/{weapon_data_id}",
            post(create_weapon),
        )
        .route("/inventory/{player_id}", get(list_all))
        .route(
            "/inventory/{player_id}/{direction}/{character_id}/{weapon_id}",
            post(set_equip),
        )
}

async fn health() -> &'static str {
    "OK"
}

async fn dispatch(
    app: &App,
    request: InventoryRequest,
) -> Result<Json<InventoryResponse>, ApiError> {
    Ok(Json(app.use_cases.inventory.handle(request).await?))
}

async fn list_characters(
    State(app): State<Arc<App>>,
    Path(player_id): Path<String>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let request = InventoryRequest::ListCharacters {
        player_id: PlayerId::new(player_id)?,
    };
    dispatch(&app, request).await
}

async fn get_character(
    State(app): State<Arc<App>>,
    Path((player_id, character_id)): Path<(String, String)>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let request = InventoryRequest::GetCharacter {
        player_id: PlayerId::new(player_id)?,
        character_id: CharacterId::new(character_id)?,
    };
    dispatch(&app, request).await
}

async fn create_character(
    State(app): State<Arc<App>>,
    Path((player_id, character_data_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<InventoryResponse>, ApiError> {
    let name = parse_body(&body)?
        .name
        .map(CharacterName::new)
        .transpose()?;
    let request = InventoryRequest::CreateCharacter {
        player_id: PlayerId::new(player_id)?,
        character_data_id: CharacterDataId::new(character_data_id)?,
        name,
    };
    dispatch(&app, request).await
}

async fn list_weapons(
    State(app): State<Arc<App>>,
    Path(player_id): Path<String>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let request = InventoryRequest::ListWeapons {
        player_id: PlayerId::new(player_id)?,
    };
    dispatch(&app, request).await
}

async fn get_weapon(
    State(app): State<Arc<App>>,
    Path((player_id, weapon_id)): Path<(String, String)>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let request = InventoryRequest::GetWeapon {
        player_id: PlayerId::new(player_id)?,
        weapon_id: WeaponId::new(weapon_id)?,
    };
    dispatch(&app, request).await
}

async fn create_weapon(
    State(app): State<Arc<App>>,
    Path((player_id, weapon_data_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<InventoryResponse>, ApiError> {
    let name = parse_body(&body)?.name.map(WeaponName::new).transpose()?;
    let request = InventoryRequest::CreateWeapon {
        player_id: PlayerId::new(player_id)?,
        weapon_data_id: WeaponDataId::new(weapon_data_id)?,
        name,
    };
    dispatch(&app, request).await
}

async fn list_all(
    State(app): State<Arc<App>>,
    Path(player_id): Path<String>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let request = InventoryRequest::ListAll {
        player_id: PlayerId::new(player_id)?,
    };
    dispatch(&app, request).await
}

async fn set_equip(
    State(app): State<Arc<App>>,
    Path((player_id, direction, character_id, weapon_id)): Path<(String, String, String, String)>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let request = InventoryRequest::SetEquip {
        player_id: PlayerId::new(player_id)?,
        character_id: CharacterId::new(character_id)?,
        weapon_id: WeaponId::new(weapon_id)?,
        direction: direction.parse::<EquipDirection>()?,
    };
    dispatch(&app, request).await
}

/// Optional body of the create routes.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateBody {
    name: Option<String>,
}

/// An empty body means "use the defaults".
fn parse_body(body: &[u8]) -> Result<CreateBody, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateBody::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("Invalid body: {e}")))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict {
        key: ItemKey,
        field: String,
        observed: Option<ObservedEquipState>,
    },
    Unavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Conflict {
                key,
                field,
                observed,
            } => (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "conflict",
                    "partition": key.partition,
                    "sort_key": key.sort,
                    "field": field,
                    "observed": observed,
                })),
            )
                .into_response(),
            ApiError::Unavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable").into_response()
            }
        }
    }
}

impl From<InventoryError> for ApiError {
    fn from(e: InventoryError) -> Self {
        match e {
            InventoryError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            InventoryError::InvalidRequest(inner) => ApiError::BadRequest(inner.to_string()),
            InventoryError::Conflict {
                key,
                field,
                observed,
            } => ApiError::Conflict {
                key,
                field,
                observed,
            },
            InventoryError::StorageUnavailable(inner) => {
                tracing::error!(error = %inner, "Inventory storage failure");
                ApiError::Unavailable(inner.to_string())
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
