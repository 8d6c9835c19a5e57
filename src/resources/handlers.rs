use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{Collection, Resource, LIST_LIMIT};
use crate::{
    auth::extractors::AdminUser,
    dto::MessageResponse,
    error::{AppError, AppJson, AppResult},
    state::AppState,
};

#[instrument(skip_all, fields(collection = R::COLLECTION))]
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<R>>> {
    let filter = R::FILTER_FIELD.and_then(|field| {
        params
            .get(field)
            .filter(|v| !v.is_empty())
            .map(|v| (field, v.as_str()))
    });

    let mut items = Collection::<R>::new(state.db.as_ref())
        .list(filter, LIST_LIMIT)
        .await?;
    R::arrange(&mut items);
    Ok(Json(items))
}

#[instrument(skip_all, fields(collection = R::COLLECTION))]
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppJson(input): AppJson<R::Create>,
) -> AppResult<Json<R>> {
    let item = R::create(input, Uuid::new_v4().to_string(), OffsetDateTime::now_utc());
    Collection::<R>::new(state.db.as_ref()).insert(&item).await?;
    info!(id = %item.id(), admin_id = %admin.id, "{} created", R::KIND);
    Ok(Json(item))
}

#[instrument(skip_all, fields(collection = R::COLLECTION))]
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    AppJson(patch): AppJson<R::Patch>,
) -> AppResult<Json<R>> {
    let collection = Collection::<R>::new(state.db.as_ref());
    let mut item = collection.get(&id).await?.ok_or_else(not_found::<R>)?;

    if item.apply(patch, OffsetDateTime::now_utc()) {
        // deleted between read and write
        if !collection.replace(&item).await? {
            return Err(not_found::<R>());
        }
        info!(%id, admin_id = %admin.id, "{} updated", R::KIND);
    }
    Ok(Json(item))
}

#[instrument(skip_all, fields(collection = R::COLLECTION))]
pub async fn remove<R: Resource>(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !Collection::<R>::new(state.db.as_ref()).delete(&id).await? {
        return Err(not_found::<R>());
    }
    info!(%id, admin_id = %admin.id, "{} deleted", R::KIND);
    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully",
        R::KIND
    ))))
}

fn not_found<R: Resource>() -> AppError {
    AppError::NotFound(format!("{} not found", R::KIND))
}
