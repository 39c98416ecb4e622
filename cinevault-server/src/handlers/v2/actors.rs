use axum::{Json, extract::State};
use cinevault_core::{
    ApiRequest, ApiRequestMeta, ApiResponse,
    domain::{ActorRequest, ActorResponse, Validate},
};
use tracing::{info, warn};

use super::{Enveloped, not_found, vanished};
use crate::infra::{
    app_state::AppState,
    extract::{Envelope, EnvelopePath},
};

const ACTOR_NOT_FOUND: &str = "Actor is not found";

pub async fn get_actors(
    State(state): State<AppState>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<Vec<ActorResponse>> {
    info!(request_id = %meta.request_id, caller = %meta.username, "GetActors (v2) called");
    let actors = state.unit_of_work().actors.list_actors().await?;
    info!(request_id = %meta.request_id, actor_count = actors.len(), "GetActors (v2) completed");
    Ok(Json(ApiResponse::ok("Actors are received", actors)))
}

pub async fn get_actor_by_id(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<ActorResponse> {
    info!(request_id = %meta.request_id, actor_id = id, "GetActorById (v2) called");
    let Some(actor) = state.unit_of_work().actors.get_actor(id).await? else {
        warn!(request_id = %meta.request_id, actor_id = id, "GetActorById (v2): actor not found");
        return Err(not_found(ACTOR_NOT_FOUND));
    };
    Ok(Json(ApiResponse::ok("Actor is received", actor)))
}

pub async fn create_actor(
    State(state): State<AppState>,
    Envelope(request): Envelope<ApiRequest<ActorRequest>>,
) -> Enveloped<i32> {
    let ApiRequest { meta, data } = request;
    info!(
        request_id = %meta.request_id,
        full_name = %data.full_name,
        movie_ids = ?data.movie_ids,
        "CreateActor (v2) called"
    );
    data.validate()?;

    let id = state.unit_of_work().actors.create_actor(&data).await?;
    info!(request_id = %meta.request_id, actor_id = id, "CreateActor (v2) completed");
    Ok(Json(ApiResponse::ok("Actor is created", id)))
}

pub async fn update_actor(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(request): Envelope<ApiRequest<ActorRequest>>,
) -> Enveloped<ActorResponse> {
    let ApiRequest { meta, data } = request;
    info!(request_id = %meta.request_id, actor_id = id, "UpdateActor (v2) called");
    data.validate()?;

    let actors = &state.unit_of_work().actors;
    if !actors.update_actor(id, &data).await? {
        warn!(request_id = %meta.request_id, actor_id = id, "UpdateActor (v2): actor not found");
        return Err(not_found(ACTOR_NOT_FOUND));
    }
    let actor = actors
        .get_actor(id)
        .await?
        .ok_or_else(|| vanished("Actor", id))?;

    info!(request_id = %meta.request_id, actor_id = id, "UpdateActor (v2) completed");
    Ok(Json(ApiResponse::ok("Actor is updated", actor)))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<()> {
    info!(request_id = %meta.request_id, actor_id = id, "DeleteActor (v2) called");
    if !state.unit_of_work().actors.delete_actor(id).await? {
        warn!(request_id = %meta.request_id, actor_id = id, "DeleteActor (v2): actor not found");
        return Err(not_found(ACTOR_NOT_FOUND));
    }
    info!(request_id = %meta.request_id, actor_id = id, "DeleteActor (v2) completed");
    Ok(Json(ApiResponse::message(200, "Actor is deleted")))
}
