use crate::{
    middleware::{jwt, role, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch},
};
use shared::{
    abstract_trait::card::service::{command::DynCardCommandService, query::DynCardQueryService},
    domain::{
        requests::card::{CreateCardRequest, FindAllCards},
        responses::{ApiResponse, ApiResponsePagination, CardResponse},
    },
    errors::AppErrorHttp,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/admin/cards",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(FindAllCards),
    responses(
        (status = 200, description = "All cards, paged", body = ApiResponsePagination<Vec<CardResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn get_all_cards(
    Extension(service): Extension<DynCardQueryService>,
    Query(params): Query<FindAllCards>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_all(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/admin/cards",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CreateCardRequest,
    responses(
        (status = 200, description = "Card issued", body = ApiResponse<CardResponse>),
        (status = 404, description = "Owner not found"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_card(
    Extension(service): Extension<DynCardCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateCardRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.create(&body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/admin/cards/{id}/block",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Card blocked", body = ApiResponse<CardResponse>),
        (status = 400, description = "Card already blocked"),
        (status = 404, description = "Card not found")
    )
)]
pub async fn block_card(
    Extension(service): Extension<DynCardCommandService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.block(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/admin/cards/{id}/activate",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Card activated", body = ApiResponse<CardResponse>),
        (status = 400, description = "Card expired or already active"),
        (status = 404, description = "Card not found")
    )
)]
pub async fn activate_card(
    Extension(service): Extension<DynCardCommandService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.activate(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/admin/cards/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Card deleted"),
        (status = 400, description = "Card is not in a deletable status"),
        (status = 404, description = "Card not found")
    )
)]
pub async fn delete_card(
    Extension(service): Extension<DynCardCommandService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.delete(id).await?;
    Ok(Json(response))
}

pub fn admin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/admin/cards", get(get_all_cards).post(create_card))
        .route("/api/admin/cards/{id}/block", patch(block_card))
        .route("/api/admin/cards/{id}/activate", patch(activate_card))
        .route("/api/admin/cards/{id}", delete(delete_card))
        .route_layer(middleware::from_fn(role::require_admin))
        .route_layer(middleware::from_fn(jwt::auth))
        .layer(Extension(app_state.di_container.card_query_service.clone()))
        .layer(Extension(
            app_state.di_container.card_command_service.clone(),
        ))
        .layer(Extension(app_state.jwt_config.clone()))
}
