use crate::{
    middleware::{jwt, role, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::{
        card::service::{command::DynCardCommandService, query::DynCardQueryService},
        transfer::DynTransferService,
    },
    domain::{
        principal::AuthenticatedUser,
        requests::{card::FindAllCards, transfer::TransferRequest},
        responses::{
            ApiResponse, ApiResponsePagination, CardBalanceResponse, CardResponse,
            TransferResponse,
        },
    },
    errors::AppErrorHttp,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cards/user",
    tag = "Card",
    security(("bearer_auth" = [])),
    params(FindAllCards),
    responses(
        (status = 200, description = "Cards of the authenticated user", body = ApiResponsePagination<Vec<CardResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_user_cards(
    Extension(service): Extension<DynCardQueryService>,
    Extension(principal): Extension<AuthenticatedUser>,
    Query(params): Query<FindAllCards>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_by_owner(&principal, &params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/cards/{card_id}/balance",
    tag = "Card",
    security(("bearer_auth" = [])),
    params(("card_id" = i64, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Masked number and balance", body = ApiResponse<CardBalanceResponse>),
        (status = 404, description = "Card not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_card_balance(
    Extension(service): Extension<DynCardQueryService>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(card_id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.get_balance(&principal, card_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/cards/{card_id}/block-request",
    tag = "Card",
    security(("bearer_auth" = [])),
    params(("card_id" = i64, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Block requested", body = ApiResponse<CardResponse>),
        (status = 404, description = "Card not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn request_block_card(
    Extension(service): Extension<DynCardCommandService>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(card_id): Path<i64>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.request_block(&principal, card_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/cards/transfer",
    tag = "Card",
    security(("bearer_auth" = [])),
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer completed", body = ApiResponse<TransferResponse>),
        (status = 400, description = "Business rule violation"),
        (status = 404, description = "Card not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn transfer_between_cards(
    Extension(service): Extension<DynTransferService>,
    Extension(principal): Extension<AuthenticatedUser>,
    SimpleValidatedJson(body): SimpleValidatedJson<TransferRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.transfer(&principal, &body).await?;
    Ok(Json(response))
}

pub fn card_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cards/user", get(get_user_cards))
        .route("/api/cards/{card_id}/balance", get(get_card_balance))
        .route(
            "/api/cards/{card_id}/block-request",
            post(request_block_card),
        )
        .route("/api/cards/transfer", post(transfer_between_cards))
        .route_layer(middleware::from_fn(role::require_user))
        .route_layer(middleware::from_fn(jwt::auth))
        .layer(Extension(app_state.di_container.card_query_service.clone()))
        .layer(Extension(
            app_state.di_container.card_command_service.clone(),
        ))
        .layer(Extension(app_state.di_container.transfer_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
