/// Account endpoints: registration, listing, sign-in, lookup
use crate::{
    account::{
        AccountDetailResponse, AccountView, RegisterRequest, RegisterResponse, SignInRequest,
        SignInResponse,
    },
    context::AppContext,
    error::ApiResult,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

/// Build account routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/users", post(register).get(list_users))
        .route("/login", post(sign_in))
        .route("/profile/:id", get(get_user_by_id))
}

/// Create account endpoint
async fn register(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let id = ctx
        .account_manager
        .register(&req.username, &req.email, &req.password)
        .await?;

    tracing::info!("account {} created for username {}", id, req.username);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Account created successfully".to_string(),
            id,
            is_verified: false,
        }),
    ))
}

/// List accounts endpoint
async fn list_users(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<AccountView>>> {
    let accounts = ctx.account_manager.list_accounts().await?;

    Ok(Json(accounts))
}

/// Sign-in endpoint: verifies credentials and returns a signed token
async fn sign_in(
    State(ctx): State<AppContext>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<Json<SignInResponse>> {
    let (token, user_id, is_verified) = ctx
        .account_manager
        .sign_in(&req.username, &req.password)
        .await?;

    Ok(Json(SignInResponse {
        token,
        user_id,
        is_verified,
    }))
}

/// Account detail endpoint: the account joined with its profile
async fn get_user_by_id(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<AccountDetailResponse>> {
    let (user, profile) = ctx.account_manager.get_account_with_profile(id).await?;

    Ok(Json(AccountDetailResponse { user, profile }))
}
