/// Profile endpoints
///
/// The target account identity comes exclusively from the verified
/// bearer token; no route accepts it as a path parameter.
use crate::{
    api::MessageResponse,
    auth::AuthContext,
    context::AppContext,
    error::ApiResult,
    profile::{CreateProfileRequest, UpdateProfileRequest},
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{patch, post},
    Json, Router,
};

/// Build profile routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/profile", post(create_profile))
        .route("/updateProfile", post(update_profile))
        .route("/deleteUser", patch(delete_user))
}

/// Create profile endpoint
async fn create_profile(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Json(req): Json<CreateProfileRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    ctx.profile_manager.create_profile(auth.user_id, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Profile created successfully".to_string(),
        }),
    ))
}

/// Partial profile update endpoint
async fn update_profile(
    State(ctx): State<AppContext>,
    auth: AuthContext,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<MessageResponse>> {
    ctx.profile_manager.update_profile(auth.user_id, &req).await?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

/// Soft-delete endpoint for the authenticated account
async fn delete_user(
    State(ctx): State<AppContext>,
    auth: AuthContext,
) -> ApiResult<Json<MessageResponse>> {
    ctx.profile_manager.delete_account(auth.user_id).await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
