/*
 * Responsibility
 * - GET /user/profile (guarded)
 */
use crate::api::dto::user::ProfileResponse;
use crate::api::extractors::AuthUser;
use crate::api::response::ApiResponse;

pub async fn profile(AuthUser(user): AuthUser) -> ApiResponse<ProfileResponse> {
    ApiResponse::ok(
        ProfileResponse::from(&user),
        "Profile retrieved successfully",
    )
}
