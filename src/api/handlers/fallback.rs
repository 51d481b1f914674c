use crate::error::AppError;

/// Any path no route matches.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// A known path called with a method it does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
