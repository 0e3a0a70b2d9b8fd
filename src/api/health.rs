//! Welcome and liveness endpoints

/// Welcome message
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Welcome text", body = String)
    )
)]
pub async fn welcome() -> &'static str {
    "Welcome to Book API. Try some endpoints, like '/books'."
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/ping",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = String)
    )
)]
pub async fn ping() -> &'static str {
    "pong"
}
