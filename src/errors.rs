use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Rejection returned by a route. The progress pipeline itself never fails,
/// so this only covers requests the server cannot answer at all, such as a
/// share link with no known origin.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        let response = AppError::bad_request("missing host header").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
