use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use app::error::EngineError;

use crate::ApiResponse;

#[derive(Debug)]
pub struct ApiError {
    pub code: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: StatusCode, message: String) -> Self {
        Self { code, message }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let code = match &err {
            EngineError::Configuration { .. }
            | EngineError::InvalidDayRange { .. }
            | EngineError::InvalidBracketSize { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::InvalidPhaseTransition { .. } => StatusCode::CONFLICT,
            EngineError::SeasonNotFound(_)
            | EngineError::NoCurrentSeason
            | EngineError::TournamentNotFound(_)
            | EngineError::TeamNotFound(_)
            | EngineError::MatchNotFound(_) => StatusCode::NOT_FOUND,
            EngineError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(code, err.to_string())
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = axum::Json(ApiResponse::<()>::error(&self.message));
        (self.code, body).into_response()
    }
}
