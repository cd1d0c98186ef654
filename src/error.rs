use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    #[error("Identity was not resolved for this request")]
    IdentityUnresolved,

    #[error("Session binding is missing for this request")]
    SessionUnavailable,

    #[error("Session cookie error: {0}")]
    SessionCodec(#[from] crate::session::SessionCodecError),
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl ResponseError for LobbyError {
    fn status_code(&self) -> StatusCode {
        match self {
            LobbyError::IdentityUnresolved => StatusCode::INTERNAL_SERVER_ERROR,
            LobbyError::SessionUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            LobbyError::SessionCodec(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_response = ErrorResponse {
            success: false,
            error: self.to_string(),
        };

        HttpResponse::build(status).json(error_response)
    }
}

pub type Result<T> = std::result::Result<T, LobbyError>;
