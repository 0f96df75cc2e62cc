//! 인증 게이트 거부 사유
//!
//! 게이트가 요청을 거부하는 모든 경로는 이 열거형의 한 변형으로 표현되며,
//! 각 변형은 고정된 HTTP 상태 코드와 `{ "message": ... }` 본문으로 변환됩니다.
//!
//! | 변형 | 상태 | 메시지 |
//! |------|------|--------|
//! | `NoCredential` | 401 | Unauthorized - No Token Provided |
//! | `UnknownExternalUser` | 404 | Firebase user not found in database |
//! | `InvalidExternalToken` | 401 | Unauthorized - Invalid Firebase Token |
//! | `InvalidSessionToken` | 401 | Unauthorized - Invalid JWT Token |
//! | `UnknownSessionUser` | 404 | JWT user not found |
//! | `NoValidCredential` | 401 | Unauthorized - No valid authentication found |
//! | `InternalError` | 500 | Internal server error |
//!
//! 문자열 필드는 로그 전용 진단 정보로, 응답 본문이나 분기 조건에 쓰이지 않습니다.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use crate::errors::errors::AppError;

#[derive(Error, Debug, Clone)]
pub enum AuthError {
    /// 쿠키와 Authorization 헤더 모두 자격 증명이 없음
    #[error("Unauthorized - No Token Provided")]
    NoCredential,

    /// Firebase ID 토큰 검증 실패 (만료, 서명 불일치, 네트워크 오류 등 모든 원인)
    #[error("Unauthorized - Invalid Firebase Token")]
    InvalidExternalToken(String),

    /// 검증된 Firebase uid에 해당하는 사용자가 없음
    #[error("Firebase user not found in database")]
    UnknownExternalUser,

    /// 세션 토큰 검증 또는 디코딩 실패
    #[error("Unauthorized - Invalid JWT Token")]
    InvalidSessionToken(String),

    /// 세션 토큰의 userId에 해당하는 사용자가 없음
    #[error("JWT user not found")]
    UnknownSessionUser,

    /// 모든 시도 후에도 사용자가 확정되지 않음
    #[error("Unauthorized - No valid authentication found")]
    NoValidCredential,

    #[error("Internal server error")]
    InternalError(String),
}

impl AuthError {
    /// 로그에만 기록되는 진단 문자열
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            AuthError::InvalidExternalToken(detail)
            | AuthError::InvalidSessionToken(detail)
            | AuthError::InternalError(detail) => Some(detail.as_str()),
            _ => None,
        }
    }

    /// 거부 사유를 로그에 남깁니다.
    ///
    /// 내부 에러는 `error`, 나머지는 `warn` 레벨로 기록합니다.
    pub fn log_rejection(&self, path: &str) {
        let line = self.rejection_log_line(path);
        match self {
            AuthError::InternalError(_) => log::error!("{}", line),
            _ => log::warn!("{}", line),
        }
    }

    fn rejection_log_line(&self, path: &str) -> String {
        match (self, self.diagnostic()) {
            (AuthError::InternalError(detail), _) => {
                format!("Error in AuthMiddleware ({}): {}", path, detail)
            }
            (_, Some(detail)) => format!("인증 거부 ({}): {} - {}", path, self, detail),
            (_, None) => format!("인증 거부 ({}): {}", path, self),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::InternalError(err.to_string())
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UnknownExternalUser | AuthError::UnknownSessionUser => StatusCode::NOT_FOUND,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "message": self.to_string()
            }))
    }
}
