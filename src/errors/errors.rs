//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 저장소와 입력 검증처럼 인증 게이트 바깥 계층에서 발생하는 에러를 표현합니다.
//! HTTP 응답으로 직접 나가지 않고, 요청 경로에서는 항상 `AuthError`로 변환됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{AppResult, ErrorContext};
//!
//! let http = reqwest::Client::builder()
//!     .build()
//!     .context("HTTP 클라이언트 생성 실패")?;
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 인증 게이트로 전달되면 모두 `AuthError::InternalError`로 접혀서
/// 내부 메시지가 클라이언트에 노출되지 않습니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (잘못된 ObjectId 포함)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 충돌/중복 에러 (유니크 제약 위반)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 내부 서버 에러
    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            other => panic!("Expected InternalError, got {:?}", other),
        }
    }

    #[test]
    fn test_error_context_passes_ok_through() {
        let ok: Result<u8, &str> = Ok(1);
        assert_eq!(ok.context("unused").ok(), Some(1));
    }

    #[test]
    fn test_display_carries_detail() {
        let error = AppError::ConflictError("duplicate email".to_string());
        assert_eq!(error.to_string(), "Conflict error: duplicate email");
    }
}
