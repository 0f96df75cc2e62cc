//! 애플리케이션 에러 모듈
//!
//! - [`errors`] - 인프라/비즈니스 계층의 범용 에러 (`AppError`)
//! - [`auth_error`] - 인증 게이트가 클라이언트에게 돌려주는 거부 사유 (`AuthError`)

pub mod errors;
pub mod auth_error;

pub use errors::{AppError, AppResult, ErrorContext};
pub use auth_error::AuthError;
