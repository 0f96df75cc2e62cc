//! 인증 서비스 모듈
//!
//! - [`firebase_service`] - Firebase ID 토큰 검증과 지연 초기화되는 신뢰 핸들
//! - [`token_service`] - 쿠키 `jwt`에 담기는 HS256 세션 토큰
//! - [`auth_gate`] - 두 자격 증명을 우선순위대로 평가해 사용자를 확정하는 게이트
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthGate, FirebaseAuth, SessionTokenService};
//!
//! let gate = AuthGate::new(FirebaseAuth::instance(), users, SessionTokenService::instance());
//! let user = gate.authenticate(&Credentials::from_request(&req)).await?;
//! ```

pub mod firebase_service;
pub mod token_service;
pub mod auth_gate;

#[cfg(test)]
pub(crate) mod testing;

pub use firebase_service::*;
pub use token_service::*;
pub use auth_gate::*;
