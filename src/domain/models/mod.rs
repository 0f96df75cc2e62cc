//! 요청 범위 도메인 모델
//!
//! - [`auth`] - 요청에서 추출한 자격 증명과 게이트가 확정한 사용자
//! - [`token`] - 세션 JWT와 Firebase ID 토큰의 클레임

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;
