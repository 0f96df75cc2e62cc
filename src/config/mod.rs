//! # Configuration Module
//!
//! 환경 변수 기반 설정값들을 중앙집중식으로 관리합니다.
//!
//! - [`data_config`] - 실행 환경, 서버, MongoDB, CORS, Rate Limiting 설정
//! - [`auth_config`] - Firebase 서비스 계정, 세션 JWT 설정
//!
//! `.env.dev` / `.env.prod` 파일은 `main`에서 `PROFILE`에 따라 로드됩니다.

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
