//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 인증 상태 확인 엔드포인트
//!   - 현재 사용자 조회 (`GET /api/auth/check`)
//!
//! 보호된 핸들러는 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)
//! 추출자로 게이트가 확정한 사용자를 받습니다.

pub mod auth;
