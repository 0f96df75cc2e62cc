//! 채팅 서비스 인증 게이트
//!
//! 보호된 API 앞에서 두 가지 자격 증명 중 하나로 요청 사용자를 확정합니다.
//!
//! - 쿠키 `jwt`: 이 백엔드가 발급한 HS256 세션 토큰
//! - `Authorization: Bearer`: Firebase ID 토큰
//!
//! 확정된 사용자는 비밀번호가 제거된 [`AuthenticatedUser`](domain::models::auth::AuthenticatedUser)로
//! request extension에 붙어 다운스트림 핸들러에 전달됩니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /health, /api/auth/*
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ AuthMiddleware  │ ← 자격 증명 추출, 거부 응답
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    AuthGate     │ ← Firebase → 세션 우선순위 평가
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   UserStore     │ ← MongoDB users 컬렉션
//! └─────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
