//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - 쿠키 `jwt`의 세션 토큰 또는 `Authorization: Bearer`의 Firebase ID 토큰 검증
//! - 확정된 사용자를 request extension에 저장
//! - 거부 시 다운스트림 핸들러를 호출하지 않고 `{ "message": ... }` 응답
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new()
//!     .service(
//!         web::scope("/api/messages")
//!             .wrap(AuthMiddleware::new(gate.clone()))
//!             .route("/", web::get().to(list_messages))
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
