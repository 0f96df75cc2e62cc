//! # Domain Module
//!
//! 인증 게이트가 다루는 도메인 타입들을 정의합니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← 영속 엔티티 (User)
//! └── models/       ← 요청 범위 값 객체 (자격 증명, 인증된 사용자, 토큰 클레임)
//! ```

pub mod entities;
pub mod models;

pub use entities::*;
pub use models::*;
