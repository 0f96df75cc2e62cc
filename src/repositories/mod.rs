//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 인증 게이트는 [`UserStore`](users::UserStore) 트레이트에만 의존하며,
//! 운영 환경에서는 MongoDB 구현을, 테스트에서는 메모리 구현을 주입합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserRepository, UserStore};
//!
//! let user_repo = UserRepository::new(database);
//! let user = user_repo.find_by_firebase_uid("uid-123").await?;
//! ```

pub mod users;
