//! # Domain Entities Module
//!
//! MongoDB 문서와 1:1로 매핑되는 엔티티들을 정의합니다.
//! 필드 이름은 기존 `users` 컬렉션 스키마(`fullName`, `firebaseUid` 등)를 그대로 따릅니다.

pub mod users;

pub use users::user::User;
