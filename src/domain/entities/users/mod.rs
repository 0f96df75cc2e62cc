//! Users Entity Module
//!
//! 로컬 가입 사용자와 Firebase 사용자를 하나의 `User` 엔티티로 표현합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! // 로컬 가입 사용자 (비밀번호 해시 보유, firebaseUid 없음)
//! let local = User::new_local("a@example.com", "Alice", hashed_password);
//!
//! // Firebase 사용자 (비밀번호 없음)
//! let firebase = User::new_firebase("b@example.com", "Bob", "firebase-uid-123", "");
//! ```

pub mod user;
