//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 전역으로 공유되는 서비스는 `OnceCell` 기반 `instance()`로 접근합니다.

pub mod auth;
