//! 사용자 데이터 액세스 계층
//!
//! - [`user_store`] - 게이트와 저장소 사이의 경계 트레이트
//! - [`user_repo`] - MongoDB 구현 (`users` 컬렉션)
//! - [`memory_repo`] - 동일한 계약을 지키는 메모리 구현

pub mod user_store;
pub mod user_repo;
pub mod memory_repo;

pub use user_store::UserStore;
pub use user_repo::UserRepository;
pub use memory_repo::MemoryUserRepository;
