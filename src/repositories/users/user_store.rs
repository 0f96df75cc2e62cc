use async_trait::async_trait;
use crate::domain::entities::users::user::User;
use crate::errors::AppResult;

/// 사용자 저장소 경계
///
/// 조회 메서드는 비밀번호 필드를 제외한 사용자를 반환합니다.
///
/// # 계약
///
/// - `find_by_id`: 형식이 잘못된 ID는 `AppError::ValidationError`
/// - `create`: 엔티티 불변 조건 위반은 `ValidationError`,
///   이메일 중복 또는 비어 있지 않은 `firebaseUid` 중복은 `ConflictError`
/// - `firebaseUid`가 없는 사용자끼리는 중복으로 보지 않음
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 내부 ID로 사용자 조회
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Firebase uid로 사용자 조회
    async fn find_by_firebase_uid(&self, firebase_uid: &str) -> AppResult<Option<User>>;

    /// 새 사용자 저장 (ID 할당 후 반환)
    async fn create(&self, user: User) -> AppResult<User>;
}
