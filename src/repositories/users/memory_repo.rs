//! 메모리 기반 사용자 저장소
//!
//! MongoDB 구현과 같은 [`UserStore`] 계약(비밀번호 제외 조회, 이메일 유니크,
//! sparse `firebaseUid` 유니크)을 지키며, 테스트와 로컬 실험에서 게이트에 주입합니다.

use std::sync::RwLock;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::{
    domain::entities::users::user::User,
    errors::{AppError, AppResult},
    repositories::users::user_store::UserStore,
};

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 사용자 수
    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find_where<P>(&self, predicate: P) -> AppResult<Option<User>>
    where
        P: Fn(&User) -> bool,
    {
        let users = self.users.read()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))?;

        Ok(users.iter()
            .find(|user| predicate(user))
            .cloned()
            .map(without_password))
    }
}

fn without_password(mut user: User) -> User {
    user.password = None;
    user
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.find_where(|user| user.id == Some(object_id))
    }

    async fn find_by_firebase_uid(&self, firebase_uid: &str) -> AppResult<Option<User>> {
        if firebase_uid.is_empty() {
            return Ok(None);
        }

        self.find_where(|user| user.firebase_uid() == Some(firebase_uid))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        user.ensure_valid()?;

        let mut users = self.users.write()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))?;

        if users.iter().any(|existing| existing.email == user.email) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        if let Some(uid) = user.firebase_uid() {
            if users.iter().any(|existing| existing.firebase_uid() == Some(uid)) {
                return Err(AppError::ConflictError("이미 연결된 Firebase 계정입니다".to_string()));
            }
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());

        Ok(user)
    }
}
