//! 인증 서비스 테스트용 대역

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use async_trait::async_trait;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::FirebaseClaims;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::{MemoryUserRepository, UserStore};
use crate::services::auth::{FirebaseAuth, TrustHandle, TokenVerifier};

/// 등록된 토큰만 통과시키는 Firebase 검증기
#[derive(Default)]
pub struct StubVerifier {
    accepted: HashMap<String, String>,
}

impl StubVerifier {
    pub fn accept(mut self, token: &str, uid: &str) -> Self {
        self.accepted.insert(token.to_string(), uid.to_string());
        self
    }

    pub fn into_firebase(self) -> Arc<FirebaseAuth> {
        let handle: TrustHandle = Arc::new(self);
        Arc::new(FirebaseAuth::with_initializer(move || Ok(handle.clone())))
    }
}

#[async_trait]
impl TokenVerifier for StubVerifier {
    async fn verify(&self, id_token: &str) -> Result<FirebaseClaims, String> {
        let uid = self.accepted
            .get(id_token)
            .ok_or_else(|| "Firebase ID token has expired".to_string())?;

        Ok(FirebaseClaims {
            uid: uid.clone(),
            sub: uid.clone(),
            aud: "demo-chat".to_string(),
            iss: "https://securetoken.google.com/demo-chat".to_string(),
            iat: 0,
            exp: i64::MAX,
            auth_time: None,
            email: None,
            email_verified: None,
            name: None,
            picture: None,
        })
    }
}

/// 초기화가 항상 실패하는 Firebase 보관소
pub fn unavailable_firebase() -> Arc<FirebaseAuth> {
    Arc::new(FirebaseAuth::with_initializer(|| {
        Err(AppError::ValidationError("FIREBASE_PROJECT_ID is not set".to_string()))
    }))
}

/// 조회 횟수를 세는 저장소
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryUserRepository,
    lookups: AtomicUsize,
}

impl CountingStore {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_by_firebase_uid(&self, firebase_uid: &str) -> AppResult<Option<User>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_firebase_uid(firebase_uid).await
    }

    async fn create(&self, user: User) -> AppResult<User> {
        self.inner.create(user).await
    }
}

/// 모든 조회가 데이터베이스 에러로 끝나는 저장소
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn find_by_id(&self, _id: &str) -> AppResult<Option<User>> {
        Err(AppError::DatabaseError("connection reset by peer".to_string()))
    }

    async fn find_by_firebase_uid(&self, _firebase_uid: &str) -> AppResult<Option<User>> {
        Err(AppError::DatabaseError("connection reset by peer".to_string()))
    }

    async fn create(&self, _user: User) -> AppResult<User> {
        Err(AppError::DatabaseError("connection reset by peer".to_string()))
    }
}
