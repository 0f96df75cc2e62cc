//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션에 대한 MongoDB 기반 [`UserStore`] 구현입니다.
//!
//! ## 특징
//!
//! - **비밀번호 제외 조회**: 모든 조회는 `password` 필드를 프로젝션에서 제외
//! - **데이터 무결성**: `email` 유니크 인덱스, `firebaseUid` 유니크 + sparse 인덱스

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::{
    db::Database,
    domain::entities::users::user::User,
    errors::{AppError, AppResult},
    repositories::users::user_store::UserStore,
};

/// 컬렉션 이름
pub const USER_COLLECTION: &str = "users";

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 사용자 데이터 액세스 리포지토리
///
/// ## 인덱스
///
/// - `email_unique`: email (UNIQUE)
/// - `firebase_uid_unique`: firebaseUid (UNIQUE, SPARSE) - 필드가 없는 문서는 인덱싱되지 않으므로
///   로컬 가입 사용자 여러 명이 공존할 수 있음
/// - `created_at_desc`: createdAt (내림차순)
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = UserRepository::new(database.clone());
/// repo.create_indexes().await?;
///
/// let user = repo.find_by_id("507f1f77bcf86cd799439011").await?;
/// ```
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(USER_COLLECTION)
    }

    /// 비밀번호를 제외한 단일 문서 조회
    async fn find_one_without_password(&self, filter: Document) -> AppResult<Option<User>> {
        self.collection()
            .find_one(filter)
            .projection(doc! { "password": 0 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행합니다.
    /// 이미 중복 데이터가 있으면 유니크 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let firebase_uid_index = IndexModel::builder()
            .keys(doc! { "firebaseUid": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("firebase_uid_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, firebase_uid_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.find_one_without_password(doc! { "_id": object_id }).await
    }

    async fn find_by_firebase_uid(&self, firebase_uid: &str) -> AppResult<Option<User>> {
        if firebase_uid.is_empty() {
            return Ok(None);
        }

        self.find_one_without_password(doc! { "firebaseUid": firebase_uid }).await
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        user.ensure_valid()?;

        // 중복 확인 (인덱스가 최종 방어선)
        let email_taken = self.collection()
            .count_documents(doc! { "email": user.email.as_str() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        if email_taken > 0 {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        if let Some(uid) = user.firebase_uid() {
            if self.find_by_firebase_uid(uid).await?.is_some() {
                return Err(AppError::ConflictError("이미 연결된 Firebase 계정입니다".to_string()));
            }
        }

        let result = self.collection()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("이메일 또는 Firebase 계정이 이미 존재합니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        let id = result.inserted_id.as_object_id()
            .ok_or_else(|| AppError::InternalError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string()))?;
        user.id = Some(id);

        Ok(user)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}
