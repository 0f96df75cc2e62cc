//! User Entity Implementation
//!
//! 로컬 가입(이메일/비밀번호)과 Firebase 인증을 모두 지원하는 사용자 엔티티입니다.

use std::borrow::Cow;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::errors::{AppError, AppResult};

/// 사용자 엔티티
///
/// `password`와 `firebase_uid` 중 최소 하나는 반드시 존재해야 합니다.
/// Firebase로 생성된 계정은 비밀번호가 없고, 로컬 가입 계정은 `firebase_uid`가 없습니다.
///
/// `firebase_uid`는 존재할 때만 유일해야 하므로 `None`이면 문서에서 필드 자체를 생략합니다
/// (sparse 유니크 인덱스).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_credential_source"))]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique)
    #[validate(email(message = "유효한 이메일 주소가 필요합니다"))]
    pub email: String,
    /// 사용자 이름
    #[validate(length(min = 1, message = "이름은 필수입니다"))]
    pub full_name: String,
    /// 해시된 비밀번호 (Firebase 사용자의 경우 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6, message = "비밀번호는 최소 6자 이상이어야 합니다"))]
    pub password: Option<String>,
    /// 프로필 이미지 URL
    #[serde(default)]
    pub profile_pic: String,
    /// Firebase 사용자 uid (unique, sparse)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firebase_uid: Option<String>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/비밀번호 해시)
    pub fn new_local(
        email: impl Into<String>,
        full_name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email: email.into(),
            full_name: full_name.into(),
            password: Some(password_hash.into()),
            profile_pic: String::new(),
            firebase_uid: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 Firebase 사용자 생성
    ///
    /// 비밀번호 없이 Firebase uid로만 식별됩니다.
    pub fn new_firebase(
        email: impl Into<String>,
        full_name: impl Into<String>,
        firebase_uid: impl Into<String>,
        profile_pic: impl Into<String>,
    ) -> Self {
        let now = DateTime::now();
        let firebase_uid = firebase_uid.into();

        Self {
            id: None,
            email: email.into(),
            full_name: full_name.into(),
            password: None, // Firebase 사용자는 비밀번호 없음
            profile_pic: profile_pic.into(),
            firebase_uid: Some(firebase_uid).filter(|uid| !uid.is_empty()),
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비어 있지 않은 Firebase uid
    pub fn firebase_uid(&self) -> Option<&str> {
        self.firebase_uid.as_deref().filter(|uid| !uid.is_empty())
    }

    /// Firebase로 생성된 사용자인지 확인
    pub fn is_firebase_user(&self) -> bool {
        self.firebase_uid().is_some()
    }

    /// 저장 전 엔티티 불변 조건 검증
    pub fn ensure_valid(&self) -> AppResult<()> {
        self.validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))
    }
}

/// 비밀번호 또는 Firebase uid 중 하나는 반드시 있어야 합니다.
fn validate_credential_source(user: &User) -> Result<(), ValidationError> {
    if user.password.is_none() && user.firebase_uid().is_none() {
        return Err(ValidationError::new("credential_source")
            .with_message(Cow::from("password 또는 firebaseUid 중 하나는 필수입니다")));
    }
    Ok(())
}
