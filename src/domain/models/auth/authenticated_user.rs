use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::DateTime;
use mongodb::bson::serde_helpers::serialize_bson_datetime_as_rfc3339_string;
use serde::Serialize;
use crate::domain::entities::users::user::User;
use crate::errors::AuthError;

/// 게이트가 확정하여 요청 컨텍스트에 붙이는 사용자 정보
///
/// `User`에서 비밀번호 필드를 제외한 표현입니다. 타입에 비밀번호 필드가 없으므로
/// 다운스트림 핸들러나 응답 직렬화로 새어 나갈 수 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID (ObjectId 16진수 문자열)
    #[serde(rename = "_id")]
    pub id: String,

    pub email: String,

    pub full_name: String,

    pub profile_pic: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub firebase_uid: Option<String>,

    #[serde(serialize_with = "serialize_bson_datetime_as_rfc3339_string")]
    pub created_at: DateTime,

    #[serde(serialize_with = "serialize_bson_datetime_as_rfc3339_string")]
    pub updated_at: DateTime,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            full_name,
            profile_pic,
            firebase_uid,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            full_name,
            profile_pic,
            firebase_uid: firebase_uid.filter(|uid| !uid.is_empty()),
            created_at,
            updated_at,
        }
    }
}

/// ActixWeb FromRequest trait 구현
///
/// `AuthMiddleware`가 감싼 라우트에서만 값이 존재합니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AuthError::NoValidCredential.into())),
        }
    }
}
