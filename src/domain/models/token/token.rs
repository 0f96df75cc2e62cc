//! JWT 클레임 구조체
//!
//! 세션 쿠키 토큰과 Firebase ID 토큰의 페이로드를 표현합니다.
use serde::{Deserialize, Serialize};

/// 세션 토큰(쿠키 `jwt`)의 클레임
///
/// 로그인/가입 흐름이 `{ userId }`로 서명한 토큰이므로 필드 이름은 `userId`를 유지합니다.
/// `iat`, `exp`가 없는 토큰도 서명이 맞으면 유효합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 사용자 ID (ObjectId 16진수 문자열)
    #[serde(rename = "userId")]
    pub user_id: String,
    /// 토큰 발급 시간 (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// 토큰 만료 시간 (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// 검증된 Firebase ID 토큰의 클레임
///
/// `uid`는 `sub`와 같은 값이며 검증 이후에 채워집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirebaseClaims {
    /// Firebase 사용자 uid
    #[serde(default)]
    pub uid: String,
    pub sub: String,
    pub aud: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    /// 사용자가 실제로 로그인한 시간
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}
