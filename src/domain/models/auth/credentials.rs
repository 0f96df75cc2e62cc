//! 요청에서 추출한 자격 증명
//!
//! 게이트는 두 가지 자격 증명을 후보로 봅니다.
//! - 쿠키 `jwt`: 이 백엔드가 발급한 세션 토큰
//! - `Authorization` 헤더: Firebase ID 토큰 (`Bearer <token>`)
//!
//! 형식이 잘못된 헤더는 에러가 아니라 "토큰 없음"으로 취급합니다.

use actix_web::HttpRequest;
use actix_web::http::header::AUTHORIZATION;
use crate::config::JwtConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// 쿠키 `jwt`의 세션 토큰
    pub session_token: Option<String>,
    /// `Authorization` 헤더의 Firebase ID 토큰
    pub firebase_token: Option<String>,
}

impl Credentials {
    /// 쿠키 값과 Authorization 헤더 원문으로부터 자격 증명을 구성합니다.
    ///
    /// 빈 문자열은 존재하지 않는 것으로 봅니다.
    pub fn new(session_cookie: Option<&str>, authorization: Option<&str>) -> Self {
        Self {
            session_token: session_cookie
                .filter(|token| !token.is_empty())
                .map(str::to_string),
            firebase_token: authorization
                .and_then(bearer_token)
                .map(str::to_string),
        }
    }

    /// HTTP 요청의 쿠키와 헤더에서 자격 증명을 추출합니다.
    pub fn from_request(req: &HttpRequest) -> Self {
        let cookie = req.cookie(JwtConfig::COOKIE_NAME);
        let authorization = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        Self::new(cookie.as_ref().map(|c| c.value()), authorization)
    }

    /// 두 자격 증명이 모두 없는지 확인
    pub fn is_empty(&self) -> bool {
        self.session_token.is_none() && self.firebase_token.is_none()
    }
}

/// `Authorization` 헤더에서 첫 번째 공백 뒤의 토큰 조각을 꺼냅니다.
///
/// 스킴 이름은 확인하지 않으며, 조각이 없거나 비어 있으면 `None`입니다.
pub fn bearer_token(header: &str) -> Option<&str> {
    header.split(' ').nth(1).filter(|token| !token.is_empty())
}
