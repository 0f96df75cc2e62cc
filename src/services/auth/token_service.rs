//! 세션 토큰 관리 서비스 구현
//!
//! 로그인/가입 흐름이 발급하고 쿠키 `jwt`에 담기는 HS256 세션 토큰을 다룹니다.
//! 토큰 페이로드는 `{ userId, iat, exp }`이며 `JWT_SECRET`으로 서명합니다.

use std::sync::Arc;
use actix_web::cookie::{time, Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use crate::config::{Environment, JwtConfig};
use crate::domain::models::token::SessionClaims;
use crate::errors::{AppError, AuthError};

/// 세션 토큰 서비스
///
/// 비밀키가 설정되지 않은 경우에도 생성은 성공하며, 이때 모든 검증은 실패합니다.
pub struct SessionTokenService {
    secret: Option<String>,
    expiration_days: i64,
    secure_cookies: bool,
}

/// 싱글톤 인스턴스 저장소
static SESSION_TOKEN_SERVICE_INSTANCE: OnceCell<Arc<SessionTokenService>> = OnceCell::new();

impl SessionTokenService {
    /// 환경 변수 기반 싱글톤 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        SESSION_TOKEN_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::from_env()))
            .clone()
    }

    /// `JWT_SECRET`, `JWT_EXPIRATION_DAYS`, 실행 환경으로 서비스를 만듭니다.
    pub fn from_env() -> Self {
        let secret = JwtConfig::secret();
        if secret.is_none() {
            log::warn!("JWT_SECRET is not set; every session token will be rejected");
        }

        Self {
            secret,
            expiration_days: JwtConfig::expiration_days(),
            secure_cookies: !Environment::current().is_development(),
        }
    }

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            expiration_days: 7,
            secure_cookies: true,
        }
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// 사용자 ID로 세션 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 비밀키 미설정 또는 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = SessionTokenService::instance().generate_token(&user.id_string().unwrap())?;
    /// ```
    pub fn generate_token(&self, user_id: &str) -> Result<String, AppError> {
        let secret = self.secret.as_deref()
            .ok_or_else(|| AppError::InternalError("JWT_SECRET is not set".to_string()))?;

        let now = Utc::now();
        let claims = SessionClaims {
            user_id: user_id.to_string(),
            iat: Some(now.timestamp()),
            exp: Some((now + Duration::days(self.expiration_days)).timestamp()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .map_err(|e| AppError::InternalError(format!("세션 토큰 생성 실패: {}", e)))
    }

    /// 세션 토큰 검증 및 클레임 추출
    ///
    /// 서명 불일치, 만료, `userId` 누락, 형식 오류, 비밀키 미설정 모두 `AuthError::InvalidSessionToken`이며
    /// 구체적인 원인은 진단 문자열로만 남습니다.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let secret = self.secret.as_deref()
            .ok_or_else(|| AuthError::InvalidSessionToken("JWT_SECRET is not set".to_string()))?;

        // `exp`가 있으면 만료를 검사하지만 필수는 아님
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();

        decode::<SessionClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => "session token expired".to_string(),
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => "session token signature mismatch".to_string(),
                    _ => format!("session token rejected: {}", e),
                };
                AuthError::InvalidSessionToken(reason)
            })
    }

    /// 세션 토큰을 담는 `jwt` 쿠키
    ///
    /// HttpOnly, SameSite=Strict이며 개발 환경이 아니면 Secure 속성을 붙입니다.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(JwtConfig::COOKIE_NAME, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure_cookies)
            .max_age(time::Duration::days(self.expiration_days))
            .finish()
    }
}
