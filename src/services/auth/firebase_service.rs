//! Firebase ID 토큰 검증 서비스
//!
//! Firebase Admin SDK의 `verifyIdToken`에 해당하는 기능을 제공합니다.
//!
//! # 구성
//!
//! - [`TokenVerifier`] - 신뢰 핸들이 제공하는 검증 인터페이스
//! - [`FirebaseApp`] - 서비스 계정 설정으로 만든 실제 신뢰 핸들. Google securetoken
//!   공개키(JWK)로 RS256 서명과 `aud`/`iss`/`exp`/`iat`/`sub` 클레임을 검증합니다.
//! - [`FirebaseAuth`] - 프로세스 전역에서 한 번만 초기화되는 신뢰 핸들 보관소
//!
//! # 초기화 규칙
//!
//! 신뢰 핸들은 첫 사용 시점에 지연 초기화됩니다. 생성에 실패하면 에러를 로그로만 남기고
//! 핸들을 비워 두며, 다음 호출에서 다시 시도합니다. 동시에 여러 요청이 첫 초기화를
//! 시도해도 생성은 정확히 한 번만 일어납니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! let firebase = FirebaseAuth::instance();
//! let claims = firebase.verify_id_token(id_token).await?;
//! println!("Firebase uid: {}", claims.uid);
//! ```

use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, EncodingKey, Validation};
use once_cell::sync::OnceCell;
use reqwest::header::CACHE_CONTROL;
use crate::config::{FirebaseConfig, FIREBASE_ISSUER_PREFIX};
use crate::domain::models::token::FirebaseClaims;
use crate::errors::{AppError, AppResult, AuthError, ErrorContext};

/// `Cache-Control` 헤더가 없을 때 공개키 캐시 유지 시간 (초)
const DEFAULT_KEY_TTL_SECS: i64 = 3600;

/// `iat`, `auth_time` 검증 시 허용하는 시계 오차 (초)
const CLOCK_SKEW_SECS: i64 = 60;

/// Firebase uid 최대 길이
const MAX_UID_LENGTH: usize = 128;

/// 신뢰 핸들의 검증 인터페이스
///
/// 실패 사유는 로그용 진단 문자열로만 전달되며 호출자는 이를 분기 조건으로 쓰지 않습니다.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<FirebaseClaims, String>;
}

/// 공유되는 신뢰 핸들
pub type TrustHandle = Arc<dyn TokenVerifier>;

type Initializer = Box<dyn Fn() -> AppResult<TrustHandle> + Send + Sync>;

/// Firebase 서비스 계정 정보
#[derive(Debug, Clone)]
pub struct FirebaseCredentials {
    pub project_id: String,
    pub client_email: String,
    /// 줄바꿈이 복원된 PEM 개인키
    pub private_key: String,
    pub jwks_url: String,
}

impl FirebaseCredentials {
    /// 호출 시점의 환경 변수에서 서비스 계정 정보를 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - `FIREBASE_PROJECT_ID`, `FIREBASE_CLIENT_EMAIL`,
    ///   `FIREBASE_PRIVATE_KEY` 중 하나라도 없는 경우
    pub fn from_env() -> AppResult<Self> {
        let missing = |key: &str| AppError::ValidationError(format!("{} is not set", key));

        Ok(Self {
            project_id: FirebaseConfig::project_id().ok_or_else(|| missing("FIREBASE_PROJECT_ID"))?,
            client_email: FirebaseConfig::client_email().ok_or_else(|| missing("FIREBASE_CLIENT_EMAIL"))?,
            private_key: FirebaseConfig::private_key().ok_or_else(|| missing("FIREBASE_PRIVATE_KEY"))?,
            jwks_url: FirebaseConfig::jwks_url(),
        })
    }
}

/// 캐시된 Google 공개키 집합
struct CachedKeys {
    set: JwkSet,
    expires_at: DateTime<Utc>,
}

/// 서비스 계정으로 구성된 Firebase 신뢰 핸들
pub struct FirebaseApp {
    project_id: String,
    client_email: String,
    jwks_url: String,
    http: reqwest::Client,
    keys: RwLock<Option<CachedKeys>>,
}

impl FirebaseApp {
    /// 서비스 계정 정보로 신뢰 핸들을 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 필수 값이 비어 있거나 개인키가 RSA PEM이 아닌 경우
    /// * `AppError::InternalError` - HTTP 클라이언트 생성 실패
    pub fn new(credentials: FirebaseCredentials) -> AppResult<Self> {
        if credentials.project_id.trim().is_empty() {
            return Err(AppError::ValidationError("project id is empty".to_string()));
        }
        if !credentials.client_email.contains('@') {
            return Err(AppError::ValidationError(format!(
                "invalid service account email: {}",
                credentials.client_email
            )));
        }

        // 서비스 계정 키 형식 검증 (키 내용은 로그에 남기지 않음)
        EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
            .map_err(|e| AppError::ValidationError(format!("failed to parse private key: {}", e)))?;

        let http = reqwest::Client::builder()
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self {
            project_id: credentials.project_id,
            client_email: credentials.client_email,
            jwks_url: credentials.jwks_url,
            http,
            keys: RwLock::new(None),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// ID 토큰을 검증하고 클레임을 반환합니다.
    pub async fn verify_id_token(&self, id_token: &str) -> Result<FirebaseClaims, String> {
        // 형식이 잘못된 토큰으로 공개키를 받으러 가지 않음
        decode_header(id_token).map_err(|e| format!("malformed ID token: {}", e))?;

        let keys = self.signing_keys().await?;
        verify_with_keys(id_token, &keys, &self.project_id, Utc::now().timestamp())
    }

    fn cached_keys(&self) -> Option<JwkSet> {
        let cache = self.keys.read().ok()?;
        cache.as_ref()
            .filter(|cached| cached.expires_at > Utc::now())
            .map(|cached| cached.set.clone())
    }

    async fn signing_keys(&self) -> Result<JwkSet, String> {
        if let Some(keys) = self.cached_keys() {
            return Ok(keys);
        }

        log::debug!("Firebase 공개키 갱신: {}", self.jwks_url);

        let response = self.http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| format!("failed to fetch Firebase public keys: {}", e))?
            .error_for_status()
            .map_err(|e| format!("Firebase public key endpoint error: {}", e))?;

        let ttl = response.headers()
            .get(CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(DEFAULT_KEY_TTL_SECS);

        let set: JwkSet = response
            .json()
            .await
            .map_err(|e| format!("invalid Firebase public key set: {}", e))?;

        if let Ok(mut cache) = self.keys.write() {
            *cache = Some(CachedKeys {
                set: set.clone(),
                expires_at: Utc::now() + Duration::seconds(ttl),
            });
        }

        Ok(set)
    }
}

#[async_trait]
impl TokenVerifier for FirebaseApp {
    async fn verify(&self, id_token: &str) -> Result<FirebaseClaims, String> {
        self.verify_id_token(id_token).await
    }
}

/// 주어진 공개키 집합으로 Firebase ID 토큰을 검증합니다.
///
/// - 헤더: `alg == RS256`, `kid`가 공개키 집합에 존재
/// - 클레임: `aud == project_id`, `iss == https://securetoken.google.com/<project_id>`,
///   `exp` 미만료, `iat`/`auth_time`이 미래가 아님, `sub`가 1~128자
pub fn verify_with_keys(
    id_token: &str,
    keys: &JwkSet,
    project_id: &str,
    now: i64,
) -> Result<FirebaseClaims, String> {
    let header = decode_header(id_token).map_err(|e| format!("malformed ID token: {}", e))?;

    if header.alg != Algorithm::RS256 {
        return Err(format!("unexpected algorithm {:?}, expected RS256", header.alg));
    }

    let kid = header.kid
        .ok_or_else(|| "ID token has no \"kid\" header".to_string())?;
    let jwk = keys.find(&kid)
        .ok_or_else(|| format!("no Firebase public key matches kid {}", kid))?;
    let decoding_key = DecodingKey::from_jwk(jwk)
        .map_err(|e| format!("unusable Firebase public key {}: {}", kid, e))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[project_id]);
    validation.set_issuer(&[format!("{}{}", FIREBASE_ISSUER_PREFIX, project_id)]);
    validation.set_required_spec_claims(&["exp", "iat", "aud", "iss", "sub"]);
    validation.leeway = CLOCK_SKEW_SECS as u64;

    let mut claims = decode::<FirebaseClaims>(id_token, &decoding_key, &validation)
        .map_err(|e| format!("ID token verification failed: {}", e))?
        .claims;

    if claims.sub.is_empty() || claims.sub.len() > MAX_UID_LENGTH {
        return Err("ID token has an invalid \"sub\" claim".to_string());
    }
    if claims.iat > now + CLOCK_SKEW_SECS {
        return Err("ID token was issued in the future".to_string());
    }
    if claims.auth_time.is_some_and(|auth_time| auth_time > now + CLOCK_SKEW_SECS) {
        return Err("ID token has an \"auth_time\" in the future".to_string());
    }

    claims.uid = claims.sub.clone();
    Ok(claims)
}

/// `Cache-Control` 헤더 값에서 `max-age` 초를 꺼냅니다.
fn parse_max_age(cache_control: &str) -> Option<i64> {
    cache_control
        .split(',')
        .map(str::trim)
        .find_map(|directive| directive.strip_prefix("max-age="))
        .and_then(|seconds| seconds.trim().parse::<i64>().ok())
        .filter(|seconds| *seconds > 0)
}

/// Firebase 신뢰 핸들 보관소
///
/// 핸들은 `OnceCell`에 저장되어 최초 성공 이후 불변이며, 동시 요청이 읽기 전용으로 공유합니다.
pub struct FirebaseAuth {
    app: OnceCell<TrustHandle>,
    initializer: Initializer,
}

/// 싱글톤 인스턴스 저장소
static FIREBASE_AUTH_INSTANCE: OnceCell<Arc<FirebaseAuth>> = OnceCell::new();

impl FirebaseAuth {
    /// 환경 변수 기반 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 인스턴스 생성만 할 뿐 신뢰 핸들 초기화는 첫 검증 시점으로 미룹니다.
    pub fn instance() -> Arc<Self> {
        FIREBASE_AUTH_INSTANCE
            .get_or_init(|| Arc::new(Self::from_env()))
            .clone()
    }

    /// 초기화 시점에 `FIREBASE_*` 환경 변수를 읽어 [`FirebaseApp`]을 만드는 보관소
    pub fn from_env() -> Self {
        Self::with_initializer(|| {
            let app = FirebaseApp::new(FirebaseCredentials::from_env()?)?;
            log::debug!(
                "Firebase 서비스 계정: {} (project: {})",
                app.client_email(),
                app.project_id()
            );
            Ok(Arc::new(app) as TrustHandle)
        })
    }

    /// 임의의 신뢰 핸들 생성 함수로 보관소를 만듭니다.
    pub fn with_initializer<F>(initializer: F) -> Self
    where
        F: Fn() -> AppResult<TrustHandle> + Send + Sync + 'static,
    {
        Self {
            app: OnceCell::new(),
            initializer: Box::new(initializer),
        }
    }

    /// 신뢰 핸들을 초기화합니다.
    ///
    /// 이미 초기화되었으면 기존 핸들을 반환합니다. 생성 실패는 로그로만 남기고 `None`을
    /// 반환하며, 핸들은 비워 둔 채로 다음 호출에서 다시 시도합니다.
    pub fn initialize(&self) -> Option<TrustHandle> {
        let result = self.app.get_or_try_init(|| {
            let handle = (self.initializer)()?;
            log::info!("Firebase Admin initialized");
            Ok::<_, AppError>(handle)
        });

        match result {
            Ok(handle) => Some(handle.clone()),
            Err(e) => {
                log::error!("Firebase Admin initialization error: {}", e);
                None
            }
        }
    }

    /// 신뢰 핸들이 준비되었는지 확인
    pub fn is_initialized(&self) -> bool {
        self.app.get().is_some()
    }

    /// Firebase ID 토큰을 검증합니다.
    ///
    /// 필요하면 먼저 초기화를 시도합니다. 초기화 실패를 포함한 모든 실패 원인은
    /// `AuthError::InvalidExternalToken` 하나로 접힙니다.
    pub async fn verify_id_token(&self, id_token: &str) -> Result<FirebaseClaims, AuthError> {
        let handle = match self.app.get() {
            Some(handle) => handle.clone(),
            None => self.initialize().ok_or_else(|| {
                AuthError::InvalidExternalToken("Firebase Admin is not initialized".to_string())
            })?,
        };

        handle.verify(id_token).await.map_err(AuthError::InvalidExternalToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use jsonwebtoken::{encode, Header};
    use serde_json::json;
    use crate::config::normalize_private_key;
    use crate::services::auth::testing::StubVerifier;

    const TEST_KEY_PEM: &str = include_str!("testdata/firebase_test_key.pem");
    const TEST_KEY_N: &str = "5WUtixLXcLpKOnIbbKNOLVV9K5fiqUUh6I5tYJPlLfp9vc1Q0EPslw4-3CSSHuqDFsJBCg9Logmj8rvrexJPhb3icQVC2dsbrydVsEaM4BZYNh_sS_MpUjTqwe6eWzYczxnsERoRWtJu2zVZT81U6N5kkX6-6Ot1nI3uHNo4WB7zSGjJ1gp53bTvbhHtRI1aSvIZGn2FYY7iclJTX7WvvsExfPaCwZcviUDCn3YSa-F6MBwO1lxmfuzpZeD0kZMDplpzhXomaq_GJzP9Z9i85QBm-eN83LCjuYzc1T9iI3ffwUZefN6UYQmyaBw0YWM1pUVXWzPJ8TvuCVD5MyQR7Q";
    const PROJECT: &str = "demo-chat";

    fn key_set() -> JwkSet {
        serde_json::from_value(json!({
            "keys": [{
                "kty": "RSA",
                "alg": "RS256",
                "use": "sig",
                "kid": "test-kid",
                "n": TEST_KEY_N,
                "e": "AQAB"
            }]
        }))
        .unwrap()
    }

    fn sign(claims: serde_json::Value, kid: Option<&str>) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = kid.map(str::to_string);
        let key = EncodingKey::from_rsa_pem(TEST_KEY_PEM.as_bytes()).unwrap();
        encode(&header, &claims, &key).unwrap()
    }

    fn claims_for(sub: &str, now: i64) -> serde_json::Value {
        json!({
            "sub": sub,
            "aud": PROJECT,
            "iss": format!("https://securetoken.google.com/{}", PROJECT),
            "iat": now - 10,
            "exp": now + 3600,
            "auth_time": now - 20,
            "email": "alice@example.com",
            "email_verified": true
        })
    }

    fn credentials(private_key: &str) -> FirebaseCredentials {
        FirebaseCredentials {
            project_id: PROJECT.to_string(),
            client_email: "firebase-adminsdk@demo-chat.iam.gserviceaccount.com".to_string(),
            private_key: private_key.to_string(),
            jwks_url: "http://127.0.0.1:9/keys".to_string(),
        }
    }

    #[test]
    fn test_valid_token_yields_uid() {
        let now = Utc::now().timestamp();
        let token = sign(claims_for("firebase-uid-1", now), Some("test-kid"));

        let claims = verify_with_keys(&token, &key_set(), PROJECT, now).unwrap();

        assert_eq!(claims.uid, "firebase-uid-1");
        assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_wrong_audience_or_issuer_is_rejected() {
        let now = Utc::now().timestamp();

        let mut wrong_aud = claims_for("uid", now);
        wrong_aud["aud"] = json!("other-project");
        assert!(verify_with_keys(&sign(wrong_aud, Some("test-kid")), &key_set(), PROJECT, now).is_err());

        let mut wrong_iss = claims_for("uid", now);
        wrong_iss["iss"] = json!("https://accounts.google.com");
        assert!(verify_with_keys(&sign(wrong_iss, Some("test-kid")), &key_set(), PROJECT, now).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let mut claims = claims_for("uid", now);
        claims["iat"] = json!(now - 7200);
        claims["exp"] = json!(now - 3600);

        let result = verify_with_keys(&sign(claims, Some("test-kid")), &key_set(), PROJECT, now);

        assert!(result.is_err());
    }

    #[test]
    fn test_future_iat_and_empty_sub_are_rejected() {
        let now = Utc::now().timestamp();

        let mut future = claims_for("uid", now);
        future["iat"] = json!(now + 600);
        assert!(verify_with_keys(&sign(future, Some("test-kid")), &key_set(), PROJECT, now).is_err());

        let empty_sub = claims_for("", now);
        assert!(verify_with_keys(&sign(empty_sub, Some("test-kid")), &key_set(), PROJECT, now).is_err());
    }

    #[test]
    fn test_kid_must_match_known_key() {
        let now = Utc::now().timestamp();

        let unknown = sign(claims_for("uid", now), Some("rotated-away"));
        assert!(verify_with_keys(&unknown, &key_set(), PROJECT, now).is_err());

        let missing = sign(claims_for("uid", now), None);
        assert!(verify_with_keys(&missing, &key_set(), PROJECT, now).is_err());
    }

    #[test]
    fn test_hmac_token_and_garbage_are_rejected() {
        let now = Utc::now().timestamp();
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some("test-kid".to_string());
        let hmac = encode(&header, &claims_for("uid", now), &EncodingKey::from_secret(b"secret")).unwrap();

        assert!(verify_with_keys(&hmac, &key_set(), PROJECT, now).is_err());
        assert!(verify_with_keys("not.a.jwt", &key_set(), PROJECT, now).is_err());
        assert!(verify_with_keys("", &key_set(), PROJECT, now).is_err());
    }

    #[test]
    fn test_parse_max_age() {
        assert_eq!(parse_max_age("public, max-age=22015, must-revalidate, no-transform"), Some(22015));
        assert_eq!(parse_max_age("no-cache"), None);
        assert_eq!(parse_max_age("max-age=abc"), None);
    }

    #[test]
    fn test_firebase_app_accepts_escaped_private_key() {
        let escaped = TEST_KEY_PEM.replace('\n', "\\n");
        let app = FirebaseApp::new(credentials(&normalize_private_key(&escaped))).unwrap();

        assert_eq!(app.project_id(), PROJECT);
    }

    #[test]
    fn test_firebase_app_rejects_bad_configuration() {
        assert!(FirebaseApp::new(credentials("not a pem")).is_err());

        let mut no_project = credentials(TEST_KEY_PEM);
        no_project.project_id = String::new();
        assert!(FirebaseApp::new(no_project).is_err());

        let mut bad_email = credentials(TEST_KEY_PEM);
        bad_email.client_email = "nobody".to_string();
        assert!(FirebaseApp::new(bad_email).is_err());
    }

    #[actix_web::test]
    async fn test_malformed_token_fails_before_key_fetch() {
        let app = FirebaseApp::new(credentials(TEST_KEY_PEM)).unwrap();

        let result = app.verify_id_token("garbage").await;

        assert!(result.unwrap_err().contains("malformed"));
    }

    #[test]
    fn test_initialize_is_idempotent_across_threads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let firebase = FirebaseAuth::with_initializer(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(StubVerifier::default()) as TrustHandle)
        });

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| assert!(firebase.initialize().is_some()));
            }
        });
        assert!(firebase.initialize().is_some());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(firebase.is_initialized());
    }

    #[actix_web::test]
    async fn test_failed_initialization_is_swallowed_and_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let firebase = FirebaseAuth::with_initializer(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(AppError::ValidationError("FIREBASE_PROJECT_ID is not set".to_string()))
        });

        assert!(firebase.initialize().is_none());
        assert!(!firebase.is_initialized());

        let result = firebase.verify_id_token("any-token").await;
        assert!(matches!(result, Err(AuthError::InvalidExternalToken(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[actix_web::test]
    async fn test_verify_initializes_lazily_and_collapses_errors() {
        let firebase = FirebaseAuth::with_initializer(|| {
            Ok(Arc::new(StubVerifier::default().accept("good-token", "uid-1")) as TrustHandle)
        });
        assert!(!firebase.is_initialized());

        let claims = firebase.verify_id_token("good-token").await.unwrap();
        assert_eq!(claims.uid, "uid-1");
        assert!(firebase.is_initialized());

        let rejected = firebase.verify_id_token("expired-token").await;
        assert!(matches!(rejected, Err(AuthError::InvalidExternalToken(_))));
    }
}
