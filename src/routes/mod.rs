//! API 라우트 설정 모듈
//!
//! # Routes
//!
//! - `GET /health` - 헬스체크 (인증 불필요)
//! - `GET /api/auth/check` - 현재 사용자 조회 (인증 미들웨어 적용)
//!
//! 보호가 필요한 다른 스코프도 같은 게이트로 감쌉니다.
//!
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/messages")
//!         .wrap(AuthMiddleware::new(gate.clone()))
//!         .service(handlers::messages::list_messages)
//! );
//! ```

use std::sync::Arc;
use actix_web::web;
use serde_json::json;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::AuthGate;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// let gate = Arc::new(AuthGate::new(firebase, users, sessions));
/// let app = App::new().configure(|cfg| configure_all_routes(cfg, gate.clone()));
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig, gate: Arc<AuthGate>) {
    cfg.service(health_check);

    configure_auth_routes(cfg, gate);
}

/// 인증 관련 라우트를 설정합니다
fn configure_auth_routes(cfg: &mut web::ServiceConfig, gate: Arc<AuthGate>) {
    cfg.service(
        web::scope("/api/auth")
            .wrap(AuthMiddleware::new(gate))
            .service(handlers::auth::check_auth)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "chat_auth_gate",
///   "version": "0.1.0",
///   "timestamp": "2023-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "chat_auth_gate",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;
    use crate::domain::entities::users::user::User;
    use crate::repositories::users::{MemoryUserRepository, UserStore};
    use crate::services::auth::testing::unavailable_firebase;
    use crate::services::auth::SessionTokenService;

    #[actix_web::test]
    async fn test_health_is_public_and_check_is_protected() {
        let store = Arc::new(MemoryUserRepository::new());
        let user = store
            .create(User::new_local("alice@example.com", "Alice", "$2b$10$hashedpassword"))
            .await
            .unwrap();
        let sessions = Arc::new(SessionTokenService::new("test-secret"));
        let token = sessions.generate_token(&user.id_string().unwrap()).unwrap();
        let gate = Arc::new(AuthGate::new(unavailable_firebase(), store, sessions));

        let app = test::init_service(App::new().configure(|cfg| configure_all_routes(cfg, gate.clone()))).await;

        let health = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(health.status(), StatusCode::OK);

        let anonymous = test::call_service(&app, test::TestRequest::get().uri("/api/auth/check").to_request()).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/auth/check")
            .cookie(Cookie::new("jwt", token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["fullName"], "Alice");
        assert_eq!(body["_id"], user.id_string().unwrap());
        assert!(body.get("password").is_none());
    }
}
