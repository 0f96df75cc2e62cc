//! 인증 관련 HTTP 핸들러

use actix_web::{get, HttpResponse};
use crate::domain::models::auth::AuthenticatedUser;

/// 현재 로그인한 사용자 조회
///
/// 인증 미들웨어 뒤에 등록되며, 게이트가 확정한 사용자를 비밀번호 없이 그대로 돌려줍니다.
/// 프론트엔드는 앱 시작 시 이 엔드포인트로 로그인 상태를 확인합니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:5001/api/auth/check --cookie "jwt=eyJhbGciOiJIUzI1NiJ9..."
/// curl http://localhost:5001/api/auth/check -H "Authorization: Bearer <firebase-id-token>"
/// ```
#[get("/check")]
pub async fn check_auth(user: AuthenticatedUser) -> HttpResponse {
    log::debug!("인증 상태 확인: {}", user.id);
    HttpResponse::Ok().json(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_check_without_gate_is_unauthorized() {
        let app = test::init_service(App::new().service(check_auth)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/check").to_request()).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Unauthorized - No valid authentication found");
    }
}
