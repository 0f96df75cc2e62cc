//! 이중 모드 인증 게이트
//!
//! 요청의 자격 증명을 다음 우선순위로 평가하여 사용자를 확정합니다.
//!
//! 1. 자격 증명이 하나도 없으면 `NoCredential`
//! 2. Firebase ID 토큰이 있으면 검증
//!    - 성공 + 사용자 있음: 확정
//!    - 성공 + 사용자 없음: 세션 쿠키를 보지 않고 즉시 `UnknownExternalUser`
//!    - 실패 + 세션 쿠키 없음: `InvalidExternalToken`
//!    - 실패 + 세션 쿠키 있음: 3단계로 진행
//! 3. 세션 쿠키가 있고 아직 사용자가 없으면 검증 후 `userId`로 조회
//! 4. 그래도 사용자가 없으면 `NoValidCredential`
//!
//! 검증된 Firebase 토큰이 가리키는 사용자가 없을 때는 세션으로 넘어가지 않지만,
//! Firebase 토큰 자체가 실패하면 세션으로 넘어갑니다.

use std::sync::Arc;
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::{AuthenticatedUser, Credentials};
use crate::errors::{AppError, AuthError};
use crate::repositories::users::UserStore;
use crate::services::auth::{FirebaseAuth, SessionTokenService};

pub struct AuthGate {
    firebase: Arc<FirebaseAuth>,
    users: Arc<dyn UserStore>,
    sessions: Arc<SessionTokenService>,
}

impl AuthGate {
    pub fn new(
        firebase: Arc<FirebaseAuth>,
        users: Arc<dyn UserStore>,
        sessions: Arc<SessionTokenService>,
    ) -> Self {
        Self { firebase, users, sessions }
    }

    /// 자격 증명으로 요청 사용자를 확정합니다.
    ///
    /// # Errors
    ///
    /// 거부 사유별 [`AuthError`] 변형. 저장소 장애는 `AuthError::InternalError`입니다.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AuthenticatedUser, AuthError> {
        if credentials.is_empty() {
            return Err(AuthError::NoCredential);
        }

        let mut user: Option<User> = None;

        if let Some(id_token) = credentials.firebase_token.as_deref() {
            match self.firebase.verify_id_token(id_token).await {
                Ok(claims) => match self.users.find_by_firebase_uid(&claims.uid).await? {
                    Some(found) => user = Some(found),
                    None => return Err(AuthError::UnknownExternalUser),
                },
                Err(e) => {
                    if credentials.session_token.is_none() {
                        return Err(e);
                    }
                    log::debug!("Firebase 토큰 실패, 세션 쿠키로 재시도: {:?}", e.diagnostic());
                }
            }
        }

        if user.is_none() {
            if let Some(session_token) = credentials.session_token.as_deref() {
                user = Some(self.resolve_session_user(session_token).await?);
            }
        }

        user.map(AuthenticatedUser::from)
            .ok_or(AuthError::NoValidCredential)
    }

    async fn resolve_session_user(&self, session_token: &str) -> Result<User, AuthError> {
        let claims = self.sessions.verify(session_token)?;

        match self.users.find_by_id(&claims.user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AuthError::UnknownSessionUser),
            // ObjectId로 해석할 수 없는 userId는 토큰 자체의 결함
            Err(AppError::ValidationError(detail)) => Err(AuthError::InvalidSessionToken(detail)),
            Err(e) => Err(e.into()),
        }
    }
}
