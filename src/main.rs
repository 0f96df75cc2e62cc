//! 채팅 인증 게이트 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동합니다. MongoDB 연결과 사용자 인덱스를 준비하고,
//! Firebase 신뢰 핸들은 첫 요청 시점에 지연 초기화합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use chat_auth_gate::config::{RateLimitConfig, ServerConfig};
use chat_auth_gate::db::Database;
use chat_auth_gate::repositories::users::{UserRepository, UserStore};
use chat_auth_gate::routes::configure_all_routes;
use chat_auth_gate::services::auth::{AuthGate, FirebaseAuth, SessionTokenService};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 채팅 인증 게이트 시작중...");

    let gate = Arc::new(initialize_gate().await?);

    start_http_server(gate).await
}

/// 저장소와 인증 서비스를 묶어 게이트를 구성합니다
///
/// Firebase 신뢰 핸들은 여기서 만들지 않고 첫 Bearer 토큰 검증 시점에 초기화됩니다.
async fn initialize_gate() -> io::Result<AuthGate> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await.map_err(|e| {
        error!("데이터베이스 연결 실패: {}", e);
        io::Error::other(e.to_string())
    })?);

    info!("✅ MongoDB 연결 성공: {}", database.database_name());

    let repository = UserRepository::new(database);
    if let Err(e) = repository.create_indexes().await {
        error!("사용자 인덱스 생성 실패: {}", e);
    }
    let users: Arc<dyn UserStore> = Arc::new(repository);

    Ok(AuthGate::new(FirebaseAuth::instance(), users, SessionTokenService::instance()))
}

/// HTTP 서버를 구성하고 실행합니다
async fn start_http_server(gate: Arc<AuthGate>) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("잘못된 Rate Limiting 설정"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let cors_origins = ServerConfig::cors_origins();

    HttpServer::new(move || {
        let gate = gate.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&cors_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(|cfg| configure_all_routes(cfg, gate))
    })
        .bind(bind_address)?
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 세션 쿠키가 교차 출처 요청에 실려야 하므로 자격 증명을 허용합니다.
fn configure_cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
