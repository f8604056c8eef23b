//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 버전 프리픽스 `/api/v1` 아래에 도메인별 스코프를 구성하고,
//! 스코프 단위로 인증 미들웨어를 적용합니다.
//!
//! # Auth Middleware Usage
//!
//! ## 인증 불필요 (Public)
//! 회원 가입, 로그인, 상품/배너/직무 카탈로그 조회
//!
//! ## 선택적 인증 (Optional)
//! 프로젝트 목록/상세, 투표 상세 - 비로그인도 허용하되 로그인 시
//! 북마크/참여 여부가 함께 반환됩니다
//!
//! ## 필수 인증 (Required)
//! 주문/결제, 북마크, 모집 지원, 업로드 URL 발급 (게스트 토큰도 허용)
//!
//! ## 관리자 전용
//! `/api/v1/admin/*` - `admin` 역할 필요

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_auth_routes(cfg);
    configure_member_routes(cfg);
    configure_project_routes(cfg);
    configure_order_routes(cfg);
    configure_catalog_routes(cfg);
    configure_upload_routes(cfg);
    configure_admin_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
///
/// # Available Routes
///
/// - `POST /api/v1/auth/login` - 이메일/비밀번호 로그인
/// - `GET /api/v1/auth/kakao/login-url` - 카카오 로그인 URL 생성
/// - `POST /api/v1/auth/kakao` - 카카오 소셜 로그인
/// - `POST /api/v1/auth/refresh` - 토큰 갱신
/// - `POST /api/v1/auth/logout` - 로그아웃 (세션 무효화)
/// - `POST /api/v1/auth/guest` - 게스트 세션 발급
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::local_login)
            .service(handlers::auth::kakao_login_url)
            .service(handlers::auth::kakao_login)
            .service(handlers::auth::refresh_tokens)
            .service(handlers::auth::issue_guest_session)
            // 로그아웃만 인증 주체가 필요
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::auth::logout)
            )
    );
}

/// 회원 관련 라우트를 설정합니다
///
/// ## Public
/// - `POST /api/v1/members` - 회원 가입
/// - `GET /api/v1/members/nickname-check` - 닉네임 확인
///
/// ## Protected (`/me`)
/// - `GET /api/v1/me` - 내 정보
/// - `GET /api/v1/me/points` - 내 포인트 잔액 (게스트 가능)
/// - `GET /api/v1/me/bookmarks` - 내 북마크 목록
/// - `DELETE /api/v1/me` - 회원 탈퇴
fn configure_member_routes(cfg: &mut web::ServiceConfig) {
    // Public routes
    cfg.service(
        web::scope("/api/v1/members")
            .service(handlers::members::signup)
            .service(handlers::members::check_nickname)
    );

    // Protected routes
    cfg.service(
        web::scope("/api/v1/me")
            .wrap(AuthMiddleware::required())
            .service(handlers::members::get_my_points)
            .service(handlers::projects::list_my_bookmarks)
            .service(handlers::members::get_me)
            .service(handlers::members::deactivate_me)
    );
}

/// 프로젝트 관련 라우트를 설정합니다
///
/// 스코프 전체에 Optional 인증을 적용합니다 - 목록/상세는 비로그인도
/// 허용되고, 생성/지원/북마크 핸들러는 AuthenticatedMember 추출자가
/// 인증을 강제합니다.
fn configure_project_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/projects")
            .wrap(AuthMiddleware::optional())
            .service(handlers::projects::list_projects)
            .service(handlers::projects::create_project)
            .service(handlers::projects::apply_recruitment)
            .service(handlers::projects::accept_application)
            .service(handlers::projects::add_bookmark)
            .service(handlers::projects::remove_bookmark)
            .service(handlers::projects::get_project)
    );
}

/// 주문/결제 라우트를 설정합니다
///
/// 회원과 게스트 세션 모두 접근할 수 있습니다.
fn configure_order_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/orders")
            .wrap(AuthMiddleware::required())
            .service(handlers::orders::create_order)
            .service(handlers::orders::list_my_orders)
            .service(handlers::orders::open_payment)
            .service(handlers::orders::approve_order)
            .service(handlers::orders::cancel_order)
            .service(handlers::orders::fail_order)
            .service(handlers::orders::get_order)
    );
}

/// 카탈로그성 공개 라우트를 설정합니다 (직무, 상품, 배너, 투표)
fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/jobs")
            .service(handlers::jobs::get_job_catalog)
    );

    cfg.service(
        web::scope("/api/v1/products")
            .service(handlers::products::list_point_products)
    );

    cfg.service(
        web::scope("/api/v1/promotions")
            .service(handlers::promotions::list_banners)
    );

    cfg.service(
        web::scope("/api/v1/votes")
            .wrap(AuthMiddleware::optional())
            .service(handlers::votes::cast_vote)
            .service(handlers::votes::get_vote)
    );
}

/// 업로드 라우트를 설정합니다
fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/uploads")
            .wrap(AuthMiddleware::required_with_roles(vec!["member", "admin"]))
            .service(handlers::uploads::create_presigned_url)
    );
}

/// 관리자 전용 라우트를 설정합니다
fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(AuthMiddleware::required_with_role("admin"))
            .service(handlers::admin::list_all_orders)
            .service(handlers::admin::refund_order)
            .service(handlers::admin::create_promotion)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "moa_platform",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
