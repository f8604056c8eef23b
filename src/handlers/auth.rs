//! Authentication HTTP Handlers
//!
//! 인증과 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 로컬 로그인, 카카오 소셜 로그인, 토큰 갱신, 게스트 세션 발급을
//! 지원하며 JWT 토큰 기반의 상태 없는 인증을 구현합니다.
//!
//! # Auth Providers
//!
//! - **로컬 인증**: 이메일/패스워드 방식 (`POST /auth/login`)
//! - **카카오 OAuth**: 인가 코드 방식 (`POST /auth/kakao`)
//! - **게스트 세션**: 가입 전 임시 신원 (`POST /auth/guest`)
use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::members::{KakaoLoginRequest, LocalLoginRequest, LoginResponse, MemberResponse, RefreshTokenRequest},
    services::{
        auth::{KakaoAuthService, TokenService},
        members::{GuestService, MemberService},
    },
};

/// 로컬 로그인 핸들러
///
/// 이메일과 패스워드를 사용한 로그인을 처리하고 JWT 토큰 쌍을 발급합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn local_login(
    payload: web::Json<LocalLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let member_service = MemberService::instance();
    let token_service = TokenService::instance();

    let member = member_service
        .verify_password(&payload.email, &payload.password)
        .await?;

    log::info!("로컬 로그인 성공: {}", payload.email);

    let token_pair = token_service.generate_token_pair(&member).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        member: MemberResponse::from(member),
        access_token: token_pair.access_token,
        refresh_token: token_pair.refresh_token.unwrap_or_default(),
        token_type: "Bearer".to_string(),
        expires_in: token_pair.expires_in,
    }))
}

/// 카카오 로그인 URL 생성 핸들러
///
/// 카카오 인가 코드 플로우를 시작하기 위한 URL을 반환합니다.
///
/// # Endpoint
/// `GET /api/v1/auth/kakao/login-url`
#[actix_web::get("/kakao/login-url")]
pub async fn kakao_login_url() -> Result<HttpResponse, AppError> {
    let kakao_service = KakaoAuthService::instance();
    Ok(HttpResponse::Ok().json(kakao_service.login_url()))
}

/// 카카오 소셜 로그인 핸들러
///
/// 프론트엔드가 받은 인가 코드로 카카오 인증을 수행하고, 신규 사용자는
/// 자동 가입시킨 뒤 JWT 토큰 쌍을 발급합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/kakao`
#[post("/kakao")]
pub async fn kakao_login(
    payload: web::Json<KakaoLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let kakao_service = KakaoAuthService::instance();
    let token_service = TokenService::instance();

    let member = kakao_service.authenticate_with_code(&payload.code).await?;
    let token_pair = token_service.generate_token_pair(&member).await?;

    log::info!("카카오 로그인 성공: {}", member.email);

    Ok(HttpResponse::Ok().json(LoginResponse {
        member: MemberResponse::from(member),
        access_token: token_pair.access_token,
        refresh_token: token_pair.refresh_token.unwrap_or_default(),
        token_type: "Bearer".to_string(),
        expires_in: token_pair.expires_in,
    }))
}

/// 토큰 갱신 핸들러
///
/// 리프레시 토큰(쿠키 또는 요청 본문)으로 새 토큰 쌍을 발급합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh_tokens(
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let token_service = TokenService::instance();
    let member_service = MemberService::instance();

    let refresh_token = extract_refresh_token(&req, body.as_deref())?;

    // 서명 + Redis 세션 일치 검증
    let claims = token_service.verify_refresh_token(&refresh_token).await?;

    let member = member_service.find_by_id(&claims.sub).await
        .map_err(|_| AppError::InternalError("회원 조회 중 오류가 발생했습니다".to_string()))?
        .ok_or_else(|| AppError::AuthenticationError("회원을 찾을 수 없습니다".to_string()))?;

    if !member.is_active {
        log::warn!("비활성 회원의 토큰 갱신 시도: {}", claims.sub);
        return Err(AppError::AuthenticationError("계정이 비활성화되었습니다".to_string()));
    }

    let token_pair = token_service.generate_token_pair(&member).await?;

    log::info!("토큰 갱신 성공: 회원 ID {}", claims.sub);

    Ok(HttpResponse::Ok().json(json!({
        "access_token": token_pair.access_token,
        "refresh_token": token_pair.refresh_token,
        "expires_in": token_pair.expires_in,
        "token_type": "Bearer"
    })))
}

/// 로그아웃 핸들러
///
/// 회원의 리프레시 세션을 무효화합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/logout`
#[post("/logout")]
pub async fn logout(
    member: crate::domain::models::auth::AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    let token_service = TokenService::instance();
    token_service.revoke_session(&member.member_id).await?;

    log::info!("로그아웃: 주체 ID {}", member.member_id);

    Ok(HttpResponse::NoContent().finish())
}

/// 게스트 세션 발급 핸들러
///
/// 가입 전 임시 신원을 발급합니다. 평문 게스트 토큰은 이 응답에서
/// 단 한 번만 전달됩니다.
///
/// # Endpoint
/// `POST /api/v1/auth/guest`
#[post("/guest")]
pub async fn issue_guest_session() -> Result<HttpResponse, AppError> {
    let guest_service = GuestService::instance();
    let session = guest_service.issue_session().await?;

    Ok(HttpResponse::Created().json(session))
}

/// HTTP 요청에서 리프레시 토큰 추출
///
/// 1. `refresh_token` 쿠키  2. 요청 본문 순서로 찾습니다.
fn extract_refresh_token(
    req: &HttpRequest,
    body: Option<&RefreshTokenRequest>,
) -> Result<String, AppError> {
    if let Some(cookie_header) = req.headers().get("Cookie") {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie_pair in cookie_str.split(';') {
                let cookie_pair = cookie_pair.trim();
                if let Some((name, value)) = cookie_pair.split_once('=') {
                    if name.trim() == "refresh_token" {
                        let token = value.trim();
                        if !token.is_empty() {
                            return Ok(token.to_string());
                        }
                    }
                }
            }
        }
    }

    if let Some(body) = body {
        if !body.refresh_token.is_empty() {
            return Ok(body.refresh_token.clone());
        }
    }

    Err(AppError::AuthenticationError(
        "리프레시 토큰이 제공되지 않았습니다".to_string()
    ))
}
