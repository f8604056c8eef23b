//! Member Management HTTP Handlers
//!
//! 회원 관리와 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/members` | 회원 가입 | 201 Created |
//! | `GET` | `/members/nickname-check` | 닉네임 사용 가능 확인 | 200 OK |
//! | `GET` | `/me` | 내 정보 조회 | 200 OK |
//! | `GET` | `/me/points` | 내 포인트 잔액 | 200 OK |
//! | `DELETE` | `/me` | 회원 탈퇴 (소프트 삭제) | 204 No Content |

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::members::{NicknameCheckQuery, SignupRequest},
    domain::models::auth::AuthenticatedMember,
    services::members::{GuestService, MemberService},
};

/// 회원 가입 핸들러
///
/// # Endpoint
///
/// `POST /api/v1/members`
///
/// # 요청 본문
///
/// ```json
/// {
///   "email": "dev@moa.kr",
///   "nickname": "개발자홍길동",
///   "password": "SecurePass123",
///   "password_confirm": "SecurePass123",
///   "guest_token": "optional-guest-session-token"
/// }
/// ```
///
/// # 비즈니스 규칙
///
/// - 이메일/닉네임은 시스템 전체에서 고유해야 함
/// - 닉네임은 금칙어 블랙리스트 검사를 통과해야 함
/// - 비밀번호는 bcrypt로 해시되어 저장됨
/// - 게스트 토큰이 있으면 게스트 세션과 포인트가 승계됨
#[post("")]
pub async fn signup(
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = MemberService::instance();
    let response = service.signup(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 닉네임 사용 가능 여부 확인 핸들러
///
/// 가입 폼에서 실시간 중복 확인에 사용됩니다.
///
/// # Endpoint
/// `GET /api/v1/members/nickname-check?nickname={nickname}`
#[get("/nickname-check")]
pub async fn check_nickname(
    query: web::Query<NicknameCheckQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let service = MemberService::instance();
    let response = service.check_nickname(&query.nickname).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 내 정보 조회 핸들러
///
/// # Endpoint
/// `GET /api/v1/me`
#[get("")]
pub async fn get_me(
    member: AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    let service = MemberService::instance();
    let response = service.get_by_id(&member.member_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 내 포인트 잔액 조회 핸들러
///
/// 회원과 게스트 모두 사용할 수 있습니다.
///
/// # Endpoint
/// `GET /api/v1/me/points`
#[get("/points")]
pub async fn get_my_points(
    member: AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    let service = GuestService::instance();
    let response = service.point_balance(&member.member_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 회원 탈퇴 핸들러
///
/// 물리 삭제가 아닌 소프트 삭제(`is_active = false`)입니다.
///
/// # Endpoint
/// `DELETE /api/v1/me`
#[delete("")]
pub async fn deactivate_me(
    member: AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    let service = MemberService::instance();
    service.deactivate(&member.member_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
