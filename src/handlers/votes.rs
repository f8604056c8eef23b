//! Vote HTTP Handlers

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::votes::CastVoteRequest,
    domain::models::auth::{AuthenticatedMember, OptionalMember},
    services::votes::VoteService,
};

/// 투표 상세 조회 핸들러
///
/// 로그인 회원의 참여 여부가 함께 반환됩니다. 인증은 선택사항입니다.
///
/// # Endpoint
/// `GET /api/v1/votes/{vote_id}`
#[get("/{vote_id}")]
pub async fn get_vote(
    vote_id: web::Path<String>,
    viewer: OptionalMember,
) -> Result<HttpResponse, AppError> {
    let service = VoteService::instance();
    let detail = service.detail(&vote_id, viewer.0.as_ref()).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// 투표 참여 핸들러
///
/// 진행 기간 내 1회만 참여할 수 있으며, 참여 시 리워드 포인트가
/// 지급됩니다.
///
/// # Endpoint
/// `POST /api/v1/votes/{vote_id}/cast`
#[post("/{vote_id}/cast")]
pub async fn cast_vote(
    vote_id: web::Path<String>,
    voter: AuthenticatedMember,
    payload: web::Json<CastVoteRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = VoteService::instance();
    let response = service.cast(&voter, &vote_id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}
