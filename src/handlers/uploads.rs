//! Upload HTTP Handlers

use actix_web::{post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::uploads::PresignedUrlRequest,
    domain::models::auth::AuthenticatedMember,
    services::storage::PresignService,
};

/// pre-signed 업로드 URL 발급 핸들러
///
/// 클라이언트는 발급받은 URL로 요청과 동일한 Content-Type의 PUT 요청을
/// 보내 파일을 직접 업로드합니다.
///
/// # Endpoint
/// `POST /api/v1/uploads/presigned-url`
#[post("/presigned-url")]
pub async fn create_presigned_url(
    member: AuthenticatedMember,
    payload: web::Json<PresignedUrlRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    log::debug!("업로드 URL 요청: 주체 {} 도메인 {}", member.member_id, payload.domain);

    let service = PresignService::instance();
    let response = service.presign_upload(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}
