//! Project HTTP Handlers
//!
//! 프로젝트 리스팅/상세/생성, 모집 지원, 북마크 엔드포인트를 처리합니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/projects` | 커서 페이지 목록 |
//! | `GET` | `/projects/{id}` | 상세 (조회수 증가) |
//! | `POST` | `/projects` | 생성 (인증 필요) |
//! | `POST` | `/projects/recruitments/{rid}/applications` | 모집 지원 |
//! | `POST` | `/projects/recruitments/{rid}/applications/{aid}/accept` | 합류 확정 |
//! | `POST` | `/projects/{id}/bookmark` | 북마크 등록 |
//! | `DELETE` | `/projects/{id}/bookmark` | 북마크 해제 |

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::projects::{CreateProjectRequest, ProjectListQuery, RecruitApplicationRequest},
    domain::models::auth::{AuthenticatedMember, OptionalMember},
    services::projects::{BookmarkService, ProjectService, RecruitmentService},
};

/// 프로젝트 목록 조회 핸들러 (커서 페이지네이션)
///
/// # Endpoint
/// `GET /api/v1/projects?cursor={token}&size={n}&category_id={id}`
#[get("")]
pub async fn list_projects(
    query: web::Query<ProjectListQuery>,
) -> Result<HttpResponse, AppError> {
    let service = ProjectService::instance();
    let page = service.list(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// 프로젝트 상세 조회 핸들러
///
/// 조회수를 증가시키고, 로그인 회원의 북마크 여부를 함께 반환합니다.
/// 인증은 선택사항입니다 (Optional 미들웨어).
///
/// # Endpoint
/// `GET /api/v1/projects/{project_id}`
#[get("/{project_id}")]
pub async fn get_project(
    project_id: web::Path<String>,
    viewer: OptionalMember,
) -> Result<HttpResponse, AppError> {
    let service = ProjectService::instance();
    let detail = service.detail(&project_id, viewer.0.as_ref()).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// 프로젝트 생성 핸들러
///
/// 소유자 관리 권한과 1회차 모집이 함께 생성됩니다.
///
/// # Endpoint
/// `POST /api/v1/projects`
#[post("")]
pub async fn create_project(
    owner: AuthenticatedMember,
    payload: web::Json<CreateProjectRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = ProjectService::instance();
    let detail = service.create(&owner, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(detail))
}

/// 모집 지원 핸들러
///
/// 모집 중(RECRUITING) 회차의 정원이 남은 직무에만 지원할 수 있으며,
/// 같은 직무에 중복 지원할 수 없습니다.
///
/// # Endpoint
/// `POST /api/v1/projects/recruitments/{recruitment_id}/applications`
#[post("/recruitments/{recruitment_id}/applications")]
pub async fn apply_recruitment(
    recruitment_id: web::Path<String>,
    applicant: AuthenticatedMember,
    payload: web::Json<RecruitApplicationRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = RecruitmentService::instance();
    let response = service.apply(&applicant, &recruitment_id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 지원서 합류 확정 핸들러 (프로젝트 관리자 전용)
///
/// # Endpoint
/// `POST /api/v1/projects/recruitments/{recruitment_id}/applications/{application_id}/accept`
#[post("/recruitments/{recruitment_id}/applications/{application_id}/accept")]
pub async fn accept_application(
    path: web::Path<(String, String)>,
    manager: AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    let (recruitment_id, application_id) = path.into_inner();

    let service = RecruitmentService::instance();
    let response = service.accept_application(&manager, &recruitment_id, &application_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 북마크 등록 핸들러 (멱등)
///
/// # Endpoint
/// `POST /api/v1/projects/{project_id}/bookmark`
#[post("/{project_id}/bookmark")]
pub async fn add_bookmark(
    project_id: web::Path<String>,
    member: AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    let service = BookmarkService::instance();
    let response = service.add(&member, &project_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 북마크 해제 핸들러 (멱등)
///
/// # Endpoint
/// `DELETE /api/v1/projects/{project_id}/bookmark`
#[delete("/{project_id}/bookmark")]
pub async fn remove_bookmark(
    project_id: web::Path<String>,
    member: AuthenticatedMember,
) -> Result<HttpResponse, AppError> {
    let service = BookmarkService::instance();
    let response = service.remove(&member, &project_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 내 북마크 목록 조회 핸들러
///
/// # Endpoint
/// `GET /api/v1/me/bookmarks?cursor={token}&size={n}`
#[get("/bookmarks")]
pub async fn list_my_bookmarks(
    member: AuthenticatedMember,
    query: web::Query<crate::domain::models::pagination::PageQuery>,
) -> Result<HttpResponse, AppError> {
    let service = BookmarkService::instance();
    let page = service.list(&member, query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(page))
}
