//! # 프로젝트 서비스 구현
//!
//! 프로젝트 리스팅/상세/생성의 비즈니스 로직입니다.
//! 목록은 커서 페이지네이션으로 제공되고, 상세 조회는 조회수 카운터를
//! 증가시킵니다. 프로젝트 생성 시 소유자 관리 권한과 첫 모집 회차가
//! 함께 만들어집니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::projects::{
            CreateProjectRequest, ProjectDetailResponse, ProjectListQuery, ProjectSummaryResponse,
            RecruitmentResponse,
        },
        entities::projects::{Project, ProjectManagementPermission, ProjectRecruitment},
        models::auth::AuthenticatedMember,
        models::pagination::{normalize_page_size, Cursor, CursorPage},
    },
    repositories::{
        jobs::JobRepository,
        projects::{BookmarkRepository, ProjectRepository, RecruitmentRepository},
    },
};

/// 프로젝트 비즈니스 로직 서비스
#[service(name = "project")]
pub struct ProjectService {
    /// 프로젝트 리포지토리 (자동 주입)
    project_repo: Arc<ProjectRepository>,

    /// 모집 리포지토리 (자동 주입)
    recruitment_repo: Arc<RecruitmentRepository>,

    /// 북마크 리포지토리 (자동 주입)
    bookmark_repo: Arc<BookmarkRepository>,

    /// 직무 리포지토리 - 모집 직무 검증 (자동 주입)
    job_repo: Arc<JobRepository>,
}

impl ProjectService {
    /// 프로젝트 커서 페이지 목록 조회
    ///
    /// `size + 1` 오버페치 후 페이지를 구성합니다. 사용 가능한 만큼
    /// 정확히 `size`개가 반환되고, 컬렉션 끝에서는
    /// `has_more=false`/`next_cursor=None`입니다.
    pub async fn list(&self, query: ProjectListQuery) -> Result<CursorPage<ProjectSummaryResponse>, AppError> {
        let size = normalize_page_size(query.size);

        let cursor = match query.cursor.as_deref() {
            Some(token) => Some(Cursor::decode(token)?),
            None => None,
        };

        let category_id = match query.category_id.as_deref() {
            Some(id) => Some(ObjectId::parse_str(id)
                .map_err(|_| AppError::ValidationError("유효하지 않은 카테고리 ID입니다".to_string()))?),
            None => None,
        };

        let projects = self.project_repo
            .find_page(cursor.as_ref(), size, category_id.as_ref())
            .await?;

        let page = CursorPage::from_overfetched(projects, size, |p: &Project| p.id);

        Ok(CursorPage {
            items: page.items.into_iter().map(ProjectSummaryResponse::from).collect(),
            has_more: page.has_more,
            next_cursor: page.next_cursor,
        })
    }

    /// 프로젝트 상세 조회
    ///
    /// 조회수를 증가시키고, 최신 모집 회차와 요청 회원의 북마크 여부를
    /// 함께 반환합니다.
    pub async fn detail(
        &self,
        project_id: &str,
        viewer: Option<&AuthenticatedMember>,
    ) -> Result<ProjectDetailResponse, AppError> {
        let object_id = ObjectId::parse_str(project_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let project = self.project_repo.increment_hits(&object_id).await?
            .ok_or_else(|| AppError::NotFound("프로젝트를 찾을 수 없습니다".to_string()))?;

        // 최신 모집 회차 + 직무 정원
        let recruitment = match self.recruitment_repo.find_latest_by_project(&object_id).await? {
            Some(recruitment) => {
                let recruitment_id = recruitment.id
                    .ok_or_else(|| AppError::InternalError("모집 회차 ID가 없습니다".to_string()))?;
                let jobs = self.recruitment_repo.find_jobs(&recruitment_id).await?;
                Some(RecruitmentResponse::from_parts(recruitment, jobs))
            }
            None => None,
        };

        // 북마크 여부 (비로그인/게스트는 false)
        let is_bookmarked = match viewer {
            Some(viewer) if !viewer.is_guest() => {
                let member_id = ObjectId::parse_str(&viewer.member_id)
                    .map_err(|_| AppError::InternalError("잘못된 회원 ID 클레임입니다".to_string()))?;
                self.bookmark_repo
                    .find_pair(&object_id, &member_id)
                    .await?
                    .map(|b| !b.is_deleted)
                    .unwrap_or(false)
            }
            _ => false,
        };

        Ok(ProjectDetailResponse {
            id: project.id_string().unwrap_or_default(),
            title: project.title,
            description: project.description,
            category_id: project.category_id.to_hex(),
            member_id: project.member_id.to_hex(),
            hits: project.hits,
            recruitment,
            is_bookmarked,
            created_at: project.created_at,
            updated_at: project.updated_at,
        })
    }

    /// 프로젝트 생성
    ///
    /// # 처리 과정
    ///
    /// 1. 카테고리/직무 존재 검증
    /// 2. 프로젝트 저장
    /// 3. 소유자 관리 권한 부여
    /// 4. 모집 직무가 있으면 1회차 모집 생성 (RECRUITING)
    pub async fn create(
        &self,
        owner: &AuthenticatedMember,
        request: CreateProjectRequest,
    ) -> Result<ProjectDetailResponse, AppError> {
        let member_id = ObjectId::parse_str(&owner.member_id)
            .map_err(|_| AppError::InternalError("잘못된 회원 ID 클레임입니다".to_string()))?;

        let category_id = ObjectId::parse_str(&request.category_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 카테고리 ID입니다".to_string()))?;

        if self.project_repo.find_category(&category_id).await?.is_none() {
            return Err(AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()));
        }

        // 모집 직무 사전 검증
        let mut recruitment_jobs = Vec::with_capacity(request.recruitment_jobs.len());
        for job_request in &request.recruitment_jobs {
            let job_id = ObjectId::parse_str(&job_request.job_id)
                .map_err(|_| AppError::ValidationError("유효하지 않은 직무 ID입니다".to_string()))?;

            if self.job_repo.find_by_id(&job_id).await?.is_none() {
                return Err(AppError::NotFound("직무를 찾을 수 없습니다".to_string()));
            }

            recruitment_jobs.push((job_id, job_request.total_limit));
        }

        let project = self.project_repo
            .create(Project::new(member_id, category_id, request.title, request.description))
            .await?;

        let project_id = project.id
            .ok_or_else(|| AppError::InternalError("프로젝트 ID가 할당되지 않았습니다".to_string()))?;

        self.project_repo
            .grant_permission(ProjectManagementPermission::owner(project_id, member_id))
            .await?;

        let recruitment = if recruitment_jobs.is_empty() {
            None
        } else {
            let (recruitment, jobs) = self.recruitment_repo
                .create_with_jobs(ProjectRecruitment::new(project_id, 1), recruitment_jobs)
                .await?;
            Some(RecruitmentResponse::from_parts(recruitment, jobs))
        };

        log::info!("프로젝트 생성: {} (owner {})", project_id.to_hex(), owner.member_id);

        Ok(ProjectDetailResponse {
            id: project.id_string().unwrap_or_default(),
            title: project.title,
            description: project.description,
            category_id: project.category_id.to_hex(),
            member_id: project.member_id.to_hex(),
            hits: 0,
            recruitment,
            is_bookmarked: false,
            created_at: project.created_at,
            updated_at: project.updated_at,
        })
    }
}
