//! 프로젝트 응답 DTO

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use crate::domain::entities::projects::{
    ApplicationStatus, Project, ProjectRecruitment, ProjectRecruitmentJob, RecruitmentStatus,
};

/// 프로젝트 목록 아이템 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectSummaryResponse {
    pub id: String,
    pub title: String,
    pub category_id: String,
    pub member_id: String,
    pub hits: i64,
    pub created_at: DateTime,
}

impl From<Project> for ProjectSummaryResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: project.title,
            category_id: project.category_id.to_hex(),
            member_id: project.member_id.to_hex(),
            hits: project.hits,
            created_at: project.created_at,
        }
    }
}

/// 모집 직무 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct RecruitmentJobResponse {
    pub id: String,
    pub job_id: String,
    pub total_limit: i32,
    pub current_recruited: i32,
}

impl From<ProjectRecruitmentJob> for RecruitmentJobResponse {
    fn from(job: ProjectRecruitmentJob) -> Self {
        Self {
            id: job.id.map(|id| id.to_hex()).unwrap_or_default(),
            job_id: job.job_id.to_hex(),
            total_limit: job.total_limit,
            current_recruited: job.current_recruited,
        }
    }
}

/// 모집 회차 응답 (직무 목록 포함)
#[derive(Debug, Serialize, Deserialize)]
pub struct RecruitmentResponse {
    pub id: String,
    pub times_project_recruit: i32,
    pub status: RecruitmentStatus,
    pub jobs: Vec<RecruitmentJobResponse>,
}

impl RecruitmentResponse {
    pub fn from_parts(recruitment: ProjectRecruitment, jobs: Vec<ProjectRecruitmentJob>) -> Self {
        Self {
            id: recruitment.id.map(|id| id.to_hex()).unwrap_or_default(),
            times_project_recruit: recruitment.times_project_recruit,
            status: recruitment.status,
            jobs: jobs.into_iter().map(Into::into).collect(),
        }
    }
}

/// 프로젝트 상세 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectDetailResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub member_id: String,
    pub hits: i64,
    /// 활성 모집 회차 (없으면 None)
    pub recruitment: Option<RecruitmentResponse>,
    /// 요청한 회원의 북마크 여부 (비로그인 시 false)
    pub is_bookmarked: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 지원서 접수 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: String,
    pub project_recruitment_job_id: String,
    pub status: ApplicationStatus,
    pub message: String,
}

/// 북마크 토글 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct BookmarkResponse {
    pub project_id: String,
    pub bookmarked: bool,
}
