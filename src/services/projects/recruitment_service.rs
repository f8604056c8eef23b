//! # 모집 서비스 구현
//!
//! 프로젝트 모집 지원과 합류 확정의 비즈니스 로직입니다.
//!
//! ## 불변식 (애플리케이션 레벨 가드)
//!
//! - 모집 상태가 RECRUITING이 아니면 지원 불가
//! - 직무 정원이 가득 차면 지원/합류 불가
//! - (회원, 모집 직무)당 활성 지원서 하나
//! - 합류 확정 카운터는 필터 가드된 갱신으로 정원을 초과하지 않음
//! - 모든 직무 정원이 차면 모집 회차가 RECRUIT_COMPLETE로 전환

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::projects::{ApplicationResponse, RecruitApplicationRequest},
        entities::projects::{
            ApplicationStatus, ProjectRecruitApplication, RecruitmentStatus,
        },
        models::auth::AuthenticatedMember,
    },
    repositories::projects::{ProjectRepository, RecruitmentRepository},
};

/// 모집 비즈니스 로직 서비스
#[service(name = "recruitment")]
pub struct RecruitmentService {
    /// 모집 리포지토리 (자동 주입)
    recruitment_repo: Arc<RecruitmentRepository>,

    /// 프로젝트 리포지토리 - 관리 권한 확인 (자동 주입)
    project_repo: Arc<ProjectRepository>,
}

impl RecruitmentService {
    /// 모집 지원
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 모집 중이 아님, 정원 마감, 중복 지원
    /// * `AppError::NotFound` - 모집 회차/직무 없음
    pub async fn apply(
        &self,
        applicant: &AuthenticatedMember,
        recruitment_id: &str,
        request: RecruitApplicationRequest,
    ) -> Result<ApplicationResponse, AppError> {
        let member_id = ObjectId::parse_str(&applicant.member_id)
            .map_err(|_| AppError::InternalError("잘못된 회원 ID 클레임입니다".to_string()))?;

        let recruitment = self.recruitment_repo.find_by_id(recruitment_id).await?
            .ok_or_else(|| AppError::NotFound("모집 회차를 찾을 수 없습니다".to_string()))?;

        // 모집 중이 아니면 지원 불가
        if !recruitment.is_recruiting() {
            return Err(AppError::ConflictError("모집이 마감되었습니다".to_string()));
        }

        let job = self.recruitment_repo
            .find_job_by_id(&request.project_recruitment_job_id)
            .await?
            .ok_or_else(|| AppError::NotFound("모집 직무를 찾을 수 없습니다".to_string()))?;

        let job_id = job.id
            .ok_or_else(|| AppError::InternalError("모집 직무 ID가 없습니다".to_string()))?;

        // 다른 회차의 직무 ID로 지원하는 것을 방지
        if Some(job.project_recruitment_id) != recruitment.id {
            return Err(AppError::ValidationError(
                "해당 모집 회차의 직무가 아닙니다".to_string()
            ));
        }

        if job.is_full() {
            return Err(AppError::ConflictError("해당 직무의 모집 정원이 마감되었습니다".to_string()));
        }

        // 중복 지원 방지
        if self.recruitment_repo.find_open_application(&job_id, &member_id).await?.is_some() {
            return Err(AppError::ConflictError("이미 지원한 직무입니다".to_string()));
        }

        let application = self.recruitment_repo
            .create_application(ProjectRecruitApplication::new(job_id, member_id, request.message))
            .await?;

        log::info!(
            "모집 지원 접수: 회원 {} -> 직무 {}",
            applicant.member_id, job_id.to_hex()
        );

        Ok(ApplicationResponse {
            id: application.id_string().unwrap_or_default(),
            project_recruitment_job_id: job_id.to_hex(),
            status: application.status,
            message: "지원이 접수되었습니다".to_string(),
        })
    }

    /// 지원서 합류 확정 (프로젝트 관리자 전용)
    ///
    /// 좌석 카운터는 필터 가드된 증가이므로 동시 확정이 몰려도 정원을
    /// 초과하지 않습니다. 마지막 좌석이 채워져 모든 직무가 가득 차면
    /// 모집 회차를 RECRUIT_COMPLETE로 전환합니다.
    pub async fn accept_application(
        &self,
        manager: &AuthenticatedMember,
        recruitment_id: &str,
        application_id: &str,
    ) -> Result<ApplicationResponse, AppError> {
        let manager_id = ObjectId::parse_str(&manager.member_id)
            .map_err(|_| AppError::InternalError("잘못된 회원 ID 클레임입니다".to_string()))?;

        let recruitment = self.recruitment_repo.find_by_id(recruitment_id).await?
            .ok_or_else(|| AppError::NotFound("모집 회차를 찾을 수 없습니다".to_string()))?;

        // 프로젝트 관리 권한 확인
        let has_permission = self.project_repo
            .has_permission(&recruitment.project_id, &manager_id)
            .await?;
        if !has_permission && !manager.is_admin() {
            return Err(AppError::AuthorizationError(
                "프로젝트 관리 권한이 없습니다".to_string()
            ));
        }

        let application_oid = ObjectId::parse_str(application_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        // 좌석 확보가 먼저다 - 실패하면 지원서는 그대로 IN_REVIEW
        let application = self.recruitment_repo
            .update_application_status(
                &application_oid,
                ApplicationStatus::InReview,
                ApplicationStatus::Accepted,
            )
            .await?
            .ok_or_else(|| AppError::ConflictError(
                "검토 중 상태의 지원서가 아닙니다".to_string()
            ))?;

        let job = self.recruitment_repo
            .increment_recruited(&application.project_recruitment_job_id)
            .await?;

        let job = match job {
            Some(job) => job,
            None => {
                // 정원 초과 - 지원서 상태를 되돌린다
                let _ = self.recruitment_repo
                    .update_application_status(
                        &application_oid,
                        ApplicationStatus::Accepted,
                        ApplicationStatus::InReview,
                    )
                    .await;
                return Err(AppError::ConflictError("해당 직무의 모집 정원이 마감되었습니다".to_string()));
            }
        };

        // 모든 직무가 가득 차면 모집 완료 처리
        let recruitment_oid = recruitment.id
            .ok_or_else(|| AppError::InternalError("모집 회차 ID가 없습니다".to_string()))?;
        let jobs = self.recruitment_repo.find_jobs(&recruitment_oid).await?;
        if jobs.iter().all(|j| j.is_full()) {
            self.recruitment_repo
                .update_status(&recruitment_oid, RecruitmentStatus::RecruitComplete)
                .await?;
            log::info!("모집 완료 전환: {}", recruitment_oid.to_hex());
        }

        log::info!(
            "합류 확정: 지원서 {} (직무 {} {}/{})",
            application_id, job.job_id.to_hex(), job.current_recruited, job.total_limit
        );

        Ok(ApplicationResponse {
            id: application.id_string().unwrap_or_default(),
            project_recruitment_job_id: application.project_recruitment_job_id.to_hex(),
            status: ApplicationStatus::Accepted,
            message: "합류가 확정되었습니다".to_string(),
        })
    }
}
