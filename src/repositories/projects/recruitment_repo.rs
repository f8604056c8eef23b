//! # 모집 리포지토리 구현
//!
//! 모집 회차(`project_recruitments`)와 보조 컬렉션
//! (`project_recruitment_jobs`, `project_recruit_applications`)을 담당합니다.
//!
//! 좌석 카운터는 필터 조건이 달린 `find_one_and_update`로 증가시킵니다 -
//! `current_recruited < total_limit`이 만족될 때만 원자적으로 증가하므로
//! 별도 잠금 없이 정원 초과를 방지합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, DateTime}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::projects::{
        ApplicationStatus, ProjectRecruitApplication, ProjectRecruitment, ProjectRecruitmentJob,
        RecruitmentStatus,
    },
};

/// 모집 데이터 액세스 리포지토리
#[repository(name = "recruitment", collection = "project_recruitments")]
pub struct RecruitmentRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl RecruitmentRepository {
    fn jobs_collection(&self) -> mongodb::Collection<ProjectRecruitmentJob> {
        self.db.get_database().collection("project_recruitment_jobs")
    }

    fn applications_collection(&self) -> mongodb::Collection<ProjectRecruitApplication> {
        self.db.get_database().collection("project_recruit_applications")
    }

    /// ID로 모집 회차 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<ProjectRecruitment>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.collection::<ProjectRecruitment>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 프로젝트의 최신 모집 회차 조회
    pub async fn find_latest_by_project(&self, project_id: &ObjectId) -> Result<Option<ProjectRecruitment>, AppError> {
        self.collection::<ProjectRecruitment>()
            .find_one(doc! { "project_id": project_id })
            .sort(doc! { "times_project_recruit": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 모집 회차와 직무별 정원을 함께 생성
    pub async fn create_with_jobs(
        &self,
        mut recruitment: ProjectRecruitment,
        jobs: Vec<(ObjectId, i32)>,
    ) -> Result<(ProjectRecruitment, Vec<ProjectRecruitmentJob>), AppError> {
        let result = self.collection::<ProjectRecruitment>()
            .insert_one(&recruitment)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        recruitment.id = result.inserted_id.as_object_id();
        let recruitment_id = recruitment.id
            .ok_or_else(|| AppError::InternalError("모집 회차 ID가 할당되지 않았습니다".to_string()))?;

        let mut created_jobs = Vec::with_capacity(jobs.len());
        for (job_id, total_limit) in jobs {
            let mut recruitment_job = ProjectRecruitmentJob::new(recruitment_id, job_id, total_limit);
            let result = self.jobs_collection()
                .insert_one(&recruitment_job)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
            recruitment_job.id = result.inserted_id.as_object_id();
            created_jobs.push(recruitment_job);
        }

        Ok((recruitment, created_jobs))
    }

    /// 모집 회차의 직무 목록 조회
    pub async fn find_jobs(&self, recruitment_id: &ObjectId) -> Result<Vec<ProjectRecruitmentJob>, AppError> {
        let cursor = self.jobs_collection()
            .find(doc! { "project_recruitment_id": recruitment_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 모집 직무 조회
    pub async fn find_job_by_id(&self, id: &str) -> Result<Option<ProjectRecruitmentJob>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.jobs_collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 회원의 활성 지원서(IN_REVIEW/ACCEPTED) 조회
    ///
    /// 중복 지원 방지 검사에 사용됩니다.
    pub async fn find_open_application(
        &self,
        recruitment_job_id: &ObjectId,
        member_id: &ObjectId,
    ) -> Result<Option<ProjectRecruitApplication>, AppError> {
        self.applications_collection()
            .find_one(doc! {
                "project_recruitment_job_id": recruitment_job_id,
                "member_id": member_id,
                "status": { "$in": ["IN_REVIEW", "ACCEPTED"] },
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 지원서 생성
    pub async fn create_application(
        &self,
        mut application: ProjectRecruitApplication,
    ) -> Result<ProjectRecruitApplication, AppError> {
        let result = self.applications_collection()
            .insert_one(&application)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        application.id = result.inserted_id.as_object_id();
        Ok(application)
    }

    /// 지원서 상태 변경
    pub async fn update_application_status(
        &self,
        application_id: &ObjectId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<Option<ProjectRecruitApplication>, AppError> {
        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        self.applications_collection()
            .find_one_and_update(
                doc! { "_id": application_id, "status": from.as_str() },
                doc! { "$set": { "status": to.as_str(), "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 좌석이 남아 있을 때만 모집 인원 카운터를 증가시킵니다.
    ///
    /// 필터 `$expr: current_recruited < total_limit`이 가드 역할을 하므로
    /// 동시 요청에도 정원을 초과하지 않습니다.
    ///
    /// # 반환값
    /// * `Ok(Some(job))` - 증가 후 문서
    /// * `Ok(None)` - 정원이 이미 가득 참
    pub async fn increment_recruited(&self, job_id: &ObjectId) -> Result<Option<ProjectRecruitmentJob>, AppError> {
        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        self.jobs_collection()
            .find_one_and_update(
                doc! {
                    "_id": job_id,
                    "$expr": { "$lt": ["$current_recruited", "$total_limit"] },
                },
                doc! {
                    "$inc": { "current_recruited": 1 },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 모집 회차 상태 전환
    pub async fn update_status(
        &self,
        recruitment_id: &ObjectId,
        status: RecruitmentStatus,
    ) -> Result<(), AppError> {
        self.collection::<ProjectRecruitment>()
            .update_one(
                doc! { "_id": recruitment_id },
                doc! { "$set": { "status": status.as_str(), "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 데이터베이스 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let project_index = IndexModel::builder()
            .keys(doc! { "project_id": 1, "times_project_recruit": -1 })
            .options(IndexOptions::builder()
                .name("project_round".to_string())
                .build())
            .build();

        self.collection::<ProjectRecruitment>()
            .create_indexes([project_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let application_index = IndexModel::builder()
            .keys(doc! { "project_recruitment_job_id": 1, "member_id": 1 })
            .options(IndexOptions::builder()
                .name("job_member_applications".to_string())
                .build())
            .build();

        self.applications_collection()
            .create_indexes([application_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
