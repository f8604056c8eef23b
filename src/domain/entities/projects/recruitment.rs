//! Project Recruitment Entities
//!
//! 프로젝트의 모집 회차, 직무별 모집 정원, 지원서를 정의합니다.
//!
//! 핵심 불변식:
//! - 모집 상태가 RECRUITING이 아니면 지원할 수 없다
//! - 직무별 `current_recruited`는 `total_limit`을 초과할 수 없다
//! - (회원, 모집 직무)당 활성 지원서는 하나만 존재한다

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 모집 회차 상태
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecruitmentStatus {
    /// 모집 중 - 지원 가능
    Recruiting,
    /// 모집 완료 - 모든 직무 정원이 찼거나 수동 마감됨
    RecruitComplete,
}

impl RecruitmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecruitmentStatus::Recruiting => "RECRUITING",
            RecruitmentStatus::RecruitComplete => "RECRUIT_COMPLETE",
        }
    }
}

/// 모집 회차 엔티티
///
/// 프로젝트당 여러 회차가 존재할 수 있으며 `times_project_recruit`가
/// 회차 번호입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecruitment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub project_id: ObjectId,
    /// 모집 회차 번호 (1부터 시작)
    pub times_project_recruit: i32,
    pub status: RecruitmentStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl ProjectRecruitment {
    pub fn new(project_id: ObjectId, times_project_recruit: i32) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            project_id,
            times_project_recruit,
            status: RecruitmentStatus::Recruiting,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 지원 접수가 가능한 상태인지 확인
    pub fn is_recruiting(&self) -> bool {
        self.status == RecruitmentStatus::Recruiting
    }
}

/// 모집 회차 내 직무별 정원
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecruitmentJob {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub project_recruitment_id: ObjectId,
    pub job_id: ObjectId,
    /// 모집 정원
    pub total_limit: i32,
    /// 현재 모집된 인원 (합류 확정 기준)
    pub current_recruited: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl ProjectRecruitmentJob {
    pub fn new(project_recruitment_id: ObjectId, job_id: ObjectId, total_limit: i32) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            project_recruitment_id,
            job_id,
            total_limit,
            current_recruited: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// 잔여 좌석 존재 여부
    pub fn has_open_seat(&self) -> bool {
        self.current_recruited < self.total_limit
    }

    /// 정원이 모두 찼는지 확인
    pub fn is_full(&self) -> bool {
        self.current_recruited >= self.total_limit
    }
}

/// 지원서 상태
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// 검토 중
    InReview,
    /// 합류 확정
    Accepted,
    /// 거절됨
    Rejected,
    /// 지원자 본인 취소
    Canceled,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::InReview => "IN_REVIEW",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Canceled => "CANCELED",
        }
    }

    /// 중복 지원 검사에서 "활성"으로 취급되는 상태인지
    ///
    /// 취소/거절된 지원서는 재지원을 막지 않습니다.
    pub fn is_open(&self) -> bool {
        matches!(self, ApplicationStatus::InReview | ApplicationStatus::Accepted)
    }
}

/// 모집 지원서 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecruitApplication {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub project_recruitment_job_id: ObjectId,
    pub member_id: ObjectId,
    pub status: ApplicationStatus,
    /// 지원 동기 등 자유 기재란
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl ProjectRecruitApplication {
    pub fn new(project_recruitment_job_id: ObjectId, member_id: ObjectId, message: Option<String>) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            project_recruitment_job_id,
            member_id,
            status: ApplicationStatus::InReview,
            message,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recruitment_job_seats() {
        let mut job = ProjectRecruitmentJob::new(ObjectId::new(), ObjectId::new(), 2);
        assert!(job.has_open_seat());
        assert!(!job.is_full());

        job.current_recruited = 2;
        assert!(!job.has_open_seat());
        assert!(job.is_full());
    }

    #[test]
    fn test_application_open_states() {
        assert!(ApplicationStatus::InReview.is_open());
        assert!(ApplicationStatus::Accepted.is_open());
        assert!(!ApplicationStatus::Rejected.is_open());
        assert!(!ApplicationStatus::Canceled.is_open());
    }

    #[test]
    fn test_recruitment_status_serde() {
        let json = serde_json::to_string(&RecruitmentStatus::RecruitComplete).unwrap();
        assert_eq!(json, "\"RECRUIT_COMPLETE\"");
    }
}
