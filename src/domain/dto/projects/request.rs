//! 프로젝트 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 프로젝트 목록 조회 쿼리 (커서 페이지네이션)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectListQuery {
    /// 이전 응답의 next_cursor (첫 페이지면 생략)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub cursor: Option<String>,

    /// 페이지 크기 (기본 20, 최대 100)
    pub size: Option<i64>,

    /// 프로젝트 카테고리 필터 (ObjectId hex)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category_id: Option<String>,
}

/// 프로젝트 생성 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 2, max = 100, message = "제목은 2-100자 사이여야 합니다"))]
    pub title: String,

    #[validate(length(min = 10, max = 5000, message = "설명은 10-5000자 사이여야 합니다"))]
    pub description: String,

    /// 프로젝트 카테고리 (ObjectId hex)
    #[validate(length(min = 1, message = "카테고리를 선택해주세요"))]
    pub category_id: String,

    /// 모집할 직무와 정원 - 비어 있으면 모집 회차 없이 생성
    #[validate(nested)]
    pub recruitment_jobs: Vec<RecruitmentJobRequest>,
}

/// 모집 직무별 정원 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecruitmentJobRequest {
    #[validate(length(min = 1, message = "직무를 선택해주세요"))]
    pub job_id: String,

    #[validate(range(min = 1, max = 50, message = "모집 정원은 1-50 사이여야 합니다"))]
    pub total_limit: i32,
}

/// 모집 지원 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecruitApplicationRequest {
    /// 지원할 모집 직무 (ObjectId hex)
    #[validate(length(min = 1, message = "지원할 직무를 선택해주세요"))]
    pub project_recruitment_job_id: String,

    /// 지원 동기 (선택)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 1000, message = "지원 동기는 1000자 이하여야 합니다"))]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_validation() {
        let req = CreateProjectRequest {
            title: "사이드 프로젝트 팀원 모집".to_string(),
            description: "함께 포인트 커머스 백엔드를 만들 팀원을 찾습니다".to_string(),
            category_id: "507f1f77bcf86cd799439011".to_string(),
            recruitment_jobs: vec![RecruitmentJobRequest {
                job_id: "507f1f77bcf86cd799439012".to_string(),
                total_limit: 3,
            }],
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_project_rejects_zero_limit() {
        let req = CreateProjectRequest {
            title: "제목입니다".to_string(),
            description: "설명은 충분히 길게 작성합니다".to_string(),
            category_id: "507f1f77bcf86cd799439011".to_string(),
            recruitment_jobs: vec![RecruitmentJobRequest {
                job_id: "507f1f77bcf86cd799439012".to_string(),
                total_limit: 0,
            }],
        };
        assert!(req.validate().is_err());
    }
}
