//! Project Bookmark Entity
//!
//! 회원의 프로젝트 북마크. (회원, 프로젝트) 쌍당 하나의 활성 레코드만
//! 존재하며, 해제는 소프트 삭제로 처리하여 재북마크 시 복원합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 프로젝트 북마크 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectBookmark {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub project_id: ObjectId,
    pub member_id: ObjectId,
    /// 해제 여부 (소프트 삭제)
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl ProjectBookmark {
    pub fn new(project_id: ObjectId, member_id: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            project_id,
            member_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
