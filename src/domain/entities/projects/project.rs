//! Project Entity Implementation
//!
//! 협업 프로젝트 리스팅과 카테고리를 정의합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 프로젝트 카테고리 (사이드 프로젝트, 스터디, 창업 등)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCategory {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 프로젝트 엔티티
///
/// 협업 리스팅의 주 레코드입니다. 삭제는 `is_deleted` 소프트 삭제로
/// 처리하며, 상세 조회마다 `hits` 카운터가 증가합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 프로젝트 소유 회원
    pub member_id: ObjectId,
    /// 프로젝트 카테고리
    pub category_id: ObjectId,
    pub title: String,
    pub description: String,
    /// 조회수
    pub hits: i64,
    /// 소프트 삭제 플래그
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Project {
    pub fn new(member_id: ObjectId, category_id: ObjectId, title: String, description: String) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            member_id,
            category_id,
            title,
            description,
            hits: 0,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

/// 프로젝트 관리 권한 종류
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ManagementPermission {
    /// 소유자 - 모든 관리 작업 가능
    Owner,
    /// 매니저 - 모집/지원 관리 가능
    Manager,
}

/// 프로젝트 관리 권한 레코드
///
/// (프로젝트, 회원) 쌍마다 하나씩 존재하며 프로젝트 생성 시
/// 소유자 권한이 자동 부여됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManagementPermission {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub project_id: ObjectId,
    pub member_id: ObjectId,
    pub permission: ManagementPermission,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl ProjectManagementPermission {
    pub fn owner(project_id: ObjectId, member_id: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            project_id,
            member_id,
            permission: ManagementPermission::Owner,
            created_at: now,
            updated_at: now,
        }
    }
}
