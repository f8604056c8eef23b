//! 직군/직무 엔티티 모듈
//!
//! 프로젝트 모집에서 참조하는 직무 분류 체계입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 직군 카테고리 (개발, 디자인, 기획 등)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCategory {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// 노출 순서 (오름차순)
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 직무 (백엔드 개발자, 프로덕트 디자이너 등)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소속 직군 카테고리
    pub category_id: ObjectId,
    pub name: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Job {
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}
