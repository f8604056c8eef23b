//! # 프로젝트 리포지토리 구현
//!
//! 프로젝트 주 컬렉션(`projects`)과 보조 컬렉션(`project_categories`,
//! `project_management_permissions`)의 데이터 액세스를 담당합니다.
//!
//! 목록 조회는 커서 페이지네이션 규약을 따릅니다: `_id` 내림차순 정렬,
//! `size + 1` 오버페치 후 서비스 계층에서 페이지를 구성합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::projects::{Project, ProjectCategory, ProjectManagementPermission},
    domain::models::pagination::Cursor,
};

/// 프로젝트 데이터 액세스 리포지토리
#[repository(name = "project", collection = "projects")]
pub struct ProjectRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl ProjectRepository {
    fn categories_collection(&self) -> mongodb::Collection<ProjectCategory> {
        self.db.get_database().collection("project_categories")
    }

    fn permissions_collection(&self) -> mongodb::Collection<ProjectManagementPermission> {
        self.db.get_database().collection("project_management_permissions")
    }

    /// ID로 프로젝트 조회 (삭제된 프로젝트 제외)
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Project>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.collection::<Project>()
            .find_one(doc! { "_id": object_id, "is_deleted": false })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 프로젝트 생성
    pub async fn create(&self, mut project: Project) -> Result<Project, AppError> {
        let result = self.collection::<Project>()
            .insert_one(&project)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        project.id = result.inserted_id.as_object_id();
        Ok(project)
    }

    /// 커서 페이지 목록 조회
    ///
    /// `size + 1`개를 `_id` 내림차순으로 조회합니다. 커서가 있으면
    /// 해당 ID 미만(`$lt`)부터 조회합니다.
    pub async fn find_page(
        &self,
        cursor: Option<&Cursor>,
        size: i64,
        category_id: Option<&ObjectId>,
    ) -> Result<Vec<Project>, AppError> {
        let mut filter: Document = doc! { "is_deleted": false };

        if let Some(category_id) = category_id {
            filter.insert("category_id", category_id);
        }

        if let Some(cursor) = cursor {
            filter.insert("_id", doc! { "$lt": cursor.last_object_id()? });
        }

        let cursor = self.collection::<Project>()
            .find(filter)
            .sort(doc! { "_id": -1 })
            .limit(size + 1)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 조회수 카운터 증가 후 최신 문서 반환
    pub async fn increment_hits(&self, id: &ObjectId) -> Result<Option<Project>, AppError> {
        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        self.collection::<Project>()
            .find_one_and_update(
                doc! { "_id": id, "is_deleted": false },
                doc! { "$inc": { "hits": 1 } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 카테고리 존재/활성 확인
    pub async fn find_category(&self, id: &ObjectId) -> Result<Option<ProjectCategory>, AppError> {
        self.categories_collection()
            .find_one(doc! { "_id": id, "is_active": true })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 관리 권한 부여
    pub async fn grant_permission(&self, permission: ProjectManagementPermission) -> Result<(), AppError> {
        self.permissions_collection()
            .insert_one(&permission)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// 회원이 프로젝트 관리 권한을 가지는지 확인
    pub async fn has_permission(&self, project_id: &ObjectId, member_id: &ObjectId) -> Result<bool, AppError> {
        let found = self.permissions_collection()
            .find_one(doc! { "project_id": project_id, "member_id": member_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(found.is_some())
    }

    /// 데이터베이스 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let category_index = IndexModel::builder()
            .keys(doc! { "category_id": 1, "_id": -1 })
            .options(IndexOptions::builder()
                .name("category_listing".to_string())
                .build())
            .build();

        self.collection::<Project>()
            .create_indexes([category_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let permission_index = IndexModel::builder()
            .keys(doc! { "project_id": 1, "member_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("project_member_unique".to_string())
                .build())
            .build();

        self.permissions_collection()
            .create_indexes([permission_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
