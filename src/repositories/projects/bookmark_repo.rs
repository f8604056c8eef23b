//! 북마크 리포지토리
//!
//! (회원, 프로젝트) 쌍당 하나의 레코드만 유지하며, 해제/재등록은
//! `is_deleted` 플래그 토글로 처리합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, DateTime, Document}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::projects::ProjectBookmark,
    domain::models::pagination::Cursor,
};

/// 북마크 데이터 액세스 리포지토리
#[repository(name = "bookmark", collection = "project_bookmarks")]
pub struct BookmarkRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl BookmarkRepository {
    /// (프로젝트, 회원) 쌍의 북마크 조회 (삭제된 레코드 포함)
    pub async fn find_pair(
        &self,
        project_id: &ObjectId,
        member_id: &ObjectId,
    ) -> Result<Option<ProjectBookmark>, AppError> {
        self.collection::<ProjectBookmark>()
            .find_one(doc! { "project_id": project_id, "member_id": member_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 북마크 등록 (없으면 생성, 해제됐던 레코드는 복원)
    ///
    /// 이미 활성 상태여도 같은 결과이므로 멱등합니다.
    pub async fn add(&self, project_id: &ObjectId, member_id: &ObjectId) -> Result<ProjectBookmark, AppError> {
        if let Some(existing) = self.find_pair(project_id, member_id).await? {
            if !existing.is_deleted {
                return Ok(existing);
            }

            let options = mongodb::options::FindOneAndUpdateOptions::builder()
                .return_document(mongodb::options::ReturnDocument::After)
                .build();

            let restored = self.collection::<ProjectBookmark>()
                .find_one_and_update(
                    doc! { "_id": existing.id },
                    doc! { "$set": { "is_deleted": false, "updated_at": DateTime::now() } },
                )
                .with_options(options)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;

            return restored.ok_or_else(|| {
                AppError::InternalError("북마크 복원에 실패했습니다".to_string())
            });
        }

        let mut bookmark = ProjectBookmark::new(*project_id, *member_id);
        let result = self.collection::<ProjectBookmark>()
            .insert_one(&bookmark)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        bookmark.id = result.inserted_id.as_object_id();
        Ok(bookmark)
    }

    /// 북마크 해제 (소프트 삭제, 멱등)
    pub async fn remove(&self, project_id: &ObjectId, member_id: &ObjectId) -> Result<(), AppError> {
        self.collection::<ProjectBookmark>()
            .update_one(
                doc! { "project_id": project_id, "member_id": member_id, "is_deleted": false },
                doc! { "$set": { "is_deleted": true, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 회원의 활성 북마크 커서 페이지 조회 (최신순, `size + 1` 오버페치)
    pub async fn find_page_by_member(
        &self,
        member_id: &ObjectId,
        cursor: Option<&Cursor>,
        size: i64,
    ) -> Result<Vec<ProjectBookmark>, AppError> {
        let mut filter: Document = doc! { "member_id": member_id, "is_deleted": false };

        if let Some(cursor) = cursor {
            filter.insert("_id", doc! { "$lt": cursor.last_object_id()? });
        }

        let cursor = self.collection::<ProjectBookmark>()
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

    /// 데이터베이스 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "project_id": 1, "member_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("project_member_unique".to_string())
                .build())
            .build();

        self.collection::<ProjectBookmark>()
            .create_indexes([pair_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
