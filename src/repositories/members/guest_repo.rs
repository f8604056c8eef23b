//! 게스트 세션 리포지토리
//!
//! 게스트 세션은 토큰 해시로만 조회되며, 가입 시 회원과 연결됩니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, DateTime}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::members::Guest,
};

/// 게스트 데이터 액세스 리포지토리
#[repository(name = "guest", collection = "guests")]
pub struct GuestRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl GuestRepository {
    /// 세션 토큰 해시로 게스트 조회
    pub async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Guest>, AppError> {
        self.collection::<Guest>()
            .find_one(doc! { "token_hash": token_hash, "is_active": true })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 게스트 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.collection::<Guest>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 게스트 세션 생성
    pub async fn create(&self, mut guest: Guest) -> Result<Guest, AppError> {
        let result = self.collection::<Guest>()
            .insert_one(&guest)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        guest.id = result.inserted_id.as_object_id();
        Ok(guest)
    }

    /// 게스트를 회원과 연결합니다.
    ///
    /// 이미 다른 회원과 연결된 게스트는 ConflictError입니다.
    pub async fn link_member(&self, guest_id: &ObjectId, member_id: &ObjectId) -> Result<Guest, AppError> {
        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let linked = self.collection::<Guest>()
            .find_one_and_update(
                // 미연결 상태일 때만 연결 (이중 연동 방지)
                doc! { "_id": guest_id, "member_id": { "$exists": false } },
                doc! { "$set": { "member_id": member_id, "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        linked.ok_or_else(|| {
            AppError::ConflictError("이미 회원과 연결되었거나 존재하지 않는 게스트 세션입니다".to_string())
        })
    }

    /// 데이터베이스 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let token_index = IndexModel::builder()
            .keys(doc! { "token_hash": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("token_hash_unique".to_string())
                .build())
            .build();

        self.collection::<Guest>()
            .create_indexes([token_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
