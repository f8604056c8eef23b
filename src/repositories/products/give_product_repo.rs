//! 지급(GiveProduct) 리포지토리
//!
//! 결제 승인 후 혜택 지급 단위 레코드와 append-only 지급 로그
//! (`give_product_logs`)를 다룹니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::products::{GiveProduct, GiveProductLog, GiveStatus},
};

/// 지급 데이터 액세스 리포지토리
#[repository(name = "giveproduct", collection = "give_products")]
pub struct GiveProductRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl GiveProductRepository {
    fn logs_collection(&self) -> mongodb::Collection<GiveProductLog> {
        self.db.get_database().collection("give_product_logs")
    }

    /// 지급 레코드 생성 (READY)
    pub async fn create(&self, mut give_product: GiveProduct) -> Result<GiveProduct, AppError> {
        let result = self.collection::<GiveProduct>()
            .insert_one(&give_product)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        give_product.id = result.inserted_id.as_object_id();
        Ok(give_product)
    }

    /// 주문 아이템의 지급 레코드 조회
    pub async fn find_by_order_item(&self, order_item_id: &ObjectId) -> Result<Option<GiveProduct>, AppError> {
        self.collection::<GiveProduct>()
            .find_one(doc! { "order_item_id": order_item_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 지급 상태 전이 + 로그 추가
    ///
    /// 현재 상태가 `from`일 때만 전이되고, 전이할 때마다 로그 한 줄을
    /// 남깁니다.
    pub async fn transition_status(
        &self,
        give_product_id: &ObjectId,
        from: GiveStatus,
        to: GiveStatus,
        note: Option<String>,
    ) -> Result<Option<GiveProduct>, AppError> {
        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let updated = self.collection::<GiveProduct>()
            .find_one_and_update(
                doc! { "_id": give_product_id, "status": from.as_str() },
                doc! { "$set": { "status": to.as_str(), "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if updated.is_some() {
            let log = GiveProductLog::new(*give_product_id, from, to, note);
            self.logs_collection()
                .insert_one(&log)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        }

        Ok(updated)
    }
}
