//! 주문 상태 로그 리포지토리
//!
//! append-only 감사 추적 레코드만 다룹니다. 갱신/삭제 API가 없습니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::orders::{OrderItemStatusLog, OrderStatusLog},
};

/// 주문 상태 로그 데이터 액세스 리포지토리
///
/// 주 컬렉션은 `order_status_logs`, 보조 컬렉션은
/// `order_item_status_logs`입니다.
#[repository(name = "orderlog", collection = "order_status_logs")]
pub struct OrderLogRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl OrderLogRepository {
    fn item_logs_collection(&self) -> mongodb::Collection<OrderItemStatusLog> {
        self.db.get_database().collection("order_item_status_logs")
    }

    /// 주문 상태 전이 로그 추가
    pub async fn append(&self, log: OrderStatusLog) -> Result<(), AppError> {
        self.collection::<OrderStatusLog>()
            .insert_one(&log)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// 주문 아이템 상태 전이 로그 추가
    pub async fn append_item(&self, log: OrderItemStatusLog) -> Result<(), AppError> {
        self.item_logs_collection()
            .insert_one(&log)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// 주문의 전이 이력 조회 (시간순)
    pub async fn find_by_order(&self, order_id: &ObjectId) -> Result<Vec<OrderStatusLog>, AppError> {
        let cursor = self.collection::<OrderStatusLog>()
            .find(doc! { "order_id": order_id })
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
