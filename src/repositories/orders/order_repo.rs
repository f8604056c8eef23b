//! # 주문 리포지토리 구현
//!
//! 주문 주 컬렉션(`orders`)과 보조 컬렉션(`order_items`,
//! `order_item_refunds`, `order_item_discounts`)의 데이터 액세스를
//! 담당합니다. 상태 전이 자체는 서비스 계층이 결정하며, 리포지토리는
//! 현재 상태를 필터 조건으로 거는 갱신만 제공합니다 - 중복 콜백이
//! 들어와도 첫 번째만 문서를 바꿀 수 있습니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, DateTime, Document}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::orders::{Order, OrderItem, OrderItemDiscount, OrderItemRefund, OrderStatus},
    domain::models::pagination::Cursor,
};

/// 주문 데이터 액세스 리포지토리
#[repository(name = "order", collection = "orders")]
pub struct OrderRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl OrderRepository {
    fn items_collection(&self) -> mongodb::Collection<OrderItem> {
        self.db.get_database().collection("order_items")
    }

    fn refunds_collection(&self) -> mongodb::Collection<OrderItemRefund> {
        self.db.get_database().collection("order_item_refunds")
    }

    fn discounts_collection(&self) -> mongodb::Collection<OrderItemDiscount> {
        self.db.get_database().collection("order_item_discounts")
    }

    /// 주문과 아이템을 함께 생성합니다.
    pub async fn create_with_items(
        &self,
        mut order: Order,
        items: Vec<OrderItem>,
    ) -> Result<(Order, Vec<OrderItem>), AppError> {
        let result = self.collection::<Order>()
            .insert_one(&order)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        order.id = result.inserted_id.as_object_id();
        let order_id = order.id
            .ok_or_else(|| AppError::InternalError("주문 ID가 할당되지 않았습니다".to_string()))?;

        let mut created_items = Vec::with_capacity(items.len());
        for mut item in items {
            item.order_id = order_id;
            let result = self.items_collection()
                .insert_one(&item)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
            item.id = result.inserted_id.as_object_id();
            created_items.push(item);
        }

        Ok((order, created_items))
    }

    /// ID로 주문 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Order>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.collection::<Order>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 주문의 아이템 목록 조회
    pub async fn find_items(&self, order_id: &ObjectId) -> Result<Vec<OrderItem>, AppError> {
        let cursor = self.items_collection()
            .find(doc! { "order_id": order_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 주문 아이템 조회
    pub async fn find_item_by_id(&self, id: &str) -> Result<Option<OrderItem>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.items_collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 게이트웨이 거래 ID(tid) 저장
    pub async fn set_tid(&self, order_id: &ObjectId, tid: &str) -> Result<(), AppError> {
        self.collection::<Order>()
            .update_one(
                doc! { "_id": order_id },
                doc! { "$set": { "tid": tid, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 현재 상태가 `from`일 때만 주문 상태를 전이합니다.
    ///
    /// # 반환값
    /// * `Ok(Some(order))` - 전이된 주문
    /// * `Ok(None)` - 현재 상태가 `from`이 아님 (중복 콜백 등)
    pub async fn transition_status(
        &self,
        order_id: &ObjectId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        self.collection::<Order>()
            .find_one_and_update(
                doc! { "_id": order_id, "status": from.as_str() },
                doc! { "$set": { "status": to.as_str(), "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 주문의 모든 아이템 상태를 일괄 전이합니다.
    pub async fn transition_item_statuses(
        &self,
        order_id: &ObjectId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<u64, AppError> {
        let result = self.items_collection()
            .update_many(
                doc! { "order_id": order_id, "status": from.as_str() },
                doc! { "$set": { "status": to.as_str(), "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count)
    }

    /// 개별 아이템 상태 전이
    pub async fn transition_item_status(
        &self,
        item_id: &ObjectId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<OrderItem>, AppError> {
        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        self.items_collection()
            .find_one_and_update(
                doc! { "_id": item_id, "status": from.as_str() },
                doc! { "$set": { "status": to.as_str(), "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 구매자(회원 또는 게스트)의 주문 커서 페이지 조회
    ///
    /// 최신순, `size + 1` 오버페치. 구매자 ID는 회원/게스트 어느 쪽
    /// 컬럼에 있든 매칭됩니다.
    pub async fn find_page_by_buyer(
        &self,
        buyer_id: &ObjectId,
        cursor: Option<&Cursor>,
        size: i64,
    ) -> Result<Vec<Order>, AppError> {
        let mut filter: Document = doc! {
            "$or": [ { "member_id": buyer_id }, { "guest_id": buyer_id } ],
        };

        if let Some(cursor) = cursor {
            filter.insert("_id", doc! { "$lt": cursor.last_object_id()? });
        }

        self.find_page_with_filter(filter, size).await
    }

    /// 전체 주문 커서 페이지 조회 (관리자 전용)
    pub async fn find_page_all(
        &self,
        cursor: Option<&Cursor>,
        size: i64,
    ) -> Result<Vec<Order>, AppError> {
        let mut filter = Document::new();

        if let Some(cursor) = cursor {
            filter.insert("_id", doc! { "$lt": cursor.last_object_id()? });
        }

        self.find_page_with_filter(filter, size).await
    }

    async fn find_page_with_filter(&self, filter: Document, size: i64) -> Result<Vec<Order>, AppError> {
        let cursor = self.collection::<Order>()
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

    /// 환불 레코드 추가 (append-only)
    pub async fn insert_refund(&self, refund: OrderItemRefund) -> Result<(), AppError> {
        self.refunds_collection()
            .insert_one(&refund)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// 할인 레코드 추가 (append-only)
    pub async fn insert_discount(&self, discount: OrderItemDiscount) -> Result<(), AppError> {
        self.discounts_collection()
            .insert_one(&discount)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// 데이터베이스 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let member_index = IndexModel::builder()
            .keys(doc! { "member_id": 1, "_id": -1 })
            .options(IndexOptions::builder()
                .name("member_orders".to_string())
                .build())
            .build();

        let code_index = IndexModel::builder()
            .keys(doc! { "order_code": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("order_code_unique".to_string())
                .build())
            .build();

        self.collection::<Order>()
            .create_indexes([member_index, code_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let item_index = IndexModel::builder()
            .keys(doc! { "order_id": 1 })
            .options(IndexOptions::builder()
                .name("order_items_by_order".to_string())
                .build())
            .build();

        self.items_collection()
            .create_indexes([item_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
