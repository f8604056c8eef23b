//! 상품 리포지토리
//!
//! 판매 상품(`products`)과 포인트 상품 상세(`point_products`)를 다룹니다.
//! 상품 목록은 변경이 드물어 캐싱합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::products::{PointProduct, Product},
};

const POINT_PRODUCTS_CACHE_KEY: &str = "products:points";

/// 상품 데이터 액세스 리포지토리
#[repository(name = "product", collection = "products")]
pub struct ProductRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl ProductRepository {
    fn point_products_collection(&self) -> mongodb::Collection<PointProduct> {
        self.db.get_database().collection("point_products")
    }

    /// ID로 활성 상품 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.collection::<Product>()
            .find_one(doc! { "_id": object_id, "is_active": true })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 활성 포인트 상품 목록 조회 (상품 + 포인트 상세)
    ///
    /// # 캐싱 정책
    /// - **캐시 키**: `products:points`
    /// - **TTL**: 300초
    pub async fn find_active_point_products(&self) -> Result<Vec<(Product, PointProduct)>, AppError> {
        if let Ok(Some(cached)) = self.redis
            .get::<Vec<(Product, PointProduct)>>(POINT_PRODUCTS_CACHE_KEY)
            .await
        {
            return Ok(cached);
        }

        let products: Vec<Product> = self.collection::<Product>()
            .find(doc! { "is_active": true, "product_type": "POINT" })
            .sort(doc! { "price": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let point_products: Vec<PointProduct> = self.point_products_collection()
            .find(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let joined: Vec<(Product, PointProduct)> = products
            .into_iter()
            .filter_map(|product| {
                let detail = point_products
                    .iter()
                    .find(|pp| Some(pp.product_id) == product.id)
                    .cloned()?;
                Some((product, detail))
            })
            .collect();

        let _ = self.redis.set_with_expiry(POINT_PRODUCTS_CACHE_KEY, &joined, 300).await;

        Ok(joined)
    }

    /// 상품 ID로 포인트 상품 상세 조회
    pub async fn find_point_product(&self, product_id: &ObjectId) -> Result<Option<PointProduct>, AppError> {
        self.point_products_collection()
            .find_one(doc! { "product_id": product_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
