//! # 회원 리포지토리 구현
//!
//! 회원 엔티티의 데이터 액세스 계층입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.
//!
//! ## 캐싱 전략
//!
//! ### L1 Cache (Redis)
//! - **TTL**: 10분 (600초)
//! - **키 패턴**:
//!   - 개별 회원: `member:{member_id}`
//!   - 이메일 조회: `member:email:{email}`
//!
//! ### L2 Storage (MongoDB)
//! - **컬렉션명**: `members`
//! - **인덱스**: email(unique), nickname(unique), oauth provider id
//!
//! 쓰기 후에는 관련 캐시를 무효화합니다. 이메일/닉네임 유니크 제약은
//! 인덱스와 사전 중복 검사 양쪽으로 지킵니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::members::Member,
};

/// 회원 데이터 액세스 리포지토리
#[repository(name = "member", collection = "members")]
pub struct MemberRepository {
    /// MongoDB 데이터베이스 연결 (자동 주입)
    db: Arc<Database>,

    /// Redis 캐시 클라이언트 (자동 주입)
    redis: Arc<RedisClient>,
}

impl MemberRepository {
    /// 이메일 주소로 회원 조회 (캐시 우선)
    ///
    /// # 캐싱 정책
    /// - **캐시 키**: `member:email:{email}`
    /// - **TTL**: 600초
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError> {
        let cache_key = format!("member:email:{}", email);

        if let Ok(Some(cached)) = self.redis.get::<Member>(&cache_key).await {
            return Ok(Some(cached));
        }

        let member = self.collection::<Member>()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref member) = member {
            let _ = self.redis
                .set_with_expiry(&cache_key, member, 600)
                .await;
        }

        Ok(member)
    }

    /// 닉네임으로 회원 조회
    ///
    /// 닉네임 중복 검사에 사용됩니다. 조회 빈도가 낮아 캐싱하지 않습니다.
    pub async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Member>, AppError> {
        self.collection::<Member>()
            .find_one(doc! { "nickname": nickname })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 회원 조회 (캐시 우선)
    ///
    /// 가장 빈번한 조회 패턴이므로 적극적인 캐싱을 적용합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(Member))` - 회원을 찾은 경우
    /// * `Ok(None)` - 해당 ID의 회원이 없는 경우
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Member>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<Member>(&cache_key).await {
            return Ok(Some(cached));
        }

        let member = self.collection::<Member>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref member) = member {
            let _ = self.redis
                .set_with_expiry(&cache_key, member, 600)
                .await;
        }

        Ok(member)
    }

    /// 카카오 사용자 ID로 회원 조회
    ///
    /// 카카오 재로그인 시 기존 계정을 찾는 데 사용됩니다.
    pub async fn find_by_kakao_id(&self, provider_user_id: &str) -> Result<Option<Member>, AppError> {
        self.collection::<Member>()
            .find_one(doc! {
                "auth_provider": "kakao",
                "oauth_data.provider_user_id": provider_user_id,
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 회원 생성
    ///
    /// 이메일과 닉네임의 중복 여부를 사전에 검증합니다.
    ///
    /// # 비즈니스 규칙
    ///
    /// 1. 이메일 유니크성: 동일한 이메일로 두 번째 계정 생성 불가
    /// 2. 닉네임 유니크성: 동일한 닉네임으로 두 번째 계정 생성 불가
    pub async fn create(&self, mut member: Member) -> Result<Member, AppError> {
        if self.find_by_email(&member.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        if self.find_by_nickname(&member.nickname).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 닉네임입니다".to_string()));
        }

        let result = self.collection::<Member>()
            .insert_one(&member)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        member.id = result.inserted_id.as_object_id();

        let _ = self.invalidate_collection_cache(None).await;

        Ok(member)
    }

    /// 회원 정보 부분 업데이트
    ///
    /// `$set` 연산으로 지정된 필드만 변경하고 최신 문서를 반환합니다.
    /// 성공 시 개별 캐시를 무효화합니다.
    pub async fn update(&self, id: &str, update_doc: mongodb::bson::Document) -> Result<Option<Member>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let updated = self.collection::<Member>()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": update_doc },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref member) = updated {
            let _ = self.invalidate_cache(id).await;
            let _ = self.redis.del(&format!("member:email:{}", member.email)).await;
        }

        Ok(updated)
    }

    /// 회원 탈퇴 (소프트 삭제)
    ///
    /// 물리 삭제 대신 `is_active = false`로 전환합니다.
    pub async fn deactivate(&self, id: &str) -> Result<bool, AppError> {
        let updated = self.update(id, doc! {
            "is_active": false,
            "updated_at": mongodb::bson::DateTime::now(),
        }).await?;

        Ok(updated.is_some())
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행합니다.
    /// 이미 중복 데이터가 있으면 유니크 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<Member>();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let nickname_index = IndexModel::builder()
            .keys(doc! { "nickname": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("nickname_unique".to_string())
                .build())
            .build();

        let kakao_index = IndexModel::builder()
            .keys(doc! { "oauth_data.provider_user_id": 1 })
            .options(IndexOptions::builder()
                .sparse(true)
                .name("kakao_provider_id".to_string())
                .build())
            .build();

        collection
            .create_indexes([email_index, nickname_index, kakao_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
