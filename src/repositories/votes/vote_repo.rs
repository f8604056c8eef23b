//! 투표 리포지토리
//!
//! 투표(`votes`)와 보조 컬렉션(`voting_records`, `voting_answers`,
//! `vote_reward_storages`)을 다룹니다. (투표, 회원) 참여 유니크 제약은
//! 인덱스와 사전 검사 양쪽으로 지킵니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::votes::{Vote, VoteRewardStorage, VotingAnswer, VotingRecord},
};

/// 투표 데이터 액세스 리포지토리
#[repository(name = "vote", collection = "votes")]
pub struct VoteRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl VoteRepository {
    fn records_collection(&self) -> mongodb::Collection<VotingRecord> {
        self.db.get_database().collection("voting_records")
    }

    fn answers_collection(&self) -> mongodb::Collection<VotingAnswer> {
        self.db.get_database().collection("voting_answers")
    }

    fn rewards_collection(&self) -> mongodb::Collection<VoteRewardStorage> {
        self.db.get_database().collection("vote_reward_storages")
    }

    /// ID로 투표 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Vote>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.collection::<Vote>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 회원의 참여 기록 존재 여부
    pub async fn has_voting_record(&self, vote_id: &ObjectId, member_id: &ObjectId) -> Result<bool, AppError> {
        let found = self.records_collection()
            .find_one(doc! { "vote_id": vote_id, "member_id": member_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(found.is_some())
    }

    /// 참여 기록과 답변들을 함께 생성합니다.
    pub async fn create_record_with_answers(
        &self,
        mut record: VotingRecord,
        answer_codes: Vec<String>,
    ) -> Result<VotingRecord, AppError> {
        let result = self.records_collection()
            .insert_one(&record)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        record.id = result.inserted_id.as_object_id();
        let record_id = record.id
            .ok_or_else(|| AppError::InternalError("참여 기록 ID가 할당되지 않았습니다".to_string()))?;

        for code in answer_codes {
            let answer = VotingAnswer::new(record_id, code);
            self.answers_collection()
                .insert_one(&answer)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        }

        Ok(record)
    }

    /// 리워드 지급 내역 추가
    pub async fn insert_reward(&self, reward: VoteRewardStorage) -> Result<(), AppError> {
        self.rewards_collection()
            .insert_one(&reward)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// 데이터베이스 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let record_index = IndexModel::builder()
            .keys(doc! { "vote_id": 1, "member_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("vote_member_unique".to_string())
                .build())
            .build();

        self.records_collection()
            .create_indexes([record_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
