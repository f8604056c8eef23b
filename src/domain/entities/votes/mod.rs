//! 투표 엔티티 모듈
//!
//! 프로모션 투표와 참여 기록, 답변, 리워드 지급 내역을 정의합니다.
//! (투표, 회원)당 참여 기록은 하나만 존재합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 투표 선택지
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteOption {
    /// 선택지 코드 (답변 저장 시 참조)
    pub code: String,
    /// 표시 문구
    pub label: String,
}

/// 투표 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    /// 선택지 목록 (투표에 내장)
    pub options: Vec<VoteOption>,
    /// 복수 선택 허용 여부
    pub allow_multiple: bool,
    /// 참여 리워드 포인트
    pub reward_point: i64,
    /// 진행 기간
    pub starts_at: DateTime,
    pub ends_at: DateTime,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Vote {
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 주어진 시각에 진행 중인 투표인지 확인
    pub fn is_open_at(&self, now: DateTime) -> bool {
        self.is_active && self.starts_at <= now && now < self.ends_at
    }

    /// 선택지 코드가 이 투표에 존재하는지 확인
    pub fn has_option(&self, code: &str) -> bool {
        self.options.iter().any(|o| o.code == code)
    }
}

/// 투표 참여 기록 - (투표, 회원)당 하나
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub vote_id: ObjectId,
    pub member_id: ObjectId,
    pub created_at: DateTime,
}

impl VotingRecord {
    pub fn new(vote_id: ObjectId, member_id: ObjectId) -> Self {
        Self {
            id: None,
            vote_id,
            member_id,
            created_at: DateTime::now(),
        }
    }
}

/// 선택한 답변 레코드 (참여 기록당 1개 이상)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingAnswer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub voting_record_id: ObjectId,
    /// 선택지 코드
    pub answer_code: String,
    pub created_at: DateTime,
}

impl VotingAnswer {
    pub fn new(voting_record_id: ObjectId, answer_code: String) -> Self {
        Self {
            id: None,
            voting_record_id,
            answer_code,
            created_at: DateTime::now(),
        }
    }
}

/// 투표 리워드 지급 내역
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRewardStorage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub vote_id: ObjectId,
    pub member_id: ObjectId,
    pub reward_point: i64,
    pub created_at: DateTime,
}

impl VoteRewardStorage {
    pub fn new(vote_id: ObjectId, member_id: ObjectId, reward_point: i64) -> Self {
        Self {
            id: None,
            vote_id,
            member_id,
            reward_point,
            created_at: DateTime::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vote(starts_offset_ms: i64, ends_offset_ms: i64) -> Vote {
        let now_ms = DateTime::now().timestamp_millis();
        Vote {
            id: None,
            title: "최고의 협업 툴은?".to_string(),
            options: vec![
                VoteOption { code: "A".to_string(), label: "노션".to_string() },
                VoteOption { code: "B".to_string(), label: "지라".to_string() },
            ],
            allow_multiple: false,
            reward_point: 100,
            starts_at: DateTime::from_millis(now_ms + starts_offset_ms),
            ends_at: DateTime::from_millis(now_ms + ends_offset_ms),
            is_active: true,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[test]
    fn test_vote_open_window() {
        let open = sample_vote(-1000, 60_000);
        assert!(open.is_open_at(DateTime::now()));

        let not_started = sample_vote(60_000, 120_000);
        assert!(!not_started.is_open_at(DateTime::now()));

        let ended = sample_vote(-120_000, -60_000);
        assert!(!ended.is_open_at(DateTime::now()));

        let mut inactive = sample_vote(-1000, 60_000);
        inactive.is_active = false;
        assert!(!inactive.is_open_at(DateTime::now()));
    }

    #[test]
    fn test_vote_has_option() {
        let vote = sample_vote(-1000, 60_000);
        assert!(vote.has_option("A"));
        assert!(!vote.has_option("Z"));
    }
}
