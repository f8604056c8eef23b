//! 투표 DTO 모듈

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::votes::{Vote, VoteOption};

/// 투표 참여 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CastVoteRequest {
    /// 선택한 선택지 코드 목록 (단일 선택 투표는 1개)
    #[validate(length(min = 1, message = "선택지를 하나 이상 선택해주세요"))]
    pub answer_codes: Vec<String>,
}

/// 투표 선택지 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct VoteOptionResponse {
    pub code: String,
    pub label: String,
}

impl From<VoteOption> for VoteOptionResponse {
    fn from(option: VoteOption) -> Self {
        Self {
            code: option.code,
            label: option.label,
        }
    }
}

/// 투표 상세 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct VoteDetailResponse {
    pub id: String,
    pub title: String,
    pub options: Vec<VoteOptionResponse>,
    pub allow_multiple: bool,
    pub reward_point: i64,
    pub starts_at: DateTime,
    pub ends_at: DateTime,
    /// 요청한 회원의 참여 여부 (비로그인 시 false)
    pub has_voted: bool,
}

impl VoteDetailResponse {
    pub fn from_vote(vote: Vote, has_voted: bool) -> Self {
        Self {
            id: vote.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: vote.title,
            options: vote.options.into_iter().map(Into::into).collect(),
            allow_multiple: vote.allow_multiple,
            reward_point: vote.reward_point,
            starts_at: vote.starts_at,
            ends_at: vote.ends_at,
            has_voted,
        }
    }
}

/// 투표 참여 완료 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct CastVoteResponse {
    pub vote_id: String,
    /// 지급된 리워드 포인트
    pub reward_point: i64,
    pub message: String,
}
