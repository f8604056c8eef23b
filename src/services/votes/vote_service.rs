//! # 투표 서비스 구현
//!
//! 투표 참여와 리워드 지급의 비즈니스 로직입니다.
//!
//! 참여 가드: 진행 기간 내 + 미참여 회원 + 유효한 선택지.
//! 참여가 확정되면 리워드 포인트를 지급하고 지급 내역을 남깁니다.

use std::sync::Arc;
use mongodb::bson::{oid::ObjectId, DateTime};
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::votes::{CastVoteRequest, CastVoteResponse, VoteDetailResponse},
        entities::members::{GuestPoint, PointOwnerType, PointReason},
        entities::votes::{VoteRewardStorage, VotingRecord},
        models::auth::AuthenticatedMember,
    },
    repositories::members::PointRepository,
    repositories::votes::VoteRepository,
};

/// 투표 비즈니스 로직 서비스
#[service(name = "vote")]
pub struct VoteService {
    /// 투표 리포지토리 (자동 주입)
    vote_repo: Arc<VoteRepository>,

    /// 포인트 원장 리포지토리 - 리워드 지급 (자동 주입)
    point_repo: Arc<PointRepository>,
}

impl VoteService {
    /// 투표 상세 조회 (요청 회원의 참여 여부 포함)
    pub async fn detail(
        &self,
        vote_id: &str,
        viewer: Option<&AuthenticatedMember>,
    ) -> Result<VoteDetailResponse, AppError> {
        let vote = self.vote_repo.find_by_id(vote_id).await?
            .ok_or_else(|| AppError::NotFound("투표를 찾을 수 없습니다".to_string()))?;

        let has_voted = match viewer {
            Some(viewer) if !viewer.is_guest() => {
                let member_id = ObjectId::parse_str(&viewer.member_id)
                    .map_err(|_| AppError::InternalError("잘못된 회원 ID 클레임입니다".to_string()))?;
                let vote_oid = vote.id
                    .ok_or_else(|| AppError::InternalError("투표 ID가 없습니다".to_string()))?;
                self.vote_repo.has_voting_record(&vote_oid, &member_id).await?
            }
            _ => false,
        };

        Ok(VoteDetailResponse::from_vote(vote, has_voted))
    }

    /// 투표 참여
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 기간 외 참여, 중복 참여
    /// * `AppError::ValidationError` - 유효하지 않은 선택지, 복수 선택 위반
    pub async fn cast(
        &self,
        voter: &AuthenticatedMember,
        vote_id: &str,
        request: CastVoteRequest,
    ) -> Result<CastVoteResponse, AppError> {
        let member_id = ObjectId::parse_str(&voter.member_id)
            .map_err(|_| AppError::InternalError("잘못된 회원 ID 클레임입니다".to_string()))?;

        let vote = self.vote_repo.find_by_id(vote_id).await?
            .ok_or_else(|| AppError::NotFound("투표를 찾을 수 없습니다".to_string()))?;

        let vote_oid = vote.id
            .ok_or_else(|| AppError::InternalError("투표 ID가 없습니다".to_string()))?;

        if !vote.is_open_at(DateTime::now()) {
            return Err(AppError::ConflictError("진행 중인 투표가 아닙니다".to_string()));
        }

        if !vote.allow_multiple && request.answer_codes.len() > 1 {
            return Err(AppError::ValidationError("하나의 선택지만 선택할 수 있습니다".to_string()));
        }

        for code in &request.answer_codes {
            if !vote.has_option(code) {
                return Err(AppError::ValidationError(format!("유효하지 않은 선택지입니다: {}", code)));
            }
        }

        if self.vote_repo.has_voting_record(&vote_oid, &member_id).await? {
            return Err(AppError::ConflictError("이미 참여한 투표입니다".to_string()));
        }

        self.vote_repo
            .create_record_with_answers(
                VotingRecord::new(vote_oid, member_id),
                request.answer_codes,
            )
            .await?;

        // 리워드 지급 + 지급 내역
        if vote.reward_point > 0 {
            self.point_repo.insert(GuestPoint::earn(
                member_id,
                PointOwnerType::Member,
                vote.reward_point,
                PointReason::VoteReward,
                None,
            )).await?;

            self.vote_repo
                .insert_reward(VoteRewardStorage::new(vote_oid, member_id, vote.reward_point))
                .await?;
        }

        log::info!("투표 참여: 회원 {} -> 투표 {}", voter.member_id, vote_id);

        Ok(CastVoteResponse {
            vote_id: vote_id.to_string(),
            reward_point: vote.reward_point,
            message: "투표 참여가 완료되었습니다".to_string(),
        })
    }
}
