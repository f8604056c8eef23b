//! 투표 리포지토리 모듈

pub mod vote_repo;

pub use vote_repo::VoteRepository;
