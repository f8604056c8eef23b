//! 투표 서비스 모듈

pub mod vote_service;

pub use vote_service::VoteService;
