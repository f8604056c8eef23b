//! 프로모션 리포지토리 모듈

pub mod promotion_repo;

pub use promotion_repo::PromotionRepository;
