//! 프로모션 서비스 모듈

pub mod promotion_service;

pub use promotion_service::PromotionService;
