//! 오브젝트 스토리지 서비스 모듈

pub mod presign_service;

pub use presign_service::PresignService;
