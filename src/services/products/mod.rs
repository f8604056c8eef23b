//! 상품/이행 서비스 모듈

pub mod product_service;

pub use product_service::ProductService;
