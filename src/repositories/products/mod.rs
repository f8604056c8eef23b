//! 상품/지급 리포지토리 모듈

pub mod give_product_repo;
pub mod product_repo;

pub use give_product_repo::GiveProductRepository;
pub use product_repo::ProductRepository;
