//! 백그라운드 태스크 모듈

pub mod task_service;

pub use task_service::TaskService;
