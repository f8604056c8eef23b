//! 인증 도메인 모델 모듈

pub mod authenticated_member;
pub mod authentication_request;

pub use authenticated_member::{AuthenticatedMember, OptionalMember};
pub use authentication_request::{AuthMode, RequiredRole};
