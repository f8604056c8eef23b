//! 회원/게스트 서비스 모듈

pub mod guest_service;
pub mod member_service;

pub use guest_service::GuestService;
pub use member_service::MemberService;
