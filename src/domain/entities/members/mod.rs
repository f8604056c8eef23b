//! 회원/게스트 신원 엔티티 모듈

pub mod guest;
pub mod member;

pub use guest::{Guest, GuestPoint, PointOwnerType, PointReason};
pub use member::{KakaoOAuthData, Member};
