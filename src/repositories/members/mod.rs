//! 회원/게스트/포인트 리포지토리 모듈

pub mod guest_repo;
pub mod member_repo;
pub mod point_repo;

pub use guest_repo::GuestRepository;
pub use member_repo::MemberRepository;
pub use point_repo::PointRepository;
