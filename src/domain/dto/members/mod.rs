//! 회원/인증 DTO 모듈

pub mod request;
pub mod response;

pub use request::{
    KakaoLoginRequest, LinkGuestRequest, LocalLoginRequest, NicknameCheckQuery,
    RefreshTokenRequest, SignupRequest,
};
pub use response::{
    GuestSessionResponse, LoginResponse, MemberResponse, NicknameCheckResponse,
    PointBalanceResponse, SignupResponse,
};
