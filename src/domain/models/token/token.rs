//! JWT 인증 토큰 구조체 및 페어링 된 세트
//!
//! RFC 7519 JWT 표준 클레임과 2개의 용도별 토큰을 페어링 한 정보를 표시합니다.
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 개인정보 보호를 위해 최소한의 정보만 포함합니다.
///
/// - `sub`: 토큰의 주체 (회원 또는 게스트 ID)
/// - `iat` / `exp`: 발급/만료 시간 (Unix timestamp)
/// - `auth_provider`: 인증 방식 (local, kakao, guest)
/// - `roles`: 역할 목록 (권한 기반 접근 제어용)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (회원/게스트 ID)
    pub sub: String,
    /// 인증 프로바이더
    pub auth_provider: AuthProvider,
    /// 역할 목록
    pub roles: Vec<String>,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// JWT 토큰 쌍 구조체
///
/// 클라이언트에게 전달되는 토큰 집합입니다.
/// OAuth 2.0 표준의 토큰 응답 형식을 따릅니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰, 게스트 세션은 None)
    pub refresh_token: Option<String>,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
