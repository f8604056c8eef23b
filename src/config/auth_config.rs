//! 인증 관련 설정 관리 모듈
//!
//! JWT 서명 키, 토큰 만료 정책, 카카오 OAuth 클라이언트 정보를 관리합니다.
//! 민감한 값은 환경 변수로만 제공되며, 프로덕션에서 기본값을 사용하면
//! 경고 로그가 남습니다.

use std::env;
use serde::{Deserialize, Serialize};
use crate::config::data_config::Environment;

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// HMAC 서명 비밀 키를 반환합니다.
    ///
    /// `JWT_SECRET` 환경 변수에서 읽으며, 프로덕션에서 개발용 기본값이
    /// 사용되는 경우 경고를 출력합니다.
    pub fn secret() -> String {
        match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                if Environment::current() == Environment::Production {
                    log::warn!("⚠️ JWT_SECRET 미설정 상태로 프로덕션에서 기본 키를 사용 중입니다");
                }
                "moa-platform-dev-secret-key".to_string()
            }
        }
    }

    /// 액세스 토큰 만료 시간(시간 단위). 기본값 1시간.
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(1)
    }

    /// 리프레시 토큰 만료 시간(일 단위). 기본값 30일.
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(30)
    }

    /// 게스트 세션 토큰 만료 시간(일 단위). 기본값 7일.
    pub fn guest_expiration_days() -> i64 {
        env::var("JWT_GUEST_EXPIRATION_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(7)
    }
}

/// 카카오 OAuth 2.0 설정
pub struct KakaoOAuthConfig;

impl KakaoOAuthConfig {
    /// 카카오 REST API 키 (client_id)
    pub fn client_id() -> String {
        env::var("KAKAO_CLIENT_ID").unwrap_or_default()
    }

    /// 카카오 client_secret (보안 강화 옵션 활성화 시)
    pub fn client_secret() -> String {
        env::var("KAKAO_CLIENT_SECRET").unwrap_or_default()
    }

    /// 인가 코드 교환 후 리다이렉트 URI
    pub fn redirect_uri() -> String {
        env::var("KAKAO_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:3000/auth/kakao/callback".to_string())
    }

    /// 인가 코드 발급 엔드포인트 (사용자 브라우저 리다이렉트 대상)
    pub fn authorize_uri() -> String {
        env::var("KAKAO_AUTHORIZE_URI")
            .unwrap_or_else(|_| "https://kauth.kakao.com/oauth/authorize".to_string())
    }

    /// 토큰 발급 엔드포인트
    pub fn token_uri() -> String {
        env::var("KAKAO_TOKEN_URI")
            .unwrap_or_else(|_| "https://kauth.kakao.com/oauth/token".to_string())
    }

    /// 사용자 프로필 조회 엔드포인트
    pub fn user_info_uri() -> String {
        env::var("KAKAO_USER_INFO_URI")
            .unwrap_or_else(|_| "https://kapi.kakao.com/v2/user/me".to_string())
    }
}

/// 인증 프로바이더
///
/// 회원이 어떤 방식으로 가입/인증했는지를 나타냅니다.
/// JWT 클레임과 회원 엔티티에 모두 포함됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 이메일/패스워드 로컬 인증
    Local,
    /// 카카오 소셜 로그인
    Kakao,
    /// 게스트 세션 (회원 가입 전 임시 신원)
    Guest,
}

impl AuthProvider {
    /// 문자열에서 AuthProvider를 생성합니다.
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "kakao" => Ok(AuthProvider::Kakao),
            "guest" => Ok(AuthProvider::Guest),
            other => Err(format!("지원하지 않는 인증 프로바이더: {}", other)),
        }
    }

    /// 직렬화에 사용되는 소문자 표현을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Kakao => "kakao",
            AuthProvider::Guest => "guest",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_round_trip() {
        assert_eq!(AuthProvider::from_str("local").unwrap(), AuthProvider::Local);
        assert_eq!(AuthProvider::from_str("KAKAO").unwrap(), AuthProvider::Kakao);
        assert_eq!(AuthProvider::from_str("guest").unwrap(), AuthProvider::Guest);
        assert!(AuthProvider::from_str("naver").is_err());

        assert_eq!(AuthProvider::Kakao.as_str(), "kakao");
    }

    #[test]
    fn test_auth_provider_serde() {
        let json = serde_json::to_string(&AuthProvider::Kakao).unwrap();
        assert_eq!(json, "\"kakao\"");

        let parsed: AuthProvider = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(parsed, AuthProvider::Local);
    }
}
