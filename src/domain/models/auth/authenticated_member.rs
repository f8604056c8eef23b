//! 인증된 요청 주체 모델과 actix 추출자

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

/// JWT 토큰에서 추출된 요청 주체 정보
///
/// 회원 토큰과 게스트 토큰 모두 이 구조체로 표현됩니다.
/// 게스트는 `auth_provider == Guest`이고 `roles == ["guest"]`입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedMember {
    /// 회원 또는 게스트 고유 ID (ObjectId hex)
    pub member_id: String,

    /// 인증 프로바이더
    pub auth_provider: AuthProvider,

    /// 역할 목록
    pub roles: Vec<String>,
}

impl AuthenticatedMember {
    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(&role.to_string())
    }

    /// 여러 역할 중 하나라도 보유하고 있는지 확인
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|&role| self.has_role(role))
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }

    /// 게스트 세션 주체인지 확인
    pub fn is_guest(&self) -> bool {
        matches!(self.auth_provider, AuthProvider::Guest)
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 인증 미들웨어가 Request Extensions에 저장한 주체 정보를 꺼냅니다.
impl FromRequest for AuthenticatedMember {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedMember>() {
            Some(member) => ready(Ok(member.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}

/// 선택적 인증 주체 추출자
///
/// Optional 모드 라우트에서 비로그인 요청도 허용할 때 사용합니다.
#[derive(Debug, Clone)]
pub struct OptionalMember(pub Option<AuthenticatedMember>);

impl FromRequest for OptionalMember {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let member = req.extensions().get::<AuthenticatedMember>().cloned();
        ready(Ok(OptionalMember(member)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        let member = AuthenticatedMember {
            member_id: "test_id".to_string(),
            auth_provider: AuthProvider::Local,
            roles: vec!["member".to_string(), "admin".to_string()],
        };

        assert!(member.has_role("admin"));
        assert!(member.has_role("member"));
        assert!(!member.has_role("moderator"));
        assert!(member.is_admin());
        assert!(!member.is_guest());
    }

    #[test]
    fn test_has_any_role() {
        let member = AuthenticatedMember {
            member_id: "test_id".to_string(),
            auth_provider: AuthProvider::Kakao,
            roles: vec!["member".to_string()],
        };

        assert!(member.has_any_role(&["admin", "member"]));
        assert!(!member.has_any_role(&["admin", "moderator"]));
        assert!(!member.is_admin());
    }

    #[test]
    fn test_guest_subject() {
        let guest = AuthenticatedMember {
            member_id: "guest_id".to_string(),
            auth_provider: AuthProvider::Guest,
            roles: vec!["guest".to_string()],
        };

        assert!(guest.is_guest());
        assert!(!guest.is_admin());
    }
}
