//! JWT 토큰 관리 서비스 구현
//!
//! JSON Web Token 기반의 인증 시스템을 제공합니다.
//! 액세스/리프레시 토큰의 생성, 검증, 갱신과 Redis 세션 저장을 담당합니다.
//!
//! 리프레시 토큰은 발급 시 Redis에 `session:refresh:{member_id}` 키로
//! 저장되며, 갱신 시 저장된 값과 일치해야 합니다. 로그아웃은 이 키를
//! 삭제하는 것으로 구현됩니다 (토큰 블랙리스트 대신 세션 무효화).

use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use crate::{
    caching::redis::RedisClient,
    config::{AuthProvider, JwtConfig},
    core::errors::AppError,
    domain::entities::members::{Guest, Member},
    domain::models::token::{TokenClaims, TokenPair},
};

/// 리프레시 세션 Redis 키 프리픽스
const REFRESH_SESSION_PREFIX: &str = "session:refresh:";

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 토큰을 생성하고 검증합니다.
#[service(name = "token")]
pub struct TokenService {
    /// 리프레시 세션 저장용 Redis (자동 주입)
    redis: Arc<RedisClient>,
}

impl TokenService {
    /// 회원 액세스 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 회원 ID 없음
    pub fn generate_access_token(&self, member: &Member) -> Result<String, AppError> {
        let member_id = member.id_string().ok_or_else(|| {
            AppError::InternalError("회원 ID가 없습니다".to_string())
        })?;

        self.encode_token(
            member_id,
            member.auth_provider.clone(),
            member.roles.clone(),
            Duration::hours(JwtConfig::expiration_hours()),
        )
    }

    /// 회원 리프레시 토큰 생성
    pub fn generate_refresh_token(&self, member: &Member) -> Result<String, AppError> {
        let member_id = member.id_string().ok_or_else(|| {
            AppError::InternalError("회원 ID가 없습니다".to_string())
        })?;

        self.encode_token(
            member_id,
            member.auth_provider.clone(),
            member.roles.clone(),
            Duration::days(JwtConfig::refresh_expiration_days()),
        )
    }

    /// 게스트 세션 액세스 토큰 생성
    ///
    /// 게스트는 리프레시 없이 긴 만료의 액세스 토큰 하나만 받습니다.
    pub fn generate_guest_token(&self, guest: &Guest) -> Result<String, AppError> {
        let guest_id = guest.id_string().ok_or_else(|| {
            AppError::InternalError("게스트 ID가 없습니다".to_string())
        })?;

        self.encode_token(
            guest_id,
            AuthProvider::Guest,
            vec!["guest".to_string()],
            Duration::days(JwtConfig::guest_expiration_days()),
        )
    }

    fn encode_token(
        &self,
        sub: String,
        auth_provider: AuthProvider,
        roles: Vec<String>,
        lifetime: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + lifetime;

        let claims = TokenClaims {
            sub,
            auth_provider,
            roles,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = JwtConfig::secret();
        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시) 및 Redis 세션 저장
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_pair = token_service.generate_token_pair(&member).await?;
    /// println!("expires in {} seconds", token_pair.expires_in);
    /// ```
    pub async fn generate_token_pair(&self, member: &Member) -> Result<TokenPair, AppError> {
        let access_token = self.generate_access_token(member)?;
        let refresh_token = self.generate_refresh_token(member)?;
        let expires_in = JwtConfig::expiration_hours() * 3600;

        // 리프레시 세션 저장 - 회원당 하나의 활성 세션
        let member_id = member.id_string().unwrap_or_default();
        let session_key = format!("{}{}", REFRESH_SESSION_PREFIX, member_id);
        let ttl = (JwtConfig::refresh_expiration_days() * 24 * 3600) as usize;

        self.redis
            .set_with_expiry(&session_key, &refresh_token, ttl)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        Ok(TokenPair {
            access_token,
            refresh_token: Some(refresh_token),
            expires_in,
        })
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 토큰 만료, 잘못된 형식/서명
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                },
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
                },
                _ => AppError::InternalError(format!("토큰 검증 실패: {}", e))
            })
    }

    /// 리프레시 토큰 검증
    ///
    /// 서명/만료 검증에 더해 Redis에 저장된 활성 세션과 일치하는지
    /// 확인합니다. 로그아웃된 세션의 토큰은 서명이 유효해도 거부됩니다.
    pub async fn verify_refresh_token(&self, refresh_token: &str) -> Result<TokenClaims, AppError> {
        let claims = self.verify_token(refresh_token)
            .map_err(|_| AppError::AuthenticationError(
                "리프레시 토큰이 만료되었거나 유효하지 않습니다".to_string()
            ))?;

        let session_key = format!("{}{}", REFRESH_SESSION_PREFIX, claims.sub);
        let stored: Option<String> = self.redis
            .get(&session_key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        match stored {
            Some(stored_token) if stored_token == refresh_token => Ok(claims),
            _ => Err(AppError::AuthenticationError(
                "세션이 만료되었습니다. 다시 로그인해주세요".to_string()
            )),
        }
    }

    /// 회원의 리프레시 세션 무효화 (로그아웃)
    pub async fn revoke_session(&self, member_id: &str) -> Result<(), AppError> {
        let session_key = format!("{}{}", REFRESH_SESSION_PREFIX, member_id);
        self.redis
            .del(&session_key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    /// 액세스 토큰으로부터 주체 ID 추출
    pub fn extract_subject_id(&self, token: &str) -> Result<String, AppError> {
        let claims = self.verify_token(token)?;
        Ok(claims.sub)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을
    /// 추출합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        if auth_header.starts_with("Bearer ") {
            Ok(&auth_header[7..])
        } else {
            Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService {
            redis: Arc::new(RedisClient::default()),
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = service();
        let mut member = Member::new_local(
            "dev@moa.kr".to_string(),
            "개발자홍길동".to_string(),
            "hashed".to_string(),
        );
        member.id = Some(mongodb::bson::oid::ObjectId::new());

        let token = service.generate_access_token(&member).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, member.id_string().unwrap());
        assert_eq!(claims.auth_provider, AuthProvider::Local);
        assert_eq!(claims.roles, vec!["member".to_string()]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_access_token_requires_member_id() {
        let service = service();
        let member = Member::new_local(
            "dev@moa.kr".to_string(),
            "개발자홍길동".to_string(),
            "hashed".to_string(),
        );

        // id가 None이면 토큰을 만들 수 없다
        assert!(service.generate_access_token(&member).is_err());
    }

    #[test]
    fn test_guest_token_claims() {
        let service = service();
        let mut guest = Guest::new("hash".to_string());
        guest.id = Some(mongodb::bson::oid::ObjectId::new());

        let token = service.generate_guest_token(&guest).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.auth_provider, AuthProvider::Guest);
        assert_eq!(claims.roles, vec!["guest".to_string()]);
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = service();

        assert_eq!(
            service.extract_bearer_token("Bearer abc.def.ghi").unwrap(),
            "abc.def.ghi"
        );
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("abc.def.ghi").is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = service();
        assert!(service.verify_token("not-a-jwt").is_err());
    }
}
