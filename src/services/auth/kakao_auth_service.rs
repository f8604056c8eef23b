//! # 카카오 OAuth 2.0 인증 서비스
//!
//! 카카오 소셜 로그인 기능을 제공합니다. 프론트엔드가 인가 코드 플로우를
//! 수행한 뒤 전달한 인가 코드를 받아 다음을 처리합니다:
//!
//! 1. 인가 코드 → 액세스 토큰 교환 (`kauth.kakao.com/oauth/token`)
//! 2. 액세스 토큰으로 사용자 프로필 조회 (`kapi.kakao.com/v2/user/me`)
//! 3. 카카오 사용자 ID로 기존 회원 조회, 없으면 신규 회원 자동 가입
//!
//! ## 계정 연동 정책
//!
//! - 신규 카카오 사용자: 프로필 기반으로 회원 자동 생성 (닉네임 충돌 시
//!   숫자 접미사 부여)
//! - 기존 카카오 회원: 그대로 로그인
//! - 동일 이메일의 로컬 계정 존재: ConflictError - 자동 병합하지 않고
//!   로컬 로그인을 안내합니다

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use singleton_macro::service;
use crate::{
    config::KakaoOAuthConfig,
    core::errors::AppError,
    domain::entities::members::Member,
    repositories::members::MemberRepository,
};

/// 카카오 로그인 URL 응답
#[derive(Debug, Serialize)]
pub struct KakaoLoginUrlResponse {
    pub login_url: String,
}

/// 카카오 토큰 발급 응답
#[derive(Debug, Deserialize)]
struct KakaoTokenResponse {
    access_token: String,
}

/// 카카오 사용자 프로필 응답 (필요한 필드만)
#[derive(Debug, Deserialize)]
struct KakaoUserResponse {
    id: i64,
    #[serde(default)]
    kakao_account: KakaoAccount,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoAccount {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    profile: Option<KakaoProfile>,
}

#[derive(Debug, Deserialize)]
struct KakaoProfile {
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default)]
    profile_image_url: Option<String>,
}

/// 카카오 OAuth 인증 서비스
#[service]
pub struct KakaoAuthService {
    /// 회원 리포지토리 (자동 주입)
    member_repo: Arc<MemberRepository>,
}

impl KakaoAuthService {
    /// 카카오 인가 코드 플로우를 시작하는 로그인 URL을 생성합니다.
    ///
    /// 프론트엔드는 이 URL로 사용자를 리다이렉트하고, 카카오가
    /// redirect_uri로 돌려준 인가 코드를 `POST /auth/kakao`에 전달합니다.
    pub fn login_url(&self) -> KakaoLoginUrlResponse {
        let login_url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=code",
            KakaoOAuthConfig::authorize_uri(),
            urlencoding::encode(&KakaoOAuthConfig::client_id()),
            urlencoding::encode(&KakaoOAuthConfig::redirect_uri()),
        );

        KakaoLoginUrlResponse { login_url }
    }

    /// 인가 코드로 카카오 인증을 수행하고 회원을 반환합니다.
    ///
    /// 신규 사용자는 자동으로 가입됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExternalServiceError` - 카카오 API 호출 실패
    /// * `AppError::AuthenticationError` - 인가 코드 무효
    /// * `AppError::ConflictError` - 동일 이메일의 로컬 계정 존재
    pub async fn authenticate_with_code(&self, auth_code: &str) -> Result<Member, AppError> {
        let start = std::time::Instant::now();

        let kakao_access_token = self.exchange_code(auth_code).await?;
        let kakao_user = self.fetch_user_profile(&kakao_access_token).await?;

        log::info!("카카오 프로필 조회 완료 ({}ms)", start.elapsed().as_millis());

        self.find_or_provision_member(kakao_user).await
    }

    /// 인가 코드를 카카오 액세스 토큰으로 교환합니다.
    async fn exchange_code(&self, auth_code: &str) -> Result<String, AppError> {
        let client = reqwest::Client::new();

        let params = [
            ("grant_type", "authorization_code".to_string()),
            ("client_id", KakaoOAuthConfig::client_id()),
            ("client_secret", KakaoOAuthConfig::client_secret()),
            ("redirect_uri", KakaoOAuthConfig::redirect_uri()),
            ("code", auth_code.to_string()),
        ];

        let response = client
            .post(KakaoOAuthConfig::token_uri())
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("카카오 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::warn!("카카오 토큰 교환 실패: {} - {}", status, body);
            return Err(AppError::AuthenticationError(
                "카카오 인가 코드가 유효하지 않습니다".to_string()
            ));
        }

        let token: KakaoTokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("카카오 토큰 응답 파싱 실패: {}", e)))?;

        Ok(token.access_token)
    }

    /// 카카오 액세스 토큰으로 사용자 프로필을 조회합니다.
    async fn fetch_user_profile(&self, kakao_access_token: &str) -> Result<KakaoUserResponse, AppError> {
        let client = reqwest::Client::new();

        let response = client
            .get(KakaoOAuthConfig::user_info_uri())
            .bearer_auth(kakao_access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("카카오 프로필 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(
                format!("카카오 프로필 조회 실패: {}", response.status())
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("카카오 프로필 파싱 실패: {}", e)))
    }

    /// 카카오 사용자로 기존 회원을 찾거나 신규 가입시킵니다.
    async fn find_or_provision_member(&self, kakao_user: KakaoUserResponse) -> Result<Member, AppError> {
        let provider_user_id = kakao_user.id.to_string();

        // 1. 기존 카카오 회원
        if let Some(member) = self.member_repo.find_by_kakao_id(&provider_user_id).await? {
            if !member.is_active {
                return Err(AppError::AuthenticationError("계정이 비활성화되었습니다".to_string()));
            }
            return Ok(member);
        }

        let email = kakao_user.kakao_account.email.clone().ok_or_else(|| {
            AppError::AuthenticationError(
                "카카오 계정에 이메일 제공 동의가 필요합니다".to_string()
            )
        })?;

        // 2. 동일 이메일의 로컬 계정 - 자동 병합하지 않음
        if let Some(existing) = self.member_repo.find_by_email(&email).await? {
            if existing.is_local_auth() {
                return Err(AppError::ConflictError(
                    "이미 이메일/비밀번호로 가입된 계정입니다. 로컬 로그인을 이용해주세요".to_string()
                ));
            }
        }

        // 3. 신규 가입
        let profile = kakao_user.kakao_account.profile;
        let base_nickname = profile
            .as_ref()
            .and_then(|p| p.nickname.clone())
            .unwrap_or_else(|| format!("카카오회원{}", &provider_user_id[..provider_user_id.len().min(4)]));
        let profile_image = profile.and_then(|p| p.profile_image_url);

        let nickname = self.resolve_unique_nickname(base_nickname).await?;

        let member = Member::new_kakao(email, nickname, provider_user_id, profile_image);
        let created = self.member_repo.create(member).await?;

        log::info!("카카오 신규 회원 가입: {}", created.email);
        Ok(created)
    }

    /// 닉네임 충돌 시 숫자 접미사를 붙여 유일한 닉네임을 만듭니다.
    async fn resolve_unique_nickname(&self, base: String) -> Result<String, AppError> {
        if self.member_repo.find_by_nickname(&base).await?.is_none() {
            return Ok(base);
        }

        for suffix in 1..100 {
            let candidate = format!("{}{}", base, suffix);
            if self.member_repo.find_by_nickname(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(AppError::InternalError("사용 가능한 닉네임을 생성하지 못했습니다".to_string()))
    }
}
