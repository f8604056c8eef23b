//! # 회원/인증 요청 DTO
//!
//! 회원 가입, 로그인, 토큰 갱신을 위한 HTTP 요청 데이터 구조를 정의합니다.
//! Spring Boot의 `@Valid @RequestBody` 패턴에 해당하며, 필드 형식 검증은
//! `validator` 파생으로, 중복/블랙리스트 같은 비즈니스 규칙은 서비스
//! 계층에서 검증합니다.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::utils::string_utils::is_blacklisted_nickname;

/// 회원 가입 요청 DTO
///
/// # JSON 예제
///
/// ```json
/// {
///   "email": "dev@moa.kr",
///   "nickname": "개발자홍길동",
///   "password": "SecurePass123",
///   "password_confirm": "SecurePass123"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct SignupRequest {
    /// 회원 이메일 주소 - 시스템 내 유일성은 서비스 계층에서 검증
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 닉네임 - 한글/영문/숫자/언더스코어, 금칙어 불가
    #[validate(length(min = 2, max = 20, message = "닉네임은 2-20자 사이여야 합니다"))]
    #[validate(custom(function = "validate_nickname"))]
    pub nickname: String,

    /// 비밀번호 - 대문자/소문자/숫자 필수 포함
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    /// 비밀번호 확인
    pub password_confirm: String,

    /// 가입 전 발급받은 게스트 세션 토큰 (있으면 가입 시 연동)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_token: Option<String>,
}

/// 로컬 로그인 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocalLoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 카카오 소셜 로그인 요청 DTO
///
/// 프론트엔드가 카카오 인가 코드 플로우를 마치고 받은 인가 코드를
/// 전달합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct KakaoLoginRequest {
    #[validate(length(min = 1, message = "인가 코드가 필요합니다"))]
    pub code: String,
}

/// 토큰 갱신 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// 닉네임 사용 가능 여부 확인 쿼리
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NicknameCheckQuery {
    #[validate(length(min = 1, message = "닉네임을 입력해주세요"))]
    pub nickname: String,
}

/// 게스트 세션을 회원과 연동하는 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LinkGuestRequest {
    #[validate(length(min = 1, message = "게스트 토큰이 필요합니다"))]
    pub guest_token: String,
}

/// 비밀번호 강도 검증: 대문자, 소문자, 숫자를 모두 포함해야 합니다.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_numeric());

    if !(has_upper && has_lower && has_digit) {
        let mut error = ValidationError::new("weak_password");
        error.message = Some("비밀번호는 대문자, 소문자, 숫자를 포함해야 합니다".into());
        return Err(error);
    }
    Ok(())
}

/// 닉네임 문자 집합 + 금칙어 검증
fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    let valid_charset = nickname.chars().all(|c| {
        c.is_alphanumeric() || c == '_' || ('가'..='힣').contains(&c)
    });
    if !valid_charset {
        let mut error = ValidationError::new("invalid_nickname_charset");
        error.message = Some("닉네임은 한글, 영문, 숫자, 언더스코어만 사용할 수 있습니다".into());
        return Err(error);
    }

    if is_blacklisted_nickname(nickname) {
        let mut error = ValidationError::new("blacklisted_nickname");
        error.message = Some("사용할 수 없는 닉네임입니다".into());
        return Err(error);
    }

    Ok(())
}

/// 비밀번호와 비밀번호 확인이 일치하는지 검증
fn validate_passwords_match(request: &SignupRequest) -> Result<(), ValidationError> {
    if request.password != request.password_confirm {
        let mut error = ValidationError::new("passwords_mismatch");
        error.message = Some("비밀번호가 일치하지 않습니다".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupRequest {
        SignupRequest {
            email: "dev@moa.kr".to_string(),
            nickname: "개발자홍길동".to_string(),
            password: "SecurePass123".to_string(),
            password_confirm: "SecurePass123".to_string(),
            guest_token: None,
        }
    }

    #[test]
    fn test_valid_signup_passes() {
        assert!(valid_signup().validate().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut req = valid_signup();
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_weak_password_rejected() {
        let mut req = valid_signup();
        req.password = "alllowercase1".to_string();
        req.password_confirm = req.password.clone();
        assert!(req.validate().is_err());

        req.password = "NoDigitsHere".to_string();
        req.password_confirm = req.password.clone();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_password_mismatch_rejected() {
        let mut req = valid_signup();
        req.password_confirm = "Different123".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_blacklisted_nickname_rejected() {
        let mut req = valid_signup();
        req.nickname = "운영자입니다".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_nickname_charset_rejected() {
        let mut req = valid_signup();
        req.nickname = "nick name!".to_string();
        assert!(req.validate().is_err());
    }
}
