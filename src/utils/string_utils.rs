//! # 문자열 유틸리티
//!
//! 문자열 처리와 관련된 공통 유틸리티 함수들입니다.
//! 닉네임 정책(문자 집합, 금칙어 블랙리스트) 검증도 이 모듈이 담당합니다.

use serde::Deserialize;
use crate::core::errors::AppError;

/// 닉네임 금칙어 블랙리스트
///
/// 운영진 사칭, 시스템 예약어 등 회원 닉네임으로 사용할 수 없는 단어들.
/// 포함 검사(contains)이므로 "운영자123" 같은 변형도 걸러집니다.
const NICKNAME_BLACKLIST: &[&str] = &[
    "admin",
    "administrator",
    "moderator",
    "system",
    "root",
    "운영자",
    "관리자",
    "어드민",
    "탈퇴회원",
    "알수없음",
];

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 인자
/// * `value` - 검증할 문자열
/// * `field_name` - 필드명 (에러 메시지용)
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some으로 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 문자열이 유효한지 확인 (빈 문자열이 아니고 공백만으로 구성되지 않음)
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 닉네임 정책 검증
///
/// 1. 길이: 2-20자 (유니코드 문자 기준)
/// 2. 문자 집합: 한글, 영문, 숫자, 언더스코어만 허용
/// 3. 블랙리스트: 금칙어를 포함하면 거부
///
/// # 반환값
/// * `Ok(String)` - 정리된 닉네임
/// * `Err(AppError::ValidationError)` - 정책 위반
pub fn validate_nickname_policy(nickname: &str) -> Result<String, AppError> {
    let trimmed = validate_required_string(nickname, "닉네임")?;

    let char_count = trimmed.chars().count();
    if char_count < 2 || char_count > 20 {
        return Err(AppError::ValidationError(
            "닉네임은 2-20자 사이여야 합니다".to_string()
        ));
    }

    let valid_charset = trimmed.chars().all(|c| {
        c.is_alphanumeric() || c == '_' || ('가'..='힣').contains(&c)
    });
    if !valid_charset {
        return Err(AppError::ValidationError(
            "닉네임은 한글, 영문, 숫자, 언더스코어만 사용할 수 있습니다".to_string()
        ));
    }

    if is_blacklisted_nickname(&trimmed) {
        return Err(AppError::ValidationError(
            "사용할 수 없는 닉네임입니다".to_string()
        ));
    }

    Ok(trimmed)
}

/// 닉네임이 블랙리스트 단어를 포함하는지 확인합니다.
///
/// 영문 금칙어는 대소문자 무시 비교.
pub fn is_blacklisted_nickname(nickname: &str) -> bool {
    let lowered = nickname.to_lowercase();
    NICKNAME_BLACKLIST.iter().any(|word| lowered.contains(word))
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// JSON 역직렬화 시 빈 문자열이나 공백만 있는 문자열을 자동으로 None으로
/// 변환합니다. `#[serde(deserialize_with = "deserialize_optional_string")]`
/// 속성과 함께 사용됩니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("Hello", "name").unwrap(), "Hello");
        assert_eq!(validate_required_string("  World  ", "name").unwrap(), "World");

        assert!(validate_required_string("", "name").is_err());
        assert!(validate_required_string("   ", "name").is_err());
        assert!(validate_required_string("\t\n", "name").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Hello".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_nickname_policy_length() {
        assert!(validate_nickname_policy("a").is_err());
        assert!(validate_nickname_policy("가").is_err());
        assert!(validate_nickname_policy(&"a".repeat(21)).is_err());
        assert_eq!(validate_nickname_policy("개발자홍길동").unwrap(), "개발자홍길동");
        assert_eq!(validate_nickname_policy("  rustacean  ").unwrap(), "rustacean");
    }

    #[test]
    fn test_nickname_policy_charset() {
        assert!(validate_nickname_policy("nick name").is_err());
        assert!(validate_nickname_policy("nick!").is_err());
        assert!(validate_nickname_policy("nick@home").is_err());
        assert!(validate_nickname_policy("nick_1").is_ok());
        assert!(validate_nickname_policy("한글닉42").is_ok());
    }

    #[test]
    fn test_nickname_blacklist() {
        assert!(is_blacklisted_nickname("admin"));
        assert!(is_blacklisted_nickname("Admin123"));
        assert!(is_blacklisted_nickname("운영자"));
        assert!(is_blacklisted_nickname("진짜운영자님"));
        assert!(!is_blacklisted_nickname("개발자홍길동"));

        assert!(validate_nickname_policy("관리자01").is_err());
        assert!(validate_nickname_policy("ADMINISTRATOR").is_err());
    }

    #[test]
    fn test_deserialize_optional_string() {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct TestStruct {
            #[serde(deserialize_with = "deserialize_optional_string")]
            optional_field: Option<String>,
        }

        let json = r#"{"optional_field": "  안녕하세요  "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.optional_field, Some("안녕하세요".to_string()));

        let json = r#"{"optional_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.optional_field, None);

        let json = r#"{"optional_field": null}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.optional_field, None);
    }
}
