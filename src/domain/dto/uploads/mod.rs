//! 파일 업로드 DTO 모듈

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 업로드 가능 도메인 (스토리지 키 네임스페이스)
pub const ALLOWED_UPLOAD_DOMAINS: &[&str] = &["profile", "project", "promotion"];

/// pre-signed 업로드 URL 발급 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PresignedUrlRequest {
    /// 업로드 용도 도메인 (profile, project, promotion)
    #[validate(custom(function = "validate_upload_domain"))]
    pub domain: String,

    #[validate(length(min = 1, max = 255, message = "파일 이름은 1-255자 사이여야 합니다"))]
    pub file_name: String,

    /// Content-Type (image/png 등)
    #[validate(length(min = 1, message = "content_type이 필요합니다"))]
    pub content_type: String,
}

fn validate_upload_domain(domain: &str) -> Result<(), ValidationError> {
    if !ALLOWED_UPLOAD_DOMAINS.contains(&domain) {
        let mut error = ValidationError::new("invalid_upload_domain");
        error.message = Some("지원하지 않는 업로드 도메인입니다".into());
        return Err(error);
    }
    Ok(())
}

/// pre-signed 업로드 URL 발급 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct PresignedUrlResponse {
    /// PUT 요청을 보낼 pre-signed URL
    pub upload_url: String,
    /// 업로드 후 참조할 스토리지 키
    pub key: String,
    /// URL 만료 시간 (초)
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_domain_whitelist() {
        let req = PresignedUrlRequest {
            domain: "profile".to_string(),
            file_name: "avatar.png".to_string(),
            content_type: "image/png".to_string(),
        };
        assert!(req.validate().is_ok());

        let req = PresignedUrlRequest {
            domain: "etc".to_string(),
            file_name: "avatar.png".to_string(),
            content_type: "image/png".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
