//! # Pre-signed 업로드 URL 서비스
//!
//! S3 호환 오브젝트 스토리지에 대한 pre-signed PUT URL을 발급합니다.
//! 파일 본문은 서버를 거치지 않고 클라이언트가 스토리지로 직접
//! 업로드합니다.
//!
//! 스토리지 키 규약: `{prefix}/{domain}/{uuid}/{file_name}` -
//! UUID 세그먼트가 파일명 충돌과 키 추측을 모두 방지합니다.

use std::time::Duration;
use aws_sdk_s3::{
    config::{Builder, Credentials, Region},
    presigning::PresigningConfig,
    Client,
};
use singleton_macro::service;
use uuid::Uuid;
use crate::{
    config::StorageConfig,
    core::errors::AppError,
    domain::dto::uploads::{PresignedUrlRequest, PresignedUrlResponse},
};

/// pre-signed URL 발급 서비스
#[service]
pub struct PresignService {
    // 외부 의존성 없음 - 설정은 StorageConfig에서 읽는다
}

impl PresignService {
    /// 설정 기반 S3 클라이언트를 구성합니다.
    ///
    /// MinIO 등 호환 스토리지를 위해 커스텀 엔드포인트와 path-style을
    /// 지원합니다.
    fn build_client() -> Client {
        let credentials = Credentials::new(
            StorageConfig::access_key(),
            StorageConfig::secret_key(),
            None,
            None,
            "static",
        );

        let mut builder = Builder::new()
            .region(Region::new(StorageConfig::region()))
            .force_path_style(StorageConfig::force_path_style())
            .credentials_provider(credentials);

        if let Some(endpoint) = StorageConfig::endpoint() {
            builder = builder.endpoint_url(endpoint);
        }

        Client::from_conf(builder.build())
    }

    /// 파일명에서 경로 구분자/공백을 제거합니다.
    fn sanitize_file_name(file_name: &str) -> String {
        file_name
            .chars()
            .map(|c| match c {
                '/' | '\\' | ' ' => '_',
                other => other,
            })
            .collect()
    }

    /// 스토리지 키를 구성합니다: `{prefix}/{domain}/{uuid}/{file_name}`
    fn build_key(prefix: &str, domain: &str, upload_id: &Uuid, file_name: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            prefix,
            domain,
            upload_id.simple(),
            Self::sanitize_file_name(file_name)
        )
    }

    /// pre-signed PUT URL 발급
    ///
    /// Content-Type은 서명에 포함되므로 클라이언트는 요청과 동일한
    /// 타입으로 업로드해야 합니다.
    pub async fn presign_upload(&self, request: PresignedUrlRequest) -> Result<PresignedUrlResponse, AppError> {
        let expires_in = StorageConfig::presign_expiry_secs();
        let key = Self::build_key(
            &StorageConfig::key_prefix(),
            &request.domain,
            &Uuid::new_v4(),
            &request.file_name,
        );

        let presigning_config = PresigningConfig::expires_in(Duration::from_secs(expires_in))
            .map_err(|e| AppError::InternalError(format!("presign 설정 오류: {}", e)))?;

        let client = Self::build_client();
        let presigned = client
            .put_object()
            .bucket(StorageConfig::bucket())
            .key(&key)
            .content_type(&request.content_type)
            .presigned(presigning_config)
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("pre-signed URL 발급 실패: {}", e)))?;

        log::info!("pre-signed URL 발급: {} ({}초)", key, expires_in);

        Ok(PresignedUrlResponse {
            upload_url: presigned.uri().to_string(),
            key,
            expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_key_layout() {
        let upload_id = Uuid::new_v4();
        let key = PresignService::build_key("uploads", "profile", &upload_id, "avatar.png");

        let parts: Vec<&str> = key.split('/').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "uploads");
        assert_eq!(parts[1], "profile");
        assert_eq!(parts[2], upload_id.simple().to_string());
        assert_eq!(parts[3], "avatar.png");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(
            PresignService::sanitize_file_name("my photo.png"),
            "my_photo.png"
        );
        assert_eq!(
            PresignService::sanitize_file_name("../etc/passwd"),
            ".._etc_passwd"
        );
        assert_eq!(
            PresignService::sanitize_file_name("한글파일명.jpg"),
            "한글파일명.jpg"
        );
    }
}
