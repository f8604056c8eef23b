//! 오브젝트 스토리지 설정 관리 모듈
//!
//! S3 호환 스토리지(pre-signed 업로드 URL 발급용)의 버킷, 리전, 자격 증명을
//! 관리합니다. MinIO 같은 호환 스토리지를 위해 커스텀 엔드포인트를 지원합니다.

use std::env;

/// S3 호환 오브젝트 스토리지 설정
pub struct StorageConfig;

impl StorageConfig {
    /// 업로드 대상 버킷 이름
    pub fn bucket() -> String {
        env::var("STORAGE_BUCKET").unwrap_or_else(|_| "moa-platform-uploads".to_string())
    }

    /// 리전. 기본값 `ap-northeast-2`.
    pub fn region() -> String {
        env::var("STORAGE_REGION").unwrap_or_else(|_| "ap-northeast-2".to_string())
    }

    /// 커스텀 엔드포인트 (MinIO 등 S3 호환 스토리지용)
    pub fn endpoint() -> Option<String> {
        env::var("STORAGE_ENDPOINT").ok().filter(|v| !v.is_empty())
    }

    /// 액세스 키
    pub fn access_key() -> String {
        env::var("STORAGE_ACCESS_KEY").unwrap_or_default()
    }

    /// 시크릿 키
    pub fn secret_key() -> String {
        env::var("STORAGE_SECRET_KEY").unwrap_or_default()
    }

    /// 모든 업로드 키 앞에 붙는 공통 프리픽스. 기본값 `uploads`.
    pub fn key_prefix() -> String {
        env::var("STORAGE_KEY_PREFIX").unwrap_or_else(|_| "uploads".to_string())
    }

    /// pre-signed URL 만료 시간(초). 기본값 900초(15분).
    pub fn presign_expiry_secs() -> u64 {
        env::var("STORAGE_PRESIGN_EXPIRY_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(900)
    }

    /// path-style URL 강제 여부 (MinIO 필수). 기본값 false.
    pub fn force_path_style() -> bool {
        env::var("STORAGE_FORCE_PATH_STYLE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false)
    }
}
