//! # 통합 에러 처리 시스템
//!
//! 플랫폼 백엔드 전역에서 사용하는 에러 타입과 HTTP 응답 변환을 담당합니다.
//! Spring Framework의 `@ExceptionHandler` + 글로벌 에러 핸들러 역할을
//! `thiserror`와 `actix_web::ResponseError` 조합으로 구현했습니다.
//!
//! ## 응답 형식
//!
//! 모든 에러는 동일한 JSON 본문으로 평탄화됩니다:
//!
//! ```json
//! {
//!   "message": "이미 사용 중인 닉네임입니다",
//!   "error_code": "conflict",
//!   "errors": null
//! }
//! ```
//!
//! `validator` 검증 실패는 필드별 에러 목록으로 재구성됩니다:
//!
//! ```json
//! {
//!   "message": "입력값이 유효하지 않습니다",
//!   "error_code": "validation_error",
//!   "errors": {
//!     "nickname": ["닉네임은 2-20자 사이여야 합니다"],
//!     "password": ["비밀번호는 대문자, 소문자, 숫자를 포함해야 합니다"]
//!   }
//! }
//! ```
//!
//! ## HTTP 상태 코드 매핑
//!
//! | AppError | HTTP Status |
//! |----------|-------------|
//! | `ValidationError` / `FieldErrors` | 400 Bad Request |
//! | `AuthenticationError` | 401 Unauthorized |
//! | `AuthorizationError` | 403 Forbidden |
//! | `NotFound` | 404 Not Found |
//! | `ConflictError` | 409 Conflict |
//! | 나머지 | 500 Internal Server Error |

use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// 애플리케이션 전역 에러 타입
///
/// 서비스/리포지토리 계층의 모든 공개 함수는 `Result<T, AppError>`를 반환하며,
/// 핸들러까지 `?`로 전파된 에러는 자동으로 HTTP 응답으로 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시/큐 관련 에러 (500)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// validator 파생 검증 실패 - 필드별 에러 목록 유지 (400)
    #[error("Validation failed")]
    FieldErrors(ValidationErrors),

    /// 리소스 찾을 수 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복/비즈니스 규칙 위반 (409)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 서비스(결제 게이트웨이, 카카오, S3) 에러 (502)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 기계 판독용 에러 코드 문자열을 반환합니다.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "database_error",
            AppError::RedisError(_) => "redis_error",
            AppError::ValidationError(_) | AppError::FieldErrors(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::AuthenticationError(_) => "authentication_required",
            AppError::AuthorizationError(_) => "insufficient_permissions",
            AppError::ExternalServiceError(_) => "external_service_error",
            AppError::InternalError(_) => "internal_error",
        }
    }

    /// validator의 필드 에러를 `{필드: [메시지...]}` 맵으로 평탄화합니다.
    fn field_errors_json(errors: &ValidationErrors) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            map.insert(field.to_string(), json!(messages));
        }
        serde_json::Value::Object(map)
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) | AppError::FieldErrors(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 에러를 표준 `{message, error_code, errors}` 응답 본문으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let (message, errors) = match self {
            AppError::FieldErrors(e) => (
                "입력값이 유효하지 않습니다".to_string(),
                Self::field_errors_json(e),
            ),
            other => (other.to_string(), serde_json::Value::Null),
        };

        actix_web::HttpResponse::build(self.status_code()).json(json!({
            "message": message,
            "error_code": self.error_code(),
            "errors": errors,
        }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::FieldErrors(errors)
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 컨텍스트와 함께 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use validator::Validate;

    #[test]
    fn test_status_code_mapping() {
        use actix_web::http::StatusCode;

        assert_eq!(
            AppError::ValidationError("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ConflictError("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::AuthenticationError("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::AuthorizationError("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::ExternalServiceError("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_code_strings() {
        assert_eq!(AppError::ConflictError("x".into()).error_code(), "conflict");
        assert_eq!(
            AppError::AuthenticationError("x".into()).error_code(),
            "authentication_required"
        );
        assert_eq!(
            AppError::ValidationError("x".into()).error_code(),
            "validation_error"
        );
    }

    #[test]
    fn test_field_errors_flattened() {
        #[derive(Validate)]
        struct Form {
            #[validate(length(min = 2, message = "닉네임은 2자 이상이어야 합니다"))]
            nickname: String,
        }

        let form = Form {
            nickname: "a".to_string(),
        };
        let err: AppError = form.validate().unwrap_err().into();

        let response = err.error_response();
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

        if let AppError::FieldErrors(errors) = &err {
            let flattened = AppError::field_errors_json(errors);
            let messages = flattened["nickname"].as_array().unwrap();
            assert_eq!(messages[0], "닉네임은 2자 이상이어야 합니다");
        } else {
            panic!("Expected FieldErrors");
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("추가 컨텍스트");

        assert!(app_result.is_err());
        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("추가 컨텍스트"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
