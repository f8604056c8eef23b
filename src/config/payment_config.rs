//! 결제 게이트웨이 설정 관리 모듈
//!
//! 외부 결제 게이트웨이(ready/approve REST API)의 가맹점 코드, 인증 키,
//! 콜백 URL을 관리합니다.

use std::env;

/// 결제 게이트웨이 설정
pub struct PaymentConfig;

impl PaymentConfig {
    /// 가맹점 코드 (cid). 기본값은 게이트웨이의 공용 테스트 코드입니다.
    pub fn cid() -> String {
        env::var("PAYMENT_CID").unwrap_or_else(|_| "TC0ONETIME".to_string())
    }

    /// 게이트웨이 API 인증 키
    pub fn secret_key() -> String {
        env::var("PAYMENT_SECRET_KEY").unwrap_or_default()
    }

    /// 게이트웨이 API 베이스 URL
    pub fn base_url() -> String {
        env::var("PAYMENT_BASE_URL")
            .unwrap_or_else(|_| "https://open-api.kakaopay.com/online/v1/payment".to_string())
    }

    /// 결제 성공 시 사용자가 리다이렉트되는 URL
    pub fn approval_url() -> String {
        env::var("PAYMENT_APPROVAL_URL")
            .unwrap_or_else(|_| "http://localhost:3000/orders/approve".to_string())
    }

    /// 결제 취소 시 리다이렉트 URL
    pub fn cancel_url() -> String {
        env::var("PAYMENT_CANCEL_URL")
            .unwrap_or_else(|_| "http://localhost:3000/orders/cancel".to_string())
    }

    /// 결제 실패 시 리다이렉트 URL
    pub fn fail_url() -> String {
        env::var("PAYMENT_FAIL_URL")
            .unwrap_or_else(|_| "http://localhost:3000/orders/fail".to_string())
    }
}
