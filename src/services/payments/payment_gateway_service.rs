//! # 결제 게이트웨이 서비스 구현
//!
//! 외부 결제 게이트웨이의 ready/approve REST API를 호출하는 클라이언트입니다.
//!
//! ## 결제 플로우
//!
//! ```text
//! 1. POST {base}/ready   - 결제 세션 오픈, tid와 결제 페이지 URL 수신
//! 2. 사용자가 결제 페이지에서 결제 완료 → approval_url?pg_token=... 리다이렉트
//! 3. POST {base}/approve - pg_token으로 결제 승인 확정
//! ```
//!
//! 게이트웨이 인증은 `SECRET_KEY {key}` Authorization 헤더를 사용합니다.
//! 재시도/백오프는 없습니다 - 호출 실패는 그대로 에러로 전파되고 주문은
//! READY 상태로 남습니다.

use serde::{Deserialize, Serialize};
use serde_json::json;
use singleton_macro::service;
use crate::{
    config::PaymentConfig,
    core::errors::AppError,
};

/// 게이트웨이 ready 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayReadyResponse {
    /// 게이트웨이 거래 ID
    pub tid: String,
    /// PC 웹 결제 페이지 URL
    pub next_redirect_pc_url: String,
    /// 모바일 웹 결제 페이지 URL
    pub next_redirect_mobile_url: String,
}

/// 게이트웨이 approve 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayApproveResponse {
    /// 승인된 거래 ID
    pub tid: String,
    /// 승인 금액
    pub amount: GatewayAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayAmount {
    pub total: i64,
}

/// 결제 게이트웨이 REST 클라이언트 서비스
#[service]
pub struct PaymentGatewayService {
    // 외부 의존성 없음 - 설정은 PaymentConfig에서 읽는다
}

impl PaymentGatewayService {
    /// 결제 세션을 오픈합니다 (ready).
    ///
    /// # 인자
    ///
    /// * `order_code` - 가맹점 주문 번호
    /// * `buyer_id` - 구매자 식별자 (회원/게스트 ID)
    /// * `item_name` - 결제 페이지에 표시될 상품명
    /// * `total_amount` - 결제 금액
    pub async fn ready(
        &self,
        order_code: &str,
        buyer_id: &str,
        item_name: &str,
        total_amount: i64,
    ) -> Result<GatewayReadyResponse, AppError> {
        let start = std::time::Instant::now();
        let client = reqwest::Client::new();

        let body = json!({
            "cid": PaymentConfig::cid(),
            "partner_order_id": order_code,
            "partner_user_id": buyer_id,
            "item_name": item_name,
            "quantity": 1,
            "total_amount": total_amount,
            "tax_free_amount": 0,
            "approval_url": format!("{}?order_code={}", PaymentConfig::approval_url(), order_code),
            "cancel_url": format!("{}?order_code={}", PaymentConfig::cancel_url(), order_code),
            "fail_url": format!("{}?order_code={}", PaymentConfig::fail_url(), order_code),
        });

        let response = client
            .post(format!("{}/ready", PaymentConfig::base_url()))
            .header("Authorization", format!("SECRET_KEY {}", PaymentConfig::secret_key()))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("결제 ready 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::warn!("결제 ready 실패: {} - {}", status, body);
            return Err(AppError::ExternalServiceError(
                format!("결제 세션 오픈에 실패했습니다 ({})", status)
            ));
        }

        let ready: GatewayReadyResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("결제 ready 응답 파싱 실패: {}", e)))?;

        log::info!(
            "결제 세션 오픈: 주문 {} tid {} ({}ms)",
            order_code, ready.tid, start.elapsed().as_millis()
        );

        Ok(ready)
    }

    /// 결제를 승인 확정합니다 (approve).
    ///
    /// 게이트웨이가 approval_url로 전달한 일회성 `pg_token`을 사용합니다.
    pub async fn approve(
        &self,
        tid: &str,
        order_code: &str,
        buyer_id: &str,
        pg_token: &str,
    ) -> Result<GatewayApproveResponse, AppError> {
        let start = std::time::Instant::now();
        let client = reqwest::Client::new();

        let body = json!({
            "cid": PaymentConfig::cid(),
            "tid": tid,
            "partner_order_id": order_code,
            "partner_user_id": buyer_id,
            "pg_token": pg_token,
        });

        let response = client
            .post(format!("{}/approve", PaymentConfig::base_url()))
            .header("Authorization", format!("SECRET_KEY {}", PaymentConfig::secret_key()))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("결제 approve 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::warn!("결제 approve 실패: 주문 {} - {} - {}", order_code, status, body);
            return Err(AppError::ExternalServiceError(
                format!("결제 승인에 실패했습니다 ({})", status)
            ));
        }

        let approve: GatewayApproveResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("결제 approve 응답 파싱 실패: {}", e)))?;

        log::info!(
            "결제 승인 완료: 주문 {} 금액 {} ({}ms)",
            order_code, approve.amount.total, start.elapsed().as_millis()
        );

        Ok(approve)
    }
}
