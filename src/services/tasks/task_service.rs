//! # 백그라운드 태스크 디스패치 서비스
//!
//! 요청/응답 사이클에서 분리되어야 하는 작업(이메일 발송)을 Redis 리스트
//! 큐로 fire-and-forget 디스패치합니다. 소비자는 별도 워커 프로세스이며
//! 이 저장소에는 태스크 정의와 디스패처만 있습니다.
//!
//! 페이로드는 JSON으로 직렬화되어 `RPUSH`됩니다:
//!
//! ```json
//! {"task": "send_welcome_email", "to": "dev@moa.kr", "params": {"nickname": "개발자홍길동"}}
//! ```

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use singleton_macro::service;
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    domain::entities::members::Member,
    domain::entities::orders::Order,
    repositories::members::MemberRepository,
};

/// 이메일 태스크 큐 이름
const EMAIL_QUEUE: &str = "task_queue:email";

/// 큐에 적재되는 이메일 태스크 페이로드
#[derive(Debug, Serialize, Deserialize)]
pub struct EmailTask {
    /// 워커가 디스패치하는 태스크 이름
    pub task: String,
    /// 수신자 이메일
    pub to: String,
    /// 템플릿 파라미터
    pub params: serde_json::Value,
}

/// 백그라운드 태스크 디스패치 서비스
#[service(name = "task")]
pub struct TaskService {
    /// 태스크 큐 전송용 Redis (자동 주입)
    redis: Arc<RedisClient>,

    /// 회원 리포지토리 - 주문 알림 수신자 조회 (자동 주입)
    member_repo: Arc<MemberRepository>,
}

impl TaskService {
    /// 태스크를 큐에 적재합니다 (fire-and-forget).
    async fn enqueue(&self, task: EmailTask) -> Result<(), AppError> {
        self.redis
            .push_to_queue(EMAIL_QUEUE, &task)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        log::debug!("태스크 적재: {} -> {}", task.task, task.to);
        Ok(())
    }

    /// 가입 환영 이메일 태스크 디스패치
    pub async fn dispatch_welcome_email(&self, member: &Member) -> Result<(), AppError> {
        self.enqueue(EmailTask {
            task: "send_welcome_email".to_string(),
            to: member.email.clone(),
            params: json!({ "nickname": member.nickname }),
        }).await
    }

    /// 결제 완료 안내 이메일 태스크 디스패치
    ///
    /// 게스트 주문은 수신 이메일이 없으므로 조용히 건너뜁니다.
    pub async fn dispatch_order_completed_email(&self, order: &Order) -> Result<(), AppError> {
        let member_id = match order.member_id {
            Some(id) => id,
            None => {
                log::debug!("게스트 주문은 메일 발송을 건너뜁니다: {}", order.order_code);
                return Ok(());
            }
        };

        let member = self.member_repo.find_by_id(&member_id.to_hex()).await?
            .ok_or_else(|| AppError::NotFound("주문 회원을 찾을 수 없습니다".to_string()))?;

        self.enqueue(EmailTask {
            task: "send_order_completed_email".to_string(),
            to: member.email,
            params: json!({
                "order_code": order.order_code,
                "total_amount": order.total_discounted_price,
            }),
        }).await
    }
}
