//! # Core Framework Module
//!
//! 플랫폼 백엔드의 핵심 프레임워크 기능을 제공합니다.
//!
//! - [`registry`] - 싱글톤 의존성 주입 컨테이너 (`ServiceLocator`)
//! - [`errors`] - 통합 에러 타입과 HTTP 응답 변환 (`AppError`)
//!
//! 모든 서비스/리포지토리는 `#[service]` / `#[repository]` 매크로로 정의되고
//! `Arc<T>` 필드를 통해 의존성을 주입받습니다:
//!
//! ```rust,ignore
//! #[repository(name = "order", collection = "orders")]
//! struct OrderRepository {
//!     db: Arc<Database>,
//!     redis: Arc<RedisClient>,
//! }
//!
//! #[service(name = "order")]
//! struct OrderService {
//!     order_repo: Arc<OrderRepository>,  // 자동 주입
//! }
//! ```

pub mod errors;
pub mod registry;

pub use errors::{AppError, AppResult, ErrorContext};
