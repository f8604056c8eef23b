//! 주문/결제 DTO 모듈

pub mod request;
pub mod response;

pub use request::{ApproveQuery, CreateOrderRequest, RefundRequest};
pub use response::{OrderItemResponse, OrderResponse, PaymentReadyResponse};
