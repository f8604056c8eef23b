//! 결제 게이트웨이 연동 서비스 모듈

pub mod payment_gateway_service;

pub use payment_gateway_service::PaymentGatewayService;
