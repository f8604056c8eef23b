//! # 모아 플랫폼 백엔드
//!
//! Rust 기반의 프로젝트 협업 및 포인트 커머스 플랫폼 백엔드입니다.
//! 회원/게스트 인증, 프로젝트 모집, 북마크, 포인트 결제(외부 결제
//! 게이트웨이 연동), 프로모션 콘텐츠를 제공하며, 싱글톤 매크로를 활용한
//! 의존성 주입으로 구성됩니다.
//!
//! # Features
//!
//! - **회원/게스트 관리**: 가입(닉네임 금칙어 정책), 게스트 세션과 포인트 승계
//! - **JWT 인증**: 액세스/리프레시 토큰, Redis 세션, 카카오 소셜 로그인
//! - **프로젝트 모집**: 직무별 정원 카운터, 지원/합류 확정, 북마크
//! - **주문/결제**: READY→SUCCESS/FAIL/CANCEL 선형 상태 기계, append-only
//!   상태 로그, 결제 승인 시 포인트 지급(이행)
//! - **커서 페이지네이션**: base64 불투명 토큰 기반 목록 조회
//! - **부가 기능**: 투표/리워드, 프로모션 배너, pre-signed 업로드 URL,
//!   이메일 태스크 큐 디스패치
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 (/api/v1)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (상태 전이, 이행, 외부 연동)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스 (캐시 우선 조회)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소 + 캐시/태스크 큐
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use moa_platform_backend::services::members::MemberService;
//! use moa_platform_backend::services::orders::OrderService;
//!
//! // 싱글톤 서비스 인스턴스 가져오기
//! let member_service = MemberService::instance();
//! let order_service = OrderService::instance();
//!
//! // 가입 및 주문 생성
//! let member = member_service.signup(request).await?;
//! let order = order_service.create(&buyer, order_request).await?;
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
