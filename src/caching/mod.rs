//! 캐싱 계층 모듈
//!
//! Redis 기반 캐시 클라이언트를 제공합니다. 리포지토리의 읽기 캐시,
//! 리프레시 토큰 세션 저장, 백그라운드 태스크 큐 전송에 사용됩니다.

pub mod redis;
