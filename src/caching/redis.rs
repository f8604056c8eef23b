//! # Redis 캐시/큐 클라이언트 구현
//!
//! Redis를 백엔드로 하는 캐시 클라이언트를 제공합니다.
//! Spring Framework의 RedisTemplate과 유사한 역할을 수행하며,
//! 타입 안전성과 비동기 처리를 지원합니다.
//!
//! 캐시 외에도 백그라운드 태스크 큐의 전송 계층을 담당합니다:
//! 태스크 페이로드를 리스트에 `RPUSH`하면 외부 워커가 `BLPOP`으로
//! 소비합니다. 이 저장소에는 소비자 로직이 없습니다.
//!
//! ## 연결 관리
//!
//! Redis 연결은 멀티플렉싱을 사용하여 단일 TCP 연결에서
//! 여러 동시 요청을 효율적으로 처리합니다.

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

/// Redis 캐시 클라이언트 래퍼
///
/// ## 특징
///
/// - **연결 풀링**: 내부적으로 멀티플렉싱된 연결 사용
/// - **자동 직렬화**: Serde를 통한 투명한 JSON 변환
/// - **타입 안전성**: 제네릭을 통한 컴파일 타임 타입 검증
#[derive(Clone)]
pub struct RedisClient {
    /// 멀티플렉싱을 지원하는 Redis 클라이언트
    client: Client,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 환경 변수 `REDIS_URL`에서 서버 주소를 읽어오며(기본값
    /// `redis://localhost:6379`), 생성 시 PING으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        println!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// 지정된 키에서 값을 조회합니다.
    ///
    /// JSON으로 직렬화된 데이터를 자동으로 역직렬화하여 반환합니다.
    /// 역직렬화에 실패하면(스키마 변경 등) 캐시 미스로 처리합니다.
    ///
    /// ## 반환값
    ///
    /// - `Ok(Some(T))` - 키가 존재하고 역직렬화 성공
    /// - `Ok(None)` - 키 없음 또는 역직렬화 실패
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json: Option<String> = conn.get(key).await?;

        Ok(json.and_then(|j| serde_json::from_str(&j).ok()))
    }

    /// 만료 시간 없이 값을 저장합니다.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set(key, json).await
    }

    /// TTL과 함께 값을 저장합니다.
    ///
    /// | 용도 | 권장 TTL |
    /// |------|----------|
    /// | 리프레시 토큰 세션 | 30일 |
    /// | 엔티티 읽기 캐시 | 10분 |
    /// | 일회성 토큰 | 10-30분 |
    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set_ex(key, json, seconds as u64).await
    }

    /// 지정된 키를 삭제합니다. 키가 없어도 성공으로 처리합니다.
    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    /// 여러 키를 한 번에 삭제합니다.
    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(keys).await
    }

    /// 패턴과 일치하는 키들을 검색합니다.
    ///
    /// KEYS 명령은 블로킹 연산이므로 프로덕션에서 넓은 패턴 사용에
    /// 주의해야 합니다.
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.keys(pattern).await
    }

    /// 리스트 큐 끝에 값을 추가합니다.
    ///
    /// 백그라운드 태스크 디스패치에 사용됩니다. 페이로드는 JSON으로
    /// 직렬화되어 `RPUSH`되며, 외부 워커가 반대쪽 끝에서 소비합니다.
    pub async fn push_to_queue<T: Serialize>(&self, queue: &str, value: &T) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.rpush(queue, json).await
    }
}

impl Default for RedisClient {
    /// 기본 설정으로 RedisClient를 생성합니다.
    ///
    /// 주의: 동기 생성이므로 연결 테스트를 수행하지 않습니다.
    /// 프로덕션에서는 `RedisClient::new().await`를 사용하세요.
    fn default() -> Self {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)
            .expect("Failed to create Redis client with default configuration");

        Self { client }
    }
}
