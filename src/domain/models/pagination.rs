//! # 커서 기반 페이지네이션 모델
//!
//! 페이지 번호 대신 마지막으로 본 정렬 키를 불투명 토큰으로 인코딩하는
//! 페이지네이션 방식입니다. 목록은 `_id` 내림차순(최신 우선)으로 정렬되고,
//! 커서는 마지막 문서의 ObjectId를 담습니다.
//!
//! 토큰 포맷: `base64url(JSON)` - 클라이언트는 내용을 해석하지 않고
//! 그대로 돌려보내기만 합니다.
//!
//! ## 조회 규약
//!
//! 1. `size + 1`개를 조회한다
//! 2. `size`개를 초과하면 `has_more = true`, 마지막 반환 문서의 ID로
//!    `next_cursor`를 만든다
//! 3. 컬렉션 끝이면 `has_more = false`, `next_cursor = None`

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;

/// 페이지 크기 기본값과 상한
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// 커서 토큰 내부 구조
///
/// 마지막으로 반환된 문서의 정렬 키를 담습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// 마지막 문서의 ObjectId (hex)
    pub last_id: String,
}

impl Cursor {
    pub fn new(last_id: ObjectId) -> Self {
        Self {
            last_id: last_id.to_hex(),
        }
    }

    /// 불투명 토큰으로 인코딩합니다.
    pub fn encode(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json.as_bytes())
    }

    /// 불투명 토큰을 디코딩합니다.
    ///
    /// 형식이 깨진 토큰은 ValidationError로 거부합니다.
    pub fn decode(token: &str) -> Result<Self, AppError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.as_bytes())
            .map_err(|_| AppError::ValidationError("유효하지 않은 커서입니다".to_string()))?;

        serde_json::from_slice(&bytes)
            .map_err(|_| AppError::ValidationError("유효하지 않은 커서입니다".to_string()))
    }

    /// 커서가 가리키는 ObjectId를 반환합니다.
    pub fn last_object_id(&self) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(&self.last_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 커서입니다".to_string()))
    }
}

/// 커서 페이지 응답 envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    /// 다음 페이지 존재 여부
    pub has_more: bool,
    /// 다음 페이지 요청에 사용할 토큰 (`has_more == false`면 None)
    pub next_cursor: Option<String>,
}

impl<T> CursorPage<T> {
    /// `size + 1`개 조회 결과로부터 페이지를 구성합니다.
    ///
    /// `id_of`는 각 아이템에서 정렬 키 ObjectId를 꺼내는 함수입니다.
    pub fn from_overfetched<F>(mut items: Vec<T>, size: i64, id_of: F) -> Self
    where
        F: Fn(&T) -> Option<ObjectId>,
    {
        let has_more = items.len() as i64 > size;
        if has_more {
            items.truncate(size as usize);
        }

        let next_cursor = if has_more {
            items.last().and_then(&id_of).map(|id| Cursor::new(id).encode())
        } else {
            None
        };

        Self {
            items,
            has_more,
            next_cursor,
        }
    }
}

/// 공통 커서 페이지 요청 쿼리
///
/// 커서 목록 엔드포인트(내 주문, 내 북마크, 관리자 주문)가 공유합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// 이전 응답의 next_cursor (첫 페이지면 생략)
    #[serde(default, deserialize_with = "crate::utils::string_utils::deserialize_optional_string")]
    pub cursor: Option<String>,
    /// 페이지 크기 (기본 20, 최대 100)
    pub size: Option<i64>,
}

/// 요청 쿼리의 `size` 파라미터를 기본값/상한으로 정규화합니다.
pub fn normalize_page_size(size: Option<i64>) -> i64 {
    match size {
        Some(s) if s >= 1 && s <= MAX_PAGE_SIZE => s,
        Some(s) if s > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
        _ => DEFAULT_PAGE_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_round_trip() {
        let id = ObjectId::new();
        let cursor = Cursor::new(id);
        let token = cursor.encode();

        let decoded = Cursor::decode(&token).unwrap();
        assert_eq!(decoded, cursor);
        assert_eq!(decoded.last_object_id().unwrap(), id);
    }

    #[test]
    fn test_cursor_rejects_garbage() {
        assert!(Cursor::decode("not-base64!!!").is_err());

        // base64는 맞지만 JSON이 아닌 경우
        let token = URL_SAFE_NO_PAD.encode(b"hello world");
        assert!(Cursor::decode(&token).is_err());
    }

    #[test]
    fn test_page_with_more_items() {
        // size=2 요청에 3개가 조회됨 → 정확히 2개 반환 + 커서
        let ids: Vec<ObjectId> = (0..3).map(|_| ObjectId::new()).collect();
        let page = CursorPage::from_overfetched(ids.clone(), 2, |id| Some(*id));

        assert_eq!(page.items.len(), 2);
        assert!(page.has_more);

        let cursor = Cursor::decode(page.next_cursor.as_ref().unwrap()).unwrap();
        assert_eq!(cursor.last_object_id().unwrap(), ids[1]);
    }

    #[test]
    fn test_page_at_end_of_collection() {
        // size=5 요청에 3개만 조회됨 → has_more=false, next_cursor=None
        let ids: Vec<ObjectId> = (0..3).map(|_| ObjectId::new()).collect();
        let page = CursorPage::from_overfetched(ids, 5, |id| Some(*id));

        assert_eq!(page.items.len(), 3);
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_page_exactly_full() {
        // size=3 요청에 정확히 3개 조회됨 → 다음 페이지 없음
        let ids: Vec<ObjectId> = (0..3).map(|_| ObjectId::new()).collect();
        let page = CursorPage::from_overfetched(ids, 3, |id| Some(*id));

        assert_eq!(page.items.len(), 3);
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_normalize_page_size() {
        assert_eq!(normalize_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(normalize_page_size(Some(0)), DEFAULT_PAGE_SIZE);
        assert_eq!(normalize_page_size(Some(-5)), DEFAULT_PAGE_SIZE);
        assert_eq!(normalize_page_size(Some(50)), 50);
        assert_eq!(normalize_page_size(Some(999)), MAX_PAGE_SIZE);
    }
}
