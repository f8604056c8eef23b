//! 북마크 서비스
//!
//! 북마크 등록/해제는 멱등합니다 - 같은 요청을 반복해도 결과가 같습니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::{
        dto::projects::{BookmarkResponse, ProjectSummaryResponse},
        entities::projects::ProjectBookmark,
        models::auth::AuthenticatedMember,
        models::pagination::{normalize_page_size, Cursor, CursorPage, PageQuery},
    },
    repositories::projects::{BookmarkRepository, ProjectRepository},
};

/// 북마크 비즈니스 로직 서비스
#[service(name = "bookmark")]
pub struct BookmarkService {
    /// 북마크 리포지토리 (자동 주입)
    bookmark_repo: Arc<BookmarkRepository>,

    /// 프로젝트 리포지토리 - 대상 존재 검증 (자동 주입)
    project_repo: Arc<ProjectRepository>,
}

impl BookmarkService {
    fn parse_ids(member: &AuthenticatedMember, project_id: &str) -> Result<(ObjectId, ObjectId), AppError> {
        let member_id = ObjectId::parse_str(&member.member_id)
            .map_err(|_| AppError::InternalError("잘못된 회원 ID 클레임입니다".to_string()))?;
        let project_id = ObjectId::parse_str(project_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;
        Ok((member_id, project_id))
    }

    /// 북마크 등록 (멱등)
    pub async fn add(&self, member: &AuthenticatedMember, project_id: &str) -> Result<BookmarkResponse, AppError> {
        let (member_id, project_oid) = Self::parse_ids(member, project_id)?;

        if self.project_repo.find_by_id(project_id).await?.is_none() {
            return Err(AppError::NotFound("프로젝트를 찾을 수 없습니다".to_string()));
        }

        self.bookmark_repo.add(&project_oid, &member_id).await?;

        Ok(BookmarkResponse {
            project_id: project_id.to_string(),
            bookmarked: true,
        })
    }

    /// 북마크 해제 (멱등)
    pub async fn remove(&self, member: &AuthenticatedMember, project_id: &str) -> Result<BookmarkResponse, AppError> {
        let (member_id, project_oid) = Self::parse_ids(member, project_id)?;

        self.bookmark_repo.remove(&project_oid, &member_id).await?;

        Ok(BookmarkResponse {
            project_id: project_id.to_string(),
            bookmarked: false,
        })
    }

    /// 회원의 북마크 프로젝트 커서 페이지 조회
    pub async fn list(
        &self,
        member: &AuthenticatedMember,
        query: PageQuery,
    ) -> Result<CursorPage<ProjectSummaryResponse>, AppError> {
        let member_id = ObjectId::parse_str(&member.member_id)
            .map_err(|_| AppError::InternalError("잘못된 회원 ID 클레임입니다".to_string()))?;

        let size = normalize_page_size(query.size);
        let cursor = match query.cursor.as_deref() {
            Some(token) => Some(Cursor::decode(token)?),
            None => None,
        };

        let bookmarks = self.bookmark_repo
            .find_page_by_member(&member_id, cursor.as_ref(), size)
            .await?;

        let page = CursorPage::from_overfetched(bookmarks, size, |b: &ProjectBookmark| b.id);

        // 북마크된 프로젝트 요약 조회 (삭제된 프로젝트는 건너뜀)
        let mut items = Vec::with_capacity(page.items.len());
        for bookmark in page.items {
            if let Some(project) = self.project_repo.find_by_id(&bookmark.project_id.to_hex()).await? {
                items.push(ProjectSummaryResponse::from(project));
            }
        }

        Ok(CursorPage {
            items,
            has_more: page.has_more,
            next_cursor: page.next_cursor,
        })
    }
}
