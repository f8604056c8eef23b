//! 프로젝트 애그리거트 엔티티 모듈
//!
//! 협업 리스팅(`Project`), 모집 회차(`ProjectRecruitment`)와 하위 레코드,
//! 북마크, 관리 권한을 포함합니다.

pub mod bookmark;
pub mod project;
pub mod recruitment;

pub use bookmark::ProjectBookmark;
pub use project::{ManagementPermission, Project, ProjectCategory, ProjectManagementPermission};
pub use recruitment::{
    ApplicationStatus, ProjectRecruitApplication, ProjectRecruitment, ProjectRecruitmentJob,
    RecruitmentStatus,
};
