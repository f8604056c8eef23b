//! # 회원 관리 서비스 구현
//!
//! 회원 계정의 전체 생명주기를 관리하는 핵심 비즈니스 로직입니다.
//! Spring Framework의 UserService/UserDetailsService 패턴에 해당하며,
//! 가입, 인증, 조회, 탈퇴를 담당합니다.
//!
//! ## 보안 설계
//!
//! - **bcrypt 해싱**: 환경별 cost (개발 4, 프로덕션 12)
//! - **닉네임 정책**: 문자 집합 + 금칙어 블랙리스트 검사
//! - **중복 방지**: 이메일/닉네임 유니크 제약
//! - **민감 정보 제거**: DTO 변환 시 비밀번호 해시 제외
//! - **계정 상태 검증**: 비활성 계정 로그인 차단

use std::sync::Arc;
use bcrypt::{hash, verify};
use singleton_macro::service;
use crate::{
    config::PasswordConfig,
    core::errors::AppError,
    domain::{
        dto::members::{MemberResponse, NicknameCheckResponse, SignupRequest, SignupResponse},
        entities::members::Member,
    },
    repositories::members::MemberRepository,
    services::members::guest_service::GuestService,
    services::tasks::task_service::TaskService,
    utils::string_utils::validate_nickname_policy,
};

/// 회원 관리 비즈니스 로직 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리되며 의존성이 자동
/// 주입됩니다:
///
/// ```rust,ignore
/// let member_service = MemberService::instance(); // 항상 동일한 인스턴스
/// ```
#[service(name = "member")]
pub struct MemberService {
    /// 회원 리포지토리 (자동 주입)
    member_repo: Arc<MemberRepository>,

    /// 게스트 서비스 - 가입 시 게스트 세션 연동 (자동 주입)
    guest_service: Arc<GuestService>,

    /// 백그라운드 태스크 디스패처 - 가입 환영 메일 (자동 주입)
    task_service: Arc<TaskService>,
}

impl MemberService {
    /// 새 회원 계정 생성
    ///
    /// # 처리 과정
    ///
    /// 1. 닉네임 정책 검증 (문자 집합, 금칙어)
    /// 2. bcrypt 비밀번호 해싱 (환경별 cost)
    /// 3. 엔티티 생성 및 저장 (중복 검사는 리포지토리에서)
    /// 4. 게스트 토큰이 있으면 게스트 세션 연동
    /// 5. 환영 이메일 태스크 디스패치 (fire-and-forget)
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 닉네임 정책 위반
    /// * `AppError::ConflictError` - 이메일 또는 닉네임 중복
    /// * `AppError::InternalError` - 해싱 실패
    pub async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, AppError> {
        let start_time = std::time::Instant::now();

        let nickname = validate_nickname_policy(&request.nickname)?;

        // 환경별 bcrypt cost 사용
        let bcrypt_cost = PasswordConfig::bcrypt_cost();

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::info!("Password hashing took: {:?}", hash_start.elapsed());

        let member = Member::new_local(request.email, nickname, password_hash);
        let created = self.member_repo.create(member).await?;

        // 가입 전 게스트 세션 연동 (실패해도 가입은 유지)
        if let Some(guest_token) = request.guest_token {
            if let Err(e) = self.guest_service.link_to_member(&guest_token, &created).await {
                log::warn!("게스트 세션 연동 실패 - 회원: {}, 에러: {}", created.email, e);
            }
        }

        // 환영 메일은 요청/응답 사이클 밖에서 처리
        if let Err(e) = self.task_service.dispatch_welcome_email(&created).await {
            log::warn!("환영 메일 태스크 디스패치 실패: {}", e);
        }

        log::info!("Total signup took: {:?}", start_time.elapsed());

        Ok(SignupResponse {
            member: MemberResponse::from(created),
            message: "회원 가입이 완료되었습니다".to_string(),
        })
    }

    /// 이메일/비밀번호 인증
    ///
    /// # 보안 특징
    ///
    /// - 존재하지 않는 이메일과 비밀번호 불일치에 동일한 에러 메시지를
    ///   사용하여 계정 존재 여부 노출을 방지합니다
    /// - 소셜 로그인 계정의 비밀번호 로그인 시도는 명시적으로 안내합니다
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<Member, AppError> {
        let member = self.member_repo.find_by_email(email).await?
            .ok_or_else(|| AppError::AuthenticationError(
                "이메일 또는 비밀번호가 올바르지 않습니다".to_string()
            ))?;

        if !member.is_active {
            log::warn!("비활성 계정 로그인 시도: {}", email);
            return Err(AppError::AuthenticationError("계정이 비활성화되었습니다".to_string()));
        }

        if !member.can_authenticate_with_password() {
            return Err(AppError::AuthenticationError(
                "소셜 로그인으로 가입된 계정입니다".to_string()
            ));
        }

        let password_hash = member.password_hash.as_deref()
            .ok_or_else(|| AppError::InternalError("비밀번호 해시가 없습니다".to_string()))?;

        let matches = verify(password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !matches {
            log::warn!("비밀번호 불일치: {}", email);
            return Err(AppError::AuthenticationError(
                "이메일 또는 비밀번호가 올바르지 않습니다".to_string()
            ));
        }

        // 마지막 로그인 시간 기록 (실패해도 로그인은 성공)
        if let Some(id) = member.id_string() {
            let _ = self.member_repo.update(&id, mongodb::bson::doc! {
                "last_login_at": mongodb::bson::DateTime::now(),
            }).await;
        }

        Ok(member)
    }

    /// ID로 회원 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Member>, AppError> {
        self.member_repo.find_by_id(id).await
    }

    /// ID로 회원 조회 (없으면 NotFound)
    pub async fn get_by_id(&self, id: &str) -> Result<MemberResponse, AppError> {
        let member = self.member_repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("회원을 찾을 수 없습니다".to_string()))?;

        Ok(MemberResponse::from(member))
    }

    /// 닉네임 사용 가능 여부 확인
    ///
    /// 정책 위반(형식/금칙어)과 중복을 구분하여 사유를 반환합니다.
    pub async fn check_nickname(&self, nickname: &str) -> Result<NicknameCheckResponse, AppError> {
        let normalized = match validate_nickname_policy(nickname) {
            Ok(n) => n,
            Err(AppError::ValidationError(reason)) => {
                return Ok(NicknameCheckResponse {
                    nickname: nickname.to_string(),
                    available: false,
                    reason: Some(reason),
                });
            }
            Err(e) => return Err(e),
        };

        let taken = self.member_repo.find_by_nickname(&normalized).await?.is_some();

        Ok(NicknameCheckResponse {
            nickname: normalized,
            available: !taken,
            reason: if taken {
                Some("이미 사용 중인 닉네임입니다".to_string())
            } else {
                None
            },
        })
    }

    /// 회원 탈퇴 (소프트 삭제)
    pub async fn deactivate(&self, id: &str) -> Result<(), AppError> {
        let deactivated = self.member_repo.deactivate(id).await?;

        if !deactivated {
            return Err(AppError::NotFound("회원을 찾을 수 없습니다".to_string()));
        }

        log::info!("회원 탈퇴 처리 완료: {}", id);
        Ok(())
    }
}
