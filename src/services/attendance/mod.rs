pub mod detail;
pub mod end;
pub mod list;
pub mod manual;
pub mod scan;
pub mod start;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::AuthContext;
use crate::models::accounts::entities::AccountRole;
use crate::models::attendance::entities::{AttendanceSession, SessionStatus};
use crate::models::attendance::requests::{
    ManualMarkRequest, ScanRequest, SessionQueryParams, StartSessionRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn start_session(
        &self,
        session_data: StartSessionRequest,
        auth: &AuthContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        start::start_session(self, session_data, auth, request).await
    }

    pub async fn stop_session(
        &self,
        session_id: i64,
        auth: &AuthContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        end::end_session(self, session_id, SessionStatus::Completed, auth, request).await
    }

    pub async fn cancel_session(
        &self,
        session_id: i64,
        auth: &AuthContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        end::end_session(self, session_id, SessionStatus::Cancelled, auth, request).await
    }

    pub async fn list_sessions(
        &self,
        query: SessionQueryParams,
        auth: &AuthContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_sessions(self, query, auth, request).await
    }

    pub async fn session_detail(
        &self,
        session_id: i64,
        auth: &AuthContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::session_detail(self, session_id, auth, request).await
    }

    pub async fn scan(
        &self,
        scan_data: ScanRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        scan::scan(self, scan_data, request).await
    }

    pub async fn manual_mark(
        &self,
        session_id: i64,
        mark_data: ManualMarkRequest,
        auth: &AuthContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manual::manual_mark(self, session_id, mark_data, auth, request).await
    }
}

/// Admins may act on any session; a lecturer only on their own.
pub(crate) fn owns_session(auth: &AuthContext, session: &AttendanceSession) -> bool {
    match auth.role() {
        AccountRole::Admin => true,
        AccountRole::Lecturer => auth.lecturer_id() == Some(session.lecturer_id),
        AccountRole::Student => false,
    }
}

pub(crate) fn forbidden_response() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::Forbidden,
        "You do not manage this session",
    ))
}
