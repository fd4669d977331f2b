use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{debug, info};

use super::AttendanceService;
use crate::models::attendance::requests::{CheckInData, ScanRequest};
use crate::models::attendance::responses::ScanResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::recognition::RecognitionClient;

fn internal_error(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("Failed to process scan: {e}"),
    ))
}

/// Device-facing check-in. The device is trusted by identifier alone, so the
/// flow only ever acts on the session currently bound to that device.
pub async fn scan(
    service: &AttendanceService,
    scan_data: ScanRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if scan_data.image.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Image payload cannot be empty",
        )));
    }

    let device = match storage.get_device_by_device_id(&scan_data.device_id).await {
        Ok(Some(device)) => device,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Device not found",
            )));
        }
        Err(e) => return Ok(internal_error(e)),
    };

    if !device.active {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::DeviceInactive,
            "Device is inactive",
        )));
    }

    // Every scan doubles as a liveness signal
    if let Err(e) = storage.record_heartbeat(&scan_data.device_id).await {
        tracing::warn!("heartbeat refresh failed: {e}");
    }

    let session = match storage.get_active_session_for_device(device.id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SessionNotActive,
                "No active session for this device",
            )));
        }
        Err(e) => return Ok(internal_error(e)),
    };

    // Recognition only considers students actively enrolled in the class
    let candidates = match storage.active_student_ids(session.class_id).await {
        Ok(ids) => ids,
        Err(e) => return Ok(internal_error(e)),
    };

    let recognizer = request
        .app_data::<web::Data<Arc<dyn RecognitionClient>>>()
        .expect("Recognition client not found in app data")
        .get_ref()
        .clone();

    let outcome = match recognizer
        .recognize(&scan_data.image, &scan_data.device_id, &candidates)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => return Ok(internal_error(e)),
    };

    let Some(student_id) = outcome.student_id.filter(|_| outcome.matched) else {
        debug!(device_id = %scan_data.device_id, "scan did not match any candidate");
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            ScanResponse {
                matched: false,
                confidence: None,
                student: None,
                record: None,
                already_recorded: false,
            },
            "No matching student found",
        )));
    };

    // The mock only answers out of the candidate list, but a real backend
    // may return any subject it knows
    if !candidates.contains(&student_id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            "Student is not actively enrolled in this class",
        )));
    }

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Recognized student no longer exists",
            )));
        }
        Err(e) => return Ok(internal_error(e)),
    };

    let client_ip = request
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);
    let user_agent = request
        .headers()
        .get(actix_web::http::header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let check_in = CheckInData {
        session_id: session.id,
        student_id,
        confidence: outcome.confidence,
        location: scan_data.location,
        device_id: device.id,
        client_ip,
        user_agent,
    };

    match storage.check_in(check_in).await {
        Ok((record, created)) => {
            let message = if created {
                info!(
                    session_id = session.id,
                    student_id, "attendance recorded from device scan"
                );
                "Attendance recorded successfully"
            } else {
                "Already marked as present"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ScanResponse {
                    matched: true,
                    confidence: Some(outcome.confidence),
                    student: Some(student),
                    record: Some(record),
                    already_recorded: !created,
                },
                message,
            )))
        }
        Err(e) => Ok(internal_error(e)),
    }
}
