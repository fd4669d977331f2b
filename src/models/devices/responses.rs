use serde::Serialize;

use super::entities::Device;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct DeviceListResponse {
    pub items: Vec<Device>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    pub device_id: String,
    pub online: bool,
    pub last_heartbeat: chrono::DateTime<chrono::Utc>,
}
