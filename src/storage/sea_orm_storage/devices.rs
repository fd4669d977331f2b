use super::SeaOrmStorage;
use crate::config::AppConfig;
use crate::entity::devices::{ActiveModel, Column, Entity as Devices};
use crate::errors::{Result, SiabsenError};
use crate::models::{
    PaginationInfo,
    devices::{
        entities::Device,
        requests::{CreateDeviceRequest, DeviceListQuery, UpdateDeviceRequest},
        responses::DeviceListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

fn offline_window() -> i64 {
    AppConfig::get().attendance.device_offline_secs
}

impl SeaOrmStorage {
    pub async fn create_device_impl(&self, req: CreateDeviceRequest) -> Result<Device> {
        let now = chrono::Utc::now();

        let model = ActiveModel {
            device_id: Set(req.device_id),
            name: Set(req.name),
            location: Set(req.location),
            class_id: Set(req.class_id),
            active: Set(true),
            last_heartbeat: Set(None),
            created_at: Set(now.timestamp()),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Create device failed: {e}")))?;

        Ok(result.into_device(now, offline_window()))
    }

    pub async fn get_device_by_id_impl(&self, id: i64) -> Result<Option<Device>> {
        let result = Devices::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query device failed: {e}")))?;

        Ok(result.map(|m| m.into_device(chrono::Utc::now(), offline_window())))
    }

    pub async fn get_device_by_device_id_impl(&self, device_id: &str) -> Result<Option<Device>> {
        let result = Devices::find()
            .filter(Column::DeviceId.eq(device_id))
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query device failed: {e}")))?;

        Ok(result.map(|m| m.into_device(chrono::Utc::now(), offline_window())))
    }

    pub async fn list_devices_with_pagination_impl(
        &self,
        query: DeviceListQuery,
    ) -> Result<DeviceListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Devices::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::DeviceId.contains(&escaped))
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Location.contains(&escaped)),
            );
        }

        if let Some(active) = query.active {
            select = select.filter(Column::Active.eq(active));
        }

        select = select.order_by_asc(Column::DeviceId);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Count devices failed: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Page devices failed: {e}")))?;

        let devices = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("List devices failed: {e}")))?;

        let now = chrono::Utc::now();
        let window = offline_window();

        Ok(DeviceListResponse {
            items: devices
                .into_iter()
                .map(|m| m.into_device(now, window))
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_device_impl(
        &self,
        id: i64,
        update: UpdateDeviceRequest,
    ) -> Result<Option<Device>> {
        let existing = self.get_device_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(location) = update.location {
            model.location = Set(location);
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(Some(class_id));
        }
        if let Some(active) = update.active {
            model.active = Set(active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Update device failed: {e}")))?;

        self.get_device_by_id_impl(id).await
    }

    pub async fn delete_device_impl(&self, id: i64) -> Result<bool> {
        let result = Devices::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Delete device failed: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// Refreshes last_heartbeat and returns the updated device.
    pub async fn record_heartbeat_impl(&self, device_id: &str) -> Result<Option<Device>> {
        let now = chrono::Utc::now().timestamp();

        let result = Devices::update_many()
            .col_expr(Column::LastHeartbeat, sea_orm::sea_query::Expr::value(now))
            .filter(Column::DeviceId.eq(device_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SiabsenError::database_operation(format!("Record heartbeat failed: {e}"))
            })?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_device_by_device_id_impl(device_id).await
    }
}
