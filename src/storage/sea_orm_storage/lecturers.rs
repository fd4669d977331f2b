use super::SeaOrmStorage;
use crate::entity::lecturers::{ActiveModel, Column, Entity as Lecturers};
use crate::errors::{Result, SiabsenError};
use crate::models::{
    PaginationInfo,
    lecturers::{
        entities::Lecturer,
        requests::{CreateLecturerRequest, LecturerListQuery, UpdateLecturerRequest},
        responses::LecturerListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_lecturer_impl(&self, req: CreateLecturerRequest) -> Result<Lecturer> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            nidn: Set(req.nidn),
            full_name: Set(req.full_name),
            email: Set(req.email),
            department: Set(req.department),
            phone: Set(req.phone),
            photo_path: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            SiabsenError::database_operation(format!("Create lecturer failed: {e}"))
        })?;

        Ok(result.into_lecturer())
    }

    pub async fn get_lecturer_by_id_impl(&self, id: i64) -> Result<Option<Lecturer>> {
        let result = Lecturers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query lecturer failed: {e}")))?;

        Ok(result.map(|m| m.into_lecturer()))
    }

    pub async fn get_lecturer_by_nidn_impl(&self, nidn: &str) -> Result<Option<Lecturer>> {
        let result = Lecturers::find()
            .filter(Column::Nidn.eq(nidn))
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query lecturer failed: {e}")))?;

        Ok(result.map(|m| m.into_lecturer()))
    }

    pub async fn get_lecturer_by_email_impl(&self, email: &str) -> Result<Option<Lecturer>> {
        let result = Lecturers::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query lecturer failed: {e}")))?;

        Ok(result.map(|m| m.into_lecturer()))
    }

    pub async fn list_lecturers_with_pagination_impl(
        &self,
        query: LecturerListQuery,
    ) -> Result<LecturerListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Lecturers::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Nidn.contains(&escaped))
                    .add(Column::FullName.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        if let Some(ref department) = query.department {
            select = select.filter(Column::Department.eq(department));
        }

        select = select.order_by_asc(Column::FullName);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SiabsenError::database_operation(format!("Count lecturers failed: {e}"))
        })?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Page lecturers failed: {e}")))?;

        let lecturers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("List lecturers failed: {e}")))?;

        Ok(LecturerListResponse {
            items: lecturers.into_iter().map(|m| m.into_lecturer()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_lecturer_impl(
        &self,
        id: i64,
        update: UpdateLecturerRequest,
    ) -> Result<Option<Lecturer>> {
        let existing = self.get_lecturer_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(nidn) = update.nidn {
            model.nidn = Set(nidn);
        }
        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(department) = update.department {
            model.department = Set(department);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }

        model.update(&self.db).await.map_err(|e| {
            SiabsenError::database_operation(format!("Update lecturer failed: {e}"))
        })?;

        self.get_lecturer_by_id_impl(id).await
    }

    pub async fn delete_lecturer_impl(&self, id: i64) -> Result<bool> {
        let result = Lecturers::delete_by_id(id).exec(&self.db).await.map_err(|e| {
            SiabsenError::database_operation(format!("Delete lecturer failed: {e}"))
        })?;

        Ok(result.rows_affected > 0)
    }

    pub async fn update_lecturer_photo_impl(&self, id: i64, photo_path: &str) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Lecturers::update_many()
            .col_expr(
                Column::PhotoPath,
                sea_orm::sea_query::Expr::value(photo_path),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SiabsenError::database_operation(format!("Update lecturer photo failed: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
