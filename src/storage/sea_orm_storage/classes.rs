use super::SeaOrmStorage;
use crate::entity::class_sections::{ActiveModel, Column, Entity as ClassSections};
use crate::entity::{courses, enrollments, lecturers};
use crate::errors::{Result, SiabsenError};
use crate::models::{
    PaginationInfo,
    classes::{
        entities::{ClassSection, ClassSectionDetail},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    courses::entities::Course,
    lecturers::entities::Lecturer,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Query as SeaQuery,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<ClassSection> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            lecturer_id: Set(req.lecturer_id),
            day_of_week: Set(req.day_of_week),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            room: Set(req.room),
            capacity: Set(req.capacity),
            academic_year: Set(req.academic_year),
            term: Set(req.term.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Create class failed: {e}")))?;

        Ok(result.into_class_section())
    }

    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<ClassSection>> {
        let result = ClassSections::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query class failed: {e}")))?;

        Ok(result.map(|m| m.into_class_section()))
    }

    pub async fn get_class_detail_impl(&self, id: i64) -> Result<Option<ClassSectionDetail>> {
        let Some(class) = self.get_class_by_id_impl(id).await? else {
            return Ok(None);
        };

        let course = courses::Entity::find_by_id(class.course_id)
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query course failed: {e}")))?
            .map(|m| m.into_course());

        let lecturer = lecturers::Entity::find_by_id(class.lecturer_id)
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query lecturer failed: {e}")))?
            .map(|m| m.into_lecturer());

        Ok(Some(ClassSectionDetail {
            class,
            course,
            lecturer,
        }))
    }

    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = ClassSections::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Room.contains(&escaped));
        }

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        if let Some(lecturer_id) = query.lecturer_id {
            select = select.filter(Column::LecturerId.eq(lecturer_id));
        }

        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }

        // Restrict to classes the student is actively enrolled in
        if let Some(student_id) = query.enrolled_student_id {
            select = select.filter(
                Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(enrollments::Column::ClassId)
                        .from(enrollments::Entity)
                        .and_where(enrollments::Column::StudentId.eq(student_id))
                        .and_where(enrollments::Column::Active.eq(true))
                        .to_owned(),
                ),
            );
        }

        select = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Count classes failed: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Page classes failed: {e}")))?;

        let classes: Vec<ClassSection> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("List classes failed: {e}")))?
            .into_iter()
            .map(|m| m.into_class_section())
            .collect();

        let items = self.attach_class_relations(classes).await?;

        Ok(ClassListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// Batch-loads courses and lecturers for a page of classes.
    pub(crate) async fn attach_class_relations(
        &self,
        classes: Vec<ClassSection>,
    ) -> Result<Vec<ClassSectionDetail>> {
        let course_ids: Vec<i64> = classes.iter().map(|c| c.course_id).collect();
        let lecturer_ids: Vec<i64> = classes.iter().map(|c| c.lecturer_id).collect();

        let courses: HashMap<i64, Course> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query courses failed: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.into_course()))
            .collect();

        let lecturers: HashMap<i64, Lecturer> = lecturers::Entity::find()
            .filter(lecturers::Column::Id.is_in(lecturer_ids))
            .all(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query lecturers failed: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.into_lecturer()))
            .collect();

        Ok(classes
            .into_iter()
            .map(|class| {
                let course = courses.get(&class.course_id).cloned();
                let lecturer = lecturers.get(&class.lecturer_id).cloned();
                ClassSectionDetail {
                    class,
                    course,
                    lecturer,
                }
            })
            .collect())
    }

    pub async fn update_class_impl(
        &self,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<ClassSection>> {
        let existing = self.get_class_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }
        if let Some(lecturer_id) = update.lecturer_id {
            model.lecturer_id = Set(lecturer_id);
        }
        if let Some(day_of_week) = update.day_of_week {
            model.day_of_week = Set(day_of_week);
        }
        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time);
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time);
        }
        if let Some(room) = update.room {
            model.room = Set(room);
        }
        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }
        if let Some(term) = update.term {
            model.term = Set(term.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Update class failed: {e}")))?;

        self.get_class_by_id_impl(id).await
    }

    pub async fn delete_class_impl(&self, id: i64) -> Result<bool> {
        let result = ClassSections::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Delete class failed: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
