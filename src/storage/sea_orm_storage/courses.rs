use super::{SeaOrmStorage, page_and_size};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::grades_history::{Column as HistoryColumn, Entity as GradesHistory};
use crate::entity::student_courses::{Column as StudentCourseColumn, Entity as StudentCourses};
use crate::entity::vote_not_required_courses::{
    Column as VoteNotRequiredColumn, Entity as VoteNotRequiredCourses,
};
use crate::entity::vote_required_courses::{
    Column as VoteRequiredColumn, Entity as VoteRequiredCourses,
};
use crate::errors::{DeaneryError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let result = ActiveModel {
            name: Set(req.name.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| DeaneryError::database_operation(format!("Failed to create course: {e}")))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to query course: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = page_and_size(query.page, query.size)?;

        let mut select = Courses::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        let paginator = select.order_by_asc(Column::Id).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to count courses: {e}")))?;
        let pages = paginator.num_pages().await.map_err(|e| {
            DeaneryError::database_operation(format!("Failed to count course pages: {e}"))
        })?;
        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to list courses: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to update course: {e}")))?;

        Ok(Some(result.into_course()))
    }

    /// 删除课程及所有引用它的成绩、历史、选课和投票关联
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        if Courses::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(false);
        }

        Grades::delete_many()
            .filter(GradeColumn::CourseId.eq(id))
            .exec(&txn)
            .await?;
        GradesHistory::delete_many()
            .filter(HistoryColumn::CourseId.eq(id))
            .exec(&txn)
            .await?;
        StudentCourses::delete_many()
            .filter(StudentCourseColumn::CourseId.eq(id))
            .exec(&txn)
            .await?;
        VoteRequiredCourses::delete_many()
            .filter(VoteRequiredColumn::CourseId.eq(id))
            .exec(&txn)
            .await?;
        VoteNotRequiredCourses::delete_many()
            .filter(VoteNotRequiredColumn::CourseId.eq(id))
            .exec(&txn)
            .await?;

        let result = Courses::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to delete course: {e}")))?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
