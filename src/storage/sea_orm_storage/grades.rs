use super::{SeaOrmStorage, page_and_size};
use crate::entity::courses::Entity as Courses;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::grades_history::ActiveModel as HistoryActiveModel;
use crate::entity::students::Entity as Students;
use crate::errors::{DeaneryError, Result};
use crate::models::{
    PaginationInfo,
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::{GradeListResponse, GradeUpdateResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 学生和课程都必须存在
pub(crate) async fn ensure_student_and_course<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    course_id: i64,
) -> Result<()> {
    if Students::find_by_id(student_id).one(conn).await?.is_none() {
        return Err(DeaneryError::not_found(format!(
            "Student {student_id} not found"
        )));
    }
    if Courses::find_by_id(course_id).one(conn).await?.is_none() {
        return Err(DeaneryError::not_found(format!("Course {course_id} not found")));
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 录入成绩
    pub async fn create_grade_impl(&self, req: CreateGradeRequest) -> Result<Grade> {
        let txn = self.db.begin().await?;

        ensure_student_and_course(&txn, req.student_id, req.course_id).await?;

        let result = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            grade: Set(req.grade),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| DeaneryError::database_operation(format!("Failed to create grade: {e}")))?;

        txn.commit().await?;

        Ok(result.into_grade())
    }

    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to query grade: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let (page, size) = page_and_size(query.page, query.size)?;

        let mut select = Grades::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let paginator = select.order_by_asc(Column::Id).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to count grades: {e}")))?;
        let pages = paginator.num_pages().await.map_err(|e| {
            DeaneryError::database_operation(format!("Failed to count grade pages: {e}"))
        })?;
        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to list grades: {e}")))?;

        Ok(GradeListResponse {
            items: grades.into_iter().map(|m| m.into_grade()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 修改成绩，同一事务内追加一条历史记录
    pub async fn update_grade_impl(
        &self,
        id: i64,
        update: UpdateGradeRequest,
        user_changed_id: i64,
    ) -> Result<Option<GradeUpdateResponse>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Grades::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let grade = ActiveModel {
            id: Set(id),
            grade: Set(update.grade),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| DeaneryError::database_operation(format!("Failed to update grade: {e}")))?;

        let history = HistoryActiveModel {
            student_id: Set(existing.student_id),
            course_id: Set(existing.course_id),
            user_changed_id: Set(user_changed_id),
            grade: Set(update.grade),
            reason_of_change: Set(update.reason_of_change.trim().to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            DeaneryError::database_operation(format!("Failed to record grade history: {e}"))
        })?;

        txn.commit().await?;

        Ok(Some(GradeUpdateResponse {
            grade: grade.into_grade(),
            history: history.into_grade_history(),
        }))
    }

    pub async fn delete_grade_impl(&self, id: i64) -> Result<bool> {
        let result = Grades::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to delete grade: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
