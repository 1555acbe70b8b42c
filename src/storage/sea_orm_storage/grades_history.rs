use super::{SeaOrmStorage, page_and_size};
use crate::entity::grades_history::{ActiveModel, Column, Entity as GradesHistory};
use crate::entity::users::Entity as Users;
use crate::errors::{DeaneryError, Result};
use crate::models::{
    PaginationInfo,
    grades_history::{
        entities::GradeHistory,
        requests::{CreateGradeHistoryRequest, GradeHistoryListQuery},
        responses::GradeHistoryListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 追加一条成绩变更记录
    pub async fn create_grade_history_impl(
        &self,
        req: CreateGradeHistoryRequest,
    ) -> Result<GradeHistory> {
        let txn = self.db.begin().await?;

        super::grades::ensure_student_and_course(&txn, req.student_id, req.course_id).await?;
        if Users::find_by_id(req.user_changed_id).one(&txn).await?.is_none() {
            return Err(DeaneryError::not_found(format!(
                "User {} not found",
                req.user_changed_id
            )));
        }

        let result = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            user_changed_id: Set(req.user_changed_id),
            grade: Set(req.grade),
            reason_of_change: Set(req.reason_of_change.trim().to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            DeaneryError::database_operation(format!("Failed to record grade history: {e}"))
        })?;

        txn.commit().await?;

        Ok(result.into_grade_history())
    }

    /// 分页列出成绩历史，最新的在前
    pub async fn list_grade_history_with_pagination_impl(
        &self,
        query: GradeHistoryListQuery,
    ) -> Result<GradeHistoryListResponse> {
        let (page, size) = page_and_size(query.page, query.size)?;

        let mut select = GradesHistory::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            DeaneryError::database_operation(format!("Failed to count grade history: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            DeaneryError::database_operation(format!("Failed to count grade history pages: {e}"))
        })?;
        let rows = paginator.fetch_page(page - 1).await.map_err(|e| {
            DeaneryError::database_operation(format!("Failed to list grade history: {e}"))
        })?;

        Ok(GradeHistoryListResponse {
            items: rows.into_iter().map(|m| m.into_grade_history()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
