use std::collections::HashMap;

use super::{SeaOrmStorage, page_and_size};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::grades_history::{Column as HistoryColumn, Entity as GradesHistory};
use crate::entity::groups::Entity as Groups;
use crate::entity::student_courses::{
    ActiveModel as StudentCourseActiveModel, Column as StudentCourseColumn,
    Entity as StudentCourses,
};
use crate::entity::students::{ActiveModel, Column, Entity as Students, Model};
use crate::entity::users::Entity as Users;
use crate::entity::vote_groups::{Column as VoteGroupColumn, Entity as VoteGroups};
use crate::entity::votes::{Column as VoteColumn, Entity as Votes};
use crate::errors::{DeaneryError, Result};
use crate::models::{
    PaginationInfo,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    votes::responses::VoteDetail,
};
use crate::utils::dates::format_date;
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, TransactionTrait,
};

/// 删除学生及其成绩、成绩历史、选课关联
pub(crate) async fn delete_students_cascade<C: ConnectionTrait>(
    conn: &C,
    student_ids: &[i64],
) -> Result<u64> {
    if student_ids.is_empty() {
        return Ok(0);
    }

    Grades::delete_many()
        .filter(GradeColumn::StudentId.is_in(student_ids.to_vec()))
        .exec(conn)
        .await?;
    GradesHistory::delete_many()
        .filter(HistoryColumn::StudentId.is_in(student_ids.to_vec()))
        .exec(conn)
        .await?;
    StudentCourses::delete_many()
        .filter(StudentCourseColumn::StudentId.is_in(student_ids.to_vec()))
        .exec(conn)
        .await?;

    let result = Students::delete_many()
        .filter(Column::Id.is_in(student_ids.to_vec()))
        .exec(conn)
        .await
        .map_err(|e| DeaneryError::database_operation(format!("Failed to delete students: {e}")))?;

    Ok(result.rows_affected)
}

/// 批量加载学生的课程 ID
async fn load_course_ids<C: ConnectionTrait>(
    conn: &C,
    student_ids: &[i64],
) -> Result<HashMap<i64, Vec<i64>>> {
    let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
    if student_ids.is_empty() {
        return Ok(map);
    }

    let rows = StudentCourses::find()
        .filter(StudentCourseColumn::StudentId.is_in(student_ids.to_vec()))
        .order_by_asc(StudentCourseColumn::CourseId)
        .all(conn)
        .await?;
    for row in rows {
        map.entry(row.student_id).or_default().push(row.course_id);
    }
    Ok(map)
}

async fn into_student<C: ConnectionTrait>(conn: &C, model: Model) -> Result<Student> {
    let mut course_ids = load_course_ids(conn, &[model.id]).await?;
    let ids = course_ids.remove(&model.id).unwrap_or_default();
    Ok(model.into_student(ids))
}

/// 用给定的课程集合替换学生当前的选课
async fn replace_student_courses<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    course_ids: &[i64],
) -> Result<()> {
    let mut unique = course_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    if !unique.is_empty() {
        let found = Courses::find()
            .filter(CourseColumn::Id.is_in(unique.clone()))
            .count(conn)
            .await?;
        if found as usize != unique.len() {
            return Err(DeaneryError::not_found("Course(s) not found"));
        }
    }

    StudentCourses::delete_many()
        .filter(StudentCourseColumn::StudentId.eq(student_id))
        .exec(conn)
        .await?;

    for course_id in unique {
        StudentCourseActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
        }
        .insert(conn)
        .await
        .map_err(|e| {
            DeaneryError::database_operation(format!("Failed to link student course: {e}"))
        })?;
    }

    Ok(())
}

async fn ensure_group_exists<C: ConnectionTrait>(conn: &C, group_id: i64) -> Result<()> {
    if Groups::find_by_id(group_id).one(conn).await?.is_none() {
        return Err(DeaneryError::not_found(format!("Group {group_id} not found")));
    }
    Ok(())
}

// 用户必须存在，且不能已经绑定其他学生
async fn ensure_user_available<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    except_student: Option<i64>,
) -> Result<()> {
    if Users::find_by_id(user_id).one(conn).await?.is_none() {
        return Err(DeaneryError::not_found(format!("User {user_id} not found")));
    }

    let mut existing = Students::find().filter(Column::UserId.eq(user_id));
    if let Some(student_id) = except_student {
        existing = existing.filter(Column::Id.ne(student_id));
    }
    if existing.one(conn).await?.is_some() {
        return Err(DeaneryError::invalid_input(format!(
            "User {user_id} is already bound to a student"
        )));
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let txn = self.db.begin().await?;

        ensure_group_exists(&txn, req.group_id).await?;
        ensure_user_available(&txn, req.user_id, None).await?;

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            group_id: Set(req.group_id),
            user_id: Set(req.user_id),
            date_of_birth: Set(format_date(&req.date_of_birth)),
            order_number: Set(req.order_number),
            edebo_id: Set(req.edebo_id),
            is_full_time: Set(req.is_full_time),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| DeaneryError::database_operation(format!("Failed to create student: {e}")))?;

        replace_student_courses(&txn, model.id, req.course_ids.as_slice()).await?;
        let student = into_student(&txn, model).await?;

        txn.commit().await?;

        Ok(student)
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let model = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to query student: {e}")))?;

        match model {
            Some(model) => Ok(Some(into_student(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = page_and_size(query.page, query.size)?;

        let mut select = Students::find();

        if let Some(group_id) = query.group_id {
            select = select.filter(Column::GroupId.eq(group_id));
        }

        // 选修了指定课程的学生
        if let Some(course_id) = query.course_id {
            select = select.filter(
                Column::Id.in_subquery(
                    StudentCourses::find()
                        .select_only()
                        .column(StudentCourseColumn::StudentId)
                        .filter(StudentCourseColumn::CourseId.eq(course_id))
                        .into_query(),
                ),
            );
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::EdeboId.contains(&escaped))
                    .add(Column::OrderNumber.contains(&escaped)),
            );
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            DeaneryError::database_operation(format!("Failed to count students: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            DeaneryError::database_operation(format!("Failed to count student pages: {e}"))
        })?;
        let models = paginator.fetch_page(page - 1).await.map_err(|e| {
            DeaneryError::database_operation(format!("Failed to list students: {e}"))
        })?;

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut course_ids = load_course_ids(&self.db, &ids).await?;

        Ok(StudentListResponse {
            items: models
                .into_iter()
                .map(|m| {
                    let courses = course_ids.remove(&m.id).unwrap_or_default();
                    m.into_student(courses)
                })
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新学生
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let txn = self.db.begin().await?;

        if Students::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(group_id) = update.group_id {
            ensure_group_exists(&txn, group_id).await?;
            model.group_id = Set(group_id);
        }
        if let Some(user_id) = update.user_id {
            ensure_user_available(&txn, user_id, Some(id)).await?;
            model.user_id = Set(user_id);
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(format_date(&date_of_birth));
        }
        if let Some(order_number) = update.order_number {
            model.order_number = Set(order_number);
        }
        if let Some(edebo_id) = update.edebo_id {
            model.edebo_id = Set(edebo_id);
        }
        if let Some(is_full_time) = update.is_full_time {
            model.is_full_time = Set(is_full_time);
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to update student: {e}")))?;

        if let Some(course_ids) = update.course_ids {
            replace_student_courses(&txn, id, course_ids.as_slice()).await?;
        }

        let student = into_student(&txn, updated).await?;
        txn.commit().await?;

        Ok(Some(student))
    }

    /// 删除学生
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        let deleted = delete_students_cascade(&txn, &[id]).await?;
        txn.commit().await?;
        Ok(deleted > 0)
    }

    /// 学生所在学术组参与的投票
    pub async fn list_student_votes_impl(&self, student_id: i64) -> Result<Option<Vec<VoteDetail>>> {
        let Some(student) = Students::find_by_id(student_id).one(&self.db).await? else {
            return Ok(None);
        };

        let votes = Votes::find()
            .filter(
                VoteColumn::Id.in_subquery(
                    VoteGroups::find()
                        .select_only()
                        .column(VoteGroupColumn::VoteId)
                        .filter(VoteGroupColumn::GroupId.eq(student.group_id))
                        .into_query(),
                ),
            )
            .order_by_asc(VoteColumn::StartDate)
            .order_by_asc(VoteColumn::Id)
            .all(&self.db)
            .await?;

        Ok(Some(super::votes::load_vote_details(&self.db, votes).await?))
    }
}
