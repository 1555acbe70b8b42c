//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 多步写操作（存在性检查 + 写入、级联删除）都在同一个事务中完成。

mod courses;
mod grades;
mod grades_history;
mod groups;
mod students;
mod users;
mod votes;

use crate::config::AppConfig;
use crate::errors::{DeaneryError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(storage)
    }

    /// 使用已有连接创建存储实例并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Migration failed: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| DeaneryError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| DeaneryError::database_connection(format!("SQLite connection failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| DeaneryError::database_connection(format!("Cannot connect to database: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(DeaneryError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

/// 分页参数归一化：page >= 1，size 限制在 1..=100
///
/// 偏移量 `(page - 1) * size` 必须能放进数据库的 i64 OFFSET，否则视为非法输入。
pub(crate) fn page_and_size(page: Option<i64>, size: Option<i64>) -> Result<(u64, u64)> {
    let page = page.unwrap_or(1).max(1);
    let size = size.unwrap_or(10).clamp(1, 100);

    if (page - 1).checked_mul(size).is_none() {
        return Err(DeaneryError::invalid_input(format!(
            "Page {page} is out of range for page size {size}"
        )));
    }

    Ok((page as u64, size as u64))
}

// Storage trait 实现
use crate::models::{
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::{GradeListResponse, GradeUpdateResponse},
    },
    grades_history::{
        entities::GradeHistory,
        requests::{CreateGradeHistoryRequest, GradeHistoryListQuery},
        responses::GradeHistoryListResponse,
    },
    groups::{
        entities::Group,
        requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
        responses::GroupListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
    votes::{
        requests::{CreateVoteRequest, UpdateVoteRequest, VoteListQuery},
        responses::{VoteDetail, VoteListResponse},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    // 学术组模块
    async fn create_group(&self, group: CreateGroupRequest) -> Result<Group> {
        self.create_group_impl(group).await
    }

    async fn get_group_by_id(&self, id: i64) -> Result<Option<Group>> {
        self.get_group_by_id_impl(id).await
    }

    async fn get_group_by_name(&self, name: &str) -> Result<Option<Group>> {
        self.get_group_by_name_impl(name).await
    }

    async fn list_groups_with_pagination(
        &self,
        query: GroupListQuery,
    ) -> Result<GroupListResponse> {
        self.list_groups_with_pagination_impl(query).await
    }

    async fn update_group(&self, id: i64, update: UpdateGroupRequest) -> Result<Option<Group>> {
        self.update_group_impl(id, update).await
    }

    async fn delete_group(&self, id: i64) -> Result<bool> {
        self.delete_group_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn list_student_votes(&self, student_id: i64) -> Result<Option<Vec<VoteDetail>>> {
        self.list_student_votes_impl(student_id).await
    }

    // 成绩模块
    async fn create_grade(&self, grade: CreateGradeRequest) -> Result<Grade> {
        self.create_grade_impl(grade).await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn update_grade(
        &self,
        id: i64,
        update: UpdateGradeRequest,
        user_changed_id: i64,
    ) -> Result<Option<GradeUpdateResponse>> {
        self.update_grade_impl(id, update, user_changed_id).await
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    // 成绩历史模块
    async fn create_grade_history(
        &self,
        history: CreateGradeHistoryRequest,
    ) -> Result<GradeHistory> {
        self.create_grade_history_impl(history).await
    }

    async fn list_grade_history_with_pagination(
        &self,
        query: GradeHistoryListQuery,
    ) -> Result<GradeHistoryListResponse> {
        self.list_grade_history_with_pagination_impl(query).await
    }

    // 投票模块
    async fn create_vote(
        &self,
        vote: CreateVoteRequest,
        created_by: Option<i64>,
    ) -> Result<VoteDetail> {
        self.create_vote_impl(vote, created_by).await
    }

    async fn get_vote_by_id(&self, id: i64) -> Result<Option<VoteDetail>> {
        self.get_vote_by_id_impl(id).await
    }

    async fn list_votes_with_pagination(&self, query: VoteListQuery) -> Result<VoteListResponse> {
        self.list_votes_with_pagination_impl(query).await
    }

    async fn update_vote(&self, id: i64, update: UpdateVoteRequest) -> Result<Option<VoteDetail>> {
        self.update_vote_impl(id, update).await
    }

    async fn delete_vote(&self, id: i64) -> Result<bool> {
        self.delete_vote_impl(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_and_size_defaults() {
        assert_eq!(page_and_size(None, None).unwrap(), (1, 10));
        assert_eq!(page_and_size(Some(0), Some(0)).unwrap(), (1, 1));
        assert_eq!(page_and_size(Some(-3), Some(500)).unwrap(), (1, 100));
    }

    #[test]
    fn test_page_and_size_rejects_overflowing_offset() {
        let err = page_and_size(Some(i64::MAX), Some(100)).unwrap_err();
        assert!(matches!(err, DeaneryError::InvalidInput(_)));

        // size 为 1 时任何正页码都不会溢出
        assert_eq!(
            page_and_size(Some(i64::MAX), Some(1)).unwrap(),
            (i64::MAX as u64, 1)
        );
    }
}
