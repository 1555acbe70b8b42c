use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户（连同其学生档案）
    async fn delete_user(&self, id: i64) -> Result<bool>;

    /// 学术组管理方法
    async fn create_group(&self, group: CreateGroupRequest) -> Result<Group>;
    async fn get_group_by_id(&self, id: i64) -> Result<Option<Group>>;
    async fn get_group_by_name(&self, name: &str) -> Result<Option<Group>>;
    async fn list_groups_with_pagination(&self, query: GroupListQuery)
    -> Result<GroupListResponse>;
    async fn update_group(&self, id: i64, update: UpdateGroupRequest) -> Result<Option<Group>>;
    // 删除学术组（连同组内学生及投票关联）
    async fn delete_group(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest)
    -> Result<Option<Course>>;
    // 删除课程（连同成绩、历史、选课及投票关联）
    async fn delete_course(&self, id: i64) -> Result<bool>;

    /// 学生管理方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 学生所在学术组参与的投票
    async fn list_student_votes(&self, student_id: i64) -> Result<Option<Vec<VoteDetail>>>;

    /// 成绩管理方法
    async fn create_grade(&self, grade: CreateGradeRequest) -> Result<Grade>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
    // 修改成绩并追加一条历史记录
    async fn update_grade(
        &self,
        id: i64,
        update: UpdateGradeRequest,
        user_changed_id: i64,
    ) -> Result<Option<GradeUpdateResponse>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;

    /// 成绩历史方法（只追加）
    async fn create_grade_history(&self, history: CreateGradeHistoryRequest)
    -> Result<GradeHistory>;
    async fn list_grade_history_with_pagination(
        &self,
        query: GradeHistoryListQuery,
    ) -> Result<GradeHistoryListResponse>;

    /// 投票管理方法
    async fn create_vote(&self, vote: CreateVoteRequest, created_by: Option<i64>)
    -> Result<VoteDetail>;
    async fn get_vote_by_id(&self, id: i64) -> Result<Option<VoteDetail>>;
    async fn list_votes_with_pagination(&self, query: VoteListQuery) -> Result<VoteListResponse>;
    async fn update_vote(&self, id: i64, update: UpdateVoteRequest) -> Result<Option<VoteDetail>>;
    async fn delete_vote(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
