//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub group_id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    // YYYY-MM-DD
    pub date_of_birth: String,
    pub order_number: String,
    pub edebo_id: String,
    pub is_full_time: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Group,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
    #[sea_orm(has_many = "super::grades_history::Entity")]
    GradesHistory,
    #[sea_orm(has_many = "super::student_courses::Entity")]
    StudentCourses,
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl Related<super::grades_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradesHistory.def()
    }
}

impl Related<super::student_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 课程列表单独存放在 student_courses 中，由存储层补齐
    pub fn into_student(self, course_ids: Vec<i64>) -> crate::models::students::entities::Student {
        use crate::models::students::entities::Student;
        use crate::utils::dates::parse_date;
        use chrono::{DateTime, Utc};

        Student {
            id: self.id,
            group_id: self.group_id,
            user_id: self.user_id,
            date_of_birth: parse_date(&self.date_of_birth).unwrap_or_default(),
            order_number: self.order_number,
            edebo_id: self.edebo_id,
            is_full_time: self.is_full_time,
            course_ids,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
