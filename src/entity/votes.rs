//! 投票实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    // YYYY-MM-DD，字典序即时间序
    pub start_date: String,
    pub end_date: String,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vote_groups::Entity")]
    VoteGroups,
    #[sea_orm(has_many = "super::vote_required_courses::Entity")]
    VoteRequiredCourses,
    #[sea_orm(has_many = "super::vote_not_required_courses::Entity")]
    VoteNotRequiredCourses,
}

impl Related<super::vote_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoteGroups.def()
    }
}

impl Related<super::vote_required_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoteRequiredCourses.def()
    }
}

impl Related<super::vote_not_required_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoteNotRequiredCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_vote(self) -> crate::models::votes::entities::Vote {
        use crate::models::votes::entities::Vote;
        use crate::utils::dates::parse_date;
        use chrono::{DateTime, Utc};

        Vote {
            id: self.id,
            name: self.name,
            start_date: parse_date(&self.start_date).unwrap_or_default(),
            end_date: parse_date(&self.end_date).unwrap_or_default(),
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
