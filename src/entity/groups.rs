//! 学术组实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
    #[sea_orm(has_many = "super::vote_groups::Entity")]
    VoteGroups,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::vote_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoteGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_group(self) -> crate::models::groups::entities::Group {
        use crate::models::groups::entities::Group;
        use chrono::{DateTime, Utc};

        Group {
            id: self.id,
            name: self.name,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
