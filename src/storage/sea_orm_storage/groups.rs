use super::{SeaOrmStorage, page_and_size};
use crate::entity::groups::{ActiveModel, Column, Entity as Groups};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::vote_groups::{Column as VoteGroupColumn, Entity as VoteGroups};
use crate::errors::{DeaneryError, Result};
use crate::models::{
    PaginationInfo,
    groups::{
        entities::Group,
        requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
        responses::GroupListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 创建学术组
    pub async fn create_group_impl(&self, req: CreateGroupRequest) -> Result<Group> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to create group: {e}")))?;

        Ok(result.into_group())
    }

    pub async fn get_group_by_id_impl(&self, id: i64) -> Result<Option<Group>> {
        let result = Groups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to query group: {e}")))?;

        Ok(result.map(|m| m.into_group()))
    }

    pub async fn get_group_by_name_impl(&self, name: &str) -> Result<Option<Group>> {
        let result = Groups::find()
            .filter(Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to query group: {e}")))?;

        Ok(result.map(|m| m.into_group()))
    }

    /// 分页列出学术组
    pub async fn list_groups_with_pagination_impl(
        &self,
        query: GroupListQuery,
    ) -> Result<GroupListResponse> {
        let (page, size) = page_and_size(query.page, query.size)?;

        let mut select = Groups::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        select = select.order_by_asc(Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to count groups: {e}")))?;
        let pages = paginator.num_pages().await.map_err(|e| {
            DeaneryError::database_operation(format!("Failed to count group pages: {e}"))
        })?;
        let groups = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to list groups: {e}")))?;

        Ok(GroupListResponse {
            items: groups.into_iter().map(|m| m.into_group()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新学术组
    pub async fn update_group_impl(
        &self,
        id: i64,
        update: UpdateGroupRequest,
    ) -> Result<Option<Group>> {
        if self.get_group_by_id_impl(id).await?.is_none() {
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
            .map_err(|e| DeaneryError::database_operation(format!("Failed to update group: {e}")))?;

        Ok(Some(result.into_group()))
    }

    /// 删除学术组：先删组内学生（及其成绩、历史、选课），再删投票关联，最后删组
    pub async fn delete_group_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        if Groups::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(false);
        }

        let student_ids: Vec<i64> = Students::find()
            .select_only()
            .column(StudentColumn::Id)
            .filter(StudentColumn::GroupId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;
        let removed = super::students::delete_students_cascade(&txn, &student_ids).await?;

        VoteGroups::delete_many()
            .filter(VoteGroupColumn::GroupId.eq(id))
            .exec(&txn)
            .await?;

        let result = Groups::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to delete group: {e}")))?;

        txn.commit().await?;
        debug!("Deleted group {} with {} student(s)", id, removed);

        Ok(result.rows_affected > 0)
    }
}
