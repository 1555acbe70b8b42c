use super::{SeaOrmStorage, page_and_size};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{DeaneryError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            role: Set(req.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to create user: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = page_and_size(query.page, query.size)?;

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        select = select.order_by_asc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to count users: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to count user pages: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to list users: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(username) = update.username {
            model.username = Set(username);
        }

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to update user: {e}")))?;

        Ok(Some(result.into_user()))
    }

    /// 删除用户，其学生档案及依附数据一并删除；该用户经手的成绩历史保留
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        if Users::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(false);
        }

        let student_ids: Vec<i64> = Students::find()
            .select_only()
            .column(StudentColumn::Id)
            .filter(StudentColumn::UserId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;
        super::students::delete_students_cascade(&txn, &student_ids).await?;

        let result = Users::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to delete user: {e}")))?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
