//! 投票的查询构造与事务写入
//!
//! 列表查询按条件动态拼接：标量字段用等值过滤，ID 列表字段用子查询做集合匹配
//! （投票只要有一个关联项落在列表中即命中），排序列只接受白名单中的列。
//! 每行结果都带完整的关联列表，以及按关联学术组统计出的学生数。

use std::collections::{BTreeSet, HashMap};

use super::{SeaOrmStorage, page_and_size};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses, Model as CourseModel};
use crate::entity::groups::{Column as GroupColumn, Entity as Groups, Model as GroupModel};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::vote_groups::{
    ActiveModel as VoteGroupActiveModel, Column as VoteGroupColumn, Entity as VoteGroups,
};
use crate::entity::vote_not_required_courses::{
    ActiveModel as VoteNotRequiredActiveModel, Column as VoteNotRequiredColumn,
    Entity as VoteNotRequiredCourses,
};
use crate::entity::vote_required_courses::{
    ActiveModel as VoteRequiredActiveModel, Column as VoteRequiredColumn,
    Entity as VoteRequiredCourses,
};
use crate::entity::votes::{ActiveModel, Column, Entity as Votes, Model};
use crate::errors::{DeaneryError, Result};
use crate::models::{
    PaginationInfo,
    votes::{
        entities::{SortOrder, VoteOrderColumn},
        requests::{CreateVoteRequest, UpdateVoteRequest, VoteListQuery},
        responses::{VoteCourse, VoteDetail, VoteGroup, VoteListResponse},
    },
};
use crate::utils::dates::{ensure_date_range, format_date, parse_date};
use crate::utils::validate::Validate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, TransactionTrait,
};
use tracing::debug;

/// 按 ID 解析学术组，数量不一致即视为有 ID 不存在（重复 ID 同样不通过）
async fn resolve_groups<C: ConnectionTrait>(conn: &C, ids: &[i64]) -> Result<Vec<GroupModel>> {
    let groups = Groups::find()
        .filter(GroupColumn::Id.is_in(ids.to_vec()))
        .order_by_asc(GroupColumn::Id)
        .all(conn)
        .await?;
    if groups.len() != ids.len() {
        return Err(DeaneryError::not_found("Group(s) not found"));
    }
    Ok(groups)
}

async fn resolve_courses<C: ConnectionTrait>(
    conn: &C,
    ids: &[i64],
    what: &str,
) -> Result<Vec<CourseModel>> {
    let courses = Courses::find()
        .filter(CourseColumn::Id.is_in(ids.to_vec()))
        .order_by_asc(CourseColumn::Id)
        .all(conn)
        .await?;
    if courses.len() != ids.len() {
        return Err(DeaneryError::not_found(format!("{what} not found")));
    }
    Ok(courses)
}

fn ensure_course_sets(required: &[i64], not_required: &[i64]) -> Result<()> {
    if required.is_empty() || not_required.is_empty() {
        return Err(DeaneryError::invalid_input(
            "Both required and not required course lists must be non-empty",
        ));
    }
    Ok(())
}

async fn replace_vote_groups<C: ConnectionTrait>(
    conn: &C,
    vote_id: i64,
    groups: &[GroupModel],
) -> Result<()> {
    VoteGroups::delete_many()
        .filter(VoteGroupColumn::VoteId.eq(vote_id))
        .exec(conn)
        .await?;
    for group in groups {
        VoteGroupActiveModel {
            vote_id: Set(vote_id),
            group_id: Set(group.id),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

async fn replace_required_courses<C: ConnectionTrait>(
    conn: &C,
    vote_id: i64,
    courses: &[CourseModel],
) -> Result<()> {
    VoteRequiredCourses::delete_many()
        .filter(VoteRequiredColumn::VoteId.eq(vote_id))
        .exec(conn)
        .await?;
    for course in courses {
        VoteRequiredActiveModel {
            vote_id: Set(vote_id),
            course_id: Set(course.id),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

async fn replace_not_required_courses<C: ConnectionTrait>(
    conn: &C,
    vote_id: i64,
    courses: &[CourseModel],
) -> Result<()> {
    VoteNotRequiredCourses::delete_many()
        .filter(VoteNotRequiredColumn::VoteId.eq(vote_id))
        .exec(conn)
        .await?;
    for course in courses {
        VoteNotRequiredActiveModel {
            vote_id: Set(vote_id),
            course_id: Set(course.id),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

/// 批量补齐投票的关联数据和学生数，结果顺序与输入一致
pub(crate) async fn load_vote_details<C: ConnectionTrait>(
    conn: &C,
    votes: Vec<Model>,
) -> Result<Vec<VoteDetail>> {
    if votes.is_empty() {
        return Ok(Vec::new());
    }
    let vote_ids: Vec<i64> = votes.iter().map(|v| v.id).collect();

    let group_links = VoteGroups::find()
        .filter(VoteGroupColumn::VoteId.is_in(vote_ids.clone()))
        .all(conn)
        .await?;
    let required_links = VoteRequiredCourses::find()
        .filter(VoteRequiredColumn::VoteId.is_in(vote_ids.clone()))
        .all(conn)
        .await?;
    let not_required_links = VoteNotRequiredCourses::find()
        .filter(VoteNotRequiredColumn::VoteId.is_in(vote_ids))
        .all(conn)
        .await?;

    let group_ids: BTreeSet<i64> = group_links.iter().map(|l| l.group_id).collect();
    let course_ids: BTreeSet<i64> = required_links
        .iter()
        .map(|l| l.course_id)
        .chain(not_required_links.iter().map(|l| l.course_id))
        .collect();

    let group_names: HashMap<i64, String> = if group_ids.is_empty() {
        HashMap::new()
    } else {
        Groups::find()
            .filter(GroupColumn::Id.is_in(group_ids.iter().copied()))
            .all(conn)
            .await?
            .into_iter()
            .map(|g| (g.id, g.name))
            .collect()
    };
    let course_names: HashMap<i64, String> = if course_ids.is_empty() {
        HashMap::new()
    } else {
        Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids.iter().copied()))
            .all(conn)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect()
    };

    // 每个学生只属于一个学术组，按组计数后求和即为去重后的学生数
    let student_counts: HashMap<i64, i64> = if group_ids.is_empty() {
        HashMap::new()
    } else {
        Students::find()
            .select_only()
            .column(StudentColumn::GroupId)
            .column_as(StudentColumn::Id.count(), "count")
            .filter(StudentColumn::GroupId.is_in(group_ids.iter().copied()))
            .group_by(StudentColumn::GroupId)
            .into_tuple::<(i64, i64)>()
            .all(conn)
            .await?
            .into_iter()
            .collect()
    };

    let mut groups_by_vote: HashMap<i64, BTreeSet<i64>> = HashMap::new();
    for link in group_links {
        groups_by_vote
            .entry(link.vote_id)
            .or_default()
            .insert(link.group_id);
    }
    let mut required_by_vote: HashMap<i64, BTreeSet<i64>> = HashMap::new();
    for link in required_links {
        required_by_vote
            .entry(link.vote_id)
            .or_default()
            .insert(link.course_id);
    }
    let mut not_required_by_vote: HashMap<i64, BTreeSet<i64>> = HashMap::new();
    for link in not_required_links {
        not_required_by_vote
            .entry(link.vote_id)
            .or_default()
            .insert(link.course_id);
    }

    let to_courses = |ids: Option<BTreeSet<i64>>| -> Vec<VoteCourse> {
        ids.unwrap_or_default()
            .into_iter()
            .filter_map(|id| {
                course_names.get(&id).map(|name| VoteCourse {
                    id,
                    name: name.clone(),
                })
            })
            .collect()
    };

    let details = votes
        .into_iter()
        .map(|model| {
            let group_ids = groups_by_vote.remove(&model.id).unwrap_or_default();
            let all_students: i64 = group_ids
                .iter()
                .map(|id| student_counts.get(id).copied().unwrap_or(0))
                .sum();
            let groups: Vec<VoteGroup> = group_ids
                .into_iter()
                .filter_map(|id| {
                    group_names.get(&id).map(|name| VoteGroup {
                        id,
                        name: name.clone(),
                    })
                })
                .collect();
            let required_courses = to_courses(required_by_vote.remove(&model.id));
            let not_required_courses = to_courses(not_required_by_vote.remove(&model.id));

            let vote = model.into_vote();
            VoteDetail {
                id: vote.id,
                name: vote.name,
                start_date: vote.start_date,
                end_date: vote.end_date,
                created_by: vote.created_by,
                created_at: vote.created_at,
                updated_at: vote.updated_at,
                groups,
                required_courses,
                not_required_courses,
                all_students,
            }
        })
        .collect();

    Ok(details)
}

async fn load_vote_detail<C: ConnectionTrait>(conn: &C, model: Model) -> Result<VoteDetail> {
    load_vote_details(conn, vec![model])
        .await?
        .pop()
        .ok_or_else(|| DeaneryError::database_operation("Failed to load vote details"))
}

impl SeaOrmStorage {
    /// 创建投票
    ///
    /// 顺序：日期区间 -> 请求体校验 -> 事务内依次解析学术组、必修课、选修课 -> 写入。
    /// 任一步失败都不会留下任何数据。
    pub async fn create_vote_impl(
        &self,
        req: CreateVoteRequest,
        created_by: Option<i64>,
    ) -> Result<VoteDetail> {
        ensure_date_range(&req.start_date, &req.end_date)?;
        req.check()?;

        let txn = self.db.begin().await?;

        let groups = resolve_groups(&txn, req.groups.as_slice()).await?;
        ensure_course_sets(
            req.required_courses.as_slice(),
            req.not_required_courses.as_slice(),
        )?;
        let required =
            resolve_courses(&txn, req.required_courses.as_slice(), "Required course(s)").await?;
        let not_required = resolve_courses(
            &txn,
            req.not_required_courses.as_slice(),
            "Not required course(s)",
        )
        .await?;

        let now = chrono::Utc::now().timestamp();
        let vote = ActiveModel {
            name: Set(req.name.trim().to_string()),
            start_date: Set(format_date(&req.start_date)),
            end_date: Set(format_date(&req.end_date)),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| DeaneryError::database_operation(format!("Failed to create vote: {e}")))?;

        replace_vote_groups(&txn, vote.id, &groups).await?;
        replace_required_courses(&txn, vote.id, &required).await?;
        replace_not_required_courses(&txn, vote.id, &not_required).await?;

        let detail = load_vote_detail(&txn, vote).await?;
        txn.commit().await?;

        debug!(
            "Created vote {} with {} group(s), {} required and {} not required course(s)",
            detail.id,
            detail.groups.len(),
            detail.required_courses.len(),
            detail.not_required_courses.len()
        );

        Ok(detail)
    }

    pub async fn get_vote_by_id_impl(&self, id: i64) -> Result<Option<VoteDetail>> {
        let model = Votes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to query vote: {e}")))?;

        match model {
            Some(model) => Ok(Some(load_vote_detail(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出投票
    pub async fn list_votes_with_pagination_impl(
        &self,
        query: VoteListQuery,
    ) -> Result<VoteListResponse> {
        let (page, size) = page_and_size(query.page, query.size)?;

        let mut select = Votes::find();

        if let Some(ref name) = query.name {
            select = select.filter(Column::Name.eq(name.as_str()));
        }
        if let Some(start_date) = query.start_date {
            select = select.filter(Column::StartDate.eq(format_date(&start_date)));
        }
        if let Some(end_date) = query.end_date {
            select = select.filter(Column::EndDate.eq(format_date(&end_date)));
        }

        if let Some(group_ids) = query.groups {
            select = select.filter(
                Column::Id.in_subquery(
                    VoteGroups::find()
                        .select_only()
                        .column(VoteGroupColumn::VoteId)
                        .filter(VoteGroupColumn::GroupId.is_in(group_ids))
                        .into_query(),
                ),
            );
        }
        if let Some(course_ids) = query.required_courses {
            select = select.filter(
                Column::Id.in_subquery(
                    VoteRequiredCourses::find()
                        .select_only()
                        .column(VoteRequiredColumn::VoteId)
                        .filter(VoteRequiredColumn::CourseId.is_in(course_ids))
                        .into_query(),
                ),
            );
        }
        if let Some(course_ids) = query.not_required_courses {
            select = select.filter(
                Column::Id.in_subquery(
                    VoteNotRequiredCourses::find()
                        .select_only()
                        .column(VoteNotRequiredColumn::VoteId)
                        .filter(VoteNotRequiredColumn::CourseId.is_in(course_ids))
                        .into_query(),
                ),
            );
        }

        let order = match query.order_by {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        let column = match query.order_by_column {
            VoteOrderColumn::Id => Column::Id,
            VoteOrderColumn::Name => Column::Name,
            VoteOrderColumn::StartDate => Column::StartDate,
            VoteOrderColumn::EndDate => Column::EndDate,
        };
        select = select.order_by(column, order);
        if query.order_by_column != VoteOrderColumn::Id {
            // 保证分页稳定
            select = select.order_by_asc(Column::Id);
        }

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to count votes: {e}")))?;
        let pages = paginator.num_pages().await.map_err(|e| {
            DeaneryError::database_operation(format!("Failed to count vote pages: {e}"))
        })?;
        let votes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to list votes: {e}")))?;

        Ok(VoteListResponse {
            items: load_vote_details(&self.db, votes).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 部分更新投票，日期区间按合并后的值校验
    pub async fn update_vote_impl(
        &self,
        id: i64,
        update: UpdateVoteRequest,
    ) -> Result<Option<VoteDetail>> {
        if let (Some(start), Some(end)) = (&update.start_date, &update.end_date) {
            ensure_date_range(start, end)?;
        }
        update.check()?;

        let txn = self.db.begin().await?;

        let Some(existing) = Votes::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let start_date = match update.start_date {
            Some(date) => date,
            None => parse_date(&existing.start_date)?,
        };
        let end_date = match update.end_date {
            Some(date) => date,
            None => parse_date(&existing.end_date)?,
        };
        ensure_date_range(&start_date, &end_date)?;

        if let Some(ref group_ids) = update.groups {
            let groups = resolve_groups(&txn, group_ids.as_slice()).await?;
            replace_vote_groups(&txn, id, &groups).await?;
        }
        if let Some(ref course_ids) = update.required_courses {
            if course_ids.is_empty() {
                return Err(DeaneryError::invalid_input(
                    "Required course list must be non-empty",
                ));
            }
            let courses =
                resolve_courses(&txn, course_ids.as_slice(), "Required course(s)").await?;
            replace_required_courses(&txn, id, &courses).await?;
        }
        if let Some(ref course_ids) = update.not_required_courses {
            if course_ids.is_empty() {
                return Err(DeaneryError::invalid_input(
                    "Not required course list must be non-empty",
                ));
            }
            let courses =
                resolve_courses(&txn, course_ids.as_slice(), "Not required course(s)").await?;
            replace_not_required_courses(&txn, id, &courses).await?;
        }

        let mut model = ActiveModel {
            id: Set(id),
            start_date: Set(format_date(&start_date)),
            end_date: Set(format_date(&end_date)),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to update vote: {e}")))?;

        let detail = load_vote_detail(&txn, updated).await?;
        txn.commit().await?;

        Ok(Some(detail))
    }

    /// 删除投票及其全部关联
    pub async fn delete_vote_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        if Votes::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(false);
        }

        VoteGroups::delete_many()
            .filter(VoteGroupColumn::VoteId.eq(id))
            .exec(&txn)
            .await?;
        VoteRequiredCourses::delete_many()
            .filter(VoteRequiredColumn::VoteId.eq(id))
            .exec(&txn)
            .await?;
        VoteNotRequiredCourses::delete_many()
            .filter(VoteNotRequiredColumn::VoteId.eq(id))
            .exec(&txn)
            .await?;

        let result = Votes::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| DeaneryError::database_operation(format!("Failed to delete vote: {e}")))?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
