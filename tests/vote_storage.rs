mod common;

use common::{date, make_course, make_group, make_student, memory_storage, vote_request};
use rust_deanery::errors::DeaneryError;
use rust_deanery::models::common::{IdList, PaginationQuery};
use rust_deanery::models::votes::entities::{SortOrder, VoteOrderColumn};
use rust_deanery::models::votes::requests::{UpdateVoteRequest, VoteListParams, VoteListQuery};
use rust_deanery::storage::Storage;

fn ids<T>(items: &[T], id: impl Fn(&T) -> i64) -> Vec<i64> {
    items.iter().map(id).collect()
}

#[tokio::test]
async fn test_create_vote_returns_resolved_associations() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;
    make_student(&storage, "alice", group.id, vec![]).await;
    make_student(&storage, "bob", group.id, vec![]).await;

    let vote = storage
        .create_vote(
            vote_request("Midterm Pick", vec![group.id], vec![algebra.id], vec![poetry.id]),
            None,
        )
        .await
        .unwrap();

    assert_eq!(vote.name, "Midterm Pick");
    assert_eq!(vote.start_date, date(2024, 1, 1));
    assert_eq!(vote.end_date, date(2024, 1, 10));
    assert_eq!(ids(&vote.groups, |g| g.id), vec![group.id]);
    assert_eq!(vote.groups[0].name, "KN-21");
    assert_eq!(ids(&vote.required_courses, |c| c.id), vec![algebra.id]);
    assert_eq!(ids(&vote.not_required_courses, |c| c.id), vec![poetry.id]);
    assert_eq!(vote.all_students, 2);
    assert_eq!(vote.created_by, None);

    let fetched = storage.get_vote_by_id(vote.id).await.unwrap().unwrap();
    assert_eq!(fetched.groups, vote.groups);
    assert_eq!(fetched.required_courses, vote.required_courses);
    assert_eq!(fetched.not_required_courses, vote.not_required_courses);
}

#[tokio::test]
async fn test_reversed_date_range_is_invalid_input_before_anything_else() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;

    let mut request = vote_request("Midterm Pick", vec![group.id], vec![algebra.id], vec![poetry.id]);
    request.end_date = date(2023, 12, 31);
    let err = storage.create_vote(request, None).await.unwrap_err();
    assert!(matches!(err, DeaneryError::InvalidInput(_)), "{err:?}");

    // 其余字段同样无效时，仍然先报日期错误
    let mut request = vote_request("", vec![999], vec![], vec![]);
    request.end_date = date(2023, 12, 31);
    let err = storage.create_vote(request, None).await.unwrap_err();
    assert!(matches!(err, DeaneryError::InvalidInput(_)), "{err:?}");

    let listed = storage
        .list_votes_with_pagination(VoteListQuery::default())
        .await
        .unwrap();
    assert_eq!(listed.pagination.total, 0);
}

#[tokio::test]
async fn test_missing_group_is_not_found_and_writes_nothing() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;

    let err = storage
        .create_vote(
            vote_request("Pick", vec![group.id, 999], vec![algebra.id], vec![poetry.id]),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DeaneryError::NotFound(_)), "{err:?}");

    let listed = storage
        .list_votes_with_pagination(VoteListQuery::default())
        .await
        .unwrap();
    assert!(listed.items.is_empty());
}

#[tokio::test]
async fn test_vote_creation_checks() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;

    // 空名称、空学术组
    let err = storage
        .create_vote(vote_request("  ", vec![], vec![algebra.id], vec![poetry.id]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DeaneryError::Validation(_)), "{err:?}");

    // 课程列表为空
    let err = storage
        .create_vote(vote_request("Pick", vec![group.id], vec![algebra.id], vec![]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DeaneryError::InvalidInput(_)), "{err:?}");

    // 选修课按自己的 ID 列表解析
    let err = storage
        .create_vote(vote_request("Pick", vec![group.id], vec![algebra.id], vec![404]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DeaneryError::NotFound(_)), "{err:?}");

    // 重复的学术组 ID 不去重
    let err = storage
        .create_vote(
            vote_request("Pick", vec![group.id, group.id], vec![algebra.id], vec![poetry.id]),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DeaneryError::NotFound(_)), "{err:?}");
}

#[tokio::test]
async fn test_list_without_filters_and_group_filter() {
    let storage = memory_storage().await;
    let first = make_group(&storage, "KN-21").await;
    let second = make_group(&storage, "KN-22").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;
    make_student(&storage, "alice", first.id, vec![]).await;
    make_student(&storage, "bob", second.id, vec![]).await;
    make_student(&storage, "carol", second.id, vec![]).await;

    let a = storage
        .create_vote(vote_request("A", vec![first.id], vec![algebra.id], vec![poetry.id]), None)
        .await
        .unwrap();
    let b = storage
        .create_vote(
            vote_request("B", vec![first.id, second.id], vec![algebra.id], vec![poetry.id]),
            None,
        )
        .await
        .unwrap();
    let c = storage
        .create_vote(vote_request("C", vec![second.id], vec![poetry.id], vec![algebra.id]), None)
        .await
        .unwrap();

    let all = storage
        .list_votes_with_pagination(VoteListQuery::default())
        .await
        .unwrap();
    assert_eq!(ids(&all.items, |v| v.id), vec![a.id, b.id, c.id]);
    assert!(all.items.iter().all(|v| v.all_students >= 0));
    assert_eq!(all.items[1].all_students, 3);

    let only_first = storage
        .list_votes_with_pagination(VoteListQuery {
            groups: Some(vec![first.id]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&only_first.items, |v| v.id), vec![a.id, b.id]);
    // 命中的投票仍然带着完整的学术组列表
    assert_eq!(only_first.items[1].groups.len(), 2);

    let by_required = storage
        .list_votes_with_pagination(VoteListQuery {
            required_courses: Some(vec![poetry.id]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&by_required.items, |v| v.id), vec![c.id]);

    let by_name = storage
        .list_votes_with_pagination(VoteListQuery {
            name: Some("B".to_string()),
            groups: Some(vec![second.id]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&by_name.items, |v| v.id), vec![b.id]);
}

#[tokio::test]
async fn test_list_order_and_pagination() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;

    for name in ["beta", "alpha", "gamma"] {
        storage
            .create_vote(vote_request(name, vec![group.id], vec![algebra.id], vec![poetry.id]), None)
            .await
            .unwrap();
    }

    let params = VoteListParams {
        pagination: PaginationQuery { page: 1, size: 2 },
        name: None,
        start_date: None,
        end_date: None,
        groups: None,
        required_courses: None,
        not_required_courses: None,
        order_by_column: Some("name".to_string()),
        order_by: Some("desc".to_string()),
    };
    let query = VoteListQuery::try_from(params).unwrap();
    assert_eq!(query.order_by_column, VoteOrderColumn::Name);
    assert_eq!(query.order_by, SortOrder::Desc);

    let page = storage.list_votes_with_pagination(query).await.unwrap();
    let names: Vec<&str> = page.items.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["gamma", "beta"]);
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);
}

#[tokio::test]
async fn test_update_and_delete_vote() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let other = make_group(&storage, "KN-22").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;

    let vote = storage
        .create_vote(vote_request("Pick", vec![group.id], vec![algebra.id], vec![poetry.id]), Some(7))
        .await
        .unwrap();
    assert_eq!(vote.created_by, Some(7));

    // 合并后的起始日期晚于原结束日期
    let err = storage
        .update_vote(
            vote.id,
            UpdateVoteRequest {
                start_date: Some(date(2024, 2, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DeaneryError::InvalidInput(_)), "{err:?}");

    let updated = storage
        .update_vote(
            vote.id,
            UpdateVoteRequest {
                name: Some("Final Pick".to_string()),
                groups: Some(IdList(vec![other.id])),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Final Pick");
    assert_eq!(ids(&updated.groups, |g| g.id), vec![other.id]);
    assert_eq!(ids(&updated.required_courses, |c| c.id), vec![algebra.id]);

    assert!(
        storage
            .update_vote(999, UpdateVoteRequest::default())
            .await
            .unwrap()
            .is_none()
    );

    assert!(storage.delete_vote(vote.id).await.unwrap());
    assert!(!storage.delete_vote(vote.id).await.unwrap());
    assert!(storage.get_vote_by_id(vote.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_student_votes_follow_group() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let other = make_group(&storage, "KN-22").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;
    let student = make_student(&storage, "alice", group.id, vec![algebra.id]).await;

    let mine = storage
        .create_vote(vote_request("Mine", vec![group.id], vec![algebra.id], vec![poetry.id]), None)
        .await
        .unwrap();
    storage
        .create_vote(vote_request("Theirs", vec![other.id], vec![algebra.id], vec![poetry.id]), None)
        .await
        .unwrap();

    let votes = storage.list_student_votes(student.id).await.unwrap().unwrap();
    assert_eq!(ids(&votes, |v| v.id), vec![mine.id]);
    assert!(storage.list_student_votes(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_date_and_not_required_filters() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;
    let physics = make_course(&storage, "Physics").await;

    let mut request = vote_request("Winter", vec![group.id], vec![algebra.id], vec![poetry.id]);
    request.start_date = date(2024, 1, 1);
    request.end_date = date(2024, 1, 10);
    let winter = storage.create_vote(request, None).await.unwrap();

    let mut request = vote_request("Spring", vec![group.id], vec![algebra.id], vec![physics.id]);
    request.start_date = date(2024, 3, 1);
    request.end_date = date(2024, 3, 15);
    let spring = storage.create_vote(request, None).await.unwrap();

    let mut request = vote_request(
        "Summer",
        vec![group.id],
        vec![algebra.id],
        vec![poetry.id, physics.id],
    );
    request.start_date = date(2024, 1, 1);
    request.end_date = date(2024, 3, 15);
    let summer = storage.create_vote(request, None).await.unwrap();

    let list = |query: VoteListQuery| {
        let storage = storage.clone();
        async move {
            let page = storage.list_votes_with_pagination(query).await.unwrap();
            ids(&page.items, |v| v.id)
        }
    };

    // 起始日期精确匹配
    assert_eq!(
        list(VoteListQuery {
            start_date: Some(date(2024, 1, 1)),
            ..Default::default()
        })
        .await,
        vec![winter.id, summer.id]
    );
    assert_eq!(
        list(VoteListQuery {
            start_date: Some(date(2024, 3, 1)),
            ..Default::default()
        })
        .await,
        vec![spring.id]
    );

    // 结束日期精确匹配
    assert_eq!(
        list(VoteListQuery {
            end_date: Some(date(2024, 3, 15)),
            ..Default::default()
        })
        .await,
        vec![spring.id, summer.id]
    );
    assert_eq!(
        list(VoteListQuery {
            end_date: Some(date(2024, 2, 1)),
            ..Default::default()
        })
        .await,
        Vec::<i64>::new()
    );

    // 选修课过滤：任一课程命中即可
    assert_eq!(
        list(VoteListQuery {
            not_required_courses: Some(vec![poetry.id]),
            ..Default::default()
        })
        .await,
        vec![winter.id, summer.id]
    );
    assert_eq!(
        list(VoteListQuery {
            not_required_courses: Some(vec![physics.id]),
            ..Default::default()
        })
        .await,
        vec![spring.id, summer.id]
    );
    assert_eq!(
        list(VoteListQuery {
            not_required_courses: Some(vec![algebra.id]),
            ..Default::default()
        })
        .await,
        Vec::<i64>::new()
    );

    // 多个条件同时生效
    assert_eq!(
        list(VoteListQuery {
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 3, 15)),
            not_required_courses: Some(vec![poetry.id]),
            ..Default::default()
        })
        .await,
        vec![summer.id]
    );
}

#[tokio::test]
async fn test_list_rejects_page_beyond_offset_range() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;
    storage
        .create_vote(vote_request("Pick", vec![group.id], vec![algebra.id], vec![poetry.id]), None)
        .await
        .unwrap();

    let err = storage
        .list_votes_with_pagination(VoteListQuery {
            page: Some(i64::MAX),
            size: Some(100),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DeaneryError::InvalidInput(_)), "{err:?}");

    // 偏移量合法但超出数据范围时返回空页
    let far = storage
        .list_votes_with_pagination(VoteListQuery {
            page: Some(1_000_000),
            size: Some(100),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(far.items.is_empty());
    assert_eq!(far.pagination.total, 1);
}
