mod common;

use common::{make_course, make_group, make_student, make_user, memory_storage};
use rust_deanery::errors::DeaneryError;
use rust_deanery::models::grades::requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest};
use rust_deanery::models::grades_history::requests::{
    CreateGradeHistoryRequest, GradeHistoryListQuery,
};
use rust_deanery::models::users::entities::UserRole;
use rust_deanery::storage::Storage;
use rust_deanery::utils::validate::Validate;

#[tokio::test]
async fn test_update_grade_appends_one_history_row() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let alice = make_student(&storage, "alice", group.id, vec![algebra.id]).await;

    let grade = storage
        .create_grade(CreateGradeRequest {
            student_id: alice.id,
            course_id: algebra.id,
            grade: 0,
        })
        .await
        .unwrap();

    let response = storage
        .update_grade(
            grade.id,
            UpdateGradeRequest {
                grade: 88,
                reason_of_change: " Exam re-check ".to_string(),
            },
            teacher.id,
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(response.grade.grade, 88);
    assert_eq!(response.history.grade, 88);
    assert_eq!(response.history.user_changed_id, teacher.id);
    assert_eq!(response.history.reason_of_change, "Exam re-check");

    let history = storage
        .list_grade_history_with_pagination(GradeHistoryListQuery {
            student_id: Some(alice.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(history.pagination.total, 1);

    let stored = storage.get_grade_by_id(grade.id).await.unwrap().unwrap();
    assert_eq!(stored.grade, 88);

    // 不存在的成绩不写历史
    let missing = storage
        .update_grade(
            999,
            UpdateGradeRequest {
                grade: 50,
                reason_of_change: "typo".to_string(),
            },
            teacher.id,
        )
        .await
        .unwrap();
    assert!(missing.is_none());
    let history = storage
        .list_grade_history_with_pagination(GradeHistoryListQuery::default())
        .await
        .unwrap();
    assert_eq!(history.pagination.total, 1);
}

#[test]
fn test_grade_outside_range_is_rejected() {
    for value in [-1, 101] {
        let request = CreateGradeRequest {
            student_id: 1,
            course_id: 1,
            grade: value,
        };
        assert!(matches!(request.check(), Err(DeaneryError::Validation(_))));

        let request = UpdateGradeRequest {
            grade: value,
            reason_of_change: "because".to_string(),
        };
        let report = request.validate();
        assert!(report.has_field("grade"));
        assert!(!report.has_field("reason_of_change"));
    }

    let request = CreateGradeHistoryRequest {
        student_id: 1,
        course_id: 1,
        user_changed_id: 1,
        grade: 150,
        reason_of_change: "   ".to_string(),
    };
    let report = request.validate();
    assert!(report.has_field("grade"));
    assert!(report.has_field("reason_of_change"));
}

#[tokio::test]
async fn test_grade_history_requires_existing_references() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let alice = make_student(&storage, "alice", group.id, vec![]).await;

    let err = storage
        .create_grade_history(CreateGradeHistoryRequest {
            student_id: alice.id,
            course_id: 404,
            user_changed_id: teacher.id,
            grade: 70,
            reason_of_change: "Appeal".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DeaneryError::NotFound(_)), "{err:?}");

    let first = storage
        .create_grade_history(CreateGradeHistoryRequest {
            student_id: alice.id,
            course_id: algebra.id,
            user_changed_id: teacher.id,
            grade: 70,
            reason_of_change: "Appeal".to_string(),
        })
        .await
        .unwrap();
    let second = storage
        .create_grade_history(CreateGradeHistoryRequest {
            student_id: alice.id,
            course_id: algebra.id,
            user_changed_id: teacher.id,
            grade: 72,
            reason_of_change: "Second appeal".to_string(),
        })
        .await
        .unwrap();

    // 最新的在前
    let history = storage
        .list_grade_history_with_pagination(GradeHistoryListQuery {
            course_id: Some(algebra.id),
            ..Default::default()
        })
        .await
        .unwrap();
    let ids: Vec<i64> = history.items.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_grade_crud() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;
    let alice = make_student(&storage, "alice", group.id, vec![]).await;

    let err = storage
        .create_grade(CreateGradeRequest {
            student_id: 999,
            course_id: algebra.id,
            grade: 10,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DeaneryError::NotFound(_)), "{err:?}");

    let a = storage
        .create_grade(CreateGradeRequest {
            student_id: alice.id,
            course_id: algebra.id,
            grade: 10,
        })
        .await
        .unwrap();
    storage
        .create_grade(CreateGradeRequest {
            student_id: alice.id,
            course_id: poetry.id,
            grade: 20,
        })
        .await
        .unwrap();

    let filtered = storage
        .list_grades_with_pagination(GradeListQuery {
            course_id: Some(algebra.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(filtered.items.len(), 1);
    assert_eq!(filtered.items[0].id, a.id);

    assert!(storage.delete_grade(a.id).await.unwrap());
    assert!(!storage.delete_grade(a.id).await.unwrap());
}
