mod common;

use common::{make_course, make_group, make_student, make_user, memory_storage, vote_request};
use rust_deanery::errors::DeaneryError;
use rust_deanery::models::common::IdList;
use rust_deanery::models::grades::requests::{CreateGradeRequest, GradeListQuery};
use rust_deanery::models::grades_history::requests::GradeHistoryListQuery;
use rust_deanery::models::students::requests::{
    CreateStudentRequest, StudentListQuery, UpdateStudentRequest,
};
use rust_deanery::models::users::entities::UserRole;
use rust_deanery::storage::Storage;

#[tokio::test]
async fn test_delete_group_removes_its_students() {
    let storage = memory_storage().await;
    let doomed = make_group(&storage, "KN-21").await;
    let kept = make_group(&storage, "KN-22").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;

    let alice = make_student(&storage, "alice", doomed.id, vec![algebra.id]).await;
    let bob = make_student(&storage, "bob", kept.id, vec![algebra.id]).await;
    storage
        .create_grade(CreateGradeRequest {
            student_id: alice.id,
            course_id: algebra.id,
            grade: 90,
        })
        .await
        .unwrap();
    let vote = storage
        .create_vote(
            vote_request("Pick", vec![doomed.id, kept.id], vec![algebra.id], vec![poetry.id]),
            None,
        )
        .await
        .unwrap();
    assert_eq!(vote.all_students, 2);

    assert!(storage.delete_group(doomed.id).await.unwrap());

    assert!(storage.get_group_by_id(doomed.id).await.unwrap().is_none());
    assert!(storage.get_student_by_id(alice.id).await.unwrap().is_none());
    assert!(storage.get_student_by_id(bob.id).await.unwrap().is_some());

    let grades = storage
        .list_grades_with_pagination(GradeListQuery::default())
        .await
        .unwrap();
    assert!(grades.items.is_empty());

    // 投票保留，但只剩下未删除的学术组
    let vote = storage.get_vote_by_id(vote.id).await.unwrap().unwrap();
    assert_eq!(vote.groups.len(), 1);
    assert_eq!(vote.groups[0].id, kept.id);
    assert_eq!(vote.all_students, 1);

    assert!(!storage.delete_group(doomed.id).await.unwrap());
}

#[tokio::test]
async fn test_delete_user_removes_its_student_but_keeps_authored_history() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let alice = make_student(&storage, "alice", group.id, vec![algebra.id]).await;
    let bob = make_student(&storage, "bob", group.id, vec![algebra.id]).await;

    let grade = storage
        .create_grade(CreateGradeRequest {
            student_id: bob.id,
            course_id: algebra.id,
            grade: 60,
        })
        .await
        .unwrap();
    storage
        .update_grade(
            grade.id,
            rust_deanery::models::grades::requests::UpdateGradeRequest {
                grade: 75,
                reason_of_change: "Retake".to_string(),
            },
            teacher.id,
        )
        .await
        .unwrap()
        .unwrap();

    assert!(storage.delete_user(alice.user_id).await.unwrap());
    assert!(storage.get_user_by_id(alice.user_id).await.unwrap().is_none());
    assert!(storage.get_student_by_id(alice.id).await.unwrap().is_none());

    assert!(storage.delete_user(teacher.id).await.unwrap());
    let history = storage
        .list_grade_history_with_pagination(GradeHistoryListQuery::default())
        .await
        .unwrap();
    assert_eq!(history.items.len(), 1);
    assert_eq!(history.items[0].user_changed_id, teacher.id);

    let students = storage
        .list_students_with_pagination(StudentListQuery::default())
        .await
        .unwrap();
    assert_eq!(students.items.len(), 1);
    assert_eq!(students.items[0].id, bob.id);
}

#[tokio::test]
async fn test_delete_course_removes_links() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;
    let alice = make_student(&storage, "alice", group.id, vec![algebra.id, poetry.id]).await;
    assert_eq!(alice.course_ids, vec![algebra.id, poetry.id]);

    let vote = storage
        .create_vote(vote_request("Pick", vec![group.id], vec![algebra.id], vec![poetry.id]), None)
        .await
        .unwrap();

    assert!(storage.delete_course(poetry.id).await.unwrap());

    let alice = storage.get_student_by_id(alice.id).await.unwrap().unwrap();
    assert_eq!(alice.course_ids, vec![algebra.id]);
    let vote = storage.get_vote_by_id(vote.id).await.unwrap().unwrap();
    assert!(vote.not_required_courses.is_empty());
    assert_eq!(vote.required_courses.len(), 1);
}

#[tokio::test]
async fn test_student_binding_rules() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let alice = make_student(&storage, "alice", group.id, vec![]).await;

    // 一个用户只能对应一个学生
    let err = storage
        .create_student(CreateStudentRequest {
            group_id: group.id,
            user_id: alice.user_id,
            date_of_birth: common::date(2004, 1, 2),
            order_number: "ORD-X".to_string(),
            edebo_id: "87654321".to_string(),
            is_full_time: false,
            course_ids: IdList::default(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DeaneryError::InvalidInput(_)), "{err:?}");

    let err = storage
        .update_student(
            alice.id,
            UpdateStudentRequest {
                group_id: Some(999),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DeaneryError::NotFound(_)), "{err:?}");

    let updated = storage
        .update_student(
            alice.id,
            UpdateStudentRequest {
                course_ids: Some(IdList(vec![algebra.id, algebra.id])),
                is_full_time: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.course_ids, vec![algebra.id]);
    assert!(!updated.is_full_time);

    let by_course = storage
        .list_students_with_pagination(StudentListQuery {
            course_id: Some(algebra.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_course.items.len(), 1);
}
