mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::{Value, json};

use common::{make_course, make_group, make_student, make_user, memory_storage};
use rust_deanery::models::grades::requests::CreateGradeRequest;
use rust_deanery::models::users::entities::UserRole;
use rust_deanery::runtime::http;
use rust_deanery::storage::Storage;
use rust_deanery::utils::jwt::JwtUtils;

macro_rules! deanery_app {
    ($storage:expr) => {{
        let storage: Arc<dyn Storage> = $storage;
        test::init_service(
            App::new().configure(http::deanery_service(storage, 1024 * 1024)),
        )
        .await
    }};
}

fn bearer(user_id: i64, role: &str) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user_id, role).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_midterm_pick_round_trip() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;
    let app = deanery_app!(storage.clone());

    // 单个 ID 与列表两种写法
    let req = test::TestRequest::post()
        .uri("/api/v1/votes")
        .set_json(json!({
            "name": "Midterm Pick",
            "start_date": "2024-01-01",
            "end_date": "2024-01-10",
            "groups": group.id,
            "required_courses": [algebra.id],
            "not_required_courses": poetry.id.to_string(),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["groups"][0]["id"], group.id);
    assert_eq!(body["data"]["required_courses"][0]["id"], algebra.id);
    assert_eq!(body["data"]["not_required_courses"][0]["id"], poetry.id);
    assert_eq!(body["data"]["start_date"], "2024-01-01");
    assert!(body["data"]["created_by"].is_null());

    let req = test::TestRequest::post()
        .uri("/api/v1/votes")
        .set_json(json!({
            "name": "Midterm Pick",
            "start_date": "2024-01-01",
            "end_date": "2023-12-31",
            "groups": [group.id],
            "required_courses": [algebra.id],
            "not_required_courses": [poetry.id],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1007);

    let req = test::TestRequest::get().uri("/api/v1/votes").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
}

#[actix_web::test]
async fn test_vote_list_filters_and_order_allow_list() {
    let storage = memory_storage().await;
    let first = make_group(&storage, "KN-21").await;
    let second = make_group(&storage, "KN-22").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;
    make_student(&storage, "alice", first.id, vec![]).await;
    for (name, group) in [("A", first.id), ("B", second.id)] {
        storage
            .create_vote(
                common::vote_request(name, vec![group], vec![algebra.id], vec![poetry.id]),
                None,
            )
            .await
            .unwrap();
    }
    let app = deanery_app!(storage.clone());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/votes?groups={}", first.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "A");
    assert_eq!(items[0]["all_students"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/votes?groups={},{}&order_by_column=name&order_by=DESC", first.id, second.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["B", "A"]);

    let req = test::TestRequest::get()
        .uri("/api/v1/votes?order_by_column=created_by")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1007);

    let req = test::TestRequest::get()
        .uri("/api/v1/votes?order_by=sideways")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_vote_list_repeated_query_keys() {
    let storage = memory_storage().await;
    let first = make_group(&storage, "KN-21").await;
    let second = make_group(&storage, "KN-22").await;
    let third = make_group(&storage, "KN-23").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;
    for (name, group) in [("A", first.id), ("B", second.id), ("C", third.id)] {
        storage
            .create_vote(
                common::vote_request(name, vec![group], vec![algebra.id], vec![poetry.id]),
                None,
            )
            .await
            .unwrap();
    }
    let app = deanery_app!(storage.clone());

    let names = |body: &Value| -> Vec<String> {
        body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap().to_string())
            .collect()
    };

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/votes?groups={}&groups={}", first.id, second.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(names(&body), vec!["A", "B"]);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/votes?groups%5B%5D={}&groups%5B%5D={}",
            second.id, third.id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(names(&body), vec!["B", "C"]);

    // 非列表参数不允许重复
    let req = test::TestRequest::get()
        .uri("/api/v1/votes?name=A&name=B")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}

#[actix_web::test]
async fn test_vote_list_page_out_of_range() {
    let storage = memory_storage().await;
    let app = deanery_app!(storage.clone());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/votes?page={}&size=100", i64::MAX))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1007);
}

#[actix_web::test]
async fn test_caller_identity() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let poetry = make_course(&storage, "Poetry").await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let app = deanery_app!(storage.clone());

    let req = test::TestRequest::get()
        .uri("/api/v1/votes")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/votes")
        .insert_header(bearer(teacher.id, "teacher"))
        .set_json(json!({
            "name": "Signed",
            "start_date": "2024-03-01",
            "end_date": "2024-03-01",
            "groups": [group.id],
            "required_courses": [algebra.id],
            "not_required_courses": [poetry.id],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["created_by"], teacher.id);
}

#[actix_web::test]
async fn test_grade_update_needs_caller_and_records_history() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let algebra = make_course(&storage, "Algebra").await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let alice = make_student(&storage, "alice", group.id, vec![algebra.id]).await;
    let grade = storage
        .create_grade(CreateGradeRequest {
            student_id: alice.id,
            course_id: algebra.id,
            grade: 40,
        })
        .await
        .unwrap();
    let app = deanery_app!(storage.clone());

    let payload = json!({"grade": 65, "reason_of_change": "Retake"});

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/grades/{}", grade.id))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/grades/{}", grade.id))
        .insert_header(bearer(teacher.id, "teacher"))
        .set_json(json!({"grade": 101, "reason_of_change": "Typo"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1006);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/grades/{}", grade.id))
        .insert_header(bearer(teacher.id, "teacher"))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["grade"]["grade"], 65);
    assert_eq!(body["data"]["history"]["user_changed_id"], teacher.id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/grades-history?student_id={}", alice.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
}

#[actix_web::test]
async fn test_boundary_errors() {
    let storage = memory_storage().await;
    let app = deanery_app!(storage.clone());

    let req = test::TestRequest::get().uri("/api/v1/votes/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/v1/votes/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/v1/groups")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/groups")
        .set_json(json!({"name": "KN-21"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/groups")
        .set_json(json!({"name": "KN-21"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_delete_group_over_http_removes_students() {
    let storage = memory_storage().await;
    let group = make_group(&storage, "KN-21").await;
    let alice = make_student(&storage, "alice", group.id, vec![]).await;
    let app = deanery_app!(storage.clone());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/groups/{}", group.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/students/{}", alice.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
