//! 集成测试共用的存储和数据准备

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_deanery::models::common::IdList;
use rust_deanery::models::courses::{entities::Course, requests::CreateCourseRequest};
use rust_deanery::models::groups::{entities::Group, requests::CreateGroupRequest};
use rust_deanery::models::students::{entities::Student, requests::CreateStudentRequest};
use rust_deanery::models::users::{
    entities::{User, UserRole},
    requests::CreateUserRequest,
};
use rust_deanery::models::votes::requests::CreateVoteRequest;
use rust_deanery::storage::Storage;
use rust_deanery::storage::sea_orm_storage::SeaOrmStorage;
use sea_orm::{ConnectOptions, Database};

/// 每个测试一个独立的内存库；只保留一个连接，否则每个连接都会看到一个新的空库
pub async fn memory_storage() -> Arc<SeaOrmStorage> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("Failed to open in-memory database");
    Arc::new(
        SeaOrmStorage::from_connection(db)
            .await
            .expect("Failed to migrate in-memory database"),
    )
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn make_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@deanery.test"),
            role,
        })
        .await
        .expect("create user")
}

pub async fn make_group(storage: &SeaOrmStorage, name: &str) -> Group {
    storage
        .create_group(CreateGroupRequest {
            name: name.to_string(),
        })
        .await
        .expect("create group")
}

pub async fn make_course(storage: &SeaOrmStorage, name: &str) -> Course {
    storage
        .create_course(CreateCourseRequest {
            name: name.to_string(),
        })
        .await
        .expect("create course")
}

/// 创建一个学生（连同其用户账号）
pub async fn make_student(
    storage: &SeaOrmStorage,
    username: &str,
    group_id: i64,
    course_ids: Vec<i64>,
) -> Student {
    let user = make_user(storage, username, UserRole::Student).await;
    storage
        .create_student(CreateStudentRequest {
            group_id,
            user_id: user.id,
            date_of_birth: date(2003, 5, 17),
            order_number: format!("ORD-{}", user.id),
            edebo_id: format!("{:08}", 10_000_000 + user.id),
            is_full_time: true,
            course_ids: IdList(course_ids),
        })
        .await
        .expect("create student")
}

pub fn vote_request(
    name: &str,
    groups: Vec<i64>,
    required: Vec<i64>,
    not_required: Vec<i64>,
) -> CreateVoteRequest {
    CreateVoteRequest {
        name: name.to_string(),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 1, 10),
        groups: IdList(groups),
        required_courses: IdList(required),
        not_required_courses: IdList(not_required),
    }
}
