pub mod courses;

pub mod grades;

pub mod groups;

pub mod students;

pub mod users;

pub mod votes;

pub use courses::configure_courses_routes;
pub use grades::configure_grades_routes;
pub use groups::configure_groups_routes;
pub use students::configure_students_routes;
pub use users::configure_user_routes;
pub use votes::configure_votes_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_user_routes)
        .configure(configure_groups_routes)
        .configure(configure_courses_routes)
        .configure(configure_students_routes)
        .configure(configure_grades_routes)
        .configure(configure_votes_routes);
}
