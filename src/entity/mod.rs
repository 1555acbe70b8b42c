//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod courses;
pub mod grades;
pub mod grades_history;
pub mod groups;
pub mod student_courses;
pub mod students;
pub mod users;
pub mod vote_groups;
pub mod vote_not_required_courses;
pub mod vote_required_courses;
pub mod votes;
