//! 配置管理
//!
//! 配置来源依次为：`config.toml`、`config.{APP_ENV}.toml`、`DEANERY_*` 环境变量，
//! 最后是少量常用环境变量的直接覆盖。

mod r#impl;
mod structs;

pub use structs::*;
