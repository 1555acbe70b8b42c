use serde::{Deserialize, Serialize};

/// 教务服务配置
///
/// 每个字段都有默认值，配置文件只需写出与默认不同的部分。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

/// 运行环境与日志
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// `development` 输出带文件行号的文本日志，其余环境输出 JSON
    pub environment: String,
    /// `tracing_subscriber::EnvFilter` 语法
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// HTTP 监听配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 非空时改为监听 Unix 套接字（仅 unix 平台）
    pub unix_socket_path: String,
    /// 0 表示按 CPU 核数自动决定
    pub workers: usize,
    pub max_workers: usize,
    pub keep_alive_secs: u64,
    pub client_request_timeout_ms: u64,
    pub client_disconnect_timeout_ms: u64,
    /// JSON 请求体上限（字节）
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            unix_socket_path: String::new(),
            workers: 0,
            max_workers: 16,
            keep_alive_secs: 30,
            client_request_timeout_ms: 5000,
            client_disconnect_timeout_ms: 1000,
            max_payload_size: 1024 * 1024,
        }
    }
}

/// Bearer token 校验（仅用于识别调用方）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    /// 签发的 token 有效期（分钟）
    pub access_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_token_expiry: 60,
        }
    }
}

/// 数据库连接
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 连接 URL，数据库类型从 scheme 或文件后缀推断
    pub url: String,
    pub pool_size: u32,
    /// 连接与获取连接的超时（秒）
    pub timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "deanery.db".to_string(),
            pool_size: 8,
            timeout: 10,
        }
    }
}

/// 跨域配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `*` 表示允许任意来源
    pub allowed_origins: Vec<String>,
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age: 3600,
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}
