use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File, FileFormat};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 不带前缀的常用环境变量，优先级高于配置文件和 `DEANERY__*`
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("APP_ENV", "app.environment"),
    ("RUST_LOG", "app.log_level"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("UNIX_SOCKET", "server.unix_socket_path"),
    ("CPU_COUNT", "server.workers"),
    ("JWT_SECRET", "jwt.secret"),
    ("DATABASE_URL", "database.url"),
];

impl AppConfig {
    /// 依次读取 `config.toml`、`config.{APP_ENV}.toml`、`DEANERY__*` 和 [`ENV_OVERRIDES`]
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{environment}")).required(false))
            .add_source(
                Environment::with_prefix("DEANERY")
                    .separator("__")
                    .try_parsing(true),
            );

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        Self::finish(builder)
    }

    /// 只从一段 TOML 文本构建配置，不读取文件和环境变量
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Self::finish(Config::builder().add_source(File::from_str(text, FileFormat::Toml)))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers).max(1);
        }
        app_config.check()?;

        Ok(app_config)
    }

    /// 拒绝无法启动服务的取值
    fn check(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Message("database.url must not be empty".into()));
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::Message("database.pool_size must be at least 1".into()));
        }
        if self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::Message(
                "cors.allowed_origins must list at least one origin or \"*\"".into(),
            ));
        }
        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 启动时显式加载，配置错误由调用方处理
    pub fn init() -> Result<&'static AppConfig, ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(Self::get())
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 配置了 Unix 套接字时返回其路径
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        Some(self.server.unix_socket_path.as_str()).filter(|path| !path.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(config.is_development());
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
        assert_eq!(config.database.url, "deanery.db");
        assert!(config.cors.allows_any_origin());
        assert!(config.server.workers >= 1);
        assert!(config.server.workers <= config.server.max_workers);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090
            workers = 3

            [cors]
            allowed_origins = ["https://deanery.example"]
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.workers, 3);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.max_payload_size, 1024 * 1024);
        assert!(!config.cors.allows_any_origin());
        assert_eq!(config.cors.max_age, 3600);
    }

    #[test]
    fn test_unusable_values_are_rejected() {
        assert!(AppConfig::from_toml("[database]\npool_size = 0").is_err());
        assert!(AppConfig::from_toml("[jwt]\nsecret = \"  \"").is_err());
        assert!(AppConfig::from_toml("[cors]\nallowed_origins = []").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_socket_path() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.unix_socket_path(), None);

        let config = AppConfig::from_toml("[server]\nunix_socket_path = \"/tmp/deanery.sock\"").unwrap();
        assert_eq!(config.unix_socket_path(), Some("/tmp/deanery.sock"));
    }
}
