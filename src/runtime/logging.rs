//! tracing 订阅器初始化

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// 安装全局订阅器，返回的 guard 需要一直持有到进程退出
///
/// 开发环境输出带文件行号的彩色文本，其余环境输出 JSON。
pub fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    let filter = EnvFilter::try_new(&config.app.log_level).unwrap_or_else(|e| {
        eprintln!(
            "Invalid log level '{}': {e}, falling back to info",
            config.app.log_level
        );
        EnvFilter::new("info")
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_level(true);

    if config.is_development() {
        builder
            .with_ansi(true)
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        builder.with_ansi(false).json().init();
    }

    guard
}
