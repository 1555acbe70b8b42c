//! HTTP 服务装配与监听

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::http::Method;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use tracing::warn;

use super::lifetime::shutdown;
use crate::config::{AppConfig, CorsConfig};
use crate::routes;
use crate::storage::Storage;
use crate::utils::{json_error_handler, query_error_handler};

/// 注册共享存储、请求解析配置和全部 API 路由
///
/// 服务器与集成测试共用这一套装配。
pub fn deanery_service(
    storage: Arc<dyn Storage>,
    max_payload_size: usize,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(
                web::JsonConfig::default()
                    .limit(max_payload_size)
                    .error_handler(json_error_handler),
            )
            .app_data(web::Data::new(storage));
        routes::configure_api_routes(cfg);
    }
}

/// 按配置的来源列表构建 CORS 中间件
pub fn cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_any_header()
        .max_age(config.max_age);

    if config.allows_any_origin() {
        cors.allow_any_origin()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

/// 启动 HTTP 服务，直到服务退出或收到关闭信号
pub async fn serve(storage: Arc<dyn Storage>, config: &'static AppConfig) -> std::io::Result<()> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&config.cors))
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
            .configure(deanery_service(
                storage.clone(),
                config.server.max_payload_size,
            ))
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive_secs))
    .client_request_timeout(Duration::from_millis(
        config.server.client_request_timeout_ms,
    ))
    .client_disconnect_timeout(Duration::from_millis(
        config.server.client_disconnect_timeout_ms,
    ))
    .workers(config.server.workers);

    let address = config.server_bind_address();

    #[cfg(unix)]
    let server = match config.unix_socket_path() {
        Some(path) => {
            warn!("Listening on Unix socket {}", path);
            // 上次异常退出留下的套接字文件
            if std::path::Path::new(path).exists() {
                std::fs::remove_file(path)?;
            }
            server.bind_uds(path)?
        }
        None => {
            warn!("Listening on http://{}", address);
            server.bind(address.as_str())?
        }
    };

    #[cfg(not(unix))]
    let server = {
        warn!("Listening on http://{}", address);
        server.bind(address.as_str())?
    };

    tokio::select! {
        res = server.run() => res,
        _ = shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: all tasks completed");
            Ok(())
        }
    }
}
