use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 打印当前数据概况，便于确认连接的是哪一个库
async fn log_storage_summary(storage: &Arc<dyn Storage>) {
    let query = crate::models::groups::requests::GroupListQuery {
        page: Some(1),
        size: Some(1),
        search: None,
    };
    match storage.list_groups_with_pagination(query).await {
        Ok(groups) => info!("Storage ready, {} group(s) registered", groups.pagination.total),
        Err(e) => warn!("Failed to read storage summary: {}", e),
    }
}

/// 准备服务器启动的上下文：建立数据库连接并执行迁移
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // 重复安装时保留已有的 provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let config = AppConfig::get();
    debug!(
        "Environment: {}, database pool size: {}",
        config.app.environment, config.database.pool_size
    );

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    log_storage_summary(&storage).await;

    Ok(StartupContext { storage })
}
