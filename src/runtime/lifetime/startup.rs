use crate::config::get_config;
use crate::errors::ActivityError;
use crate::services::ActivityService;
use crate::storage::{ActivityStore, SeaOrmStorage, StorageFactory};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub activity_service: Arc<ActivityService>,
    pub route_config: RouteConfig,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub api_prefix: String,
    pub health_prefix: String,
}

impl RouteConfig {
    pub fn from_config() -> Self {
        let config = get_config();
        Self {
            api_prefix: config.routes.api_prefix.clone(),
            health_prefix: config.routes.health_prefix.clone(),
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储（连接 + 迁移）、业务服务和路由配置
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    let store: Arc<dyn ActivityStore> = storage.clone();
    let activity_service = Arc::new(ActivityService::new(store));
    debug!(
        "ActivityService initialized (increment_max_retries={})",
        activity_service.increment_max_retries()
    );

    let route_config = RouteConfig::from_config();

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        activity_service,
        route_config,
    })
}

/// 生成启动失败时输出到终端的错误描述
///
/// 错误链中包含 `ActivityError` 时使用带颜色的格式，否则输出完整的 context 链。
pub fn describe_startup_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ActivityError>() {
        Some(activity_err) => format!("{:#}\n{}", err, activity_err.format_colored()),
        None => format!("{:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_startup_error_colors_activity_error() {
        let err = anyhow::Error::new(ActivityError::database_connection("refused"))
            .context("Failed to create storage backend");
        let text = describe_startup_error(&err);
        assert!(text.contains("Failed to create storage backend"));
        assert!(text.contains("E002"));
        assert!(text.contains("refused"));
    }

    #[test]
    fn test_describe_startup_error_plain_chain() {
        let err = anyhow::anyhow!("bind failed").context("Failed to bind 0.0.0.0:8080");
        assert_eq!(
            describe_startup_error(&err),
            "Failed to bind 0.0.0.0:8080: bind failed"
        );
    }
}
