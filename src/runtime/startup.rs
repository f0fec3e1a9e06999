use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::services::{RedirectService, RegistrySettings, UrlRegistry};
use crate::storage::{KeyValueStore, RecordStore, StorageFactory};
use crate::system::AuditLog;

/// Everything a front end needs, wired once at startup
pub struct StartupContext {
    pub config: AppConfig,
    pub storage: Arc<dyn KeyValueStore>,
    pub audit: Arc<AuditLog>,
    pub registry: Arc<UrlRegistry>,
    pub redirect: RedirectService,
}

/// 准备运行上下文：存储、审计日志与注册服务
pub fn prepare_startup(config: AppConfig, clock: Arc<dyn Clock>) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.storage).context("Failed to open storage")?;
    let audit = Arc::new(AuditLog::load(storage.clone(), clock.clone()));
    debug!("Loaded {} persisted log entries", audit.len());

    let registry = Arc::new(UrlRegistry::new(
        RecordStore::new(storage.clone()),
        clock,
        audit.clone(),
        RegistrySettings::from(&config),
    ));
    let redirect = RedirectService::new(registry.clone());

    info!(
        "Startup completed in {} ms (backend: {})",
        start_time.elapsed().as_millis(),
        storage.backend_name()
    );

    Ok(StartupContext {
        config,
        storage,
        audit,
        registry,
        redirect,
    })
}
