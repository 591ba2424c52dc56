//! Shared application state for the semgate gateway.
//!
//! Built once at startup. The engine is read-only afterwards and shared by
//! every request.

use std::sync::Arc;

use semgate_core::error::Result;

use crate::config::GatewayConfig;
use crate::engine::{self, MetricEngine};
use crate::obs::ApiMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    engine: Arc<dyn MetricEngine>,
    metrics: ApiMetrics,
}

impl AppState {
    /// Build application state, constructing the configured engine.
    /// Returns Result so main can report startup errors without panicking.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let engine = engine::build(&cfg.engine)?;
        Ok(Self::with_engine(cfg, engine))
    }

    /// Build state around an already constructed engine.
    pub fn with_engine(cfg: GatewayConfig, engine: Arc<dyn MetricEngine>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                engine,
                metrics: ApiMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn engine(&self) -> Arc<dyn MetricEngine> {
        Arc::clone(&self.inner.engine)
    }

    pub fn metrics(&self) -> &ApiMetrics {
        &self.inner.metrics
    }
}
