//! 应用入口：加载评分标准、组装服务、启动 HTTP 服务

use anyhow::{Context, Result};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{build_router, AppState};
use crate::clients::{CompletionBackend, OpenAiBackend};
use crate::config::Config;
use crate::models::{load_rubric_file, RubricCatalog};
use crate::orchestrator::ScoringOrchestrator;
use crate::utils::logging::log_startup;

/// 应用主结构
pub struct App {
    config: Config,
    orchestrator: Arc<ScoringOrchestrator>,
}

impl App {
    /// 初始化应用
    ///
    /// 配置了 `RUBRIC_FILE` 时从文件加载评分标准，否则使用内置标准。
    pub async fn initialize(config: Config) -> Result<Self> {
        let catalog = match config.rubric_file.as_deref() {
            Some(path) => load_rubric_file(Path::new(path)).await?,
            None => RubricCatalog::builtin(),
        }
        .into_shared();

        log_startup(&config, catalog.len());

        let backend: Arc<dyn CompletionBackend> = Arc::new(OpenAiBackend::new(&config));
        let orchestrator = ScoringOrchestrator::from_config(&config, catalog, backend)?;

        Ok(Self {
            config,
            orchestrator: Arc::new(orchestrator),
        })
    }

    /// 构建带状态的路由
    pub fn router(&self) -> Router {
        build_router(AppState::new(self.orchestrator.clone()))
    }

    /// 监听端口并处理请求，直到进程退出
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("无法监听地址 {}", self.config.bind_addr))?;

        info!("✅ 服务已就绪: http://{}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .await
            .context("HTTP 服务异常退出")?;

        Ok(())
    }
}
