//! Read-only HTTP snapshot API.
//!
//! Mounts every panel plus the mission status header and serves their
//! current state as JSON until Ctrl+C.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use mc_panels::{MissionStatus, PanelKind};
use serde::Serialize;

use crate::headless::snapshot_json;
use crate::host::{PanelHost, PanelStore, StatusStore};

#[derive(Clone)]
pub struct WebState {
    panels: Arc<BTreeMap<PanelKind, PanelStore>>,
    status: Arc<StatusStore>,
}

impl WebState {
    pub fn mount(host: &mut PanelHost) -> Self {
        Self {
            panels: Arc::new(host.mount_all()),
            status: Arc::new(host.mount_status()),
        }
    }

    pub fn stop(&self) {
        for store in self.panels.values() {
            store.stop();
        }
        self.status.stop();
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub interval_ms: u64,
    pub ticks: u64,
    pub running: bool,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

pub struct SnapshotServer {
    bind_addr: SocketAddr,
    host: PanelHost,
}

impl SnapshotServer {
    pub fn new(bind_addr: SocketAddr, host: PanelHost) -> Self {
        Self { bind_addr, host }
    }

    pub async fn run(mut self) -> Result<(), anyhow::Error> {
        let web_state = WebState::mount(&mut self.host);
        let app = router(web_state.clone());

        let mut host = self.host;
        let fault_log = tokio::spawn(async move {
            while let Some(fault) = host.next_fault().await {
                tracing::error!(
                    store = %fault.store,
                    ticks = fault.ticks,
                    error = %fault.error,
                    "Store fault"
                );
            }
        });

        let listener = tokio::net::TcpListener::bind(self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, "Snapshot API listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        fault_log.abort();
        web_state.stop();
        tracing::info!("Snapshot API stopped");
        Ok(())
    }
}

pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/api/health", get(api_health))
        .route("/api/panels", get(api_panels))
        .route("/api/panels/:id", get(api_panel))
        .route("/api/status", get(api_status))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl+C handler unavailable, serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn api_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true, "service": "mission-control"}))
}

async fn api_panels(State(web): State<WebState>) -> Json<Vec<PanelInfo>> {
    let panels = web
        .panels
        .iter()
        .map(|(kind, store)| PanelInfo {
            id: kind.id(),
            title: kind.title(),
            interval_ms: store.interval().as_millis() as u64,
            ticks: store.ticks(),
            running: store.is_running(),
        })
        .collect();
    Json(panels)
}

async fn api_panel(
    State(web): State<WebState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let kind: PanelKind = id
        .parse()
        .map_err(|e: mc_panels::UnknownPanel| api_error(StatusCode::NOT_FOUND, e.to_string()))?;
    let store = web
        .panels
        .get(&kind)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("panel '{kind}' not mounted")))?;

    let state = store.current().await;
    snapshot_json(&state, store.ticks())
        .map(Json)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

async fn api_status(State(web): State<WebState>) -> Json<MissionStatus> {
    Json(web.status.current().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MountSettings;

    fn state() -> WebState {
        let mut host = PanelHost::new(MountSettings {
            seed: Some(2),
            ..MountSettings::default()
        });
        WebState::mount(&mut host)
    }

    #[tokio::test(start_paused = true)]
    async fn catalogue_lists_every_panel() {
        let web = state();
        let Json(panels) = api_panels(State(web.clone())).await;
        assert_eq!(panels.len(), PanelKind::ALL.len());
        assert_eq!(panels[0].id, "realtime");
        assert!(panels.iter().all(|p| p.running));
        web.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn panel_snapshot_by_id() {
        let web = state();
        tokio::time::sleep(std::time::Duration::from_millis(8_500)).await;

        let Json(body) = api_panel(State(web.clone()), AxumPath("scaling".into()))
            .await
            .unwrap();
        assert_eq!(body["panel"], "scaling");
        assert_eq!(body["tick"], 1);

        let (code, _) = api_panel(State(web.clone()), AxumPath("warp".into()))
            .await
            .unwrap_err();
        assert_eq!(code, StatusCode::NOT_FOUND);
        web.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn status_reports_mission_header() {
        let web = state();
        let Json(status) = api_status(State(web.clone())).await;
        assert_eq!(status.version, "v4.2");
        assert_eq!(status.ticks, 0);
        web.stop();
    }
}
