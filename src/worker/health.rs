//! Liveness endpoint served next to the worker loop, on its own task so a
//! busy or backed-off loop never makes the process look dead. It reports
//! process health only and never consults the queue or the result store.

use axum::extract::Query;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Deserialize)]
pub struct HealthParams {
    #[serde(default)]
    details: bool,
}

#[derive(Serialize)]
struct HealthDetails {
    connected: bool,
    hostname: String,
}

pub fn router() -> Router {
    Router::new().route("/gtg", get(good_to_go))
}

pub async fn serve(port: u16) -> Result<(), anyhow::Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Health listener bound on {addr}");
    axum::serve(listener, router()).await?;
    Ok(())
}

async fn good_to_go(Query(params): Query<HealthParams>) -> Response {
    if params.details {
        Json(HealthDetails {
            connected: true,
            hostname: std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_owned()),
        })
        .into_response()
    } else {
        "ok".into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn good_to_go_returns_ok() {
        let response = good_to_go(Query(HealthParams { details: false })).await;
        assert_eq!(StatusCode::OK, response.status());
    }

    #[tokio::test]
    async fn good_to_go_details_reports_connected() {
        let response = good_to_go(Query(HealthParams { details: true })).await;
        assert_eq!(StatusCode::OK, response.status());

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let details: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(true, details["connected"]);
    }
}
