use std::collections::BTreeMap;

use axum::{extract::State, Json};

use crate::models::ActivityView;
use crate::services::SharedRegistry;

/// GET /activities — the full catalog, keyed by activity name.
pub async fn activities_handler(
    State(registry): State<SharedRegistry>,
) -> Json<BTreeMap<String, ActivityView>> {
    let registry = registry.read().await;
    Json(registry.list())
}
