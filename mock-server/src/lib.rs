use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

/// A stored record: a flat JSON object that always carries its `id`.
pub type Record = Map<String, Value>;

/// resource type -> (id -> record)
pub type Db = Arc<RwLock<HashMap<String, BTreeMap<String, Record>>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/v1/{resource}", get(list_records).post(create_record))
        .route(
            "/api/v1/{resource}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_records(State(db): State<Db>, Path(resource): Path<String>) -> Json<Vec<Record>> {
    let db = db.read().await;
    let records = db
        .get(&resource)
        .map(|records| records.values().cloned().collect())
        .unwrap_or_default();
    Json(records)
}

async fn create_record(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Json(mut input): Json<Record>,
) -> (StatusCode, Json<Record>) {
    let id = Uuid::new_v4().to_string();
    input.insert("id".to_string(), Value::String(id.clone()));
    debug!(%resource, %id, "create");
    db.write()
        .await
        .entry(resource)
        .or_default()
        .insert(id, input.clone());
    (StatusCode::CREATED, Json(input))
}

async fn get_record(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Record>, StatusCode> {
    let db = db.read().await;
    db.get(&resource)
        .and_then(|records| records.get(&id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_record(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, String)>,
    Json(input): Json<Record>,
) -> Result<Json<Record>, StatusCode> {
    let mut db = db.write().await;
    let record = db
        .get_mut(&resource)
        .and_then(|records| records.get_mut(&id))
        .ok_or(StatusCode::NOT_FOUND)?;
    debug!(%resource, %id, "update");
    for (key, value) in input {
        if key != "id" {
            record.insert(key, value);
        }
    }
    Ok(Json(record.clone()))
}

async fn delete_record(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    let mut db = db.write().await;
    debug!(%resource, %id, "delete");
    db.get_mut(&resource)
        .and_then(|records| records.remove(&id))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
