//! File loading and WMS client tests

use std::collections::HashMap;
use std::io::Write;

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use evc_map::{MapError, VegetationLayer, Viewport, WmsClient, WmsConfig};

const LAYER: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "geometry": {
        "type": "MultiPolygon",
        "coordinates": [[[[144.9, -37.9], [145.0, -37.9], [145.0, -37.8], [144.9, -37.8], [144.9, -37.9]]]]
      },
      "properties": {
        "evc": "653",
        "x_evcname": "Aquatic Herbland",
        "bioregion": "Gippsland Plain",
        "evc_bcs": "E",
        "evc_bcs_desc": "Endangered",
        "vegetation_type": "Freshwater wetland"
      }
    }
  ]
}"#;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LAYER.as_bytes()).unwrap();

    let layer = VegetationLayer::load(file.path()).unwrap();
    assert_eq!(layer.len(), 1);

    let feature = layer.feature_at(144.95, -37.85).unwrap();
    assert_eq!(feature.fill_color(), "#1565C0");

    let selection = feature.selection().unwrap();
    assert_eq!(selection.title(), "EVC 653: Aquatic Herbland");
    assert_eq!(selection.conservation_status().color(), "#d32f2f");
    assert_eq!(selection.bioregion.as_deref(), Some("Gippsland Plain"));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = VegetationLayer::load(dir.path().join("missing.geojson"));
    assert!(matches!(result, Err(MapError::Io(_))));
}

async fn feature_info(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    // Only the centre pixel hits a district
    let hit = params.get("X").map(String::as_str) == Some("50")
        && params.get("Y").map(String::as_str) == Some("50")
        && params.get("QUERY_LAYERS").map(String::as_str) == Some("evc");
    let features = if hit {
        json!([{"type": "Feature", "properties": {"EVC": "132", "EVC_BCS": "E"}}])
    } else {
        json!([])
    };
    Json(json!({"type": "FeatureCollection", "features": features}))
}

async fn serve() -> String {
    let app = Router::new()
        .route("/wms", get(feature_info))
        .route("/down", get(|| async { axum::http::StatusCode::SERVICE_UNAVAILABLE }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn viewport() -> Viewport {
    Viewport::new(144.0, -38.0, 146.0, -36.0, 100, 100).unwrap()
}

#[tokio::test]
async fn test_wms_feature_info() {
    let base = serve().await;
    let client = WmsClient::new(WmsConfig {
        endpoint: format!("{base}/wms"),
        layer: "evc".into(),
    });

    let selection = client.feature_info(145.0, -37.0, viewport()).await.unwrap().unwrap();
    assert_eq!(selection.title(), "EVC 132: Plains Grassland");

    let miss = client.feature_info(144.1, -36.1, viewport()).await.unwrap();
    assert!(miss.is_none());
}

#[tokio::test]
async fn test_wms_errors() {
    let base = serve().await;
    let client = WmsClient::new(WmsConfig {
        endpoint: format!("{base}/down"),
        layer: "evc".into(),
    });

    let result = client.feature_info(145.0, -37.0, viewport()).await;
    assert!(matches!(result, Err(MapError::HttpStatus(503))));

    let result = client.feature_info(150.0, -37.0, viewport()).await;
    assert!(matches!(result, Err(MapError::OutsideViewport { .. })));
}
