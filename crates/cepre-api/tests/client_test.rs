// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cepre_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base = server.uri().parse().expect("mock server URI");
    let client = ApiClient::with_client(reqwest::Client::new(), base);
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_student_statistics_preserves_map_order() {
    let (server, client) = setup().await;

    let body = json!({
        "total": 12,
        "por_area": { "Ingenierias": 7, "Biomedicas": 3, "Sociales": 2 },
        "por_sede": { "Puno": 8, "Juliaca": 4 },
        "por_turno": { "M": 9, "T": 3 },
        "por_sede_turno": { "Puno - M": 6 },
        "detalle_completo": {
            "Ingenierias": { "Puno": { "M": 4, "T": 1 }, "Juliaca": { "M": 2 } }
        },
        "ultimo_update": "2026-02-10T08:30:00"
    });

    Mock::given(method("GET"))
        .and(path("/api/estudiantes/estadisticas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let stats = client.student_statistics().await.expect("statistics");

    assert_eq!(stats.total, 12);
    let areas: Vec<&str> = stats.por_area.keys().map(String::as_str).collect();
    assert_eq!(areas, ["Ingenierias", "Biomedicas", "Sociales"]);
    let sedes: Vec<&str> = stats.por_sede.keys().map(String::as_str).collect();
    assert_eq!(sedes, ["Puno", "Juliaca"]);
    assert_eq!(stats.detalle_completo["Ingenierias"]["Puno"]["M"], 4);
    assert_eq!(stats.ultimo_update.as_deref(), Some("2026-02-10T08:30:00"));
}

#[tokio::test]
async fn test_statistics_missing_fields_default() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/vacantes/estadisticas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 0 })))
        .mount(&server)
        .await;

    let stats = client.vacancy_statistics().await.expect("statistics");

    assert_eq!(stats.total, 0);
    assert!(stats.por_area.is_empty());
    assert!(stats.detalle_completo.is_empty());
    assert!(stats.ultimo_update.is_none());
}

#[tokio::test]
async fn test_request_ficha_success() {
    let (server, client) = setup().await;

    let body = json!({
        "download_url": "https://sistemas.example.edu.pe/inscripciones/estudiantes/tok123",
        "estudiante": {
            "estudiante": { "nombres": "Ana", "paterno": "Lopez", "materno": "Diaz" }
        },
        "token": "tok123"
    });

    Mock::given(method("POST"))
        .and(path("/api/estudiantes/ficha"))
        .and(body_json(json!({ "dni": "87654321" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let resp = client.request_ficha("87654321").await.expect("ficha");

    assert_eq!(
        resp.download_url.as_deref(),
        Some("https://sistemas.example.edu.pe/inscripciones/estudiantes/tok123"),
    );
    let persona = resp
        .estudiante
        .and_then(|r| r.estudiante)
        .expect("nested student record");
    assert_eq!(persona.nombres.as_deref(), Some("Ana"));
    assert_eq!(resp.token.as_deref(), Some("tok123"));
}

#[tokio::test]
async fn test_service_status_and_clear_cache() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "online",
            "cache_valid": true,
            "vacantes_cache_valid": false,
            "authenticated": true
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/cache"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Cache y sesión limpiados" })),
        )
        .mount(&server)
        .await;

    let status = client.service_status().await.expect("status");
    assert_eq!(status.status, "online");
    assert!(status.cache_valid);
    assert!(!status.vacantes_cache_valid);

    client.clear_cache().await.expect("cache cleared");
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_500_with_detail() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "db down" })))
        .mount(&server)
        .await;

    let result = client.student_statistics().await;

    match result {
        Err(Error::Api { status, ref detail }) => {
            assert_eq!(status, 500);
            assert_eq!(detail.as_deref(), Some("db down"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_500_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.student_statistics().await;

    match result {
        Err(Error::Api { status, detail }) => {
            assert_eq!(status, 500);
            assert!(detail.is_none());
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_404_ficha_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/estudiantes/ficha"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "detail": "Estudiante no encontrado" })),
        )
        .mount(&server)
        .await;

    let err = client.request_ficha("12345678").await.expect_err("404");

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.detail(), Some("Estudiante no encontrado"));
}

#[tokio::test]
async fn test_error_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client.student_statistics().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert!(body.contains("not json"));
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
