use super::*;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode as HttpStatus},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct Recorded {
    authorization: Arc<Mutex<Vec<String>>>,
    handles: Arc<Mutex<Vec<String>>>,
    executions: Arc<Mutex<Vec<Value>>>,
}

impl Recorded {
    async fn note_auth(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.authorization.lock().await.push(value);
    }
}

async fn handle_authorization(headers: HeaderMap) -> (HttpStatus, Json<Value>) {
    // "inspetor:senha" in base64
    let expected = "Basic aW5zcGV0b3I6c2VuaGE=";
    if headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(expected) {
        (
            HttpStatus::OK,
            Json(json!({ "retorno": [{ "codigo": "200", "token": "tok-123" }] })),
        )
    } else {
        (HttpStatus::UNAUTHORIZED, Json(json!({})))
    }
}

async fn handle_list(State(recorded): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    recorded.note_auth(&headers).await;
    Json(json!({
        "Dados": [
            { "Handle": "1", "NUMEROREFERENCIA": "REF-1", "STATUS": "Ag execucao" },
            { "Handle": "2", "NUMEROREFERENCIA": "REF-2", "STATUS": "Em execucao" }
        ]
    }))
}

async fn handle_items(
    State(recorded): State<Recorded>,
    Query(query): Query<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    let handle = query.get("handle").cloned().unwrap_or_default();
    recorded.handles.lock().await.push(handle.clone());
    Json(json!({
        "Dados": [
            { "HANDLE": format!("{handle}-1"), "ORDEM": "1", "TIPOCAMPO": "6", "CONTEUDO": "SIM" }
        ]
    }))
}

async fn handle_execute(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> HttpStatus {
    recorded.note_auth(&headers).await;
    recorded.executions.lock().await.push(body);
    HttpStatus::OK
}

async fn spawn_service(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/escalasoft")
}

async fn spawn_inspection_service() -> (HttpInspectionService, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/escalasoft/Authorization", get(handle_authorization))
        .route("/escalasoft/qualidade/checklist/buscar", get(handle_list))
        .route("/escalasoft/qualidade/checklist/item/buscar", get(handle_items))
        .route("/escalasoft/qualidade/checklist/executar", post(handle_execute))
        .with_state(recorded.clone());
    let base_url = spawn_service(app).await;
    let service =
        HttpInspectionService::new(&base_url, Duration::from_secs(5)).expect("service");
    (service, recorded)
}

async fn spawn_fixed_response(status: HttpStatus, body: &'static str) -> HttpInspectionService {
    let app = Router::new().fallback(move || async move { (status, body) });
    let base_url = spawn_service(app).await;
    HttpInspectionService::new(&base_url, Duration::from_secs(5)).expect("service")
}

#[tokio::test]
async fn exchanges_basic_credentials_for_token() {
    let (service, _) = spawn_inspection_service().await;
    let token = service
        .exchange_credentials("inspetor", "senha")
        .await
        .expect("token");
    assert_eq!(token, "tok-123");
}

#[tokio::test]
async fn rejected_credentials_are_invalid() {
    let (service, _) = spawn_inspection_service().await;
    let err = service
        .exchange_credentials("inspetor", "errada")
        .await
        .expect_err("must fail");
    assert!(matches!(err, ClientError::InvalidCredentials), "{err:?}");
}

#[tokio::test]
async fn lists_checklists_with_bearer_token() {
    let (service, recorded) = spawn_inspection_service().await;
    let checklists = service
        .list_checklists(&Session::new("tok-123"))
        .await
        .expect("checklists");

    assert_eq!(checklists.len(), 2);
    assert_eq!(checklists[0].reference_number, "REF-1");
    assert_eq!(
        recorded.authorization.lock().await.as_slice(),
        ["Bearer tok-123"]
    );
}

#[tokio::test]
async fn fetches_items_by_checklist_handle() {
    let (service, recorded) = spawn_inspection_service().await;
    let items = service
        .fetch_items(&Session::new("tok-123"), &ChecklistId::new("55"))
        .await
        .expect("items");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id.as_str(), "55-1");
    assert_eq!(items[0].content(), "SIM");
    assert_eq!(recorded.handles.lock().await.as_slice(), ["55"]);
}

#[tokio::test]
async fn posts_execution_payload() {
    let (service, recorded) = spawn_inspection_service().await;
    let request = ExecutionRequest::new(
        ChecklistId::new("55"),
        vec![shared::protocol::ItemRecord {
            item_id: shared::domain::ItemId::new("55-1"),
            observation: "ok".into(),
            value: Some(shared::protocol::WireValue::Flag(true)),
        }],
    );

    service
        .submit_execution(&Session::new("tok-123"), &request)
        .await
        .expect("submit");

    let executions = recorded.executions.lock().await;
    assert_eq!(
        executions.as_slice(),
        [json!({
            "checklist": "55",
            "checklistItem": [
                { "handleChecklistItem": "55-1", "observacao": "ok", "valorTexto": true }
            ],
            "anexoAssinaturaChecklist": [],
            "anexoChecklist": []
        })]
    );
}

#[tokio::test]
async fn unauthorized_status_is_reported_explicitly() {
    let service = spawn_fixed_response(HttpStatus::UNAUTHORIZED, "").await;
    let err = service
        .list_checklists(&Session::new("expired"))
        .await
        .expect_err("must fail");
    assert!(matches!(err, ClientError::Unauthorized { .. }), "{err:?}");
    assert!(err.requires_reauth());
}

#[tokio::test]
async fn server_errors_are_not_empty_results() {
    let service = spawn_fixed_response(HttpStatus::INTERNAL_SERVER_ERROR, "").await;
    let err = service
        .fetch_items(&Session::new("tok"), &ChecklistId::new("1"))
        .await
        .expect_err("must fail");
    assert!(
        matches!(err, ClientError::Status { status: 500, .. }),
        "{err:?}"
    );
}

#[tokio::test]
async fn empty_success_body_is_empty_collection() {
    let service = spawn_fixed_response(HttpStatus::OK, "").await;
    let checklists = service
        .list_checklists(&Session::new("tok"))
        .await
        .expect("checklists");
    assert!(checklists.is_empty());
}

#[tokio::test]
async fn unreadable_body_is_malformed_response() {
    let service = spawn_fixed_response(HttpStatus::OK, "<html>").await;
    let err = service
        .list_checklists(&Session::new("tok"))
        .await
        .expect_err("must fail");
    assert!(matches!(err, ClientError::MalformedResponse { .. }), "{err:?}");
}

#[test]
fn base_url_gets_trailing_slash() {
    let service =
        HttpInspectionService::new("http://example.test/escalasoft", Duration::from_secs(1))
            .expect("service");
    assert_eq!(service.base_url().as_str(), "http://example.test/escalasoft/");
    assert_eq!(
        service.endpoint(CHECKLISTS_PATH).expect("endpoint").as_str(),
        "http://example.test/escalasoft/qualidade/checklist/buscar"
    );
}

#[test]
fn rejects_non_http_service_urls() {
    for raw in ["ftp://example.test", "not a url"] {
        let err = HttpInspectionService::new(raw, Duration::from_secs(1)).expect_err("invalid");
        assert!(matches!(err, ClientError::InvalidServiceUrl { .. }), "{err:?}");
    }
}
