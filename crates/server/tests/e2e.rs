use std::net::SocketAddr;

use axum::Router;
use configs::DatabaseConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated database file per test run
    let path = std::env::temp_dir().join(format!("cestas-e2e-{}.db", Uuid::new_v4()));
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 4,
        ..Default::default()
    };
    let db = models::db::connect_and_migrate(&cfg).await?;

    let app: Router = server::startup::build_app(db);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn create(c: &reqwest::Client, app: &TestApp, name: &str, address: &str, phone: &str) -> anyhow::Result<reqwest::Response> {
    Ok(c.post(format!("{}/usuarios", app.base_url))
        .query(&[("name", name), ("address", address), ("phone", phone)])
        .send()
        .await?)
}

#[tokio::test]
async fn e2e_root_and_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"message": "API está funcionando"}));

    let res = c.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_pickup_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = create(&c, &app, "Ana", "Rua A, 10", "+551199999").await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(
        body,
        json!({"id": 1, "name": "Ana", "address": "Rua A, 10", "phone": "+551199999", "pickedUp": false})
    );

    let res = c.patch(format!("{}/usuarios/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"message": "Status atualizado com sucesso"}));

    // Second PATCH is a no-op success
    let res = c.patch(format!("{}/usuarios/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/usuarios/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["pickedUp"], true);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_id_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/usuarios/9999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["detail"], "Usuário não encontrado");

    let res = c.patch(format!("{}/usuarios/9999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_non_integer_id_is_422() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new().get(format!("{}/usuarios/abc", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    let body = res.json::<Value>().await?;
    assert_eq!(body["detail"][0]["loc"], json!(["path", "id"]));
    Ok(())
}

#[tokio::test]
async fn e2e_missing_params_is_422() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .post(format!("{}/usuarios", app.base_url))
        .query(&[("name", "Ana")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Validation Error");
    let fields: Vec<Value> = body["detail"].as_array().unwrap().iter().map(|d| d["loc"][1].clone()).collect();
    assert_eq!(fields, vec![json!("address"), json!("phone")]);
    Ok(())
}

#[tokio::test]
async fn e2e_create_from_form_body() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .post(format!("{}/usuarios", app.base_url))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("name=Bia&address=Rua+B%2C+20&phone=%2B551188888")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["address"], "Rua B, 20");
    assert_eq!(body["phone"], "+551188888");
    Ok(())
}

#[tokio::test]
async fn e2e_duplicate_phone_fails_and_first_survives() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let first = create(&c, &app, "Ana", "Rua A, 10", "+551199999").await?.json::<Value>().await?;
    let res = create(&c, &app, "Bia", "Rua B, 20", "+551199999").await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?["error"], "Constraint Violation");

    let res = c.get(format!("{}/usuarios/{}", app.base_url, first["id"])).send().await?;
    assert_eq!(res.json::<Value>().await?, first);
    Ok(())
}

#[tokio::test]
async fn e2e_list_returns_every_record() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/usuarios", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, json!([]));

    let people = [("Ana", "Rua A", "+5501"), ("Bia", "Rua B", "+5502"), ("Caio", "Rua C", "+5503")];
    for (n, a, p) in people {
        assert_eq!(create(&c, &app, n, a, p).await?.status(), HttpStatusCode::OK);
    }

    let list = c.get(format!("{}/usuarios", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), people.len());
    for (rec, (n, a, p)) in list.iter().zip(people) {
        assert_eq!(rec["name"], n);
        assert_eq!(rec["address"], a);
        assert_eq!(rec["phone"], p);
        assert_eq!(rec["pickedUp"], false);
    }
    Ok(())
}

#[tokio::test]
async fn e2e_cors_allows_any_origin_with_credentials() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/usuarios", app.base_url))
        .header("origin", "http://example.org")
        .header("access-control-request-method", "PATCH")
        .header("access-control-request-headers", "x-custom")
        .send()
        .await?;
    assert!(res.status().is_success());
    let h = res.headers();
    assert_eq!(h["access-control-allow-origin"], "http://example.org");
    assert_eq!(h["access-control-allow-credentials"], "true");
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new().get(format!("{}/api-docs/openapi.json", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<Value>().await?;
    assert!(doc["paths"]["/usuarios/{id}"]["patch"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_repeated_query_key_keeps_last_value() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .post(format!("{}/usuarios?name=A&name=B&address=x&phone=1", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["name"], "B");
    assert_eq!(body["address"], "x");
    assert_eq!(body["phone"], "1");
    Ok(())
}

#[tokio::test]
async fn e2e_id_beyond_column_range_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/usuarios/99999999999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["detail"], "Usuário não encontrado");

    let res = c.patch(format!("{}/usuarios/-99999999999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
