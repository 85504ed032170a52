mod common;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use common::{TestServer, PASSWORD, USERNAME};

fn acme() -> Value {
    json!({
        "name": "Acme",
        "amount_of_employees": 5,
        "registered": true,
        "type": "Corporations"
    })
}

async fn create(client: &Client, server: &TestServer, body: &Value) -> Result<reqwest::Response> {
    Ok(client
        .post(server.url("/companies"))
        .basic_auth(USERNAME, Some(PASSWORD))
        .json(body)
        .send()
        .await?)
}

#[tokio::test]
async fn create_then_fetch_by_id() -> Result<()> {
    let server = TestServer::spawn().await?;
    let client = Client::new();

    let res = create(&client, &server, &acme()).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    let id = created["id"].as_str().expect("id assigned").to_string();
    assert_eq!(created["name"], "Acme");
    assert_eq!(created["type"], "Corporations");

    let res = client.get(server.url(&format!("/companies/{}", id))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await?;
    assert_eq!(fetched, json!([created]));

    let res = client.get(server.url("/companies/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let all: Value = res.json().await?;
    assert_eq!(all.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn supplied_id_is_replaced_on_create() -> Result<()> {
    let server = TestServer::spawn().await?;
    let client = Client::new();
    let supplied = "3f2504e0-4f89-41d3-9a0c-0305e82c3301";
    let mut body = acme();
    body["id"] = json!(supplied);

    let res = create(&client, &server, &body).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    let id = created["id"].as_str().expect("id assigned").to_string();
    assert_ne!(id, supplied);

    let res = client.get(server.url(&format!("/companies/{}", supplied))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = client.get(server.url(&format!("/companies/{}", id))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn list_is_empty_array_when_no_companies() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = Client::new().get(server.url("/companies")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn zero_employees_is_rejected_with_constraint_message() -> Result<()> {
    let server = TestServer::spawn().await?;
    let mut body = acme();
    body["amount_of_employees"] = json!(0);

    let res = create(&Client::new(), &server, &body).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    assert_eq!(err["code"], "VALIDATION_ERROR");
    assert!(err["message"].as_str().unwrap().contains("amount_of_employees"));
    Ok(())
}

#[tokio::test]
async fn unknown_key_is_reported() -> Result<()> {
    let server = TestServer::spawn().await?;
    let mut body = acme();
    body["foo"] = json!("bar");

    let res = create(&Client::new(), &server, &body).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    assert_eq!(err["code"], "UNKNOWN_FIELDS");
    assert_eq!(err["unknown_fields"], json!(["foo"]));
    Ok(())
}

#[tokio::test]
async fn empty_body_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = Client::new()
        .post(server.url("/companies"))
        .basic_auth(USERNAME, Some(PASSWORD))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    assert_eq!(err["message"], "Body is empty");
    Ok(())
}

#[tokio::test]
async fn patch_rules() -> Result<()> {
    let server = TestServer::spawn().await?;
    let client = Client::new();
    let created: Value = create(&client, &server, &acme()).await?.json().await?;
    let url = server.url(&format!("/companies/{}", created["id"].as_str().unwrap()));

    let patch = |body: Value| {
        client
            .patch(&url)
            .basic_auth(USERNAME, Some(PASSWORD))
            .json(&body)
            .send()
    };

    let res = patch(json!({ "id": created["id"], "name": "Other" })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "IMMUTABLE_FIELD");

    let res = patch(json!({ "name": "" })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "EMPTY_FIELD");

    let res = patch(json!({ "description": "" })).await?;
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    assert_eq!(res.json::<Value>().await?["id"], created["id"]);

    let res = patch(json!({ "name": "Acme Holdings", "type": "Cooperative" })).await?;
    assert_eq!(res.status(), StatusCode::ACCEPTED);

    let stored: Value = client.get(&url).send().await?.json().await?;
    assert_eq!(stored[0]["name"], "Acme Holdings");
    assert_eq!(stored[0]["type"], "Cooperative");
    assert_eq!(stored[0]["amount_of_employees"], 5);
    Ok(())
}

#[tokio::test]
async fn delete_lifecycle() -> Result<()> {
    let server = TestServer::spawn().await?;
    let client = Client::new();
    let created: Value = create(&client, &server, &acme()).await?.json().await?;
    let url = server.url(&format!("/companies/{}", created["id"].as_str().unwrap()));

    let res = client.delete(&url).basic_auth(USERNAME, Some(PASSWORD)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(&url).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(&url).basic_auth(USERNAME, Some(PASSWORD)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_identifier_is_a_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;
    let client = Client::new();

    let res = client.get(server.url("/companies/1%27%20OR%20%271%27=%271")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "INVALID_IDENTIFIER");

    let res = client
        .patch(server.url("/companies/12345"))
        .basic_auth(USERNAME, Some(PASSWORD))
        .json(&json!({ "name": "x" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn unknown_id_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = Client::new()
        .get(server.url("/companies/3f2504e0-4f89-41d3-9a0c-0305e82c3301"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
