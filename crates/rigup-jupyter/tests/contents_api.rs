//! Upload tests against a mock Contents API.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rigup_jupyter::{JupyterError, JupyterServer};
use rigup_model::Instance;

fn ready_instance() -> Instance {
    serde_json::from_value(json!({
        "id": 7,
        "actual_status": "running",
        "ssh_idx": "4",
        "ssh_port": 30001,
        "jupyter_token": "21f3dd4f0f6e"
    }))
    .unwrap()
}

#[tokio::test]
async fn upload_is_one_authenticated_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/4/30001/api/contents/train.ipynb"))
        .and(header("authorization", "token 21f3dd4f0f6e"))
        .and(body_partial_json(json!({
            "name": "train.ipynb",
            "path": "train.ipynb",
            "format": "json",
            "type": "notebook"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "train.ipynb",
            "path": "train.ipynb"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let jupyter = JupyterServer::from_instance_via(&server.uri(), &ready_instance()).unwrap();
    let notebook = json!({"cells": [], "nbformat": 4, "nbformat_minor": 5});
    jupyter.upload_notebook("train.ipynb", &notebook).await.unwrap();
}

#[tokio::test]
async fn rejected_upload_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let jupyter = JupyterServer::from_instance_via(&server.uri(), &ready_instance()).unwrap();
    let err = jupyter
        .upload_notebook("train.ipynb", &json!({}))
        .await
        .unwrap_err();

    match err {
        JupyterError::Api { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "Forbidden");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
