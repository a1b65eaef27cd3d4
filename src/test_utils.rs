// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::Instant;
use tower::Service;

pub const CRD_PATH: &str = "/apis/apiextensions.k8s.io/v1/customresourcedefinitions";

/// Path of a single CRD
pub fn crd_path(name: &str) -> String {
    format!("{}/{}", CRD_PATH, name)
}

#[derive(Clone)]
struct CannedResponse {
    status: u16,
    body: String,
    available_at: Option<Instant>,
}

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), CannedResponse>>>,
    hits: Arc<Mutex<HashMap<(String, String), usize>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.insert(path, status, body, None)
    }

    /// Add a response for GET requests that only starts matching `delay` after
    /// now on the tokio clock. Until then the path answers 404.
    pub fn on_get_after(self, path: &str, delay: Duration, status: u16, body: &str) -> Self {
        self.insert(path, status, body, Some(Instant::now() + delay))
    }

    /// Number of requests seen for a method and path
    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.hits
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn insert(self, path: &str, status: u16, body: &str, available_at: Option<Instant>) -> Self {
        self.responses.lock().unwrap().insert(
            ("GET".to_string(), path.to_string()),
            CannedResponse {
                status,
                body: body.to_string(),
                available_at,
            },
        );
        self
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let key = (method.to_string(), path.to_string());
        *self.hits.lock().unwrap().entry(key.clone()).or_default() += 1;

        let responses = self.responses.lock().unwrap();
        responses
            .get(&key)
            .filter(|r| r.available_at.map_or(true, |at| Instant::now() >= at))
            .map(|r| (r.status, r.body.clone()))
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json("customresourcedefinitions", &path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

fn crd_value(name: &str) -> serde_json::Value {
    let (plural, group) = name.split_once('.').unwrap_or((name, "example.com"));
    serde_json::json!({
        "apiVersion": "apiextensions.k8s.io/v1",
        "kind": "CustomResourceDefinition",
        "metadata": {
            "name": name,
            "uid": format!("uid-{}", name)
        },
        "spec": {
            "group": group,
            "names": {
                "plural": plural,
                "kind": "TestKind"
            },
            "scope": "Namespaced",
            "versions": [
                {"name": "v1", "served": true, "storage": true}
            ]
        }
    })
}

/// Create a mock CRD JSON response without status
pub fn crd_json(name: &str) -> String {
    crd_value(name).to_string()
}

/// Create a mock CRD JSON response carrying an Established condition
pub fn established_crd_json(name: &str) -> String {
    let (plural, _) = name.split_once('.').unwrap_or((name, ""));
    let mut crd = crd_value(name);
    crd["status"] = serde_json::json!({
        "acceptedNames": {"plural": plural, "kind": "TestKind"},
        "storedVersions": ["v1"],
        "conditions": [
            {"type": "NamesAccepted", "status": "True"},
            {"type": "Established", "status": "True"}
        ]
    });
    crd.to_string()
}

/// Create a mock CRD list JSON response
pub fn crd_list_json(names: &[&str]) -> String {
    serde_json::json!({
        "apiVersion": "apiextensions.k8s.io/v1",
        "kind": "CustomResourceDefinitionList",
        "metadata": {"resourceVersion": "1"},
        "items": names.iter().map(|n| crd_value(n)).collect::<Vec<_>>()
    })
    .to_string()
}

/// Create a Status failure body with the given code
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::Namespace;
    use kube::api::PostParams;
    use kube::Api;

    #[tokio::test]
    async fn test_hits_are_counted_per_method() {
        let mock = MockService::new().on_get(CRD_PATH, 200, &crd_list_json(&[]));
        let client = mock.clone().into_client();
        let namespaces: Api<Namespace> = Api::all(client);

        let _ = namespaces.get("crd-tests").await;
        let _ = namespaces
            .create(&PostParams::default(), &Namespace::default())
            .await;

        assert_eq!(mock.hits("GET", "/api/v1/namespaces/crd-tests"), 1);
        assert_eq!(mock.hits("POST", "/api/v1/namespaces"), 1);
        assert_eq!(mock.hits("GET", "/api/v1/namespaces"), 0);
        assert_eq!(mock.hits("GET", CRD_PATH), 0);
    }
}
