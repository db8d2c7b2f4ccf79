//! Demo data seeding for first runs.
//!
//! When the store has no collections, [`seed_demo_data`] fills it with three
//! collections pointing at public test APIs so the browser has something to
//! show immediately.

use crate::domain::error::Result;
use crate::domain::HttpMethod;
use crate::storage::backend::Storage;
use crate::storage::models::NewEndpoint;
use std::collections::BTreeMap;

struct DemoEndpoint {
    name: &'static str,
    method: HttpMethod,
    url: &'static str,
    headers: &'static [(&'static str, &'static str)],
    query: &'static [(&'static str, &'static str)],
    body: &'static str,
}

const JSON: &[(&str, &str)] = &[("Content-Type", "application/json")];
const AGENT: &str = "reqtui/0.1";

const DEMO: &[(&str, &[DemoEndpoint])] = &[
    (
        "JSONPlaceholder API",
        &[
            DemoEndpoint {
                name: "Get All Posts",
                method: HttpMethod::Get,
                url: "https://jsonplaceholder.typicode.com/posts",
                headers: JSON,
                query: &[],
                body: "",
            },
            DemoEndpoint {
                name: "Get Single Post",
                method: HttpMethod::Get,
                url: "https://jsonplaceholder.typicode.com/posts/1",
                headers: JSON,
                query: &[],
                body: "",
            },
            DemoEndpoint {
                name: "Create Post",
                method: HttpMethod::Post,
                url: "https://jsonplaceholder.typicode.com/posts",
                headers: JSON,
                query: &[],
                body: r#"{"title": "My New Post", "body": "Hello", "userId": 1}"#,
            },
            DemoEndpoint {
                name: "Update Post",
                method: HttpMethod::Put,
                url: "https://jsonplaceholder.typicode.com/posts/1",
                headers: JSON,
                query: &[],
                body: r#"{"id": 1, "title": "Updated Post", "body": "Edited", "userId": 1}"#,
            },
            DemoEndpoint {
                name: "Delete Post",
                method: HttpMethod::Delete,
                url: "https://jsonplaceholder.typicode.com/posts/1",
                headers: JSON,
                query: &[],
                body: "",
            },
        ],
    ),
    (
        "ReqRes API",
        &[
            DemoEndpoint {
                name: "List Users",
                method: HttpMethod::Get,
                url: "https://reqres.in/api/users",
                headers: JSON,
                query: &[("page", "2")],
                body: "",
            },
            DemoEndpoint {
                name: "Single User",
                method: HttpMethod::Get,
                url: "https://reqres.in/api/users/2",
                headers: JSON,
                query: &[],
                body: "",
            },
            DemoEndpoint {
                name: "Create User",
                method: HttpMethod::Post,
                url: "https://reqres.in/api/users",
                headers: JSON,
                query: &[],
                body: r#"{"name": "morpheus", "job": "leader"}"#,
            },
            DemoEndpoint {
                name: "Login",
                method: HttpMethod::Post,
                url: "https://reqres.in/api/login",
                headers: JSON,
                query: &[],
                body: r#"{"email": "eve.holt@reqres.in", "password": "cityslicka"}"#,
            },
        ],
    ),
    (
        "HTTPBin Testing",
        &[
            DemoEndpoint {
                name: "Test GET",
                method: HttpMethod::Get,
                url: "https://httpbin.org/get",
                headers: &[("User-Agent", AGENT)],
                query: &[("test", "value"), ("demo", "true")],
                body: "",
            },
            DemoEndpoint {
                name: "Test POST JSON",
                method: HttpMethod::Post,
                url: "https://httpbin.org/post",
                headers: &[("Content-Type", "application/json"), ("User-Agent", AGENT)],
                query: &[],
                body: r#"{"message": "Hello from reqtui!", "data": {"key": "value"}}"#,
            },
            DemoEndpoint {
                name: "Test Headers",
                method: HttpMethod::Get,
                url: "https://httpbin.org/headers",
                headers: &[("Authorization", "Bearer demo-token"), ("X-Custom-Header", "reqtui-demo")],
                query: &[],
                body: "",
            },
            DemoEndpoint {
                name: "Test Status Codes",
                method: HttpMethod::Get,
                url: "https://httpbin.org/status/200",
                headers: &[],
                query: &[],
                body: "",
            },
        ],
    ),
];

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Seeds the demo collections if the store is empty.
///
/// Returns `true` when data was created, `false` when the store already had
/// collections.
///
/// # Errors
///
/// Propagates storage failures; a partially seeded store is left as is.
pub fn seed_demo_data(storage: &mut dyn Storage) -> Result<bool> {
    let _span = tracing::debug_span!("seed_demo_data").entered();

    if !storage.is_empty()? {
        tracing::debug!("store already has collections, skipping demo data");
        return Ok(false);
    }

    for (collection_name, endpoints) in DEMO {
        let collection = storage.create_collection(collection_name)?;
        for demo in *endpoints {
            storage.create_endpoint(NewEndpoint {
                collection_id: collection.id,
                name: demo.name.to_string(),
                method: demo.method,
                url: demo.url.to_string(),
                headers: to_map(demo.headers),
                query_params: to_map(demo.query),
                request_body: demo.body.to_string(),
            })?;
        }
    }

    tracing::info!(collections = DEMO.len(), "demo data created");
    Ok(true)
}
