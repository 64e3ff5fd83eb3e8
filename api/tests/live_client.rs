//! Client round trip against a live server.
//!
//! # Design
//! Starts the API on a random port, then drives every `TodoClient`
//! operation over real HTTP using ureq. Checks that the client's request
//! building and status decoding agree with what the server writes.

use status_http::{HttpMethod, HttpRequest, HttpResponse, TodoClient};
use status_http::{ChangeDifficulty, ChangeName, CreateTodo};
use todo_api::{AppState, TodoStore};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// 4xx/5xx responses come back as data, not `Err`, so the client decides
/// what they mean.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => agent
            .patch(&req.path)
            .content_type(content_type(&req.headers))
            .send(body.as_bytes()),
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers,
        body,
    }
}

fn content_type(headers: &[(String, String)]) -> &str {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .map_or("application/json", |(_, value)| value.as_str())
}

fn start_server(store: TodoStore) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_api::run(listener, AppState::new(store)).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn crud_lifecycle() {
    let client = TodoClient::new(&start_server(TodoStore::new()));

    // list: empty
    let outcome = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(outcome.is_valid());
    assert_eq!(outcome.result, Some(Vec::new()));

    // create
    let input = CreateTodo {
        id: 0,
        name: "Integration test".to_string(),
        difficulty: 2,
    };
    let req = client.build_create_todo(&input).unwrap();
    let outcome = client.parse_create_todo(execute(req)).unwrap();
    assert!(outcome.is_valid(), "{}", outcome.status.all_errors("\n"));
    let created = outcome.result.unwrap();
    assert_eq!(created.location, "/api/todo/1");
    assert_eq!(created.value.name, "Integration test");
    let id = created.value.id;
    assert_eq!(id, 1);

    // get
    let outcome = client.parse_get_todo(execute(client.build_get_todo(id))).unwrap();
    let fetched = outcome.result.unwrap();
    assert_eq!(fetched.name, "Integration test");
    assert_eq!(fetched.difficulty, 2);

    // rename, then a rename the business rule refuses
    let req = client
        .build_change_name(&ChangeName {
            id,
            name: "Renamed".to_string(),
        })
        .unwrap();
    let status = client.parse_change_name(execute(req)).unwrap();
    assert!(status.is_valid());
    assert_eq!(status.message(), "Successfully updated the Todo Item");

    let req = client
        .build_change_name(&ChangeName {
            id,
            name: "Renamed!".to_string(),
        })
        .unwrap();
    let status = client.parse_change_name(execute(req)).unwrap();
    assert!(!status.is_valid());
    assert_eq!(status.errors()[0].member_names, vec!["Name"]);

    // difficulty out of range
    let req = client
        .build_change_difficulty(&ChangeDifficulty { id, difficulty: 6 })
        .unwrap();
    let status = client.parse_change_difficulty(execute(req)).unwrap();
    assert_eq!(
        status.all_errors("\n"),
        "The field Difficulty must be between 1 and 5."
    );

    // json patch
    let ops = serde_json::json!([{"op": "replace", "path": "/difficulty", "value": 4}]);
    let req = client.build_patch_todo(id, &ops).unwrap();
    let status = client.parse_patch_todo(execute(req)).unwrap();
    assert!(status.is_valid(), "{}", status.all_errors("\n"));
    let outcome = client.parse_get_todo(execute(client.build_get_todo(id))).unwrap();
    assert_eq!(outcome.result.unwrap().difficulty, 4);

    // delete, then delete again
    let status = client.parse_delete_todo(execute(client.build_delete_todo(id))).unwrap();
    assert!(status.is_valid());
    let status = client.parse_delete_todo(execute(client.build_delete_todo(id))).unwrap();
    assert!(!status.is_valid());
    assert!(status.errors()[0].is_global());

    // get after delete: valid, nothing returned
    let outcome = client.parse_get_todo(execute(client.build_get_todo(id))).unwrap();
    assert!(outcome.is_valid());
    assert!(outcome.result.is_none());
}

#[test]
fn create_with_invalid_input_decodes_field_errors() {
    let client = TodoClient::new(&start_server(TodoStore::new()));

    let input = CreateTodo {
        id: 0,
        name: "Loud!".to_string(),
        difficulty: 0,
    };
    let req = client.build_create_todo(&input).unwrap();
    let outcome = client.parse_create_todo(execute(req)).unwrap();

    assert!(!outcome.is_valid());
    assert!(outcome.result.is_none());
    assert_eq!(outcome.status.message(), "Failed with 2 errors");
}

#[test]
fn create_without_a_name_decodes_field_errors() {
    let client = TodoClient::new(&start_server(TodoStore::new()));

    let mut req = client.build_list_todos();
    req.method = HttpMethod::Post;
    req.body = Some(r#"{"difficulty":3}"#.to_string());
    let outcome = client.parse_create_todo(execute(req)).unwrap();

    assert!(!outcome.is_valid());
    assert_eq!(outcome.status.all_errors("\n"), "The Name field is required.");
}
