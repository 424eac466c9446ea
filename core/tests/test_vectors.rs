//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use task_core::{
    ApiError, CreateTask, HttpMethod, HttpRequest, HttpResponse, ReplaceTask, Task, TaskClient,
    UpdateTask,
};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> TaskClient {
    TaskClient::new(BASE_URL)
}

fn cases(raw: &str) -> Vec<serde_json::Value> {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn input_id(case: &serde_json::Value) -> Uuid {
    case["input_id"].as_str().unwrap().parse().unwrap()
}

/// Check method, path, and (when the vector names one) the JSON body.
fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Compare a parse result against `expected_result` or `expected_error`.
fn assert_task_result(name: &str, case: &serde_json::Value, result: Result<Task, ApiError>) {
    if let Some(expected_error) = case.get("expected_error") {
        let err = result.unwrap_err();
        match expected_error.as_str().unwrap() {
            "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
            "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError"),
            other => panic!("{name}: unknown expected_error: {other}"),
        }
    } else {
        let task = result.unwrap();
        let expected: Task = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(task, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CreateTask = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_task(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_task(simulated_response(&case));
        assert_task_result(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_tasks();
        assert_request(name, &req, &case["expected_request"]);

        let tasks = c.parse_list_tasks(simulated_response(&case)).unwrap();
        let expected: Vec<Task> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(tasks, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_get_task(input_id(&case));
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_task(simulated_response(&case));
        assert_task_result(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Update (PUT and PATCH)
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = input_id(&case);

        let (req, result) = match case["method"].as_str().unwrap() {
            "PUT" => {
                let input: ReplaceTask = serde_json::from_value(case["input"].clone()).unwrap();
                let req = c.build_replace_task(id, &input).unwrap();
                (req, c.parse_replace_task(simulated_response(&case)))
            }
            "PATCH" => {
                let input: UpdateTask = serde_json::from_value(case["input"].clone()).unwrap();
                let req = c.build_update_task(id, &input).unwrap();
                (req, c.parse_update_task(simulated_response(&case)))
            }
            other => panic!("{name}: unknown update method: {other}"),
        };
        assert_request(name, &req, &case["expected_request"]);
        assert_task_result(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_delete_task(input_id(&case));
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_task(simulated_response(&case));
        assert_task_result(name, &case, result);
    }
}
