// Coworker API Tests
//
// Full CRUD surface of /coworkers through the production route table.

#[macro_use]
#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::test;
use helpers::*;
use serde_json::{json, Value};

#[actix_web::test]
async fn test_create_coworker_returns_201_with_id() {
    let app = spawn_app!();

    let req = test::TestRequest::post()
        .uri("/coworkers")
        .set_json(json!({ "name": "Alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_created(&resp);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Alice");
    assert!(!assert_json_field(&body, "id").as_str().unwrap().is_empty());
    assert!(body["email"].is_null());
    assert_json_field(&body, "created_at");
}

#[actix_web::test]
async fn test_get_unknown_coworker_returns_404() {
    let app = spawn_app!();

    let req = test::TestRequest::get().uri("/coworkers/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_not_found(&resp);

    let body: Value = test::read_body_json(resp).await;
    let message = assert_error_body(&body, 404);
    assert!(message.contains("Coworker"));
}

#[actix_web::test]
async fn test_coworker_crud_lifecycle() {
    let app = spawn_app!();

    let req = test::TestRequest::post()
        .uri("/coworkers")
        .set_json(TestDataFactory::coworker_payload("Bob"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/coworkers/{}", id))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::put()
        .uri(&format!("/coworkers/{}", id))
        .set_json(json!({ "role": "Lead" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ok(&resp);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["role"], "Lead");
    assert_eq!(updated["name"], "Bob");
    assert_eq!(updated["email"], created["email"]);

    let req = test::TestRequest::delete()
        .uri(&format!("/coworkers/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ok(&resp);
    let deleted: Value = test::read_body_json(resp).await;
    assert_eq!(deleted["id"], created["id"]);

    let req = test::TestRequest::get()
        .uri(&format!("/coworkers/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_not_found(&resp);
}

#[actix_web::test]
async fn test_list_coworkers_newest_first() {
    let app = spawn_app!();

    for name in ["First", "Second", "Third"] {
        let req = test::TestRequest::post()
            .uri("/coworkers")
            .set_json(TestDataFactory::coworker_payload(name))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_created(&resp);
    }

    let req = test::TestRequest::get().uri("/coworkers").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[actix_web::test]
async fn test_list_coworkers_with_equality_filter() {
    let app = spawn_app!();

    for (name, role) in [("Ann", "Designer"), ("Ben", "Engineer"), ("Cid", "Designer")] {
        let req = test::TestRequest::post()
            .uri("/coworkers")
            .set_json(json!({ "name": name, "role": role }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get()
        .uri("/coworkers?role=Designer")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/coworkers?role=Manager")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_list_on_empty_store_returns_empty_array() {
    let app = spawn_app!();

    let req = test::TestRequest::get().uri("/coworkers").to_request();
    let resp = test::call_service(&app, req).await;
    assert_ok(&resp);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_update_and_delete_unknown_coworker_return_404() {
    let app = spawn_app!();

    let req = test::TestRequest::put()
        .uri("/coworkers/missing")
        .set_json(json!({ "name": "Nobody" }))
        .to_request();
    assert_not_found(&test::call_service(&app, req).await);

    let req = test::TestRequest::delete()
        .uri("/coworkers/missing")
        .to_request();
    assert_not_found(&test::call_service(&app, req).await);
}
