//! Router-level tests: real handlers over an in-memory `SqliteStore`.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use curate_core::{rating::Rateable, store::CatalogStore};
use curate_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> (Router, Arc<SqliteStore>) {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  (api_router(store.clone()), store)
}

/// Send one request and decode the JSON body (`Null` when empty).
async fn send(
  app:    &Router,
  method: &str,
  uri:    &str,
  body:   Option<Value>,
) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(b) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(b.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };
  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

async fn create(app: &Router, uri: &str, body: Value) -> Value {
  let (status, json) = send(app, "POST", uri, Some(body)).await;
  assert_eq!(status, StatusCode::CREATED, "body: {json}");
  json
}

fn ids(list: &Value) -> Vec<i64> {
  list
    .as_array()
    .unwrap()
    .iter()
    .map(|v| v["id"].as_i64().unwrap())
    .collect()
}

// ── Authors ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_authors_returns_all_in_creation_order() {
  let (app, _) = app().await;
  let a1 = create(&app, "/authors", json!({ "first": "One", "last": "L" })).await;
  let a2 = create(&app, "/authors", json!({ "first": "Two", "last": "L" })).await;

  let (status, list) = send(&app, "GET", "/authors", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&list), vec![a1["id"].as_i64().unwrap(), a2["id"].as_i64().unwrap()]);
}

#[tokio::test]
async fn create_author_returns_created_record() {
  let (app, store) = app().await;
  let (status, json) = send(
    &app,
    "POST",
    "/authors",
    Some(json!({ "author": { "first": "First", "last": "Last" } })),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(json["first"], "First");
  assert_eq!(json["last"], "Last");
  let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
  assert_eq!(keys.len(), 3);

  let stored = store.list_authors().await.unwrap();
  assert_eq!(stored.last().unwrap().first, "First");
}

#[tokio::test]
async fn create_author_with_blank_first_is_rejected() {
  let (app, store) = app().await;
  let (status, json) =
    send(&app, "POST", "/authors", Some(json!({ "author": { "first": "" } }))).await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(json["errors"]["first"], json!(["can't be blank"]));
  assert!(store.list_authors().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_author_saves_changes() {
  let (app, store) = app().await;
  let author = create(&app, "/authors", json!({ "first": "First", "last": "Last" })).await;
  let id = author["id"].as_i64().unwrap();

  let (status, json) = send(
    &app,
    "PATCH",
    &format!("/authors/{id}"),
    Some(json!({ "author": { "first": "Updated" } })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["first"], "Updated");
  assert_eq!(json["last"], "Last");
  assert_eq!(store.get_author(id).await.unwrap().unwrap().first, "Updated");
}

#[tokio::test]
async fn update_author_with_blank_first_keeps_stored_value() {
  let (app, store) = app().await;
  let author = create(&app, "/authors", json!({ "first": "First" })).await;
  let id = author["id"].as_i64().unwrap();

  let (status, json) = send(
    &app,
    "PATCH",
    &format!("/authors/{id}"),
    Some(json!({ "author": { "first": "" } })),
  )
  .await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(json["errors"]["first"], json!(["can't be blank"]));
  assert_eq!(store.get_author(id).await.unwrap().unwrap().first, "First");
}

#[tokio::test]
async fn update_author_with_null_last_clears_it() {
  let (app, store) = app().await;
  let author = create(&app, "/authors", json!({ "first": "Ada", "last": "Lovelace" })).await;
  let id = author["id"].as_i64().unwrap();

  let (status, json) = send(
    &app,
    "PATCH",
    &format!("/authors/{id}"),
    Some(json!({ "author": { "last": null } })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "id": id, "first": "Ada", "last": null }));
  assert_eq!(store.get_author(id).await.unwrap().unwrap().last, None);
}

#[tokio::test]
async fn update_missing_author_is_not_found() {
  let (app, _) = app().await;
  let (status, _) =
    send(&app, "PATCH", "/authors/99", Some(json!({ "first": "X" }))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn destroy_author_removes_row() {
  let (app, store) = app().await;
  let author = create(&app, "/authors", json!({ "first": "First" })).await;
  let id = author["id"].as_i64().unwrap();

  let (status, body) = send(&app, "DELETE", &format!("/authors/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert_eq!(body, Value::Null);
  assert!(store.get_author(id).await.unwrap().is_none());

  let (status, _) = send(&app, "DELETE", &format!("/authors/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn destroy_unknown_author_id_is_not_found() {
  let (app, store) = app().await;
  create(&app, "/authors", json!({ "first": "Keep" })).await;

  let (status, _) = send(&app, "DELETE", "/authors/no_id", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(store.list_authors().await.unwrap().len(), 1);
}

#[tokio::test]
async fn show_author() {
  let (app, _) = app().await;
  let author = create(&app, "/authors", json!({ "first": "Ada" })).await;
  let id = author["id"].as_i64().unwrap();

  let (status, json) = send(&app, "GET", &format!("/authors/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "id": id, "first": "Ada", "last": null }));

  let (status, _) = send(&app, "GET", "/authors/12345", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_attributes_are_bad_request() {
  let (app, _) = app().await;
  let (status, _) = send(&app, "POST", "/authors", Some(json!({ "first": 42 }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Resources ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_resources_returns_all_in_creation_order() {
  let (app, _) = app().await;
  let r1 = create(&app, "/resources", json!({ "name": "A", "description": "D" })).await;
  let r2 = create(&app, "/resources", json!({ "name": "B", "description": "D" })).await;

  let (status, list) = send(&app, "GET", "/resources", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&list), vec![r1["id"].as_i64().unwrap(), r2["id"].as_i64().unwrap()]);
}

#[tokio::test]
async fn create_resource_returns_created_record() {
  let (app, store) = app().await;
  let json = create(
    &app,
    "/resources",
    json!({ "resource": { "name": "Name", "description": "Description" } }),
  )
  .await;

  assert_eq!(json["description"], "Description");
  assert_eq!(
    json,
    json!({ "id": json["id"], "name": "Name", "description": "Description" })
  );
  assert_eq!(store.list_resources().await.unwrap().last().unwrap().name, "Name");
}

#[tokio::test]
async fn create_resource_with_blank_fields_is_rejected() {
  let (app, store) = app().await;
  let (status, json) = send(
    &app,
    "POST",
    "/resources",
    Some(json!({ "resource": { "name": "", "description": "" } })),
  )
  .await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(json["errors"]["name"], json!(["can't be blank"]));
  assert_eq!(json["errors"]["description"], json!(["can't be blank"]));
  assert!(store.list_resources().await.unwrap().is_empty());
}

#[tokio::test]
async fn put_resource_updates_name_only() {
  let (app, store) = app().await;
  let r = create(&app, "/resources", json!({ "name": "Name", "description": "Description" })).await;
  let id = r["id"].as_i64().unwrap();

  let (status, json) = send(
    &app,
    "PUT",
    &format!("/resources/{id}"),
    Some(json!({ "resource": { "name": "New Name" } })),
  )
  .await;

  assert!(status.is_success());
  assert_eq!(json["name"], "New Name");
  let stored = store.get_resource(id).await.unwrap().unwrap();
  assert_eq!(stored.name, "New Name");
  assert_eq!(stored.description, "Description");
}

#[tokio::test]
async fn patch_resource_with_blank_name_keeps_stored_value() {
  let (app, store) = app().await;
  let r = create(&app, "/resources", json!({ "name": "Name", "description": "Description" })).await;
  let id = r["id"].as_i64().unwrap();

  let (status, json) = send(
    &app,
    "PATCH",
    &format!("/resources/{id}"),
    Some(json!({ "resource": { "name": "" } })),
  )
  .await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(json["errors"]["name"], json!(["can't be blank"]));
  assert_eq!(store.get_resource(id).await.unwrap().unwrap().name, "Name");
}

#[tokio::test]
async fn destroy_resource_twice() {
  let (app, store) = app().await;
  let r = create(&app, "/resources", json!({ "name": "Name", "description": "D" })).await;
  let id = r["id"].as_i64().unwrap();

  let (status, _) = send(&app, "DELETE", &format!("/resources/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert!(store.get_resource(id).await.unwrap().is_none());

  let (status, _) = send(&app, "DELETE", &format!("/resources/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send(&app, "DELETE", "/resources/no_id", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resource_with_unknown_type_is_rejected() {
  let (app, store) = app().await;
  let (status, json) = send(
    &app,
    "POST",
    "/resources",
    Some(json!({ "name": "N", "description": "D", "resource_type_id": 77 })),
  )
  .await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(json["errors"]["resource_type"], json!(["must exist"]));
  assert!(store.list_resources().await.unwrap().is_empty());
}

#[tokio::test]
async fn resource_with_reviews_cannot_be_destroyed() {
  let (app, store) = app().await;
  let r = create(&app, "/resources", json!({ "name": "N", "description": "D" })).await;
  let id = r["id"].as_i64().unwrap();
  create(&app, "/reviews", json!({ "resource_id": id, "comment": "Nice" })).await;

  let (status, json) = send(&app, "DELETE", &format!("/resources/{id}"), None).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(
    json["errors"]["base"],
    json!(["Cannot delete record because dependent reviews exist"])
  );
  assert!(store.get_resource(id).await.unwrap().is_some());
}

// ── Resource types ───────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_resource_type_is_rejected() {
  let (app, store) = app().await;
  let first = create(&app, "/resource_types", json!({ "resource_type": "video" })).await;

  let (status, json) = send(
    &app,
    "POST",
    "/resource_types",
    Some(json!({ "resource_type": { "resource_type": "video" } })),
  )
  .await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(json["errors"]["resource_type"], json!(["has already been taken"]));

  let stored = store.list_resource_types().await.unwrap();
  assert_eq!(stored.len(), 1);
  assert_eq!(stored[0].id, first["id"].as_i64().unwrap());
}

#[tokio::test]
async fn resource_type_may_keep_its_own_value_on_update() {
  let (app, _) = app().await;
  let video = create(&app, "/resource_types", json!({ "resource_type": "video" })).await;
  create(&app, "/resource_types", json!({ "resource_type": "book" })).await;
  let id = video["id"].as_i64().unwrap();

  let (status, _) = send(
    &app,
    "PATCH",
    &format!("/resource_types/{id}"),
    Some(json!({ "resource_type": "video" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (status, json) = send(
    &app,
    "PATCH",
    &format!("/resource_types/{id}"),
    Some(json!({ "resource_type": "book" })),
  )
  .await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(json["errors"]["resource_type"], json!(["has already been taken"]));
}

#[tokio::test]
async fn blank_resource_type_is_rejected() {
  let (app, _) = app().await;
  let (status, json) =
    send(&app, "POST", "/resource_types", Some(json!({ "resource_type": " " }))).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(json["errors"]["resource_type"], json!(["can't be blank"]));
}

#[tokio::test]
async fn null_resource_type_id_unclassifies_resource() {
  let (app, store) = app().await;
  let video = create(&app, "/resource_types", json!({ "resource_type": "video" })).await;
  let type_id = video["id"].as_i64().unwrap();
  let r = create(
    &app,
    "/resources",
    json!({ "name": "Talk", "description": "D", "resource_type_id": type_id }),
  )
  .await;
  let id = r["id"].as_i64().unwrap();

  let (status, json) = send(
    &app,
    "PATCH",
    &format!("/resources/{id}"),
    Some(json!({ "name": "Talk 2" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["resource_type_id"], type_id);

  let (status, json) = send(
    &app,
    "PATCH",
    &format!("/resources/{id}"),
    Some(json!({ "resource_type_id": null })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "id": id, "name": "Talk 2", "description": "D" }));
  assert_eq!(store.get_resource(id).await.unwrap().unwrap().resource_type_id, None);

  let (status, _) = send(&app, "DELETE", &format!("/resource_types/{type_id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn resource_type_in_use_cannot_be_destroyed() {
  let (app, store) = app().await;
  let video = create(&app, "/resource_types", json!({ "resource_type": "video" })).await;
  let type_id = video["id"].as_i64().unwrap();
  let r = create(
    &app,
    "/resources",
    json!({ "name": "Talk", "description": "D", "resource_type_id": type_id }),
  )
  .await;
  assert_eq!(r["resource_type_id"], type_id);

  let (status, json) =
    send(&app, "DELETE", &format!("/resource_types/{type_id}"), None).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(
    json["errors"]["base"],
    json!(["Cannot delete record because dependent resources exist"])
  );
  assert!(store.get_resource_type(type_id).await.unwrap().is_some());
}

// ── Reviews and ratings ──────────────────────────────────────────────────────

#[tokio::test]
async fn review_requires_comment_and_existing_resource() {
  let (app, store) = app().await;
  let (status, json) = send(
    &app,
    "POST",
    "/reviews",
    Some(json!({ "review": { "resource_id": 5, "comment": "" } })),
  )
  .await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(json["errors"]["comment"], json!(["can't be blank"]));
  assert_eq!(json["errors"]["resource"], json!(["must exist"]));
  assert!(store.list_reviews().await.unwrap().is_empty());
}

#[tokio::test]
async fn review_lifecycle() {
  let (app, _) = app().await;
  let r = create(&app, "/resources", json!({ "name": "N", "description": "D" })).await;
  let resource_id = r["id"].as_i64().unwrap();
  let review =
    create(&app, "/reviews", json!({ "resource_id": resource_id, "comment": "Good" })).await;
  let id = review["id"].as_i64().unwrap();
  assert_eq!(review, json!({ "id": id, "resource_id": resource_id, "comment": "Good" }));

  let (status, json) = send(
    &app,
    "PATCH",
    &format!("/reviews/{id}"),
    Some(json!({ "comment": "Better" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["comment"], "Better");

  let (status, _) = send(&app, "DELETE", &format!("/reviews/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = send(&app, "GET", &format!("/reviews/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ratings_attach_to_reviews() {
  let (app, _) = app().await;
  let r = create(&app, "/resources", json!({ "name": "N", "description": "D" })).await;
  let review = create(
    &app,
    "/reviews",
    json!({ "resource_id": r["id"], "comment": "Good" }),
  )
  .await;
  let review_id = review["id"].as_i64().unwrap();

  let rating = create(
    &app,
    "/ratings",
    json!({ "stars": 4, "rateable": { "kind": "review", "id": review_id } }),
  )
  .await;
  assert_eq!(rating["rateable"], json!({ "kind": "review", "id": review_id }));

  let (status, list) =
    send(&app, "GET", &format!("/reviews/{review_id}/ratings"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list.as_array().unwrap().len(), 1);
  assert_eq!(list[0]["stars"], 4);
}

#[tokio::test]
async fn invalid_ratings_are_rejected() {
  let (app, _) = app().await;
  let (status, json) = send(
    &app,
    "POST",
    "/ratings",
    Some(json!({ "stars": 9, "rateable": { "kind": "review", "id": 1 } })),
  )
  .await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(json["errors"]["stars"], json!(["must be between 1 and 5"]));
  assert_eq!(json["errors"]["rateable"], json!(["must exist"]));

  let (status, json) = send(&app, "POST", "/ratings", Some(json!({}))).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(json["errors"]["stars"], json!(["can't be blank"]));
  assert_eq!(json["errors"]["rateable"], json!(["can't be blank"]));
}

#[tokio::test]
async fn stars_beyond_byte_range_are_unprocessable() {
  let (app, store) = app().await;
  let r = create(&app, "/resources", json!({ "name": "N", "description": "D" })).await;
  let review =
    create(&app, "/reviews", json!({ "resource_id": r["id"], "comment": "Good" })).await;
  let review_id = review["id"].as_i64().unwrap();

  for stars in [0, 6, 300, -1] {
    let (status, json) = send(
      &app,
      "POST",
      "/ratings",
      Some(json!({ "stars": stars, "rateable": { "kind": "review", "id": review_id } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "stars = {stars}");
    assert_eq!(json, json!({ "errors": { "stars": ["must be between 1 and 5"] } }));
  }
  assert!(
    store.list_ratings(Rateable::Review(review_id)).await.unwrap().is_empty()
  );
}
