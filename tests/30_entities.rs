//! Entity lifecycle tests against a real database. Skipped unless
//! DATABASE_URL is set; each test scrubs the slugs it uses so reruns are
//! clean.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use portfolio_api::auth::{generate_token, Role};

fn admin_request(method: &str, path: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));

    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn scrub_slugs(pool: &PgPool, slugs: &[&str]) {
    let slugs: Vec<String> = slugs.iter().map(|s| s.to_string()).collect();
    sqlx::query("DELETE FROM posts WHERE slug = ANY($1)")
        .bind(&slugs)
        .execute(pool)
        .await
        .expect("scrub posts");
    sqlx::query("DELETE FROM projects WHERE slug = ANY($1)")
        .bind(&slugs)
        .execute(pool)
        .await
        .expect("scrub projects");
}

#[tokio::test]
async fn duplicate_slug_create_conflicts() {
    let Some((app, pool)) = common::db_app().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let token = generate_token(Uuid::new_v4(), "admin@example.com", Role::Admin).unwrap();
    scrub_slugs(&pool, &["duplicate-slug-check"]).await;

    // Two creates whose titles normalize to the same slug: first wins,
    // second surfaces the storage constraint as a conflict.
    let payload = json!({
        "title": "Duplicate Slug Check",
        "slug": "",
        "excerpt": "e",
        "contentMd": "# one"
    });

    let (status, body) = common::send(
        app.clone(),
        admin_request("POST", "/api/admin/posts", &token, Some(payload.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["slug"], "duplicate-slug-check");

    let (status, body) = common::send(
        app.clone(),
        admin_request("POST", "/api/admin/posts", &token, Some(payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");

    scrub_slugs(&pool, &["duplicate-slug-check"]).await;
}

#[tokio::test]
async fn partial_update_leaves_other_fields_untouched() {
    let Some((app, pool)) = common::db_app().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let token = generate_token(Uuid::new_v4(), "admin@example.com", Role::Admin).unwrap();
    scrub_slugs(&pool, &["patch-keeps-fields"]).await;

    let (status, body) = common::send(
        app.clone(),
        admin_request(
            "POST",
            "/api/admin/posts",
            &token,
            Some(json!({
                "title": "Patch Keeps Fields",
                "slug": "patch-keeps-fields",
                "excerpt": "before",
                "contentMd": "# body",
                "tags": ["rust", "axum"],
                "published": false
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = common::send(
        app.clone(),
        admin_request(
            "PATCH",
            &format!("/api/admin/posts/{id}"),
            &token,
            Some(json!({ "published": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["published"], true);
    assert_eq!(body["data"]["title"], "Patch Keeps Fields");
    assert_eq!(body["data"]["slug"], "patch-keeps-fields");
    assert_eq!(body["data"]["excerpt"], "before");
    assert_eq!(body["data"]["tags"], json!(["rust", "axum"]));

    scrub_slugs(&pool, &["patch-keeps-fields"]).await;
}

#[tokio::test]
async fn unpublished_detail_hidden_from_public_but_visible_to_admin() {
    let Some((app, pool)) = common::db_app().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let token = generate_token(Uuid::new_v4(), "admin@example.com", Role::Admin).unwrap();
    scrub_slugs(&pool, &["draft-visibility-check"]).await;

    let (status, _) = common::send(
        app.clone(),
        admin_request(
            "POST",
            "/api/admin/projects",
            &token,
            Some(json!({
                "title": "Draft Visibility Check",
                "slug": "draft-visibility-check",
                "summary": "s",
                "contentMd": "# wip",
                "published": false
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Drafts are indistinguishable from missing rows for the public.
    let (status, body) = common::send(
        app.clone(),
        common::empty_request("GET", "/api/projects/draft-visibility-check"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    // The same row is visible with an admin session.
    let (status, body) = common::send(
        app.clone(),
        admin_request("GET", "/api/projects/draft-visibility-check", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "draft-visibility-check");
    assert_eq!(body["data"]["published"], false);

    scrub_slugs(&pool, &["draft-visibility-check"]).await;
}

#[tokio::test]
async fn delete_of_nonexistent_id_is_404() {
    let Some((app, _pool)) = common::db_app().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let token = generate_token(Uuid::new_v4(), "admin@example.com", Role::Admin).unwrap();

    let id = Uuid::new_v4();
    let (status, body) = common::send(
        app.clone(),
        admin_request("DELETE", &format!("/api/admin/posts/{id}"), &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, body) = common::send(
        app,
        admin_request("DELETE", &format!("/api/admin/projects/{id}"), &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn empty_slug_falls_back_to_title() {
    let Some((app, pool)) = common::db_app().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let token = generate_token(Uuid::new_v4(), "admin@example.com", Role::Admin).unwrap();
    scrub_slugs(&pool, &["hello-world"]).await;

    let (status, body) = common::send(
        app.clone(),
        admin_request(
            "POST",
            "/api/admin/posts",
            &token,
            Some(json!({
                "title": "Hello World",
                "slug": "",
                "excerpt": "e",
                "contentMd": "# hi"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["slug"], "hello-world");

    // Same fallback on the project create path.
    let (status, body) = common::send(
        app.clone(),
        admin_request(
            "POST",
            "/api/admin/projects",
            &token,
            Some(json!({
                "title": "Hello World",
                "slug": "   ",
                "summary": "s",
                "contentMd": "# hi"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["slug"], "hello-world");

    scrub_slugs(&pool, &["hello-world"]).await;
}
