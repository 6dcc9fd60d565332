/// Integration tests for the CourseDeck API
///
/// These tests drive the full router end-to-end:
/// - Course catalogue CRUD and ratings
/// - Tag and category uniqueness
/// - Todo board moves, drops and deletes
/// - Flashcard review progression
/// - Pomodoro phase cycling
/// - Recommendations

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{create_course, create_todo, expect_status, TestContext};
use coursedeck_shared::store::{seed, Store};
use serde_json::json;

#[tokio::test]
async fn test_health_reports_counts() {
    let mut store = Store::new();
    seed::demo(&mut store, Utc::now());
    let ctx = TestContext::with_store(store);

    let response = ctx.get("/health").await;
    expect_status(&response, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["courses"], 5);
    assert_eq!(response.body["tasks"], 0);
}

#[tokio::test]
async fn test_course_lifecycle() {
    let ctx = TestContext::new();
    let id = create_course(&ctx, "Rust Fundamentals", "Programming", "beginner", 49.0, 10.0).await;

    let response = ctx.get(&format!("/v1/courses/{}", id)).await;
    expect_status(&response, StatusCode::OK);
    assert_eq!(response.body["name"], "Rust Fundamentals");
    assert_eq!(response.body["discounted_price"], json!(44.1));
    assert_eq!(response.body["tags"], json!(["rust"]));

    let response = ctx
        .put(
            &format!("/v1/courses/{}", id),
            json!({ "level": "intermediate", "discount": 50 }),
        )
        .await;
    expect_status(&response, StatusCode::OK);
    assert_eq!(response.body["level"], "intermediate");
    assert_eq!(response.body["discounted_price"], json!(24.5));
    assert_eq!(response.body["name"], "Rust Fundamentals");

    for rating in [5, 4] {
        let response = ctx
            .post(&format!("/v1/courses/{}/ratings", id), json!({ "rating": rating }))
            .await;
        expect_status(&response, StatusCode::OK);
    }
    let response = ctx.get(&format!("/v1/courses/{}", id)).await;
    assert_eq!(response.body["average_rating"], json!(4.5));
    assert_eq!(response.body["rating_count"], 2);

    let response = ctx.delete(&format!("/v1/courses/{}", id)).await;
    expect_status(&response, StatusCode::NO_CONTENT);

    let response = ctx.get(&format!("/v1/courses/{}", id)).await;
    expect_status(&response, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "not_found");
}

#[tokio::test]
async fn test_course_list_filters() {
    let ctx = TestContext::new();
    create_course(&ctx, "Rust Fundamentals", "Programming", "beginner", 49.0, 0.0).await;
    create_course(&ctx, "Async Rust", "Programming", "advanced", 89.0, 0.0).await;
    create_course(&ctx, "Colour Theory", "Design", "beginner", 29.0, 0.0).await;

    let response = ctx.get("/v1/courses?category=programming").await;
    expect_status(&response, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 2);

    let response = ctx.get("/v1/courses?category=Programming&level=advanced").await;
    let courses = response.body.as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["name"], "Async Rust");

    let response = ctx.get("/v1/courses?level=expert").await;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_course_validation_errors() {
    let ctx = TestContext::new();

    let response = ctx
        .post(
            "/v1/courses",
            json!({
                "name": "Rx",
                "description": "Too short",
                "category": "Programming",
                "level": "guru",
                "price": 10.0
            }),
        )
        .await;

    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "validation_error");
    let fields: Vec<&str> = response.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["description", "level", "name"]);

    let response = ctx
        .post("/v1/courses/1/ratings", json!({ "rating": 3 }))
        .await;
    expect_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tags_and_categories_are_unique() {
    let ctx = TestContext::new();
    create_course(&ctx, "Rust Fundamentals", "Programming", "beginner", 49.0, 0.0).await;

    // The course registered its tag
    let response = ctx.get("/v1/tags").await;
    assert_eq!(response.body[0]["name"], "rust");

    let response = ctx.post("/v1/tags", json!({ "name": "Rust" })).await;
    expect_status(&response, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "conflict");

    let response = ctx
        .post("/v1/categories", json!({ "name": "Programming", "description": "Code" }))
        .await;
    expect_status(&response, StatusCode::CREATED);
    let category_id = response.body["id"].as_i64().unwrap();

    let response = ctx.post("/v1/categories", json!({ "name": "programming" })).await;
    expect_status(&response, StatusCode::CONFLICT);

    let response = ctx.post("/v1/categories", json!({ "name": "ab" })).await;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"][0]["field"], "name");

    let response = ctx.delete(&format!("/v1/categories/{}", category_id)).await;
    expect_status(&response, StatusCode::NO_CONTENT);
    let response = ctx.delete(&format!("/v1/categories/{}", category_id)).await;
    expect_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_todo_moves() {
    let ctx = TestContext::new();
    let first = create_todo(&ctx, "Read chapter 1", "todo").await;
    let done = create_todo(&ctx, "Install toolchain", "completed").await;

    let response = ctx.post(&format!("/v1/todos/{}/forward", first), json!({})).await;
    expect_status(&response, StatusCode::OK);
    assert_eq!(response.body["changed"], true);
    assert_eq!(response.body["task"]["status"], "progress");
    assert_eq!(response.body["task"]["lane"], "doing");

    let response = ctx.post(&format!("/v1/todos/{}/forward", done), json!({})).await;
    expect_status(&response, StatusCode::OK);
    assert_eq!(response.body["changed"], false);
    assert_eq!(response.body["task"]["status"], "completed");

    let response = ctx.post(&format!("/v1/todos/{}/backward", done), json!({})).await;
    assert_eq!(response.body["changed"], true);
    assert_eq!(response.body["task"]["lane"], "doing");

    let response = ctx.post("/v1/todos/99/forward", json!({})).await;
    expect_status(&response, StatusCode::NOT_FOUND);

    let response = ctx.get("/v1/todos?status=progress").await;
    assert_eq!(response.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_todo_drop_and_delete() {
    let ctx = TestContext::new();
    create_todo(&ctx, "First", "todo").await;
    let second = create_todo(&ctx, "Second", "todo").await;

    let response = ctx
        .post(
            "/v1/todos/drop",
            json!({
                "source": { "lane": "todo", "index": 1 },
                "destination": { "lane": "done", "index": 0 }
            }),
        )
        .await;
    expect_status(&response, StatusCode::OK);
    assert_eq!(response.body["changed"], true);
    assert_eq!(response.body["task"]["id"], second);
    assert_eq!(response.body["task"]["status"], "completed");

    let response = ctx
        .post("/v1/todos/drop", json!({ "source": { "lane": "todo", "index": 0 } }))
        .await;
    expect_status(&response, StatusCode::OK);
    assert_eq!(response.body["changed"], false);

    let response = ctx
        .post(
            "/v1/todos/drop",
            json!({
                "source": { "lane": "doing", "index": 0 },
                "destination": { "lane": "todo", "index": 0 }
            }),
        )
        .await;
    expect_status(&response, StatusCode::NOT_FOUND);

    let response = ctx.get("/v1/todos/board").await;
    assert_eq!(response.body["todo"].as_array().unwrap().len(), 1);
    assert_eq!(response.body["doing"].as_array().unwrap().len(), 0);
    assert_eq!(response.body["done"].as_array().unwrap().len(), 1);

    let response = ctx.delete("/v1/todos/99").await;
    expect_status(&response, StatusCode::NOT_FOUND);
    let response = ctx.get("/v1/todos").await;
    assert_eq!(response.body.as_array().unwrap().len(), 2);

    let response = ctx.delete(&format!("/v1/todos/{}", second)).await;
    expect_status(&response, StatusCode::NO_CONTENT);
    let response = ctx.get("/v1/todos").await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_todo_update() {
    let ctx = TestContext::new();
    let id = create_todo(&ctx, "Draft essay", "todo").await;

    let response = ctx
        .put(&format!("/v1/todos/{}", id), json!({ "text": "Final essay", "status": "completed" }))
        .await;
    expect_status(&response, StatusCode::OK);
    assert_eq!(response.body["text"], "Final essay");
    assert_eq!(response.body["lane"], "done");

    let response = ctx.put(&format!("/v1/todos/{}", id), json!({ "text": "   " })).await;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);

    let response = ctx.put(&format!("/v1/todos/{}", id), json!({ "status": "doing" })).await;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);

    let response = ctx.post("/v1/todos", json!({ "text": "" })).await;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_flashcard_review_progression() {
    let ctx = TestContext::new();
    let response = ctx
        .post(
            "/v1/flashcards",
            json!({ "front": "What does `?` do?", "back": "Propagates errors." }),
        )
        .await;
    expect_status(&response, StatusCode::CREATED);
    assert_eq!(response.body["difficulty"], "new");
    let id = response.body["id"].as_i64().unwrap();
    let uri = format!("/v1/flashcards/{}/review", id);

    let mut last = None;
    for _ in 0..4 {
        let response = ctx.post(&uri, json!({ "correct": true })).await;
        expect_status(&response, StatusCode::OK);
        last = Some(response);
    }
    let last = last.unwrap();
    assert_eq!(last.body["previous_difficulty"], "easy");
    assert_eq!(last.body["difficulty"], "mastered");
    assert_eq!(last.body["message"], "Perfect! Card Mastered!");
    assert_eq!(last.body["card"]["correct_count"], 4);

    let response = ctx.post(&uri, json!({ "correct": false })).await;
    assert_eq!(response.body["difficulty"], "easy");
    assert_eq!(response.body["message"], "Slipped a little! Card moved back to Easy.");

    let response = ctx.get("/v1/flashcards?difficulty=easy").await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
    let response = ctx.get("/v1/flashcards?difficulty=mastered").await;
    assert_eq!(response.body.as_array().unwrap().len(), 0);

    let response = ctx.post("/v1/flashcards/99/review", json!({ "correct": true })).await;
    expect_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pomodoro_cycle() {
    let ctx = TestContext::new();
    let response = ctx
        .post(
            "/v1/pomodoros",
            json!({ "label": "Study", "rounds_before_long_break": 2 }),
        )
        .await;
    expect_status(&response, StatusCode::CREATED);
    assert_eq!(response.body["phase"], "focus");
    assert_eq!(response.body["phase_minutes"], 25);
    let uri = format!("/v1/pomodoros/{}/advance", response.body["id"]);

    let expected = [
        ("short_break", 1, 5),
        ("focus", 1, 25),
        ("long_break", 2, 15),
        ("focus", 0, 25),
    ];
    for (phase, rounds, minutes) in expected {
        let response = ctx.post(&uri, json!({})).await;
        expect_status(&response, StatusCode::OK);
        assert_eq!(response.body["phase"], phase);
        assert_eq!(response.body["completed_rounds"], rounds);
        assert_eq!(response.body["phase_minutes"], minutes);
    }

    let response = ctx.post("/v1/pomodoros", json!({ "label": "Bad", "focus_minutes": 0 })).await;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_recommendations() {
    let ctx = TestContext::new();
    let rust = create_course(&ctx, "Rust Basics", "Programming", "beginner", 40.0, 0.0).await;
    let go = create_course(&ctx, "Go Basics", "Programming", "beginner", 30.0, 50.0).await;
    create_course(&ctx, "Advanced Rust", "Programming", "advanced", 90.0, 0.0).await;
    ctx.post(&format!("/v1/courses/{}/ratings", rust), json!({ "rating": 5 }))
        .await;

    let request = |registered: bool, top_n: u32| {
        json!({
            "user_id": 7,
            "preferred_category": "programming",
            "skill_level": "beginner",
            "top_n": top_n,
            "is_registered": registered
        })
    };

    let response = ctx.post("/v1/recommendations", request(false, 10)).await;
    expect_status(&response, StatusCode::OK);
    let ids: Vec<i64> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["course_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![go, rust]);

    let response = ctx.post("/v1/recommendations", request(true, 1)).await;
    let results = response.body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["course_id"], rust);
    assert_eq!(results[0]["difficulty_level"], "beginner");

    let response = ctx
        .post(
            "/v1/recommendations",
            json!({
                "user_id": 0,
                "preferred_category": "programming",
                "skill_level": "beginner",
                "top_n": 0
            }),
        )
        .await;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_padding_does_not_satisfy_length_limits() {
    let ctx = TestContext::new();

    let response = ctx.post("/v1/categories", json!({ "name": " ab " })).await;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"][0]["field"], "name");

    let response = ctx.post("/v1/tags", json!({ "name": "  r " })).await;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"][0]["field"], "name");

    let response = ctx.post("/v1/pomodoros", json!({ "label": "   " })).await;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"][0]["field"], "label");

    let response = ctx.post("/v1/flashcards", json!({ "front": " ", "back": "answer" })).await;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was stored
    assert_eq!(ctx.get("/v1/categories").await.body, json!([]));
    assert_eq!(ctx.get("/v1/tags").await.body, json!([]));
    assert_eq!(ctx.get("/v1/pomodoros").await.body, json!([]));

    // Valid values are stored trimmed
    let response = ctx.post("/v1/categories", json!({ "name": "  Design  " })).await;
    expect_status(&response, StatusCode::CREATED);
    assert_eq!(response.body["name"], "Design");
}

#[tokio::test]
async fn test_course_image_can_be_cleared() {
    let ctx = TestContext::new();
    let id = create_course(&ctx, "Rust Fundamentals", "Programming", "beginner", 49.0, 0.0).await;
    let uri = format!("/v1/courses/{}", id);

    let response = ctx
        .put(&uri, json!({ "image_url": "https://cdn.example.com/rust.png" }))
        .await;
    expect_status(&response, StatusCode::OK);
    assert_eq!(response.body["image_url"], "https://cdn.example.com/rust.png");

    let response = ctx.put(&uri, json!({ "discount": 5 })).await;
    assert_eq!(response.body["image_url"], "https://cdn.example.com/rust.png");

    let response = ctx.put(&uri, json!({ "image_url": null })).await;
    expect_status(&response, StatusCode::OK);
    assert_eq!(response.body["image_url"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_tags_are_listed_by_name() {
    let ctx = TestContext::new();
    for name in ["web", "Async", "rust"] {
        let response = ctx.post("/v1/tags", json!({ "name": name })).await;
        expect_status(&response, StatusCode::CREATED);
    }

    let response = ctx.get("/v1/tags").await;
    let names: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Async", "rust", "web"]);
}
