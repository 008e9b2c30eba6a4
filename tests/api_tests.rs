//! Activity HTTP API integration tests
//!
//! Each test builds its own app over a fresh temporary SQLite database.

use std::sync::{Arc, Once};

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tempfile::TempDir;

use activity_service::api::middleware::RequestIdMiddleware;
use activity_service::api::services::{AppStartTime, activity_routes, health_routes};
use activity_service::config::init_config;
use activity_service::services::{ActivityService, CreateActivityRequest};
use activity_service::storage::ActivityStore;
use activity_service::storage::backend::SeaOrmStorage;

// =============================================================================
// Test Setup
// =============================================================================

static INIT: Once = Once::new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_service() -> (Arc<ActivityService>, TempDir) {
    init_static_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("api_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");
    let store: Arc<dyn ActivityStore> = Arc::new(storage);

    (Arc::new(ActivityService::new(store)), temp_dir)
}

macro_rules! init_app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new($service))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .service(web::scope("/api").service(activity_routes()))
                .service(web::scope("/health").service(health_routes())),
        )
        .await
    };
}

fn sample_body() -> Value {
    json!({
        "studentId": 123,
        "courseCode": "AAA",
        "moduleCode": "2013J",
        "date": "2024-01-15",
        "sumClicks": 25
    })
}

// =============================================================================
// CRUD
// =============================================================================

#[actix_rt::test]
async fn test_create_returns_201_with_camel_case_body() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::post()
        .uri("/api/activities")
        .set_json(sample_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["studentId"], 123);
    assert_eq!(body["data"]["courseCode"], "AAA");
    assert_eq!(body["data"]["moduleCode"], "2013J");
    assert_eq!(body["data"]["date"], "2024-01-15");
    assert_eq!(body["data"]["sumClicks"], 25);
}

#[actix_rt::test]
async fn test_create_duplicate_returns_409() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = TestRequest::post()
            .uri("/api/activities")
            .set_json(sample_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_rt::test]
async fn test_create_with_blank_course_returns_400() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let mut body = sample_body();
    body["courseCode"] = json!("");
    let req = TestRequest::post()
        .uri("/api/activities")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3004);
    assert_eq!(
        body["data"]["validationErrors"]["courseCode"],
        "Course code is required"
    );
}

#[actix_rt::test]
async fn test_create_without_sum_clicks_returns_400() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service.clone());

    let req = TestRequest::post()
        .uri("/api/activities")
        .set_json(json!({
            "studentId": 1,
            "courseCode": "AAA",
            "moduleCode": "2013J",
            "date": "2024-01-15"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
    assert!(service.list_all().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_put_negative_sum_clicks_names_the_field() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::post()
        .uri("/api/activities")
        .set_json(sample_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = TestRequest::put()
        .uri("/api/activities/1")
        .set_json(json!({ "sumClicks": -1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["validationErrors"]["sumClicks"].is_string());
}

#[actix_rt::test]
async fn test_malformed_inputs_return_400_envelope() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let bad_json = TestRequest::post()
        .uri("/api/activities")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, bad_json).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);

    let mut invalid_date = sample_body();
    invalid_date["date"] = json!("2024-13-45");
    let req = TestRequest::post()
        .uri("/api/activities")
        .set_json(invalid_date)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::get()
        .uri("/api/activities/student/abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::get()
        .uri("/api/activities/student/1/date/not-a-date")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_get_missing_returns_404() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::get().uri("/api/activities/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3000);
    assert!(body.get("data").is_none());
}

#[actix_rt::test]
async fn test_put_updates_only_supplied_fields() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::post()
        .uri("/api/activities")
        .set_json(sample_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = TestRequest::put()
        .uri("/api/activities/1")
        .set_json(json!({ "sumClicks": 40 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["sumClicks"], 40);
    assert_eq!(body["data"]["date"], "2024-01-15");

    let req = TestRequest::put()
        .uri("/api/activities/2")
        .set_json(json!({ "sumClicks": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_delete_returns_204_then_404() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::post()
        .uri("/api/activities")
        .set_json(sample_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = TestRequest::delete().uri("/api/activities/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = TestRequest::delete().uri("/api/activities/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Increment 与汇总
// =============================================================================

#[actix_rt::test]
async fn test_increment_then_total() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::post()
        .uri("/api/activities")
        .set_json(sample_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = TestRequest::post()
        .uri("/api/activities/increment?studentId=123&courseCode=AAA&moduleCode=2013J&date=2024-01-15&clicks=5")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["sumClicks"], 30);

    let req = TestRequest::get()
        .uri("/api/activities/student/123/total-clicks")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], 30);

    let req = TestRequest::get()
        .uri("/api/activities/student/123/course/AAA/2013J/total-clicks")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], 30);

    let req = TestRequest::get()
        .uri("/api/activities/student/999/total-clicks")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], 0);
}

#[actix_rt::test]
async fn test_increment_defaults_to_one_click() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::post()
        .uri("/api/activities/increment?studentId=7&courseCode=BBB&moduleCode=2014B&date=2024-02-01")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["sumClicks"], 1);
}

#[actix_rt::test]
async fn test_negative_increment_on_absent_record_returns_422() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::post()
        .uri("/api/activities/increment?studentId=7&courseCode=BBB&moduleCode=2014B&date=2024-02-01&clicks=-3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3002);
}

#[actix_rt::test]
async fn test_increment_missing_parameter_returns_400() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::post()
        .uri("/api/activities/increment?studentId=7&courseCode=BBB")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// 过滤查询
// =============================================================================

async fn seed(service: &ActivityService) {
    let rows = [
        (1, "AAA", "2013J", (2024, 1, 10), 5),
        (1, "AAA", "2013J", (2024, 1, 12), 7),
        (1, "BBB", "2014B", (2024, 1, 12), 3),
        (2, "AAA", "2013J", (2024, 1, 11), 11),
    ];
    for (student_id, course, module, (y, m, d), clicks) in rows {
        service
            .create(CreateActivityRequest {
                student_id,
                course_code: course.to_string(),
                module_code: module.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                sum_clicks: clicks,
            })
            .await
            .unwrap();
    }
}

fn data_len(body: &Value) -> usize {
    body["data"].as_array().map(Vec::len).unwrap_or(0)
}

#[actix_rt::test]
async fn test_filtered_listings() {
    let (service, _dir) = create_service().await;
    seed(&service).await;
    let app = init_app!(service);

    let cases = [
        ("/api/activities", 4),
        ("/api/activities/student/1", 3),
        ("/api/activities/student/42", 0),
        ("/api/activities/student/1/date/2024-01-12", 2),
        ("/api/activities/student/1/course/AAA/2013J", 2),
        ("/api/activities/course/AAA/2013J", 3),
        (
            "/api/activities/student/1/date-range?startDate=2024-01-10&endDate=2024-01-11",
            1,
        ),
        (
            "/api/activities/course/AAA/2013J/date-range?startDate=2024-01-11&endDate=2024-01-12",
            2,
        ),
        (
            "/api/activities/student/1/date-range?startDate=2024-01-12&endDate=2024-01-10",
            0,
        ),
    ];

    for (uri, expected) in cases {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(data_len(&body), expected, "{}", uri);
    }
}

#[actix_rt::test]
async fn test_date_range_requires_both_bounds() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::get()
        .uri("/api/activities/student/1/date-range?startDate=2024-01-10")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Middleware 与健康检查
// =============================================================================

#[actix_rt::test]
async fn test_request_id_header() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::get().uri("/api/activities").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().get("x-request-id").is_some());

    let req = TestRequest::get()
        .uri("/api/activities")
        .insert_header(("X-Request-ID", "trace-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-42");
}

#[actix_rt::test]
async fn test_health_endpoints() {
    let (service, _dir) = create_service().await;
    let app = init_app!(service);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["storage"]["backend"], "sqlite");

    let req = TestRequest::get().uri("/health/ready").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/health/live").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );
}
