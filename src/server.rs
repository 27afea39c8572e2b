use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::handlers::{meal_analyzer::is_timeout, MealAnalyzer};
use crate::models::MealQuery;

pub struct AppState {
    pub analyzer: Arc<MealAnalyzer>,
}

pub fn create_router(analyzer: Arc<MealAnalyzer>) -> Router {
    let state = Arc::new(AppState { analyzer });

    Router::new()
        .route("/", get(root_handler))
        .route("/analyze_meal", post(analyze_meal_handler))
        .with_state(state)
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "Running fine" }))
}

/// Parse failures come back as a 200 with an error body. Only model
/// transport failures change the status code.
async fn analyze_meal_handler(
    State(state): State<Arc<AppState>>,
    Json(query): Json<MealQuery>,
) -> Response {
    let analyzer = state.analyzer.clone();
    let dish_name = query.dish_name;

    // Detached so a dropped client connection does not abort the model call.
    let task = tokio::spawn(async move { analyzer.analyze_meal(&dish_name).await });

    match task.await {
        Ok(Ok(outcome)) => (StatusCode::OK, Json(outcome)).into_response(),
        Ok(Err(e)) if is_timeout(&e) => {
            log::error!("❌ Model call timed out: {:#}", e);
            error_response(StatusCode::GATEWAY_TIMEOUT, "Model provider timed out.")
        }
        Ok(Err(e)) => {
            log::error!("❌ Model call failed: {:#}", e);
            error_response(StatusCode::BAD_GATEWAY, "Model provider request failed.")
        }
        Err(e) => {
            log::error!("❌ Meal analysis task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::meal_analyzer::tests::FakeModel;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    fn router(model: FakeModel, timeout: Duration) -> Router {
        shared_router(Arc::new(model), timeout)
    }

    fn shared_router(model: Arc<FakeModel>, timeout: Duration) -> Router {
        create_router(Arc::new(MealAnalyzer::new(model, timeout)))
    }

    fn meal_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze_meal")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn post_meal_raw(app: Router, body: &str) -> (StatusCode, String) {
        let response = app.oneshot(meal_request(body)).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn post_meal(app: Router, body: &str) -> (StatusCode, Value) {
        let (status, text) = post_meal_raw(app, body).await;
        (status, serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_root_health_message() {
        let app = router(FakeModel::failing(), Duration::from_secs(5));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"message": "Running fine"}));
    }

    #[tokio::test]
    async fn test_analyze_meal_returns_model_json() {
        let reply = r#"{
            "dish_name": "Chicken Salad",
            "ingredients": ["chicken", "lettuce", "tomato", "olive oil"],
            "macros": {"calories": 350, "protein": 30, "carbs": 10, "fat": 15},
            "analysis_text": "Protein-rich."
        }"#;
        let app = router(FakeModel::replying(reply), Duration::from_secs(5));

        let (status, body) = post_meal(app, r#"{"dish_name": "Chicken Salad"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::from_str::<Value>(reply).unwrap());
    }

    #[tokio::test]
    async fn test_analyze_meal_keeps_model_key_order_and_numbers() {
        let reply = r#"{"dish_name":"Pilav","ingredients":["rice","butter"],"macros":{"calories":18446744073709551616,"protein":4.25,"carbs":45,"fat":7},"analysis_text":"Plain."}"#;
        let app = router(FakeModel::replying(reply), Duration::from_secs(5));

        let (status, body) = post_meal_raw(app, r#"{"dish_name": "Pilav"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, reply);
    }

    #[tokio::test]
    async fn test_dropped_request_does_not_cancel_model_call() {
        let model = Arc::new(FakeModel::stalling(Duration::from_millis(200)));
        let app = shared_router(model.clone(), Duration::from_secs(5));

        let dropped = tokio::time::timeout(
            Duration::from_millis(20),
            app.oneshot(meal_request(r#"{"dish_name": "Pizza"}"#)),
        )
        .await;
        assert!(dropped.is_err());
        assert!(!model.is_completed());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(model.is_completed());
    }

    #[tokio::test]
    async fn test_analyze_meal_panic_is_internal_error() {
        let app = router(FakeModel::panicking(), Duration::from_secs(5));

        let (status, body) = post_meal(app, r#"{"dish_name": "Pizza"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error."}));
    }

    #[tokio::test]
    async fn test_analyze_meal_invalid_reply_is_ok_with_error_body() {
        let app = router(FakeModel::replying("{ not valid json at all }"), Duration::from_secs(5));

        let (status, body) = post_meal(app, r#"{"dish_name": "Pizza"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "error": "Model returned invalid JSON, please try again.",
                "raw_response": "{ not valid json at all }"
            })
        );
    }

    #[tokio::test]
    async fn test_analyze_meal_model_failure_is_bad_gateway() {
        let app = router(FakeModel::failing(), Duration::from_secs(5));

        let (status, body) = post_meal(app, r#"{"dish_name": "Pizza"}"#).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({"error": "Model provider request failed."}));
    }

    #[tokio::test]
    async fn test_analyze_meal_model_timeout_is_gateway_timeout() {
        let app = router(
            FakeModel::stalling(Duration::from_secs(30)),
            Duration::from_millis(10),
        );

        let (status, body) = post_meal(app, r#"{"dish_name": "Pizza"}"#).await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body, json!({"error": "Model provider timed out."}));
    }

    #[tokio::test]
    async fn test_analyze_meal_missing_dish_name_is_rejected() {
        let app = router(FakeModel::replying("{}"), Duration::from_secs(5));

        let (status, _) = post_meal(app, r#"{"meal": "Pizza"}"#).await;
        assert!(status.is_client_error());
    }
}
