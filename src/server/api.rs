use crate::agent::TravelAgent;
use crate::html;
use crate::models::chat::{ ChatRequest, ChatResponse, ErrorResponse };
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Router,
    Json,
    extract::{ State, rejection::JsonRejection },
    response::{ Html, IntoResponse, Response },
    http::StatusCode,
};
use tower_http::cors::{ Any, CorsLayer };
use log::{ warn, error };

pub const INVALID_MESSAGES: &str = "Invalid messages array";
pub const PROCESSING_FAILED: &str = "Failed to process request";

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<TravelAgent>,
    pub maps_api_key: String,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .with_state(state)
}

fn error_response(code: StatusCode, message: impl Into<String>) -> Response {
    (code, Json(ErrorResponse { error: message.into() })).into_response()
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            warn!("Rejected chat request body: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, INVALID_MESSAGES);
        }
    };

    match state.agent.process_messages(&request.messages).await {
        Ok(reply) => {
            let response: ChatResponse = reply.into_response();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) if e.is_invalid_request() => {
            warn!("Rejected chat request: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            error!("Chat error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_FAILED)
        }
    }
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(html::render_index(&state.maps_api_key))
}

async fn health_handler() -> StatusCode {
    StatusCode::OK
}
