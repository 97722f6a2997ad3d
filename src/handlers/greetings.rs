// handlers/greetings.rs - GET /api/greetings and GET /api/greetings/random handlers

use axum::{extract::State, response::Json};

use crate::error::ApiError;
use crate::greeting::{pick_random, Greeting};
use crate::server::AppState;

pub async fn greetings_list(State(state): State<AppState>) -> Json<Vec<Greeting>> {
    Json(state.greeting_list())
}

pub async fn greetings_random(State(state): State<AppState>) -> Result<Json<Greeting>, ApiError> {
    pick_random(&state.greeting_list(), &mut rand::thread_rng())
        .map(Json)
        .ok_or_else(|| ApiError::service_unavailable("No greetings configured"))
}
