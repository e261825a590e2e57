//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};

use crate::auth::AuthError;
use crate::domain::{City, Preference, Route, RouteId, RouteWithDetails, TransportMode};
use crate::email::{ConfirmationEmail, Delivery};
use crate::search::SearchError;
use crate::store::{CityDirectory, ModeDirectory, RouteRepository};

use super::dto::*;
use super::error::AppError;
use super::extract::{AuthUser, bearer_token};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cities", get(list_cities))
        .route("/api/transport-modes", get(list_transport_modes))
        .route("/api/routes/search", get(search_routes))
        .route("/api/routes/confirm", post(confirm_route))
        .route("/api/routes/:id", get(get_route))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/user", get(current_user))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All cities, for autocomplete.
async fn list_cities(State(state): State<AppState>) -> Result<Json<Vec<City>>, AppError> {
    let cities = state
        .store
        .list_cities()
        .await
        .map_err(|e| AppError::internal("Failed to fetch cities", e))?;
    Ok(Json(cities))
}

async fn list_transport_modes(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransportMode>>, AppError> {
    let modes = state
        .store
        .list_modes()
        .await
        .map_err(|e| AppError::internal("Failed to fetch transport modes", e))?;
    Ok(Json(modes))
}

/// Non-empty value of a query parameter, passed through untrimmed.
fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::bad_request(message))
}

/// Search direct routes between two cities.
async fn search_routes(
    State(state): State<AppState>,
    Query(query): Query<RouteSearchQuery>,
) -> Result<Json<Vec<RouteWithDetails>>, AppError> {
    let origin = required(&query.origin, "Origin city is required")?;
    let destination = required(&query.destination, "Destination city is required")?;
    let preference = match query.preference.as_deref().filter(|p| !p.is_empty()) {
        Some(raw) => raw
            .parse::<Preference>()
            .map_err(|e| AppError::bad_request(e.to_string()))?,
        None => Preference::default(),
    };

    let routes = state
        .search
        .search(origin, destination, preference)
        .await
        .map_err(|e| AppError::internal("Failed to search routes", e))?;
    Ok(Json(routes))
}

/// A single raw route.
async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Route>, AppError> {
    let id: RouteId = id
        .parse()
        .map_err(|_| AppError::bad_request("Invalid route ID"))?;

    state
        .store
        .route_by_id(id)
        .await
        .map_err(|e| AppError::internal("Failed to fetch route", e))?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Route not found"))
}

fn parse_route_id(input: &RouteIdInput) -> Option<RouteId> {
    match input {
        RouteIdInput::Number(n) => i32::try_from(*n).ok().map(RouteId),
        RouteIdInput::Text(s) => s.parse().ok(),
    }
}

/// Email the details of a route to the signed-in user.
async fn confirm_route(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    body: Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Some(AuthUser(user)) = user else {
        return Err(AppError::unauthorized(
            "You must be logged in to confirm a route",
        ));
    };

    let Json(req) = body.map_err(|e| AppError::bad_request(e.body_text()))?;

    let missing = || AppError::bad_request("Missing required fields: routeId or email");
    let route_id = match &req.route_id {
        None | Some(RouteIdInput::Number(0)) => return Err(missing()),
        Some(RouteIdInput::Text(s)) if s.trim().is_empty() => return Err(missing()),
        Some(input) => input,
    };
    let email = required(&req.email, "Missing required fields: routeId or email")?;

    let route_id =
        parse_route_id(route_id).ok_or_else(|| AppError::bad_request("Invalid route ID"))?;

    let details = state
        .assembler
        .assemble(route_id)
        .await
        .map_err(|e| match e {
            SearchError::Integrity(_) => {
                AppError::internal("Error fetching complete route details", e)
            }
            SearchError::Store(_) => AppError::internal("Failed to process your request", e),
        })?
        .ok_or_else(|| AppError::not_found("Route not found"))?;

    let message = ConfirmationEmail::render(&details, email, user.display_name())
        .map_err(|e| AppError::internal("Failed to process your request", e))?;

    match state.mailer.deliver(&message).await {
        Ok(Delivery::Simulated) => Ok(Json(
            MessageResponse::new("Email confirmation simulation successful")
                .with_details("This is a simulation since email service is not configured."),
        )),
        Ok(Delivery::Sent) => Ok(Json(MessageResponse::new(
            "Confirmation email sent successfully",
        ))),
        Err(e) => Err(AppError::internal("Failed to send confirmation email", e)),
    }
}

/// Create an account and sign it in.
async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.map_err(|e| AppError::bad_request(e.body_text()))?;

    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::bad_request("Username and password are required"));
    }
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(username);

    let profile = state
        .users
        .register(username, &req.password, name)
        .await
        .map_err(|e| match e {
            AuthError::UsernameTaken(_) => AppError::bad_request("Username already exists"),
            AuthError::Hash(_) => AppError::internal("Failed to register user", e),
        })?;

    let (token, _) = state.sessions.create(&profile).await;
    let body = SessionResponse {
        token,
        user: UserResponse::from(&profile),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let Json(req) = body.map_err(|e| AppError::bad_request(e.body_text()))?;

    let profile = state
        .users
        .verify(req.username.trim(), &req.password)
        .await
        .map_err(|e| AppError::internal("Failed to log in", e))?
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

    let (token, _) = state.sessions.create(&profile).await;
    tracing::info!(username = %profile.username, "user logged in");
    Ok(Json(SessionResponse {
        token,
        user: UserResponse::from(&profile),
    }))
}

/// End the caller's session, if any.
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<MessageResponse> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.remove(token).await;
    }
    Json(MessageResponse::new("Logged out"))
}

async fn current_user(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}
