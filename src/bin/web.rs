//! Single binary web server exposing the fixture engine via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Mutating calls take the acting principal from the X-Username header;
//! the principal that creates a tournament becomes its organizer.

use actix_web::{
    get, patch, post, put,
    web::{Data, Json, Path},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use tournament_fixtures::{
    cancel_match, fixture, generate_fixture, tournament_statistics, update_match_result,
    ErrorKind, Tournament, TournamentError, TournamentFormat, TournamentId, TournamentPatch,
    Venue, VenueBook,
};
use uuid::Uuid;

/// In-memory state: tournaments by id plus the venue directory/booking book.
/// One lock serializes every mutation, so result updates feeding the same
/// next match cannot race.
struct AppState {
    tournaments: HashMap<TournamentId, Tournament>,
    venues: VenueBook,
}

type SharedState = Data<RwLock<AppState>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    format: TournamentFormat,
    start_date: NaiveDate,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    name: String,
}

#[derive(Deserialize)]
struct ResultBody {
    home_score: i64,
    away_score: i64,
}

#[derive(Deserialize)]
struct CreateVenueBody {
    name: String,
    open_hour: u32,
    close_hour: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: Uuid,
}

/// Acting principal, from the X-Username header.
fn principal(req: &HttpRequest) -> String {
    req.headers()
        .get("x-username")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous")
        .to_string()
}

/// Map the error taxonomy onto HTTP statuses.
fn error_response(err: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::PermissionDenied => HttpResponse::Forbidden().json(body),
        ErrorKind::Conflict => HttpResponse::Conflict().json(body),
        ErrorKind::InvalidInput => HttpResponse::BadRequest().json(body),
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-fixtures",
    })
}

/// Create a tournament; the caller becomes its organizer.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: SharedState,
    req: HttpRequest,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let tournament = Tournament::new(
        body.name.clone(),
        principal(&req),
        body.format,
        body.start_date,
    );
    let id = tournament.id;
    g.tournaments.insert(id, tournament);
    HttpResponse::Ok().json(&g.tournaments[&id])
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments.get(&path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => not_found(),
    }
}

/// Merge-patch partial edit of a tournament (organizer only).
#[patch("/api/tournaments/{id}")]
async fn api_patch_tournament(
    state: SharedState,
    req: HttpRequest,
    path: Path<TournamentPath>,
    body: Json<TournamentPatch>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = match g.tournaments.get_mut(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    match t.apply_patch(&principal(&req), body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Register a team (registration must be open).
#[post("/api/tournaments/{id}/teams")]
async fn api_register_team(
    state: SharedState,
    path: Path<TournamentPath>,
    body: Json<RegisterTeamBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = match g.tournaments.get_mut(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    match t.register_team(body.name.trim()) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Close registration so the fixture can be generated (organizer only).
#[post("/api/tournaments/{id}/registration/close")]
async fn api_close_registration(
    state: SharedState,
    req: HttpRequest,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = match g.tournaments.get_mut(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    match t.close_registration(&principal(&req)) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Generate the fixture for a tournament (organizer only).
#[post("/api/tournaments/{id}/fixture")]
async fn api_generate_fixture(
    state: SharedState,
    req: HttpRequest,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let inner = &mut *g;
    let t = match inner.tournaments.get_mut(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    match generate_fixture(t, &mut inner.venues, &principal(&req), &mut rand::thread_rng()) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// All matches ordered by round and match number.
#[get("/api/tournaments/{id}/fixture")]
async fn api_get_fixture(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments.get(&path.id) {
        Some(t) => HttpResponse::Ok().json(fixture(t)),
        None => not_found(),
    }
}

/// Submit a result for one match (organizer only).
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_update_match_result(
    state: SharedState,
    req: HttpRequest,
    path: Path<TournamentMatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let inner = &mut *g;
    let t = match inner.tournaments.get_mut(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    let result = update_match_result(
        t,
        &mut inner.venues,
        &principal(&req),
        path.match_id,
        body.home_score,
        body.away_score,
        Utc::now().naive_utc(),
    );
    match result {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Cancel a match that has no result yet (organizer only).
#[post("/api/tournaments/{id}/matches/{match_id}/cancel")]
async fn api_cancel_match(
    state: SharedState,
    req: HttpRequest,
    path: Path<TournamentMatchPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = match g.tournaments.get_mut(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    match cancel_match(t, &principal(&req), path.match_id, Utc::now().naive_utc()) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Registered teams in standings order.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments.get(&path.id) {
        Some(t) => HttpResponse::Ok().json(t.standings()),
        None => not_found(),
    }
}

/// Aggregate statistics snapshot.
#[get("/api/tournaments/{id}/statistics")]
async fn api_statistics(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments.get(&path.id) {
        Some(t) => HttpResponse::Ok().json(tournament_statistics(t)),
        None => not_found(),
    }
}

/// Add a venue open the same hours every day.
#[post("/api/venues")]
async fn api_create_venue(state: SharedState, body: Json<CreateVenueBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let venue = Venue::open_daily(body.name.trim(), body.open_hour, body.close_hour);
    g.venues.add_venue(venue.clone());
    HttpResponse::Ok().json(venue)
}

/// All venues, active or not.
#[get("/api/venues")]
async fn api_list_venues(state: SharedState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.venues.venues())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(AppState {
        tournaments: HashMap::new(),
        venues: VenueBook::new(),
    }));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_patch_tournament)
            .service(api_register_team)
            .service(api_close_registration)
            .service(api_generate_fixture)
            .service(api_get_fixture)
            .service(api_update_match_result)
            .service(api_cancel_match)
            .service(api_standings)
            .service(api_statistics)
            .service(api_create_venue)
            .service(api_list_venues)
    })
    .bind(bind)?
    .run()
    .await
}
