//! Single binary web server: JSON REST API for the knockout league.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8000 by default. Override with env: HOST, PORT.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use football_league_web::commentary::FallbackCommentator;
use football_league_web::logic;
use football_league_web::models::{CreateTeam, LeagueError, UpdatePlayer};
use football_league_web::notify::LogNotifier;
use football_league_web::store::{MemStore, Store};
use football_league_web::SeedPolicy;
use serde::Deserialize;
use std::sync::RwLock;

/// Shared state: the document store plus the two best-effort collaborators.
/// Every mutating handler takes the write lock for its whole read-check-write
/// sequence, which serializes bracket transitions.
struct AppCtx {
    store: RwLock<MemStore>,
    commentator: FallbackCommentator,
    notifier: LogNotifier,
}

type AppState = Data<AppCtx>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

fn error_response(e: &LeagueError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

#[derive(Deserialize)]
struct IdPath {
    id: String,
}

#[derive(Deserialize)]
struct ExpandQuery {
    #[serde(default)]
    expand_players: bool,
}

#[derive(Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

#[get("/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "football-league-web",
    })
}

#[get("/")]
async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Football knockout league backend. See /health."
    }))
}

/// Register a new team (empty squad; use autofill to populate it).
#[post("/teams")]
async fn api_create_team(state: AppState, body: Json<CreateTeam>) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::create_team(&mut *g, &body) {
        Ok(team) => HttpResponse::Ok().json(serde_json::json!({
            "teamId": team.id,
            "message": format!("Team '{}' from {} created", team.team_name, team.country),
        })),
        Err(e) => error_response(&e),
    }
}

#[get("/teams")]
async fn api_list_teams(state: AppState) -> HttpResponse {
    let g = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.find_teams())
}

/// Get a team by id; `?expand_players=true` inlines the full player records.
#[get("/teams/{id}")]
async fn api_get_team(state: AppState, path: Path<IdPath>, q: Query<ExpandQuery>) -> HttpResponse {
    let g = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let team = match g.get_team(&path.id) {
        Some(t) => t,
        None => return error_response(&LeagueError::TeamNotFound(path.id.clone())),
    };
    if !q.expand_players {
        return HttpResponse::Ok().json(team);
    }
    let players: Vec<_> = team.squad.iter().filter_map(|pid| g.get_player(pid)).collect();
    let mut doc = serde_json::to_value(&team).unwrap_or_default();
    if let Some(obj) = doc.as_object_mut() {
        obj.insert(
            "squad".to_string(),
            serde_json::to_value(players).unwrap_or_default(),
        );
    }
    HttpResponse::Ok().json(doc)
}

#[put("/teams/{id}")]
async fn api_update_team(state: AppState, path: Path<IdPath>, body: Json<CreateTeam>) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::update_team(&mut *g, &path.id, &body) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => error_response(&e),
    }
}

/// Delete a team and its players. Rejected once a tournament is in progress.
#[delete("/teams/{id}")]
async fn api_delete_team(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::delete_team(&mut *g, &path.id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "teamId": path.id,
            "message": "Team and its players deleted",
        })),
        Err(e) => error_response(&e),
    }
}

#[derive(Deserialize)]
struct ReplaceTeamBody {
    remove_team_id: String,
    #[serde(flatten)]
    team: CreateTeam,
}

/// Swap one registered team for a new one before the tournament starts.
#[post("/teams/replace")]
async fn api_replace_team(state: AppState, body: Json<ReplaceTeamBody>) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::replace_team(&mut *g, &body.remove_team_id, &body.team) {
        Ok(team) => HttpResponse::Ok().json(serde_json::json!({
            "old_team_removed": body.remove_team_id,
            "new_team_id": team.id,
            "message": format!("Team replaced. {} created", team.team_name),
        })),
        Err(e) => error_response(&e),
    }
}

/// Fill a team's squad with 23 generated players and refresh its rating.
#[post("/teams/{id}/autofill")]
async fn api_autofill_team(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::autofill_squad(&mut *g, &path.id) {
        Ok((count, rating)) => HttpResponse::Ok().json(serde_json::json!({
            "teamId": path.id,
            "squadCount": count,
            "teamRating": rating,
        })),
        Err(e) => error_response(&e),
    }
}

#[get("/teams/{id}/stats")]
async fn api_team_stats(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::team_stats(&*g, &path.id) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

#[get("/meta/countries")]
async fn api_countries() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "countries": &logic::COUNTRIES[..] }))
}

#[get("/meta/countries/available")]
async fn api_available_countries(state: AppState) -> HttpResponse {
    let g = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let available = logic::available_countries(&*g);
    HttpResponse::Ok().json(serde_json::json!({ "available": available }))
}

#[get("/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.find_players())
}

#[get("/players/{id}")]
async fn api_get_player(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_player(&path.id) {
        Some(p) => HttpResponse::Ok().json(p),
        None => error_response(&LeagueError::PlayerNotFound(path.id.clone())),
    }
}

/// Partial player update; rating/position changes refresh the team rating.
#[put("/players/{id}")]
async fn api_update_player(
    state: AppState,
    path: Path<IdPath>,
    body: Json<UpdatePlayer>,
) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::update_player(&mut *g, &path.id, &body) {
        Ok(player) => HttpResponse::Ok().json(serde_json::json!({
            "player": player,
            "message": "Player updated",
        })),
        Err(e) => error_response(&e),
    }
}

#[delete("/players/{id}")]
async fn api_delete_player(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::delete_player(&mut *g, &path.id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "playerId": path.id,
            "message": "Player deleted",
        })),
        Err(e) => error_response(&e),
    }
}

/// Seed 7 named demo teams with autofilled squads (wipes existing teams).
#[post("/seed/create_demo_teams")]
async fn api_seed_demo_teams(state: AppState) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::seed_demo_teams(&mut *g) {
        Ok(created) => HttpResponse::Ok().json(serde_json::json!({ "created": created })),
        Err(e) => error_response(&e),
    }
}

/// Add one demo team for a random still-available country.
#[post("/seed/add_demo_team")]
async fn api_seed_add_demo_team(state: AppState) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::add_demo_team(&mut *g) {
        Ok(team) => HttpResponse::Ok().json(serde_json::json!({
            "teamId": team.id,
            "country": team.country,
            "teamName": team.team_name,
        })),
        Err(e) => error_response(&e),
    }
}

/// Start a tournament from the earliest-registered 8 teams.
#[post("/tournament/start")]
async fn api_start_tournament(state: AppState) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::start_tournament(&mut *g, SeedPolicy::EarliestRegistered) {
        Ok(tournament) => HttpResponse::Ok().json(serde_json::json!({ "tournament": tournament })),
        Err(e) => error_response(&e),
    }
}

/// Wipe the bracket and rebuild it from the top 8 teams by rating.
#[post("/tournament/rebuild_bracket")]
async fn api_rebuild_bracket(state: AppState) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::rebuild_bracket(&mut *g) {
        Ok(tournament) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Bracket rebuilt from top 8 by rating",
            "tournament": tournament,
        })),
        Err(e) => error_response(&e),
    }
}

/// Clear all matches and the tournament record. Teams and players survive.
#[post("/tournament/reset")]
async fn api_reset_tournament(state: AppState) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    logic::reset_tournament(&mut *g);
    HttpResponse::Ok().json(serde_json::json!({ "message": "Tournament reset" }))
}

/// Simulate every remaining match, round by round, until a champion is crowned.
#[post("/tournament/auto_simulate")]
async fn api_auto_simulate(state: AppState) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::auto_simulate(&mut *g, &state.commentator, &state.notifier) {
        Ok(tournament) => HttpResponse::Ok().json(serde_json::json!({ "tournament": tournament })),
        Err(e) => error_response(&e),
    }
}

#[get("/tournament/bracket")]
async fn api_bracket(state: AppState) -> HttpResponse {
    let g = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::bracket_view(&*g) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(LeagueError::NoTournament) => {
            HttpResponse::Ok().json(serde_json::json!({ "message": "No tournament yet" }))
        }
        Err(e) => error_response(&e),
    }
}

#[get("/tournament/status")]
async fn api_tournament_status(state: AppState) -> HttpResponse {
    let g = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::tournament_status(&*g) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&e),
    }
}

#[get("/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::get_match_view(&*g, &path.id) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&e),
    }
}

#[get("/matches/{id}/details")]
async fn api_match_details(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::match_details(&*g, &path.id) {
        Ok(details) => HttpResponse::Ok().json(details),
        Err(e) => error_response(&e),
    }
}

/// Simulate one match. Re-simulating a played match returns it unchanged.
#[post("/matches/{id}/simulate")]
async fn api_simulate_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.store.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::simulate_match_by_id(&mut *g, &state.commentator, &state.notifier, &path.id) {
        Ok(m) => HttpResponse::Ok().json(serde_json::json!({ "match": m })),
        Err(e) => error_response(&e),
    }
}

#[get("/stats/topscorers")]
async fn api_top_scorers(state: AppState, q: Query<LimitQuery>) -> HttpResponse {
    let g = match state.store.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(logic::top_scorers(&*g, q.limit.unwrap_or(10)))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
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

    let state = Data::new(AppCtx {
        store: RwLock::new(MemStore::new()),
        commentator: FallbackCommentator,
        notifier: LogNotifier,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(home)
            .service(api_health)
            .service(api_list_teams)
            .service(api_create_team)
            .service(api_replace_team)
            .service(api_get_team)
            .service(api_update_team)
            .service(api_delete_team)
            .service(api_autofill_team)
            .service(api_team_stats)
            .service(api_countries)
            .service(api_available_countries)
            .service(api_list_players)
            .service(api_get_player)
            .service(api_update_player)
            .service(api_delete_player)
            .service(api_seed_demo_teams)
            .service(api_seed_add_demo_team)
            .service(api_start_tournament)
            .service(api_rebuild_bracket)
            .service(api_reset_tournament)
            .service(api_auto_simulate)
            .service(api_bracket)
            .service(api_tournament_status)
            .service(api_get_match)
            .service(api_match_details)
            .service(api_simulate_match)
            .service(api_top_scorers)
    })
    .bind(bind)?
    .run()
    .await
}
