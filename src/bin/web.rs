//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DATA_DIR (e.g. /var/lib/ludo).

use actix_files::Files;
use actix_web::{
    get, post,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use ludo_tracker_web::{
    leaderboard, leaderboard_text, FileStore, FlowOutcome, LeaderboardEntry, PlayerColor,
    SetupSubmission, Tracker, TrackerError,
};
use serde::{Deserialize, Serialize};

/// Shared tracker: every request goes through it to the file store.
type AppState = Data<Tracker<FileStore>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct LeaderboardResponse {
    entries: Vec<LeaderboardEntry>,
    text: String,
}

impl LeaderboardResponse {
    fn new(entries: Vec<LeaderboardEntry>) -> Self {
        let text = leaderboard_text(&entries);
        Self { entries, text }
    }
}

#[derive(Deserialize)]
struct LossBody {
    /// None when the password prompt was cancelled.
    #[serde(default)]
    password: Option<String>,
}

#[derive(Deserialize)]
struct ResetScoresBody {
    #[serde(default)]
    admin_password: Option<String>,
    #[serde(default)]
    confirmed: bool,
}

#[derive(Deserialize)]
struct ResetPasswordBody {
    #[serde(default)]
    admin_password: Option<String>,
    #[serde(default)]
    new_password: String,
    #[serde(default)]
    confirm_password: String,
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    year: Option<i32>,
    month: Option<u32>,
}

/// Path segment: player color (e.g. /api/players/{color}/losses)
#[derive(Deserialize)]
struct ColorPath {
    color: PlayerColor,
}

/// Map a flow error to a status and `{ "error": .. }` body.
fn error_response(e: TrackerError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TrackerError::Validation(_) => HttpResponse::BadRequest().json(body),
        TrackerError::AuthFailed(_) => HttpResponse::Unauthorized().json(body),
        TrackerError::PlayerNotFound(_) => HttpResponse::NotFound().json(body),
        TrackerError::AdminNotConfigured => HttpResponse::Conflict()
            .json(serde_json::json!({ "error": e.to_string(), "redirect": "setup" })),
        TrackerError::MissingCredential(_) => HttpResponse::Conflict().json(body),
        TrackerError::Store(_) => {
            log::error!("{}", e);
            HttpResponse::ServiceUnavailable().json(body)
        }
        TrackerError::Export(_) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Response for a finished flow: the outcome, the fresh page state and the leaderboard.
async fn flow_response(state: &AppState, outcome: FlowOutcome) -> HttpResponse {
    let page = state.page_state().await;
    let board = match state.players().await {
        Ok(players) => LeaderboardResponse::new(leaderboard(&players.unwrap_or_default())),
        Err(e) => return error_response(e),
    };
    HttpResponse::Ok().json(serde_json::json!({
        "outcome": outcome,
        "state": page,
        "leaderboard": board,
    }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "ludo-tracker-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Current page state (setup or game). A store failure yields the setup view.
#[get("/api/state")]
async fn api_state(state: AppState) -> HttpResponse {
    HttpResponse::Ok().json(state.page_state().await)
}

/// Save the setup form (all slots at once).
#[post("/api/players")]
async fn api_save_players(state: AppState, body: Json<SetupSubmission>) -> HttpResponse {
    match state.save_players(&body).await {
        Ok(_) => flow_response(&state, FlowOutcome::Done).await,
        Err(e) => error_response(e),
    }
}

/// Record a loss for one player, gated by that player's password.
#[post("/api/players/{color}/losses")]
async fn api_record_loss(state: AppState, path: Path<ColorPath>, body: Json<LossBody>) -> HttpResponse {
    match state.record_loss(path.color, body.password.as_deref()).await {
        Ok(result) => flow_response(&state, result.outcome).await,
        Err(e) => error_response(e),
    }
}

/// Reset one player's password (admin only).
#[post("/api/players/{color}/password")]
async fn api_reset_password(
    state: AppState,
    path: Path<ColorPath>,
    body: Json<ResetPasswordBody>,
) -> HttpResponse {
    let result = state
        .reset_player_password(
            body.admin_password.as_deref(),
            path.color,
            &body.new_password,
            &body.confirm_password,
        )
        .await;
    match result {
        Ok(result) => flow_response(&state, result.outcome).await,
        Err(e) => error_response(e),
    }
}

/// Zero every player's losses (admin only, after confirmation).
#[post("/api/scores/reset")]
async fn api_reset_scores(state: AppState, body: Json<ResetScoresBody>) -> HttpResponse {
    match state
        .reset_all_scores(body.admin_password.as_deref(), body.confirmed)
        .await
    {
        Ok(result) => flow_response(&state, result.outcome).await,
        Err(e) => error_response(e),
    }
}

/// Leaderboard; `?year=2026&month=10` restricts it to one month.
#[get("/api/leaderboard")]
async fn api_leaderboard(state: AppState, query: Query<LeaderboardQuery>) -> HttpResponse {
    let month = match (query.year, query.month) {
        (Some(y), Some(m)) if (1..=12).contains(&m) => Some((y, m)),
        (None, None) => None,
        _ => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Give both year and month (1-12)" }))
        }
    };
    match state.leaderboard(month).await {
        Ok(entries) => HttpResponse::Ok().json(LeaderboardResponse::new(entries)),
        Err(e) => error_response(e),
    }
}

#[get("/api/scoreboard.csv")]
async fn api_export_csv(state: AppState) -> HttpResponse {
    match state.export_csv().await {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"scoreboard.csv\""))
            .body(csv),
        Err(e) => error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| default_data_dir());
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Storing data in {}", data_dir);

    let state = Data::new(Tracker::new(FileStore::new(data_dir)));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_state)
            .service(api_save_players)
            .service(api_record_loss)
            .service(api_reset_password)
            .service(api_reset_scores)
            .service(api_leaderboard)
            .service(api_export_csv)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
