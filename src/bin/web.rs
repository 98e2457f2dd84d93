//! Single binary web server: JSON API over in-memory court sessions.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, DEFAULT_MATCH_MINUTES, FINISHING_SOON_MINUTES, HISTORY_WINDOW_HOURS.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use court_session_web::{
    build_player_match_index, previously_played, CourtId, MatchId, PlayerId, Reference,
    RosterError, Session, SessionId, SessionSettings, TransitionError,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-session entry: session data + last activity time (for auto-cleanup).
struct SessionEntry {
    session: Session,
    last_activity: Instant,
}

/// In-memory state: many sessions by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Host configuration read from the environment at startup.
#[derive(Clone, Debug)]
struct HostConfig {
    host: String,
    port: u16,
    /// Defaults for sessions created without explicit settings.
    settings: SessionSettings,
}

impl HostConfig {
    fn from_env() -> Self {
        let defaults = SessionSettings::default();
        let settings = SessionSettings {
            default_match_seconds: env_or("DEFAULT_MATCH_MINUTES", defaults.default_match_seconds / 60)
                .checked_mul(60)
                .unwrap_or(defaults.default_match_seconds),
            finishing_soon_minutes: env_or("FINISHING_SOON_MINUTES", defaults.finishing_soon_minutes),
            history_window_hours: env_or("HISTORY_WINDOW_HOURS", defaults.history_window_hours),
        };
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("Ignoring session defaults from environment: {}", e);
                defaults
            }
        };
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| default_host()),
            port: env_or("PORT", default_port()),
            settings,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSessionBody {
    #[serde(default)]
    settings: Option<SessionSettings>,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct UpdatePlayerBody {
    name: Option<String>,
    is_present: Option<bool>,
    is_archived: Option<bool>,
}

#[derive(Deserialize)]
struct UpdateCourtBody {
    name: Option<String>,
    can_be_used: Option<bool>,
}

#[derive(Deserialize)]
struct PlayerIdsBody {
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct StartMatchBody {
    court_id: CourtId,
    /// Defaults to the session's default match duration.
    duration_seconds: Option<i64>,
}

#[derive(Deserialize)]
struct ResumeMatchBody {
    court_id: CourtId,
    /// Defaults to the frozen remainder, or the default duration if none is left.
    seconds: Option<i64>,
}

#[derive(Deserialize)]
struct ChangeCourtBody {
    court_id: CourtId,
}

#[derive(Deserialize)]
struct AddTimeBody {
    seconds: i64,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct SessionCourtPath {
    id: SessionId,
    court_id: CourtId,
}

#[derive(Deserialize)]
struct SessionMatchPath {
    id: SessionId,
    match_id: MatchId,
}

fn error_body(message: impl ToString) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn roster_error(e: RosterError) -> HttpResponse {
    match e {
        RosterError::UnknownReference(_) => HttpResponse::NotFound().json(error_body(e)),
        _ => HttpResponse::BadRequest().json(error_body(e)),
    }
}

fn transition_error(session: SessionId, e: TransitionError) -> HttpResponse {
    log::warn!("Session {}: rejected transition: {}", session, e);
    match e {
        TransitionError::UnknownReference(_) => HttpResponse::NotFound().json(error_body(e)),
        TransitionError::InvalidTransition { .. } | TransitionError::CourtUnavailable(_) => {
            HttpResponse::Conflict().json(error_body(e))
        }
        TransitionError::OutOfRange => HttpResponse::BadRequest().json(error_body(e)),
    }
}

/// Run `f` against a session, refreshing its last activity (404 if not found).
fn with_session<F>(state: &AppState, id: SessionId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Session) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.session)
        }
        None => HttpResponse::NotFound().json(error_body("No session")),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "court-session-web",
    })
}

/// Create a new session (returns it with id; client stores id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(
    state: AppState,
    config: Data<HostConfig>,
    body: Option<Json<CreateSessionBody>>,
) -> HttpResponse {
    let settings = body
        .and_then(|b| b.into_inner().settings)
        .unwrap_or(config.settings);
    if let Err(e) = settings.validate() {
        return HttpResponse::BadRequest().json(error_body(e));
    }
    let session = Session::new(settings);
    let id = session.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created session {}", id);
    let response = HttpResponse::Ok().json(&session);
    g.insert(
        id,
        SessionEntry {
            session,
            last_activity: Instant::now(),
        },
    );
    response
}

#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| HttpResponse::Ok().json(&*s))
}

/// Derived view for the current instant: sorted matches with status and time left,
/// player colouring, available courts and the next setup step.
#[get("/api/sessions/{id}/overview")]
async fn api_overview(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| HttpResponse::Ok().json(s.overview(Utc::now())))
}

#[post("/api/sessions/{id}/players")]
async fn api_add_player(state: AppState, path: Path<SessionPath>, body: Json<NameBody>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.add_player(&body.name) {
        Ok(_) => HttpResponse::Ok().json(&*s),
        Err(e) => roster_error(e),
    })
}

#[put("/api/sessions/{id}/players/{player_id}")]
async fn api_update_player(
    state: AppState,
    path: Path<SessionPlayerPath>,
    body: Json<UpdatePlayerBody>,
) -> HttpResponse {
    with_session(&state, path.id, |s| match update_player(s, path.player_id, &body) {
        Ok(()) => HttpResponse::Ok().json(&*s),
        Err(e) => roster_error(e),
    })
}

fn update_player(s: &mut Session, pid: PlayerId, body: &UpdatePlayerBody) -> Result<(), RosterError> {
    if let Some(name) = &body.name {
        s.rename_player(pid, name)?;
    }
    if let Some(present) = body.is_present {
        s.set_player_present(pid, present)?;
    }
    if let Some(archived) = body.is_archived {
        s.set_player_archived(pid, archived)?;
    }
    Ok(())
}

/// Remove a player. Matches that include them keep showing them as deleted.
#[delete("/api/sessions/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.remove_player(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(&*s),
        Err(e) => roster_error(e),
    })
}

#[post("/api/sessions/{id}/courts")]
async fn api_add_court(state: AppState, path: Path<SessionPath>, body: Json<NameBody>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.add_court(&body.name) {
        Ok(_) => HttpResponse::Ok().json(&*s),
        Err(e) => roster_error(e),
    })
}

#[put("/api/sessions/{id}/courts/{court_id}")]
async fn api_update_court(
    state: AppState,
    path: Path<SessionCourtPath>,
    body: Json<UpdateCourtBody>,
) -> HttpResponse {
    with_session(&state, path.id, |s| match update_court(s, path.court_id, &body) {
        Ok(()) => HttpResponse::Ok().json(&*s),
        Err(e) => roster_error(e),
    })
}

fn update_court(s: &mut Session, cid: CourtId, body: &UpdateCourtBody) -> Result<(), RosterError> {
    if let Some(name) = &body.name {
        s.rename_court(cid, name)?;
    }
    if let Some(usable) = body.can_be_used {
        s.set_court_usable(cid, usable)?;
    }
    Ok(())
}

#[delete("/api/sessions/{id}/courts/{court_id}")]
async fn api_remove_court(state: AppState, path: Path<SessionCourtPath>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.remove_court(path.court_id) {
        Ok(()) => HttpResponse::Ok().json(&*s),
        Err(e) => roster_error(e),
    })
}

/// Queue a new match.
#[post("/api/sessions/{id}/matches")]
async fn api_create_match(state: AppState, path: Path<SessionPath>, body: Json<PlayerIdsBody>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.create_match(&body.player_ids, Utc::now()) {
        Ok(_) => HttpResponse::Ok().json(&*s),
        Err(e) => roster_error(e),
    })
}

#[delete("/api/sessions/{id}/matches")]
async fn api_delete_all_matches(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |s| {
        s.delete_all_matches();
        HttpResponse::Ok().json(&*s)
    })
}

#[delete("/api/sessions/{id}/matches/{match_id}")]
async fn api_delete_match(state: AppState, path: Path<SessionMatchPath>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.delete_match(path.match_id) {
        Ok(()) => HttpResponse::Ok().json(&*s),
        Err(e) => roster_error(e),
    })
}

#[post("/api/sessions/{id}/matches/{match_id}/start")]
async fn api_start_match(
    state: AppState,
    path: Path<SessionMatchPath>,
    body: Json<StartMatchBody>,
) -> HttpResponse {
    with_session(&state, path.id, |s| {
        let duration = body.duration_seconds.unwrap_or(s.settings.default_match_seconds);
        match s.start_match(path.match_id, body.court_id, duration, Utc::now()) {
            Ok(m) => HttpResponse::Ok().json(m),
            Err(e) => transition_error(path.id, e),
        }
    })
}

#[post("/api/sessions/{id}/matches/{match_id}/pause")]
async fn api_pause_match(state: AppState, path: Path<SessionMatchPath>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.pause_match(path.match_id, Utc::now()) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => transition_error(path.id, e),
    })
}

#[post("/api/sessions/{id}/matches/{match_id}/resume")]
async fn api_resume_match(
    state: AppState,
    path: Path<SessionMatchPath>,
    body: Json<ResumeMatchBody>,
) -> HttpResponse {
    with_session(&state, path.id, |s| {
        match s.resume_match(path.match_id, body.court_id, body.seconds, Utc::now()) {
            Ok(m) => HttpResponse::Ok().json(m),
            Err(e) => transition_error(path.id, e),
        }
    })
}

#[post("/api/sessions/{id}/matches/{match_id}/court")]
async fn api_change_court(
    state: AppState,
    path: Path<SessionMatchPath>,
    body: Json<ChangeCourtBody>,
) -> HttpResponse {
    with_session(&state, path.id, |s| {
        match s.change_court(path.match_id, body.court_id, Utc::now()) {
            Ok(m) => HttpResponse::Ok().json(m),
            Err(e) => transition_error(path.id, e),
        }
    })
}

#[post("/api/sessions/{id}/matches/{match_id}/add-time")]
async fn api_add_time(state: AppState, path: Path<SessionMatchPath>, body: Json<AddTimeBody>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.add_time(path.match_id, body.seconds) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => transition_error(path.id, e),
    })
}

#[post("/api/sessions/{id}/matches/{match_id}/complete")]
async fn api_complete_match(state: AppState, path: Path<SessionMatchPath>) -> HttpResponse {
    with_session(&state, path.id, |s| match s.complete_match(path.match_id, Utc::now()) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => transition_error(path.id, e),
    })
}

/// Players who already shared a match tonight with any of the given players.
#[post("/api/sessions/{id}/previously-played")]
async fn api_previously_played(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<PlayerIdsBody>,
) -> HttpResponse {
    with_session(&state, path.id, |s| {
        for &pid in &body.player_ids {
            if s.get_player(pid).is_none() {
                return roster_error(RosterError::UnknownReference(Reference::Player(pid)));
            }
        }
        let index = build_player_match_index(&s.matches);
        let cutoff = s.settings.history_cutoff(Utc::now());
        let mut played: Vec<PlayerId> = previously_played(&body.player_ids, &index, cutoff)
            .into_iter()
            .collect();
        played.sort();
        HttpResponse::Ok().json(serde_json::json!({ "player_ids": played }))
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = HostConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Session defaults: {:?}", config.settings);

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));
    let config = Data::new(config);

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_overview)
            .service(api_add_player)
            .service(api_update_player)
            .service(api_remove_player)
            .service(api_add_court)
            .service(api_update_court)
            .service(api_remove_court)
            .service(api_create_match)
            .service(api_delete_all_matches)
            .service(api_delete_match)
            .service(api_start_match)
            .service(api_pause_match)
            .service(api_resume_match)
            .service(api_change_court)
            .service(api_add_time)
            .service(api_complete_match)
            .service(api_previously_played)
    })
    .bind(bind)?
    .run()
    .await
}
