use actix_files::Files;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};

use crate::form::{
    export_submission_to_csv, submission_from_request, validate_submission, FormSubmissionRequest,
};
use crate::parser::load_members_from_path;
use crate::planner::{Day, MeetingPlan, Member, Planner};

// In-memory storage for the roster and the last successful plan
// (in production, use a database).
pub struct AppState {
    pub members: Mutex<Vec<Member>>,
    pub plan: Mutex<Option<MeetingPlan>>,
    pub submissions_csv: PathBuf,
    pub admin_password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Serialize)]
pub struct StatsResponse {
    member_count: usize,
    slot_popularity: HashMap<String, SlotStats>,
}

#[derive(Serialize, Default)]
pub struct SlotStats {
    monday_requests: u32,
    wednesday_requests: u32,
}

#[derive(Serialize)]
pub struct RosterResponse {
    day_name: String,
    slot: String,
    attendees: Vec<String>,
}

fn is_admin(req: &HttpRequest, state: &AppState) -> bool {
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    password == state.admin_password
}

/// Re-ingests the submissions CSV and replaces the stored members and plan.
/// State is only touched on success, so a failed replan keeps the last plan.
fn rebuild_plan(state: &AppState) -> std::result::Result<MeetingPlan, String> {
    let members = load_members_from_path(&state.submissions_csv).map_err(|e| e.to_string())?;
    let planner = Planner::new(members);
    let plan = planner.plan().map_err(|e| e.to_string())?;

    *state.members.lock().unwrap() = planner.members().to_vec();
    *state.plan.lock().unwrap() = Some(plan.clone());
    Ok(plan)
}

// Availability form submission endpoint
async fn submit_availability(
    req: web::Json<FormSubmissionRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if let Err(reason) = validate_submission(&req) {
        return Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": reason})));
    }

    let submission = submission_from_request(&req);
    match export_submission_to_csv(&submission, &state.submissions_csv) {
        Ok(()) => {
            info!(name = %submission.name, "availability submitted");
            Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
        }
        Err(e) => {
            warn!(error = %e, "failed to store submission");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": format!("Failed to store submission: {}", e)
            })))
        }
    }
}

// Admin login endpoint
async fn admin_login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

// Admin CSV upload endpoint: replaces the submissions file and re-plans
async fn admin_upload(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_admin(&req, &state) {
        return Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    std::fs::write(&state.submissions_csv, &body)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to save file: {}", e)))?;

    match rebuild_plan(&state) {
        Ok(plan) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "reach": plan.reach,
            "score": plan.score,
            "tied_pairs": plan.tied_pairs,
        }))),
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to plan from uploaded CSV: {}", e)
        }))),
    }
}

// Admin replan endpoint: re-ingests the form-collected submissions
async fn admin_replan(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    if !is_admin(&req, &state) {
        return Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    match rebuild_plan(&state) {
        Ok(plan) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "reach": plan.reach,
            "score": plan.score,
            "tied_pairs": plan.tied_pairs,
        }))),
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to plan: {}", e)
        }))),
    }
}

// Stats endpoint: how many members listed each slot, per day
async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let members = state.members.lock().unwrap();

    if members.is_empty() {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No data available"})));
    }

    let mut slot_popularity: HashMap<String, SlotStats> = HashMap::new();
    for member in members.iter() {
        for slot in member.slots(Day::Monday) {
            slot_popularity.entry(slot.clone()).or_default().monday_requests += 1;
        }
        for slot in member.slots(Day::Wednesday) {
            slot_popularity.entry(slot.clone()).or_default().wednesday_requests += 1;
        }
    }

    Ok(HttpResponse::Ok().json(StatsResponse {
        member_count: members.len(),
        slot_popularity,
    }))
}

// Roster endpoint for one day of the current plan
async fn get_roster(day: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let pick = {
        let plan = state.plan.lock().unwrap();
        match (day.as_str(), &*plan) {
            ("monday", Some(plan)) => Some(plan.monday.clone()),
            ("wednesday", Some(plan)) => Some(plan.wednesday.clone()),
            ("monday" | "wednesday", None) => None,
            _ => {
                return Ok(HttpResponse::BadRequest()
                    .json(serde_json::json!({"error": "Invalid day"})))
            }
        }
    };

    match pick {
        Some(pick) => Ok(HttpResponse::Ok().json(RosterResponse {
            day_name: match pick.day {
                Day::Monday => "Monday".to_string(),
                Day::Wednesday => "Wednesday".to_string(),
            },
            slot: pick.slot,
            attendees: pick.roster,
        })),
        None => {
            Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No plan available"})))
        }
    }
}

// HTML page handlers
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

async fn admin_page() -> Result<HttpResponse> {
    let html = include_str!("../templates/admin.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

async fn rosters_page() -> Result<HttpResponse> {
    let html = include_str!("../templates/rosters.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

async fn stats_page() -> Result<HttpResponse> {
    let html = include_str!("../templates/stats.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

pub async fn start_server(
    port: u16,
    admin_password: String,
    submissions_csv: PathBuf,
) -> std::io::Result<()> {
    // Pick up submissions collected in a previous run, if any.
    let members = match load_members_from_path(&submissions_csv) {
        Ok(members) => {
            info!(members = members.len(), csv = %submissions_csv.display(), "loaded existing submissions");
            members
        }
        Err(e) => {
            warn!(csv = %submissions_csv.display(), error = %e, "starting with an empty roster");
            Vec::new()
        }
    };

    let app_state = web::Data::new(AppState {
        members: Mutex::new(members),
        plan: Mutex::new(None),
        submissions_csv,
        admin_password,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .route("/", web::get().to(index))
            .route("/admin", web::get().to(admin_page))
            .route("/rosters", web::get().to(rosters_page))
            .route("/stats", web::get().to(stats_page))
            .route("/api/login", web::post().to(admin_login))
            .route("/api/submit", web::post().to(submit_availability))
            .route("/api/upload", web::post().to(admin_upload))
            .route("/api/plan", web::post().to(admin_replan))
            .route("/api/stats", web::get().to(get_stats))
            .service(web::resource("/api/roster/{day}").route(web::get().to(get_roster)))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
