pub mod config;
pub mod db;
pub mod models;
pub mod schema;
pub mod services;
pub mod stats;

use rocket::fs::{relative, FileServer};
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{catch, catchers, delete, get, post, routes, Request, Responder, State};
use serde::{Deserialize, Serialize};

use config::AppConfig;
use db::SqlitePool;
use models::{
    CreateHabitRequest, HabitCreated, MonthSummary, SuccessResponse, ToggleCompletionRequest,
};

// Serializable error response body, shared by responders and catchers.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorDetail {
    pub error: String,
}

#[derive(Responder)]
pub enum ApiError {
    #[response(status = 400)]
    BadRequest(Json<ErrorDetail>),
    #[response(status = 404)]
    NotFound(Json<ErrorDetail>),
    #[response(status = 500)]
    InternalError(Json<ErrorDetail>),
}

#[get("/habits?<year>&<month>")]
pub fn month_summary(
    pool: &State<SqlitePool>,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<Json<MonthSummary>, ApiError> {
    let summary = services::habits::month_summary(pool, year, month)?;
    Ok(Json(summary))
}

#[post("/habits", data = "<create_req>")]
pub fn create_habit(
    pool: &State<SqlitePool>,
    create_req: Json<CreateHabitRequest>,
) -> Result<status::Created<Json<HabitCreated>>, ApiError> {
    let created = services::habits::create_habit(pool, create_req.into_inner())?;
    let location = format!("/api/habits/{}", created.id);
    Ok(status::Created::new(location).body(Json(created)))
}

#[delete("/habits/<habit_id>")]
pub fn delete_habit(
    pool: &State<SqlitePool>,
    habit_id: i32,
) -> Result<status::NoContent, ApiError> {
    services::habits::delete_habit(pool, habit_id)?;
    Ok(status::NoContent)
}

#[post("/completions", data = "<toggle_req>")]
pub fn toggle_completion(
    pool: &State<SqlitePool>,
    toggle_req: Json<ToggleCompletionRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let outcome = services::completions::toggle_completion(pool, toggle_req.into_inner())?;
    Ok(Json(outcome))
}

#[get("/")]
async fn serve_index() -> Option<rocket::fs::NamedFile> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("static/index.html");
    rocket::fs::NamedFile::open(path).await.ok()
}

fn api_routes() -> Vec<rocket::Route> {
    routes![month_summary, create_habit, delete_habit, toggle_completion]
}

#[catch(400)]
fn bad_request() -> Json<ErrorDetail> {
    Json(ErrorDetail {
        error: "Bad request".to_string(),
    })
}

#[catch(404)]
fn not_found() -> Json<ErrorDetail> {
    Json(ErrorDetail {
        error: "Not found".to_string(),
    })
}

#[catch(422)]
fn unprocessable_entity() -> Json<ErrorDetail> {
    Json(ErrorDetail {
        error: "Malformed request body".to_string(),
    })
}

#[catch(500)]
fn internal_server_error(_status: Status, req: &Request<'_>) -> Json<ErrorDetail> {
    log::error!("Internal server error while handling {}", req.uri());
    Json(ErrorDetail {
        error: "Internal server error".to_string(),
    })
}

// This function is used by main.rs to launch the server and by tests to
// get a Rocket instance against their own database.
pub fn rocket_instance(app_config: AppConfig) -> rocket::Rocket<rocket::Build> {
    let figment = rocket::Config::figment()
        .merge(("port", app_config.port))
        .merge(("log_level", if app_config.debug { "debug" } else { "normal" }));

    rocket::custom(figment)
        .attach(db::stage(app_config))
        .mount("/", routes![serve_index])
        .mount("/static", FileServer::from(relative!("static")))
        .mount("/api", api_routes())
        .register("/", catchers![bad_request, not_found, unprocessable_entity, internal_server_error])
}
