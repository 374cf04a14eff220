use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

use super::xlsx_attachment;
use crate::error::AppError;
use crate::export::{self, ColumnWidths};
use crate::model::Student;
use crate::store::students;

#[derive(Deserialize, ToSchema)]
pub struct StudentPayload {
    #[schema(example = "Asha Rahman")]
    pub name: String,
    #[schema(example = "CS-042")]
    pub roll_number: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StudentSearch {
    /// Substring matched against name or roll number
    #[schema(example = "CS-")]
    pub query: Option<String>,
}

impl StudentSearch {
    async fn run(&self, pool: &SqlitePool) -> Result<Vec<Student>, AppError> {
        match self.query.as_deref() {
            Some(query) => students::search(pool, query).await,
            None => students::list_all(pool).await,
        }
    }
}

/// List or search students
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentSearch),
    responses(
        (status = 200, description = "Matching students", body = [Student]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Student"
)]
pub async fn list_students(
    pool: web::Data<SqlitePool>,
    search: web::Query<StudentSearch>,
) -> Result<impl Responder, AppError> {
    let found = search.run(pool.get_ref()).await?;
    debug!(query = ?search.query, count = found.len(), "Listed students");
    Ok(HttpResponse::Ok().json(found))
}

/// Register a student
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentPayload,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Roll number is empty", body = Object, example = json!({
            "message": "Roll number cannot be empty"
        })),
        (status = 409, description = "Roll number already exists", body = Object, example = json!({
            "message": "Roll number 'CS-042' already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Student"
)]
pub async fn create_student(
    pool: web::Data<SqlitePool>,
    payload: web::Json<StudentPayload>,
) -> Result<impl Responder, AppError> {
    let student = students::create(pool.get_ref(), &payload.name, &payload.roll_number).await?;
    Ok(HttpResponse::Created().json(student))
}

/// Get a student by id
#[utoipa::path(
    get,
    path = "/api/students/{student_id}",
    params(
        ("student_id", Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "message": "Student 1 not found"
        }))
    ),
    tag = "Student"
)]
pub async fn get_student(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let student = students::get(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(student))
}

/// Replace a student's name and roll number
#[utoipa::path(
    put,
    path = "/api/students/{student_id}",
    params(
        ("student_id", Path, description = "Student ID")
    ),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Roll number is empty"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Roll number already exists")
    ),
    tag = "Student"
)]
pub async fn update_student(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<StudentPayload>,
) -> Result<impl Responder, AppError> {
    let student = students::update(
        pool.get_ref(),
        path.into_inner(),
        &payload.name,
        &payload.roll_number,
    )
    .await?;
    Ok(HttpResponse::Ok().json(student))
}

/// Delete a student and their attendance history
#[utoipa::path(
    delete,
    path = "/api/students/{student_id}",
    params(
        ("student_id", Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Student 'Asha Rahman' deleted successfully"
        })),
        (status = 404, description = "Student not found")
    ),
    tag = "Student"
)]
pub async fn delete_student(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let student = students::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Student '{}' deleted successfully", student.name)
    })))
}

/// Download the (optionally filtered) student list as xlsx
#[utoipa::path(
    get,
    path = "/api/students/export",
    params(StudentSearch),
    responses(
        (status = 200, description = "Spreadsheet attachment (student_list.xlsx)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Student"
)]
pub async fn export_students(
    pool: web::Data<SqlitePool>,
    search: web::Query<StudentSearch>,
) -> Result<impl Responder, AppError> {
    let found = search.run(pool.get_ref()).await?;

    let dataset = export::student_list(&found);
    let bytes = export::to_xlsx(&dataset, ColumnWidths::FitContent)?;
    let filename = export::student_list_filename(search.query.as_deref());

    info!(rows = found.len(), %filename, "Exported student list");
    Ok(xlsx_attachment(bytes, filename))
}
