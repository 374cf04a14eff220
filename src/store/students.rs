use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::AppError;
use crate::model::Student;

const STUDENT_COLUMNS: &str = "id, name, roll_number, registration_date";

/// Trims both fields and rejects an empty roll number.
fn normalize(name: &str, roll_number: &str) -> Result<(String, String), AppError> {
    let roll_number = roll_number.trim();
    if roll_number.is_empty() {
        return Err(AppError::Validation("Roll number cannot be empty".into()));
    }
    Ok((name.trim().to_string(), roll_number.to_string()))
}

fn duplicate_roll(roll_number: &str) -> String {
    format!("Roll number '{roll_number}' already exists")
}

pub async fn create(pool: &SqlitePool, name: &str, roll_number: &str) -> Result<Student, AppError> {
    let (name, roll_number) = normalize(name, roll_number)?;

    let student = sqlx::query_as::<_, Student>(&format!(
        "INSERT INTO students (name, roll_number, registration_date) VALUES (?, ?, ?) RETURNING {STUDENT_COLUMNS}"
    ))
    .bind(&name)
    .bind(&roll_number)
    .bind(Utc::now().naive_utc())
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, duplicate_roll(&roll_number)))?;

    info!(student_id = student.id, roll_number = %student.roll_number, "Student created");
    Ok(student)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    roll_number: &str,
) -> Result<Student, AppError> {
    let (name, roll_number) = normalize(name, roll_number)?;

    let student = sqlx::query_as::<_, Student>(&format!(
        "UPDATE students SET name = ?, roll_number = ? WHERE id = ? RETURNING {STUDENT_COLUMNS}"
    ))
    .bind(&name)
    .bind(&roll_number)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, duplicate_roll(&roll_number)))?
    .ok_or_else(|| AppError::student_not_found(id))?;

    info!(student_id = id, "Student updated");
    Ok(student)
}

/// Deletes the student and, through the foreign key, all of their attendance.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<Student, AppError> {
    let student = get(pool, id).await?;

    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::student_not_found(id));
    }

    info!(student_id = id, "Student deleted");
    Ok(student)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Student, AppError> {
    sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::student_not_found(id))
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Student>, AppError> {
    let students = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(students)
}

/// Substring match over name or roll number. A blank query lists everyone.
pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<Student>, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return list_all(pool).await;
    }

    let like = format!("%{query}%");
    debug!(%like, "Searching students");

    let students = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE name LIKE ? OR roll_number LIKE ? ORDER BY id"
    ))
    .bind(&like)
    .bind(&like)
    .fetch_all(pool)
    .await?;
    Ok(students)
}
