#![allow(dead_code)]

use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use attendance_tracker::db::init_db;
use sqlx::SqlitePool;

/// Fresh in-memory database. One connection, since every sqlite memory
/// connection is its own database.
pub async fn pool() -> SqlitePool {
    init_db("sqlite::memory:", 1).await.expect("in-memory database")
}

/// Empty scratch directory, unique per call.
pub fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}-{}-{nanos}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// File-backed database with several connections, so writers really contend.
pub async fn file_pool(prefix: &str, max_connections: u32) -> (SqlitePool, PathBuf) {
    let dir = temp_dir(prefix);
    let url = format!("sqlite://{}", dir.join("attendance.db").display());
    let pool = init_db(&url, max_connections).await.expect("file database");
    (pool, dir)
}

/// Builds the API service under `/api`, without the rate limiter.
#[macro_export]
macro_rules! app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .service(
                    actix_web::web::scope("/api")
                        .configure(attendance_tracker::routes::api),
                ),
        )
        .await
    };
}

/// Returns (sheet1 xml + shared strings, workbook xml) of an xlsx file.
pub fn xlsx_parts(bytes: &[u8]) -> (String, String) {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("xlsx is a zip archive");
    let mut read = |name: &str| {
        let mut out = String::new();
        if let Ok(mut file) = archive.by_name(name) {
            file.read_to_string(&mut out).expect("utf-8 part");
        }
        out
    };
    let sheet = format!(
        "{}{}",
        read("xl/worksheets/sheet1.xml"),
        read("xl/sharedStrings.xml")
    );
    (sheet, read("xl/workbook.xml"))
}
