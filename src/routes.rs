use crate::{
    api::{attendance, reports, students},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::anyhow;

pub type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer quota of `requests_per_min` with an equal burst. Workers built from the
/// same config share one quota.
pub fn build_limiter(requests_per_min: u32) -> anyhow::Result<LimiterConfig> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit of {requests_per_min} per minute"))?;
    Ok(cfg)
}

/// Mounts the API under the configured prefix, behind the rate limiter.
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &LimiterConfig) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(limiter))
            .configure(api),
    );
}

/// Route table, relative to the API prefix.
pub fn api(cfg: &mut web::ServiceConfig) {
    // Extractor failures answer with the same `{"message": ...}` body as handler errors.
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    );

    cfg.service(
        web::scope("/students")
            // /students
            .service(
                web::resource("")
                    .route(web::get().to(students::list_students))
                    .route(web::post().to(students::create_student)),
            )
            // /students/export
            .service(web::resource("/export").route(web::get().to(students::export_students)))
            // /students/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(students::get_student))
                    .route(web::put().to(students::update_student))
                    .route(web::delete().to(students::delete_student)),
            )
            // /students/{id}/attendance
            .service(
                web::resource("/{id}/attendance")
                    .route(web::get().to(attendance::student_attendance))
                    .route(web::post().to(attendance::mark_attendance)),
            ),
    )
    .service(web::resource("/attendance").route(web::get().to(attendance::daily_attendance)))
    .service(
        web::scope("/reports")
            // /reports/monthly
            .service(web::resource("/monthly").route(web::get().to(reports::monthly_report)))
            // /reports/monthly/export
            .service(
                web::resource("/monthly/export").route(web::get().to(reports::export_monthly_report)),
            ),
    );
}
