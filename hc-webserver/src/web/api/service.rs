use std::str::FromStr;

use super::*;
use hc_application::event_bus::EventBus;
use hc_core::usecases::HousekeepingJob;

#[get("/site/status")]
pub fn get_site_status(
    connections: sqlite::Connections,
    version: &State<Version>,
) -> Result<json::SiteStatus> {
    let status = match connections.shared() {
        Ok(_) => "ok",
        Err(err) => {
            warn!("Database is not available: {err}");
            "degraded"
        }
    };
    Ok(Json(json::SiteStatus {
        status: status.to_owned(),
        version: version.0.to_owned(),
    }))
}

/// Runs a housekeeping job on behalf of a service integration.
#[post("/service", format = "application/json", data = "<job>")]
pub fn post_service(
    connections: sqlite::Connections,
    events: &State<EventBus>,
    object_store: &State<ObjectStorage>,
    cfg: &State<Cfg>,
    auth: Auth,
    job: JsonResult<json::ServiceJob>,
) -> StatusResult {
    auth.service(cfg.service_token.as_deref())?;
    let json::ServiceJob { job } = job?.into_inner();
    let job = HousekeepingJob::from_str(&job).map_err(|_| {
        ApiError::OtherWithStatus(
            Status::BadRequest,
            "bad_input",
            anyhow::anyhow!("Unknown job '{job}'"),
        )
    })?;
    let count = flows::run_housekeeping_job(&connections, events, &***object_store, job)?;
    info!("Housekeeping job {} affected {count} entries", job.as_ref());
    Ok(Status::NoContent)
}
