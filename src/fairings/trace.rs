use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Request, Response};
use tracing::info;

/// Logs one line per answered request.
pub struct RequestTrace;

#[rocket::async_trait]
impl Fairing for RequestTrace {
    fn info(&self) -> Info {
        Info {
            name: "Request trace",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        info!(
            method = %req.method(),
            uri = %req.uri(),
            status = res.status().code,
            "request handled"
        );
    }
}
