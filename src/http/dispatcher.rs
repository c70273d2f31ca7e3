use thiserror::Error;

use crate::form_log::Submission;
use crate::http::request::{Method, RequestLine};
use crate::http::responder::build_file_response;
use crate::http::response::Response;
use crate::site::Site;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Method {0} is unsupported")]
    UnsupportedMethod(String),
}

/// Routes a parsed request to its method handler.
///
/// Never writes to the connection: an unsupported method is returned to the
/// caller, which chooses how to answer it.
pub async fn dispatch(request: &RequestLine, args: &str, site: &Site) -> Result<Response, DispatchError> {
    match request.method() {
        Some(Method::Get) => Ok(handle_get(request).await),
        Some(Method::Post) => Ok(handle_post(request, args, site).await),
        None => Err(DispatchError::UnsupportedMethod(request.method.clone())),
    }
}

async fn handle_get(request: &RequestLine) -> Response {
    build_file_response(&request.path, &request.http_version).await
}

/// Records the submission when the form page is targeted, then serves the
/// requested file like GET.
async fn handle_post(request: &RequestLine, args: &str, site: &Site) -> Response {
    if args.is_empty() {
        tracing::debug!(path = %request.path.display(), "POST without form body");
    } else if request.file_name() == Some(site.config.form_page.as_str()) {
        let submission = Submission::from_form(args);
        if let Err(e) = site.form_log.append(&submission).await {
            tracing::warn!(
                log = %site.form_log.path().display(),
                error = %e,
                "Failed to record form submission"
            );
        }
    }
    build_file_response(&request.path, &request.http_version).await
}
