use std::future::Future;

use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use web_sys::AbortController;

use super::error::CallError;

#[derive(Serialize)]
struct CallMeRequest<'a> {
    phone: &'a str,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// POSTs the formatted number to the webhook. One attempt, no retry.
///
/// `timeout_ms` bounds the whole exchange, failure body included. On expiry
/// the request is aborted through `controller`. Callers keep a clone of the
/// controller to cancel it themselves.
pub async fn request_call(
    url: String,
    phone: String,
    timeout_ms: u32,
    controller: Option<AbortController>,
) -> Result<(), CallError> {
    let signal = controller.as_ref().map(|c| c.signal());
    let request = Request::post(&url)
        .header("Content-Type", "application/json")
        .abort_signal(signal.as_ref())
        .json(&CallMeRequest { phone: &phone })
        .map_err(|e| CallError::Encode(e.to_string()))?;

    with_timeout(
        exchange(request),
        TimeoutFuture::new(timeout_ms),
        timeout_ms,
        controller.as_ref(),
    )
    .await
}

async fn exchange(request: Request) -> Result<(), CallError> {
    let response = request.send().await.map_err(network_error)?;

    let status = response.status();
    if is_success(status) {
        info!("Call request accepted with status {}", status);
        return Ok(());
    }

    let body = match response.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            error!("Error reading error response: {}", e);
            None
        }
    };
    Err(failure_from_body(status, body.as_deref()))
}

/// Runs `work` until `timer` fires first, then aborts it.
async fn with_timeout<W, T>(
    work: W,
    timer: T,
    timeout_ms: u32,
    controller: Option<&AbortController>,
) -> Result<(), CallError>
where
    W: Future<Output = Result<(), CallError>>,
    T: Future<Output = ()>,
{
    match select(Box::pin(work), Box::pin(timer)).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(_) => {
            if let Some(controller) = controller {
                controller.abort();
            }
            Err(CallError::TimedOut(timeout_ms))
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn network_error(e: gloo_net::Error) -> CallError {
    match e {
        gloo_net::Error::JsError(js) => js_fault(&js.name, js.message),
        other => CallError::Network(other.to_string()),
    }
}

// A JS error's Display is `name: message`; the visitor only gets the message.
fn js_fault(name: &str, message: String) -> CallError {
    debug!("Fetch rejected with {}", name);
    CallError::Network(message)
}

/// Builds the error for a non-2xx response from whatever body came back.
pub fn failure_from_body(status: u16, body: Option<&str>) -> CallError {
    let message = body
        .and_then(|body| match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) => parsed.message,
            Err(e) => {
                warn!("Error parsing error response: {}", e);
                None
            }
        })
        .filter(|message| !message.is_empty());

    match message {
        Some(message) => CallError::Rejected { status, message },
        None => CallError::Unreadable { status },
    }
}
