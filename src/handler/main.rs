mod config;
mod error;
mod format;
mod slack;
mod timezone;
mod types;

use chrono::{DateTime, Utc};
use chrono_tz::{America, Asia, Tz};
use lambda_http::http::{Method, StatusCode};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};

use config::Config;
use error::HandlerError;
use types::SlackMessage;

async fn function_handler(config: &Config, event: Request) -> Result<Response<Body>, Error> {
    Ok(route(config, &event, Utc::now()))
}

fn route(config: &Config, event: &Request, now: DateTime<Utc>) -> Response<Body> {
    let path = request_path(event);

    if event.method() != Method::POST {
        tracing::warn!(method = %event.method(), path, "method not allowed");
        return empty_response(StatusCode::METHOD_NOT_ALLOWED);
    }

    let result = match path {
        "/tz" => time_zone_current_time(config, event, now),
        "/tzn" => new_york_current_time(config, event, now),
        "/tzs" => seoul_current_time(config, event, now),
        _ => {
            tracing::warn!(path, "no route");
            return empty_response(StatusCode::NOT_FOUND);
        }
    };

    result.unwrap_or_else(HandlerError::into_response)
}

/// Path as the client sent it. API Gateway REST events put the stage in
/// front of the uri path, so prefer the raw path when the event carries one.
fn request_path(event: &Request) -> &str {
    match event.raw_http_path() {
        "" => event.uri().path(),
        raw => raw,
    }
}

/// `/tz`: looks up whatever the user typed after the command.
fn time_zone_current_time(
    config: &Config,
    event: &Request,
    now: DateTime<Utc>,
) -> Result<Response<Body>, HandlerError> {
    let body = verified_body(config, event, now)?;
    let command = slack::parse_slash_command(body).map_err(HandlerError::InvalidPayload)?;

    let zones = timezone::resolve(&command.text, &config.known_zones);
    tracing::info!(
        query = %command.text,
        user = %command.user_name,
        matches = zones.len(),
        "resolved time zone query"
    );

    reply(&command.text, &zones, now)
}

/// `/tzn`
fn new_york_current_time(
    config: &Config,
    event: &Request,
    now: DateTime<Utc>,
) -> Result<Response<Body>, HandlerError> {
    verified_body(config, event, now)?;
    reply(America::New_York.name(), &[America::New_York], now)
}

/// `/tzs`
fn seoul_current_time(
    config: &Config,
    event: &Request,
    now: DateTime<Utc>,
) -> Result<Response<Body>, HandlerError> {
    verified_body(config, event, now)?;
    reply(Asia::Seoul.name(), &[Asia::Seoul], now)
}

fn verified_body<'a>(
    config: &Config,
    event: &'a Request,
    now: DateTime<Utc>,
) -> Result<&'a [u8], HandlerError> {
    let body: &[u8] = event.body();
    let secret = config.signing_secret.as_deref();

    if slack::verify_request(event.headers(), body, secret, now.timestamp()) {
        Ok(body)
    } else {
        Err(HandlerError::Unauthorized)
    }
}

fn reply(query: &str, zones: &[Tz], now: DateTime<Utc>) -> Result<Response<Body>, HandlerError> {
    let readings: Vec<_> = zones
        .iter()
        .map(|zone| timezone::read_time(*zone, now))
        .collect();

    for reading in &readings {
        tracing::debug!(
            zone = reading.zone.name(),
            local = %reading.local,
            business_hour = reading.is_business_hour,
            "current time"
        );
    }

    let message = SlackMessage::mrkdwn(format::render(query, &readings));

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&message)?))?)
}

fn empty_response(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::Empty);
    *response.status_mut() = status;
    response
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .init();

    let config = Config::from_env();
    let config = &config;

    run(service_fn(move |event: Request| async move {
        function_handler(config, event).await
    }))
    .await
}
