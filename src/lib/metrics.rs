//! Request counting and the Prometheus text exposition of the counts.
use std::{collections::BTreeMap, fmt::Write};

use axum::{
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use chrono::{DateTime, Utc};
use tracing::{error, instrument};

use crate::state::SharedState;

/// The content type scrapers expect for the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

const METRIC_NAME: &str = "notes_requests";
const METRIC_HELP: &str = "Total API requests";

/// A single labeled counter.
#[derive(Debug)]
struct Sample {
    count: u64,
    created: DateTime<Utc>,
}

/// Counts requests by HTTP method.
#[derive(Debug, Default)]
pub struct RequestCounter {
    samples: BTreeMap<String, Sample>,
}

impl RequestCounter {
    /// Creates a counter with no requests recorded.
    pub fn new() -> Self {
        RequestCounter {
            samples: BTreeMap::new(),
        }
    }

    /// Records one request for `method`. The first request seen for a method
    /// sets the creation time of its counter.
    pub fn inc(&mut self, method: &str, now: DateTime<Utc>) {
        self.samples
            .entry(method.to_owned())
            .or_insert(Sample {
                count: 0,
                created: now,
            })
            .count += 1;
    }

    /// Returns how many requests were recorded for `method`.
    pub fn get(&self, method: &str) -> u64 {
        self.samples.get(method).map_or(0, |sample| sample.count)
    }

    /// Renders every counter in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();

        // Writing into a String can't fail.
        let _ = writeln!(out, "# HELP {METRIC_NAME}_total {METRIC_HELP}");
        let _ = writeln!(out, "# TYPE {METRIC_NAME}_total counter");

        for (method, sample) in &self.samples {
            let _ = writeln!(
                out,
                "{METRIC_NAME}_total{{method=\"{}\"}} {:.1}",
                escape_label(method),
                sample.count as f64
            );
        }

        for (method, sample) in &self.samples {
            let _ = writeln!(
                out,
                "{METRIC_NAME}_created{{method=\"{}\"}} {}",
                escape_label(method),
                sample.created.timestamp_millis() as f64 / 1000.0
            );
        }

        out
    }
}

/// Escapes a label value as the exposition format requires.
fn escape_label(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Counts every request by method before it reaches the router.
pub async fn track_requests<B>(
    Extension(state): Extension<SharedState>,
    req: Request<B>,
    next: Next<B>,
) -> Response {
    match state.metrics.lock() {
        Ok(mut counter) => counter.inc(req.method().as_str(), Utc::now()),
        Err(err) => error!("error acquiring the lock for the request counter: {:?}", err),
    }

    next.run(req).await
}

/// Exposes the request counters.
#[instrument(skip(state))]
pub async fn metrics(Extension(state): Extension<SharedState>) -> Response {
    let body = match state.metrics.lock() {
        Ok(counter) => counter.render(),
        Err(err) => {
            error!("error acquiring the lock for the request counter: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}
