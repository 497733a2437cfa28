use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Process-wide counters. Read only by `/health` and logs; answers never
/// depend on them.
#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    blocked_total: AtomicU64,
    output_rejected_total: AtomicU64,
    fallback_total: AtomicU64,
    climate_dispatch_total: AtomicU64,
    costs_dispatch_total: AtomicU64,
    places_dispatch_total: AtomicU64,
    itinerary_dispatch_total: AtomicU64,
    remote_calls_total: AtomicU64,
    backend_failures_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub blocked_total: u64,
    pub output_rejected_total: u64,
    pub fallback_total: u64,
    pub dispatch: DispatchCounts,
    pub remote_calls_total: u64,
    pub backend_failures_total: u64,
    pub avg_latency_millis: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchCounts {
    pub clima: u64,
    pub costos: u64,
    pub lugares: u64,
    pub itinerario: u64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_blocked(&self) {
        self.blocked_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_output_rejected(&self) {
        self.output_rejected_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one dispatch under the category key; unknown keys count as fallback.
    pub fn inc_dispatch(&self, category_key: &str) {
        let counter = match category_key {
            "clima" => &self.climate_dispatch_total,
            "costos" => &self.costs_dispatch_total,
            "lugares" => &self.places_dispatch_total,
            "itinerario" => &self.itinerary_dispatch_total,
            _ => &self.fallback_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_remote_call(&self) {
        self.remote_calls_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_backend_failure(&self) {
        self.backend_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            blocked_total: self.blocked_total.load(Ordering::Relaxed),
            output_rejected_total: self.output_rejected_total.load(Ordering::Relaxed),
            fallback_total: self.fallback_total.load(Ordering::Relaxed),
            dispatch: DispatchCounts {
                clima: self.climate_dispatch_total.load(Ordering::Relaxed),
                costos: self.costs_dispatch_total.load(Ordering::Relaxed),
                lugares: self.places_dispatch_total.load(Ordering::Relaxed),
                itinerario: self.itinerary_dispatch_total.load(Ordering::Relaxed),
            },
            remote_calls_total: self.remote_calls_total.load(Ordering::Relaxed),
            backend_failures_total: self.backend_failures_total.load(Ordering::Relaxed),
            avg_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,ruta_api=info,ruta_agents=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}
