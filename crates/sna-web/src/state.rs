//! Application state management
//!
//! Author: hephaex@gmail.com

use sna_analysis::AnalysisService;
use sna_core::AppConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
///
/// The service and its models are read-only after startup; only the
/// counters change.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Analysis service with all models loaded
    pub service: Arc<AnalysisService>,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
    /// Completed Analyze actions
    pub analyze_count: AtomicU64,
    /// Completed Get Answer actions
    pub answer_count: AtomicU64,
    /// Blank-input warnings shown
    pub warning_count: AtomicU64,
    /// Failed actions
    pub error_count: AtomicU64,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, service: Arc<AnalysisService>) -> Self {
        Self {
            config,
            service,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            analyze_count: AtomicU64::new(0),
            answer_count: AtomicU64::new(0),
            warning_count: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
        }
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    pub fn record_analyze(&self) {
        self.analyze_count.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_answer(&self) {
        self.answer_count.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_warning(&self) {
        self.warning_count.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_error(&self) {
        self.error_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
