use crate::catalog::AdvisoryCatalog;
use crate::clock::{Clock, SystemClock};
use crate::config::GatewayConfig;
use crate::notify::{LogSink, NotificationSink, WebhookSink};
use crate::rate_limit::RateLimiter;
use crate::store::{AssessmentRepository, InMemoryAssessmentRepository};
use risk_engine::{RiskEngine, RiskEngineConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub engine: RiskEngine,
    pub repository: Arc<dyn AssessmentRepository>,
    pub advisories: Arc<AdvisoryCatalog>,
    pub notifier: Arc<dyn NotificationSink>,
    pub clock: Arc<dyn Clock>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Production wiring: in-memory storage, system clock, and a webhook
    /// sink when a URL is configured
    pub fn new(config: GatewayConfig) -> Self {
        let notifier: Arc<dyn NotificationSink> = match &config.webhook_url {
            Some(url) => Arc::new(WebhookSink::new(url.clone())),
            None => Arc::new(LogSink),
        };
        Self::with_parts(
            config,
            Arc::new(InMemoryAssessmentRepository::new()),
            notifier,
            Arc::new(SystemClock),
        )
    }

    pub fn with_parts(
        config: GatewayConfig,
        repository: Arc<dyn AssessmentRepository>,
        notifier: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let engine = RiskEngine::with_config(RiskEngineConfig {
            alert_threshold: config.alert_threshold,
            ..RiskEngineConfig::default()
        });
        Self {
            engine,
            repository,
            advisories: Arc::new(AdvisoryCatalog::seeded(clock.now())),
            notifier,
            clock,
            rate_limiter: Arc::new(RateLimiter::per_minute(config.rate_limit_per_minute)),
            config: Arc::new(config),
        }
    }
}
