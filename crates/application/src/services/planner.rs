//! Route planning service
//!
//! Runs one form submission end to end: validate, request, render. Owns the
//! status banner and the submit debounce, so a second submission while a
//! request is in flight is refused instead of queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use domain::RouteForm;
use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{MapPort, RoutingPort};
use crate::services::renderer::{RenderedRoute, RouteRenderer};

/// Banner tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    /// Neutral progress message
    Info,
    /// Route found
    Success,
    /// Validation or request failure
    Error,
}

/// Status banner shown above the views
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBanner {
    /// Banner tone
    pub kind: BannerKind,
    /// Banner text
    pub text: String,
}

impl StatusBanner {
    /// An informational banner
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Info,
            text: text.into(),
        }
    }

    /// A success banner
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    /// An error banner
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }

    /// Whether this banner reports a failure
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::info("Enter a start, an end and your vehicle height")
    }
}

/// Errors returned from a submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// A submission is already in flight
    #[error("A route request is already in progress")]
    Busy,

    /// Validation or routing failure
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

/// Clears the busy flag when dropped
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, PlannerError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| PlannerError::Busy)
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Route planner driving the routing port and the renderer
pub struct RoutePlanner<M: MapPort> {
    routing: Arc<dyn RoutingPort>,
    renderer: Mutex<RouteRenderer<M>>,
    banner: Mutex<StatusBanner>,
    current: Mutex<Option<RenderedRoute>>,
    busy: AtomicBool,
}

impl<M: MapPort> std::fmt::Debug for RoutePlanner<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePlanner")
            .field("banner", &*self.banner.lock())
            .field("busy", &self.busy.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl<M: MapPort> RoutePlanner<M> {
    /// Create a planner over a routing port and a map widget
    pub fn new(routing: Arc<dyn RoutingPort>, map: M) -> Self {
        Self {
            routing,
            renderer: Mutex::new(RouteRenderer::new(map)),
            banner: Mutex::new(StatusBanner::default()),
            current: Mutex::new(None),
            busy: AtomicBool::new(false),
        }
    }

    /// Whether the submit control is enabled
    pub fn is_submit_enabled(&self) -> bool {
        !self.busy.load(Ordering::Acquire)
    }

    /// The current status banner
    pub fn banner(&self) -> StatusBanner {
        self.banner.lock().clone()
    }

    /// The views from the last successful submission
    pub fn current(&self) -> Option<RenderedRoute> {
        self.current.lock().clone()
    }

    /// Run a closure against the map widget
    pub fn with_map<T>(&self, f: impl FnOnce(&M) -> T) -> T {
        f(self.renderer.lock().map())
    }

    /// Check if the routing backend is available
    pub async fn is_backend_healthy(&self) -> bool {
        self.routing.is_healthy().await
    }

    /// Submit the route form
    ///
    /// On failure the banner shows the error and the views from the previous
    /// successful submission stay as they were.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Busy`] if a submission is already running,
    /// otherwise the validation or routing error.
    #[instrument(skip(self, form))]
    pub async fn submit(&self, form: &RouteForm) -> Result<RenderedRoute, PlannerError> {
        let _guard = SubmitGuard::acquire(&self.busy).inspect_err(|_| {
            debug!("Submission ignored while a request is in flight");
        })?;

        let query = form.validate().map_err(|e| {
            warn!(field = e.field().name(), error = %e, "Route form rejected");
            self.set_banner(StatusBanner::error(e.to_string()));
            ApplicationError::from(e)
        })?;

        self.set_banner(StatusBanner::info(format!(
            "Planning route from {} to {}...",
            query.start(),
            query.end()
        )));

        let result = match self.routing.plan_route(&query).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Route request failed");
                self.set_banner(StatusBanner::error(e.to_string()));
                return Err(e.into());
            },
        };

        let rendered = self.renderer.lock().render(&result);
        *self.current.lock() = Some(rendered.clone());

        let summary = &rendered.summary;
        info!(
            distance = %summary.distance,
            risk = summary.severity.as_class(),
            "Route planned"
        );
        self.set_banner(StatusBanner::success(format!(
            "Route ready: {}, {} ({})",
            summary.distance, summary.duration, summary.risk_label
        )));

        Ok(rendered)
    }

    fn set_banner(&self, banner: StatusBanner) {
        *self.banner.lock() = banner;
    }
}
