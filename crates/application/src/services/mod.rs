//! Application services

pub mod planner;
pub mod renderer;

pub use planner::{BannerKind, PlannerError, RoutePlanner, StatusBanner};
pub use renderer::{
    ListView, PLACEHOLDER, RenderError, RenderReport, RenderedRoute, RouteRenderer, Severity,
    SummaryView, marker_color, marker_popup, risk_label, summarize,
};
