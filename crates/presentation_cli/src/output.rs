//! Text rendering of planner views for the terminal

use std::fmt::Write;

use application::{BannerKind, ListView, RenderedRoute, Severity, StatusBanner};

fn banner_icon(kind: BannerKind) -> &'static str {
    match kind {
        BannerKind::Info => "ℹ️ ",
        BannerKind::Success => "✅",
        BannerKind::Error => "❌",
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Ok => "🟢",
        Severity::Warn => "🟡",
        Severity::Danger => "🔴",
        Severity::None => "⚪",
    }
}

/// One-line banner
pub fn format_banner(banner: &StatusBanner) -> String {
    format!("{} {}", banner_icon(banner.kind), banner.text)
}

fn push_list(out: &mut String, title: &str, list: &ListView, numbered: bool) {
    let _ = writeln!(out, "\n{title}:");
    for (i, item) in list.items.iter().enumerate() {
        if list.placeholder {
            let _ = writeln!(out, "   ({item})");
        } else if numbered {
            let _ = writeln!(out, "   {}. {item}", i + 1);
        } else {
            let _ = writeln!(out, "   - {item}");
        }
    }
}

/// Summary, warnings, steps and map overlay as terminal text
pub fn format_route(route: &RenderedRoute) -> String {
    let summary = &route.summary;
    let mut out = String::new();

    let _ = writeln!(out, "📏 Distance: {}", summary.distance);
    let _ = writeln!(out, "⏱️  Duration: {}", summary.duration);
    let _ = writeln!(
        out,
        "{} Risk: {}",
        severity_icon(summary.severity),
        summary.risk_label
    );
    if let Some(text) = &summary.status_text {
        let _ = writeln!(out, "   {text}");
    }
    if let Some(bridge) = &summary.nearest_bridge {
        let _ = writeln!(out, "   {bridge}");
    }

    push_list(&mut out, "⚠️  Warnings", &route.warnings, false);
    push_list(&mut out, "🧭 Directions", &route.steps, true);

    let map = &route.map;
    let _ = writeln!(
        out,
        "\n🗺️  Map: {} route line(s), {} bridge marker(s)",
        map.polylines, map.markers
    );
    for skipped in &map.skipped {
        let _ = writeln!(out, "   skipped: {skipped}");
    }

    out
}
