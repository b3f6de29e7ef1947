//! Offline demo route generator
//!
//! Produces a deterministic, plausible-looking route for any query so the
//! planner can be demonstrated without a routing backend. The demo route is
//! built as a canonical [`RouteResponse`] and then goes through the same
//! normalization as a real backend response.

use std::f64::consts::PI;

use async_trait::async_trait;
use domain::{RiskLevel, RouteQuery, RouteResult};
use tracing::{debug, instrument};

use crate::client::RouteClient;
use crate::error::RoutingError;
use crate::models::{
    BridgeRisk, LineStringGeometry, RouteRequest, RouteResponse, RouteSummary, WireBridgeMarker,
};
use crate::normalize::normalize;

/// Clearance margin under which a bridge counts as near the limit
const NEAR_CLEARANCE_M: f64 = 0.25;

/// Centre of the demo area (Leeds)
const ANCHOR: [f64; 2] = [-1.5491, 53.8008];

const ROUTE_POINTS: usize = 12;
const EARTH_RADIUS_KM: f64 = 6371.0;
const AVERAGE_SPEED_KMH: f64 = 48.0;

/// Classify a bridge by the clearance it leaves above the vehicle
///
/// Negative clearance is [`RiskLevel::High`], up to 0.25 m is
/// [`RiskLevel::Medium`], anything more is [`RiskLevel::Low`].
#[must_use]
pub fn classify_clearance(bridge_height_m: f64, vehicle_height_m: f64) -> RiskLevel {
    let clearance = bridge_height_m - vehicle_height_m;
    if clearance < 0.0 {
        RiskLevel::High
    } else if clearance <= NEAR_CLEARANCE_M {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

const fn severity(level: RiskLevel) -> u8 {
    match level {
        RiskLevel::Unknown => 0,
        RiskLevel::Low => 1,
        RiskLevel::Medium => 2,
        RiskLevel::High => 3,
    }
}

/// FNV-1a, stable across platforms and releases
fn stable_hash(text: &str) -> u64 {
    text.to_lowercase().bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Map a hash to `[-1.0, 1.0)`
#[allow(clippy::cast_precision_loss)]
fn unit(hash: u64, shift: u32) -> f64 {
    let bits = (hash >> shift) & 0xFFFF;
    (bits as f64 / 32768.0) - 1.0
}

fn place(text: &str) -> [f64; 2] {
    let hash = stable_hash(text);
    [ANCHOR[0] + unit(hash, 0) * 0.45, ANCHOR[1] + unit(hash, 16) * 0.25]
}

fn haversine_km(a: [f64; 2], b: [f64; 2]) -> f64 {
    let (lat1, lat2) = (a[1].to_radians(), b[1].to_radians());
    let d_lat = (b[1] - a[1]).to_radians();
    let d_lon = (b[0] - a[0]).to_radians();
    let h = (lat1.cos() * lat2.cos()).mul_add((d_lon / 2.0).sin().powi(2), (d_lat / 2.0).sin().powi(2));
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Points from `from` to `to`, bowed sideways by `bow` degrees at the middle
#[allow(clippy::cast_precision_loss)]
fn polyline(from: [f64; 2], to: [f64; 2], bow: f64) -> Vec<[f64; 2]> {
    let (dx, dy) = (to[0] - from[0], to[1] - from[1]);
    let len = dx.hypot(dy).max(f64::EPSILON);
    let (nx, ny) = (-dy / len, dx / len);

    (0..ROUTE_POINTS)
        .map(|i| {
            let t = i as f64 / (ROUTE_POINTS - 1) as f64;
            let offset = bow * (t * PI).sin();
            [
                round6(nx.mul_add(offset, dx.mul_add(t, from[0]))),
                round6(ny.mul_add(offset, dy.mul_add(t, from[1]))),
            ]
        })
        .collect()
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build the demo response for a request
///
/// Deterministic: the same request always yields the same response.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn build_fixture_response(request: &RouteRequest) -> RouteResponse {
    let from = place(&request.start);
    let mut to = place(&request.end);
    if (to[0] - from[0]).abs() < 1e-3 && (to[1] - from[1]).abs() < 1e-3 {
        to = [from[0] + 0.05, from[1] + 0.03];
    }

    let seed = stable_hash(&format!("{}|{}", request.start, request.end));
    let main = polyline(from, to, 0.01 + unit(seed, 8).abs() * 0.02);

    let distance_km = round1(main.windows(2).map(|w| haversine_km(w[0], w[1])).sum());
    let duration_min = (distance_km / AVERAGE_SPEED_KMH * 60.0).round();

    // Three bridges along the route, the first one the lowest
    let low_height = 3.6 + ((seed >> 4) % 10) as f64 * 0.1;
    let bridges: Vec<(usize, f64)> = vec![
        (ROUTE_POINTS / 4, round1(low_height)),
        (ROUTE_POINTS / 2, round1(low_height + 0.6)),
        (ROUTE_POINTS * 3 / 4, 5.1),
    ];

    let vehicle = request.vehicle_height_m;
    let markers: Vec<WireBridgeMarker> = bridges
        .iter()
        .map(|&(idx, height)| {
            let [lon, lat] = main[idx];
            let risk = classify_clearance(height, vehicle);
            WireBridgeMarker {
                lat,
                lon,
                height_m: Some(height),
                risk_level: risk.as_str().to_string(),
                message: Some(format!("Bridge clearance {height:.1} m")),
            }
        })
        .collect();

    let levels: Vec<RiskLevel> = bridges
        .iter()
        .map(|&(_, height)| classify_clearance(height, vehicle))
        .collect();
    let worst = levels
        .iter()
        .copied()
        .max_by_key(|level| severity(*level))
        .unwrap_or_default();
    let conflicts = levels.iter().filter(|l| **l == RiskLevel::High).count();

    let mut warnings: Vec<String> = bridges
        .iter()
        .zip(&levels)
        .filter_map(|(&(_, height), level)| match level {
            RiskLevel::High => Some(format!(
                "Bridge clearance {height:.1} m is below vehicle height {vehicle:.2} m"
            )),
            RiskLevel::Medium => Some(format!(
                "Bridge clearance {height:.1} m is within {NEAR_CLEARANCE_M} m of vehicle height"
            )),
            _ => None,
        })
        .collect();

    let mut steps = vec![
        format!("Depart {}", request.start),
        format!("Continue for {:.1} km", distance_km / 2.0),
        format!("Arrive at {}", request.end),
    ];

    let reroute = request.avoid_low_bridges && worst == RiskLevel::High;
    let alt_geometry = reroute.then(|| LineStringGeometry::new(polyline(from, to, -0.04)));

    let (level, status_text) = if reroute {
        steps.insert(1, "Follow the signed diversion around the low bridge".to_string());
        warnings.push(format!(
            "Alternative route avoids {conflicts} low bridge(s) on the main route"
        ));
        let remaining = levels
            .iter()
            .copied()
            .filter(|l| *l != RiskLevel::High)
            .max_by_key(|level| severity(*level))
            .unwrap_or(RiskLevel::Low);
        (remaining, "Alternative route avoids low bridges (demo data)")
    } else {
        let text = match worst {
            RiskLevel::High => "Vehicle too tall for a bridge on this route (demo data)",
            RiskLevel::Medium => "Bridge clearance near the limit (demo data)",
            _ => "No low bridges on this route (demo data)",
        };
        (worst, text)
    };

    let nearest = bridges
        .iter()
        .zip(&levels)
        .filter(|(_, level)| **level != RiskLevel::Low)
        .map(|(&(_, height), _)| height)
        .reduce(f64::min);

    RouteResponse {
        summary: RouteSummary {
            distance_km,
            duration_min,
        },
        bridge_risk: BridgeRisk {
            level: level.as_str().to_string(),
            status_text: status_text.to_string(),
            nearest_bridge_height_m: nearest,
            nearest_bridge_distance_m: nearest.map(|_| 40.0 + (seed % 160) as f64),
        },
        warnings,
        steps,
        geometry: LineStringGeometry::new(main),
        alt_geometry,
        bridge_markers: markers,
    }
}

/// Route client answering every query with generated demo data
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRouteClient;

impl FixtureRouteClient {
    /// Create a fixture client
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RouteClient for FixtureRouteClient {
    #[instrument(skip(self, query), fields(start = %query.start(), end = %query.end()))]
    async fn request_route(&self, query: &RouteQuery) -> Result<RouteResult, RoutingError> {
        let response = build_fixture_response(&RouteRequest::from(query));
        let raw = serde_json::to_value(&response)
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        debug!("Serving demo route");
        Ok(normalize(&raw))
    }

    async fn is_healthy(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
