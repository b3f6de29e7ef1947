//! Property-based tests for response normalization

use proptest::prelude::*;
use serde_json::{Value, json};

use integration_routing::{build_fixture_response, normalize, RouteRequest};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z0-9 .]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![
                    Just("geometry".to_string()),
                    Just("summary".to_string()),
                    Just("distance_km".to_string()),
                    Just("bridge_markers".to_string()),
                    Just("warnings".to_string()),
                    Just("coordinates".to_string()),
                    "[a-z_]{1,8}",
                ],
                inner,
                0..6
            )
            .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn normalize_never_panics(raw in arb_json()) {
        let result = normalize(&raw);
        if let Some(distance) = result.distance_km {
            prop_assert!(distance.is_finite());
        }
        prop_assert!(result.warnings.iter().all(|w| !w.trim().is_empty()));
    }

    #[test]
    fn fixture_route_is_always_drawable(
        start in "[A-Za-z ]{1,20}",
        end in "[A-Za-z ]{1,20}",
        height in 0.5f64..8.0,
        avoid in any::<bool>(),
    ) {
        let response = build_fixture_response(&RouteRequest {
            start,
            end,
            vehicle_height_m: height,
            avoid_low_bridges: avoid,
        });
        let result = normalize(&serde_json::to_value(&response).unwrap());

        let geometry = result.main_geometry.unwrap();
        prop_assert!(geometry.first_invalid().is_none());
        prop_assert!(geometry.len() >= 2);
        prop_assert_eq!(result.bridge_markers.len(), 3);
    }
}
