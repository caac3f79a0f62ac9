//! `FluidParams` documents and configuration validation

use fluid_sim_core::{ColorMode, FluidError, FluidParams, FluidSolver, FluidStats};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_partial_document_uses_defaults() {
    let params: FluidParams = serde_json::from_str(
        r#"{ "nx": 64, "ny": 48, "color_mode": "mono", "wrap_x": true, "seed": 9 }"#,
    )
    .unwrap();

    assert_eq!(params.nx, 64);
    assert_eq!(params.ny, 48);
    assert_eq!(params.color_mode, ColorMode::Mono);
    assert!(params.wrap_x);
    assert!(!params.wrap_y);
    assert_eq!(params.seed, Some(9));
    assert_eq!(params.dt, FluidParams::default().dt);
    assert_eq!(params.solver_iterations, 10);

    let solver = FluidSolver::new(params).unwrap();
    assert!(!solver.is_rgb());
    assert_eq!(solver.store().channels().len(), 1);
    assert_eq!(solver.wrap(), (true, false));
}

#[test]
fn test_empty_document_is_default() {
    let params: FluidParams = serde_json::from_str("{}").unwrap();
    assert_eq!(params, FluidParams::default());
}

#[test]
fn test_document_round_trip() {
    let params = FluidParams {
        viscosity: 0.002,
        vorticity_confinement: true,
        ..FluidParams::with_size(20, 30)
    };
    let json = serde_json::to_string_pretty(&params).unwrap();
    assert!(json.contains("\"vorticity_confinement\": true"));
    let back: FluidParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}

#[test]
fn test_invalid_documents_are_rejected_by_solver() {
    let params: FluidParams = serde_json::from_str(r#"{ "nx": 0 }"#).unwrap();
    assert_eq!(
        FluidSolver::new(params).unwrap_err(),
        FluidError::InvalidDimensions { nx: 0, ny: 100 }
    );

    let params: FluidParams = serde_json::from_str(r#"{ "fade_speed": -0.5 }"#).unwrap();
    let err = FluidSolver::new(params).unwrap_err();
    assert!(err.to_string().contains("fade_speed"));
}

#[test]
fn test_stats_serialize() {
    let json = serde_json::to_value(FluidStats::default()).unwrap();
    assert_eq!(json["uniformity"], 1.0);
    assert_eq!(json["avg_density"], 0.0);
}
