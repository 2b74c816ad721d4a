use std::io::Write;
use std::path::PathBuf;

use approx::assert_relative_eq;

use solys::{
    build_world, BodyKindConfig, EngineError, NVec2, Scenario, ScenarioConfig, ScenarioError,
    StepMode,
};

const SUN_EARTH: &str = r#"
world:
  G: 0.081
  dt: 0.02
  steps: 10
bodies:
  - name: Sun
    kind: { type: celestial, density: 500.0, radius: 70.0 }
  - name: Earth
    kind: { type: celestial, density: 1.5, radius: 6.0 }
    x: [ 0.0, -400.0 ]
    orbit: [ Sun ]
"#;

// The documented scenario layout, kept byte-for-byte in sync with the docs
const DOCUMENTED: &str = r#"
world:
  G: 0.081
  step_mode: sequential   # or synchronized
  dt: 0.01
  steps: 1000
bodies:
  - name: Sun
    kind: { type: celestial, density: 500.0, radius: 70.0 }
    x: [0.0, 0.0]
    v: [0.0, 0.0]
  - name: Earth
    kind: { type: celestial, density: 1.5, radius: 6.0 }
    x: [0.0, -400.0]
    orbit: [Sun]          # seed v with circular_orbit_speed_multi
"#;

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name)
}

// ==================================================================================
// Config parsing
// ==================================================================================

#[test]
fn parses_world_and_bodies() {
    let cfg = ScenarioConfig::from_yaml_str(SUN_EARTH).unwrap();

    assert_eq!(cfg.world.g, 0.081);
    assert_eq!(cfg.world.step_mode, StepMode::Sequential);
    assert_eq!(cfg.world.dt, Some(0.02));
    assert_eq!(cfg.bodies.len(), 2);
    assert_eq!(
        cfg.bodies[0].kind,
        BodyKindConfig::Celestial { density: 500.0, radius: 70.0 }
    );
    assert_eq!(cfg.bodies[0].x, [0.0, 0.0]);
    assert_eq!(cfg.bodies[1].orbit, vec!["Sun".to_string()]);
}

#[test]
fn parses_point_bodies_and_step_mode() {
    let cfg = ScenarioConfig::from_yaml_str(
        r#"
world: { G: 1.0, step_mode: synchronized }
bodies:
  - kind: { type: point, mass: 3.0 }
    v: [ 1.0, 2.0 ]
"#,
    )
    .unwrap();

    assert_eq!(cfg.world.step_mode, StepMode::Synchronized);
    assert_eq!(cfg.world.steps, None);
    assert_eq!(cfg.bodies[0].kind, BodyKindConfig::Point { mass: 3.0 });
    assert_eq!(cfg.bodies[0].name, None);
    assert_eq!(cfg.bodies[0].v, [1.0, 2.0]);
}

#[test]
fn documented_layout_parses_and_builds_the_sun_earth_scene() {
    let cfg = ScenarioConfig::from_yaml_str(DOCUMENTED).unwrap();
    assert_eq!(
        cfg.bodies[1].kind,
        BodyKindConfig::Celestial { density: 1.5, radius: 6.0 }
    );

    let scenario = Scenario::build_scenario(&cfg).unwrap();
    let builtin = Scenario::sun_earth().unwrap();
    assert_eq!(scenario.dt, builtin.dt);
    assert_eq!(scenario.steps, builtin.steps);
    for (a, b) in scenario.world.bodies().iter().zip(builtin.world.bodies()) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.mass(), b.mass());
        assert_eq!(a.position(), b.position());
        assert_eq!(a.velocity(), b.velocity());
    }
}

#[test]
fn externally_tagged_kind_is_rejected() {
    let err = ScenarioConfig::from_yaml_str(
        "world: { G: 1.0 }\nbodies:\n  - kind: { point: { mass: 1.0 } }\n",
    )
    .unwrap_err();
    assert!(matches!(err, ScenarioError::Yaml(_)));
}

#[test]
fn malformed_yaml_is_a_yaml_error() {
    let err = ScenarioConfig::from_yaml_str("world: [not, a, map]").unwrap_err();
    assert!(matches!(err, ScenarioError::Yaml(_)));

    let err = ScenarioConfig::from_yaml_str(
        "world: { G: 1.0 }\nbodies:\n  - kind: { type: comet, mass: 1.0 }\n",
    )
    .unwrap_err();
    assert!(matches!(err, ScenarioError::Yaml(_)));
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SUN_EARTH.as_bytes()).unwrap();

    let cfg = ScenarioConfig::from_path(file.path()).unwrap();
    assert_eq!(cfg.bodies.len(), 2);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ScenarioConfig::from_path(dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, ScenarioError::Io(_)));
}

#[test]
fn shipped_scenarios_build() {
    for name in ["sun_earth.yaml", "binary_star.yaml", "inner_planets.yaml"] {
        let cfg = ScenarioConfig::from_path(scenario_path(name)).unwrap();
        let mut scenario = Scenario::build_scenario(&cfg).unwrap();

        assert_eq!(scenario.world.len(), cfg.bodies.len(), "{}", name);
        for _ in 0..10 {
            scenario.world.step(scenario.dt).unwrap();
        }
    }
}

// ==================================================================================
// Scenario building
// ==================================================================================

#[test]
fn yaml_sun_earth_matches_builtin_scene() {
    let cfg = ScenarioConfig::from_yaml_str(SUN_EARTH).unwrap();
    let from_yaml = build_world(&cfg).unwrap();
    let builtin = Scenario::sun_earth().unwrap().world;

    assert_eq!(from_yaml.len(), builtin.len());
    for (a, b) in from_yaml.bodies().iter().zip(builtin.bodies()) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.mass(), b.mass());
        assert_eq!(a.position(), b.position());
        assert_eq!(a.velocity(), b.velocity());
    }
}

#[test]
fn scenario_uses_configured_or_default_step_settings() {
    let cfg = ScenarioConfig::from_yaml_str(SUN_EARTH).unwrap();
    let scenario = Scenario::build_scenario(&cfg).unwrap();
    assert_eq!(scenario.dt, 0.02);
    assert_eq!(scenario.steps, 10);

    let cfg = ScenarioConfig::from_yaml_str(
        "world: { G: 1.0 }\nbodies:\n  - kind: { type: point, mass: 1.0 }\n",
    )
    .unwrap();
    let scenario = Scenario::build_scenario(&cfg).unwrap();
    assert_eq!(scenario.dt, solys::simulation::scenario::DEFAULT_DT);
    assert_eq!(scenario.steps, solys::simulation::scenario::DEFAULT_STEPS);
}

#[test]
fn orbit_seed_is_perpendicular_and_relative_to_center() {
    let cfg = ScenarioConfig::from_yaml_str(
        r#"
world: { G: 2.0 }
bodies:
  - name: Star
    kind: { type: point, mass: 1000.0 }
    x: [ 10.0, 10.0 ]
    v: [ 0.5, 0.0 ]
  - name: Rock
    kind: { type: point, mass: 1.0 }
    x: [ 30.0, 10.0 ]
    v: [ 0.0, 0.25 ]
    orbit: [ Star ]
"#,
    )
    .unwrap();
    let world = build_world(&cfg).unwrap();

    let rock = world.find_by_name("Rock").unwrap();
    let speed = (2.0_f64 * 1000.0 / 20.0).sqrt();

    // radius points +x, so the tangent is +y
    assert_relative_eq!(rock.velocity().x, 0.5, epsilon = 1e-12);
    assert_relative_eq!(rock.velocity().y, speed + 0.25, max_relative = 1e-12);
}

#[test]
fn multi_center_orbit_sums_masses() {
    let cfg = ScenarioConfig::from_yaml_str(
        r#"
world: { G: 1.0 }
bodies:
  - name: A
    kind: { type: point, mass: 300.0 }
  - name: B
    kind: { type: point, mass: 100.0 }
    x: [ 1.0, 0.0 ]
  - name: C
    kind: { type: point, mass: 1.0 }
    x: [ 0.0, -100.0 ]
    orbit: [ A, B ]
"#,
    )
    .unwrap();
    let world = build_world(&cfg).unwrap();

    let c = world.find_by_name("C").unwrap();
    assert_relative_eq!(c.velocity().x, (400.0_f64 / 100.0).sqrt(), max_relative = 1e-12);
    assert_relative_eq!(c.velocity().y, 0.0, epsilon = 1e-12);
}

#[test]
fn unknown_orbit_center_is_reported() {
    let cfg = ScenarioConfig::from_yaml_str(
        r#"
world: { G: 1.0 }
bodies:
  - name: Moon
    kind: { type: point, mass: 1.0 }
    x: [ 5.0, 0.0 ]
    orbit: [ Planet ]
  - name: Planet
    kind: { type: point, mass: 100.0 }
"#,
    )
    .unwrap();

    match build_world(&cfg) {
        Err(ScenarioError::UnknownCenter { body, center }) => {
            assert_eq!(body, "Moon");
            assert_eq!(center, "Planet");
        }
        other => panic!("expected UnknownCenter, got {:?}", other.map(|w| w.len())),
    }
}

#[test]
fn invalid_body_mass_is_an_engine_error() {
    let cfg = ScenarioConfig::from_yaml_str(
        "world: { G: 1.0 }\nbodies:\n  - kind: { type: celestial, density: 0.0, radius: 3.0 }\n",
    )
    .unwrap();

    assert!(matches!(
        build_world(&cfg),
        Err(ScenarioError::Engine(EngineError::InvalidMass(_)))
    ));
}

#[test]
fn negative_or_nan_g_is_rejected() {
    for g in ["-1.0", ".nan", ".inf"] {
        let yaml = format!(
            "world: {{ G: {} }}\nbodies:\n  - name: A\n    kind: {{ type: point, mass: 10.0 }}\n  - name: B\n    kind: {{ type: point, mass: 1.0 }}\n    x: [ 5.0, 0.0 ]\n    orbit: [ A ]\n",
            g
        );
        let cfg = ScenarioConfig::from_yaml_str(&yaml).unwrap();

        match build_world(&cfg) {
            Err(ScenarioError::InvalidGravitationalConstant(bad)) => {
                assert!(bad.is_nan() || bad == cfg.world.g, "G = {}", g)
            }
            other => panic!("G = {}: expected InvalidGravitationalConstant, got {:?}", g, other.map(|w| w.len())),
        }
    }
}

#[test]
fn zero_g_builds() {
    let cfg = ScenarioConfig::from_yaml_str(
        "world: { G: 0.0 }\nbodies:\n  - kind: { type: point, mass: 1.0 }\n",
    )
    .unwrap();
    assert_eq!(build_world(&cfg).unwrap().gravitational_constant(), 0.0);
}

#[test]
fn orbit_seed_on_top_of_center_is_rejected() {
    let cfg = ScenarioConfig::from_yaml_str(
        r#"
world: { G: 1.0 }
bodies:
  - name: A
    kind: { type: point, mass: 10.0 }
  - name: B
    kind: { type: point, mass: 1.0 }
    orbit: [ A ]
"#,
    )
    .unwrap();

    assert!(matches!(
        build_world(&cfg),
        Err(ScenarioError::Engine(EngineError::CoincidentBodies { .. }))
    ));
}

#[test]
fn built_bodies_get_ids_in_file_order() {
    let cfg = ScenarioConfig::from_yaml_str(SUN_EARTH).unwrap();
    let world = build_world(&cfg).unwrap();

    let ids: Vec<_> = world.bodies().iter().map(|b| b.id().unwrap().0).collect();
    assert_eq!(ids, vec![0, 1]);
    assert_eq!(world.bodies()[0].position(), NVec2::zeros());
}
