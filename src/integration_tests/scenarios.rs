use std::f64::consts::FRAC_PI_2;

use crate::{
    constants::{ROTATION_EPSILON, TRANSLATION_EPSILON},
    physics::Command,
    pose::Pose,
    sensors::{
        noise_models::motion::MotionNoiseModel,
        odometry_sensor::{OdometrySensor, OdometrySensorConfig, compute_raw_displacement},
    },
    simulator::{Simulator, SimulatorConfig},
    utils::determinist_random_variable::DeterministRandomVariableFactory,
};

fn odometer(noise_enabled: bool, seed: f32) -> OdometrySensor {
    OdometrySensor::from_config(
        &OdometrySensorConfig {
            noise_enabled,
            ..Default::default()
        },
        &DeterministRandomVariableFactory::new(seed),
    )
    .unwrap()
}

fn run_on_path(sensor: &mut OdometrySensor, path: &[Pose]) -> Pose {
    for p in path {
        sensor.compute_step(p);
    }
    sensor.estimate().unwrap()
}

fn wavy_path() -> Vec<Pose> {
    (0..200)
        .map(|i| {
            let t = i as f64 * 0.05;
            Pose::new(10. * t, 3. * t.sin(), (0.3 * t.cos()).atan())
        })
        .collect()
}

#[test]
fn straight_line() {
    let mut sensor = odometer(false, 0.);
    let path: Vec<Pose> = (0..=10).map(|i| Pose::new(10. * i as f64, 0., 0.)).collect();
    let estimate = run_on_path(&mut sensor, &path);
    assert!((estimate.x - 100.).abs() < 1e-6, "{estimate}");
    assert!(estimate.y.abs() < 1e-6, "{estimate}");
    assert!(estimate.orientation.abs() < 1e-6, "{estimate}");
}

#[test]
fn pure_rotation() {
    let mut sensor = odometer(false, 0.);
    let path: Vec<Pose> = (0..=5)
        .map(|i| Pose::new(0., 0., FRAC_PI_2 * i as f64 / 5.))
        .collect();
    let estimate = run_on_path(&mut sensor, &path);
    assert!(estimate.x.abs() < 1e-6 && estimate.y.abs() < 1e-6, "{estimate}");
    assert!((estimate.orientation - FRAC_PI_2).abs() < 1e-6, "{estimate}");
}

#[test]
fn drift_accumulation() {
    let path = wavy_path();
    let truth = run_on_path(&mut odometer(false, 0.), &path);

    let first = run_on_path(&mut odometer(true, 5.), &path);
    let second = run_on_path(&mut odometer(true, 5.), &path);
    assert_eq!(first, second);

    // Expected spread of the position error: along the path from the distance noise,
    // across it from the accumulated heading noise.
    let model = MotionNoiseModel::new(&DeterministRandomVariableFactory::new(0.));
    let mut along_variance = 0.;
    let mut heading_variance = 0.;
    let mut across_std = 0.;
    for w in path.windows(2) {
        let raw =
            compute_raw_displacement(&w[0], &w[1], TRANSLATION_EPSILON, ROTATION_EPSILON);
        let (sd_trans, sd_rot) = model.standard_deviations(&raw);
        along_variance += sd_trans.powi(2);
        heading_variance += 2. * sd_rot.powi(2);
        across_std += raw.dist * heading_variance.sqrt();
    }
    let expected_spread = along_variance.sqrt() + across_std;

    let gap = (first.position() - truth.position()).norm();
    assert!(gap > 0., "Noise should make the estimate drift");
    assert!(
        gap < 4. * expected_spread,
        "Drift of {gap} is too large for an expected spread of {expected_spread}"
    );
    assert!(first.is_finite());

    let other_seed = run_on_path(&mut odometer(true, 6.), &path);
    assert_ne!(first, other_seed);
}

#[test]
fn noiseless_simulation_has_no_drift() {
    let mut config = SimulatorConfig {
        random_seed: Some(1.),
        max_steps: 500,
        ..Default::default()
    };
    config.robot.body.initial_pose = Pose::new(-20., 35., 2.5);
    config.robot.odometer.noise_enabled = false;
    let mut simulator = Simulator::from_config(&config).unwrap();
    simulator.run();
    let drift = simulator.drift().unwrap();
    assert!(drift.distance < 1e-6, "{drift:?}");
    assert!(drift.orientation.abs() < 1e-9, "{drift:?}");
    assert_eq!(simulator.records().len(), 500);
}

#[test]
fn noisy_simulation_drifts() {
    let config = SimulatorConfig {
        random_seed: Some(1.),
        max_steps: 500,
        ..Default::default()
    };
    let mut simulator = Simulator::from_config(&config).unwrap();
    simulator.run();
    let drift = simulator.drift().unwrap();
    assert!(drift.distance > 0.);
    assert!(drift.distance.is_finite());
}

#[test]
fn disabled_odometer_in_simulation() {
    let mut simulator = Simulator::from_config(&SimulatorConfig {
        random_seed: Some(2.),
        max_steps: 10,
        ..Default::default()
    })
    .unwrap();
    simulator.robot_mut().set_odometer_disabled(true);
    simulator.run();
    assert_eq!(simulator.drift(), None);
    // Without estimate, the square pattern does not move the robot.
    assert_eq!(
        simulator.records().last().unwrap().robot.command,
        Command::stop()
    );
    assert_eq!(simulator.robot().true_pose(), simulator.robot().initial_pose());
}

#[test]
fn teleport_is_seen_as_motion() {
    let mut config = SimulatorConfig {
        random_seed: Some(3.),
        max_steps: 1,
        ..Default::default()
    };
    config.robot.odometer.noise_enabled = false;
    config.controller = crate::controllers::ControllerConfig::Idle;
    let mut simulator = Simulator::from_config(&config).unwrap();
    simulator.robot_mut().teleport(Pose::new(0., 7., 0.));
    simulator.step();
    let estimate = simulator.robot().odometer_values().unwrap();
    assert!((estimate.y - 7.).abs() < 1e-9, "{estimate}");
}

#[test]
fn estimated_velocity_matches_the_body() {
    let mut config = SimulatorConfig {
        random_seed: Some(4.),
        max_steps: 200,
        ..Default::default()
    };
    config.robot.odometer.noise_enabled = false;
    let mut simulator = Simulator::from_config(&config).unwrap();
    for _ in 0..200 {
        simulator.step();
        let robot = simulator.robot();
        let truth = robot.body().velocity();
        let (linear, angular) = robot.estimated_velocity();
        assert!((linear - truth.linear).abs() < 1e-9, "{linear} != {truth:?}");
        assert!((angular - truth.angular).abs() < 1e-9, "{angular} != {truth:?}");
    }
    let last = simulator.records().last().unwrap();
    assert_eq!(last.robot.true_velocity, simulator.robot().body().velocity());
}
