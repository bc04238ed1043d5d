use std::path::Path;

use crate::simulator::{Record, Simulator};

macro_rules! replication_test {
    ($config:ident) => {
        #[test]
        fn $config() {
            let nb_replications = 5;

            let mut results: Vec<Vec<Record>> = Vec::new();

            for i in 0..nb_replications {
                print!("Run {}/{nb_replications} ... ", i + 1);
                let mut simulator = Simulator::from_config_path(Path::new(
                    format!("test_config/{}.yaml", stringify!($config)).as_str(),
                ))
                .map_err(|e| {
                    println!("Error while loading config: {}", e.detailed_error());
                    e
                })
                .unwrap();

                simulator.run();

                results.push(simulator.records().clone());
                println!("OK");
            }

            let reference_result = &results[0];
            assert!(!reference_result.is_empty());
            for result in results.iter().skip(1) {
                assert_eq!(result.len(), reference_result.len());
                for (j, ref_result) in reference_result.iter().enumerate() {
                    let result_as_str = format!("{:?}", result[j]);
                    let reference_result_as_str = format!("{:?}", ref_result);
                    assert_eq!(
                        result_as_str, reference_result_as_str,
                        "{result_as_str} != {reference_result_as_str}"
                    );
                }
            }
        }
    };
}

replication_test!(config);
replication_test!(autoregressive);

#[test]
fn reset_replays_the_same_run() {
    let mut simulator = Simulator::from_config_path(Path::new("test_config/config.yaml")).unwrap();
    simulator.run();
    let first = format!("{:?}", simulator.records());
    let first_drift = simulator.drift();
    simulator.reset();
    assert!(simulator.records().is_empty());
    simulator.run();
    assert_eq!(first, format!("{:?}", simulator.records()));
    assert_eq!(first_drift, simulator.drift());
}

#[test]
fn records_are_saved() {
    let mut simulator = Simulator::from_config_path(Path::new("test_config/config.yaml")).unwrap();
    for _ in 0..5 {
        simulator.step();
    }
    let path = std::env::temp_dir().join("dead_reckoning_records_test.json");
    simulator.save_records(&path).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["records"].as_array().unwrap().len(), 5);
    assert_eq!(saved["config"]["random_seed"], serde_json::json!(42.));
    let _ = std::fs::remove_file(&path);
}
