use lymphatica::prelude::*;

#[test]
fn default_config() {
    let config = SimulationConfig::default();
    assert_eq!(config.policy, EntrapmentPolicy::LinearBySize);
    assert_eq!(config.size_validation, SizeValidation::Strict);
}

#[test]
fn deserialize_config() {
    let config: SimulationConfig =
        serde_json::from_str(r#"{"policy":"constant","size_validation":"permissive"}"#).unwrap();
    assert_eq!(
        config,
        SimulationConfig::new(EntrapmentPolicy::Constant, SizeValidation::Permissive)
    );

    let partial: SimulationConfig = serde_json::from_str(r#"{"policy":"constant"}"#).unwrap();
    assert_eq!(partial.size_validation, SizeValidation::Strict);

    assert!(serde_json::from_str::<SimulationConfig>(r#"{"policy":"random"}"#).is_err());
}

#[test]
fn serialize_results() {
    let nodes = vec![
        LymphNode::new(NodeSize::from(1.)),
        LymphNode::new(NodeSize::from(0.5)),
    ];
    let cells = vec![CancerCell::new(Phenotype::new("invasive"))];
    let results = Simulation::from_policy(EntrapmentPolicy::Constant)
        .run(&nodes, &cells)
        .unwrap();
    assert_eq!(
        serde_json::to_string(results.records()).unwrap(),
        r#"[{"node_size":1.0,"probability":0.5},{"node_size":0.5,"probability":0.5}]"#
    );
    let round_tripped: MetastasisResults =
        serde_json::from_value(serde_json::to_value(&results).unwrap()).unwrap();
    assert_eq!(round_tripped, results);
}

#[test]
fn serialize_entities() {
    let node = LymphNode::new(NodeSize::from(2.));
    let cell = CancerCell::new(Phenotype::new("invasive"));
    assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"size":2.0}"#);
    assert_eq!(
        serde_json::to_string(&cell).unwrap(),
        r#"{"phenotype":"invasive"}"#
    );
}

#[test]
fn permissive_config_keeps_out_of_range_values() {
    let simulation = Simulation::new(SimulationConfig::new(
        EntrapmentPolicy::LinearBySize,
        SizeValidation::Permissive,
    ));
    let nodes = vec![LymphNode::new(NodeSize::from(-10.))];
    let cells = vec![CancerCell::new(Phenotype::new(""))];
    let results = simulation.run(&nodes, &cells).unwrap();
    assert!(!results.records()[0].probability().is_in_bound());

    let strict = Simulation::from_policy(EntrapmentPolicy::LinearBySize);
    assert!(strict.run(&nodes, &cells).is_err());
}
