use launch_e2e_tests::{all_scenarios, TestFramework};

#[test]
fn test_all_scenarios_pass() {
    let framework = TestFramework::new();
    for scenario in all_scenarios() {
        let result = framework.run_scenario(scenario.as_ref());
        assert!(
            result.passed,
            "{} failed: {:?}",
            result.scenario, result.error
        );
        assert!(!result.checks.is_empty());
    }
}

#[test]
fn test_results_serialize_for_reports() {
    let framework = TestFramework::new();
    let results: Vec<_> = all_scenarios()
        .iter()
        .map(|scenario| framework.run_scenario(scenario.as_ref()))
        .collect();
    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[0]["scenario"], "vesting_claim_lifecycle");
}
