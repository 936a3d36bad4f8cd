#[cfg(test)]
mod tests {
    use super::super::allocation::AllocationRequest;
    use super::super::scenario::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_scenario_creation() {
        let mut scenario = Scenario::new("test_scenario".to_string());
        scenario.description = "A test scenario".to_string();
        scenario.push(Action::Allocate(AllocationRequest::new(100, 10, 10, 10, 10)));
        scenario.push(Action::EndTurn { count: 2 });
        scenario.push(Action::EndTurn { count: 3 });

        assert_eq!(scenario.script.len(), 3);
        assert_eq!(scenario.turns(), 5);
        assert_eq!(scenario.name, "test_scenario");
    }

    #[test]
    fn test_parameter_validation() {
        assert!(SimulationParameters::default().validate().is_ok());

        let inverted = SimulationParameters {
            feed_price_min: dec!(12),
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ScenarioError::InvalidParameters(_))
        ));

        let outside = SimulationParameters {
            initial_feed_price: dec!(11),
            ..Default::default()
        };
        assert!(outside.validate().is_err());

        let bad_factor = SimulationParameters {
            shortage_growth_factor: dec!(1.5),
            ..Default::default()
        };
        assert!(bad_factor.validate().is_err());
    }

    #[test]
    fn test_unknown_manager_fails_validation() {
        let mut scenario = Scenario::new("bad".to_string());
        scenario.push(Action::SelectManager {
            key: "nobody".to_string(),
        });
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::UnknownManager(key)) if key == "nobody"
        ));
    }

    #[test]
    fn test_oversized_farm_fails_validation() {
        let mut scenario = Scenario::new("huge".to_string());
        scenario.push(Action::Allocate(AllocationRequest::new(
            4_000_000_000,
            0,
            0,
            0,
            0,
        )));
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::InvalidParameters(_))
        ));

        let params = SimulationParameters {
            default_total_area: MAX_TOTAL_AREA + 1,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_turn_count_is_bounded() {
        let mut scenario = Scenario::new("endless".to_string());
        scenario.push(Action::EndTurn { count: u32::MAX });
        scenario.push(Action::EndTurn { count: u32::MAX });
        assert_eq!(scenario.turns(), 2 * u64::from(u32::MAX));
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::InvalidParameters(_))
        ));

        let mut capped = Scenario::new("long".to_string());
        capped.push(Action::EndTurn {
            count: MAX_SCRIPTED_TURNS as u32,
        });
        assert!(capped.validate().is_ok());
    }

    #[test]
    fn test_standard_scenarios_are_valid() {
        let scenarios = create_standard_scenarios();
        for key in ["basic", "crops", "shortage", "piggery"] {
            let scenario = scenarios.get(key).unwrap();
            assert!(scenario.validate().is_ok(), "{} invalid", key);
            assert!(scenario.turns() > 0);
        }
    }

    #[test]
    fn test_scenario_json_round_trip() {
        let scenario = create_standard_scenarios().get("basic").unwrap().clone();

        let json = serde_json::to_string_pretty(&scenario).unwrap();
        assert!(json.contains("\"type\": \"Allocate\""));
        let deserialized: Scenario = serde_json::from_str(&json).unwrap();

        assert_eq!(scenario, deserialized);
    }

    #[test]
    fn test_scenario_from_yaml_with_defaults() {
        let yaml = r#"
name: yaml_farm
parameters:
  initial_funds: 2500
script:
  - type: Allocate
    total: 50
    corn: 20
  - type: BuyFeed
    amount_kg: 40
  - type: EndTurn
  - type: Reset
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("farm.yaml");
        std::fs::write(&path, yaml).unwrap();

        let scenario = Scenario::load_from_file(&path).unwrap();
        assert_eq!(scenario.parameters.initial_funds, dec!(2500));
        assert_eq!(scenario.parameters.feed_per_pig_per_week, dec!(7));
        assert_eq!(
            scenario.script[0],
            Action::Allocate(AllocationRequest::new(50, 20, 0, 0, 0))
        );
        assert_eq!(scenario.script[1], Action::BuyFeed { amount_kg: dec!(40) });
        assert_eq!(scenario.script[2], Action::EndTurn { count: 1 });
        assert_eq!(scenario.script[3], Action::Reset);
        assert_eq!(scenario.random_seed, None);
    }

    #[test]
    fn test_save_and_load_file() {
        let scenario = create_standard_scenarios().get("piggery").unwrap().clone();
        let dir = tempfile::tempdir().unwrap();

        for name in ["piggery.json", "piggery.yml"] {
            let path = dir.path().join(name);
            scenario.save_to_file(&path).unwrap();
            let loaded = Scenario::load_from_file(&path).unwrap();
            assert_eq!(loaded.script, scenario.script);
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Scenario::load_from_file(std::path::Path::new("/nonexistent/farm.json")).unwrap_err();
        assert!(matches!(err, ScenarioError::Io(_)));
    }

    #[test]
    fn test_scenario_display() {
        let scenarios = create_standard_scenarios();
        let display = format!("{}", scenarios.get("shortage").unwrap());

        assert!(display.contains("Scenario: feed_shortage"));
        assert!(display.contains("hire manager VM2"));
        assert!(display.contains("Script (3 turns):"));
    }
}
