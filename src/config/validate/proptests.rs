//! Property-based tests for configuration validation

use super::validator::ConfigValidator;
use crate::config::PipelineConfig;
use proptest::prelude::*;

fn arb_valid_config() -> impl Strategy<Value = PipelineConfig> {
    (
        1u32..=30,                          // split_day
        0.01f64..0.99,                      // test_ratio
        1usize..500,                        // n_trees
        proptest::option::of(1usize..64),   // max_depth
        0.01f64..=1.0,                      // drift_share
    )
        .prop_map(|(split_day, test_ratio, n_trees, max_depth, drift_share)| {
            let mut config = PipelineConfig::default();
            config.split.split_day = split_day;
            config.split.test_ratio = test_ratio;
            config.forest.n_trees = n_trees;
            config.forest.max_depth = max_depth;
            config.drift.drift_share = drift_share;
            config
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn prop_split_day_past_30_fails(config in arb_valid_config(), day in 31u32..1000) {
        let mut config = config;
        config.split.split_day = day;
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn prop_ratio_outside_unit_interval_fails(config in arb_valid_config(), ratio in 1.0f64..10.0) {
        let mut config = config;
        config.split.test_ratio = ratio;
        prop_assert!(ConfigValidator::validate(&config).is_err());
        config.split.test_ratio = -ratio;
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn prop_valid_config_survives_yaml(config in arb_valid_config()) {
        let yaml = config.to_yaml().unwrap();
        let parsed = PipelineConfig::from_yaml(&yaml, std::path::Path::new("p.yaml")).unwrap();
        prop_assert!(ConfigValidator::validate(&parsed).is_ok());
        prop_assert_eq!(parsed.forest, config.forest);
    }
}
