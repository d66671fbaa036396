use chart_overlays::core::{ConfigOverride, Margin};
use chart_overlays::widgets::binning::{BinningConfig, BinningConfigPatch};
use proptest::prelude::*;

fn patch_strategy() -> impl Strategy<Value = BinningConfigPatch> {
    (
        proptest::option::of((-500.0f64..500.0, -500.0f64..500.0, -500.0f64..500.0, -500.0f64..500.0)),
        proptest::option::of(1.0f64..4096.0),
        proptest::option::of(1.0f64..4096.0),
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of("[A-Z]{1,8}:"),
    )
        .prop_map(|(margin, width, height, auto_label, label)| BinningConfigPatch {
            margin: margin.map(|(top, right, bottom, left)| Margin::new(top, right, bottom, left)),
            width,
            height,
            auto_label,
            exclusive_toggle: None,
            label,
        })
}

proptest! {
    #[test]
    fn effective_config_equals_last_override_per_key(
        first in patch_strategy(),
        second in patch_strategy()
    ) {
        let config = BinningConfig::default()
            .override_with(first.clone())
            .override_with(second.clone());

        let defaults = BinningConfig::default();
        let expected_margin = second.margin.or(first.margin).unwrap_or(defaults.margin);
        let expected_width = second.width.or(first.width).unwrap_or(defaults.width);
        let expected_height = second.height.or(first.height).unwrap_or(defaults.height);
        let expected_auto = second
            .auto_label
            .or(first.auto_label)
            .unwrap_or(defaults.auto_label);
        let expected_label = second.label.or(first.label).unwrap_or(defaults.label);

        prop_assert_eq!(config.margin, expected_margin);
        prop_assert_eq!(config.width, expected_width);
        prop_assert_eq!(config.height, expected_height);
        prop_assert_eq!(config.auto_label, expected_auto);
        prop_assert_eq!(config.label, expected_label);
        prop_assert_eq!(config.exclusive_toggle, defaults.exclusive_toggle);
    }

    #[test]
    fn empty_override_is_an_identity(patch in patch_strategy()) {
        let configured = BinningConfig::default().override_with(patch);
        let after_empty = configured.clone().override_with(BinningConfigPatch::default());

        prop_assert_eq!(after_empty, configured);
    }
}
