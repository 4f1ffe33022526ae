use crate::flags::flag_matchers::{Matcher, TreatmentSetMatcher};
use crate::flags::flag_models::{ParsedCondition, ParsedSplit, ParsedSplitConfig, Partition};

pub fn create_test_split_config(name: &str) -> ParsedSplitConfig {
    ParsedSplitConfig {
        name: Some(name.to_string()),
        seed: Some(1234),
        killed: Some(false),
        default_treatment: Some("off".to_string()),
        conditions: Some(vec![ParsedCondition::with_partitions(
            Matcher::all_keys(),
            partitions(&[("on", 100)]),
        )]),
        traffic_type_name: Some("user".to_string()),
        change_number: Some(1),
        algorithm: None,
    }
}

pub fn create_test_split(name: &str, conditions: Vec<ParsedCondition>) -> ParsedSplit {
    ParsedSplit::new(ParsedSplitConfig {
        conditions: Some(conditions),
        ..create_test_split_config(name)
    })
    .expect("test split should be valid")
}

pub fn partitions(split: &[(&str, i32)]) -> Vec<Partition> {
    split
        .iter()
        .map(|(treatment, percentage)| {
            Partition::new(*treatment, *percentage).expect("test partition should be valid")
        })
        .collect()
}

pub fn treatment_set_matcher(label: &str, treatments: &[&str]) -> Matcher {
    Matcher::in_treatment_set(
        TreatmentSetMatcher::new(
            Some(label.to_string()),
            Some(treatments.iter().map(|t| t.to_string()).collect()),
        )
        .expect("test matcher should be valid"),
    )
}

/// The `promo` flag: keys whose `treatments_seen` attribute is `vip` get `gold`,
/// everyone else gets the `bronze` default.
pub fn create_promo_split(killed: bool) -> ParsedSplit {
    ParsedSplit::new(ParsedSplitConfig {
        killed: Some(killed),
        default_treatment: Some("bronze".to_string()),
        conditions: Some(vec![ParsedCondition::with_partitions(
            treatment_set_matcher("membership", &["vip"]).on_attribute("treatments_seen"),
            partitions(&[("gold", 100)]),
        )]),
        ..create_test_split_config("promo")
    })
    .expect("promo split should be valid")
}
