#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    use serde_json::json;

    use crate::{
        api::types::{Key, CONTROL},
        flags::{
            feature_flag_list::FeatureFlagList,
            flag_match_reason::FeatureFlagMatchReason,
            flag_matchers::Matcher,
            flag_matching::{evaluate, FeatureFlagMatcher},
            flag_models::{ParsedCondition, ParsedSplit, ParsedSplitConfig},
            flags_cache::FlagStore,
            test_helpers::{
                create_promo_split, create_test_split, create_test_split_config, partitions,
                treatment_set_matcher,
            },
        },
    };

    fn seen(treatment: &str) -> HashMap<String, serde_json::Value> {
        HashMap::from([("treatments_seen".to_string(), json!(treatment))])
    }

    #[test]
    fn test_promo_matching_condition_wins() {
        let promo = create_promo_split(false);

        assert_eq!(evaluate("alice", None, Some(&promo), &seen("vip")), "gold");
        assert_eq!(evaluate("bob", None, Some(&promo), &seen("regular")), "bronze");
        assert_eq!(evaluate("carol", None, Some(&promo), &HashMap::new()), "bronze");

        let key = Key::new("alice");
        let attributes = seen("regular");
        let result = FeatureFlagMatcher::new(&key, &attributes).get_match(Some(&promo));
        assert_eq!(result.reason, FeatureFlagMatchReason::NoConditionMatch);
        assert_eq!(result.condition_index, None);
    }

    #[test]
    fn test_promo_kill_switch_forces_default() {
        let promo = create_promo_split(true);

        for (key, attributes) in [
            ("alice", seen("vip")),
            ("bob", seen("regular")),
            ("carol", HashMap::new()),
        ] {
            assert_eq!(evaluate(key, None, Some(&promo), &attributes), "bronze");
        }

        let key = Key::new("alice");
        let attributes = seen("vip");
        let result = FeatureFlagMatcher::new(&key, &attributes).get_match(Some(&promo));
        assert_eq!(result.reason, FeatureFlagMatchReason::Killed);
    }

    #[test]
    fn test_missing_flag_in_snapshot_returns_control() {
        let snapshot = FeatureFlagList::new(vec![create_promo_split(false)]);
        assert_eq!(
            evaluate("alice", None, snapshot.get("not-promo"), &seen("vip")),
            CONTROL
        );
    }

    #[test]
    fn test_first_matching_condition_wins() {
        let flag = create_test_split(
            "ordered",
            vec![
                ParsedCondition::with_partitions(
                    treatment_set_matcher("allowlist", &["alice"]),
                    partitions(&[("first", 100)]),
                ),
                ParsedCondition::with_partitions(
                    treatment_set_matcher("allowlist", &["alice", "bob"]),
                    partitions(&[("second", 100)]),
                ),
                ParsedCondition::with_partitions(Matcher::all_keys(), partitions(&[("rest", 100)])),
            ],
        );
        let attributes = HashMap::new();

        assert_eq!(evaluate("alice", None, Some(&flag), &attributes), "first");
        assert_eq!(evaluate("bob", None, Some(&flag), &attributes), "second");
        assert_eq!(evaluate("carol", None, Some(&flag), &attributes), "rest");
    }

    #[test]
    fn test_matchers_see_matching_key_not_bucketing_key() {
        let flag = create_test_split(
            "allowlisted",
            vec![ParsedCondition::with_partitions(
                treatment_set_matcher("allowlist", &["alice"]),
                partitions(&[("on", 100)]),
            )],
        );
        let attributes = HashMap::new();

        assert_eq!(evaluate("alice", Some("bob"), Some(&flag), &attributes), "on");
        assert_eq!(evaluate("bob", Some("alice"), Some(&flag), &attributes), "off");
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let flag = create_test_split(
            "rollout",
            vec![ParsedCondition::with_partitions(
                Matcher::all_keys(),
                partitions(&[("a", 33), ("b", 33), ("c", 34)]),
            )],
        );
        let rebuilt = ParsedSplit::new(ParsedSplitConfig::from(&flag)).unwrap();
        let attributes = HashMap::new();

        for i in 0..2_000 {
            let key = format!("user_{i}");
            let first = evaluate(&key, None, Some(&flag), &attributes);
            assert_eq!(evaluate(&key, None, Some(&flag), &attributes), first);
            assert_eq!(evaluate(&key, None, Some(&rebuilt), &attributes), first);
        }
    }

    #[test]
    fn test_rollout_split_is_roughly_proportional() {
        let flag = create_test_split(
            "rollout",
            vec![ParsedCondition::with_partitions(
                Matcher::all_keys(),
                partitions(&[("on", 25), ("off", 75)]),
            )],
        );
        let attributes = HashMap::new();

        let total = 20_000;
        let on = (0..total)
            .filter(|i| evaluate(&format!("user_{i}"), None, Some(&flag), &attributes) == "on")
            .count();
        let share = on as f64 / total as f64;
        assert!((0.22..0.28).contains(&share), "on share was {share}");
    }

    #[test]
    fn test_same_key_buckets_independently_per_seed() {
        let attributes = HashMap::new();
        let flag_with_seed = |seed: i32| {
            ParsedSplit::new(ParsedSplitConfig {
                seed: Some(seed),
                conditions: Some(vec![ParsedCondition::with_partitions(
                    Matcher::all_keys(),
                    partitions(&[("on", 50), ("off", 50)]),
                )]),
                ..create_test_split_config("seeded")
            })
            .unwrap()
        };
        let a = flag_with_seed(1);
        let b = flag_with_seed(2);

        let disagreements = (0..2_000)
            .filter(|i| {
                let key = format!("user_{i}");
                evaluate(&key, None, Some(&a), &attributes)
                    != evaluate(&key, None, Some(&b), &attributes)
            })
            .count();
        // Independent 50/50 splits disagree about half the time.
        assert!((800..1_200).contains(&disagreements), "{disagreements}");
    }

    #[test]
    fn test_concurrent_evaluation_during_snapshot_swaps() {
        let store = Arc::new(FlagStore::new(FeatureFlagList::new(vec![
            create_promo_split(false),
        ])));

        let writer = {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    store.replace(FeatureFlagList::new(vec![create_promo_split(i % 2 == 0)]));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    let attributes = seen("vip");
                    for _ in 0..2_000 {
                        let snapshot = store.load();
                        let treatment =
                            evaluate("alice", None, snapshot.get("promo"), &attributes);
                        // Killed gives bronze, live gives gold; never anything else.
                        assert!(treatment == "gold" || treatment == "bronze");
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
