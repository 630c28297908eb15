// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! Property tests for the topic pattern grammar.

use crate::topic::matches;
use proptest::prelude::*;

fn levels(range: std::ops::Range<usize>) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z0-9]{1,8}", range)
}

proptest! {
    #[test]
    fn every_topic_matches_itself(topic in levels(1..6)) {
        let topic = topic.join("/");
        prop_assert!(matches(&topic, &topic));
    }

    #[test]
    fn plus_matches_exactly_one_level(
        prefix in levels(0..3),
        level in "[a-z0-9]{1,8}",
        suffix in levels(0..3),
    ) {
        let mut pattern = prefix.clone();
        pattern.push("+".to_string());
        pattern.extend(suffix.clone());

        let mut topic = prefix;
        topic.push(level);
        topic.extend(suffix);

        prop_assert!(matches(&pattern.join("/"), &topic.join("/")));
    }

    #[test]
    fn trailing_hash_matches_any_remainder(
        prefix in levels(1..4),
        rest in levels(0..4),
    ) {
        let pattern = format!("{}/#", prefix.join("/"));
        let mut topic = prefix;
        topic.extend(rest);
        prop_assert!(matches(&pattern, &topic.join("/")));
    }

    #[test]
    fn longer_topics_never_match_without_hash(
        pattern in levels(1..5),
        extra in "[a-z0-9]{1,8}",
    ) {
        let topic = format!("{}/{}", pattern.join("/"), extra);
        prop_assert!(!matches(&pattern.join("/"), &topic));
    }
}
