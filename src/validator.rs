use std::collections::HashSet;

use crate::rules::Rule;

/// Compute the required keywords that no event satisfied during the run.
///
/// The required set is taken from every rule flagged `required`, in table
/// order, duplicates collapsed. An empty required keyword can never be
/// matched and is therefore always reported missing; that is the configured
/// behavior, not an error. `matched` is the keyword side channel from the
/// classification pass, not something reconstructed from the grouped result,
/// because a rule's action and output word may both differ from its keyword.
pub fn missing_keywords(rules: &[Rule], matched: &HashSet<String>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut missing = Vec::new();

    for rule in rules {
        if !rule.required {
            continue;
        }
        if !seen.insert(rule.keyword.as_str()) {
            continue;
        }
        if !matched.contains(&rule.keyword) {
            missing.push(rule.keyword.clone());
        }
    }

    if !missing.is_empty() {
        log::warn!("{} required keyword(s) had no matching event", missing.len());
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::load_rules;

    fn matched(keywords: &[&str]) -> HashSet<String> {
        keywords.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_all_required_matched_gives_empty_missing() {
        let rules = load_rules(&[
            ("遠足".to_string(), String::new(), "校外学習".to_string(), true),
            ("発熱".to_string(), String::new(), "病欠".to_string(), false),
        ]);
        assert!(missing_keywords(&rules, &matched(&["遠足"])).is_empty());
    }

    #[test]
    fn test_unmatched_required_keyword_is_reported() {
        let rules = load_rules(&[(
            "遠足".to_string(),
            String::new(),
            "校外学習".to_string(),
            true,
        )]);
        assert_eq!(missing_keywords(&rules, &matched(&[])), vec!["遠足"]);
    }

    #[test]
    fn test_non_required_rules_are_ignored() {
        let rules = load_rules(&[(
            "発熱".to_string(),
            String::new(),
            "病欠".to_string(),
            false,
        )]);
        assert!(missing_keywords(&rules, &matched(&[])).is_empty());
    }

    #[test]
    fn test_missing_preserves_rule_table_order() {
        let rules = load_rules(&[
            ("参観日".to_string(), String::new(), "行事".to_string(), true),
            ("遠足".to_string(), String::new(), "校外学習".to_string(), true),
            ("面談".to_string(), String::new(), "面談".to_string(), true),
        ]);
        assert_eq!(
            missing_keywords(&rules, &matched(&["遠足"])),
            vec!["参観日", "面談"]
        );
    }

    #[test]
    fn test_duplicate_required_keywords_collapse() {
        let rules = load_rules(&[
            ("遠足".to_string(), String::new(), "校外学習".to_string(), true),
            ("遠足".to_string(), "徒歩遠足".to_string(), "行事".to_string(), true),
        ]);
        assert_eq!(missing_keywords(&rules, &matched(&[])), vec!["遠足"]);
    }

    #[test]
    fn test_empty_required_keyword_is_always_missing() {
        let rules = load_rules(&[(String::new(), "x".to_string(), "y".to_string(), true)]);
        // Nothing can ever satisfy an empty keyword, so it is reported even
        // when every event matched something.
        assert_eq!(missing_keywords(&rules, &matched(&["遠足"])), vec![""]);
    }

    #[test]
    fn test_required_is_independent_of_output_word_and_action() {
        let rules = load_rules(&[(
            "発熱".to_string(),
            "欠席".to_string(),
            "病欠".to_string(),
            true,
        )]);
        // The keyword was matched even though neither "欠席" nor "病欠" was.
        assert!(missing_keywords(&rules, &matched(&["発熱"])).is_empty());
    }
}
