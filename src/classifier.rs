use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::rules::Rule;

/// Fixed suffix appended to the matched word when building the line text,
/// e.g. "遠足" becomes "遠足のため".
pub const REASON_SUFFIX: &str = "のため";

/// A calendar event as supplied by the host for the selected date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    #[serde(rename = "start")]
    pub start_time: NaiveDateTime,
}

impl CalendarEvent {
    pub fn new(title: &str, start_time: NaiveDateTime) -> Self {
        CalendarEvent {
            title: title.to_string(),
            start_time,
        }
    }
}

/// One event paired with the rule that matched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    pub description: String,
    pub timestamp: NaiveDateTime,
    pub action: String,
}

/// Result of classifying a single event. The matched keyword is carried
/// separately from the line because the line text uses the rule's output
/// word, which may differ from the keyword the validator needs to track.
#[derive(Debug, Clone)]
pub struct RuleMatch {
    pub line: ClassifiedLine,
    pub keyword: String,
}

/// Find the first rule matching the event title and build its line.
///
/// Rules are scanned in table order; the first rule whose non-empty keyword
/// is a substring of the title wins and no further rules are consulted. The
/// match is case-sensitive plain containment, so a keyword that is a
/// substring of a later rule's keyword shadows it — table order is policy.
/// Returns None when no rule matches; such events are excluded from the
/// grouped report.
pub fn classify(event: &CalendarEvent, rules: &[Rule]) -> Option<RuleMatch> {
    for rule in rules {
        if rule.is_inert() {
            continue;
        }
        if event.title.contains(&rule.keyword) {
            log::debug!(
                "event '{}' matched keyword '{}' -> action '{}'",
                event.title,
                rule.keyword,
                rule.action
            );
            return Some(RuleMatch {
                line: ClassifiedLine {
                    description: format!("{}{}", rule.word_to_use(), REASON_SUFFIX),
                    timestamp: event.start_time,
                    action: rule.action.clone(),
                },
                keyword: rule.keyword.clone(),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::load_rules;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Duplicate keyword with different output words: only the first rule
        // may ever be consulted.
        let rules = load_rules(&[
            ("発熱".to_string(), "欠席".to_string(), "病欠".to_string(), false),
            ("発熱".to_string(), String::new(), "病欠".to_string(), false),
        ]);
        let event = CalendarEvent::new("発熱のため早退", at(2025, 10, 3, 9, 0));

        let m = classify(&event, &rules).unwrap();
        assert_eq!(m.line.description, "欠席のため");
        assert_eq!(m.line.action, "病欠");
        assert_eq!(m.keyword, "発熱");
    }

    #[test]
    fn test_rule_order_changes_outcome() {
        let event = CalendarEvent::new("遠足 2年生", at(2025, 10, 26, 9, 0));
        let forward = load_rules(&[
            ("遠足".to_string(), String::new(), "校外学習".to_string(), false),
            ("2年生".to_string(), String::new(), "学年行事".to_string(), false),
        ]);
        let reversed: Vec<_> = forward.iter().rev().cloned().collect();

        assert_eq!(classify(&event, &forward).unwrap().line.action, "校外学習");
        assert_eq!(classify(&event, &reversed).unwrap().line.action, "学年行事");
    }

    #[test]
    fn test_no_match_returns_none() {
        let rules = load_rules(&[(
            "遠足".to_string(),
            String::new(),
            "校外学習".to_string(),
            true,
        )]);
        let event = CalendarEvent::new("運動会", at(2025, 10, 12, 8, 30));
        assert!(classify(&event, &rules).is_none());
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        // An inert rule must not match every title by virtue of "" being a
        // substring of everything.
        let rules = load_rules(&[
            (String::new(), "x".to_string(), "y".to_string(), true),
            ("遠足".to_string(), String::new(), "校外学習".to_string(), false),
        ]);
        let event = CalendarEvent::new("遠足 2年生", at(2025, 10, 26, 9, 0));

        let m = classify(&event, &rules).unwrap();
        assert_eq!(m.line.action, "校外学習");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let rules = load_rules(&[(
            "PTA".to_string(),
            String::new(),
            "保護者会".to_string(),
            false,
        )]);
        let lower = CalendarEvent::new("pta 総会", at(2025, 10, 5, 10, 0));
        let upper = CalendarEvent::new("PTA 総会", at(2025, 10, 5, 10, 0));

        assert!(classify(&lower, &rules).is_none());
        assert!(classify(&upper, &rules).is_some());
    }

    #[test]
    fn test_line_uses_output_word_with_suffix() {
        let rules = load_rules(&[(
            "遠足".to_string(),
            String::new(),
            "校外学習".to_string(),
            true,
        )]);
        let event = CalendarEvent::new("遠足 2年生", at(2025, 10, 26, 9, 0));

        let m = classify(&event, &rules).unwrap();
        assert_eq!(m.line.description, "遠足のため");
        assert_eq!(m.line.timestamp, at(2025, 10, 26, 9, 0));
    }
}
