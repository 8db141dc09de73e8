use std::collections::{HashMap, HashSet};

use crate::classifier::{classify, CalendarEvent, ClassifiedLine};
use crate::rules::Rule;

/// Classified lines grouped by action.
///
/// Group order is the order in which each action was first produced while
/// walking the event stream, not rule-table order and not sorted order.
/// Backed by a sequence of (action, lines) pairs plus a position index, so
/// iteration order is insertion order.
#[derive(Debug, Default)]
pub struct GroupedResult {
    groups: Vec<(String, Vec<ClassifiedLine>)>,
    index: HashMap<String, usize>,
}

impl GroupedResult {
    pub fn new() -> Self {
        GroupedResult::default()
    }

    pub fn push(&mut self, line: ClassifiedLine) {
        match self.index.get(&line.action) {
            Some(&pos) => self.groups[pos].1.push(line),
            None => {
                self.index.insert(line.action.clone(), self.groups.len());
                let action = line.action.clone();
                self.groups.push((action, vec![line]));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn lines(&self, action: &str) -> Option<&[ClassifiedLine]> {
        self.index
            .get(action)
            .map(|&pos| self.groups[pos].1.as_slice())
    }

    /// Groups in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ClassifiedLine])> {
        self.groups
            .iter()
            .map(|(action, lines)| (action.as_str(), lines.as_slice()))
    }
}

/// Output of a classification pass: the grouped report plus the set of
/// keywords that matched at least once, consumed by the validator.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub grouped: GroupedResult,
    pub matched_keywords: HashSet<String>,
}

/// Classify every event in input order and group the results by action.
///
/// Lines within a group keep the relative order of their source events; a
/// caller that wants chronological groups must hand in events sorted by
/// start time. Events matching no rule are dropped from the grouped result.
pub fn aggregate(events: &[CalendarEvent], rules: &[Rule]) -> Aggregation {
    let mut result = Aggregation::default();

    for event in events {
        match classify(event, rules) {
            Some(m) => {
                result.matched_keywords.insert(m.keyword);
                result.grouped.push(m.line);
            }
            None => {
                log::debug!("event '{}' matched no rule", event.title);
            }
        }
    }

    log::info!(
        "classified {} event(s) into {} group(s)",
        events.len(),
        result.grouped.len()
    );
    result
}
