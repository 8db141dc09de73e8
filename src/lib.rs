pub mod aggregator;
pub mod calendar;
pub mod classifier;
pub mod config;
pub mod report;
pub mod rules;
pub mod validator;

pub use aggregator::{aggregate, Aggregation, GroupedResult};
pub use calendar::{events_between, load_events, month_range};
pub use classifier::{classify, CalendarEvent, ClassifiedLine, RuleMatch};
pub use config::Config;
pub use rules::{load_rules, RawRuleRow, Rule};
pub use validator::missing_keywords;
