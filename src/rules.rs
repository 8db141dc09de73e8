use serde::{Deserialize, Serialize};

/// Raw rule row as read from the host storage:
/// (keyword, output word, action, required flag).
pub type RawRuleRow = (String, String, String, bool);

/// A single classification rule. Rules are evaluated in table order and the
/// first match wins, so the position of a rule in the table is significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub keyword: String,
    /// Word used in the generated line instead of the keyword. Empty or
    /// absent means the keyword itself is used.
    #[serde(default)]
    pub output_word: Option<String>,
    pub action: String,
    /// When true, at least one event must match this keyword during a run,
    /// otherwise the keyword is reported as missing.
    #[serde(default)]
    pub required: bool,
}

impl Rule {
    pub fn new(keyword: &str, output_word: &str, action: &str, required: bool) -> Self {
        Rule {
            keyword: keyword.to_string(),
            output_word: if output_word.is_empty() {
                None
            } else {
                Some(output_word.to_string())
            },
            action: action.to_string(),
            required,
        }
    }

    /// A rule with an empty keyword can never match anything.
    pub fn is_inert(&self) -> bool {
        self.keyword.is_empty()
    }

    /// The word that appears in the generated line: the output word if one is
    /// set and non-empty, the keyword otherwise.
    pub fn word_to_use(&self) -> &str {
        match &self.output_word {
            Some(word) if !word.is_empty() => word,
            _ => &self.keyword,
        }
    }
}

/// Build the rule table from raw storage rows.
///
/// Loading is deliberately permissive: every row is accepted as-is, and a row
/// missing its keyword or action simply produces a rule that never matches.
/// Malformed configuration must not abort a run.
pub fn load_rules(rows: &[RawRuleRow]) -> Vec<Rule> {
    let rules: Vec<Rule> = rows
        .iter()
        .map(|(keyword, output_word, action, required)| {
            Rule::new(keyword, output_word, action, *required)
        })
        .collect();

    let inert = rules.iter().filter(|r| r.is_inert()).count();
    if inert > 0 {
        log::debug!("rule table has {inert} inert rule(s) with an empty keyword");
    }

    rules
}
