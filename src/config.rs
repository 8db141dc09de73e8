use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::rules::{RawRuleRow, Rule};

/// Run configuration, loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Identifier of the source calendar. Carried for parity with the host
    /// setup that exported the events; logged, never interpreted here.
    #[serde(default)]
    pub calendar_id: Option<String>,
    /// Default event export file, overridable on the command line.
    #[serde(default)]
    pub events_file: Option<String>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            calendar_id: None,
            events_file: Some("events.json".to_string()),
            rules: vec![
                Rule::new("遠足", "", "校外学習", true),
                Rule::new("発熱", "欠席", "病欠", false),
                Rule::new("通院", "", "病欠", false),
                Rule::new("参観日", "", "行事", false),
            ],
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{path}'"))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse config file '{path}'"))?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("cannot write config file '{path}'"))?;
        Ok(())
    }
}

/// Parse rule rows from a tab-separated sheet export, one rule per line:
/// keyword, output word, action, required flag. Parsing is as permissive as
/// the sheet itself — short lines are padded with empty fields and an
/// unrecognized required flag reads as false. Blank lines are skipped.
pub fn parse_rule_rows(content: &str) -> Vec<RawRuleRow> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = line.split('\t');
            let keyword = fields.next().unwrap_or("").to_string();
            let output_word = fields.next().unwrap_or("").to_string();
            let action = fields.next().unwrap_or("").to_string();
            let required = matches!(
                fields.next().unwrap_or("").trim(),
                "true" | "TRUE" | "True" | "1"
            );
            (keyword, output_word, action, required)
        })
        .collect()
}

/// Read raw rule rows from a tab-separated export file.
pub fn load_rule_rows(path: &str) -> anyhow::Result<Vec<RawRuleRow>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read rule file '{path}'"))?;
    let rows = parse_rule_rows(&content);
    log::info!("loaded {} rule row(s) from {path}", rows.len());
    Ok(rows)
}
