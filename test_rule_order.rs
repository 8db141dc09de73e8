use chrono::NaiveDate;
use renraku::aggregator::aggregate;
use renraku::classifier::CalendarEvent;
use renraku::config::Config;
use renraku::validator::missing_keywords;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Testing rule order and keyword shadowing...");

    // Two rules share the keyword 発熱; only the first may ever be used.
    // 遠足 is required but no event this month mentions it.
    let config_yaml = r#"
rules:
  - keyword: 発熱
    output_word: 欠席
    action: 病欠
  - keyword: 発熱
    action: 病欠
  - keyword: 遠足
    action: 校外学習
    required: true
"#;

    let config: Config = serde_yaml::from_str(config_yaml)?;

    let start = NaiveDate::from_ymd_opt(2025, 10, 3)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let events = vec![CalendarEvent::new("発熱のため早退", start)];

    let agg = aggregate(&events, &config.rules);
    let missing = missing_keywords(&config.rules, &agg.matched_keywords);

    let lines = agg.grouped.lines("病欠").expect("病欠 group should exist");
    println!("matched line: {} ({})", lines[0].description, lines[0].timestamp);

    if lines[0].description == "欠席のため" {
        println!("✅ first rule won: output word 欠席 was used");
    } else {
        println!("❌ expected 欠席のため, got {}", lines[0].description);
        std::process::exit(1);
    }

    if missing == vec!["遠足".to_string()] {
        println!("✅ required keyword 遠足 correctly reported missing");
    } else {
        println!("❌ unexpected missing set: {missing:?}");
        std::process::exit(1);
    }

    Ok(())
}
