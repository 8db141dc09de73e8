use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use renraku::aggregator::aggregate;
use renraku::calendar::{events_between, load_events, month_range};
use renraku::config::{load_rule_rows, Config};
use renraku::report::{render_json, render_text};
use renraku::rules::load_rules;
use renraku::validator::missing_keywords;
use std::process;

fn main() {
    let matches = Command::new("renraku")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate grouped absence-notice text from calendar events and keyword rules")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("renraku.yaml"),
        )
        .arg(
            Arg::new("events")
                .short('e')
                .long("events")
                .value_name("FILE")
                .help("Calendar event export (JSON array of {title, start})"),
        )
        .arg(
            Arg::new("rules-tsv")
                .long("rules-tsv")
                .value_name("FILE")
                .help("Load rules from a tab-separated sheet export instead of the config file"),
        )
        .arg(
            Arg::new("year")
                .long("year")
                .value_name("YYYY")
                .value_parser(clap::value_parser!(i32))
                .help("Report year (defaults to the current year)"),
        )
        .arg(
            Arg::new("month")
                .long("month")
                .value_name("M")
                .value_parser(clap::value_parser!(u32))
                .help("Report month, 1-12 (defaults to the current month)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the report to a file instead of stdout"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Report format"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Check the configuration and report the rule table summary")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).init();

    if let Some(path) = matches.get_one::<String>("generate-config") {
        match Config::default().to_file(path) {
            Ok(()) => {
                println!("Generated default configuration: {path}");
                return;
            }
            Err(e) => {
                log::error!("failed to generate configuration: {e:#}");
                process::exit(1);
            }
        }
    }

    if let Err(e) = run(&matches) {
        // One human-readable message, no partial report written.
        log::error!("{e:#}");
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config_path = matches
        .get_one::<String>("config")
        .expect("config has a default value");
    let config = Config::from_file(config_path)?;

    let rules = match matches.get_one::<String>("rules-tsv") {
        Some(path) => load_rules(&load_rule_rows(path)?),
        None => config.rules.clone(),
    };

    if matches.get_flag("test-config") {
        let inert = rules.iter().filter(|r| r.is_inert()).count();
        let required = rules.iter().filter(|r| r.required).count();
        println!("Configuration {config_path} is valid");
        println!("  rules: {}", rules.len());
        println!("  required keywords: {required}");
        if inert > 0 {
            println!("  inert rules (empty keyword): {inert}");
        }
        return Ok(());
    }

    if let Some(id) = &config.calendar_id {
        log::info!("events exported from calendar '{id}'");
    }

    let events_path = matches
        .get_one::<String>("events")
        .cloned()
        .or_else(|| config.events_file.clone())
        .ok_or_else(|| anyhow::anyhow!("no events file given (--events or events_file in config)"))?;

    let year = matches.get_one::<i32>("year").copied();
    let month = matches.get_one::<u32>("month").copied();
    let (start, end) = month_range(year, month)?;
    log::info!("report range: {start} .. {end}");

    let events = events_between(load_events(&events_path)?, start, end);

    let agg = aggregate(&events, &rules);
    let missing = missing_keywords(&rules, &agg.matched_keywords);

    let report = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => render_json(&agg.grouped, &events, &missing)?,
        _ => render_text(&agg.grouped, &events, &missing),
    };

    match matches.get_one::<String>("output") {
        Some(path) => {
            use anyhow::Context;
            std::fs::write(path, &report)
                .with_context(|| format!("cannot write report to '{path}'"))?;
            log::info!("report written to {path}");
        }
        None => print!("{report}"),
    }

    Ok(())
}
