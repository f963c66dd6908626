// Small dev utility: print a TK report to stdout.
//
// Usage:
//   cargo run --bin tk-report -- change    [--toolkit NAME] [--component NAME] [--status STATE] [--active]
//   cargo run --bin tk-report -- component [--toolkit NAME] [--component NAME] [--status STATE] [--default]
//   cargo run --bin tk-report -- stats --sql QUERY --headers A,B,C,D --widths 10,10,10,25 [--csv PATH]
//
// Common options:
//   --config PATH   JSON config file (TK_DB_PATH / TK_ACTOR / TK_LOG still override it)
//   --db PATH       database path, overrides everything else

use anyhow::{anyhow, bail, Context};
use std::collections::HashMap;
use std::path::Path;
use tk_dao::repository::{ChangeRequestStatusRepository, ComponentRepository, ToolKitRepository};
use tk_dao::{logging, BuildStatsReport, ChangeRequestReport, ReportFilter, ReportKind, TkConfig, TkContext};

const FLAGS: [&str; 2] = ["--active", "--default"];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let command = args
        .next()
        .ok_or_else(|| anyhow!("missing command: change | component | stats"))?;
    let options = parse_options(args)?;

    let mut config = match options.get("--config") {
        Some(path) => TkConfig::from_file(Path::new(path))
            .with_context(|| format!("failed to read config {}", path))?
            .with_env_overrides(),
        None => TkConfig::from_env(),
    };
    if let Some(db) = options.get("--db") {
        config.db_path = db.clone();
    }

    logging::init(&config.log_filter);
    tracing::info!("{} tk-report {} ({})", tk_dao::APP_NAME, tk_dao::VERSION, command);

    let ctx = TkContext::open(&config)?;

    match command.as_str() {
        "change" => print_change_report(&ctx, ReportKind::ChangeRequest, &options),
        "component" => print_change_report(&ctx, ReportKind::ComponentStatus, &options),
        "stats" => print_build_stats(&ctx, &options),
        other => bail!("unknown command: {}", other),
    }
}

fn parse_options(args: impl Iterator<Item = String>) -> anyhow::Result<HashMap<String, String>> {
    let mut options = HashMap::new();
    let mut args = args.peekable();
    while let Some(key) = args.next() {
        if !key.starts_with("--") {
            bail!("unexpected argument: {}", key);
        }
        if FLAGS.contains(&key.as_str()) {
            options.insert(key, "true".to_string());
            continue;
        }
        let value = args
            .next()
            .ok_or_else(|| anyhow!("missing value for {}", key))?;
        options.insert(key, value);
    }
    Ok(options)
}

fn print_change_report(
    ctx: &std::sync::Arc<TkContext>,
    kind: ReportKind,
    options: &HashMap<String, String>,
) -> anyhow::Result<()> {
    let mut filter = ReportFilter {
        active_only: options.contains_key("--active") || options.contains_key("--default"),
        ..ReportFilter::default()
    };
    if let Some(name) = options.get("--toolkit") {
        filter.toolkit = Some(ToolKitRepository::new(ctx.clone()).get_by_name(name)?);
    }
    if let Some(name) = options.get("--component") {
        filter.component = Some(ComponentRepository::new(ctx.clone()).get_by_name(name)?);
    }
    if let Some(state) = options.get("--status") {
        filter.status = Some(ChangeRequestStatusRepository::new(ctx.clone()).get_by_name(state)?);
    }

    let report = ChangeRequestReport::new(ctx.clone(), kind);
    println!("{}", kind.title());
    for line in report.header() {
        println!("{}", line);
    }
    for line in report.lines(&filter)? {
        println!("{}", line);
    }
    Ok(())
}

fn print_build_stats(
    ctx: &std::sync::Arc<TkContext>,
    options: &HashMap<String, String>,
) -> anyhow::Result<()> {
    let sql = options.get("--sql").ok_or_else(|| anyhow!("--sql is required"))?;
    let headers: Vec<String> = options
        .get("--headers")
        .ok_or_else(|| anyhow!("--headers is required"))?
        .split(',')
        .map(|s| s.trim().to_string())
        .collect();
    let widths = options
        .get("--widths")
        .ok_or_else(|| anyhow!("--widths is required"))?
        .split(',')
        .map(|s| s.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .context("--widths must be comma separated integers")?;

    let report = BuildStatsReport::new(sql.clone(), headers, widths)?;
    let output = report.run(ctx)?;

    for line in report.header() {
        println!("{}", line);
    }
    for line in &output.lines {
        println!("{}", line);
    }

    if let Some(path) = options.get("--csv") {
        let file = std::fs::File::create(path).with_context(|| format!("cannot create {}", path))?;
        report.write_csv(&output, file)?;
        println!("csv={}", path);
    }
    Ok(())
}
