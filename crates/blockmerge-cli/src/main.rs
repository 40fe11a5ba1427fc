use anyhow::Context;
use blockmerge_cli::{render_rules, render_summary, run_merge, CliConfig, LogFormat, MergeOptions, SummaryFormat};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

fn cli() -> Command {
    let config_arg = Arg::new("config")
        .long("config")
        .value_parser(value_parser!(PathBuf))
        .help("TOML configuration file");
    let rules_arg = Arg::new("rules")
        .long("rules")
        .value_parser(value_parser!(PathBuf))
        .help("Rule table TOML replacing the built-in tables");

    Command::new("blockmerge")
        .version(blockmerge_cli::VERSION)
        .about("Fill block attributes of new catalogs from an older reference catalog")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("info")
                .help("Log filter used when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("text")
                .value_parser(value_parser!(LogFormat))
                .help("Log format: text or json"),
        )
        .subcommand(
            Command::new("merge")
                .about("Reconcile catalogs in place")
                .arg(
                    Arg::new("reference")
                        .long("reference")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Old reference catalog"),
                )
                .arg(
                    Arg::new("catalogs")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf))
                        .help("New catalogs, rewritten in place"),
                )
                .arg(config_arg.clone())
                .arg(rules_arg.clone())
                .arg(
                    Arg::new("lookup-url")
                        .long("lookup-url")
                        .help("HTTP lookup endpoint root"),
                )
                .arg(
                    Arg::new("overrides")
                        .long("overrides")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON table of attribute overrides"),
                )
                .arg(
                    Arg::new("timeout-secs")
                        .long("timeout-secs")
                        .value_parser(value_parser!(u64))
                        .help("Budget for one lookup call"),
                )
                .arg(
                    Arg::new("no-enrichment")
                        .long("no-enrichment")
                        .action(ArgAction::SetTrue)
                        .help("Never consult lookup sources"),
                )
                .arg(
                    Arg::new("summary")
                        .long("summary")
                        .default_value("text")
                        .value_parser(value_parser!(SummaryFormat))
                        .help("Summary format: text or json"),
                ),
        )
        .subcommand(
            Command::new("rules")
                .about("Print the effective rule tables as TOML")
                .arg(config_arg)
                .arg(rules_arg),
        )
}

// Subcommands define different flag sets; absent ids read as unset.
fn arg<'a, T: Clone + Send + Sync + 'static>(args: &'a ArgMatches, id: &str) -> Option<&'a T> {
    args.try_get_one::<T>(id).ok().flatten()
}

/// Configuration file overlaid with command-line flags
async fn effective_config(args: &ArgMatches) -> anyhow::Result<CliConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => CliConfig::load(path).await?,
        None => CliConfig::default(),
    };

    if let Some(file) = arg::<PathBuf>(args, "rules") {
        config.rules.file = Some(file.clone());
    }
    if let Some(url) = arg::<String>(args, "lookup-url") {
        config.lookup.base_url = Some(url.clone());
    }
    if let Some(path) = arg::<PathBuf>(args, "overrides") {
        config.lookup.overrides = Some(path.clone());
    }
    if let Some(secs) = arg::<u64>(args, "timeout-secs") {
        config.lookup.timeout_secs = *secs;
    }
    if arg::<bool>(args, "no-enrichment").copied().unwrap_or(false) {
        config.engine.enrichment = false;
    }
    Ok(config)
}

async fn merge(args: &ArgMatches) -> anyhow::Result<()> {
    let options = MergeOptions {
        reference: args
            .get_one::<PathBuf>("reference")
            .cloned()
            .context("missing --reference")?,
        catalogs: args
            .get_many::<PathBuf>("catalogs")
            .map(|paths| paths.cloned().collect())
            .unwrap_or_default(),
        config: effective_config(args).await?,
    };
    let format = args.get_one::<SummaryFormat>("summary").copied().unwrap_or_default();

    for (catalog, report) in run_merge(&options).await? {
        println!("{}", render_summary(&catalog, &report, format)?);
    }
    Ok(())
}

async fn run(matches: ArgMatches) -> anyhow::Result<()> {
    let level = matches.get_one::<String>("log-level").map_or("info", String::as_str);
    let format = matches.get_one::<LogFormat>("log-format").copied().unwrap_or_default();
    blockmerge_cli::logging::init(level, format)?;

    match matches.subcommand() {
        Some(("merge", args)) => merge(args).await,
        Some(("rules", args)) => {
            let config = effective_config(args).await?;
            print!("{}", render_rules(&config.rules).await?);
            Ok(())
        }
        _ => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    if let Err(error) = run(cli().get_matches()).await {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
