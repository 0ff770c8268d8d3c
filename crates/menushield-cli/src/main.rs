//! `menushield` command line
//!
//! Runs the dish safety engine, the template translator and the translation
//! backfill over JSON files. Every command prints one JSON document on
//! stdout; logs go to stderr.

mod commands;
mod config;
mod logging;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use config::AppConfig;
use menushield_translate::EntityKind;
use std::path::PathBuf;

const KINDS: [&str; 3] = ["dish", "ingredient", "category"];

fn cli() -> Command {
    Command::new("menushield")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Allergen-aware menu analysis and template translation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("analyze")
                .about("Classify dishes as safe, modifiable or unsafe")
                .arg(
                    Arg::new("dishes")
                        .long("dishes")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of dishes"),
                )
                .arg(
                    Arg::new("avoid")
                        .long("avoid")
                        .required(true)
                        .help("Comma-separated allergen ids to avoid"),
                )
                .arg(
                    Arg::new("ingredients")
                        .long("ingredients")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of catalog ingredients for legacy dishes"),
                ),
        )
        .subcommand(
            Command::new("translate")
                .about("Translate one name with the template engine")
                .arg(Arg::new("text").long("text").required(true).help("Text to translate"))
                .arg(
                    Arg::new("lang")
                        .long("lang")
                        .required(true)
                        .help("Target language code, e.g. fi"),
                )
                .arg(kind_arg().default_value("dish")),
        )
        .subcommand(
            Command::new("backfill")
                .about("Fill missing translations of stored records")
                .arg(input_arg())
                .arg(kind_arg().required(true))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the updated records here"),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Count records per translated language")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("allergens").about("List or search the allergen catalog").arg(
                Arg::new("search")
                    .long("search")
                    .default_value("")
                    .help("Name or id fragment; empty lists the common allergens"),
            ),
        )
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .long("kind")
        .value_parser(KINDS)
        .help("Entity kind")
}

fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON array of records")
}

fn kind(args: &ArgMatches) -> Result<EntityKind> {
    let raw = args
        .get_one::<String>("kind")
        .context("missing --kind")?;
    raw.parse().map_err(anyhow::Error::msg)
}

fn path<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a PathBuf> {
    args.get_one::<PathBuf>(id)
        .with_context(|| format!("missing --{id}"))
}

fn string<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a str> {
    args.get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("missing --{id}"))
}

async fn run(matches: &ArgMatches) -> Result<serde_json::Value> {
    let config = AppConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    match matches.subcommand() {
        Some(("analyze", args)) => commands::analyze(
            path(args, "dishes")?,
            string(args, "avoid")?,
            args.get_one::<PathBuf>("ingredients").map(PathBuf::as_path),
        ),
        Some(("translate", args)) => {
            commands::translate(&config, string(args, "text")?, string(args, "lang")?, kind(args)?)
                .await
        }
        Some(("backfill", args)) => {
            commands::backfill(
                &config,
                path(args, "input")?,
                kind(args)?,
                args.get_one::<PathBuf>("output").map(PathBuf::as_path),
            )
            .await
        }
        Some(("status", args)) => commands::status(&config, path(args, "input")?),
        Some(("allergens", args)) => commands::allergens(string(args, "search")?),
        Some((other, _)) => anyhow::bail!("unknown command {other}"),
        None => anyhow::bail!("no command given"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    logging::init_logging(matches.get_flag("json-logs"));

    let output = run(&matches).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn translate_defaults_to_dish() {
        let matches = cli()
            .try_get_matches_from(["menushield", "translate", "--text", "Soup", "--lang", "fi"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(kind(args).unwrap(), EntityKind::Dish);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let matches = cli()
            .try_get_matches_from([
                "menushield",
                "backfill",
                "--input",
                "records.json",
                "--kind",
                "ingredient",
                "--json-logs",
            ])
            .unwrap();
        assert!(matches.get_flag("json-logs"));
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(kind(args).unwrap(), EntityKind::Ingredient);
    }

    #[test]
    fn backfill_requires_kind() {
        assert!(cli()
            .try_get_matches_from(["menushield", "backfill", "--input", "r.json"])
            .is_err());
        assert!(cli()
            .try_get_matches_from(["menushield", "translate", "--text", "x", "--lang", "fi", "--kind", "drink"])
            .is_err());
    }
}
