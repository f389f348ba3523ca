// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod client_config;
mod client_main;
mod inspect;
mod network;
mod tui;

use anyhow::{Context, bail};
use board_client::display::BoardOrientation;
use clap::{Command, arg};
use client_config::{ClientConfig, DEFAULT_COMMIT_TIMEOUT};


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Board client")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Console client for playing on a board hosted by a remote authority")
        .subcommand_required(true)
        .subcommand(
            Command::new("client")
                .about("Connect to an authority and play")
                .arg(arg!(--"config" <config_file> "Path to the configuration file: yaml-serialized ClientConfig"))
                .arg(arg!([push_url] "Websocket URL of the push channel, e.g. ws://localhost:3512"))
                .arg(arg!([authority_url] "Base URL for move commits, e.g. http://localhost:5000"))
                .arg(arg!(--"commit-timeout" <duration> "How long to wait for a move commit, e.g. \"5s\""))
                .arg(arg!(--"rotate" "Draw rank 0 at the top")),
        )
        .subcommand(
            Command::new("inspect")
                .about("Reads a board push message from stdin and shows how moves are indexed")
                .arg(arg!(--"sample" "Print a sample push message instead")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("client", sub_matches)) => {
            let mut config = match sub_matches.get_one::<String>("config") {
                Some(filename) => ClientConfig::read_file(filename)?,
                None => {
                    let (Some(push_url), Some(authority_url)) = (
                        sub_matches.get_one::<String>("push_url"),
                        sub_matches.get_one::<String>("authority_url"),
                    ) else {
                        bail!("Either --config or both <push_url> and <authority_url> are required");
                    };
                    ClientConfig {
                        push_url: push_url.clone(),
                        authority_url: authority_url.clone(),
                        commit_timeout: DEFAULT_COMMIT_TIMEOUT,
                        orientation: BoardOrientation::Normal,
                    }
                }
            };
            if let Some(timeout) = sub_matches.get_one::<String>("commit-timeout") {
                config.commit_timeout = humantime::parse_duration(timeout)
                    .with_context(|| format!("Bad commit timeout '{timeout}'"))?;
            }
            if sub_matches.get_flag("rotate") {
                config.orientation = BoardOrientation::Rotated;
            }
            config.validate()?;
            client_main::run(config)
        }
        Some(("inspect", sub_matches)) => inspect::run(inspect::InspectConfig {
            sample: sub_matches.get_flag("sample"),
        }),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
