use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("strider")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("strider")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Walk a single chain of pages from a seed URL and report links, images, \
                titles and word counts.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The seed URL. Link fragments are appended to it verbatim, so end it with '/'"),
                )
                .arg(
                    arg!(-d --"depth" <STEPS>)
                        .required(false)
                        .help("Step budget: number of hops to take beyond the seed page")
                        .value_parser(clap::value_parser!(i64))
                        .allow_negative_numbers(true)
                        .default_value("3"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"user-agent" <AGENT>)
                        .required(false)
                        .help("User-Agent header to send (default: strider/<version>)"),
                )
                .arg(
                    arg!(--"keep-going")
                        .required(false)
                        .help("Record failed fetches as empty pages and continue instead of aborting")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file, adding the format extension if missing (default: display to screen)"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, html")
                        .value_parser(["text", "json", "csv", "html"])
                        .default_value("text"),
                )
                .arg(
                    arg!(--"no-progress")
                        .required(false)
                        .help("Print one line per step instead of showing a spinner")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
