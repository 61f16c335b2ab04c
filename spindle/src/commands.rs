use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("spindle")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("spindle")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and live results").required(false))
        .arg(arg!(-v --"verbose" "Enable debug logging (overridden by RUST_LOG)").required(false))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            command!("crawl")
                .about("Crawl a site over HTTP, following links up to a maximum depth.")
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The URL to start crawling from")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("Maximum number of hops to follow from the start URL")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"user-agent" <AGENT>)
                        .required(false)
                        .help("User-Agent header sent with each request"),
                )
                .arg(
                    arg!(--"any-domain")
                        .required(false)
                        .help("Follow links to other domains (default: stay on the start domain)")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(report_format_arg())
                .arg(output_arg()),
        )
        .subcommand(
            command!("table")
                .about(
                    "Crawl a static page table. Without a file, crawls the built-in golang.org \
                demo table.",
                )
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("JSON file mapping address -> { body, urls }"),
                )
                .arg(
                    arg!(-r --"root" <ADDRESS>)
                        .required(false)
                        .help("Address to start from (default for the demo: https://golang.org/)"),
                )
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("Maximum number of hops to follow from the root")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("4"),
                )
                .arg(report_format_arg())
                .arg(output_arg()),
        )
}

fn report_format_arg() -> clap::Arg {
    arg!(-f --"format" <FORMAT>)
        .required(false)
        .help("Report format: text, json")
        .value_parser(["text", "json"])
        .default_value("text")
}

fn output_arg() -> clap::Arg {
    arg!(-o --"output" <PATH>)
        .required(false)
        .help("Save report to file (default: display to screen)")
}
