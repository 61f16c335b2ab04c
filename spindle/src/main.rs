use colored::Colorize;
use commands::command_argument_builder;
use spindle::handlers::{handle_crawl, handle_table, init_tracing};
use spindle_core::print_banner;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    init_tracing(verbose);

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let outcome = match chosen_command.subcommand() {
        Some(("crawl", primary_command)) => handle_crawl(primary_command, quiet).await,
        Some(("table", primary_command)) => handle_table(primary_command, quiet).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder_is_consistent() {
        command_argument_builder().debug_assert();
    }

    #[test]
    fn test_crawl_defaults() {
        let matches = command_argument_builder()
            .try_get_matches_from(["spindle", "crawl", "-u", "https://example.com"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "crawl");
        assert_eq!(*sub.get_one::<usize>("depth").unwrap(), 3);
        assert_eq!(*sub.get_one::<u64>("timeout").unwrap(), 10);
        assert!(!sub.get_flag("any-domain"));
        assert!(sub.get_one::<String>("user-agent").is_none());
        assert_eq!(sub.get_one::<String>("format").unwrap(), "text");
    }

    #[test]
    fn test_crawl_requires_url() {
        let result = command_argument_builder().try_get_matches_from(["spindle", "crawl"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_crawl_user_agent() {
        let matches = command_argument_builder()
            .try_get_matches_from([
                "spindle",
                "crawl",
                "-u",
                "https://example.com",
                "--user-agent",
                "spindle-test/1.0",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<String>("user-agent").unwrap(), "spindle-test/1.0");
    }

    #[test]
    fn test_crawl_rejects_zero_timeout() {
        let result = command_argument_builder().try_get_matches_from([
            "spindle",
            "crawl",
            "-u",
            "https://example.com",
            "--timeout",
            "0",
        ]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ValueValidation);

        let matches = command_argument_builder()
            .try_get_matches_from(["spindle", "crawl", "-u", "https://example.com", "--timeout", "1"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(*sub.get_one::<u64>("timeout").unwrap(), 1);
    }

    #[test]
    fn test_no_arguments_shows_help() {
        let result = command_argument_builder().try_get_matches_from(["spindle"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn test_flags_without_subcommand_are_rejected() {
        let result = command_argument_builder().try_get_matches_from(["spindle", "-q"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::MissingSubcommand);
    }

    #[test]
    fn test_table_arguments() {
        let matches = command_argument_builder()
            .try_get_matches_from([
                "spindle", "-q", "table", "graph.json", "-r", "home", "-d", "2", "-f", "json",
            ])
            .unwrap();
        assert!(matches.get_flag("quiet"));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "table");
        assert_eq!(sub.get_one::<String>("PATH").unwrap(), "graph.json");
        assert_eq!(sub.get_one::<String>("root").unwrap(), "home");
        assert_eq!(*sub.get_one::<usize>("depth").unwrap(), 2);
        assert_eq!(sub.get_one::<String>("format").unwrap(), "json");
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = command_argument_builder()
            .try_get_matches_from(["spindle", "table", "-f", "csv"]);
        assert!(result.is_err());
    }
}
