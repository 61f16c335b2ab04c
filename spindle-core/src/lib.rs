use colored::Colorize;

pub mod crawl;
pub mod report;

pub fn print_banner() {
    println!(
        "{} {}",
        "spindle".bright_cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
    println!("{}", "bounded-depth concurrent crawler".bright_black());
    println!();
}
