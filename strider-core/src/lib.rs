pub mod crawl;
pub mod report;
pub mod stats;

use colored::Colorize;

pub use stats::CrawlStats;

const BANNER: &str = r"
     _        _     _
 ___| |_ _ __(_) __| | ___ _ __
/ __| __| '__| |/ _` |/ _ \ '__|
\__ \ |_| |  | | (_| |  __/ |
|___/\__|_|  |_|\__,_|\___|_|
";

pub fn print_banner() {
    eprintln!("{}", BANNER.bright_cyan().bold());
    eprintln!(
        "{}\n",
        format!("  single-chain web crawler v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
