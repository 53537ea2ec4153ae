// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    crawl_options_from_args, init_logging, output_path_for, parse_report_format, resolve_output_path,
    run_crawl,
};

// Re-export crawl functionality from strider-core
pub use strider_core::crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl};
pub use strider_core::report::ReportFormat;
