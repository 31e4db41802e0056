use clap::Parser;
use sidebar_links::cli::{self, ScrapeArgs};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = ScrapeArgs::parse();
    cli::init_logging(args.common.verbose);

    let config = match args.config() {
        Ok(config) => config,
        Err(e) => return cli::fail(&e),
    };

    ::log::info!("Scraping: {}", config.start_url);
    ::log::info!("Output: {}", config.output.display());

    match cli::run(&config, args.common.from_file.as_deref()).await {
        Ok(report) => {
            println!(
                "Extracted {} links to {}",
                report.links().len(),
                config.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => cli::fail(&e),
    }
}
