use clap::Parser;
use sidebar_links::cli::{self, SidebarArgs};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = SidebarArgs::parse();
    cli::init_logging(args.common.verbose);

    let config = match args.config() {
        Ok(config) => config,
        Err(e) => return cli::fail(&e),
    };

    ::log::info!("Extracting sidebar links from {}", config.start_url);

    match cli::run(&config, args.common.from_file.as_deref()).await {
        Ok(report) => {
            ::log::info!(
                "{} candidates considered, {} hrefs rejected",
                report.candidates,
                report.extraction.rejected.total()
            );
            println!(
                "Extracted {} sidebar links to {}",
                report.links().len(),
                config.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => cli::fail(&e),
    }
}
