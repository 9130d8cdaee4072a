use clap::Parser;
use crm::core::config::{self, CliOverrides};
use crm::core::seed;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "crm", about = "Terminal customer relationship desk")]
struct Args {
    /// JSON file with customers, deals and activities (default: bundled seed)
    #[arg(long = "data", value_name = "FILE")]
    data_file: Option<PathBuf>,

    /// Customers per list page
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// Simulated store latency in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to crm.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("crm.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("CRM starting up");

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("crm: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            data_file: args.data_file,
            page_size: args.page_size,
            delay_ms: args.delay_ms,
        },
    );
    log::info!("Resolved config: {:?}", resolved);

    let dataset = match seed::load_or_bundled(resolved.data_file.as_deref()) {
        Ok(d) => d,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("crm: {e}");
            return ExitCode::FAILURE;
        }
    };

    match crm::tui::run(resolved, dataset) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("crm: {e}");
            ExitCode::FAILURE
        }
    }
}
