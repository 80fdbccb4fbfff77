use std::sync::Arc;

use clap::Parser;
use sawtooth_sdk::processor::TransactionProcessor;
use tracing::info;

use ggo_processor::config::{load_policy, ProcessorConfig};
use ggo_processor::handler::{
    IssueGgoHandler, PublishMeasurementHandler, RetireGgoHandler, SettlementHandler,
    SplitGgoHandler, TransferGgoHandler,
};
use ggo_processor::logging;

/// GGO ledger transaction processor.
///
/// Connects to a Sawtooth validator, registers the six GGO transaction
/// families, and serves the processing loop until the validator disconnects
/// or the process is signaled to stop.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Validator endpoint to connect to. Overrides LEDGER_URL.
    #[arg(short, long)]
    connect: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Optional log file path; console logging is used when unset.
    #[arg(short, long)]
    log_file: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _logging_guard = logging::init(args.verbose, args.log_file.as_deref());

    let config = match args.connect {
        Some(endpoint) => ProcessorConfig::with_endpoint(endpoint),
        None => ProcessorConfig::from_env(),
    };
    let policy = Arc::new(load_policy()?);

    info!(endpoint = %config.endpoint, "starting GGO transaction processor");

    let mut processor = TransactionProcessor::new(&config.endpoint);

    let publish_measurement = PublishMeasurementHandler::new(policy.clone());
    let issue_ggo = IssueGgoHandler::new(policy.clone());
    let split_ggo = SplitGgoHandler;
    let transfer_ggo = TransferGgoHandler;
    let retire_ggo = RetireGgoHandler;
    let settlement = SettlementHandler;

    processor.add_handler(&publish_measurement);
    processor.add_handler(&issue_ggo);
    processor.add_handler(&split_ggo);
    processor.add_handler(&transfer_ggo);
    processor.add_handler(&retire_ggo);
    processor.add_handler(&settlement);

    processor.start();

    info!("GGO transaction processor shut down cleanly");
    Ok(())
}
