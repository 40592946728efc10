use clap::Parser;
use fretboard::utils::{logger, validation::Validate};
use fretboard::{ChartEngine, CliConfig, FretboardError, LocalStorage};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    if let Some(listing) = config.listing() {
        println!("{}", listing);
        return Ok(());
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(e);
    }

    let output_path = config.output.clone();
    let engine = ChartEngine::new(config, LocalStorage::default());

    match engine.run() {
        Ok(chart) => match output_path {
            Some(path) => println!("Chart saved to: {}", path),
            None => print!("{}", chart),
        },
        Err(e) => fail(e),
    }

    Ok(())
}

fn fail(e: FretboardError) -> ! {
    tracing::error!("Chart failed: {} (category: {:?})", e, e.category());
    tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
