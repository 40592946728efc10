use clap::Parser;
use fretboard::core::ChartConfig;
use fretboard::utils::{logger, validation::Validate};
use fretboard::{ChartEngine, FretboardError, LocalStorage, OutputFormat, TomlConfig};

#[derive(Parser)]
#[command(name = "toml_fretboard")]
#[command(about = "Render a fretboard chart described by a TOML file")]
struct Args {
    /// Path to TOML chart file
    #[arg(short, long, default_value = "fretboard.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output format from the file
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Show the resolved request without computing the chart
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("Loading chart configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config file '{}': {}", args.config, e);
            eprintln!("Make sure the file exists and is valid TOML");
            std::process::exit(e.exit_code());
        }
    };

    if let Some(format) = args.format {
        config.set_format(format);
        tracing::info!("Output format overridden to: {:?}", format);
    }

    if let Err(e) = config.validate() {
        fail(e);
    }

    tracing::info!("Configuration loaded and validated");

    if args.dry_run {
        if let Err(e) = display_config_summary(&config) {
            fail(e);
        }
        return Ok(());
    }

    let output_path = config.output_path().map(str::to_string);
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

fn display_config_summary(config: &TomlConfig) -> fretboard::Result<()> {
    let strings = config.open_strings()?;
    let tuning: Vec<String> = strings.iter().map(ToString::to_string).collect();
    let options = config.render_options();

    println!("Chart summary:");
    println!("  Instrument: {}", config.instrument_name());
    println!("  Strings: {} ({})", strings.len(), tuning.join(", "));
    println!("  Frets: {}", config.frets()?);

    match config.mode()? {
        Some(mode) => {
            println!("  Mode: {}", mode);
            println!("  Intervals: {:?}", mode.intervals);
        }
        None => println!("  Mode: none"),
    }

    println!("  Format: {:?}", options.format);
    println!("  Spelling: {:?}", options.spelling);
    if options.scale_only {
        println!("  Scale only: yes");
    }
    println!("  Output: {}", config.output_path().unwrap_or("stdout"));

    Ok(())
}

fn fail(e: FretboardError) -> ! {
    tracing::error!("Chart failed: {} (category: {:?})", e, e.category());

    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
