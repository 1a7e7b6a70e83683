use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use datepick::runtime::runner::compose_frame;
use datepick::terminal::{Terminal, TerminalSize};
use datepick::ui::frame_json::frame_to_json;
use datepick::widgets::shared::locale::Language;
use datepick::widgets::shared::mode::{Layout, PickerMode};
use datepick::{DatePicker, PickerConfig, PickerError, Runtime};

const SNAPSHOT_SIZE: TerminalSize = TerminalSize {
    width: 80,
    height: 24,
};

#[derive(Parser)]
#[command(name = "datepick")]
#[command(about = "Modal date, time and range picker for the terminal", long_about = None)]
struct Cli {
    /// YAML or JSON picker config; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// date, time, datetime, workingdays or nodate
    #[arg(long)]
    mode: Option<PickerMode>,

    /// Pick a start and an end
    #[arg(long)]
    range: bool,

    /// en or ru
    #[arg(long)]
    lang: Option<Language>,

    #[arg(long)]
    dark: bool,

    /// Tablet-class layout with inline month/year selectors
    #[arg(long)]
    wide: bool,

    /// Write logs to this file, filtered by RUST_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the opened picker's first frame as JSON and exit
    #[arg(long)]
    snapshot: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PickerError> {
    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = build_config(&cli)?;
    let mut picker = DatePicker::new(&config)?;

    if cli.snapshot {
        picker.open();
        let frame = compose_frame(&picker, SNAPSHOT_SIZE);
        println!("{}", frame_to_json(&frame, SNAPSHOT_SIZE));
        return Ok(());
    }

    let terminal = Terminal::new()?;
    let outcome = Runtime::new(picker, terminal).run()?;
    println!("{}", serde_json::to_string(&outcome)?);
    Ok(())
}

fn build_config(cli: &Cli) -> Result<PickerConfig, PickerError> {
    let mut config = match &cli.config {
        Some(path) => PickerConfig::load(path)?,
        None => PickerConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config = config.with_mode(mode);
    }
    if cli.range {
        config = config.with_range(true);
    }
    if let Some(language) = cli.lang {
        config = config.with_language(language);
    }
    if cli.dark {
        config = config.with_dark_mode(true);
    }
    if cli.wide {
        config = config.with_layout(Layout::Wide);
    }
    Ok(config)
}

/// The picker owns the screen, so logs only ever go to a file.
fn init_tracing(path: &Path) -> Result<(), PickerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = File::create(path)?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
    Ok(())
}
