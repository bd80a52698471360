//! Renders a saved project to a PNG file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record};
use sgs_card_renderer::{AssetStore, CardRenderer, PortraitSource, ProjectSnapshot};

#[derive(Debug, Parser)]
#[command(name = "render-card", about = "Render a Sanguosha card project to PNG")]
struct Args {
    /// Project JSON file.
    #[arg(long)]
    project: PathBuf,

    /// Directory holding `assets/` and `font/`.
    #[arg(long)]
    assets: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Portrait image, overriding the project's art reference.
    #[arg(long)]
    portrait: Option<PathBuf>,

    /// Write the downscaled display image instead of the supersampled one.
    #[arg(long)]
    display: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn run(args: &Args) -> sgs_card_renderer::Result<()> {
    let snapshot = ProjectSnapshot::from_path(&args.project)?;
    let mut request = snapshot.render_request(args.project.parent());
    if let Some(portrait) = &args.portrait {
        request.portrait = Some(PortraitSource::Path(portrait.clone()));
    }

    let mut renderer = CardRenderer::new(AssetStore::load_dir(&args.assets));
    let rendered = renderer.render_full(&request)?;

    let bytes = if args.display {
        sgs_card_renderer::encode_png(&rendered.display_image())?
    } else {
        rendered.png_bytes()?
    };
    std::fs::write(&args.out, bytes)?;
    log::info!("wrote {}", args.out.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
