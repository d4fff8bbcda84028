use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use inkpea::assets::DirectoryCatalog;
use inkpea::capture::CapturedImage;
use inkpea::config::EditorConfig;
use inkpea::export::FileSink;
use inkpea::render::Compositor;
use inkpea::session::{EditMsg, Editor, SessionMsg};

/// Annotate a photo from a command script and export the flattened result
#[derive(Debug, Parser)]
#[command(name = "inkpea", version, about)]
struct Args {
    /// Photo to annotate
    photo: PathBuf,

    /// JSON array of edit commands, in preview coordinates
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Output PNG; defaults to a timestamped file in the save location
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Width of the preview the script's coordinates refer to
    #[arg(long, env = "INKPEA_DISPLAY_WIDTH")]
    display_width: Option<f32>,

    /// Directory with sticker_<n>.png files
    #[arg(long)]
    sticker_dir: Option<PathBuf>,

    /// Caption font file
    #[arg(long)]
    font: Option<PathBuf>,

    /// Device pixel ratio of the photo
    #[arg(long, default_value_t = 1.0)]
    scale_factor: f32,

    /// Persist the effective settings as the new defaults
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = EditorConfig::load();
    if let Some(width) = args.display_width {
        config.display_width = width;
    }
    if let Some(dir) = &args.sticker_dir {
        config.sticker_dir = Some(dir.clone());
    }
    if let Some(font) = &args.font {
        config.font_path = Some(font.clone());
    }
    if args.save_config {
        config.save();
    }

    let script = match &args.script {
        Some(path) => read_script(path)?,
        None => Vec::new(),
    };

    let catalog = DirectoryCatalog::new(
        config
            .sticker_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("stickers")),
    );
    let sink = match &args.output {
        Some(path) => FileSink::to_path(path),
        None => FileSink::to_location(config.save_location),
    };
    let compositor = Compositor::with_font_path(config.font_path.as_deref());

    let photo = CapturedImage::open(&args.photo, args.scale_factor)
        .with_context(|| format!("Failed to load photo {}", args.photo.display()))?;

    let mut editor = Editor::new(config, catalog, sink, compositor);
    editor.handle(SessionMsg::Begin(photo))?;

    for (index, msg) in script.into_iter().enumerate() {
        match editor.handle(SessionMsg::Edit(msg)) {
            Ok(()) => {}
            Err(err) if err.is_recoverable() => {
                log::warn!("Command {index} skipped: {err}");
            }
            Err(err) => return Err(err).with_context(|| format!("Command {index} failed")),
        }
    }

    editor.handle(SessionMsg::Export).context("Export failed")?;
    if let Some(path) = editor.sink().last_path() {
        println!("{}", path.display());
    }
    Ok(())
}

fn read_script(path: &Path) -> Result<Vec<EditMsg>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid script: {}", path.display()))
}
