use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use retouch::{
    DiscardSink, EditScript, EditSession, EditorConfig, ExportFormat, ExportOptions, FaceEffect,
    FixedDetections, RetouchError,
};

#[derive(Parser, Debug)]
#[command(name = "retouch", version)]
struct Cli {
    /// Log at DEBUG level to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an edit script against an image and export the result.
    Apply(ApplyArgs),
    /// Apply a face effect using detections from a JSON file.
    Faces(FacesArgs),
}

#[derive(Parser, Debug)]
struct OutputArgs {
    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Editor config JSON (brush, detection, export settings).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: png or jpeg. Defaults to the config's export format.
    #[arg(long)]
    format: Option<String>,
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Edit script JSON.
    #[arg(long)]
    script: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct FacesArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON array of face detections.
    #[arg(long)]
    detections: PathBuf,

    /// censor-eyes, blur-face or pixelate-face.
    #[arg(long)]
    effect: String,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Apply(args) => cmd_apply(args),
        Command::Faces(args) => cmd_faces(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_session(in_path: &Path, output: &OutputArgs) -> anyhow::Result<EditSession> {
    let bytes = std::fs::read(in_path)
        .with_context(|| format!("read input image '{}'", in_path.display()))?;
    let mut session = EditSession::from_image(&bytes)?;
    let config = match &output.config {
        Some(path) => EditorConfig::from_path(path)?,
        None => EditorConfig::default(),
    };
    session.configure(&config)?;
    Ok(session)
}

fn write_output(session: &EditSession, output: &OutputArgs) -> anyhow::Result<()> {
    let bytes = match &output.format {
        Some(f) => {
            let opts = ExportOptions {
                format: f.parse::<ExportFormat>()?,
            };
            session.export_with(&opts)?
        }
        None => session.export()?,
    };

    if let Some(parent) = output.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&output.out, bytes)
        .with_context(|| format!("write image '{}'", output.out.display()))?;

    eprintln!("wrote {}", output.out.display());
    Ok(())
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.in_path, &args.output)?;
    let script = EditScript::from_path(&args.script)?;
    script.apply(&mut session, &mut DiscardSink)?;
    write_output(&session, &args.output)
}

fn cmd_faces(args: FacesArgs) -> anyhow::Result<()> {
    let effect: FaceEffect = args.effect.parse()?;
    let mut session = open_session(&args.in_path, &args.output)?;
    let json = std::fs::read_to_string(&args.detections)
        .with_context(|| format!("read detections '{}'", args.detections.display()))?;
    let mut detector = FixedDetections::from_json_str(&json)?;

    match session.detect_faces(&mut detector) {
        Ok(faces) => {
            let report = session.apply_face_effects(&faces, effect, &mut DiscardSink)?;
            eprintln!(
                "{}: applied to {} face(s), skipped {}",
                effect.name(),
                report.applied,
                report.skipped
            );
        }
        Err(e @ RetouchError::NoFacesFound) => eprintln!("{e}; image left unchanged"),
        Err(e) => return Err(e.into()),
    }
    write_output(&session, &args.output)
}
