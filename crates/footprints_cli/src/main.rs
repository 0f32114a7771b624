//! Footprints command-line entry point.
//!
//! # Responsibility
//! - Expose intake, moderation and gallery use-cases over a local database.
//! - Render the wandering-dot stage to an SVG frame for inspection.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use footprints_core::motion::canvas::SvgCanvas;
use footprints_core::motion::scheduler::{drive, FixedStepTicker};
use footprints_core::motion::seed::{dots_from_items, placeholder_dots};
use footprints_core::service::notify::LogNotifier;
use footprints_core::{
    init_logging, open_db, AdminGate, Emotion, FootprintsConfig, GalleryQuery, GalleryService,
    ModerationQuery, ModerationService, Size, SqliteSubmissionRepository, Stage, StatusFilter,
    SubmissionForm, SubmissionService, SubmissionStatus,
};
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "footprints")]
#[command(about = "Anonymous footprints: submit, moderate, browse and render", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, global = true, default_value = "footprints.sqlite3")]
    db: PathBuf,

    /// Directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Leave a new footprint (stored as pending)
    Submit {
        /// Message text, at most 128 characters
        #[arg(long)]
        message: String,

        /// One of anger, disgust, fear, happiness, sadness, surprise
        #[arg(long)]
        emotion: String,

        /// Where the footprint was left, at most 64 characters
        #[arg(long)]
        location: String,
    },

    /// List submissions awaiting review
    Queue {
        #[arg(long, env = "FOOTPRINTS_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        /// pending, approved, rejected or all
        #[arg(long, default_value = "pending")]
        status: String,

        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Approve or reject a submission
    Moderate {
        #[arg(long, env = "FOOTPRINTS_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        /// Submission id
        id: Uuid,

        #[arg(value_enum)]
        decision: Decision,
    },

    /// Print one page of approved footprints as JSON
    Gallery {
        /// Repeat to match several emotions
        #[arg(long = "emotion")]
        emotions: Vec<String>,

        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Simulate the gallery stage and write the final frame as SVG
    Render {
        #[arg(long, default_value_t = 1280.0)]
        width: f64,

        #[arg(long, default_value_t = 800.0)]
        height: f64,

        #[arg(long, default_value_t = 600)]
        frames: u32,

        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Output file for the SVG frame
        #[arg(long, default_value = "footprints.svg")]
        out: PathBuf,

        /// Placeholder dots to show when the gallery is empty or unavailable
        #[arg(long, default_value_t = 20)]
        placeholders: usize,

        /// Seed for reproducible layouts
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Decision {
    Approve,
    Reject,
}

impl From<Decision> for SubmissionStatus {
    fn from(value: Decision) -> Self {
        match value {
            Decision::Approve => SubmissionStatus::Approved,
            Decision::Reject => SubmissionStatus::Rejected,
        }
    }
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or(footprints_core::default_log_level());
        let log_dir = absolute(log_dir)?;
        init_logging(level, &log_dir).context("failed to initialize logging")?;
    }

    let config = match &cli.config {
        Some(path) => FootprintsConfig::load(path)
            .with_context(|| format!("failed to load config `{}`", path.display()))?,
        None => FootprintsConfig::from_env(),
    };

    match cli.command {
        Commands::Submit {
            message,
            emotion,
            location,
        } => {
            let conn = open_db(&cli.db)?;
            let repo = SqliteSubmissionRepository::try_new(&conn)?;
            let service = SubmissionService::new(repo, LogNotifier);
            let submission = service.submit(&SubmissionForm {
                message,
                emotion,
                location,
            })?;
            println!("{}", serde_json::to_string_pretty(&submission)?);
        }
        Commands::Queue {
            password,
            status,
            search,
            page,
            limit,
        } => {
            let status = StatusFilter::parse(&status)
                .ok_or_else(|| anyhow!("unknown status filter `{status}`"))?;
            let conn = open_db(&cli.db)?;
            let repo = SqliteSubmissionRepository::try_new(&conn)?;
            let gate = AdminGate::new(config.admin_password.clone());
            let mut service = ModerationService::new(repo, gate, config.gallery.clone());
            let token = service.login(&password)?;
            let result = service.list(
                &token,
                &ModerationQuery {
                    status,
                    search,
                    page,
                    limit,
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Moderate {
            password,
            id,
            decision,
        } => {
            let conn = open_db(&cli.db)?;
            let repo = SqliteSubmissionRepository::try_new(&conn)?;
            let gate = AdminGate::new(config.admin_password.clone());
            let mut service = ModerationService::new(repo, gate, config.gallery.clone());
            let token = service.login(&password)?;
            let updated = service.set_status(&token, id, decision.into())?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        Commands::Gallery {
            emotions,
            search,
            page,
            limit,
        } => {
            let emotions = parse_emotions(&emotions)?;
            let conn = open_db(&cli.db)?;
            let repo = SqliteSubmissionRepository::try_new(&conn)?;
            let mut service = GalleryService::new(repo, config.gallery.clone());
            let result = service.list(&GalleryQuery {
                emotions,
                search,
                page,
                limit,
            })?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Render {
            width,
            height,
            frames,
            fps,
            out,
            placeholders,
            seed,
        } => {
            if !(width > 0.0 && height > 0.0) {
                bail!("viewport must be positive, got {width}x{height}");
            }
            let viewport = Size::new(width, height);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let items = match load_gallery_items(&cli.db, &config) {
                Ok(items) => items,
                Err(err) => {
                    warn!("event=render_gallery module=cli status=fallback reason={err}");
                    Vec::new()
                }
            };
            let dots = if items.is_empty() {
                placeholder_dots(placeholders, viewport, &config.placement, &mut rng)
            } else {
                dots_from_items(&items, viewport, &config.placement, &mut rng)
            };

            let mut stage = Stage::mount(dots, viewport, &config.placement, rng);
            let mut ticker = FixedStepTicker::at_fps(fps, frames);
            let mut canvas = SvgCanvas::new();
            if frames == 0 {
                stage.render(&mut canvas);
            }
            let summary = drive(&mut stage, &mut ticker, &mut canvas);

            std::fs::write(&out, canvas.finish())
                .with_context(|| format!("failed to write `{}`", out.display()))?;
            println!(
                "rendered {} dots over {} frames: {} retargets ({} fallback), {} lines -> {}",
                stage.dots().len(),
                summary.frames,
                summary.retargets,
                summary.fallbacks,
                summary.last_frame_lines,
                out.display()
            );
        }
    }

    Ok(())
}

fn load_gallery_items(
    db: &Path,
    config: &FootprintsConfig,
) -> Result<Vec<footprints_core::GalleryItem>> {
    let conn = open_db(db)?;
    let repo = SqliteSubmissionRepository::try_new(&conn)?;
    let mut service = GalleryService::new(repo, config.gallery.clone());
    let page = service.list(&GalleryQuery {
        limit: Some(config.gallery.max_limit),
        ..GalleryQuery::default()
    })?;
    Ok(page.items)
}

fn parse_emotions(values: &[String]) -> Result<Vec<Emotion>> {
    values
        .iter()
        .map(|value| value.parse::<Emotion>().map_err(|err| anyhow!(err)))
        .collect()
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    Ok(cwd.join(path))
}
