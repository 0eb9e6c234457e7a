use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lesson_core::model::{LessonId, LessonSettings, SettingsError};
use services::{AppServices, Clock, EventService, LessonLoader};
use storage::seed::DEFAULT_LESSON_ID;
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLessonId { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
    Settings(SettingsError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLessonId { raw } => write!(f, "invalid --lesson-id value: {raw}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::Settings(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<SettingsError> for ArgsError {
    fn from(err: SettingsError) -> Self {
        Self::Settings(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    lesson_id: LessonId,
    lessons: Arc<LessonLoader>,
    events: Arc<EventService>,
}

impl UiApp for DesktopApp {
    fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    fn lessons(&self) -> Arc<LessonLoader> {
        Arc::clone(&self.lessons)
    }

    fn events(&self) -> Arc<EventService> {
        Arc::clone(&self.events)
    }
}

#[derive(Debug, PartialEq)]
struct Args {
    lesson_id: LessonId,
    settings: LessonSettings,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui      [--lesson-id <id>] [--scroll-threshold <px>] [--fade-ms <ms>]");
    eprintln!("  cargo run -p app -- lessons");
    eprintln!();
    eprintln!("Defaults for ui:");
    eprintln!("  --lesson-id {DEFAULT_LESSON_ID}");
    eprintln!("  --scroll-threshold 10");
    eprintln!("  --fade-ms 1000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LESSON_ID, LESSON_SCROLL_THRESHOLD, LESSON_FADE_MS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Lessons,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "lessons" => Some(Self::Lessons),
            _ => None,
        }
    }
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, raw: &str) -> Result<T, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidNumber {
        flag,
        raw: raw.to_string(),
    })
}

impl Args {
    /// Flags override the environment, which overrides the defaults.
    fn parse_ui(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut lesson_id = env("LESSON_ID")
            .and_then(|value| value.parse::<u64>().ok())
            .map_or_else(|| LessonId::new(DEFAULT_LESSON_ID), LessonId::new);
        let mut scroll_threshold = env("LESSON_SCROLL_THRESHOLD")
            .map(|raw| parse_number::<f64>("LESSON_SCROLL_THRESHOLD", &raw))
            .transpose()?;
        let mut fade_ms = env("LESSON_FADE_MS")
            .map(|raw| parse_number::<u64>("LESSON_FADE_MS", &raw))
            .transpose()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--lesson-id" => {
                    let value = require_value(args, "--lesson-id")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidLessonId { raw: value.clone() })?;
                    lesson_id = LessonId::new(parsed);
                }
                "--scroll-threshold" => {
                    let value = require_value(args, "--scroll-threshold")?;
                    scroll_threshold = Some(parse_number("--scroll-threshold", &value)?);
                }
                "--fade-ms" => {
                    let value = require_value(args, "--fade-ms")?;
                    fade_ms = Some(parse_number("--fade-ms", &value)?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let mut settings = LessonSettings::standard();
        if let Some(threshold) = scroll_threshold {
            settings = settings.with_scroll_threshold(threshold)?;
        }
        if let Some(ms) = fade_ms {
            settings = settings.with_fade_window(Duration::from_millis(ms))?;
        }

        Ok(Self {
            lesson_id,
            settings,
        })
    }
}

fn init_tracing() {
    // RUST_LOG=services=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse_ui(&mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let services = AppServices::new_in_memory(
        Clock::default(),
        parsed.settings,
        parsed.lesson_id,
        Handle::current(),
    )
    .await?;

    match cmd {
        Command::Ui => {
            tracing::info!(
                lesson_id = %services.lesson_id(),
                fade_ms = parsed.settings.fade_window().as_millis(),
                scroll_threshold = parsed.settings.scroll_threshold(),
                "launching lesson window"
            );

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                lesson_id: services.lesson_id(),
                lessons: services.lessons(),
                events: services.events(),
            });
            let context = build_app_context(&app);

            // Some dev setups default tao windows to always-on-top.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Lesson")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Lessons => {
            for lesson in services.lessons().list_lessons().await? {
                println!("{}\t{}\t{} blocks", lesson.id, lesson.title, lesson.blocks);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // Binary glue: print once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
