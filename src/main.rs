//! Skin Glow CLI
//!
//! Command-line front end for the skincare tracker:
//! - Sign in and out
//! - Work through the AM/PM routine checklist
//! - Run the (mock) skin analysis on an image file
//! - View progress, switch theme, export a report

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skin_glow::actives::ActivesList;
use skin_glow::analysis::{
    AnalysisResult, CaptureSession, FileCamera, MockAnalyzer, SkinAnalyzer, CAMERA_ALERT,
};
use skin_glow::appearance::{AppearanceStore, Palette, ProfileSettings};
use skin_glow::clock::ClockReading;
use skin_glow::config::{self, Config, LoggingConfig};
use skin_glow::progress::{self, Metric, INSIGHTS, SKIN_SAMPLES, WEEKLY_COMPLETION};
use skin_glow::report::Report;
use skin_glow::routine::{Period, RoutineEditor};
use skin_glow::session::{validate_login, validate_signup, SessionStore, User};
use skin_glow::storage::{FileStore, KeyValueStore, PROFILE_SETTINGS_KEY};

#[derive(Parser)]
#[command(name = "skin-glow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal skincare routine tracker")]
#[command(long_about = "Skin Glow keeps your morning and evening skincare routines.\nTick off steps, track your actives and watch your skin improve.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Am,
    Pm,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Am => Period::Am,
            PeriodArg::Pm => Period::Pm,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in
    Login {
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Signup {
        email: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show or edit a routine
    Routine {
        /// Routine to use (default: from the current time)
        #[arg(short, long, value_enum, global = true)]
        period: Option<PeriodArg>,

        #[command(subcommand)]
        action: Option<RoutineAction>,
    },

    /// List actives (kept for this invocation only)
    Actives {
        /// Mark an active as applied today
        #[arg(short, long)]
        apply: Vec<String>,

        /// Add an active with this name (requires --type)
        #[arg(long)]
        add: Option<String>,

        /// Type of the added active
        #[arg(long = "type")]
        kind: Option<String>,

        /// Concentration of the added active
        #[arg(long)]
        concentration: Option<String>,
    },

    /// Analyze skin from an image file
    Analyze {
        /// Image to use as the captured frame
        image: PathBuf,
    },

    /// Show the progress dashboard
    Progress,

    /// Show or change appearance
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Export a JSON report
    Report {
        /// Output path (default: skincare-report-<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Print the checklist
    Show,
    /// Tick or untick a step
    Toggle { id: String },
    /// Append a step
    Add {
        name: String,
        #[arg(short, long, default_value = "1 min")]
        duration: String,
    },
    /// Remove a step
    Delete { id: String },
    /// Restore the default steps
    Reset,
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Choose a background palette (rose, blue, purple, green)
    Background { palette: Palette },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging)?;

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let data_dir = config.storage.data_dir();
    let store = FileStore::open(&data_dir)
        .with_context(|| format!("Failed to open storage in {:?}", data_dir))?;
    tracing::debug!(path = ?store.path(), "Opened storage");

    match cli.command {
        Commands::Login { email, password } => {
            validate_login(&email, &password)?;
            tokio::time::sleep(config.auth.latency()).await;

            let mut session = SessionStore::restore(store.clone());
            let user = session.login(&email, &password)?;
            println!("Welcome back, {}!", user.name);
        }

        Commands::Signup {
            email,
            name,
            password,
        } => {
            validate_signup(&email, &name, &password)?;
            tokio::time::sleep(config.auth.latency()).await;

            let mut session = SessionStore::restore(store.clone());
            let user = session.signup(&email, &name, &password)?.clone();
            seed_profile(&store, &config, &user)?;
            println!("Welcome to Skin Glow, {}!", user.name);
        }

        Commands::Logout => {
            let mut session = SessionStore::restore(store.clone());
            session.logout()?;
            println!("Logged out");
        }

        Commands::Whoami => {
            let session = SessionStore::restore(store.clone());
            match (session.user(), cli.format) {
                (Some(user), OutputFormat::Json) => {
                    println!("{}", serde_json::to_string_pretty(user)?)
                }
                (Some(user), OutputFormat::Text) => {
                    println!("{} <{}>", user.name, user.email);
                    println!("id:     {}", user.id);
                    println!("avatar: {}", user.avatar_or_placeholder());
                }
                (None, _) => println!("Not logged in"),
            }
        }

        Commands::Routine { period, action } => {
            require_user(&store)?;
            let period = period
                .map(Period::from)
                .unwrap_or_else(|| ClockReading::now().period());
            let mut editor = RoutineEditor::load(store.clone(), period);

            match action.unwrap_or(RoutineAction::Show) {
                RoutineAction::Show => {}
                RoutineAction::Toggle { id } => {
                    editor.toggle_step(&id)?;
                }
                RoutineAction::Add { name, duration } => {
                    let step = editor.add_step(&name, &duration)?;
                    println!("Added {} ({})", step.name, step.id);
                }
                RoutineAction::Delete { id } => {
                    let step = editor.delete_step(&id)?;
                    println!("Deleted {}", step.name);
                }
                RoutineAction::Reset => {
                    editor.reset_routine()?;
                    println!("Routine reset to default");
                }
            }

            print_routine(&editor, cli.format)?;
        }

        Commands::Actives {
            apply,
            add,
            kind,
            concentration,
        } => {
            require_user(&store)?;
            let mut actives = ActivesList::default();

            if let Some(name) = add {
                let now = chrono::Utc::now().timestamp_millis();
                actives.add(
                    &name,
                    kind.as_deref().unwrap_or_default(),
                    concentration.as_deref().unwrap_or_default(),
                    now,
                )?;
            }
            for id in &apply {
                actives.toggle(id)?;
            }

            print_actives(&actives, cli.format)?;
        }

        Commands::Analyze { image } => {
            require_user(&store)?;
            let analyzer = MockAnalyzer::new(config.analysis.delay());
            let mut session = CaptureSession::new();

            session
                .start(&FileCamera::new(&image))
                .await
                .map_err(|e| anyhow!("{} ({})", CAMERA_ALERT, e))?;
            let capture_id = session.capture()?;

            eprintln!("Analyzing your skin...");
            tokio::time::sleep(analyzer.latency()).await;
            session.finish_analysis(capture_id, &analyzer);

            let result = session
                .result()
                .ok_or_else(|| anyhow!("Analysis did not complete"))?;
            print_analysis(result, cli.format)?;
        }

        Commands::Progress => {
            require_user(&store)?;
            print_progress(cli.format)?;
        }

        Commands::Theme { action } => {
            let mut appearance = AppearanceStore::load(store.clone(), false);

            match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => {}
                ThemeAction::Toggle => {
                    appearance.toggle_dark()?;
                }
                ThemeAction::Background { palette } => {
                    appearance.set_background(palette)?;
                }
            }

            let mode = if appearance.is_dark() { "dark" } else { "light" };
            let background = appearance.background();
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({ "theme": mode, "background": background })
                ),
                OutputFormat::Text => {
                    println!("Theme:      {}", mode);
                    println!("Background: {} ({})", background.label(), background);
                }
            }
        }

        Commands::Report { output } => {
            let user = require_user(&store)?;
            let report = Report::new(Some(user.name.as_str()), chrono::Utc::now());
            let path = output.unwrap_or_else(|| PathBuf::from(report.file_name()));

            std::fs::write(&path, report.to_pretty_json()?)?;
            println!("Report written to {:?}", path);
        }

        // Written before storage is opened
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("skin_glow={}", config.level).into());

    let writer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    Ok(())
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let content = config::generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &content)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", content);
        }
    }

    Ok(())
}

fn require_user(store: &FileStore) -> anyhow::Result<User> {
    match SessionStore::restore(store.clone()).user() {
        Some(user) => Ok(user.clone()),
        None => bail!("Not logged in. Run `skin-glow login <email> --password <password>` first"),
    }
}

/// Give a new account the configured palette and its display name
fn seed_profile(store: &FileStore, config: &Config, user: &User) -> anyhow::Result<()> {
    if store.get(PROFILE_SETTINGS_KEY)?.is_some() {
        return Ok(());
    }

    let settings = ProfileSettings {
        background: config.appearance.default_background,
        ..ProfileSettings::default()
    }
    .with_display_name_fallback(&user.name);

    let mut appearance = AppearanceStore::load(store.clone(), false);
    appearance.save_profile(&settings)?;
    Ok(())
}

fn print_routine(editor: &RoutineEditor<FileStore>, format: OutputFormat) -> anyhow::Result<()> {
    let progress = editor.progress();

    if format == OutputFormat::Json {
        let body = serde_json::json!({
            "period": editor.period(),
            "steps": editor.steps(),
            "progress": progress,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!(
        "{} Routine    {}/{} ({:.0}%){}",
        editor.period().title(),
        progress.completed,
        progress.total,
        progress.percent(),
        if progress.is_complete() { "  Completed!" } else { "" }
    );
    println!("{}", "-".repeat(50));

    if editor.steps().is_empty() {
        println!("No steps yet. Add one with `skin-glow routine add <name>`");
    }
    for step in editor.steps() {
        println!(
            "[{}] {:<16} {:<28} {}",
            if step.completed { "x" } else { " " },
            step.id,
            step.name,
            step.duration
        );
    }

    Ok(())
}

fn print_actives(actives: &ActivesList, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(actives.actives())?);
        return Ok(());
    }

    println!(
        "Applied today: {}/{}",
        actives.applied_count(),
        actives.actives().len()
    );
    println!("{}", "-".repeat(60));
    for active in actives.actives() {
        println!(
            "[{}] {:<14} {:<18} {:<22} {}",
            if active.applied_today { "x" } else { " " },
            active.id,
            active.name,
            active.kind,
            active.concentration
        );
        if !active.benefits.is_empty() {
            println!("    {}", active.benefits.join(", "));
        }
    }

    Ok(())
}

fn print_analysis(result: &AnalysisResult, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("Skin tone:     {}", result.skin_tone);
    println!("Hydration:     {}", result.hydration_level);
    println!("Oiliness:      {}", result.oiliness);
    println!("Sensitivity:   {}", result.sensitivity);
    println!("Texture:       {}", result.texture);
    println!("Concerns:      {}", result.concerns.join(", "));

    Ok(())
}

fn print_progress(format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        let improvements: serde_json::Map<String, serde_json::Value> = Metric::all()
            .iter()
            .map(|m| (m.label().to_lowercase(), progress::improvement(*m).into()))
            .collect();
        let body = serde_json::json!({
            "samples": SKIN_SAMPLES,
            "weeklyCompletion": WEEKLY_COMPLETION,
            "improvement": improvements,
            "insights": INSIGHTS,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Improvement since Day 1");
    for metric in Metric::all() {
        println!(
            "  {:<10} {}",
            metric.label(),
            progress::improvement_label(*metric)
        );
    }

    println!();
    println!(
        "{:<8} {:>9} {:>8} {:>9} {:>8}",
        "Day", "Hydration", "Clarity", "Radiance", "Texture"
    );
    for sample in &SKIN_SAMPLES {
        println!(
            "{:<8} {:>9} {:>8} {:>9} {:>8}",
            sample.day, sample.hydration, sample.clarity, sample.radiance, sample.texture
        );
    }

    println!();
    println!("Routine completion");
    for week in &WEEKLY_COMPLETION {
        let bar = "#".repeat((week.completion / 5) as usize);
        println!("  {:<7} {:<20} {}%", week.week, bar, week.completion);
    }

    println!();
    for insight in INSIGHTS {
        println!("* {}", insight);
    }

    Ok(())
}
