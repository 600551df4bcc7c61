use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use color_eyre::{
    config::HookBuilder,
    eyre::{Result, WrapErr},
};
use crossterm::event::{self, Event};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use waterfall::{
    DemoScreen, Flow, Settings,
    logging::{self, LogTarget},
    screen::render_snapshot,
};
use waterfall_masonry::MasonryConfig;
use waterfall_tui::TuiAppBuilder;

#[derive(Parser, Debug)]
#[command(name = "waterfall")]
#[command(about = "Masonry card grid in the terminal", long_about = None)]
#[command(version, author)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Settings file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of columns
    #[arg(long)]
    columns: Option<usize>,

    /// Horizontal gap between columns, in cells
    #[arg(long)]
    column_gap: Option<f32>,

    /// Vertical gap between cards, in rows
    #[arg(long)]
    row_gap: Option<f32>,

    /// Cards created at startup and on reset
    #[arg(long)]
    cards: Option<usize>,

    /// Seed for the generated cards
    #[arg(long)]
    seed: Option<u64>,

    /// Append logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the settled screen at this width and exit
    #[arg(long, value_name = "WIDTH")]
    snapshot: Option<u16>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(cards) = self.cards {
            settings.initial_cards = cards;
        }
        if let Some(path) = &self.log_file {
            settings.log_file = Some(path.clone());
        }
        let layout = &mut settings.layout;
        layout.columns = self.columns.or(layout.columns);
        layout.column_gap = self.column_gap.or(layout.column_gap);
        layout.row_gap = self.row_gap.or(layout.row_gap);
        Ok(settings)
    }

    fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}

#[derive(Serialize)]
struct EffectiveSettings<'a> {
    initial_cards: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_file: Option<&'a Path>,
    layout: &'a MasonryConfig,
}

impl<'a> EffectiveSettings<'a> {
    fn new(settings: &'a Settings, layout: &'a MasonryConfig) -> Self {
        Self {
            initial_cards: settings.initial_cards,
            log_file: settings.log_file.as_deref(),
            layout,
        }
    }
}

fn main() -> Result<()> {
    HookBuilder::default()
        .display_env_section(false)
        .panic_section("It looks like waterfall encountered a bug")
        .install()?;

    let cli = Cli::parse();
    let settings = cli.settings()?;

    if cli.print_config {
        let config = settings.masonry_config();
        let effective = EffectiveSettings::new(&settings, &config);
        print!("{}", toml::to_string_pretty(&effective)?);
        return Ok(());
    }

    if let Some(width) = cli.snapshot {
        logging::install(LogTarget::Stderr, cli.verbose)?;
        let text = render_snapshot(
            settings.masonry_config(),
            settings.initial_cards,
            width,
            cli.rng(),
        )?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}")?;
        return Ok(());
    }

    let target = settings
        .log_file
        .clone()
        .map_or(LogTarget::Disabled, LogTarget::File);
    logging::install(target, cli.verbose)?;
    run(&settings, cli.rng())
}

fn run(settings: &Settings, rng: StdRng) -> Result<()> {
    let mut screen = DemoScreen::new(settings.masonry_config(), settings.initial_cards, rng)?;
    let mut app = TuiAppBuilder::new()
        .build()
        .wrap_err("failed to take over the terminal")?;

    let (columns, rows) = app.terminal().size()?;
    screen.resize(columns, rows)?;
    tracing::info!(columns, rows, cards = screen.grid().len(), "demo started");

    loop {
        let frame = screen.compose(&mut app)?;
        app.present(&frame)?;

        match event::read()? {
            Event::Key(key) => {
                if screen.handle_key(key) == Flow::Quit {
                    break;
                }
            }
            Event::Resize(columns, rows) => screen.resize(columns, rows)?,
            _ => {}
        }
    }

    tracing::info!("demo finished");
    Ok(())
}
