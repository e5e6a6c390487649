//! `subcal` CLI — render month views of form-submission calendars.
//!
//! ## Usage
//!
//! ```sh
//! # Render the current month from an export (stdin → stdout, JSON view-model)
//! cat submissions.json | subcal render
//!
//! # Render two months ahead, filtered, as plain text
//! subcal render -i submissions.json --offset 2 --search team --format text
//!
//! # Pin "today" and use the CMS deployment settings
//! subcal render -i submissions.json --today 2024-01-10 --preset cms --form-id 42
//!
//! # List the recurring occurrences synthesized for a month
//! subcal expand -i submissions.json --today 2024-01-10
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::process;
use submission_calendar::config::DEFAULT_FORM_ID;
use submission_calendar::error::CalendarError;
use submission_calendar::layout::{DayCell, EventBlock, MonthGrid};
use submission_calendar::source::{PageRequest, StaticSource, SubmissionPage, SubmissionSource};
use submission_calendar::{expand, filter_events, CalendarWidget, RenderOutcome, WidgetConfig};
use tracing_subscriber::EnvFilter;

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Parser)]
#[command(
    name = "subcal",
    version,
    about = "Month-view calendar for form submissions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a month and print the view-model
    Render {
        #[command(flatten)]
        view: ViewArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print the recurring occurrences synthesized for a month
    Expand {
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Submissions JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Months away from the current month (negative for earlier months)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i32,
    /// Free-text search over name, type and additional information
    #[arg(long, default_value = "")]
    search: String,
    /// Date to treat as today (YYYY-MM-DD); defaults to the clock
    #[arg(long)]
    today: Option<String>,
    /// Widget configuration JSON file
    #[arg(long, conflicts_with = "preset")]
    config: Option<String>,
    /// Built-in deployment settings
    #[arg(long, value_enum)]
    preset: Option<Preset>,
    /// Form id used for view-submission events
    #[arg(long)]
    form_id: Option<u64>,
    /// Truncate banner labels to this many characters
    #[arg(long)]
    label_limit: Option<usize>,
    /// IANA timezone for "today" and offset timestamps
    #[arg(long)]
    timezone: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Standalone,
    Cms,
}

/// Submissions read from a JSON file or stdin on the first request.
struct JsonInputSource {
    path: Option<String>,
    loaded: Option<StaticSource>,
}

impl SubmissionSource for JsonInputSource {
    fn fetch_page(
        &mut self,
        request: PageRequest,
    ) -> submission_calendar::error::Result<SubmissionPage> {
        let mut source = match self.loaded.take() {
            Some(source) => source,
            None => {
                let json = read_input(self.path.as_deref())
                    .map_err(|e| CalendarError::Source(format!("{:#}", e)))?;
                StaticSource::from_json(&json)?
            }
        };
        let page = source.fetch_page(request);
        self.loaded = Some(source);
        page
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { view, format } => {
            let (mut widget, today) = mount(&view)?;
            widget.set_month_offset(view.offset);
            widget.apply_search(view.search.as_str());

            let outcome = widget.render(today);
            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                Format::Text => print!("{}", render_text(&outcome)),
            }
            if let RenderOutcome::Error { .. } = outcome {
                process::exit(1);
            }
        }
        Commands::Expand { view } => {
            let (widget, today) = mount(&view)?;
            if !widget.is_loaded() {
                anyhow::bail!(submission_calendar::widget::LOAD_ERROR_MESSAGE);
            }
            let window = submission_calendar::MonthWindow::from_offset(today, view.offset);
            let matching = filter_events(widget.events(), &view.search);
            let occurrences = expand(&matching, window);
            println!("{}", serde_json::to_string_pretty(&occurrences)?);
        }
    }

    Ok(())
}

/// Build the widget configuration from --config/--preset plus flag overrides.
fn build_config(view: &ViewArgs) -> Result<WidgetConfig> {
    let mut config = match (&view.config, view.preset) {
        (Some(path), _) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("Invalid config file: {}", path))?
        }
        (None, Some(Preset::Cms)) => {
            WidgetConfig::cms(view.form_id.unwrap_or(DEFAULT_FORM_ID))
        }
        (None, Some(Preset::Standalone)) | (None, None) => WidgetConfig::standalone(),
    };

    if let Some(form_id) = view.form_id {
        config.form_id = form_id;
    }
    if let Some(limit) = view.label_limit {
        config.label_limit = Some(limit);
    }
    if let Some(tz) = &view.timezone {
        config.timezone = Some(tz.clone());
    }
    Ok(config)
}

fn mount(view: &ViewArgs) -> Result<(CalendarWidget, NaiveDate)> {
    let config = build_config(view)?;
    let today = match &view.today {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid --today date: {}", raw))?,
        None => config.today().context("Failed to resolve today's date")?,
    };

    let mut source = JsonInputSource {
        path: view.input.clone(),
        loaded: None,
    };
    let widget = CalendarWidget::mount(config, &mut source).context("Failed to mount calendar")?;
    Ok((widget, today))
}

fn render_text(outcome: &RenderOutcome) -> String {
    match outcome {
        RenderOutcome::Error { message } => format!("{}\n", message),
        RenderOutcome::Grid(grid) => render_grid_text(grid),
    }
}

/// One line per day, each followed by its banners and overflow.
fn render_grid_text(grid: &MonthGrid) -> String {
    let mut out = format!("{}\n", grid.label);
    for cell in &grid.days {
        out.push_str(&day_line(cell));
        for block in &cell.blocks {
            if let EventBlock::Banner(banner) = block {
                out.push_str(&format!(
                    "    [{}] {} ({}d)\n",
                    banner.slot, banner.label, banner.span
                ));
            }
        }
        if let Some(overflow) = &cell.overflow {
            let names: Vec<&str> = overflow.events.iter().map(|e| e.name.as_str()).collect();
            out.push_str(&format!("    {}: {}\n", overflow.label(), names.join(", ")));
        }
    }
    out
}

fn day_line(cell: &DayCell) -> String {
    let marker = if cell.is_today { " (today)" } else { "" };
    format!(
        "{} {:>2}{}\n",
        WEEKDAY_NAMES[cell.weekday_index % 7],
        cell.day_of_month,
        marker
    )
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
