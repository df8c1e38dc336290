mod dataset;
mod history;
mod narrative;
mod render;
mod report;
mod ui;
mod util;

use crate::{dataset::Dataset, render::Artifact, report::Report, ui::Dashboard};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use std::{
    error::Error,
    fs, io,
    path::{Path, PathBuf},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

/// customer acquisition cost statistics with charted results
#[derive(Parser, Debug, Clone)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// JSON file with the observations to analyse
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// Target the observations are measured against
    #[clap(short = 't', long)]
    target: Option<f64>,

    /// Directory the chart documents are written to
    #[clap(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,

    /// Skip writing chart documents
    #[clap(long)]
    no_charts: bool,

    /// Show the terminal dashboard after the printed report
    #[clap(short = 'i', long)]
    interactive: bool,

    /// Open the performance dashboard in the default browser
    #[clap(long)]
    open: bool,

    /// Do not append this run to the history log
    #[clap(long)]
    no_history: bool,

    /// Write info level logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn dataset(&self) -> Result<Dataset, dataset::DatasetError> {
        let mut dataset = match &self.file {
            Some(path) => Dataset::from_path(path)?,
            None => Dataset::default(),
        };

        if let Some(target) = self.target {
            dataset.target = target;
        }

        Ok(dataset)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match &args.log_file {
        Some(path) => simple_logging::log_to_file(path, log::LevelFilter::Info)?,
        None => simple_logging::log_to_stderr(log::LevelFilter::Warn),
    }

    let dataset = args.dataset()?;
    info!(
        "loaded {} observations, target {}",
        dataset.observations.len(),
        dataset.target
    );

    println!("Starting {}...", dataset.name);

    let report = Report::compute(&dataset.observations, dataset.target)?;
    let metric = dataset.metric.as_str();

    println!("{}", narrative::verification(&report, metric));

    println!("\n{}", narrative::banner(&dataset.name.to_uppercase()));
    println!("\nQuarterly Performance:");
    println!("{}", narrative::performance_table(&report, metric));
    println!("\nStatistical Analysis:");
    println!("{}", narrative::statistics_listing(&report, metric));

    let written = match args.no_charts {
        true => vec![],
        false => render::write_all(&report, &dataset, &args.output_dir)?,
    };

    if !written.is_empty() {
        println!();
    }
    for (artifact, path) in &written {
        println!("✓ {} saved as '{}'", artifact.describe(), path.display());
    }

    print_insights(&report, metric);

    println!("\n{}", narrative::banner("ANALYSIS COMPLETE"));
    if !written.is_empty() {
        println!("Generated Files:");
        for (_, path) in &written {
            println!("- {}", path.display());
        }
    }
    println!(
        "\nAverage {}: {}",
        metric,
        narrative::money(report.mean())
    );

    if !args.no_history {
        record_history(&report, &dataset);
    }

    let dashboard = written
        .iter()
        .find(|(artifact, _)| *artifact == Artifact::Dashboard)
        .map(|(_, path)| path.as_path());

    if args.open {
        match dashboard {
            Some(path) => open_in_browser(path),
            None => warn!("--open needs the chart documents, nothing was written"),
        }
    }

    if args.interactive {
        run_dashboard(&report, &dataset, dashboard)?;
    }

    Ok(())
}

fn print_insights(report: &Report, metric: &str) {
    println!("\n{}", narrative::banner("BUSINESS INSIGHTS & RECOMMENDATIONS"));

    println!("\nKEY FINDINGS:");
    println!(
        "{}",
        narrative::numbered(&narrative::findings(report, metric))
    );

    println!("\nSTRATEGIC RECOMMENDATIONS:");
    println!("{}", narrative::numbered(&narrative::RECOMMENDATIONS));

    println!("\nSOLUTION FOCUS: OPTIMIZE DIGITAL MARKETING CHANNELS");
    for line in narrative::solution_focus(report, metric) {
        println!("{}", line);
    }
}

fn record_history(report: &Report, dataset: &Dataset) {
    match history::log_path() {
        Some(path) => match history::append(report, dataset, &path) {
            Ok(()) => info!("appended run to {}", path.display()),
            Err(err) => warn!("could not write history to {}: {}", path.display(), err),
        },
        None => warn!("no home directory, history not recorded"),
    }
}

fn open_in_browser(path: &Path) {
    let url = match fs::canonicalize(path) {
        Ok(abs) => format!("file://{}", abs.display()),
        Err(_) => path.display().to_string(),
    };

    if let Err(err) = webbrowser::open(&url) {
        warn!("could not open {}: {}", url, err);
    }
}

fn run_dashboard(
    report: &Report,
    dataset: &Dataset,
    html: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &Dashboard::new(report, dataset), html);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    dashboard: &Dashboard,
    html: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(dashboard, f.size()))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => break,
                KeyCode::Char('o') => match html {
                    Some(path) => open_in_browser(path),
                    None => info!("no dashboard document to open"),
                },
                _ => {}
            }
        }
    }

    Ok(())
}
