use crate::dataset::Dataset;
use crate::narrative::money;
use crate::report::Report;
use crate::util::round_to;
use include_dir::{include_dir, Dir};
use log::info;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::common::{DashType, Line, Marker, Mode, TextPosition, Title};
use plotly::layout::{Axis, HoverMode};
use plotly::{Bar, Layout, Plot, Scatter};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

static ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

const PANEL_HEIGHT: usize = 360;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Artifact {
    #[strum(serialize = "trend_analysis")]
    Trend,
    #[strum(serialize = "gap_analysis")]
    Gap,
    #[strum(serialize = "performance_dashboard")]
    Dashboard,
}

impl Artifact {
    pub const ALL: [Artifact; 3] = [Artifact::Trend, Artifact::Gap, Artifact::Dashboard];

    /// e.g. `cac_trend_analysis.html`
    pub fn file_name(&self, dataset: &Dataset) -> String {
        format!("{}_{}.html", dataset.slug(), self)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Artifact::Trend => "Trend analysis chart",
            Artifact::Gap => "Gap analysis chart",
            Artifact::Dashboard => "Performance dashboard",
        }
    }

    pub fn path(&self, dataset: &Dataset, dir: &Path) -> PathBuf {
        dir.join(self.file_name(dataset))
    }

    pub fn document(&self, report: &Report, dataset: &Dataset) -> io::Result<String> {
        match self {
            Artifact::Trend => trend_document(report, dataset),
            Artifact::Gap => gap_document(report, dataset),
            Artifact::Dashboard => dashboard_document(report, dataset),
        }
    }
}

fn asset(name: &str) -> io::Result<&'static str> {
    ASSETS
        .get_file(name)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, format!("missing asset {}", name)))
}

/// standalone page with plotly.js and the stylesheet inlined
fn page(title: &str, body: Markup) -> io::Result<String> {
    let style = asset("style.css")?;

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(style)) }
                (PreEscaped(Plot::offline_js_sources()))
            }
            body {
                main { (body) }
            }
        }
    };

    Ok(markup.into_string())
}

fn categories(report: &Report) -> Vec<String> {
    report.labels().into_iter().map(String::from).collect()
}

fn values(report: &Report) -> Vec<f64> {
    report.rows().iter().map(|r| r.value).collect()
}

fn gaps(report: &Report) -> Vec<f64> {
    report.rows().iter().map(|r| r.gap).collect()
}

fn flat(value: f64, report: &Report) -> Vec<f64> {
    vec![value; report.rows().len()]
}

fn target_name(report: &Report) -> String {
    format!("Industry Target (${})", report.target())
}

fn figure(plot: &Plot, id: &str) -> Markup {
    PreEscaped(plot.to_inline_html(Some(id)))
}

pub fn trend_document(report: &Report, dataset: &Dataset) -> io::Result<String> {
    let title = format!(
        "{} ({}) Trend Analysis - {}",
        dataset.description, dataset.metric, dataset.period
    );

    let actual = Scatter::new(categories(report), values(report))
        .name(&format!("Actual {}", dataset.metric))
        .mode(Mode::LinesMarkers)
        .line(Line::new().color("red").width(3.0))
        .marker(Marker::new().size(10));

    let target = Scatter::new(categories(report), flat(report.target(), report))
        .name(&target_name(report))
        .mode(Mode::Lines)
        .line(Line::new().color("green").width(2.0).dash(DashType::Dash));

    let average = Scatter::new(categories(report), flat(report.mean(), report))
        .name(&format!(
            "{} Average ({})",
            dataset.period,
            money(report.mean())
        ))
        .mode(Mode::Lines)
        .line(Line::new().color("blue").width(2.0).dash(DashType::Dot));

    let mut plot = Plot::new();
    plot.add_trace(actual);
    plot.add_trace(target);
    plot.add_trace(average);
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(&title))
            .x_axis(Axis::new().title(Title::with_text("Quarter")))
            .y_axis(Axis::new().title(Title::with_text(&format!("{} ($)", dataset.metric))))
            .hover_mode(HoverMode::XUnified)
            .height(500),
    );

    page(&title, figure(&plot, "trend"))
}

pub fn gap_document(report: &Report, dataset: &Dataset) -> io::Result<String> {
    let title = format!(
        "{} Gap Analysis: Difference from Industry Target (${})",
        dataset.metric,
        report.target()
    );

    let labels = report
        .rows()
        .iter()
        .map(|r| money(r.gap))
        .collect::<Vec<String>>();

    let bars = Bar::new(categories(report), gaps(report))
        .name("Gap to Target ($)")
        .marker(Marker::new().color("red"))
        .text_array(labels)
        .text_position(TextPosition::Auto);

    let mut plot = Plot::new();
    plot.add_trace(bars);
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(&title))
            .x_axis(Axis::new().title(Title::with_text("Quarter")))
            .y_axis(Axis::new().title(Title::with_text("Gap to Target ($)")))
            .height(400),
    );

    page(&title, figure(&plot, "gap"))
}

pub fn key_metrics(report: &Report, dataset: &Dataset) -> Vec<(String, String)> {
    let last = report.last();

    vec![
        (format!("Average {}", dataset.metric), money(report.mean())),
        (
            format!("Target {}", dataset.metric),
            format!("${}", report.target()),
        ),
        (String::from("Gap"), money(report.aggregate_gap())),
        (
            String::from("% Above Target"),
            format!("{:.1}%", report.aggregate_pct_above_target()),
        ),
        (
            format!("{} {}", last.short_label(), dataset.metric),
            format!("${}", last.value),
        ),
    ]
}

fn panel_plot<T: plotly::Trace + 'static>(traces: Vec<Box<T>>) -> Plot {
    let mut plot = Plot::new();
    for trace in traces {
        plot.add_trace(trace);
    }
    plot.set_layout(Layout::new().show_legend(false).height(PANEL_HEIGHT));
    plot
}

pub fn dashboard_document(report: &Report, dataset: &Dataset) -> io::Result<String> {
    let title = format!(
        "{} Performance Dashboard - {}",
        dataset.metric, dataset.period
    );

    let trend = panel_plot(vec![
        Scatter::new(categories(report), values(report))
            .name(&dataset.metric)
            .mode(Mode::LinesMarkers)
            .line(Line::new().color("red")),
        Scatter::new(categories(report), flat(report.target(), report))
            .name("Target")
            .mode(Mode::Lines)
            .line(Line::new().color("green").dash(DashType::Dash)),
    ]);

    let gap = panel_plot(vec![Bar::new(categories(report), gaps(report))
        .name("Gap")
        .marker(Marker::new().color("red"))]);

    let pct = panel_plot(vec![Bar::new(
        categories(report),
        report
            .rows()
            .iter()
            .map(|r| round_to(r.pct_above_target, 2))
            .collect::<Vec<f64>>(),
    )
    .name("% Above Target")
    .marker(Marker::new().color("orange"))]);

    let metrics = key_metrics(report, dataset);

    let body = html! {
        h1 { (title) }
        div class="dashboard" {
            section class="panel" {
                h2 { "Quarterly " (dataset.metric) " Trend" }
                (figure(&trend, "dashboard-trend"))
            }
            section class="panel" {
                h2 { "Gap to Target" }
                (figure(&gap, "dashboard-gap"))
            }
            section class="panel" {
                h2 { "Percentage Above Target" }
                (figure(&pct, "dashboard-pct"))
            }
            section class="panel" {
                h2 { "Key Metrics" }
                table class="metrics" {
                    tr { th { "Metric" } th { "Value" } }
                    @for (name, value) in &metrics {
                        tr { td { (name) } td { (value) } }
                    }
                }
            }
        }
    };

    page(&title, body)
}

/// writes every chart document into `dir`, creating it if needed
pub fn write_all(report: &Report, dataset: &Dataset, dir: &Path) -> io::Result<Vec<(Artifact, PathBuf)>> {
    fs::create_dir_all(dir)?;

    let mut written = vec![];

    for artifact in Artifact::ALL {
        let path = artifact.path(dataset, dir);
        fs::write(&path, artifact.document(report, dataset)?)?;
        info!("wrote {} chart to {}", artifact, path.display());
        written.push((artifact, path));
    }

    Ok(written)
}
