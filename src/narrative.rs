use crate::report::{Report, Trend};
use crate::util::round_to;
use itertools::Itertools;
use unicode_width::UnicodeWidthStr;

const RULE_WIDTH: usize = 60;
const LEADER_WIDTH: usize = 30;

pub const RECOMMENDATIONS: [&str; 8] = [
    "Implement data-driven attribution modeling to identify highest-ROI marketing channels",
    "Optimize digital marketing spend allocation based on channel-specific CAC performance",
    "Deploy marketing automation and personalization to improve conversion rates",
    "Conduct comprehensive audit of underperforming marketing channels",
    "Establish real-time CAC monitoring dashboard with automated alerts",
    "Develop customer segmentation strategy for high-value, low-cost acquisition",
    "Launch A/B testing framework for continuous campaign optimization",
    "Negotiate better rates with marketing partners based on volume commitments",
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Unit {
    Money,
    Percent,
}

impl Unit {
    pub fn format(&self, value: f64) -> String {
        match self {
            Unit::Money => money(value),
            Unit::Percent => format!("{:.2}%", value),
        }
    }
}

pub fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value)
    }
}

pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{}\n{}\n{}", rule, title, rule)
}

pub fn verification(report: &Report, metric: &str) -> String {
    format!(
        "Verification - Average {}: {}\nTarget {}: ${}",
        metric,
        money(report.mean()),
        metric,
        report.target()
    )
}

/// the per-observation table, columns right aligned to their widest cell
pub fn performance_table(report: &Report, metric: &str) -> String {
    let header = vec![
        String::from("Quarter"),
        String::from(metric),
        String::from("Gap_to_Target"),
        String::from("Percentage_Above_Target"),
    ];

    let body = report
        .rows()
        .iter()
        .map(|row| {
            vec![
                row.label.clone(),
                format!("{:.2}", row.value),
                format!("{:.2}", row.gap),
                format!("{:.2}", round_to(row.pct_above_target, 2)),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let widths = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(body.iter())
                .map(|cells| cells[col].width())
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<usize>>();

    std::iter::once(&header)
        .chain(body.iter())
        .map(|cells| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{}{}", " ".repeat(width - cell.width()), cell))
                .join(" ")
        })
        .join("\n")
}

pub fn statistics(report: &Report, metric: &str) -> Vec<(String, f64, Unit)> {
    let mut stats = vec![
        (format!("Mean {}", metric), report.mean(), Unit::Money),
        (format!("Median {}", metric), report.median(), Unit::Money),
        (String::from("Standard Deviation"), report.std_dev(), Unit::Money),
        (format!("Min {}", metric), report.min(), Unit::Money),
        (format!("Max {}", metric), report.max(), Unit::Money),
        (String::from("Range"), report.range(), Unit::Money),
    ];

    if let Some(cv) = report.coefficient_of_variation() {
        stats.push((String::from("Coefficient of Variation"), cv, Unit::Percent));
    }

    stats.push((
        String::from("Total Gap from Target"),
        report.aggregate_gap(),
        Unit::Money,
    ));
    stats.push((
        String::from("Percentage Above Target"),
        report.aggregate_pct_above_target(),
        Unit::Percent,
    ));

    stats
}

pub fn statistics_listing(report: &Report, metric: &str) -> String {
    statistics(report, metric)
        .into_iter()
        .map(|(key, value, unit)| format!("{:.<width$} {}", key, unit.format(value), width = LEADER_WIDTH))
        .join("\n")
}

pub fn findings(report: &Report, metric: &str) -> Vec<String> {
    let gap = report.aggregate_gap();
    let pct = report.aggregate_pct_above_target();
    let (first, last) = (report.first(), report.last());
    let span = format!(
        "{} (${}) to {} (${})",
        first.short_label(),
        first.value,
        last.short_label(),
        last.value
    );

    let mut findings = vec![];

    if gap > 0.0 {
        findings.push(format!(
            "Average {} of {} is {} above industry target",
            metric,
            money(report.mean()),
            money(gap)
        ));
    } else if gap == 0.0 {
        findings.push(format!(
            "Average {} of {} is exactly at industry target",
            metric,
            money(report.mean())
        ));
    } else {
        findings.push(format!(
            "Average {} of {} is {} below industry target",
            metric,
            money(report.mean()),
            money(gap.abs())
        ));
    }

    findings.push(match report.trend() {
        trend @ (Trend::Rising | Trend::Falling) => {
            format!("Consistent {} trend from {}", trend, span)
        }
        Trend::Mixed => format!("Uneven movement from {}", span),
        Trend::Flat => format!("No change from {}", span),
    });

    if pct > 0.0 {
        findings.push(format!(
            "Company is paying {:.1}% premium over industry benchmark",
            pct
        ));
    } else if pct == 0.0 {
        findings.push(String::from(
            "Company is paying exactly the industry benchmark",
        ));
    } else {
        findings.push(format!(
            "Company is paying {:.1}% less than industry benchmark",
            pct.abs()
        ));
    }

    findings.push(String::from(match report.trend() {
        Trend::Rising => "Rising marketing costs indicate urgent need for channel optimization",
        Trend::Falling => "Falling acquisition costs show channel optimization taking effect",
        Trend::Flat | Trend::Mixed => {
            "Unsteady acquisition costs call for closer channel-level monitoring"
        }
    }));

    findings
}

pub fn solution_focus(report: &Report, metric: &str) -> Vec<String> {
    vec![
        String::from("- Priority: Reallocate budget to highest-performing channels"),
        format!(
            "- Target: Reduce {} to ${} industry benchmark",
            metric,
            report.target()
        ),
        format!(
            "- Potential Savings: {} per customer acquisition",
            money(report.aggregate_gap().max(0.0))
        ),
    ]
}

pub fn numbered<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.as_ref()))
        .join("\n")
}
