use tui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Span, Spans},
    widgets::{
        Axis, BarChart, Block, Borders, Chart, Dataset as Series, GraphType, Paragraph, Row,
        Table, Widget,
    },
};

use crate::dataset::Dataset;
use crate::render::key_metrics;
use crate::report::Report;

const HORIZONTAL_MARGIN: u16 = 2;

/// terminal rendition of the performance dashboard
pub struct Dashboard<'a> {
    pub report: &'a Report,
    pub dataset: &'a Dataset,
}

impl<'a> Dashboard<'a> {
    pub fn new(report: &'a Report, dataset: &'a Dataset) -> Self {
        Self { report, dataset }
    }

    fn coords(&self, value: impl Fn(usize) -> f64) -> Vec<(f64, f64)> {
        (0..self.report.rows().len())
            .map(|idx| ((idx + 1) as f64, value(idx)))
            .collect()
    }

    fn y_bounds(&self) -> [f64; 2] {
        let lo = self.report.min().min(self.report.target());
        let hi = self.report.max().max(self.report.target());
        let pad = ((hi - lo) * 0.05).max(1.0);

        [lo - pad, hi + pad]
    }

    fn x_bounds(&self) -> [f64; 2] {
        match self.report.rows().len() {
            1 => [0.5, 1.5],
            n => [1.0, n as f64],
        }
    }
}

impl Widget for &Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let report = self.report;
        let metric = self.dataset.metric.as_str();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(1),
                    Constraint::Percentage(50),
                    Constraint::Min(8),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
            .split(rows[1]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
            .split(rows[2]);

        Paragraph::new(Span::styled(
            format!("{} Performance Dashboard - {}", metric, self.dataset.period),
            bold,
        ))
        .alignment(Alignment::Center)
        .render(rows[0], buf);

        let actual = self.coords(|idx| report.rows()[idx].value);
        let target = self.coords(|_| report.target());
        let average = self.coords(|_| report.mean());

        let datasets = vec![
            Series::default()
                .name(metric)
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(Color::Red))
                .graph_type(GraphType::Line)
                .data(&actual),
            Series::default()
                .name("target")
                .marker(symbols::Marker::Dot)
                .style(Style::default().fg(Color::Green))
                .graph_type(GraphType::Line)
                .data(&target),
            Series::default()
                .name("average")
                .marker(symbols::Marker::Dot)
                .style(Style::default().fg(Color::Blue))
                .graph_type(GraphType::Line)
                .data(&average),
        ];

        let [y_lo, y_hi] = self.y_bounds();

        Chart::new(datasets)
            .block(
                Block::default()
                    .title(format!("Quarterly {} Trend", metric))
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .title("quarter")
                    .style(Style::default().fg(Color::Gray))
                    .bounds(self.x_bounds())
                    .labels(vec![
                        Span::styled(report.first().label.clone(), bold),
                        Span::styled(report.last().label.clone(), bold),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(format!("{} ($)", metric))
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y_lo, y_hi])
                    .labels(vec![
                        Span::styled(format!("{:.0}", y_lo), bold),
                        Span::styled(format!("{:.0}", y_hi), bold),
                    ]),
            )
            .render(top[0], buf);

        let metrics = key_metrics(report, self.dataset);

        Table::new(
            metrics
                .into_iter()
                .map(|(name, value)| Row::new(vec![name, value])),
        )
        .header(Row::new(vec!["Metric", "Value"]).style(bold.fg(Color::LightBlue)))
        .block(Block::default().title("Key Metrics").borders(Borders::ALL))
        .widths(&[Constraint::Percentage(55), Constraint::Percentage(45)])
        .render(top[1], buf);

        // bar values are whole dollars, clamped at zero
        let labels = report.labels();
        let gaps = labels
            .iter()
            .zip(report.rows())
            .map(|(label, row)| (*label, row.gap.max(0.0).round() as u64))
            .collect::<Vec<(&str, u64)>>();

        let bar_width = match report.rows().len() as u16 {
            0 => 1,
            n => ((bottom[0].width.saturating_sub(2)) / n).saturating_sub(2).clamp(1, 12),
        };

        BarChart::default()
            .block(Block::default().title("Gap to Target").borders(Borders::ALL))
            .data(&gaps)
            .bar_width(bar_width)
            .bar_gap(2)
            .bar_style(Style::default().fg(Color::Red))
            .value_style(bold.bg(Color::Red))
            .render(bottom[0], buf);

        let trend = Paragraph::new(vec![
            Spans::from(Span::styled(
                format!("{} trend", report.trend()),
                bold,
            )),
            Spans::from(format!("median   ${:.2}", report.median())),
            Spans::from(format!("std dev  ${:.2}", report.std_dev())),
            Spans::from(format!("range    ${:.2}", report.range())),
        ])
        .block(Block::default().title("Spread").borders(Borders::ALL));

        trend.render(bottom[1], buf);

        Paragraph::new(Span::styled(
            String::from("(o)pen in browser / (q)uit"),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(rows[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(width: u16, height: u16) -> String {
        let dataset = Dataset::default();
        let report = Report::compute(&dataset.observations, dataset.target).unwrap();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);

        (&Dashboard::new(&report, &dataset)).render(area, &mut buf);

        buf.content.iter().map(|cell| cell.symbol.as_str()).collect()
    }

    #[test]
    fn test_dashboard_renders_panels() {
        let screen = rendered(120, 40);

        assert!(screen.contains("CAC Performance Dashboard - 2024"));
        assert!(screen.contains("Quarterly CAC Trend"));
        assert!(screen.contains("Key Metrics"));
        assert!(screen.contains("Gap to Target"));
        assert!(screen.contains("Average CAC"));
        assert!(screen.contains("$230.88"));
        assert!(screen.contains("upward trend"));
        assert!(screen.contains("(q)uit"));
    }

    #[test]
    fn test_y_bounds_cover_target() {
        let dataset = Dataset::default();
        let report = Report::compute(&dataset.observations, dataset.target).unwrap();
        let [lo, hi] = Dashboard::new(&report, &dataset).y_bounds();

        assert!(lo < 150.0);
        assert!(hi > 234.71);
    }
}
