use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use tickerdash_core::dashboard::{DashboardView, LOADING_TEXT};
use tickerdash_core::{Icon, View};

use crate::cli::OutputFormat;
use crate::error::CliError;

const LABEL_WIDTH: usize = 14;

pub fn render(view: &View, format: OutputFormat) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_view(&mut out, view, format)
}

pub fn write_view<W: Write>(out: &mut W, view: &View, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = serde_json::to_string_pretty(view)?;
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => write_table(out, view)?,
    }
    out.flush()?;
    Ok(())
}

pub fn write_table<W: Write>(out: &mut W, view: &View) -> io::Result<()> {
    match view {
        View::Error { message } => writeln!(out, "{}", message.white().on_red().bold()),
        View::Loading => writeln!(out, "{LOADING_TEXT}"),
        View::Dashboard(dashboard) => write_dashboard(out, dashboard),
    }
}

fn write_dashboard<W: Write>(out: &mut W, view: &DashboardView) -> io::Result<()> {
    writeln!(out, "{}", view.header.bold())?;
    if view.chart.points.is_empty() {
        writeln!(out, "  (no price history)")?;
    } else {
        writeln!(out, "  {}", view.chart.sparkline.green())?;
        if let (Some(first), Some(last)) = (view.chart.points.first(), view.chart.points.last()) {
            writeln!(
                out,
                "  {} {:.2} .. {} {:.2} ({} points)",
                first.label,
                first.value,
                last.label,
                last.value,
                view.chart.points.len()
            )?;
        }
    }
    writeln!(out)?;

    for stat in &view.key_stats {
        writeln!(out, "  {:<LABEL_WIDTH$}{}", stat.label.dimmed(), stat.value)?;
    }
    writeln!(out)?;

    writeln!(out, "{}", view.news.heading.bold())?;
    if let Some(message) = view.news.empty_message {
        writeln!(out, "  {}", message.dimmed())?;
    }
    for card in &view.news.articles {
        writeln!(out, "  {}", card.title)?;
        writeln!(
            out,
            "    {} | {} {} | {}",
            card.publisher.dimmed(),
            paint(card.icon, &card.sentiment_label),
            paint(card.icon, icon_glyph(card.icon)),
            card.published.dimmed()
        )?;
    }
    writeln!(out)?;

    let overview = &view.overview;
    writeln!(out, "{}", overview.heading.bold())?;
    writeln!(out, "  {}", overview.name)?;
    writeln!(out, "  {}", overview.classification.dimmed())?;
    writeln!(
        out,
        "  {}  {} {}",
        overview.price.bold(),
        paint(overview.trend, &overview.change),
        paint(overview.trend, icon_glyph(overview.trend))
    )?;
    writeln!(out)?;

    let about = &view.about;
    writeln!(out, "{}", about.heading.bold())?;
    for (label, value) in [
        ("Description", &about.description),
        ("Website", &about.website),
        ("Headquarters", &about.headquarters),
        ("Employees", &about.employees),
        ("Founded", &about.founded),
        ("CEO", &about.ceo),
        ("Exchange", &about.exchange),
    ] {
        writeln!(out, "  {:<LABEL_WIDTH$}{}", label.dimmed(), value)?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "{} {} {}",
        "Sentiment".bold(),
        paint(view.sentiment.icon, &view.sentiment.label),
        paint(view.sentiment.icon, icon_glyph(view.sentiment.icon))
    )
}

const fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Up => "▲",
        Icon::Down => "▼",
        Icon::Dash => "-",
    }
}

fn paint(icon: Icon, text: &str) -> ColoredString {
    match icon {
        Icon::Up => text.green(),
        Icon::Down => text.red(),
        Icon::Dash => text.yellow(),
    }
}
