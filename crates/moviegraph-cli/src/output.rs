//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use moviegraph_graph::queries::stats::{GraphStats, IntegrityReport};
use moviegraph_graph::{LoadSummary, Table};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the dash rules around each report title.
const RULE_WIDTH: usize = 50;

/// Narrowest a column is squeezed to when the table is wider than the terminal.
const MIN_COLUMN_WIDTH: usize = 8;

/// Get terminal width, if stdout is a terminal.
fn term_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Center a plain string within a given visual width.
fn pad_center(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        return s.to_string();
    }
    let left = (width - visual) / 2;
    let right = width - visual - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// Visual width of each column: the widest of header and cells.
fn column_widths(table: &Table) -> Vec<usize> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| UnicodeWidthStr::width(cell.as_str()))
                .chain(std::iter::once(UnicodeWidthStr::width(header.as_str())))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Shrink the widest columns until the rendered table fits in `max_width`.
fn fit_widths(widths: &mut [usize], max_width: usize) {
    // Each column costs its width plus "| " and " ", plus the closing "|".
    let total = |w: &[usize]| w.iter().map(|c| c + 3).sum::<usize>() + 1;
    while total(widths) > max_width {
        let Some((idx, widest)) = widths.iter().copied().enumerate().max_by_key(|(_, w)| *w) else {
            return;
        };
        if widest <= MIN_COLUMN_WIDTH {
            return;
        }
        widths[idx] = widest - 1;
    }
}

fn border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line
}

fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.parse::<i64>().is_ok()
}

/// Render a table with a bordered header and no row indices.
///
/// Headers are centered, integers right-aligned, everything else
/// left-aligned. With `max_width` set, long cells are truncated to fit.
pub fn render_table(table: &Table, max_width: Option<usize>) -> String {
    let mut widths = column_widths(table);
    if let Some(max) = max_width {
        fit_widths(&mut widths, max);
    }

    let rule = border(&widths);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');

    out.push('|');
    for (header, w) in table.columns.iter().zip(&widths) {
        out.push_str(&format!(" {} |", pad_center(&truncate_visual(header, *w), *w)));
    }
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for row in &table.rows {
        out.push('|');
        for (i, w) in widths.iter().enumerate() {
            let cell = truncate_visual(row.get(i).map(String::as_str).unwrap_or(""), *w);
            let padded = if is_numeric(&cell) {
                format!("{:>width$}", cell, width = *w)
            } else {
                pad_right(&cell, *w)
            };
            out.push_str(&format!(" {} |", padded));
        }
        out.push('\n');
    }

    out.push_str(&rule);
    out
}

/// Marker printed in place of a table when a report has no rows.
pub const NO_DATA: &str = "No data found";

/// Render one report as a titled section framed by dash rules. Empty
/// results get the [`NO_DATA`] marker instead of a table.
pub fn render_section(table: &Table, max_width: Option<usize>) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let body = if table.is_empty() {
        NO_DATA.dimmed().to_string()
    } else {
        render_table(table, max_width)
    };
    format!(
        "\n{rule}\n{title}\n{rule}\n{body}\n",
        rule = rule.dimmed(),
        title = format!("{}:", table.title).cyan().bold(),
        body = body,
    )
}

pub fn print_table_section(table: &Table) {
    println!("{}", render_section(table, term_width()));
}

/// Headline printed after a load: green only when every pair matched and the
/// counts agree with the dataset.
pub fn load_headline(summary: &LoadSummary, integrity: &IntegrityReport) -> ColoredString {
    if summary.unmatched() == 0 && integrity.is_ok() {
        "Knowledge graph created successfully!".green().bold()
    } else {
        "Knowledge graph created with warnings, see below.".yellow().bold()
    }
}

/// Print per-table totals of a load.
pub fn print_load_summary(summary: &LoadSummary) {
    println!("{}", "─".repeat(40).dimmed());
    for result in &summary.nodes {
        println!("  {:<22} {}", format!("{} nodes", result.kind), result.written.to_string().cyan());
    }
    for result in &summary.relationships {
        let mut count = result.created.to_string().cyan().to_string();
        if result.existing > 0 {
            count.push_str(&format!(" ({} already present)", result.existing).dimmed().to_string());
        }
        if result.unmatched > 0 {
            println!(
                "  {:<22} {} {}",
                result.kind.rel_type(),
                count,
                format!("({} unmatched)", result.unmatched).yellow()
            );
        } else {
            println!("  {:<22} {}", result.kind.rel_type(), count);
        }
    }
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "  Nodes written: {}  Relationships created: {}",
        summary.nodes_written().to_string().bold(),
        summary.relationships_created().to_string().bold()
    );
    if summary.unmatched() > 0 {
        println!(
            "  {} {} relationship pair(s) referenced missing nodes",
            "!".yellow().bold(),
            summary.unmatched()
        );
    }
}

/// Print node and relationship counts.
pub fn print_stats(stats: &GraphStats) {
    println!("{}", "Knowledge Graph Status".bold());
    println!("{}", "─".repeat(40));
    println!("  Nodes:         {}", stats.totals.nodes.to_string().cyan());
    println!("  Relationships: {}", stats.totals.relationships.to_string().cyan());
    println!();
    for (kind, count) in &stats.nodes {
        println!("  {:<14} {}", format!("{}:", kind), count);
    }
    for (kind, count) in &stats.relationships {
        println!("  {:<14} {}", format!("{}:", kind), count);
    }
    println!("{}", "─".repeat(40));
}

/// Print the outcome of an integrity check.
pub fn print_integrity(report: &IntegrityReport) {
    if report.is_ok() {
        println!("  {} Node and relationship counts match the dataset", "✓".green().bold());
        return;
    }
    println!("  {} Integrity check found differences:", "!".yellow().bold());
    for m in &report.mismatches {
        println!(
            "    {} expected {}, found {}",
            m.subject,
            m.expected.to_string().green(),
            m.actual.to_string().red()
        );
    }
}
