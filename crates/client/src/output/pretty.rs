//! Pretty output formatting.

use caseco_core::content::{NavSection, TableRecord};
use caseco_core::site::{DownloadsPage, HomePage};
use caseco_core::ui::{LinkKind, TopNav};

/// Format records as an aligned table under a `TITLE (count)` header.
pub fn format_table<R: TableRecord>(title: &str, columns: &[&str], records: &[R]) -> String {
    if records.is_empty() {
        return format!("No {title} found.");
    }

    let rows: Vec<Vec<String>> = records.iter().map(R::row).collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut output = format!("{} ({})\n", title.to_uppercase(), records.len());
    output.push_str(&line(columns.iter().copied(), &widths));
    output.push('\n');
    output.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in &rows {
        output.push('\n');
        output.push_str(&line(row.iter().map(String::as_str), &widths));
    }
    output
}

/// Format one record as `Column: value` lines under its key.
pub fn format_record<R: TableRecord>(columns: &[&str], record: &R) -> String {
    let mut output = format!("{} [{}]", record.label(), record.key());
    for (column, value) in columns.iter().zip(record.row()) {
        if !value.is_empty() {
            output.push_str(&format!("\n  {column}: {value}"));
        }
    }
    output
}

/// Format the public downloads page, one section per category.
pub fn format_downloads(page: &DownloadsPage<'_>) -> String {
    let mut output = String::new();
    for section in page.sections() {
        output.push_str(&format!("{}\n", section.title.to_uppercase()));
        for entry in &section.entries {
            let marker = if entry.is_external { " (external)" } else { "" };
            output.push_str(&format!("  {}{}\n    {}\n", entry.title, marker, entry.href));
        }
    }
    output.trim_end().to_string()
}

/// Format the top navigation bar, marking how each link opens.
pub fn format_top_nav(nav: &TopNav<'_>) -> String {
    nav.entries()
        .iter()
        .map(|entry| {
            let kind = match entry.kind {
                LinkKind::Internal => "route",
                LinkKind::External => "new tab",
                LinkKind::Mailto => "mail",
            };
            format!("{:<24} {} ({kind})", entry.title, entry.href)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the side navigation sections with their subitems.
pub fn format_side_nav(sections: &[NavSection]) -> String {
    let mut output = String::new();
    for section in sections {
        output.push_str(&format!("{}\n", section.section.to_uppercase()));
        for item in &section.items {
            output.push_str(&format!("  {}", item.title));
            if let Some(target) = item.target() {
                output.push_str(&format!(" -> {target}"));
            }
            output.push('\n');
            for sub in &item.subitems {
                output.push_str(&format!("    {} -> {}\n", sub.title, sub.target().unwrap_or("-")));
            }
        }
    }
    output.trim_end().to_string()
}

/// Format the home page: each manufacturer with its first carousel page.
pub fn format_home(page: &HomePage<'_>) -> String {
    let mut output = String::new();
    for section in page.sections() {
        let carousel = &section.carousel;
        output.push_str(&format!(
            "{} ({} products, {} per page, {} pages)\n",
            section.manufacturer.name,
            carousel.item_count(),
            carousel.per_page(),
            carousel.page_count()
        ));
        for product in &section.manufacturer.products[carousel.visible_range()] {
            output.push_str(&format!("  {}\n", product.name));
        }
    }
    output.trim_end().to_string()
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
