//! Plain-text rendering for the console.

use std::fmt::Write as _;

use client_core::{ModalPayload, PageWindow};
use shared::domain::{CustomerRecord, OptionRef};

const HEADERS: [&str; 9] = [
    "ID",
    "Full Name",
    "Email",
    "Country",
    "State",
    "City",
    "Languages",
    "Active",
    "Created Date",
];

fn row_cells(customer: &CustomerRecord) -> [String; 9] {
    let created = customer
        .created_at()
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| customer.created_date.clone());
    [
        customer.id.to_string(),
        customer.full_name.clone(),
        customer.email.clone(),
        customer.country.name.clone(),
        customer.state.name.clone(),
        customer.city.name.clone(),
        customer.language_names(),
        if customer.is_active { "Yes" } else { "No" }.to_string(),
        created,
    ]
}

/// Renders `rows` under a header line, padding each column to its widest cell.
pub fn customer_table(rows: &[CustomerRecord]) -> String {
    let cells: Vec<[String; 9]> = rows.iter().map(row_cells).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS.iter().copied(), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    if cells.is_empty() {
        out.push_str("(no customers on this page)\n");
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 9]) {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// `Pages: 1 [2] 3`. The current page is bracketed even when it is past
/// the last page.
pub fn page_selector(window: &PageWindow) -> String {
    let mut out = String::from("Pages:");
    for page in window.page_numbers() {
        if window.is_current(page) {
            let _ = write!(out, " [{page}]");
        } else {
            let _ = write!(out, " {page}");
        }
    }
    if window.current_page() > window.total_pages() {
        let _ = write!(out, " (page {} is empty)", window.current_page());
    }
    out
}

pub fn options(list: &[OptionRef]) -> String {
    list.iter()
        .map(|opt| format!("{}\t{}\n", opt.value, opt.label))
        .collect()
}

pub fn removal_prompt(payload: &ModalPayload) -> Option<String> {
    match payload {
        ModalPayload::RemoveUser {
            customer_id,
            full_name,
        } => Some(format!(
            "Remove customer '{full_name}' ({customer_id})? Re-run with --yes to confirm."
        )),
        ModalPayload::CreateUser(_) => None,
    }
}
