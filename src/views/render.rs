//! Terminal rendering of list and detail views.

use console::style;

use crate::form::ValidationErrors;
use crate::model::Entity;

use super::{DetailView, ListView, Listable};

/// Column-aligned table of the list's rows, with a footer naming the page.
pub fn list_table<E: Listable>(list: &ListView<E>) -> String {
    let mut out = format!("{}\n", style(list.title()).bold());
    if list.no_result() {
        out.push_str(&format!("{}\n", style(format!("No {} found", E::TITLE)).dim()));
        return out;
    }

    let rows: Vec<Vec<(&'static str, String)>> = list.items().iter().map(Entity::fields).collect();
    let headers: Vec<&'static str> = rows
        .first()
        .map(|r| r.iter().map(|(label, _)| *label).collect())
        .unwrap_or_default();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|r| r[i].1.chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<w$}", h, w = *w))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&format!("{}\n", style(header_line.trim_end()).cyan()));

    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|((_, value), w)| format!("{:<w$}", value, w = *w))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let shown = list.items().len();
    let footer = match list.total_count() {
        Some(total) => format!("page {} · {} of {} shown", list.request().page, shown, total),
        None => format!("page {} · {} shown", list.request().page, shown),
    };
    out.push_str(&format!("{}\n", style(footer).dim()));
    out
}

pub fn detail<E: Listable>(view: &DetailView<E>) -> String {
    let fields = view.fields();
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut out = format!("{}\n", style(view.title()).bold());
    for (label, value) in fields {
        out.push_str(&format!(
            "  {}  {}\n",
            style(format!("{:<w$}", label, w = width)).dim(),
            value
        ));
    }
    out
}

/// One line per violated constraint.
pub fn validation_errors(errors: &ValidationErrors) -> String {
    let mut out = String::new();
    for (field, field_errors) in errors.fields() {
        for error in field_errors {
            out.push_str(&format!("  {} {}: {}\n", style("✗").red(), field, error));
        }
    }
    out
}
