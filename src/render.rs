//! Comparison rendering
//!
//! Turns a ranked store comparison into a terminal table, best store first,
//! with a savings line underneath. The incomplete state renders a plain
//! explanation instead of an empty table.

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::compare::Comparison;

/// Render a comparison as a table plus a savings summary.
#[must_use]
pub fn render_comparison(comparison: &Comparison) -> String {
    let Comparison::Ranked { results, savings } = comparison else {
        return "No single store can fulfil the whole cart.\n".to_owned();
    };

    let mut builder = Builder::default();
    builder.push_record(["Store", "Subtotal", "Discount", "Total"]);

    for totals in results {
        builder.push_record([
            totals.store.name().to_owned(),
            format!("$ {:.2}", totals.subtotal),
            format!("$ {:.2}", totals.discount),
            format!("$ {:.2}", totals.total),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..4), Alignment::right());

    let mut out = table.to_string();
    out.push('\n');
    out.push_str(&format!(
        "Best: {} at $ {:.2}",
        results
            .first()
            .map_or("-", |best| best.store.name()),
        results
            .first()
            .map_or(rust_decimal::Decimal::ZERO, |best| best.total),
    ));
    out.push('\n');
    out.push_str(&format!("Savings vs worst store: $ {savings:.2}\n"));
    out
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::stores::Store;
    use crate::totals::StoreTotals;

    fn totals(store: Store, total: i64) -> StoreTotals {
        StoreTotals {
            store,
            subtotal: Decimal::new(total, 0),
            discount: Decimal::ZERO,
            total: Decimal::new(total, 0),
            viable: true,
        }
    }

    #[test]
    fn ranked_output_lists_the_best_store_first() {
        let comparison = Comparison::Ranked {
            results: vec![totals(Store::Dia, 4200), totals(Store::Coto, 4800)],
            savings: Decimal::new(600, 0),
        };

        let out = render_comparison(&comparison);

        assert!(out.contains("DIA"));
        assert!(out.contains("COTO"));
        assert!(out.contains("Best: DIA at $ 4200.00"));
        assert!(out.contains("Savings vs worst store: $ 600.00"));
    }

    #[test]
    fn incomplete_renders_an_explanation() {
        let out = render_comparison(&Comparison::Incomplete);
        assert!(out.contains("No single store"));
    }
}
