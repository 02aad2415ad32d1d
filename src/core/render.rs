//! Fixed-width text listings for categories, partitions and offers.
//!
//! Everything here is a pure function of its arguments; the shell decides where
//! the text goes.

use crate::domain::model::{Category, DisplaySettings, Offer, Partition};
use std::fmt::Write;

/// Pads or truncates `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

fn option_line(index: usize, name: &str, price: u64, display: &DisplaySettings) -> String {
    format!(
        "\t{}. {}{:>pw$} {}\n",
        index,
        fit(name, display.name_width),
        price,
        display.currency,
        pw = display.price_width
    )
}

pub fn render_category(category: &Category, display: &DisplaySettings) -> String {
    let mut out = String::new();
    out.push_str(&category.name);
    out.push_str("\n\n");

    for (index, option) in category.options.iter().enumerate() {
        out.push_str(&option_line(index, &option.name, option.price, display));
    }

    out.push('\n');
    out
}

pub fn render_partition(
    partition: Partition,
    categories: &[Category],
    display: &DisplaySettings,
) -> String {
    let mut out = format!("---- {} ----\n\n", partition.title());
    for category in categories {
        out.push_str(&render_category(category, display));
    }
    out
}

pub fn render_offer(offer: &Offer, display: &DisplaySettings) -> String {
    let mut out = String::new();
    let w = display.name_width;
    let pw = display.price_width;

    // 寫入 String 不會失敗
    let _ = writeln!(out, "Offer for customer type: {}", offer.customer_type);
    let _ = writeln!(out, "Created: {}", offer.created_at.format("%Y-%m-%d %H:%M:%S"));
    out.push('\n');

    for partition in Partition::ALL {
        let lines: Vec<_> = offer.lines.iter().filter(|l| l.partition == partition).collect();
        if lines.is_empty() {
            continue;
        }

        let _ = writeln!(out, "---- {} ----\n", partition.title());
        for line in lines {
            let _ = writeln!(
                out,
                "\t{} {}{:>pw$} {}",
                fit(&line.category, w),
                fit(&line.option_name, w),
                line.price,
                display.currency,
                pw = pw
            );
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "\t{} {:>pw$} {}",
        fit("Total", w * 2),
        offer.total,
        display.currency,
        pw = pw
    );
    out
}
