//! Banner compositor.
//!
//! Lays the report out next to a fixed 7-row piece of ASCII art. The hostname
//! block sits above the art on blank rows; each selected metric then takes the
//! next art row, and leftover art rows are printed bare so the picture is
//! always complete.

use crate::mask::MetricMask;
use crate::metrics::{hostname_lines, MetricsProvider};
use kfetch_hal::HostInfoOps;

pub const BANNER_ROWS: usize = 7;
pub const BANNER_WIDTH: usize = 19;

pub const BANNER: [&str; BANNER_ROWS] = [
    r"        .-.        ",
    r"       (.. |       ",
    r"       <>  |       ",
    r"      / --- \      ",
    r"     ( |   | |     ",
    r"   |\\_)___/\)/\   ",
    r"  <__)------(__/   ",
];

/// Banner-width padding used in front of the hostname block.
pub const BLANK_ROW: &str = "                   ";

/// Joins the hostname block and metric blocks with the art.
///
/// `metric_blocks` are in emission order; `None` marks a selected metric whose
/// text could not be produced, which still takes its art row. Blocks past the
/// last art row are appended without art rather than dropped.
pub fn compose<S: AsRef<str>>(hostname_lines: &[S], metric_blocks: &[Option<String>]) -> String {
    let mut out = String::new();
    for line in hostname_lines {
        out.push_str(BLANK_ROW);
        out.push_str(line.as_ref());
    }

    let mut rows = BANNER.iter();
    for block in metric_blocks {
        let row = rows.next();
        if let Some(row) = row {
            out.push_str(row);
        }
        match block {
            Some(text) => out.push_str(text),
            None if row.is_some() => out.push('\n'),
            None => {}
        }
    }

    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}

/// Queries `hal` for every metric in `mask` and composes the report.
pub fn render<H: HostInfoOps + ?Sized>(hal: &H, mask: MetricMask) -> String {
    let provider = MetricsProvider::new(hal);
    let hostname = provider.hostname();
    let blocks: Vec<Option<String>> = mask.iter().map(|metric| provider.line(metric)).collect();
    compose(&hostname_lines(&hostname), &blocks)
}
