//! Display formatting for terminal output
//!
//! Every report knows how to render itself as text through [`TerminalView`];
//! tables are drawn with `tabled`.

pub mod budget;
pub mod format;
pub mod summary;

use std::ops::Range;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

pub use format::{format_bar, format_percentage, separator, truncate, DisplayOptions};

/// Terminal rendering of a report
pub trait TerminalView {
    fn format_terminal(&self, opts: &DisplayOptions) -> String;
}

/// Width of progress bars and separators
pub const BAR_WIDTH: usize = 30;

/// Render rows as a rounded table, right-aligning the `numeric` columns
pub(crate) fn render_table<R: Tabled>(rows: Vec<R>, numeric: Range<usize>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.modify(Columns::new(numeric), Alignment::right());
    table.to_string()
}
