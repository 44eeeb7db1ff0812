pub mod compare;
pub mod console;
pub mod table;
pub mod writer;

pub use compare::{RatingComparison, RatingDelta};
pub use table::{build_report, Cell, ReportTable};
pub use writer::{write_report, write_table};
