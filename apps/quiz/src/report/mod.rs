// Report generation: static per-type narrative table + builder.

pub mod builder;
pub mod table;

pub use builder::{
    splits_from_summary, DimensionLine, DimensionSplit, ReportBuilder, ReportContext, DISCLAIMER,
};
pub use table::{TypeReport, TypeReportTable};
