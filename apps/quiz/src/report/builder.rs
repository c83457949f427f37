//! Report Builder: turns a type code plus per-dimension splits into a report.
//!
//! Two outputs share one lookup:
//! - `build_report_context` → structured `ReportContext` (for templates / JSON)
//! - `build_report` → Markdown text
//!
//! A type code with no table entry still produces a report with generic text.
//! Boundary notes are the caller's decision (see `quiz::scoring::boundary_notes`)
//! and are passed through untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Dimension, DimensionResult, ScoreSummary};
use crate::report::table::{TypeReport, TypeReportTable};

pub const DEFAULT_TITLE: &str = "Type Analysis";
pub const DEFAULT_SUMMARY: &str =
    "This is a personality preference profile based on the tendencies in your answers.";
pub const DISCLAIMER: &str = "This quiz is for self-reflection and entertainment only. \
It is not a professional psychological assessment or diagnosis.";

// ────────────────────────────────────────────────────────────────────────────
// Input / output models
// ────────────────────────────────────────────────────────────────────────────

/// Loosely-populated split for one dimension. A dimension is only reported
/// when all four fields are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSplit {
    #[serde(default)]
    pub first_pole: Option<char>,
    #[serde(default)]
    pub second_pole: Option<char>,
    #[serde(default)]
    pub first_percent: Option<u8>,
    #[serde(default)]
    pub second_percent: Option<u8>,
}

impl DimensionSplit {
    fn complete(&self) -> Option<(char, char, u8, u8)> {
        Some((
            self.first_pole?,
            self.second_pole?,
            self.first_percent?,
            self.second_percent?,
        ))
    }
}

impl From<&DimensionResult> for DimensionSplit {
    fn from(r: &DimensionResult) -> Self {
        Self {
            first_pole: Some(r.first_pole),
            second_pole: Some(r.second_pole),
            first_percent: Some(r.first_percent),
            second_percent: Some(r.second_percent),
        }
    }
}

/// Splits for every dimension of a scored attempt.
pub fn splits_from_summary(summary: &ScoreSummary) -> BTreeMap<Dimension, DimensionSplit> {
    summary
        .dimensions
        .iter()
        .map(|r| (r.dimension, DimensionSplit::from(r)))
        .collect()
}

/// Normalized per-dimension record in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionLine {
    pub dimension: Dimension,
    pub first_pole: char,
    pub second_pole: char,
    pub first_percent: u8,
    pub second_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportContext {
    pub type_code: String,
    pub title: String,
    pub summary: String,
    pub dimensions: Vec<DimensionLine>,
    pub boundary_notes: Vec<String>,
    pub strengths: Vec<String>,
    pub blind_spots: Vec<String>,
    pub advice: Vec<String>,
    pub suitable: Vec<String>,
    pub disclaimer: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ReportBuilder {
    table: TypeReportTable,
}

impl ReportBuilder {
    pub fn new(table: TypeReportTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TypeReportTable {
        &self.table
    }

    fn lookup(&self, type_code: &str) -> TypeReport {
        match self.table.get(type_code) {
            Some(entry) => entry.clone(),
            None => {
                warn!(%type_code, "No report entry for type code; using generic text");
                TypeReport::default()
            }
        }
    }

    pub fn build_report_context(
        &self,
        type_code: &str,
        dimensions: &BTreeMap<Dimension, DimensionSplit>,
        boundary_notes: &[String],
    ) -> ReportContext {
        let info = self.lookup(type_code);

        ReportContext {
            type_code: type_code.to_string(),
            title: info.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            summary: info.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            dimensions: dimension_lines(dimensions),
            boundary_notes: boundary_notes.to_vec(),
            strengths: info.strengths,
            blind_spots: info.blind_spots,
            advice: info.advice,
            suitable: info.suitable,
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Markdown rendering. Dimensions with incomplete data are listed as such
    /// rather than omitted.
    pub fn build_report(
        &self,
        type_code: &str,
        dimensions: &BTreeMap<Dimension, DimensionSplit>,
        boundary_notes: &[String],
    ) -> String {
        let ctx = self.build_report_context(type_code, dimensions, boundary_notes);

        let mut lines: Vec<String> = Vec::new();
        lines.push(format!("# Your type: {} ({})", ctx.type_code, ctx.title));
        lines.push(String::new());
        lines.push("## Overview".to_string());
        lines.push(ctx.summary.clone());
        lines.push(String::new());

        lines.push("## Dimension tendencies".to_string());
        for (dim, split) in dimensions {
            lines.push(format_dimension_line(*dim, split));
        }
        lines.push(String::new());

        if !ctx.boundary_notes.is_empty() {
            push_section(&mut lines, "Boundary notes", &ctx.boundary_notes);
        }
        push_section(&mut lines, "Strengths", &ctx.strengths);
        push_section(&mut lines, "Blind spots", &ctx.blind_spots);
        push_section(&mut lines, "Advice", &ctx.advice);
        push_section(&mut lines, "Suitable directions", &ctx.suitable);

        lines.push("## Disclaimer".to_string());
        lines.push(ctx.disclaimer);
        lines.push(String::new());
        lines.join("\n")
    }
}

fn dimension_lines(dimensions: &BTreeMap<Dimension, DimensionSplit>) -> Vec<DimensionLine> {
    dimensions
        .iter()
        .filter_map(|(dim, split)| {
            let (first_pole, second_pole, first_percent, second_percent) = split.complete()?;
            Some(DimensionLine {
                dimension: *dim,
                first_pole,
                second_pole,
                first_percent,
                second_percent,
            })
        })
        .collect()
}

fn format_dimension_line(dim: Dimension, split: &DimensionSplit) -> String {
    match split.complete() {
        Some((first, second, fp, sp)) => {
            let stronger = if sp > fp { second } else { first };
            format!("- {dim}: leans {stronger} ({}%)", fp.max(sp))
        }
        None => format!("- {dim}: insufficient data"),
    }
}

fn push_section(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    lines.push(format!("## {heading}"));
    for item in items {
        lines.push(format!("- {item}"));
    }
    lines.push(String::new());
}
