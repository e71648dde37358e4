//! # Datasheet Generation
//!
//! Renders a one-run column datasheet to Typst source and compiles it to PDF.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via `{{PLACEHOLDER}}` replacement before compilation
//! - Rows that depend on the run (trays vs packing, adjustments) are built in Rust
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use reflux_core::calculations::distillation::{design_from_normalized, normalize, DesignInputs};
//! use reflux_core::pdf::{render_datasheet_pdf, DatasheetMeta};
//!
//! let normalized = normalize(&DesignInputs::default());
//! let result = design_from_normalized(&normalized);
//! let meta = DatasheetMeta::new("25-014", "A. Process");
//!
//! let pdf_bytes = render_datasheet_pdf(&normalized, &result, &meta).unwrap();
//! std::fs::write("column_datasheet.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::distillation::{DesignResult, NormalizedInputs};
use crate::equations::registry::generate_static_equations_appendix_typst;
use crate::errors::{CalcError, CalcResult};

/// Codes and standards note printed on every datasheet
pub const CODES_AND_STANDARDS: &str = "ASME Sec VIII Div.1, ASME B31.3, TEMA, API 520/521, ISA 5.1, \
IEC 60079 / NEC, NACE MR0175/ISO 15156, ASME BPE (pharma).";

/// Diagonal watermark text
pub const WATERMARK: &str = "engineeringdrawing.io";

/// Printed in place of an unavailable value
pub const UNAVAILABLE: &str = "—";

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Fonts bundled with typst-assets (text, mono and math)
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Datasheet metadata
// ============================================================================

/// Title-block data for a datasheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasheetMeta {
    pub job_id: String,
    pub engineer: String,
    /// Issue date, `YYYY-MM-DD`
    pub date: String,
}

impl DatasheetMeta {
    /// Metadata dated today (UTC)
    pub fn new(job_id: impl Into<String>, engineer: impl Into<String>) -> Self {
        DatasheetMeta {
            job_id: job_id.into(),
            engineer: engineer.into(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

impl Default for DatasheetMeta {
    fn default() -> Self {
        DatasheetMeta::new("", "")
    }
}

// ============================================================================
// Datasheet template
// ============================================================================

const DATASHEET_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  background: rotate(-35deg)[
    #text(size: 54pt, fill: luma(235), weight: "bold")[{{WATERMARK}}]
  ],
  header: align(right)[
    #text(size: 9pt, fill: gray)[Distillation Column Datasheet]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: {{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 10pt)

// Title Block
#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Distillation Column Datasheet]
    #v(4pt)
    #text(size: 13pt)[{{SYSTEM}} #sym.dot.c {{INTERNALS}}]
  ]
]

#v(8pt)

#table(
  columns: (auto, 1fr, auto, 1fr),
  stroke: none,
  row-gutter: 4pt,
  [*Engineer:*], [{{ENGINEER}}],
  [*Job ID:*], [{{JOB_ID}}],
  [*Date:*], [{{DATE}}],
  [*MOC:*], [{{MATERIAL}}],
)
{{BAD_SPECS_BANNER}}
#v(8pt)

== Design Basis

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Parameter*], [*Value*], [*Unit*]),
  [System], [{{SYSTEM}}], [],
  [Feed F], [{{FEED}}], [kmol/h],
  [Feed composition z#sub[F]], [{{ZF}}], [mol frac LK],
  [Distillate / bottoms x#sub[D] / x#sub[B]], [{{XD}} / {{XB}}], [mol frac LK],
  [Relative volatility α], [{{ALPHA}}], [],
  [Feed quality q], [{{Q}}], [],
  [Reflux factor R / R#sub[min]], [{{RR}}], [],
  [P#sub[top] / P#sub[bot]], [{{PTOP}} / {{PBOT}}], [kPa abs],
  [T#sub[top] / T#sub[bot]], [{{TTOP}} / {{TBOT}}], [°C],
  [Material of construction], [{{MATERIAL}}], [],
)

== Key Results

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Result*], [*Value*], [*Unit*]),
  [Minimum stages N#sub[min] (Fenske)], [{{NMIN}}], [],
  [Underwood root θ], [{{THETA}}], [],
  [R#sub[min] / R], [{{RMIN}} / {{R}}], [],
  [Theoretical stages N (Gilliland)], [{{N}}], [],
{{INTERNALS_ROWS}}
  [Shell ID], [{{SHELL_ID}}], [m],
)

== Mass & Energy

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Quantity*], [*Value*], [*Unit*]),
  [Distillate D / bottoms B], [{{D}} / {{B}}], [kmol/h],
  [Overhead vapor V], [{{V}}], [kmol/h],
  [Condenser duty Q#sub[c]], [{{QC}}], [kJ/h],
  [Reboiler duty Q#sub[r]], [{{QR}}], [kJ/h],
  [Top densities ρ#sub[v] / ρ#sub[l]], [{{RHOV}} / {{RHOL}}], [kg/m³],
  [Allowable vapor velocity], [{{VALLOW}}], [m/s],
)

== Utilities & Heat Exchangers

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Item*], [*Value*], [*Unit*]),
  [Cooling water in / out], [{{CWIN}} / {{CWOUT}}], [°C],
  [Cooling water ΔT], [{{CWRISE}}], [K],
  [Cooling water flow], [{{CWFLOW}}], [kg/h],
  [Steam flow], [{{STEAM}}], [kg/h],
  [Condenser LMTD], [{{LMTD}}], [K],
  [Condenser area], [{{AC}}], [m²],
  [Reboiler ΔT], [{{DTR}}], [K],
  [Reboiler area], [{{AR}}], [m²],
  [Reflux drum volume], [{{DRUM}}], [m³],
)
{{ADJUSTMENTS}}
== Codes & Standards

{{CODES}}

#v(16pt)

#text(size: 8pt, fill: gray)[
  Shortcut (FUG) sizing for screening and budgetary estimates. \
  Final design requires rigorous simulation and review by a qualified engineer.
]
"##;

const BAD_SPECS_BANNER: &str = r##"
#v(8pt)
#align(center)[
  #block(width: 100%, fill: rgb("#f8d7da"), inset: 10pt, radius: 4pt)[
    #text(size: 12pt, weight: "bold")[CHECK SPECS]
    #v(2pt)
    Underwood root not bracketed. Review α, q, zF.
  ]
]
"##;

// ============================================================================
// Rendering
// ============================================================================

/// Format an available value or the unavailable dash
fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => UNAVAILABLE.to_string(),
    }
}

fn fmt(value: f64, decimals: usize) -> String {
    fmt_opt(Some(value), decimals)
}

/// Table rows for the selected internals only
fn internals_rows(result: &DesignResult) -> String {
    if let Some(trays) = &result.hydraulics.trays {
        format!(
            "  [Actual trays], [{}], [],\n  [Tray section height], [{}], [m],\n  [Tray ΔP], [{}], [mbar],\n",
            trays.actual_trays,
            fmt(trays.height_m, 2),
            fmt(trays.pressure_drop_mbar, 1),
        )
    } else if let Some(packing) = &result.hydraulics.packing {
        format!(
            "  [Packed height], [{}], [m],\n  [Packing ΔP], [{}], [mbar],\n",
            fmt(packing.height_m, 2),
            fmt(packing.pressure_drop_mbar, 1),
        )
    } else {
        format!("  [Column height], [{}], [m],\n", UNAVAILABLE)
    }
}

fn adjustments_section(normalized: &NormalizedInputs) -> String {
    if normalized.adjustments.is_empty() {
        return String::new();
    }
    let mut rows = String::new();
    for adj in &normalized.adjustments {
        rows.push_str(&format!(
            "  [{}], [{}], [{}], [{:?}],\n",
            escape_typst(&adj.field),
            escape_typst(adj.original.as_deref().unwrap_or(UNAVAILABLE)),
            fmt_opt(adj.applied, 4),
            adj.kind,
        ));
    }
    format!(
        r##"
== Input Adjustments

#table(
  columns: (1fr, auto, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  table.header([*Field*], [*Entered*], [*Used*], [*Action*]),
{rows})
"##
    )
}

/// Render the datasheet as Typst source.
///
/// User-supplied text (job, engineer) is escaped; unavailable values print
/// as "—". The equations appendix lists `result.equations_used`.
pub fn render_datasheet_typst(normalized: &NormalizedInputs, result: &DesignResult, meta: &DatasheetMeta) -> String {
    let op = &result.operating;
    let fug = &result.fug;
    let u = &result.utilities;

    let mut source = DATASHEET_TEMPLATE
        .replace("{{WATERMARK}}", WATERMARK)
        .replace("{{SYSTEM}}", result.system.display_name())
        .replace("{{INTERNALS}}", result.internals.display_name())
        .replace("{{MATERIAL}}", normalized.material.display_name())
        .replace(
            "{{BAD_SPECS_BANNER}}",
            if result.bad_specs { BAD_SPECS_BANNER } else { "" },
        )
        // Design basis
        .replace("{{FEED}}", &fmt(normalized.feed_flow, 1))
        .replace("{{ZF}}", &fmt(normalized.z_f, 3))
        .replace("{{XD}}", &fmt(normalized.x_d, 3))
        .replace("{{XB}}", &fmt(normalized.x_b, 3))
        .replace("{{ALPHA}}", &fmt(normalized.alpha, 3))
        .replace("{{Q}}", &fmt(normalized.q, 2))
        .replace("{{RR}}", &fmt(normalized.reflux_factor, 2))
        .replace("{{PTOP}}", &fmt(op.p_top_kpa, 1))
        .replace("{{PBOT}}", &fmt(op.p_bottom_kpa, 1))
        .replace("{{TTOP}}", &fmt(op.t_top_c, 1))
        .replace("{{TBOT}}", &fmt(op.t_bottom_c, 1))
        // Key results
        .replace("{{NMIN}}", &fmt(fug.min_stages, 2))
        .replace("{{THETA}}", &fmt_opt(fug.underwood_theta, 4))
        .replace("{{RMIN}}", &fmt_opt(fug.min_reflux, 3))
        .replace("{{R}}", &fmt_opt(fug.reflux_ratio, 3))
        .replace("{{N}}", &fmt_opt(fug.theoretical_stages, 2))
        .replace("{{INTERNALS_ROWS}}", &internals_rows(result))
        .replace("{{SHELL_ID}}", &fmt_opt(result.hydraulics.diameter_m, 3))
        // Mass & energy
        .replace("{{D}}", &fmt(result.balance.distillate, 2))
        .replace("{{B}}", &fmt(result.balance.bottoms, 2))
        .replace("{{V}}", &fmt_opt(result.balance.vapor, 2))
        .replace("{{QC}}", &fmt_opt(u.condenser_duty_kj_h, 0))
        .replace("{{QR}}", &fmt_opt(u.reboiler_duty_kj_h, 0))
        .replace("{{RHOV}}", &fmt(op.rho_v_top, 3))
        .replace("{{RHOL}}", &fmt(op.rho_l_top, 1))
        .replace("{{VALLOW}}", &fmt(result.hydraulics.allowable_velocity_m_s, 3))
        // Utilities
        .replace("{{CWIN}}", &fmt(u.cw_inlet_c, 1))
        .replace("{{CWOUT}}", &fmt(u.cw_outlet_c, 1))
        .replace("{{CWRISE}}", &fmt(u.cw_rise_k, 1))
        .replace("{{CWFLOW}}", &fmt_opt(u.cooling_water_kg_h, 0))
        .replace("{{STEAM}}", &fmt_opt(u.steam_kg_h, 0))
        .replace("{{LMTD}}", &fmt_opt(u.condenser_lmtd_k, 2))
        .replace("{{AC}}", &fmt_opt(u.condenser_area_m2, 2))
        .replace("{{DTR}}", &fmt(u.reboiler_delta_t_k, 2))
        .replace("{{AR}}", &fmt_opt(u.reboiler_area_m2, 2))
        .replace("{{DRUM}}", &fmt(result.drum.volume_m3, 3))
        .replace("{{CODES}}", CODES_AND_STANDARDS)
        // User text last, so nothing it contains is taken for a placeholder
        .replace("{{ADJUSTMENTS}}", &adjustments_section(normalized))
        .replace("{{JOB_ID}}", &escape_typst(&meta.job_id))
        .replace("{{ENGINEER}}", &escape_typst(&meta.engineer))
        .replace("{{DATE}}", &escape_typst(&meta.date));

    source.push_str(&generate_static_equations_appendix_typst(&result.equations_used));
    source
}

/// Render the datasheet to PDF bytes.
///
/// # Errors
///
/// `CalcError::RenderFailed` if Typst compilation or PDF export fails.
pub fn render_datasheet_pdf(
    normalized: &NormalizedInputs,
    result: &DesignResult,
    meta: &DatasheetMeta,
) -> CalcResult<Vec<u8>> {
    let source = render_datasheet_typst(normalized, result, meta);
    compile_pdf(source)
}

/// Compile Typst source to PDF bytes
fn compile_pdf(source: String) -> CalcResult<Vec<u8>> {
    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::render_failed("typst compile", error_msgs.join("; "))
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::render_failed("pdf export", error_msgs.join("; "))
    })
}

/// Escape special Typst characters in user-provided strings
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            '/' => "\\/".to_string(),
            '{' => "\\{".to_string(),
            '}' => "\\}".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::distillation::{design_from_normalized, normalize, DesignInputs, Internals, NumericInput};

    fn run(inputs: &DesignInputs) -> (NormalizedInputs, DesignResult) {
        let normalized = normalize(inputs);
        let result = design_from_normalized(&normalized);
        (normalized, result)
    }

    fn meta() -> DatasheetMeta {
        DatasheetMeta::new("25-014", "Test Engineer").with_date("2025-03-01")
    }

    #[test]
    fn test_typst_contains_sections() {
        let (n, r) = run(&DesignInputs::default());
        let src = render_datasheet_typst(&n, &r, &meta());

        for heading in ["== Design Basis", "== Key Results", "== Mass & Energy", "== Utilities & Heat Exchangers", "== Codes & Standards"] {
            assert!(src.contains(heading), "missing {}", heading);
        }
        assert!(src.contains(CODES_AND_STANDARDS));
        assert!(src.contains(WATERMARK));
        assert!(src.contains("Benzene/Toluene"));
        assert!(src.contains("SS316L"));
        assert!(src.contains("[Actual trays], [12]"));
        assert!(!src.contains("Packed height"));
        assert!(!src.contains("CHECK SPECS"));
        assert!(!src.contains("{{"), "unreplaced placeholder");
        assert!(src.contains("Appendix: List of Equations"));
    }

    #[test]
    fn test_packing_rows_only() {
        let (n, r) = run(&DesignInputs::default().with_internals(Internals::Packing));
        let src = render_datasheet_typst(&n, &r, &meta());
        assert!(src.contains("Packed height"));
        assert!(!src.contains("Actual trays"));
    }

    #[test]
    fn test_bad_specs_banner_and_dashes() {
        let inputs = DesignInputs {
            z_f: Some(NumericInput::from(1.0)),
            ..DesignInputs::default()
        };
        let (n, r) = run(&inputs);
        let src = render_datasheet_typst(&n, &r, &meta());
        assert!(src.contains("CHECK SPECS"));
        assert!(src.contains("Underwood root not bracketed. Review α, q, zF."));
        assert!(src.contains("[Shell ID], [—]"));
        assert!(src.contains("[Column height], [—]"));
    }

    #[test]
    fn test_user_text_escaped() {
        let (n, r) = run(&DesignInputs::default());
        let m = DatasheetMeta::new("#job_1", "A*B [x]").with_date("2025-03-01");
        let src = render_datasheet_typst(&n, &r, &m);
        assert!(src.contains("\\#job\\_1"));
        assert!(src.contains("A\\*B \\[x\\]"));
    }

    #[test]
    fn test_placeholder_text_in_job_id_is_literal() {
        let (n, r) = run(&DesignInputs::default());
        let m = DatasheetMeta::new("{{N}} {{CODES}}", "{{JOB_ID}}");
        let src = render_datasheet_typst(&n, &r, &m);
        assert!(src.contains("\\{\\{N\\}\\} \\{\\{CODES\\}\\}"));
        assert!(src.contains("\\{\\{JOB\\_ID\\}\\}"));
        assert!(!src.contains("{{"));
    }

    #[test]
    fn test_adjustments_listed() {
        let inputs = DesignInputs {
            x_d: Some("1.4".into()),
            ..DesignInputs::default()
        };
        let (n, r) = run(&inputs);
        let src = render_datasheet_typst(&n, &r, &meta());
        assert!(src.contains("== Input Adjustments"));
        assert!(src.contains("x\\_d"));

        let (n, r) = run(&DesignInputs::default());
        assert!(!render_datasheet_typst(&n, &r, &meta()).contains("Input Adjustments"));
    }

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(None, 2), "—");
        assert_eq!(fmt_opt(Some(f64::NAN), 2), "—");
        assert_eq!(fmt_opt(Some(1.23456), 2), "1.23");
    }

    #[test]
    fn test_pdf_generation() {
        let (n, r) = run(&DesignInputs::default());
        let pdf = render_datasheet_pdf(&n, &r, &meta());

        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }
}
