//! SVG chart rendering.
//!
//! Every renderer draws into `<dir>/<name>.svg` and returns the written path.
//! Plotting failures are wrapped in [`SurveyError::Chart`] and never leave a
//! partially-presented drawing area behind.

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::constants::charts::{FONT_FAMILY, PALETTE};
use crate::constants::output::CHART_EXTENSION;
use crate::errors::SurveyError;

/// Vertical, horizontal, grouped, stacked and funnel bars.
pub mod bar;
/// Annotated heatmaps for correlation and count matrices.
pub mod heatmap;
/// Scree plot and PCA variance chart.
pub mod lines;
/// Pie charts with folded tails.
pub mod pie;
/// Radar (polar) chart of stage rates.
pub mod radar;

pub use bar::{bar_chart, funnel_chart, grouped_bar_chart, horizontal_bar_chart, stacked_bar_chart};
pub use heatmap::{ColorScale, HeatmapOptions, heatmap};
pub use lines::{pca_variance_chart, scree_plot};
pub use pie::pie_chart;
pub use radar::radar_chart;

/// Chart file stems shared by the renderers and the report links.
pub mod names {
    use crate::dimension::Dimension;

    /// Funnel bar chart.
    pub const FUNNEL: &str = "sicas_funnel";
    /// Dimension-score correlation heatmap.
    pub const DIMENSION_CORRELATIONS: &str = "dimension_correlations";
    /// Eigenvalue scree plot.
    pub const SCREE_PLOT: &str = "scree_plot";
    /// Rotated loadings heatmap.
    pub const FACTOR_LOADINGS: &str = "factor_loadings";
    /// PCA explained variance.
    pub const PCA_VARIANCE: &str = "pca_variance";
    /// Thesis radar of stage rates.
    pub const RADAR_OVERVIEW: &str = "radar_sicas_overview";
    /// Thesis item correlation heatmap.
    pub const CORRELATION_HEATMAP: &str = "heatmap_sicas_correlation";
    /// Awareness by gender.
    pub const GENDER_AWARENESS: &str = "grouped_gender_awareness";
    /// Purchase by age bracket.
    pub const AGE_PURCHASE: &str = "stacked_age_purchase";
    /// Supplementary contact channels.
    pub const BRAND_CONTACT_CHANNELS: &str = "brand_contact_channels";
    /// Supplementary interaction experience.
    pub const INTERACTION_EXPERIENCE: &str = "interaction_experience";
    /// Supplementary brand impression.
    pub const BRAND_IMPRESSION: &str = "brand_impression";
    /// Supplementary increased understanding.
    pub const INCREASED_UNDERSTANDING: &str = "increased_understanding";
    /// Purchase rate by understanding level.
    pub const UNDERSTANDING_VS_PURCHASE: &str = "understanding_vs_purchase";
    /// Experience against satisfaction counts.
    pub const EXPERIENCE_VS_SATISFACTION: &str = "experience_vs_satisfaction";

    /// Bar chart of one stage table, e.g. `sense_awareness`.
    pub fn stage(dimension: Dimension, key: &str) -> String {
        format!("{}_{key}", dimension.key())
    }

    /// Bar chart of one demographic table, e.g. `demographic_age`.
    pub fn demographic(key: &str) -> String {
        format!("demographic_{key}")
    }

    /// Pie chart of a demographic table (`pie_gender`) or stage table (`pie_sense_awareness`).
    pub fn pie(dimension: Option<Dimension>, key: &str) -> String {
        match dimension {
            Some(dimension) => format!("pie_{}_{key}", dimension.key()),
            None => format!("pie_{key}"),
        }
    }
}

pub(crate) type DrawResult = Result<(), Box<dyn Error>>;
pub(crate) type Canvas<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Output path for chart `name` inside `dir`.
pub fn chart_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{CHART_EXTENSION}"))
}

/// Convert a palette triple into a plotters color.
pub fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// Palette color for series `index`, cycling past the end.
pub fn palette(index: usize) -> RGBColor {
    rgb(PALETTE[index % PALETTE.len()])
}

/// Text style in the shared font family.
pub(crate) fn font(size: u32) -> TextStyle<'static> {
    TextStyle::from((FONT_FAMILY, size).into_font())
}

/// Create the SVG canvas at `dir/name.svg`, run `draw`, and present it.
pub(crate) fn render<F>(dir: &Path, name: &str, size: (u32, u32), draw: F) -> Result<PathBuf, SurveyError>
where
    F: FnOnce(&Canvas<'_>) -> DrawResult,
{
    let path = chart_path(dir, name);
    draw_to(&path, size, draw).map_err(|err| SurveyError::chart(name, err))?;
    debug!("[sicas:charts] wrote {}", path.display());
    Ok(path)
}

fn draw_to<F>(path: &Path, size: (u32, u32), draw: F) -> DrawResult
where
    F: FnOnce(&Canvas<'_>) -> DrawResult,
{
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    draw(&root)?;
    root.present()?;
    Ok(())
}

/// Draw a centered title near the top edge of a free-form canvas.
pub(crate) fn draw_title(root: &Canvas<'_>, title: &str) -> DrawResult {
    let (width, _) = root.dim_in_pixel();
    root.draw(&Text::new(
        title.to_string(),
        (width as i32 / 2, 24),
        font(26).pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;
    Ok(())
}

/// Label of the category centered on segment `value`, empty elsewhere.
pub(crate) fn segment_label(labels: &[String], value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::CenterOf(idx) => labels.get(*idx).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Label of the category at integer tick `value` on a continuous axis.
pub(crate) fn tick_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Upper axis bound leaving headroom above the tallest value.
pub(crate) fn headroom(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.15 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_path_appends_extension() {
        let path = chart_path(Path::new("plots"), "sicas_funnel");
        assert_eq!(path, Path::new("plots").join("sicas_funnel.svg"));
    }

    #[test]
    fn chart_names_follow_their_tables() {
        use crate::dimension::Dimension;
        assert_eq!(names::stage(Dimension::Interest, "attraction"), "interest_attraction");
        assert_eq!(names::demographic("age"), "demographic_age");
        assert_eq!(names::pie(Some(Dimension::Action), "purchase"), "pie_action_purchase");
        assert_eq!(names::pie(None, "gender"), "pie_gender");
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(palette(0), palette(PALETTE.len()));
        assert_eq!(palette(0), RGBColor(0x2E, 0x6E, 0x91));
    }

    #[test]
    fn tick_labels_only_on_integers() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(tick_label(&labels, 1.0), "b");
        assert_eq!(tick_label(&labels, 0.5), "");
        assert_eq!(tick_label(&labels, 2.0), "");
        assert_eq!(tick_label(&labels, -1.0), "");
    }

    #[test]
    fn headroom_handles_empty_and_nan() {
        assert_eq!(headroom([]), 1.0);
        assert_eq!(headroom([f64::NAN, 0.0]), 1.0);
        assert!((headroom([2.0]) - 2.3).abs() < 1e-12);
    }

    #[test]
    fn render_reports_backend_failure_as_chart_error() {
        let missing = Path::new("/nonexistent-sicas-dir/for/sure");
        let err = render(missing, "broken", (100, 100), |_| Ok(())).unwrap_err();
        assert!(matches!(err, SurveyError::Chart { ref name, .. } if name == "broken"));
    }
}
