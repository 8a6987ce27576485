use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{font, render, segment_label};
use crate::constants::charts::HEATMAP_SIZE;
use crate::errors::SurveyError;

/// How cell values map to colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorScale {
    /// Blue through white to red over `-1..=1`.
    Diverging,
    /// Yellow through green to blue over `0..=max`.
    Sequential,
}

const DIVERGING: [(f64, (u8, u8, u8)); 3] = [
    (0.0, (0x3B, 0x4C, 0xC0)),
    (0.5, (0xDD, 0xDD, 0xDD)),
    (1.0, (0xB4, 0x04, 0x26)),
];

const SEQUENTIAL: [(f64, (u8, u8, u8)); 3] = [
    (0.0, (0xFF, 0xFF, 0xD9)),
    (0.5, (0x41, 0xB6, 0xC4)),
    (1.0, (0x08, 0x1D, 0x58)),
];

impl ColorScale {
    /// Color of `value` given the largest magnitude in the matrix.
    pub fn color(self, value: f64, max: f64) -> RGBColor {
        let (t, stops) = match self {
            ColorScale::Diverging => ((value.clamp(-1.0, 1.0) + 1.0) / 2.0, &DIVERGING),
            ColorScale::Sequential => {
                let t = if max > 0.0 { value / max } else { 0.0 };
                (t.clamp(0.0, 1.0), &SEQUENTIAL)
            }
        };
        let t = if t.is_nan() { 0.5 } else { t };
        let upper = stops.iter().position(|(stop, _)| *stop >= t).unwrap_or(stops.len() - 1).max(1);
        let (t0, c0) = stops[upper - 1];
        let (t1, c1) = stops[upper];
        let w = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * w).round() as u8;
        RGBColor(mix(c0.0, c1.0), mix(c0.1, c1.1), mix(c0.2, c1.2))
    }
}

/// Rendering options for [`heatmap`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatmapOptions {
    /// Cell colormap.
    pub scale: ColorScale,
    /// Hide the diagonal and every cell above it.
    pub lower_triangle: bool,
    /// Decimals printed in each cell.
    pub decimals: usize,
}

impl HeatmapOptions {
    /// Full diverging matrix with two decimals.
    pub fn correlation() -> Self {
        Self {
            scale: ColorScale::Diverging,
            lower_triangle: false,
            decimals: 2,
        }
    }

    /// Sequential scale with integer annotations.
    pub fn counts() -> Self {
        Self {
            scale: ColorScale::Sequential,
            lower_triangle: false,
            decimals: 0,
        }
    }

    /// Hide the upper triangle.
    pub fn with_lower_triangle(mut self) -> Self {
        self.lower_triangle = true;
        self
    }
}

/// Annotated heatmap; `values[row][col]`, first row drawn at the top.
pub fn heatmap(
    dir: &Path,
    name: &str,
    title: &str,
    row_labels: &[String],
    col_labels: &[String],
    values: &[Vec<f64>],
    options: HeatmapOptions,
) -> Result<PathBuf, SurveyError> {
    let rows = row_labels.len().max(1);
    let cols = col_labels.len().max(1);
    let max = values
        .iter()
        .flatten()
        .filter(|value| value.is_finite())
        .fold(0.0_f64, |acc, value| acc.max(value.abs()));
    // row 0 sits at the top of the y axis
    let flipped: Vec<String> = row_labels.iter().rev().cloned().collect();

    render(dir, name, HEATMAP_SIZE, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, font(26))
            .margin(20)
            .x_label_area_size(160)
            .y_label_area_size(220)
            .build_cartesian_2d((0..cols).into_segmented(), (0..rows).into_segmented())?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(cols)
            .y_labels(rows)
            .x_label_style(font(14).transform(FontTransform::Rotate90))
            .y_label_style(font(14))
            .x_label_formatter(&|value| segment_label(col_labels, value))
            .y_label_formatter(&|value| segment_label(&flipped, value))
            .draw()?;

        let cells: Vec<(usize, usize, f64)> = values
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| cells.iter().enumerate().map(move |(col, value)| (row, col, *value)))
            .filter(|(row, col, _)| !options.lower_triangle || col < row)
            .collect();

        chart.draw_series(cells.iter().map(|&(row, col, value)| {
            let y = rows - 1 - row;
            Rectangle::new(
                [
                    (SegmentValue::Exact(col), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(col + 1), SegmentValue::Exact(y + 1)),
                ],
                options.scale.color(value, max).filled(),
            )
        }))?;
        chart.draw_series(cells.iter().map(|&(row, col, value)| {
            let fill = options.scale.color(value, max);
            let ink = ink_for(fill);
            let text = if value.is_finite() {
                format!("{value:.prec$}", prec = options.decimals)
            } else {
                "n/a".to_string()
            };
            Text::new(
                text,
                (SegmentValue::CenterOf(col), SegmentValue::CenterOf(rows - 1 - row)),
                font(14).color(ink).pos(Pos::new(HPos::Center, VPos::Center)),
            )
        }))?;
        Ok(())
    })
}

/// Annotation color readable on `fill`.
fn ink_for(fill: RGBColor) -> &'static RGBColor {
    if luminance(fill) < 0.5 { &WHITE } else { &BLACK }
}

fn luminance(color: RGBColor) -> f64 {
    (0.299 * f64::from(color.0) + 0.587 * f64::from(color.1) + 0.114 * f64::from(color.2)) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn diverging_scale_hits_its_stops() {
        assert_eq!(ColorScale::Diverging.color(-1.0, 1.0), RGBColor(0x3B, 0x4C, 0xC0));
        assert_eq!(ColorScale::Diverging.color(0.0, 1.0), RGBColor(0xDD, 0xDD, 0xDD));
        assert_eq!(ColorScale::Diverging.color(1.0, 1.0), RGBColor(0xB4, 0x04, 0x26));
    }

    #[test]
    fn annotations_contrast_with_cell_fill() {
        assert_eq!(*ink_for(RGBColor(0x08, 0x1D, 0x58)), WHITE);
        assert_eq!(*ink_for(RGBColor(0xFF, 0xFF, 0xD9)), BLACK);
        assert_eq!(*ink_for(ColorScale::Diverging.color(1.0, 1.0)), WHITE);
    }

    #[test]
    fn sequential_scale_normalizes_by_max() {
        assert_eq!(ColorScale::Sequential.color(0.0, 10.0), RGBColor(0xFF, 0xFF, 0xD9));
        assert_eq!(ColorScale::Sequential.color(10.0, 10.0), RGBColor(0x08, 0x1D, 0x58));
        assert_eq!(ColorScale::Sequential.color(3.0, 0.0), RGBColor(0xFF, 0xFF, 0xD9));
    }

    #[test]
    fn lower_triangle_hides_upper_annotations() {
        let dir = tempdir().unwrap();
        let labels = vec!["Sense".to_string(), "Share".to_string()];
        let values = vec![vec![1.0, 0.37], vec![0.37, 1.0]];
        let full = heatmap(
            dir.path(),
            "full",
            "Correlations",
            &labels,
            &labels,
            &values,
            HeatmapOptions::correlation(),
        )
        .unwrap();
        let masked = heatmap(
            dir.path(),
            "masked",
            "Correlations",
            &labels,
            &labels,
            &values,
            HeatmapOptions::correlation().with_lower_triangle(),
        )
        .unwrap();
        let count = |path: &Path| std::fs::read_to_string(path).unwrap().matches("0.37").count();
        assert_eq!(count(&full), 2);
        assert_eq!(count(&masked), 1);
    }
}
