use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{draw_title, font, palette, render};
use crate::constants::charts::{MAX_PIE_SLICES, PIE_KEPT_SLICES, PIE_SIZE};
use crate::errors::SurveyError;
use crate::utils::percent;

/// Keep the largest slices and fold the rest into "Others" when there are too many.
pub fn fold_slices(labels: &[String], values: &[f64]) -> Vec<(String, f64)> {
    let mut slices: Vec<(String, f64)> = labels
        .iter()
        .cloned()
        .zip(values.iter().copied())
        .filter(|(_, value)| *value > 0.0)
        .collect();
    if slices.len() <= MAX_PIE_SLICES {
        return slices;
    }
    slices.sort_by(|a, b| b.1.total_cmp(&a.1));
    let others: f64 = slices[PIE_KEPT_SLICES..].iter().map(|(_, value)| value).sum();
    slices.truncate(PIE_KEPT_SLICES);
    slices.push(("Others".to_string(), others));
    slices
}

/// Pie chart with percentage labels on each slice and a legend on the right.
pub fn pie_chart(
    dir: &Path,
    name: &str,
    title: &str,
    labels: &[String],
    values: &[f64],
) -> Result<PathBuf, SurveyError> {
    let slices = fold_slices(labels, values);
    let total: f64 = slices.iter().map(|(_, value)| value).sum();

    render(dir, name, PIE_SIZE, |root| {
        draw_title(root, title)?;
        let (width, height) = root.dim_in_pixel();
        let radius = (f64::from(width.min(height)) * 0.33).round();
        let center = (f64::from(width) * 0.36, f64::from(height) * 0.53);
        let point = |angle: f64, r: f64| {
            (
                (center.0 + r * angle.cos()).round() as i32,
                (center.1 - r * angle.sin()).round() as i32,
            )
        };

        // counter-clockwise from twelve o'clock
        let mut start = FRAC_PI_2;
        for (idx, (_, value)) in slices.iter().enumerate() {
            let sweep = if total > 0.0 { value / total * TAU } else { 0.0 };
            let steps = ((sweep / TAU) * 180.0).ceil().max(2.0) as usize;
            let mut outline = vec![point(0.0, 0.0)];
            outline.extend((0..=steps).map(|step| point(start + sweep * step as f64 / steps as f64, radius)));
            root.draw(&Polygon::new(outline.clone(), palette(idx).filled()))?;
            outline.push(point(0.0, 0.0));
            root.draw(&PathElement::new(outline, WHITE.stroke_width(2)))?;

            let middle = start + sweep / 2.0;
            root.draw(&Text::new(
                percent(value / total),
                point(middle, radius * 0.65),
                font(16).color(&WHITE).pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;
            start += sweep;
        }

        let legend_x = (center.0 + radius + 60.0) as i32;
        let legend_top = (center.1 - radius) as i32;
        for (idx, (label, _)) in slices.iter().enumerate() {
            let y = legend_top + idx as i32 * 30;
            root.draw(&Rectangle::new([(legend_x, y), (legend_x + 18, y + 18)], palette(idx).filled()))?;
            root.draw(&Text::new(
                label.clone(),
                (legend_x + 28, y + 9),
                font(16).pos(Pos::new(HPos::Left, VPos::Center)),
            ))?;
        }
        Ok(())
    })
}
