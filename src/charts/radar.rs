use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{draw_title, font, render};
use crate::constants::charts::RADAR_SIZE;
use crate::errors::SurveyError;

const RINGS: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

/// Closed radar polygon of values in `0..=1`, one spoke per label.
pub fn radar_chart(
    dir: &Path,
    name: &str,
    title: &str,
    labels: &[String],
    values: &[f64],
    color: RGBColor,
) -> Result<PathBuf, SurveyError> {
    render(dir, name, RADAR_SIZE, |root| {
        draw_title(root, title)?;
        let (width, height) = root.dim_in_pixel();
        let radius = f64::from(width.min(height)) * 0.34;
        let center = (f64::from(width) / 2.0, f64::from(height) / 2.0 + 20.0);
        let spokes = labels.len().max(1);
        let point = |idx: usize, r: f64| {
            let angle = FRAC_PI_2 - TAU * idx as f64 / spokes as f64;
            (
                (center.0 + r * radius * angle.cos()).round() as i32,
                (center.1 - r * radius * angle.sin()).round() as i32,
            )
        };

        let grid = BLACK.mix(0.2);
        for ring in RINGS {
            let mut outline: Vec<(i32, i32)> = (0..spokes).map(|idx| point(idx, ring)).collect();
            outline.push(point(0, ring));
            root.draw(&PathElement::new(outline, grid))?;
            root.draw(&Text::new(
                format!("{ring:.1}"),
                point(0, ring),
                font(12).color(&BLACK.mix(0.6)).pos(Pos::new(HPos::Left, VPos::Bottom)),
            ))?;
        }
        for (idx, label) in labels.iter().enumerate() {
            root.draw(&PathElement::new(vec![point(idx, 0.0), point(idx, 1.0)], grid))?;
            root.draw(&Text::new(
                label.clone(),
                point(idx, 1.15),
                font(18).pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;
        }

        let shape: Vec<(i32, i32)> = values
            .iter()
            .enumerate()
            .map(|(idx, value)| point(idx, value.clamp(0.0, 1.0)))
            .collect();
        root.draw(&Polygon::new(shape.clone(), color.mix(0.25).filled()))?;
        let mut closed = shape.clone();
        closed.extend(shape.first().copied());
        root.draw(&PathElement::new(closed, color.stroke_width(2)))?;
        for (idx, value) in values.iter().enumerate() {
            root.draw(&Circle::new(point(idx, value.clamp(0.0, 1.0)), 4, color.filled()))?;
            root.draw(&Text::new(
                format!("{value:.2}"),
                point(idx, value.clamp(0.0, 1.0) + 0.06),
                font(14).pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn radar_labels_every_stage() {
        let dir = tempdir().unwrap();
        let labels: Vec<String> = ["Brand Awareness", "Content Interest", "Social Interaction"]
            .iter()
            .map(|label| label.to_string())
            .collect();
        let path = radar_chart(
            dir.path(),
            "radar_sicas_overview",
            "SICAS Model Overview",
            &labels,
            &[0.8, 0.6, 0.4],
            RGBColor(0x2E, 0x6E, 0x91),
        )
        .unwrap();
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("Social Interaction"));
        assert!(svg.contains("0.80"));
    }
}
