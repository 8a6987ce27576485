use std::path::{Path, PathBuf};

use plotters::prelude::*;

use super::{font, headroom, palette, render};
use crate::constants::charts::BAR_SIZE;
use crate::constants::validation::PCA_VARIANCE_TARGET;
use crate::errors::SurveyError;

/// Eigenvalues by factor number with the Kaiser criterion drawn at 1.0.
pub fn scree_plot(dir: &Path, name: &str, eigenvalues: &[f64]) -> Result<PathBuf, SurveyError> {
    render(dir, name, BAR_SIZE, |root| {
        let p = eigenvalues.len().max(1) as f64;
        let y_max = headroom(eigenvalues.iter().copied().chain([1.0]));
        let mut chart = ChartBuilder::on(root)
            .caption("Scree Plot", font(26))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0.5..p + 0.5, 0.0..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Factor Number")
            .y_desc("Eigenvalue")
            .x_labels(eigenvalues.len() + 1)
            .x_label_formatter(&|value| format!("{value:.0}"))
            .draw()?;

        let points: Vec<(f64, f64)> = eigenvalues
            .iter()
            .enumerate()
            .map(|(idx, value)| ((idx + 1) as f64, *value))
            .collect();
        let line = palette(0);
        chart
            .draw_series(LineSeries::new(points.clone(), line.stroke_width(2)))?
            .label("Eigenvalue")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line.stroke_width(2)));
        chart.draw_series(points.iter().map(|&point| Circle::new(point, 5, line.filled())))?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.5, 1.0), (p + 0.5, 1.0)],
                RED.stroke_width(1),
            )))?
            .label("Kaiser criterion (eigenvalue = 1)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(font(14))
            .draw()?;
        Ok(())
    })
}

/// Per-component explained variance bars with a cumulative step line and the 80% target.
pub fn pca_variance_chart(
    dir: &Path,
    name: &str,
    variance_ratio: &[f64],
    cumulative: &[f64],
) -> Result<PathBuf, SurveyError> {
    render(dir, name, BAR_SIZE, |root| {
        let p = variance_ratio.len().max(1) as f64;
        let mut chart = ChartBuilder::on(root)
            .caption("PCA Explained Variance", font(26))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0.5..p + 0.5, 0.0..1.05)?;
        chart
            .configure_mesh()
            .x_desc("Principal Component")
            .y_desc("Explained Variance Ratio")
            .x_labels(variance_ratio.len() + 1)
            .x_label_formatter(&|value| format!("{value:.0}"))
            .draw()?;

        let bar = palette(7);
        chart
            .draw_series(variance_ratio.iter().enumerate().map(|(idx, value)| {
                let x = (idx + 1) as f64;
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *value)], bar.mix(0.7).filled())
            }))?
            .label("Individual explained variance")
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], bar.mix(0.7).filled()));

        let step: Vec<(f64, f64)> = cumulative
            .iter()
            .enumerate()
            .flat_map(|(idx, value)| {
                let x = (idx + 1) as f64;
                [(x - 0.5, *value), (x + 0.5, *value)]
            })
            .collect();
        let line = palette(0);
        chart
            .draw_series(std::iter::once(PathElement::new(step, line.stroke_width(2))))?
            .label("Cumulative explained variance")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line.stroke_width(2)));
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.5, PCA_VARIANCE_TARGET), (p + 0.5, PCA_VARIANCE_TARGET)],
                BLACK.mix(0.6),
            )))?
            .label("80% threshold")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.6)));
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::MiddleRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(font(14))
            .draw()?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn scree_plot_marks_kaiser_line() {
        let dir = tempdir().unwrap();
        let path = scree_plot(dir.path(), "scree_plot", &[2.4, 1.1, 0.8, 0.5, 0.2]).unwrap();
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("Kaiser criterion"));
    }

    #[test]
    fn pca_chart_draws_threshold_legend() {
        let dir = tempdir().unwrap();
        let path = pca_variance_chart(dir.path(), "pca_variance", &[0.6, 0.3, 0.1], &[0.6, 0.9, 1.0]).unwrap();
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("80% threshold"));
    }
}
