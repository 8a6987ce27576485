use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{Canvas, DrawResult, font, headroom, palette, render, rgb, segment_label, tick_label};
use crate::constants::charts::{BAR_SIZE, FUNNEL_PALETTE, WIDE_SIZE};
use crate::errors::SurveyError;
use crate::metrics::CrossTab;
use crate::utils::percent;

/// Vertical bar chart of `values` with the value printed above each bar.
pub fn bar_chart(
    dir: &Path,
    name: &str,
    title: &str,
    labels: &[String],
    values: &[f64],
    color: RGBColor,
) -> Result<PathBuf, SurveyError> {
    render(dir, name, BAR_SIZE, |root| {
        let colors = vec![color; values.len()];
        draw_vertical_bars(root, title, "Proportion", labels, values, &colors, headroom(values.iter().copied()))
    })
}

/// Funnel bar chart: one bar per stage on a fixed 0..1 axis.
pub fn funnel_chart(
    dir: &Path,
    name: &str,
    stages: &[String],
    rates: &[f64],
) -> Result<PathBuf, SurveyError> {
    render(dir, name, BAR_SIZE, |root| {
        let colors: Vec<RGBColor> = (0..rates.len())
            .map(|idx| rgb(FUNNEL_PALETTE[idx % FUNNEL_PALETTE.len()]))
            .collect();
        draw_vertical_bars(
            root,
            "SICAS Model Funnel",
            "Proportion",
            stages,
            rates,
            &colors,
            1.0,
        )
    })
}

fn draw_vertical_bars(
    root: &Canvas<'_>,
    title: &str,
    y_desc: &str,
    labels: &[String],
    values: &[f64],
    colors: &[RGBColor],
    y_max: f64,
) -> DrawResult {
    let n = values.len().max(1);
    let rotate = labels.len() > 5;
    let mut chart = ChartBuilder::on(root)
        .caption(title, font(26))
        .margin(20)
        .x_label_area_size(if rotate { 180 } else { 60 })
        .y_label_area_size(70)
        .build_cartesian_2d((0..n).into_segmented(), 0.0..y_max)?;

    let label_style = if rotate {
        font(14).transform(FontTransform::Rotate90)
    } else {
        font(14)
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_style(label_style)
        .x_label_formatter(&|value| segment_label(labels, value))
        .y_desc(y_desc)
        .y_label_formatter(&|value| format!("{value:.2}"))
        .draw()?;

    chart.draw_series(values.iter().zip(colors).enumerate().map(|(idx, (value, color))| {
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(idx), 0.0), (SegmentValue::Exact(idx + 1), *value)],
            color.filled(),
        );
        bar.set_margin(0, 0, 10, 10);
        bar
    }))?;
    chart.draw_series(values.iter().enumerate().map(|(idx, value)| {
        Text::new(
            format!("{value:.2}"),
            (SegmentValue::CenterOf(idx), *value),
            font(14).pos(Pos::new(HPos::Center, VPos::Bottom)),
        )
    }))?;
    Ok(())
}

/// Horizontal bar chart, bars sorted ascending so the largest sits on top.
pub fn horizontal_bar_chart(
    dir: &Path,
    name: &str,
    title: &str,
    labels: &[String],
    values: &[f64],
    color: RGBColor,
) -> Result<PathBuf, SurveyError> {
    let mut rows: Vec<(String, f64)> = labels.iter().cloned().zip(values.iter().copied()).collect();
    rows.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (labels, values): (Vec<String>, Vec<f64>) = rows.into_iter().unzip();

    render(dir, name, WIDE_SIZE, |root| {
        let n = values.len().max(1);
        let x_max = headroom(values.iter().copied());
        let mut chart = ChartBuilder::on(root)
            .caption(title, font(26))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(280)
            .build_cartesian_2d(0.0..x_max, (0..n).into_segmented())?;
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_style(font(14))
            .y_label_formatter(&|value| segment_label(&labels, value))
            .x_desc("Proportion")
            .x_label_formatter(&|value| format!("{value:.2}"))
            .draw()?;

        chart.draw_series(values.iter().enumerate().map(|(idx, value)| {
            let mut bar = Rectangle::new(
                [(0.0, SegmentValue::Exact(idx)), (*value, SegmentValue::Exact(idx + 1))],
                color.filled(),
            );
            bar.set_margin(6, 6, 0, 0);
            bar
        }))?;
        chart.draw_series(values.iter().enumerate().map(|(idx, value)| {
            Text::new(
                format!(" {}", percent(*value)),
                (*value, SegmentValue::CenterOf(idx)),
                font(13).pos(Pos::new(HPos::Left, VPos::Center)),
            )
        }))?;
        Ok(())
    })
}

/// Side-by-side bars: one group per cross-tab row, one bar per column.
///
/// `values` is row-major and shaped like `crosstab`.
pub fn grouped_bar_chart(
    dir: &Path,
    name: &str,
    title: &str,
    crosstab: &CrossTab,
    values: &[Vec<f64>],
    y_desc: &str,
) -> Result<PathBuf, SurveyError> {
    render(dir, name, WIDE_SIZE, |root| {
        let rows = crosstab.row_labels.len();
        let cols = crosstab.col_labels.len().max(1);
        let y_max = headroom(values.iter().flatten().copied());
        let mut chart = ChartBuilder::on(root)
            .caption(title, font(26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5..(rows as f64 - 0.5), 0.0..y_max)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows + 1)
            .x_label_formatter(&|value| tick_label(&crosstab.row_labels, *value))
            .y_desc(y_desc)
            .y_label_formatter(&|value| format!("{value:.2}"))
            .draw()?;

        let width = 0.8 / cols as f64;
        for (col, label) in crosstab.col_labels.iter().enumerate() {
            let color = palette(col);
            chart
                .draw_series(values.iter().enumerate().map(|(row, cells)| {
                    let value = cells.get(col).copied().unwrap_or(0.0);
                    let left = row as f64 - 0.4 + col as f64 * width;
                    Rectangle::new([(left, 0.0), (left + width, value)], color.filled())
                }))?
                .label(label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(font(14))
            .draw()?;
        Ok(())
    })
}

/// Row-normalized stacked bars; the first column's share is printed on its segment.
pub fn stacked_bar_chart(
    dir: &Path,
    name: &str,
    title: &str,
    crosstab: &CrossTab,
    colors: &[RGBColor],
) -> Result<PathBuf, SurveyError> {
    let shares = crosstab.row_normalized();
    render(dir, name, WIDE_SIZE, |root| {
        let rows = crosstab.row_labels.len();
        let mut chart = ChartBuilder::on(root)
            .caption(title, font(26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5..(rows as f64 - 0.5), 0.0..1.0)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows + 1)
            .x_label_formatter(&|value| tick_label(&crosstab.row_labels, *value))
            .y_desc("Proportion")
            .y_label_formatter(&|value| format!("{value:.1}"))
            .draw()?;

        for (col, label) in crosstab.col_labels.iter().enumerate() {
            let color = colors.get(col).copied().unwrap_or_else(|| palette(col));
            chart
                .draw_series(shares.iter().enumerate().map(|(row, cells)| {
                    let bottom: f64 = cells.iter().take(col).sum();
                    let top = bottom + cells.get(col).copied().unwrap_or(0.0);
                    let x = row as f64;
                    Rectangle::new([(x - 0.35, bottom), (x + 0.35, top)], color.filled())
                }))?
                .label(label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
        }
        chart.draw_series(shares.iter().enumerate().filter_map(|(row, cells)| {
            let first = *cells.first()?;
            (first > 0.0).then(|| {
                Text::new(
                    percent(first),
                    (row as f64, first / 2.0),
                    font(14).color(&WHITE).pos(Pos::new(HPos::Center, VPos::Center)),
                )
            })
        }))?;
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
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

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn bar_chart_writes_svg() {
        let dir = tempdir().unwrap();
        let path = bar_chart(
            dir.path(),
            "sense_awareness",
            "Brand Awareness",
            &labels(&["Very Familiar", "Somewhat Familiar"]),
            &[0.6, 0.4],
            RGBColor(0x87, 0xCE, 0xEB),
        )
        .unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Brand Awareness"));
        assert!(svg.contains("0.60"));
    }

    #[test]
    fn horizontal_bars_print_every_share() {
        let dir = tempdir().unwrap();
        let path = horizontal_bar_chart(
            dir.path(),
            "brand_contact_channels",
            "Channels",
            &labels(&["Weibo", "Xiaohongshu", "Douyin"]),
            &[0.2, 0.5, 0.3],
            palette(0),
        )
        .unwrap();
        let svg = std::fs::read_to_string(path).unwrap();
        for label in ["20.0%", "50.0%", "30.0%"] {
            assert!(svg.contains(label));
        }
    }

    #[test]
    fn stacked_and_grouped_render_crosstabs() {
        let dir = tempdir().unwrap();
        let crosstab = CrossTab::from_pairs([("18-25", "Yes"), ("18-25", "No"), ("26-35", "Yes")]);
        let stacked = stacked_bar_chart(dir.path(), "stacked", "Purchase by Age", &crosstab, &[]).unwrap();
        assert!(stacked.exists());
        let grouped = grouped_bar_chart(
            dir.path(),
            "grouped",
            "Awareness by Gender",
            &crosstab,
            &crosstab.row_normalized(),
            "Proportion",
        )
        .unwrap();
        assert!(grouped.exists());
    }

    #[test]
    fn funnel_chart_handles_five_stages() {
        let dir = tempdir().unwrap();
        let path = funnel_chart(
            dir.path(),
            "sicas_funnel",
            &labels(&["Awareness", "Interest", "Communication", "Action", "Share"]),
            &[0.9, 0.7, 0.5, 0.2, 0.7],
        )
        .unwrap();
        assert!(path.ends_with("sicas_funnel.svg"));
    }
}
