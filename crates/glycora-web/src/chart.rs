//! Horizontal bar chart of ranked clinical deviations, encoded as PNG.

use std::io::Cursor;

use base64::Engine;
use glycora_common::{GlycoraError, Result};
use glycora_ranker::{DeviationEntry, DeviationFlag};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;

use crate::config::ChartConfig;

const TITLE: &str = "Clinical Risk Interpretation";
const X_LABEL: &str = "Deviation from Clinical Cutoff";

fn render_err(e: impl std::fmt::Display) -> GlycoraError {
    GlycoraError::RenderingFailure(e.to_string())
}

fn bar_color(flag: DeviationFlag) -> RGBColor {
    match flag {
        DeviationFlag::Favorable => BLUE,
        DeviationFlag::Unfavorable => RED,
    }
}

/// Symmetric x-range around zero with a little headroom.
fn x_extent(entries: &[DeviationEntry]) -> f64 {
    let max = entries
        .iter()
        .map(|e| e.deviation.abs())
        .fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

/// Draw into a raw RGB buffer. The first entry ends up as the top bar.
fn draw(entries: &[DeviationEntry], width: u32, height: u32, buf: &mut [u8]) -> Result<()> {
    let n = entries.len();
    let extent = x_extent(entries);
    // Row 0 is at the bottom of the plot.
    let row_of = |i: usize| n - 1 - i;

    let root = BitMapBackend::with_buffer(buf, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-extent..extent, (0..n).into_segmented())
        .map_err(render_err)?;

    let label_for = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(row) if *row < n => entries[n - 1 - *row].name.clone(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&label_for)
        .x_desc(X_LABEL)
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(entries.iter().enumerate().map(|(i, e)| {
            let row = row_of(i);
            Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(row)),
                    (e.deviation, SegmentValue::Exact(row + 1)),
                ],
                bar_color(e.flag).filled(),
            )
        }))
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            vec![(0.0, SegmentValue::Exact(0)), (0.0, SegmentValue::Exact(n))],
            &BLACK,
        ))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Render the ranked deviations as a PNG image.
pub fn render_deviation_chart(entries: &[DeviationEntry], config: &ChartConfig) -> Result<Vec<u8>> {
    if entries.is_empty() {
        return Err(GlycoraError::RenderingFailure("no deviations to plot".into()));
    }
    let (width, height) = (config.width, config.height);
    if width == 0 || height == 0 {
        return Err(GlycoraError::RenderingFailure(format!(
            "invalid chart size {}x{}",
            width, height
        )));
    }

    // The axis spans 2 * extent; an infinite span never finishes laying out ticks.
    let extent = x_extent(entries);
    if !extent.is_finite() || !(2.0 * extent).is_finite() {
        return Err(GlycoraError::RenderingFailure(format!(
            "deviation range {} is too large to plot",
            extent
        )));
    }

    let mut buf = vec![0u8; width as usize * height as usize * 3];
    draw(entries, width, height, &mut buf)?;

    let image = image::RgbImage::from_raw(width, height, buf)
        .ok_or_else(|| render_err("pixel buffer does not match chart size"))?;
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(render_err)?;
    Ok(png)
}

/// Render and base64-encode, ready for the `plot` response field.
pub fn encode_chart_base64(entries: &[DeviationEntry], config: &ChartConfig) -> Result<String> {
    let png = render_deviation_chart(entries, config)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(png))
}
