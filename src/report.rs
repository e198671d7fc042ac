use std::{ops::Range, path::Path};

use log::info;
use plotters::prelude::*;

use crate::{
    data::Dataset,
    error::{RegressionErr, Result},
    training::TrainedModel,
};

const SIZE: (u32, u32) = (1200, 500);
const MARGIN: i32 = 15;

fn reporting_err<E: std::fmt::Display>(e: E) -> RegressionErr {
    RegressionErr::Reporting(e.to_string())
}

/// Pads a range by 5% on each side, or by one unit when it is empty.
fn padded(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    (lo - pad)..(hi + pad)
}

/// Renders the training report as an SVG file.
///
/// The left panel shows the raw samples and the fitted line between the
/// smallest and largest x; the right one the MSE of every epoch.
///
/// # Errors
/// Returns `Reporting` if the chart can't be drawn or the file written.
pub fn render_report<P: AsRef<Path>>(
    path: P,
    dataset: &Dataset,
    model: &TrainedModel,
) -> Result<()> {
    let path = path.as_ref();
    info!("rendering report to [{}]", path.display());

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(reporting_err)?;

    let (left, right) = root.split_horizontally(SIZE.0 as i32 / 2);
    draw_fit(&left, dataset, model)?;
    draw_errors(&right, model)?;

    root.present().map_err(reporting_err)?;
    info!("report rendered to [{}]", path.display());
    Ok(())
}

fn draw_fit<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    dataset: &Dataset,
    model: &TrainedModel,
) -> Result<()> {
    let bounds = model.bounds();
    let (min_x, max_x) = (bounds.min_x(), bounds.max_x());
    let line = [(min_x, model.predict(min_x)), (max_x, model.predict(max_x))];

    let lo_y = bounds.min_y().min(line[0].1).min(line[1].1);
    let hi_y = bounds.max_y().max(line[0].1).max(line[1].1);

    let mut chart = ChartBuilder::on(area)
        .caption("Price vs Km", ("sans-serif", 20))
        .margin(MARGIN)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(padded(min_x, max_x), padded(lo_y, hi_y))
        .map_err(reporting_err)?;

    chart
        .configure_mesh()
        .x_desc("Km")
        .y_desc("Price")
        .draw()
        .map_err(reporting_err)?;

    chart
        .draw_series(dataset.iter().map(|s| Circle::new((s.x, s.y), 3, BLUE.filled())))
        .map_err(reporting_err)?;

    chart
        .draw_series(LineSeries::new(line, &RED))
        .map_err(reporting_err)?;

    Ok(())
}

fn draw_errors<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    model: &TrainedModel,
) -> Result<()> {
    let trace = model.trace();
    let (lo, hi) = trace.mse_range().unwrap_or((0.0, 1.0));
    let last_epoch = trace.last().map_or(1, |e| e.epoch.max(1));

    let mut chart = ChartBuilder::on(area)
        .caption("Error vs Epoch", ("sans-serif", 20))
        .margin(MARGIN)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..last_epoch as f64, padded(lo, hi))
        .map_err(reporting_err)?;

    chart
        .configure_mesh()
        .x_desc("Epoch")
        .y_desc("Mean Squared Error")
        .draw()
        .map_err(reporting_err)?;

    chart
        .draw_series(LineSeries::new(
            trace.entries().iter().map(|e| (e.epoch as f64, e.mse)),
            &BLUE,
        ))
        .map_err(reporting_err)?;

    Ok(())
}
