//! Mean-centered comparison chart grid
//!
//! Renders a grid of line charts for the top correlated pairs: one column
//! for the most negative pairs, one for the most positive, one row per
//! displayed pair. Each cell shows both symbols' price series mean-centered
//! over the displayed window.

use crate::corr::TopPair;
use crate::data::PriceTable;
use crate::utils::statistics::mean_center;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use image::{Rgb, RgbImage};
use ndarray::Array1;
use std::path::Path;

/// Common color definitions
pub mod colors {
    use image::Rgb;

    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const LIGHT_GRAY: Rgb<u8> = Rgb([220, 220, 220]);
    pub const DARK_GRAY: Rgb<u8> = Rgb([120, 120, 120]);
    pub const BLUE: Rgb<u8> = Rgb([33, 150, 243]);
    pub const ORANGE: Rgb<u8> = Rgb([255, 152, 0]);
}

/// Chart canvas configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    pub series_1_color: Rgb<u8>,
    pub series_2_color: Rgb<u8>,
    pub margin: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            background: colors::WHITE,
            series_1_color: colors::BLUE,
            series_2_color: colors::ORANGE,
            margin: 10,
        }
    }
}

impl ChartConfig {
    /// Default canvas with optional height/width overrides
    pub fn with_size(height: Option<u32>, width: Option<u32>) -> Self {
        let mut config = Self::default();
        if let Some(h) = height {
            config.height = h;
        }
        if let Some(w) = width {
            config.width = w;
        }
        config
    }
}

/// Build the comparison grid image
///
/// The left column holds the `num_to_plot` most negative pairs (front of
/// the sorted pair list), the right column the most positive (back of the
/// list). Both series in a cell are sliced from `start` onward and
/// mean-centered over that slice.
pub fn comparison_grid(
    table: &PriceTable,
    top_pairs: &[TopPair],
    num_to_plot: usize,
    start: NaiveDate,
    config: &ChartConfig,
) -> Result<RgbImage> {
    if top_pairs.is_empty() || num_to_plot == 0 {
        bail!("No pairs to plot");
    }

    let n = num_to_plot.min(top_pairs.len());
    let negatives = &top_pairs[..n];
    let positives = &top_pairs[top_pairs.len() - n..];

    let mut img = RgbImage::from_pixel(config.width, config.height, config.background);
    let cell_w = config.width / 2;
    let cell_h = config.height / n as u32;

    println!("Comparison of top correlated stocks: left negatively, right positively correlated");
    for (col, column_pairs) in [negatives, positives].iter().enumerate() {
        for (row, pair) in column_pairs.iter().enumerate() {
            let s1 = table
                .symbol_prices_from(&pair.symbol_1, start)
                .with_context(|| format!("Unknown symbol {}", pair.symbol_1))?;
            let s2 = table
                .symbol_prices_from(&pair.symbol_2, start)
                .with_context(|| format!("Unknown symbol {}", pair.symbol_2))?;

            let c1 = mean_center(&s1);
            let c2 = mean_center(&s2);

            println!(
                "  [row {}, {}] {} vs {} mean centered ({}=blue, {}=orange, corr={:.4})",
                row + 1,
                if col == 0 { "left " } else { "right" },
                pair.symbol_1,
                pair.symbol_2,
                pair.symbol_1,
                pair.symbol_2,
                pair.corr,
            );

            let x0 = col as u32 * cell_w;
            let y0 = row as u32 * cell_h;
            draw_cell(&mut img, x0, y0, cell_w, cell_h, &c1, &c2, config);
        }
    }

    Ok(img)
}

/// Render the comparison grid and write it to a PNG file
pub fn render_comparisons<P: AsRef<Path>>(
    table: &PriceTable,
    top_pairs: &[TopPair],
    num_to_plot: usize,
    start: NaiveDate,
    config: &ChartConfig,
    output: P,
) -> Result<()> {
    let output = output.as_ref();
    let img = comparison_grid(table, top_pairs, num_to_plot, start, config)?;
    img.save(output)
        .with_context(|| format!("Failed to write chart to {}", output.display()))?;
    tracing::info!("Wrote comparison grid to {}", output.display());
    Ok(())
}

/// Draw one subplot cell: frame, zero baseline and both centered series
fn draw_cell(
    img: &mut RgbImage,
    x0: u32,
    y0: u32,
    cell_w: u32,
    cell_h: u32,
    series_1: &Array1<f64>,
    series_2: &Array1<f64>,
    config: &ChartConfig,
) {
    draw_rect_frame(img, x0, y0, cell_w, cell_h, colors::LIGHT_GRAY);

    let margin = config.margin.min(cell_w / 4).min(cell_h / 4);
    let plot_x = x0 + margin;
    let plot_y = y0 + margin;
    let plot_w = cell_w - 2 * margin;
    let plot_h = cell_h - 2 * margin;

    // Shared y-range across both centered series
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for &v in series_1.iter().chain(series_2.iter()) {
        if v.is_finite() {
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }
    }
    if !min_v.is_finite() || !max_v.is_finite() {
        return;
    }
    let range = if (max_v - min_v).abs() > 1e-12 {
        max_v - min_v
    } else {
        1.0
    };

    let to_y = |v: f64| -> u32 {
        let t = (v - min_v) / range;
        plot_y + ((1.0 - t) * (plot_h.saturating_sub(1)) as f64).round() as u32
    };

    // Zero baseline (series are mean-centered around it)
    if min_v <= 0.0 && max_v >= 0.0 {
        let y = to_y(0.0);
        for x in plot_x..plot_x + plot_w {
            img.put_pixel(x, y, colors::DARK_GRAY);
        }
    }

    draw_series(img, series_1, plot_x, plot_w, &to_y, config.series_1_color);
    draw_series(img, series_2, plot_x, plot_w, &to_y, config.series_2_color);
}

/// Draw one series as a polyline across the plot area
fn draw_series(
    img: &mut RgbImage,
    series: &Array1<f64>,
    plot_x: u32,
    plot_w: u32,
    to_y: &dyn Fn(f64) -> u32,
    color: Rgb<u8>,
) {
    let n = series.len();
    if n == 0 || plot_w == 0 {
        return;
    }

    let to_x = |i: usize| -> u32 {
        if n == 1 {
            plot_x + plot_w / 2
        } else {
            plot_x + (i as f64 / (n - 1) as f64 * (plot_w - 1) as f64).round() as u32
        }
    };

    let mut prev: Option<(u32, u32)> = None;
    for i in 0..n {
        let v = series[i];
        if !v.is_finite() {
            prev = None;
            continue;
        }
        let point = (to_x(i), to_y(v));
        match prev {
            Some(p) => draw_line(img, p, point, color),
            None => img.put_pixel(point.0, point.1, color),
        }
        prev = Some(point);
    }
}

/// Draw a straight line between two pixels
fn draw_line(img: &mut RgbImage, from: (u32, u32), to: (u32, u32), color: Rgb<u8>) {
    let (x1, y1) = (from.0 as f64, from.1 as f64);
    let (x2, y2) = (to.0 as f64, to.1 as f64);
    let steps = (x2 - x1).abs().max((y2 - y1).abs()).max(1.0) as u32;

    for s in 0..=steps {
        let t = s as f64 / steps as f64;
        let x = (x1 + (x2 - x1) * t).round() as u32;
        let y = (y1 + (y2 - y1) * t).round() as u32;
        if x < img.width() && y < img.height() {
            img.put_pixel(x, y, color);
        }
    }
}

/// Draw the outline of a cell
fn draw_rect_frame(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x1 = (x0 + w - 1).min(img.width() - 1);
    let y1 = (y0 + h - 1).min(img.height() - 1);
    for x in x0..=x1 {
        img.put_pixel(x, y0, color);
        img.put_pixel(x, y1, color);
    }
    for y in y0..=y1 {
        img.put_pixel(x0, y, color);
        img.put_pixel(x1, y, color);
    }
}
