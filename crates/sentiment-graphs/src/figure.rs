//! Figure and axes description of a dashboard chart, and its plotters renderer.
//!
//! [`Figure`] carries page-level settings, [`Axes`] carries everything inside
//! the plot. Building the pair does no drawing; call one of the `render_*`
//! methods, or [`Figure::draw`] with any plotters backend, to rasterize it.

use plotters::coord::Shift;
use plotters::prelude::*;
use sentiment_common::{truncate_string, Result, SentimentError};
use std::path::Path;
use tracing::info;

const TITLE_FONT_SIZE: f64 = 20.0;
const LABEL_FONT_SIZE: f64 = 13.0;
const LEGEND_FONT_SIZE: f64 = 12.0;
const LEGEND_AREA_HEIGHT: u32 = 28;
const LEGEND_SWATCH: i32 = 12;
const LEGEND_GAP: i32 = 6;
const CHART_MARGIN: u32 = 12;
const X_LABEL_AREA: u32 = 30;
const Y_LABEL_AREA: u32 = 140;
const MAX_LABEL_CHARS: usize = 20;
const REFERENCE_DASHES: usize = 24;

/// Page-level settings of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Page fill.
    pub background: RGBColor,
    /// Title drawn above the legend.
    pub title: String,
    /// Font family for every piece of text.
    pub font_family: String,
}

/// One horizontal bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Row index into [`Axes::categories`].
    pub row: usize,
    /// Left edge in data units.
    pub left: f64,
    /// Extent to the right of `left`.
    pub width: f64,
    /// Thickness as a fraction of one row.
    pub height: f64,
}

impl Bar {
    /// Right edge in data units.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// All bars for one label, sharing a color and a legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// Legend text.
    pub label: String,
    /// Fill color.
    pub color: RGBColor,
    /// One bar per category row.
    pub bars: Vec<Bar>,
}

/// A labelled x-axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position in data units.
    pub value: f64,
    /// Text shown under the tick.
    pub label: String,
}

/// Vertical guide line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceLine {
    /// Position in data units.
    pub x: f64,
    /// Stroke color.
    pub color: RGBColor,
    /// Stroke opacity.
    pub alpha: f64,
    /// Whether the stroke is dashed.
    pub dashed: bool,
}

/// Which plot borders are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spines {
    /// Upper border.
    pub top: bool,
    /// Right border.
    pub right: bool,
    /// Lower border.
    pub bottom: bool,
    /// Left border.
    pub left: bool,
}

/// Where the legend sits relative to the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendAnchor {
    /// Above the plot, starting at its left edge.
    AboveLeft,
}

/// Legend layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Legend {
    /// Entries per line.
    pub columns: usize,
    /// Placement.
    pub anchor: LegendAnchor,
}

/// Everything drawn inside the plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    /// Row labels; row `i` is drawn at `y = i`.
    pub categories: Vec<String>,
    /// Bar series, one per label.
    pub series: Vec<BarSeries>,
    /// `(left, right)` x-axis limits.
    pub x_limits: (f64, f64),
    /// `(bottom, top)` y-axis limits in row units; bottom > top means the
    /// axis is inverted and row 0 is at the top.
    pub y_limits: (f64, f64),
    /// Labelled x-axis ticks.
    pub x_ticks: Vec<Tick>,
    /// Guide line at zero.
    pub reference_line: ReferenceLine,
    /// Visible borders.
    pub spines: Spines,
    /// Legend layout.
    pub legend: Legend,
}

impl Axes {
    /// Number of category rows.
    pub fn bar_groups(&self) -> usize {
        self.categories.len()
    }

    /// Total number of bars across every series.
    pub fn bar_count(&self) -> usize {
        self.series.iter().map(|s| s.bars.len()).sum()
    }

    /// Whether row 0 is drawn at the top.
    pub fn is_y_inverted(&self) -> bool {
        self.y_limits.0 > self.y_limits.1
    }

    /// Tick labels left to right.
    pub fn x_tick_labels(&self) -> Vec<&str> {
        self.x_ticks.iter().map(|t| t.label.as_str()).collect()
    }

    /// Distance between neighbouring ticks, or the right limit when there
    /// are fewer than two ticks.
    pub fn tick_spacing(&self) -> f64 {
        let spacing = match self.x_ticks.as_slice() {
            [first, second, ..] => second.value - first.value,
            _ => self.x_limits.1,
        };
        if spacing.is_finite() && spacing > 0.0 {
            spacing
        } else {
            1.0
        }
    }

    /// Row index of `category`.
    pub fn row_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Vertical screen order of `category`, 0 being the topmost row.
    pub fn display_position(&self, category: &str) -> Option<usize> {
        let row = self.row_of(category)?;
        if self.is_y_inverted() {
            Some(row)
        } else {
            Some(self.categories.len() - 1 - row)
        }
    }
}

impl Figure {
    /// Draw the chart onto `root`.
    ///
    /// The caller is responsible for calling `present` on the backend.
    pub fn draw<DB>(&self, axes: &Axes, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let font = self.font_family.as_str();
        root.fill(&self.background)?;
        let titled = root.titled(&self.title, (font, TITLE_FONT_SIZE).into_font())?;
        let (legend_area, plot_area) = titled.split_vertically(LEGEND_AREA_HEIGHT);

        let (y_bottom, y_top) = axes.y_limits;
        let (lo, hi) = (y_bottom.min(y_top), y_bottom.max(y_top));
        let inverted = axes.is_y_inverted();
        // Row coordinate to plotters' upward-growing y, and back.
        let flip = move |y: f64| if inverted { lo + hi - y } else { y };

        // The x axis is drawn in tick units so the mesh places one label on
        // every tick.
        let unit = axes.tick_spacing();
        let (x0, x1) = (axes.x_limits.0 / unit, axes.x_limits.1 / unit);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(CHART_MARGIN)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d(x0..x1, lo..hi)?;

        let x_formatter = |x: &f64| {
            axes.x_ticks
                .iter()
                .find(|t| (t.value / unit - *x).abs() < 1e-6)
                .map_or_else(String::new, |t| t.label.clone())
        };
        let y_formatter = |y: &f64| {
            let row = flip(*y).round();
            if row < 0.0 {
                return String::new();
            }
            axes.categories
                .get(row as usize)
                .map_or_else(String::new, |c| truncate_string(c, MAX_LABEL_CHARS))
        };

        chart
            .configure_mesh()
            .disable_mesh()
            .axis_style(&TRANSPARENT)
            .x_labels(axes.x_ticks.len())
            .y_labels(axes.categories.len())
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style((font, LABEL_FONT_SIZE).into_font())
            .draw()?;

        for series in &axes.series {
            let color = series.color;
            chart.draw_series(series.bars.iter().map(|bar| {
                let centre = flip(bar.row as f64);
                let half = bar.height / 2.0;
                Rectangle::new(
                    [(bar.left / unit, centre - half), (bar.right() / unit, centre + half)],
                    color.filled(),
                )
            }))?;
        }

        let line = axes.reference_line;
        let line_x = line.x / unit;
        let line_style = line.color.mix(line.alpha).stroke_width(1);
        let segments = if line.dashed {
            dash_segments(lo, hi, REFERENCE_DASHES)
        } else {
            vec![(lo, hi)]
        };
        chart.draw_series(
            segments
                .into_iter()
                .map(|(from, to)| PathElement::new(vec![(line_x, from), (line_x, to)], line_style)),
        )?;

        let spines = [
            (axes.spines.bottom, [(x0, lo), (x1, lo)]),
            (axes.spines.top, [(x0, hi), (x1, hi)]),
            (axes.spines.left, [(x0, lo), (x0, hi)]),
            (axes.spines.right, [(x1, lo), (x1, hi)]),
        ];
        chart.draw_series(
            spines
                .into_iter()
                .filter(|(visible, _)| *visible)
                .map(|(_, points)| PathElement::new(points.to_vec(), BLACK.stroke_width(1))),
        )?;

        self.draw_legend(axes, &legend_area)?;
        Ok(())
    }

    fn draw_legend<DB>(&self, axes: &Axes, area: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let style = (self.font_family.as_str(), LEGEND_FONT_SIZE)
            .into_font()
            .color(&BLACK);

        let (_, height) = area.dim_in_pixel();
        let swatch_top = (height as i32 - LEGEND_SWATCH) / 2;
        let left_edge = match axes.legend.anchor {
            LegendAnchor::AboveLeft => (CHART_MARGIN + Y_LABEL_AREA) as i32,
        };

        let mut x = left_edge;
        for series in &axes.series {
            area.draw(&Rectangle::new(
                [(x, swatch_top), (x + LEGEND_SWATCH, swatch_top + LEGEND_SWATCH)],
                series.color.filled(),
            ))?;
            x += LEGEND_SWATCH + LEGEND_GAP;
            area.draw(&Text::new(series.label.clone(), (x, swatch_top), style.clone()))?;
            let (text_width, _) = area.estimate_text_size(&series.label, &style)?;
            x += text_width as i32 + 3 * LEGEND_GAP;
        }
        Ok(())
    }

    /// Render to an SVG document.
    pub fn render_svg(&self, axes: &Axes) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height)).into_drawing_area();
            self.draw(axes, &root)?;
            root.present()?;
        }
        Ok(svg)
    }

    /// Render to PNG-encoded bytes.
    pub fn render_png_bytes(&self, axes: &Axes) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (self.width, self.height)).into_drawing_area();
            self.draw(axes, &root)?;
            root.present()?;
        }

        let image = image::RgbImage::from_raw(self.width, self.height, buffer)
            .ok_or_else(|| SentimentError::graph("Bitmap buffer does not match figure size"))?;
        let mut png = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .map_err(|e| SentimentError::graph_with_source("Failed to encode PNG", e))?;
        Ok(png)
    }

    /// Render to a file; `.svg` paths get SVG, anything else a bitmap whose
    /// format follows the extension.
    pub fn render_to_file(&self, axes: &Axes, path: &Path) -> Result<()> {
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        if is_svg {
            let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
            self.draw(axes, &root)?;
            root.present()?;
        } else {
            let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
            self.draw(axes, &root)?;
            root.present()?;
        }

        info!("Rendered dashboard to {}", path.display());
        Ok(())
    }
}

/// Splits `[from, to]` into `dashes` drawn segments separated by equal gaps.
fn dash_segments(from: f64, to: f64, dashes: usize) -> Vec<(f64, f64)> {
    if dashes == 0 {
        return Vec::new();
    }
    let period = (to - from) / dashes as f64;
    (0..dashes)
        .map(|i| {
            let start = (i as f64).mul_add(period, from);
            (start, period.mul_add(0.6, start))
        })
        .collect()
}
