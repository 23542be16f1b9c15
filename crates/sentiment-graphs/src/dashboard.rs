//! Diverging sentiment dashboard: builds the [`Figure`]/[`Axes`] pair for a
//! [`ScoreTable`].

use crate::colormap::Colormap;
use crate::figure::{Axes, Bar, BarSeries, Figure, Legend, LegendAnchor, ReferenceLine, Spines, Tick};
use plotters::style::{RGBColor, BLACK, WHITE};
use sentiment_common::{parse_hex_color, CategoryNames, ScoreTable, SentimentCounts};
use sentiment_config::ChartConfig;
use tracing::{debug, instrument};

/// Build the dashboard chart for `scores` with the default chart settings.
///
/// Each category becomes one row, first category at the top. The left label
/// of `category_names` extends left from zero and the right label extends
/// right. No drawing happens here; see [`Figure::render_svg`] and friends.
pub fn plot_dashboard(scores: &ScoreTable, category_names: &CategoryNames) -> (Figure, Axes) {
    plot_dashboard_with(scores, category_names, &ChartConfig::default())
}

/// Build the dashboard chart for `scores` with explicit chart settings.
#[instrument(skip_all, fields(categories = scores.len()))]
pub fn plot_dashboard_with(
    scores: &ScoreTable,
    category_names: &CategoryNames,
    config: &ChartConfig,
) -> (Figure, Axes) {
    let categories: Vec<String> = scores.categories().map(str::to_string).collect();
    let segments: Vec<[(f64, f64); 2]> = scores
        .iter()
        .map(|(_, counts)| diverging_segments(counts))
        .collect();

    let (color_start, color_end) = config.color_range;
    let colors =
        Colormap::CoolwarmReversed.sample_range(color_start, color_end, CategoryNames::LEN);

    let series = category_names
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(segment, (label, color))| BarSeries {
            label: label.to_string(),
            color,
            bars: segments
                .iter()
                .enumerate()
                .map(|(row, spans)| {
                    let (left, width) = spans[segment];
                    Bar {
                        row,
                        left,
                        width,
                        height: config.bar_height,
                    }
                })
                .collect(),
        })
        .collect();

    let (limit, step) = axis_scale(scores.max_count(), config.tick_step);
    let rows = categories.len().max(1) as f64;

    let axes = Axes {
        x_limits: (-(limit as f64), limit as f64),
        y_limits: (rows - 0.5, -0.5),
        x_ticks: mirrored_ticks(limit, step),
        categories,
        series,
        reference_line: ReferenceLine {
            x: 0.0,
            color: BLACK,
            alpha: config.reference_line_alpha,
            dashed: true,
        },
        spines: Spines {
            top: false,
            right: false,
            bottom: true,
            left: false,
        },
        legend: Legend {
            columns: CategoryNames::LEN,
            anchor: LegendAnchor::AboveLeft,
        },
    };

    let figure = Figure {
        width: config.width,
        height: config.height,
        background: parse_hex_color(&config.background_color)
            .map_or(WHITE, |(r, g, b)| RGBColor(r, g, b)),
        title: config.title.clone(),
        font_family: config.font_family.clone(),
    };

    debug!(
        limit,
        step,
        groups = axes.bar_groups(),
        bars = axes.bar_count(),
        "Built dashboard axes"
    );

    (figure, axes)
}

/// `(left, width)` of the negative and positive segments of one row.
///
/// The counts are stacked left to right from zero, then shifted so the
/// boundary between the two segments sits at zero.
fn diverging_segments(counts: SentimentCounts) -> [(f64, f64); 2] {
    let widths = counts.as_pair().map(f64::from);
    let starts = [0.0, widths[0]];
    let centre = widths[0];
    [
        (starts[0] - centre, widths[0]),
        (starts[1] - centre, widths[1]),
    ]
}

/// Most ticks drawn on either side of zero.
const MAX_TICKS_PER_SIDE: u64 = 50;

/// `(limit, step)` of the symmetric x axis for counts up to `max_count`.
///
/// `limit` is the smallest multiple of `step` that is at least `max_count`,
/// never below one step. `step` starts at `tick_step` and grows tenfold while
/// more than [`MAX_TICKS_PER_SIDE`] ticks would be needed.
pub fn axis_scale(max_count: u32, tick_step: u32) -> (u64, u64) {
    let max_count = u64::from(max_count);
    let mut step = u64::from(tick_step.max(1));
    while max_count.div_ceil(step) > MAX_TICKS_PER_SIDE {
        step *= 10;
    }
    ((max_count.div_ceil(step) * step).max(step), step)
}

/// Ticks from `-limit` to `limit` every `step`, labelled with absolute values.
fn mirrored_ticks(limit: u64, step: u64) -> Vec<Tick> {
    let step = step.max(1);
    let per_side = i64::try_from(limit / step).unwrap_or(0);
    (-per_side..=per_side)
        .map(|i| {
            let value = i.unsigned_abs() * step;
            Tick {
                value: i.signum() as f64 * value as f64,
                label: value.to_string(),
            }
        })
        .collect()
}
