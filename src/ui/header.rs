//! Adaptive time-axis header.
//!
//! The header tries granularity pairs from finest to coarsest and picks the
//! first whose fine labels all fit their buckets across the visible span.
//! Layout is pure; painting only draws a finished [`HeaderLayout`].

use egui::{pos2, Painter, Rect, Stroke};

use super::text::{fit_text, PainterMeasure, TextMeasure};
use super::theme;
use crate::model::{Calendar, CoordinateMapper, Granularity};

/// A fine row of labels under a coarse row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLevel {
    pub fine: Granularity,
    pub fine_pattern: &'static str,
    pub coarse: Granularity,
    pub coarse_pattern: &'static str,
}

/// Candidate levels, finest first.
pub const LEVELS: [HeaderLevel; 4] = [
    HeaderLevel {
        fine: Granularity::Hour,
        fine_pattern: "%-I %p",
        coarse: Granularity::Day,
        coarse_pattern: "%d %B %Y",
    },
    HeaderLevel {
        fine: Granularity::Day,
        fine_pattern: "%d",
        coarse: Granularity::Month,
        coarse_pattern: "%b %Y",
    },
    HeaderLevel {
        fine: Granularity::Week,
        fine_pattern: "Week %V",
        coarse: Granularity::Month,
        coarse_pattern: "%b %Y",
    },
    HeaderLevel {
        fine: Granularity::Month,
        fine_pattern: "%b",
        coarse: Granularity::Year,
        coarse_pattern: "%Y",
    },
];

/// Shown alone, at double height, when no level fits.
const FALLBACK_PATTERN: &str = "%Y";

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub start_x: f32,
    pub end_x: f32,
    pub text: String,
}

impl HeaderCell {
    pub fn width(&self) -> f32 {
        self.end_x - self.start_x
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBand {
    pub granularity: Granularity,
    /// Offset from the top of the header.
    pub y: f32,
    pub height: f32,
    pub cells: Vec<HeaderCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    /// The chosen level, `None` for the year-only fallback.
    pub level: Option<HeaderLevel>,
    pub bands: Vec<HeaderBand>,
    pub height: f32,
}

/// Two text lines.
pub fn header_height(measure: &dyn TextMeasure) -> f32 {
    2.0 * measure.line_height()
}

/// Walks calendar buckets from the one containing the left edge through the
/// right edge, plus the partially visible bucket after it.
struct BucketWalk<'a> {
    mapper: &'a CoordinateMapper,
    calendar: Calendar,
    granularity: Granularity,
    pattern: &'a str,
    current: i64,
    maximum: i64,
    finished: bool,
}

impl<'a> BucketWalk<'a> {
    fn new(
        mapper: &'a CoordinateMapper,
        calendar: Calendar,
        granularity: Granularity,
        pattern: &'a str,
        min_x: f32,
        max_x: f32,
    ) -> Self {
        let minimum = mapper.screen_to_canonical(min_x as f64);
        Self {
            mapper,
            calendar,
            granularity,
            pattern,
            current: calendar.truncate(minimum, granularity),
            maximum: mapper.screen_to_canonical(max_x as f64),
            finished: false,
        }
    }
}

impl Iterator for BucketWalk<'_> {
    type Item = HeaderCell;

    fn next(&mut self) -> Option<HeaderCell> {
        if self.finished {
            return None;
        }
        if self.current > self.maximum {
            self.finished = true;
        }
        let next = self.calendar.advance(self.current, self.granularity);
        let cell = HeaderCell {
            start_x: self.mapper.canonical_to_screen(self.current) as f32,
            end_x: self.mapper.canonical_to_screen(next) as f32,
            text: self.calendar.format(self.current, self.pattern),
        };
        self.current = next;
        Some(cell)
    }
}

/// Whether every label of `granularity` fits its bucket over `[min_x, max_x]`.
pub fn level_fits(
    mapper: &CoordinateMapper,
    calendar: Calendar,
    granularity: Granularity,
    pattern: &str,
    min_x: f32,
    max_x: f32,
    measure: &dyn TextMeasure,
) -> bool {
    BucketWalk::new(mapper, calendar, granularity, pattern, min_x, max_x)
        .all(|cell| cell.width() >= measure.text_width(&cell.text))
}

/// The finest level whose fine labels fit, if any.
pub fn choose_level(
    mapper: &CoordinateMapper,
    calendar: Calendar,
    min_x: f32,
    max_x: f32,
    measure: &dyn TextMeasure,
) -> Option<HeaderLevel> {
    LEVELS.iter().copied().find(|level| {
        level_fits(
            mapper,
            calendar,
            level.fine,
            level.fine_pattern,
            min_x,
            max_x,
            measure,
        )
    })
}

/// Lay out the header for the chart-local span `[min_x, max_x]`.
pub fn layout_header(
    mapper: &CoordinateMapper,
    calendar: Calendar,
    min_x: f32,
    max_x: f32,
    measure: &dyn TextMeasure,
) -> HeaderLayout {
    let line = measure.line_height();
    let band = |granularity, pattern, y, height| HeaderBand {
        granularity,
        y,
        height,
        cells: BucketWalk::new(mapper, calendar, granularity, pattern, min_x, max_x).collect(),
    };

    let level = choose_level(mapper, calendar, min_x, max_x, measure);
    tracing::trace!(?level, min_x, max_x, "header level");

    let bands = match level {
        Some(level) => vec![
            band(level.coarse, level.coarse_pattern, 0.0, line),
            band(level.fine, level.fine_pattern, line, line),
        ],
        None => vec![band(Granularity::Year, FALLBACK_PATTERN, 0.0, 2.0 * line)],
    };

    HeaderLayout {
        level,
        bands,
        height: 2.0 * line,
    }
}

/// Draw a header layout into `rect`. `origin_x` is the screen x of the
/// chart's local origin.
pub fn paint_header(
    painter: &Painter,
    measure: &PainterMeasure<'_>,
    layout: &HeaderLayout,
    origin_x: f32,
    rect: Rect,
) {
    let painter = painter.with_clip_rect(rect);
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);
    let grid = Stroke::new(1.0, theme::GRID_LINE);

    for (index, band) in layout.bands.iter().enumerate() {
        let top = rect.top() + band.y;
        let bottom = top + band.height;
        if index > 0 {
            painter.hline(rect.x_range(), top, Stroke::new(1.0, theme::BORDER_SUBTLE));
        }
        for cell in &band.cells {
            let cell_rect = Rect::from_min_max(
                pos2(origin_x + cell.start_x, top),
                pos2(origin_x + cell.end_x, bottom),
            );
            painter.vline(cell_rect.left(), top..=bottom, grid);
            let Some(label) = fit_text(measure, &cell.text, cell_rect.width()) else {
                continue;
            };
            painter.with_clip_rect(cell_rect).text(
                cell_rect.center(),
                egui::Align2::CENTER_CENTER,
                label,
                measure.font().clone(),
                theme::TEXT_SECONDARY,
            );
        }
    }

    painter.hline(
        rect.x_range(),
        rect.bottom() - 1.0,
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DAY_MILLIS;
    use crate::ui::text::tests::FixedWidth;

    const MEASURE: FixedWidth = FixedWidth {
        width: 7.0,
        height: 12.0,
    };

    fn mapper(days: i64) -> CoordinateMapper {
        CoordinateMapper::new(0, days * DAY_MILLIS, 200.0)
    }

    #[test]
    fn picks_days_for_a_week_in_two_hundred_pixels() {
        let mapper = mapper(7);
        assert!(!level_fits(
            &mapper,
            Calendar::Utc,
            Granularity::Hour,
            "%-I %p",
            0.0,
            200.0,
            &MEASURE
        ));

        let layout = layout_header(&mapper, Calendar::Utc, 0.0, 190.0, &MEASURE);
        assert_eq!(layout.level, Some(LEVELS[1]));
        assert_eq!(layout.height, 24.0);

        let coarse = &layout.bands[0];
        assert_eq!(coarse.granularity, Granularity::Month);
        let texts: Vec<_> = coarse.cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Jan 1970", "Feb 1970"]);

        let fine = &layout.bands[1];
        assert_eq!((fine.y, fine.height), (12.0, 12.0));
        // Days 1 through 7 plus the trailing bucket.
        assert_eq!(fine.cells.len(), 8);
        assert_eq!(fine.cells[0].text, "01");
        assert_eq!(fine.cells[0].start_x, 0.0);
        assert!((fine.cells[0].width() - 200.0 / 7.0).abs() < 1e-3);
        assert_eq!(fine.cells[7].text, "08");
    }

    #[test]
    fn chosen_level_is_the_finest_whose_labels_all_fit() {
        for days in [1, 7, 20, 70] {
            let mapper = mapper(days);
            let layout = layout_header(&mapper, Calendar::Utc, 0.0, 200.0, &MEASURE);
            let Some(level) = layout.level else {
                panic!("no level fits {} days", days);
            };
            for cell in &layout.bands[1].cells {
                assert!(
                    cell.width() >= MEASURE.text_width(&cell.text),
                    "{:?} too narrow for {:?} over {} days",
                    cell,
                    level.fine,
                    days
                );
            }
            for finer in LEVELS.iter().take_while(|candidate| **candidate != level) {
                assert!(
                    !level_fits(
                        &mapper,
                        Calendar::Utc,
                        finer.fine,
                        finer.fine_pattern,
                        0.0,
                        200.0,
                        &MEASURE
                    ),
                    "{:?} also fits {} days",
                    finer.fine,
                    days
                );
            }
        }
    }

    #[test]
    fn coarser_spans_fall_back_to_months() {
        let layout = layout_header(&mapper(70), Calendar::Utc, 0.0, 200.0, &MEASURE);
        assert_eq!(layout.level, Some(LEVELS[3]));
        assert_eq!(layout.bands[0].cells[0].text, "1970");
        assert_eq!(layout.bands[1].cells[0].text, "Jan");
        assert_eq!(layout.bands[1].cells[1].text, "Feb");
    }

    #[test]
    fn very_long_spans_show_years_only() {
        let layout = layout_header(&mapper(36_525), Calendar::Utc, 0.0, 200.0, &MEASURE);
        assert_eq!(layout.level, None);
        assert_eq!(layout.bands.len(), 1);
        assert_eq!(layout.bands[0].height, 24.0);
        assert_eq!(layout.bands[0].cells[0].text, "1970");
    }

    #[test]
    fn walk_starts_at_the_bucket_containing_the_left_edge() {
        let mapper = mapper(7);
        // Halfway through the second day.
        let x = mapper.canonical_to_screen(DAY_MILLIS + DAY_MILLIS / 2) as f32;
        let layout = layout_header(&mapper, Calendar::Utc, x, 200.0, &MEASURE);
        let first = &layout.bands[1].cells[0];
        assert_eq!(first.text, "02");
        assert!(first.start_x < x);
    }

    #[test]
    fn hour_labels_use_twelve_hour_clock() {
        let mapper = CoordinateMapper::new(0, 6 * 3_600_000, 400.0);
        let layout = layout_header(&mapper, Calendar::Utc, 0.0, 400.0, &MEASURE);
        assert_eq!(layout.level, Some(LEVELS[0]));
        assert_eq!(layout.bands[1].cells[0].text, "12 AM");
        assert_eq!(layout.bands[1].cells[1].text, "1 AM");
        assert_eq!(layout.bands[0].cells[0].text, "01 January 1970");
    }
}
