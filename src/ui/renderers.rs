//! Pluggable painters for rows, task bars and links.

use egui::{Painter, Pos2, Rect, Rounding, Shape, Stroke};

use super::text::{paint_centered, PainterMeasure};
use super::theme;
use crate::model::LinkType;

pub trait RowRenderer {
    /// Paint the band of `row`. `bounds` is in screen space.
    fn paint_row(&self, painter: &Painter, row: i32, bounds: Rect);
}

pub trait TaskRenderer<T> {
    fn paint_task(&self, painter: &Painter, task: &T, text: &str, bounds: Rect, selected: bool);
}

pub trait LinkRenderer {
    /// Paint a link between two task bars given in screen space.
    fn paint_link(&self, painter: &Painter, kind: LinkType, from: Rect, to: Rect);
}

/// The renderers a chart paints with.
pub struct Renderers<T> {
    pub row: Box<dyn RowRenderer>,
    pub task: Box<dyn TaskRenderer<T>>,
    pub link: Box<dyn LinkRenderer>,
}

impl<T> Default for Renderers<T> {
    fn default() -> Self {
        Self {
            row: Box::new(BasicRowRenderer),
            task: Box::new(BasicTaskRenderer),
            link: Box::new(BasicLinkRenderer),
        }
    }
}

/// Alternating row stripes.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicRowRenderer;

impl RowRenderer for BasicRowRenderer {
    fn paint_row(&self, painter: &Painter, row: i32, bounds: Rect) {
        let fill = if row % 2 == 0 {
            theme::BG_PANEL
        } else {
            theme::BG_DARK
        };
        painter.rect_filled(bounds, 0.0, fill);
    }
}

/// Filled bar with an outline, an accent border when selected and a centred
/// label.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicTaskRenderer;

impl<T> TaskRenderer<T> for BasicTaskRenderer {
    fn paint_task(&self, painter: &Painter, _task: &T, text: &str, bounds: Rect, selected: bool) {
        let rounding = Rounding::same(theme::BAR_ROUNDING);
        painter.rect_filled(bounds, rounding, theme::TASK_FILL);
        painter.rect_stroke(bounds, rounding, Stroke::new(1.0, theme::TASK_OUTLINE));
        if selected {
            painter.rect_stroke(bounds, rounding, Stroke::new(2.0, theme::BORDER_ACCENT));
        }

        let measure = PainterMeasure::new(painter, theme::font_bar());
        paint_centered(painter, &measure, text, bounds, theme::TEXT_ON_BAR);
    }
}

/// Straight arrow from the source anchor to the target anchor.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicLinkRenderer;

impl LinkRenderer for BasicLinkRenderer {
    fn paint_link(&self, painter: &Painter, kind: LinkType, from: Rect, to: Rect) {
        let (tail, tip) = link_anchors(kind, from, to);
        let arrow = arrow(tail, tip);
        let stroke = Stroke::new(1.0, theme::LINK_COLOR);
        painter.line_segment([arrow.tail, arrow.notch], stroke);
        painter.add(Shape::convex_polygon(
            vec![arrow.tip, arrow.left, arrow.right],
            theme::LINK_COLOR,
            Stroke::NONE,
        ));
    }
}

/// Where a link leaves its source bar and enters its target bar, both at the
/// bars' vertical centres.
pub fn link_anchors(kind: LinkType, from: Rect, to: Rect) -> (Pos2, Pos2) {
    let (from_x, to_x) = match kind {
        LinkType::StartToStart => (from.left(), to.left()),
        LinkType::FinishToStart => (from.right(), to.left()),
        LinkType::FinishToFinish => (from.right(), to.right()),
    };
    (
        Pos2::new(from_x, from.center().y),
        Pos2::new(to_x, to.center().y),
    )
}

const BARB_LENGTH: f32 = 9.0;
const NOTCH_LENGTH: f32 = 6.0;
const BARB_ANGLE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub tail: Pos2,
    /// Where the shaft meets the head.
    pub notch: Pos2,
    pub tip: Pos2,
    pub left: Pos2,
    pub right: Pos2,
}

/// Arrow head geometry of fixed size regardless of shaft length.
pub fn arrow(tail: Pos2, tip: Pos2) -> Arrow {
    let delta = tail - tip;
    let direction = if delta.x == 0.0 && delta.y == 0.0 {
        // Degenerate links point left to right.
        -std::f32::consts::FRAC_PI_2
    } else {
        delta.x.atan2(delta.y)
    };
    let offset = |length: f32, angle: f32| {
        tip + egui::vec2(length * angle.sin(), length * angle.cos())
    };
    Arrow {
        tail,
        notch: offset(NOTCH_LENGTH, direction),
        tip,
        left: offset(BARB_LENGTH, direction + BARB_ANGLE),
        right: offset(BARB_LENGTH, direction - BARB_ANGLE),
    }
}
