//! Viewport and scroll model
//!
//! `scroll` is the index of the topmost visible line. It is signed: negative
//! values are overscroll above the first line, and it may run past the last
//! line up to the overscroll bound.

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::math;

/// Duration of the frame the scroll rate is expressed against (60 Hz)
pub const REFERENCE_FRAME_SECS: f32 = 1.0 / 60.0;

/// Distance under which the smooth value snaps to its target
pub const SNAP_DISTANCE: f32 = 0.01;

pub const DEFAULT_SCROLL_RATE: f32 = 0.4;

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn visible_line_count(&self, line_height: f32, reserve_row: bool) -> usize {
        visible_line_count(self.height, line_height, reserve_row)
    }
}

/// Number of rows that can show text, partial bottom row included
pub fn visible_line_count(viewport_height: f32, line_height: f32, reserve_row: bool) -> usize {
    if line_height.is_nan() || viewport_height.is_nan() || line_height <= 0.0 || viewport_height <= 0.0 {
        return 1;
    }
    let rows = math::ceil(viewport_height / line_height) as usize;
    rows.saturating_sub(usize::from(reserve_row)).max(1)
}

/// Keep `cursor_line` inside `[scroll, scroll + visible_count - 2]`.
///
/// The bottom two rows (the partial row and one spare) are kept clear of the
/// cursor. Scroll only changes when the cursor would leave that band.
pub fn clamp_to_cursor(scroll: i64, cursor_line: usize, visible_count: usize) -> i64 {
    let cursor = cursor_line as i64;
    let band = visible_count.saturating_sub(2) as i64;
    if cursor < scroll {
        cursor
    } else if cursor > scroll + band {
        cursor - band
    } else {
        scroll
    }
}

/// Overscroll margin in lines
pub fn overscroll_margin(visible_count: usize, fraction: f32) -> i64 {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    math::floor(visible_count as f32 * fraction) as i64
}

/// Bound scroll so that at least one line stays on screen and at most a
/// fraction of a screenful is blank above or below the text.
pub fn clamp_to_overscroll_limit(
    scroll: i64,
    line_count: usize,
    visible_count: usize,
    fraction: f32,
) -> i64 {
    let margin = overscroll_margin(visible_count, fraction);
    let visible = visible_count as i64;
    let last = line_count.saturating_sub(1) as i64;

    let lower = -margin.min(visible - 1).max(0);
    let upper = (line_count as i64 - visible + margin).clamp(0, last);
    scroll.clamp(lower, upper)
}

/// Additive wheel scroll; negative deltas move toward the top
pub fn mouse_scroll(scroll: i64, wheel_delta: i32, lines_per_notch: u32) -> i64 {
    scroll.saturating_add(i64::from(wheel_delta) * i64::from(lines_per_notch))
}

/// Lines moved by one page jump
pub fn page_step(visible_count: usize) -> usize {
    visible_count.saturating_sub(2).max(1)
}

/// One interpolation step of the smooth scroll value
pub fn smooth_scroll_step(current: f32, target: f32, rate: f32) -> f32 {
    if math::abs(target - current) < SNAP_DISTANCE {
        return target;
    }
    let next = current + (target - current) * rate;
    if math::abs(target - next) < SNAP_DISTANCE {
        target
    } else {
        next
    }
}

/// Whether the host should keep redrawing without input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum RedrawMode {
    #[default]
    Idle,
    Continuous,
}

/// Smooth scroll value animated toward the integer scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    value: f32,
    mode: RedrawMode,
    seed_frame: bool,
}

impl SmoothScroll {
    pub fn new(scroll: i64) -> Self {
        Self {
            value: scroll as f32,
            mode: RedrawMode::Idle,
            seed_frame: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn mode(&self) -> RedrawMode {
        self.mode
    }

    pub fn is_continuous(&self) -> bool {
        self.mode == RedrawMode::Continuous
    }

    /// Start animating toward `target`.
    ///
    /// Entering continuous mode seeds one reference frame for the next tick,
    /// since the host has no meaningful frame time after waiting for events.
    pub fn retarget(&mut self, target: i64) {
        if self.value == target as f32 {
            self.mode = RedrawMode::Idle;
            return;
        }
        if self.mode == RedrawMode::Idle {
            self.mode = RedrawMode::Continuous;
            self.seed_frame = true;
        }
    }

    /// Skip the animation
    pub fn jump(&mut self, target: i64) {
        self.value = target as f32;
        self.mode = RedrawMode::Idle;
        self.seed_frame = false;
    }

    /// Advance by `elapsed_secs`; returns whether the value moved
    pub fn tick(&mut self, target: i64, elapsed_secs: f32, rate: f32) -> bool {
        if self.mode == RedrawMode::Idle {
            return false;
        }
        let frames = if self.seed_frame {
            self.seed_frame = false;
            1.0
        } else {
            elapsed_secs / REFERENCE_FRAME_SECS
        };
        let scaled = rate * frames;
        let scaled = if scaled.is_nan() { 0.0 } else { scaled.clamp(0.0, 1.0) };

        let target = target as f32;
        let next = smooth_scroll_step(self.value, target, scaled);
        let moved = next != self.value;
        self.value = next;
        if self.value == target {
            self.mode = RedrawMode::Idle;
        }
        moved
    }
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_line_count() {
        assert_eq!(visible_line_count(100.0, 10.0, false), 10);
        assert_eq!(visible_line_count(105.0, 10.0, false), 11);
        assert_eq!(visible_line_count(105.0, 10.0, true), 10);
        assert_eq!(visible_line_count(5.0, 10.0, true), 1);
        assert_eq!(visible_line_count(0.0, 10.0, false), 1);
        assert_eq!(visible_line_count(100.0, 0.0, false), 1);
    }

    #[test]
    fn test_clamp_to_cursor_band() {
        // band is [scroll, scroll + 8] for 10 visible rows
        assert_eq!(clamp_to_cursor(0, 5, 10), 0);
        assert_eq!(clamp_to_cursor(0, 8, 10), 0);
        assert_eq!(clamp_to_cursor(0, 9, 10), 1);
        assert_eq!(clamp_to_cursor(20, 3, 10), 3);
        assert_eq!(clamp_to_cursor(-3, 0, 10), -3);
    }

    #[test]
    fn test_clamp_to_cursor_tiny_viewport() {
        assert_eq!(clamp_to_cursor(0, 4, 1), 4);
        assert_eq!(clamp_to_cursor(0, 4, 2), 4);
    }

    #[test]
    fn test_overscroll_bounds() {
        // 100 lines, 10 visible, half a screen of overscroll
        assert_eq!(clamp_to_overscroll_limit(-20, 100, 10, 0.5), -5);
        assert_eq!(clamp_to_overscroll_limit(200, 100, 10, 0.5), 95);
        assert_eq!(clamp_to_overscroll_limit(40, 100, 10, 0.5), 40);
        assert_eq!(clamp_to_overscroll_limit(-20, 100, 10, 0.0), 0);
        assert_eq!(clamp_to_overscroll_limit(200, 100, 10, 0.0), 90);
    }

    #[test]
    fn test_overscroll_keeps_a_line_visible() {
        assert_eq!(clamp_to_overscroll_limit(-50, 100, 10, 1.0), -9);
        assert_eq!(clamp_to_overscroll_limit(500, 100, 10, 1.0), 99);
        assert_eq!(clamp_to_overscroll_limit(-50, 100, 10, 7.0), -9);
    }

    #[test]
    fn test_overscroll_short_document() {
        assert_eq!(clamp_to_overscroll_limit(-15, 1, 11, 0.5), -5);
        assert_eq!(clamp_to_overscroll_limit(15, 1, 11, 0.5), 0);
        assert_eq!(clamp_to_overscroll_limit(3, 1, 1, 0.5), 0);
    }

    #[test]
    fn test_mouse_scroll_is_additive() {
        assert_eq!(mouse_scroll(10, -2, 3), 4);
        assert_eq!(mouse_scroll(10, 1, 3), 13);
        assert_eq!(mouse_scroll(0, 0, 3), 0);
    }

    #[test]
    fn test_page_step() {
        assert_eq!(page_step(11), 9);
        assert_eq!(page_step(2), 1);
        assert_eq!(page_step(1), 1);
    }

    #[test]
    fn test_smooth_step_snaps() {
        assert_eq!(smooth_scroll_step(0.0, 10.0, 0.4), 4.0);
        assert_eq!(smooth_scroll_step(9.995, 10.0, 0.4), 10.0);
        assert_eq!(smooth_scroll_step(3.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_smooth_scroll_converges_and_goes_idle() {
        let mut smooth = SmoothScroll::new(0);
        smooth.retarget(20);
        assert!(smooth.is_continuous());

        let mut ticks = 0;
        while smooth.is_continuous() {
            smooth.tick(20, REFERENCE_FRAME_SECS, DEFAULT_SCROLL_RATE);
            ticks += 1;
            assert!(ticks < 100, "did not converge");
        }
        assert_eq!(smooth.value(), 20.0);
        assert_eq!(smooth.mode(), RedrawMode::Idle);
    }

    #[test]
    fn test_first_tick_uses_seeded_frame() {
        let mut smooth = SmoothScroll::new(0);
        smooth.retarget(10);
        // a long wait before the first tick would otherwise jump straight to the target
        smooth.tick(10, 5.0, DEFAULT_SCROLL_RATE);
        assert_eq!(smooth.value(), 4.0);
        smooth.tick(10, 5.0, DEFAULT_SCROLL_RATE);
        assert_eq!(smooth.value(), 10.0);
        assert!(!smooth.is_continuous());
    }

    #[test]
    fn test_tick_scales_with_elapsed_time() {
        let mut smooth = SmoothScroll::new(0);
        smooth.retarget(10);
        smooth.tick(10, 0.0, DEFAULT_SCROLL_RATE);
        let start = smooth.value();
        smooth.tick(10, REFERENCE_FRAME_SECS / 2.0, DEFAULT_SCROLL_RATE);
        let expected = start + (10.0 - start) * 0.2;
        assert!(math::abs(smooth.value() - expected) < 1e-4);
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut smooth = SmoothScroll::new(3);
        assert!(!smooth.tick(3, 1.0, DEFAULT_SCROLL_RATE));
        smooth.retarget(3);
        assert!(!smooth.is_continuous());
        smooth.jump(7);
        assert_eq!(smooth.value(), 7.0);
    }
}
