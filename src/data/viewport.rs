//! Viewport tracking
//!
//! Reports the display size in logical units. Terminals that answer the
//! pixel-size query report real pixels; otherwise the size is estimated
//! from the cell grid. With no terminal at all the size is (0, 0).

use crate::config::ViewportOptions;
use crossterm::terminal;
use serde::Serialize;
use tracing::debug;

/// Display size in logical units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    /// Sentinel for "no display surface"
    pub const UNKNOWN: Self = Self { width: 0, height: 0 };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Raw terminal measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerminalMetrics {
    pub columns: u16,
    pub rows: u16,
    /// Zero when the terminal does not report pixels
    pub pixel_width: u16,
    pub pixel_height: u16,
}

impl TerminalMetrics {
    /// Convert to logical units, preferring reported pixels
    pub fn to_logical(self, options: ViewportOptions) -> ViewportSize {
        if self.pixel_width > 0 && self.pixel_height > 0 {
            return ViewportSize::new(self.pixel_width.into(), self.pixel_height.into());
        }

        ViewportSize::new(
            u32::from(self.columns) * u32::from(options.cell_width),
            u32::from(self.rows) * u32::from(options.cell_height),
        )
    }
}

/// Source of terminal measurements
pub trait ViewportProbe: Send {
    /// `None` when there is no terminal to measure
    fn measure(&self) -> Option<TerminalMetrics>;
}

/// Measures the controlling terminal via crossterm
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermProbe;

impl ViewportProbe for CrosstermProbe {
    fn measure(&self) -> Option<TerminalMetrics> {
        match terminal::window_size() {
            Ok(size) => Some(TerminalMetrics {
                columns: size.columns,
                rows: size.rows,
                pixel_width: size.width,
                pixel_height: size.height,
            }),
            Err(_) => terminal::size().ok().map(|(columns, rows)| TerminalMetrics {
                columns,
                rows,
                ..Default::default()
            }),
        }
    }
}

/// Holds the current viewport size and updates it on resize
pub struct ViewportTracker {
    probe: Box<dyn ViewportProbe>,
    options: ViewportOptions,
    size: ViewportSize,
}

impl ViewportTracker {
    /// Take the initial measurement
    pub fn attach(probe: Box<dyn ViewportProbe>, options: ViewportOptions) -> Self {
        let size = probe
            .measure()
            .map(|metrics| metrics.to_logical(options))
            .unwrap_or(ViewportSize::UNKNOWN);

        debug!(width = size.width, height = size.height, "viewport attached");

        Self { probe, options, size }
    }

    pub fn size(&self) -> ViewportSize {
        self.size
    }

    /// Re-report after a resize event carrying the new cell grid
    pub fn on_resize(&mut self, columns: u16, rows: u16) -> ViewportSize {
        // Resize events only carry cells; pixels have to be asked for again
        let (pixel_width, pixel_height) = self
            .probe
            .measure()
            .filter(|m| m.columns == columns && m.rows == rows)
            .map(|m| (m.pixel_width, m.pixel_height))
            .unwrap_or((0, 0));

        self.size = TerminalMetrics {
            columns,
            rows,
            pixel_width,
            pixel_height,
        }
        .to_logical(self.options);

        debug!(width = self.size.width, height = self.size.height, "viewport resized");
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(Option<TerminalMetrics>);

    impl ViewportProbe for FixedProbe {
        fn measure(&self) -> Option<TerminalMetrics> {
            self.0
        }
    }

    fn tracker(metrics: Option<TerminalMetrics>) -> ViewportTracker {
        ViewportTracker::attach(Box::new(FixedProbe(metrics)), ViewportOptions::default())
    }

    fn cells(columns: u16, rows: u16) -> Option<TerminalMetrics> {
        Some(TerminalMetrics {
            columns,
            rows,
            ..Default::default()
        })
    }

    #[test]
    fn test_no_terminal_reports_sentinel() {
        let tracker = tracker(None);
        assert_eq!(tracker.size(), ViewportSize::UNKNOWN);
    }

    #[test]
    fn test_cell_estimate() {
        let tracker = tracker(cells(100, 30));
        assert_eq!(tracker.size(), ViewportSize::new(800, 480));
    }

    #[test]
    fn test_reported_pixels_win() {
        let metrics = TerminalMetrics {
            columns: 80,
            rows: 24,
            pixel_width: 1280,
            pixel_height: 720,
        };
        let tracker = tracker(Some(metrics));
        assert_eq!(tracker.size(), ViewportSize::new(1280, 720));
    }

    #[test]
    fn test_resize_updates_size() {
        let mut tracker = tracker(cells(120, 40));
        assert_eq!(tracker.size().width, 960);

        // Probe disagrees with the event, so only the event's grid is used
        let size = tracker.on_resize(60, 20);
        assert_eq!(size, ViewportSize::new(480, 320));
        assert_eq!(tracker.size(), size);
    }
}
