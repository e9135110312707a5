use std::time::Duration;

use crate::ansi::frame::TermFrame;
use crate::layout::geometry::Viewport;
use crate::RenderError;

#[derive(Clone, Debug)]
pub struct TimedFrame {
    pub frame: TermFrame,
    pub duration: Duration,
}

/// Pre-encoded animation frames replayed by elapsed time.
#[derive(Clone, Debug, Default)]
pub struct FrameSeries {
    frames: Vec<TimedFrame>,
    total_duration: Duration,
    viewport: Option<Viewport>,
}

impl FrameSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.total_duration = Duration::ZERO;
    }

    pub fn push_frame(&mut self, frame: TermFrame, duration: Duration) {
        if let Some(viewport) = self.viewport {
            debug_assert!(frame.len() >= usize::from(viewport.rows));
        }

        self.total_duration += duration;
        self.frames.push(TimedFrame { frame, duration });
    }

    /// Re-encodes every frame, typically after the viewport was resized.
    pub fn rebuild_from<F>(
        &mut self,
        frame_count: usize,
        frame_duration: Duration,
        mut builder: F,
    ) -> Result<(), RenderError>
    where
        F: FnMut(usize, Viewport) -> Result<TermFrame, RenderError>,
    {
        self.clear();

        let Some(viewport) = self.viewport else {
            return Ok(());
        };

        if viewport.columns == 0 || viewport.rows == 0 {
            return Ok(());
        }

        for index in 0..frame_count {
            let frame = builder(index, viewport)?;
            self.push_frame(frame, frame_duration);
        }

        Ok(())
    }

    pub fn total_duration(&self) -> Duration {
        if self.frames.is_empty() {
            Duration::ZERO
        } else {
            self.total_duration
        }
    }

    /// Position of `elapsed` within one loop of the animation.
    pub fn normalize_elapsed(&self, elapsed: Duration) -> Duration {
        if self.frames.len() <= 1 {
            return Duration::ZERO;
        }

        let total = self.total_duration();
        if total.is_zero() {
            return Duration::ZERO;
        }

        let remainder = elapsed.as_nanos() % total.as_nanos();
        let secs = (remainder / 1_000_000_000) as u64;
        let nanos = (remainder % 1_000_000_000) as u32;

        Duration::new(secs, nanos)
    }

    pub fn frame_index_at(&self, elapsed: Duration) -> Option<usize> {
        if self.frames.is_empty() {
            return None;
        }

        if self.frames.len() == 1 {
            return Some(0);
        }

        let mut remaining = self.normalize_elapsed(elapsed);

        for (index, timed) in self.frames.iter().enumerate() {
            if !timed.duration.is_zero() && remaining < timed.duration {
                return Some(index);
            }
            remaining = remaining.saturating_sub(timed.duration);
        }

        Some(self.frames.len() - 1)
    }

    pub fn frame_at(&self, elapsed: Duration) -> Option<&TermFrame> {
        let index = self.frame_index_at(elapsed)?;
        self.frame(index)
    }

    pub fn frame(&self, index: usize) -> Option<&TermFrame> {
        self.frames.get(index).map(|timed| &timed.frame)
    }

    pub fn duration_of(&self, index: usize) -> Option<Duration> {
        self.frames.get(index).map(|timed| timed.duration)
    }
}
