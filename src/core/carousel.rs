use crate::domain::event::{Effect, TimerKind};
use crate::domain::model::CarouselSpec;
use crate::utils::error::{Result, SiteError};
use std::time::Duration;

/// Testimonial carousel over a fixed number of slides.
#[derive(Debug)]
pub struct Carousel {
    count: usize,
    current: usize,
    interval: Duration,
    running: bool,
    hovered: bool,
}

impl Carousel {
    pub fn new(spec: &CarouselSpec) -> Result<Self> {
        if spec.slides > 1 && spec.interval_ms == 0 {
            return Err(SiteError::InitError {
                component: "carousel".to_string(),
                message: "autoplay interval must be positive".to_string(),
            });
        }
        Ok(Self {
            count: spec.slides,
            current: 0,
            interval: Duration::from_millis(spec.interval_ms),
            running: false,
            hovered: false,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_autoplaying(&self) -> bool {
        self.running
    }

    pub fn initialize(&mut self) -> Vec<Effect> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut effects = self.go_to_slide(0);
        effects.extend(self.start_autoplay());
        effects
    }

    /// Activates exactly `index`. Out-of-range indices are ignored.
    pub fn go_to_slide(&mut self, index: usize) -> Vec<Effect> {
        if index >= self.count {
            return Vec::new();
        }
        self.current = index;
        vec![Effect::ActivateSlide { index }]
    }

    pub fn next(&mut self) -> Vec<Effect> {
        if self.is_empty() {
            return Vec::new();
        }
        self.go_to_slide((self.current + 1) % self.count)
    }

    pub fn previous(&mut self) -> Vec<Effect> {
        if self.is_empty() {
            return Vec::new();
        }
        self.go_to_slide((self.current + self.count - 1) % self.count)
    }

    /// Arms the autoplay timer, cancelling any running one first. One or zero
    /// slides never autoplay.
    pub fn start_autoplay(&mut self) -> Vec<Effect> {
        if self.count <= 1 {
            return Vec::new();
        }
        let mut effects = self.stop_autoplay();
        self.running = true;
        effects.push(Effect::Schedule {
            timer: TimerKind::Autoplay,
            after: self.interval,
            repeat: true,
        });
        effects
    }

    pub fn stop_autoplay(&mut self) -> Vec<Effect> {
        if !self.running {
            return Vec::new();
        }
        self.running = false;
        vec![Effect::Cancel {
            timer: TimerKind::Autoplay,
        }]
    }

    pub fn manual_next(&mut self) -> Vec<Effect> {
        let mut effects = self.next();
        effects.extend(self.reset_autoplay());
        effects
    }

    pub fn manual_previous(&mut self) -> Vec<Effect> {
        let mut effects = self.previous();
        effects.extend(self.reset_autoplay());
        effects
    }

    pub fn indicator_clicked(&mut self, index: usize) -> Vec<Effect> {
        let mut effects = self.go_to_slide(index);
        if !effects.is_empty() {
            effects.extend(self.reset_autoplay());
        }
        effects
    }

    pub fn pointer_enter(&mut self) -> Vec<Effect> {
        self.hovered = true;
        self.stop_autoplay()
    }

    pub fn pointer_leave(&mut self) -> Vec<Effect> {
        self.hovered = false;
        self.start_autoplay()
    }

    pub fn autoplay_tick(&mut self) -> Vec<Effect> {
        if !self.running {
            return Vec::new();
        }
        self.next()
    }

    // 手動切換後重新計時；滑鼠停留時維持暫停
    fn reset_autoplay(&mut self) -> Vec<Effect> {
        if self.hovered {
            return Vec::new();
        }
        self.start_autoplay()
    }
}
