//! Frame loop that can be started and stopped from the host.

use crate::canvas::Canvas;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Anything the animation loop can advance and paint.
pub trait Scene {
    fn update(&mut self);
    fn draw(&self, canvas: &mut dyn Canvas);
}

/// Cloneable, thread-safe switch that stops a running [`Animation`].
#[derive(Clone, Debug)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Recurring update-then-draw task.
///
/// A stopped animation performs no work; `tick` and `run` return immediately.
#[derive(Debug)]
pub struct Animation {
    running: Arc<AtomicBool>,
    /// Frames performed since creation.
    pub frames: u64,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation {
    /// Roughly one display refresh at 60 Hz.
    pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

    /// Creates a stopped animation.
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if !self.running.swap(true, Ordering::AcqRel) {
            log::info!("animation started at frame {}", self.frames);
        }
    }

    pub fn stop(&mut self) {
        if self.running.swap(false, Ordering::AcqRel) {
            log::info!("animation stopped after {} frames", self.frames);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.running))
    }

    /// Performs exactly one update followed by one draw, if running.
    pub fn tick<S, C>(&mut self, scene: &mut S, canvas: &mut C) -> bool
    where
        S: Scene + ?Sized,
        C: Canvas,
    {
        if !self.is_running() {
            return false;
        }
        scene.update();
        scene.draw(canvas);
        self.frames += 1;
        true
    }

    /// Ticks until stopped, handing the canvas to `present` after each frame
    /// and sleeping out the rest of `frame_interval`.
    pub fn run<S, C, F>(&mut self, scene: &mut S, canvas: &mut C, frame_interval: Duration, mut present: F)
    where
        S: Scene + ?Sized,
        C: Canvas,
        F: FnMut(&mut C),
    {
        while self.is_running() {
            let started = Instant::now();
            if !self.tick(scene, canvas) {
                break;
            }
            present(canvas);
            if let Some(rest) = frame_interval.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
        log::info!("animation loop exited after {} frames", self.frames);
    }
}
