//! A mounted canvas and the task that keeps it in sync.
//!
//! [`Canvas`] owns a [`Surface`] and redraws it whenever the size or the
//! view changes. [`spawn_canvas`] runs one as an actor: an isolated Tokio
//! task fed by the view-state channel and by resize commands sent through
//! a [`CanvasHandle`].

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::{Scene, Surface, ViewError, ViewState};

/// Pending resize notifications. Only the latest size matters, so a small
/// buffer is plenty.
const COMMAND_BUFFER: usize = 16;

/// A surface bound to a view and a size.
///
/// Drawing happens on [`mount`](Self::mount) and then again only when
/// [`update`](Self::update) sees a different view or size. Dropping the
/// canvas releases the surface.
pub struct Canvas<S: Surface> {
    surface: S,
    view: ViewState,
    width: u32,
    height: u32,
    frames: u64,
}

impl<S: Surface> Canvas<S> {
    /// Takes ownership of `surface` and draws the first frame.
    pub fn mount(surface: S, view: ViewState, width: u32, height: u32) -> Self {
        let mut canvas = Self {
            surface,
            view,
            width,
            height,
            frames: 0,
        };
        canvas.draw();
        canvas
    }

    /// Redraws if `view` or the size differ from what is on screen.
    /// Returns whether a frame was drawn.
    pub fn update(&mut self, view: ViewState, width: u32, height: u32) -> bool {
        if view == self.view && width == self.width && height == self.height {
            return false;
        }
        self.view = view;
        self.width = width;
        self.height = height;
        self.draw();
        true
    }

    pub fn set_view(&mut self, view: ViewState) -> bool {
        self.update(view, self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.update(self.view, width, height)
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Frames drawn since mount.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn draw(&mut self) {
        Scene::for_view(self.view, self.width, self.height).paint(&mut self.surface);
        self.frames += 1;
        tracing::debug!(
            view = %self.view,
            width = self.width,
            height = self.height,
            frame = self.frames,
            "canvas drawn"
        );
    }
}

impl<S: Surface> Drop for Canvas<S> {
    fn drop(&mut self) {
        self.surface.release();
        tracing::debug!(frames = self.frames, "canvas released");
    }
}

// ---------------------------------------------------------------------------
// Canvas actor
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum CanvasCommand {
    Resize { width: u32, height: u32 },
    Stop,
}

/// Handle to a running canvas task.
///
/// Dropping the handle stops the task, which then releases the surface.
#[derive(Debug)]
pub struct CanvasHandle {
    commands: mpsc::Sender<CanvasCommand>,
    task: JoinHandle<u64>,
}

impl CanvasHandle {
    /// Reports a new surface size (e.g. from a window resize event).
    pub async fn resize(&self, width: u32, height: u32) -> Result<(), ViewError> {
        self.commands
            .send(CanvasCommand::Resize { width, height })
            .await
            .map_err(|_| ViewError::CanvasStopped)
    }

    /// Detaches the canvas and waits for the surface to be released.
    /// Returns the number of frames drawn.
    pub async fn stop(self) -> Result<u64, ViewError> {
        // The task may already be gone; joining tells us either way.
        let _ = self.commands.send(CanvasCommand::Stop).await;
        self.task.await.map_err(|_| ViewError::CanvasStopped)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Runs `canvas` on its own task, following `views`.
///
/// The canvas first catches up with the current view, then redraws on
/// every view change and every resize. It stops and releases its surface
/// when the handle is stopped or dropped, or when the view state goes
/// away.
pub fn spawn_canvas<S: Surface>(
    canvas: Canvas<S>,
    views: watch::Receiver<ViewState>,
) -> CanvasHandle {
    let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
    let task = tokio::spawn(run_canvas(canvas, views, receiver));
    CanvasHandle { commands, task }
}

async fn run_canvas<S: Surface>(
    mut canvas: Canvas<S>,
    mut views: watch::Receiver<ViewState>,
    mut commands: mpsc::Receiver<CanvasCommand>,
) -> u64 {
    let initial = *views.borrow_and_update();
    canvas.set_view(initial);
    tracing::debug!(view = %initial, "canvas task started");

    loop {
        tokio::select! {
            cmd = commands.recv() => match cmd {
                Some(CanvasCommand::Resize { width, height }) => {
                    canvas.resize(width, height);
                }
                Some(CanvasCommand::Stop) | None => break,
            },
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = *views.borrow_and_update();
                canvas.set_view(view);
            }
        }
    }

    canvas.frames()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, FrameBuffer};

    #[test]
    fn test_mount_draws_first_frame() {
        let canvas = Canvas::mount(FrameBuffer::new(), ViewState::Town, 400, 400);

        assert_eq!(canvas.frames(), 1);
        assert_eq!(canvas.surface().pixel(0, 0), Some(Color::SKY_BLUE));
        assert_eq!(canvas.surface().pixel(150, 150), Some(Color::GREEN));
    }

    #[test]
    fn test_update_with_same_view_and_size_is_noop() {
        let mut canvas = Canvas::mount(FrameBuffer::new(), ViewState::Town, 400, 400);

        assert!(!canvas.update(ViewState::Town, 400, 400));
        assert_eq!(canvas.frames(), 1);
    }

    #[test]
    fn test_set_view_redraws_battle_scene() {
        let mut canvas = Canvas::mount(FrameBuffer::new(), ViewState::Town, 400, 500);

        assert!(canvas.set_view(ViewState::Battle));

        assert_eq!(canvas.frames(), 2);
        assert_eq!(canvas.surface().pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.surface().pixel(60, 200), Some(Color::YELLOW));
    }

    #[test]
    fn test_resize_redraws_at_new_size() {
        let mut canvas = Canvas::mount(FrameBuffer::new(), ViewState::Town, 100, 100);

        assert!(canvas.resize(640, 480));

        assert_eq!(canvas.size(), (640, 480));
        assert_eq!(canvas.surface().width(), 640);
        assert_eq!(canvas.frames(), 2);
    }
}
