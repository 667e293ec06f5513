//! Tokio host loop for a tooltip.
//!
//! [`spawn`] moves a tooltip onto its own task. Host requests and timer
//! fires arrive on two channels and are handled one at a time, so the
//! instance keeps its run-to-completion semantics even though timers run
//! concurrently. Cancelling a timer aborts its task; a fire that was
//! already queued when its timer was cancelled is dropped by
//! [`Tooltip::handle_timer`].
//!
//! When a timer fire and a host request are both waiting, the fire is
//! handled first: it became due before the loop got to the request.

use crate::builder::{BuildError, TooltipBuilder};
use crate::checkpoint::Snapshot;
use crate::config::{ConfigErrors, OptionsPatch};
use crate::core::Event;
use crate::effects::{Content, Fired, RenderSurface, TimerHandle, TimerKind, TimerService, Tooltip};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shortest ticker period; tokio timers resolve to milliseconds.
const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("tooltip task is no longer running")]
    Closed,

    #[error("tooltip task failed: {0}")]
    Join(String),

    #[error(transparent)]
    InvalidOptions(#[from] ConfigErrors),
}

/// Timer service backed by tokio tasks.
///
/// Every timer is a spawned task that reports to the channel returned by
/// [`TokioTimers::new`]; it must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioTimers {
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    fired: mpsc::UnboundedSender<Fired>,
}

impl TokioTimers {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Fired>) {
        let (fired, receiver) = mpsc::unbounded_channel();
        let timers = Self {
            next_id: 0,
            tasks: HashMap::new(),
            fired,
        };
        (timers, receiver)
    }

    /// Number of timer tasks still running.
    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }

    fn next_handle(&mut self) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id += 1;
        TimerHandle::new(self.next_id)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl TimerService for TokioTimers {
    fn start_once(&mut self, delay: Duration) -> TimerHandle {
        let handle = self.next_handle();
        let fired = self.fired.clone();
        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = fired.send(Fired {
                handle,
                kind: TimerKind::Once,
            });
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel_once(&mut self, handle: TimerHandle) {
        self.cancel(handle);
    }

    fn start_repeating(&mut self, interval: Duration) -> TimerHandle {
        let handle = self.next_handle();
        let fired = self.fired.clone();
        let period = interval.max(MIN_TICK);
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let fire = Fired {
                    handle,
                    kind: TimerKind::Repeating,
                };
                if fired.send(fire).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel_repeating(&mut self, handle: TimerHandle) {
        self.cancel(handle);
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Message accepted by a running tooltip task.
#[derive(Debug)]
pub enum Request {
    Event(Event),
    ChangeContent(Content),
    ChangeOptions(OptionsPatch, oneshot::Sender<Result<(), ConfigErrors>>),
    Stop,
    Snapshot(oneshot::Sender<Snapshot>),
}

/// Handle to a tooltip running on its own task.
#[derive(Debug)]
pub struct TooltipTask<R: RenderSurface> {
    requests: mpsc::UnboundedSender<Request>,
    join: JoinHandle<Tooltip<R, TokioTimers>>,
}

/// Build the tooltip with tokio timers and run it on a new task.
pub fn spawn<R>(builder: TooltipBuilder<R, TokioTimers>) -> Result<TooltipTask<R>, BuildError>
where
    R: RenderSurface + Send + 'static,
    R::Handle: Send + 'static,
{
    let (timers, fired) = TokioTimers::new();
    let tooltip = builder.timers(timers).build()?;
    let (requests, inbox) = mpsc::unbounded_channel();

    tracing::debug!(
        surface = tooltip.surface_id(),
        instance = %tooltip.id(),
        "tooltip task started"
    );
    let join = tokio::spawn(run(tooltip, inbox, fired));
    Ok(TooltipTask { requests, join })
}

async fn run<R: RenderSurface>(
    mut tooltip: Tooltip<R, TokioTimers>,
    mut inbox: mpsc::UnboundedReceiver<Request>,
    mut fired: mpsc::UnboundedReceiver<Fired>,
) -> Tooltip<R, TokioTimers> {
    loop {
        tokio::select! {
            biased;
            Some(fire) = fired.recv() => tooltip.handle_timer(fire),
            request = inbox.recv() => match request {
                Some(request) => serve(&mut tooltip, request),
                None => break,
            },
        }
    }
    tooltip.stop();
    tracing::debug!(
        surface = tooltip.surface_id(),
        instance = %tooltip.id(),
        "tooltip task finished"
    );
    tooltip
}

fn serve<R: RenderSurface>(tooltip: &mut Tooltip<R, TokioTimers>, request: Request) {
    match request {
        Request::Event(event) => tooltip.handle(event),
        Request::ChangeContent(content) => tooltip.change_content(content),
        Request::ChangeOptions(patch, reply) => {
            let _ = reply.send(tooltip.change_options(&patch));
        }
        Request::Stop => tooltip.stop(),
        Request::Snapshot(reply) => {
            let _ = reply.send(tooltip.snapshot());
        }
    }
}

impl<R: RenderSurface> TooltipTask<R> {
    pub fn send(&self, event: Event) -> Result<(), RuntimeError> {
        self.request(Request::Event(event))
    }

    pub fn change_content(&self, content: impl Into<Content>) -> Result<(), RuntimeError> {
        self.request(Request::ChangeContent(content.into()))
    }

    /// Merge `patch` over the running tooltip's options.
    pub async fn change_options(&self, patch: OptionsPatch) -> Result<(), RuntimeError> {
        let (reply, answer) = oneshot::channel();
        self.request(Request::ChangeOptions(patch, reply))?;
        answer.await.map_err(|_| RuntimeError::Closed)??;
        Ok(())
    }

    pub fn stop(&self) -> Result<(), RuntimeError> {
        self.request(Request::Stop)
    }

    pub async fn snapshot(&self) -> Result<Snapshot, RuntimeError> {
        let (reply, answer) = oneshot::channel();
        self.request(Request::Snapshot(reply))?;
        answer.await.map_err(|_| RuntimeError::Closed)
    }

    /// Stop the tooltip, end the task and hand the instance back.
    pub async fn shutdown(self) -> Result<Tooltip<R, TokioTimers>, RuntimeError> {
        let Self { requests, join } = self;
        drop(requests);
        join.await.map_err(|e| RuntimeError::Join(e.to_string()))
    }

    fn request(&self, request: Request) -> Result<(), RuntimeError> {
        self.requests.send(request).map_err(|_| RuntimeError::Closed)
    }
}
