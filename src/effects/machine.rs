//! Tooltip instance: the imperative shell around the transition table.

use crate::config::{ConfigErrors, OptionsPatch, TooltipConfig};
use crate::core::{
    compute_position, Event, FadeRates, Phase, Point, State, StateHistory, StateTransition,
};
use crate::effects::surface::{Content, RenderSurface};
use crate::effects::timer::{Fired, ManualTimers, TimerHandle, TimerKind, TimerService};
use crate::effects::transition::{Command, Context, TransitionError, TransitionTable};
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

#[derive(Clone, Copy, Debug)]
struct Ticker {
    handle: TimerHandle,
    rates: FadeRates,
}

/// One tooltip attached to one surface.
///
/// Every event goes through [`handle`](Tooltip::handle), which runs to
/// completion: the rule is evaluated, its commands are applied to the timer
/// service and the render surface, and exactly one phase is committed.
/// Events the current phase does not expect, and rules that name a phase
/// that does not exist, are absorbed: the instance is reset to `Inactive`
/// with no timer, ticker or box left behind.
pub struct Tooltip<R: RenderSurface, T: TimerService> {
    id: Uuid,
    surface_id: String,
    phase: Phase,
    content: Content,
    config: TooltipConfig,
    table: TransitionTable,
    opacity: f64,
    pointer: Point,
    timer: Option<TimerHandle>,
    ticker: Option<Ticker>,
    handle: Option<R::Handle>,
    surface: R,
    timers: T,
    history: StateHistory<Phase>,
    last_fault: Option<TransitionError>,
}

impl<R: RenderSurface, T: TimerService> Tooltip<R, T> {
    /// Create an instance in the initial phase.
    ///
    /// The config is taken as given; [`TooltipBuilder`](crate::builder::TooltipBuilder)
    /// validates it first.
    pub fn new(
        surface_id: impl Into<String>,
        content: Content,
        config: TooltipConfig,
        table: TransitionTable,
        surface: R,
        timers: T,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            surface_id: surface_id.into(),
            phase: Phase::initial(),
            content,
            config,
            table,
            opacity: 0.0,
            pointer: Point::default(),
            timer: None,
            ticker: None,
            handle: None,
            surface,
            timers,
            history: StateHistory::new(),
            last_fault: None,
        }
    }

    /// Dispatch one event.
    pub fn handle(&mut self, event: Event) {
        let from = self.phase;
        let context = Context {
            phase: from,
            config: &self.config,
            opacity: self.opacity,
            fade: self.ticker.map(|t| t.rates),
            visible: self.handle.is_some(),
        };

        let decision = match self.table.decide(&context, &event) {
            Ok(decision) => decision,
            Err(fault) => {
                self.unexpected_event(fault);
                return;
            }
        };

        for command in decision.commands {
            self.apply(command);
        }

        match decision.next.resolve(from, event.kind()) {
            Ok(to) => self.commit(from, to, &event),
            Err(fault) => self.undefined_state(fault),
        }
    }

    /// Dispatch a fired timer, unless its handle has since been cancelled
    /// or replaced.
    pub fn handle_timer(&mut self, fired: Fired) {
        let live = match fired.kind {
            TimerKind::Once => self.timer == Some(fired.handle),
            TimerKind::Repeating => self.ticker.map(|t| t.handle) == Some(fired.handle),
        };
        if live {
            self.handle(fired.event());
        } else {
            tracing::trace!(
                surface = %self.surface_id,
                handle = fired.handle.raw(),
                kind = ?fired.kind,
                "dropping stale timer"
            );
        }
    }

    /// Detach: cancel both timers, destroy any box and return to
    /// `Inactive`. The instance stays usable and behaves like a fresh one.
    pub fn stop(&mut self) {
        self.reset();
        self.pointer = Point::default();
        self.history.clear();
        self.last_fault = None;
    }

    /// Replace the payload. A box already shown keeps its old content.
    pub fn change_content(&mut self, content: impl Into<Content>) {
        self.content = content.into();
    }

    /// Merge `patch` over the current options.
    ///
    /// The merged options are validated first; on failure nothing changes.
    /// New options apply from the next transition that reads them; a fade
    /// already in flight keeps the rates it started with.
    pub fn change_options(&mut self, patch: &OptionsPatch) -> Result<(), ConfigErrors> {
        self.config = self.config.merged(patch).validated()?;
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn options(&self) -> &TooltipConfig {
        &self.config
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Last pointer position recorded while waiting to show.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn is_visible(&self) -> bool {
        self.handle.is_some()
    }

    pub fn timer_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn ticker_active(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Transitions recorded while tracing is enabled.
    pub fn history(&self) -> &StateHistory<Phase> {
        &self.history
    }

    /// The most recent anomaly recovered from.
    pub fn last_fault(&self) -> Option<&TransitionError> {
        self.last_fault.as_ref()
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    fn commit(&mut self, from: Phase, to: Phase, event: &Event) {
        if self.config.trace_enabled {
            tracing::debug!(
                surface = %self.surface_id,
                from = from.name(),
                to = to.name(),
                event = event.kind().name(),
                opacity = self.opacity,
                "tooltip transition"
            );
            self.history.record(StateTransition {
                from,
                to,
                event: event.kind(),
                timestamp: Utc::now(),
            });
        }
        self.phase = to;
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::SavePointer(at) => self.pointer = at,
            Command::StartTimer(delay) => {
                self.cancel_timer();
                self.timer = Some(self.timers.start_once(delay));
            }
            Command::CancelTimer => self.cancel_timer(),
            Command::StartTicker(rates) => {
                self.cancel_ticker();
                let handle = self.timers.start_repeating(rates.interval);
                self.ticker = Some(Ticker { handle, rates });
            }
            Command::CancelTicker => self.cancel_ticker(),
            Command::CreateBox => self.create_box(),
            Command::SetOpacity(opacity) => {
                if let Some(handle) = &self.handle {
                    self.opacity = opacity;
                    self.surface.set_opacity(handle, opacity);
                }
            }
            Command::MoveBox(at) => {
                if let Some(handle) = &self.handle {
                    if self.config.placement.follows_pointer() {
                        let at = at.offset(self.config.offset_x, self.config.offset_y);
                        self.surface.move_to(handle, at);
                    }
                }
            }
            Command::DestroyBox => self.destroy_box(),
        }
    }

    fn create_box(&mut self) {
        self.destroy_box();
        let handle = self.surface.create(&self.content, 0.0);
        let at = compute_position(
            self.config.placement,
            self.pointer,
            self.surface.anchor(),
            self.surface.box_size(&handle),
            self.config.offset(),
            self.surface.viewport(),
        );
        self.surface.move_to(&handle, at);
        self.opacity = 0.0;
        self.handle = Some(handle);
    }

    fn destroy_box(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.surface.destroy(handle);
        }
        self.opacity = 0.0;
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.timers.cancel_once(handle);
        }
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            self.timers.cancel_repeating(ticker.handle);
        }
    }

    fn reset(&mut self) {
        self.cancel_timer();
        self.cancel_ticker();
        self.destroy_box();
        self.phase = Phase::initial();
    }

    fn unexpected_event(&mut self, fault: TransitionError) {
        self.reset();
        tracing::warn!(
            surface = %self.surface_id,
            instance = %self.id,
            error = %fault,
            "tooltip handled unexpected event"
        );
        self.last_fault = Some(fault);
    }

    fn undefined_state(&mut self, fault: TransitionError) {
        self.reset();
        tracing::error!(
            surface = %self.surface_id,
            instance = %self.id,
            error = %fault,
            "tooltip transitioned to undefined state"
        );
        self.last_fault = Some(fault);
    }
}

impl<R: RenderSurface, T: TimerService> Drop for Tooltip<R, T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<R: RenderSurface, T: TimerService> std::fmt::Debug for Tooltip<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tooltip")
            .field("id", &self.id)
            .field("surface_id", &self.surface_id)
            .field("phase", &self.phase)
            .field("opacity", &self.opacity)
            .field("visible", &self.handle.is_some())
            .field("timer", &self.timer)
            .field("ticker", &self.ticker.map(|t| t.handle))
            .finish()
    }
}

impl<R: RenderSurface> Tooltip<R, ManualTimers> {
    /// Move the manual clock forward by `by`, dispatching every timer that
    /// comes due on the way, in order.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.timers.now().saturating_add(by);
        while let Some(fired) = self.timers.fire_next(deadline) {
            self.handle_timer(fired);
        }
    }
}
