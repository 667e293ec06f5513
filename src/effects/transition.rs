//! Transition table and the pure rules it holds.
//!
//! A rule looks at the current [`Context`] and the incoming [`Event`] and
//! returns a [`Decision`]: the commands the executor must carry out and the
//! phase to commit afterwards. Rules never touch timers or the surface
//! themselves, so the whole table can be exercised without either.

use crate::config::TooltipConfig;
use crate::core::fade::{self, FadeRates};
use crate::core::{Event, EventKind, Phase, Point, State};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// What a rule can see.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    pub phase: Phase,
    pub config: &'a TooltipConfig,
    pub opacity: f64,
    /// Rates captured when the running ticker was started.
    pub fade: Option<FadeRates>,
    /// Whether a box currently exists.
    pub visible: bool,
}

impl Context<'_> {
    /// Rates of the animation in flight, or fresh ones from the config.
    pub fn rates(&self) -> FadeRates {
        self.fade
            .unwrap_or_else(|| FadeRates::from_config(self.config))
    }
}

/// A side effect requested by a rule, applied by the executor in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SavePointer(Point),
    /// Cancel any one-shot timer, then start one for the delay.
    StartTimer(Duration),
    CancelTimer,
    /// Cancel any ticker, then start one with the captured rates.
    StartTicker(FadeRates),
    CancelTicker,
    /// Create the box at opacity zero and place it.
    CreateBox,
    SetOpacity(f64),
    /// Move the box so its corner sits at the pointer plus the offset.
    MoveBox(Point),
    DestroyBox,
}

/// Where a rule sends the machine.
#[derive(Clone, Debug, PartialEq)]
pub enum Next {
    /// Keep the current phase.
    Stay,
    To(Phase),
    /// A phase named at runtime, resolved against the valid phases.
    Named(String),
}

impl Next {
    /// Resolve to a valid phase, or report the undefined target.
    pub fn resolve(&self, current: Phase, event: EventKind) -> Result<Phase, TransitionError> {
        match self {
            Self::Stay => Ok(current),
            Self::To(phase) => Ok(*phase),
            Self::Named(name) => {
                Phase::from_name(name).ok_or_else(|| TransitionError::UndefinedState {
                    target: name.clone(),
                    from: current,
                    event,
                })
            }
        }
    }
}

/// Outcome of a rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub commands: Vec<Command>,
    pub next: Next,
}

impl Decision {
    pub fn stay() -> Self {
        Self {
            commands: Vec::new(),
            next: Next::Stay,
        }
    }

    pub fn to(phase: Phase) -> Self {
        Self {
            commands: Vec::new(),
            next: Next::To(phase),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            commands: Vec::new(),
            next: Next::Named(name.into()),
        }
    }

    pub fn with(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Keep these commands but send the machine elsewhere.
    pub fn then(mut self, next: Next) -> Self {
        self.next = next;
        self
    }
}

/// Anomalies the executor recovers from. Neither is ever returned from
/// `handle`; both leave the machine `Inactive`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("unexpected event {event} in state {state}")]
    UnexpectedEvent { event: EventKind, state: Phase },

    #[error("transition to undefined state \"{target}\" from {from} on {event}")]
    UndefinedState {
        target: String,
        from: Phase,
        event: EventKind,
    },
}

/// A table entry.
pub type Rule = Arc<dyn Fn(&Context<'_>, &Event) -> Decision + Send + Sync>;

/// Sparse `(Phase, EventKind)` table of rules.
///
/// Missing entries are events the phase does not expect; dispatching one
/// triggers the unexpected-event recovery.
#[derive(Clone)]
pub struct TransitionTable {
    rules: HashMap<(Phase, EventKind), Rule>,
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.entries().collect();
        entries.sort_by_key(|(phase, kind)| (phase.name().to_string(), kind.name()));
        f.debug_struct("TransitionTable")
            .field("entries", &entries)
            .finish()
    }
}

impl TransitionTable {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// The tooltip lifecycle.
    pub fn standard() -> Self {
        use EventKind::*;
        use Phase::*;

        Self::empty()
            .with(Inactive, PointerEnter, rules::restart_pause)
            .with(Inactive, PointerMove, rules::restart_pause)
            .with(Inactive, PointerLeave, rules::ignore)
            .with(Pause, PointerEnter, rules::restart_pause)
            .with(Pause, PointerMove, rules::restart_pause)
            .with(Pause, PointerLeave, rules::abandon_pause)
            .with(Pause, Timeout, rules::show)
            .with(FadeIn, PointerMove, rules::follow_pointer)
            .with(FadeIn, PointerLeave, rules::reverse_to_fade_out)
            .with(FadeIn, Tick, rules::fade_in_tick)
            .with(Display, PointerMove, rules::follow_pointer)
            .with(Display, PointerLeave, rules::hide)
            .with(Display, Timeout, rules::hide)
            .with(FadeOut, PointerEnter, rules::reverse_to_fade_in)
            .with(FadeOut, PointerMove, rules::follow_pointer)
            .with(FadeOut, PointerLeave, rules::ignore)
            .with(FadeOut, Tick, rules::fade_out_tick)
    }

    /// Insert or replace the rule for `(phase, kind)`.
    pub fn with<F>(mut self, phase: Phase, kind: EventKind, rule: F) -> Self
    where
        F: Fn(&Context<'_>, &Event) -> Decision + Send + Sync + 'static,
    {
        self.insert(phase, kind, Arc::new(rule));
        self
    }

    pub fn insert(&mut self, phase: Phase, kind: EventKind, rule: Rule) {
        self.rules.insert((phase, kind), rule);
    }

    /// Remove an entry, making the event unexpected in that phase.
    pub fn remove(&mut self, phase: Phase, kind: EventKind) -> Option<Rule> {
        self.rules.remove(&(phase, kind))
    }

    pub fn get(&self, phase: Phase, kind: EventKind) -> Option<&Rule> {
        self.rules.get(&(phase, kind))
    }

    pub fn contains(&self, phase: Phase, kind: EventKind) -> bool {
        self.rules.contains_key(&(phase, kind))
    }

    pub fn entries(&self) -> impl Iterator<Item = (Phase, EventKind)> + '_ {
        self.rules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate the rule for the event, if the phase expects it.
    pub fn decide(
        &self,
        context: &Context<'_>,
        event: &Event,
    ) -> Result<Decision, TransitionError> {
        let rule = self
            .get(context.phase, event.kind())
            .ok_or(TransitionError::UnexpectedEvent {
                event: event.kind(),
                state: context.phase,
            })?;
        Ok(rule(context, event))
    }
}

/// The rules of the standard table. Several entries share a rule where the
/// lifecycle calls for identical handling.
pub mod rules {
    use super::*;

    /// Remember the pointer and (re)start the pause timer.
    ///
    /// Also used for moves while `Inactive`: some pointer sources deliver a
    /// move over the surface without a preceding enter.
    pub fn restart_pause(ctx: &Context<'_>, event: &Event) -> Decision {
        let mut decision = Decision::to(Phase::Pause).with(Command::CancelTimer);
        if let Some(at) = event.position() {
            decision = decision.with(Command::SavePointer(at));
        }
        decision.with(Command::StartTimer(ctx.config.pause()))
    }

    /// Nothing to undo.
    pub fn ignore(_ctx: &Context<'_>, _event: &Event) -> Decision {
        Decision::stay()
    }

    pub fn abandon_pause(_ctx: &Context<'_>, _event: &Event) -> Decision {
        Decision::to(Phase::Inactive).with(Command::CancelTimer)
    }

    /// The pointer rested long enough: create the box and fade it in, or
    /// show it at full opacity straight away when fade-in is disabled.
    pub fn show(ctx: &Context<'_>, _event: &Event) -> Decision {
        let decision = Decision::stay()
            .with(Command::CancelTimer)
            .with(Command::CreateBox);
        if ctx.config.fade_in_seconds > 0.0 {
            decision
                .with(Command::StartTicker(FadeRates::from_config(ctx.config)))
                .then(Next::To(Phase::FadeIn))
        } else {
            decision
                .with(Command::SetOpacity(ctx.config.opacity_max))
                .with(Command::StartTimer(ctx.config.display()))
                .then(Next::To(Phase::Display))
        }
    }

    /// Keep a pointer-following box under the pointer. Anchored placements
    /// stay where they were created.
    pub fn follow_pointer(ctx: &Context<'_>, event: &Event) -> Decision {
        match event.position() {
            Some(at) if ctx.visible && ctx.config.placement.follows_pointer() => {
                Decision::stay().with(Command::MoveBox(at))
            }
            _ => Decision::stay(),
        }
    }

    /// Pointer left mid fade-in; the running ticker now fades out.
    pub fn reverse_to_fade_out(_ctx: &Context<'_>, _event: &Event) -> Decision {
        Decision::to(Phase::FadeOut)
    }

    /// Pointer came back mid fade-out; the running ticker now fades in.
    pub fn reverse_to_fade_in(ctx: &Context<'_>, event: &Event) -> Decision {
        follow_pointer(ctx, event).then(Next::To(Phase::FadeIn))
    }

    pub fn fade_in_tick(ctx: &Context<'_>, _event: &Event) -> Decision {
        let rates = ctx.rates();
        let opacity = fade::step(ctx.opacity, rates.fade_in, rates.max);
        let decision = Decision::stay().with(Command::SetOpacity(opacity));
        if opacity >= rates.max {
            decision
                .with(Command::CancelTicker)
                .with(Command::StartTimer(ctx.config.display()))
                .then(Next::To(Phase::Display))
        } else {
            decision
        }
    }

    /// Display time is over (or the pointer left): fade out, or remove the
    /// box at once when fade-out is disabled.
    pub fn hide(ctx: &Context<'_>, _event: &Event) -> Decision {
        let decision = Decision::stay().with(Command::CancelTimer);
        if ctx.config.fade_out_seconds > 0.0 {
            decision
                .with(Command::StartTicker(FadeRates::from_config(ctx.config)))
                .then(Next::To(Phase::FadeOut))
        } else {
            decision
                .with(Command::DestroyBox)
                .then(Next::To(Phase::Inactive))
        }
    }

    pub fn fade_out_tick(ctx: &Context<'_>, _event: &Event) -> Decision {
        let rates = ctx.rates();
        let opacity = fade::step(ctx.opacity, -rates.fade_out, rates.max);
        let decision = Decision::stay().with(Command::SetOpacity(opacity));
        if opacity <= 0.0 {
            decision
                .with(Command::CancelTicker)
                .with(Command::DestroyBox)
                .then(Next::To(Phase::Inactive))
        } else {
            decision
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Placement;

    fn context(phase: Phase, config: &TooltipConfig, opacity: f64) -> Context<'_> {
        Context {
            phase,
            config,
            opacity,
            fade: None,
            visible: phase.is_visible(),
        }
    }

    fn decide(phase: Phase, config: &TooltipConfig, opacity: f64, event: Event) -> Decision {
        TransitionTable::standard()
            .decide(&context(phase, config, opacity), &event)
            .unwrap()
    }

    #[test]
    fn standard_table_has_seventeen_entries() {
        let table = TransitionTable::standard();
        assert_eq!(table.len(), 17);
        assert!(!table.contains(Phase::Inactive, EventKind::Timeout));
        assert!(!table.contains(Phase::Display, EventKind::Tick));
        assert!(!table.contains(Phase::FadeIn, EventKind::PointerEnter));
    }

    #[test]
    fn missing_entry_is_unexpected() {
        let config = TooltipConfig::default();
        let result = TransitionTable::standard()
            .decide(&context(Phase::Inactive, &config, 0.0), &Event::Tick);
        assert_eq!(
            result.unwrap_err(),
            TransitionError::UnexpectedEvent {
                event: EventKind::Tick,
                state: Phase::Inactive,
            }
        );
    }

    #[test]
    fn enter_restarts_pause_timer() {
        let config = TooltipConfig::default();
        let decision = decide(Phase::Inactive, &config, 0.0, Event::pointer_enter(5.0, 6.0));
        assert_eq!(decision.next, Next::To(Phase::Pause));
        assert_eq!(
            decision.commands,
            vec![
                Command::CancelTimer,
                Command::SavePointer(Point::new(5.0, 6.0)),
                Command::StartTimer(Duration::from_millis(500)),
            ]
        );
    }

    #[test]
    fn move_while_inactive_acts_like_enter() {
        let config = TooltipConfig::default();
        let enter = decide(Phase::Inactive, &config, 0.0, Event::pointer_enter(1.0, 1.0));
        let moved = decide(Phase::Inactive, &config, 0.0, Event::pointer_move(1.0, 1.0));
        assert_eq!(enter, moved);
    }

    #[test]
    fn pause_timeout_starts_fade_in() {
        let config = TooltipConfig::default();
        let decision = decide(Phase::Pause, &config, 0.0, Event::Timeout);
        assert_eq!(decision.next, Next::To(Phase::FadeIn));
        assert_eq!(decision.commands[0], Command::CancelTimer);
        assert_eq!(decision.commands[1], Command::CreateBox);
        assert_eq!(
            decision.commands[2],
            Command::StartTicker(FadeRates::from_config(&config))
        );
    }

    #[test]
    fn pause_timeout_without_fade_in_displays_immediately() {
        let config = TooltipConfig {
            fade_in_seconds: 0.0,
            opacity_max: 0.9,
            ..TooltipConfig::default()
        };
        let decision = decide(Phase::Pause, &config, 0.0, Event::Timeout);
        assert_eq!(decision.next, Next::To(Phase::Display));
        assert!(decision.commands.contains(&Command::SetOpacity(0.9)));
        assert!(decision
            .commands
            .contains(&Command::StartTimer(Duration::from_secs(10))));
    }

    #[test]
    fn fade_in_tick_stops_at_max() {
        let config = TooltipConfig {
            fade_in_seconds: 1.0,
            fade_steps_per_second: 10,
            ..TooltipConfig::default()
        };
        let decision = decide(Phase::FadeIn, &config, 0.5, Event::Tick);
        assert_eq!(decision.next, Next::Stay);
        assert_eq!(decision.commands, vec![Command::SetOpacity(0.6)]);

        let decision = decide(Phase::FadeIn, &config, 0.9, Event::Tick);
        assert_eq!(decision.next, Next::To(Phase::Display));
        assert_eq!(
            decision.commands,
            vec![
                Command::SetOpacity(1.0),
                Command::CancelTicker,
                Command::StartTimer(Duration::from_secs(10)),
            ]
        );
    }

    #[test]
    fn fade_in_tick_uses_captured_rates() {
        let config = TooltipConfig::default();
        let captured = FadeRates {
            max: 1.0,
            fade_in: 0.25,
            fade_out: 0.25,
            interval: Duration::from_millis(50),
        };
        let ctx = Context {
            fade: Some(captured),
            ..context(Phase::FadeIn, &config, 0.0)
        };
        let decision = TransitionTable::standard().decide(&ctx, &Event::Tick).unwrap();
        assert_eq!(decision.commands, vec![Command::SetOpacity(0.25)]);
    }

    #[test]
    fn fade_out_tick_destroys_at_zero() {
        let config = TooltipConfig {
            fade_out_seconds: 1.0,
            fade_steps_per_second: 4,
            ..TooltipConfig::default()
        };
        let decision = decide(Phase::FadeOut, &config, 0.25, Event::Tick);
        assert_eq!(decision.next, Next::To(Phase::Inactive));
        assert_eq!(
            decision.commands,
            vec![
                Command::SetOpacity(0.0),
                Command::CancelTicker,
                Command::DestroyBox,
            ]
        );
    }

    #[test]
    fn display_leave_behaves_like_timeout() {
        let config = TooltipConfig::default();
        let leave = decide(Phase::Display, &config, 1.0, Event::pointer_leave(0.0, 0.0));
        let timeout = decide(Phase::Display, &config, 1.0, Event::Timeout);
        assert_eq!(leave, timeout);
        assert_eq!(leave.next, Next::To(Phase::FadeOut));
    }

    #[test]
    fn display_timeout_without_fade_out_removes_box() {
        let config = TooltipConfig {
            fade_out_seconds: 0.0,
            ..TooltipConfig::default()
        };
        let decision = decide(Phase::Display, &config, 1.0, Event::Timeout);
        assert_eq!(decision.next, Next::To(Phase::Inactive));
        assert_eq!(
            decision.commands,
            vec![Command::CancelTimer, Command::DestroyBox]
        );
    }

    #[test]
    fn moves_only_follow_in_hover_mode() {
        let hover = TooltipConfig::default();
        let decision = decide(Phase::Display, &hover, 1.0, Event::pointer_move(7.0, 8.0));
        assert_eq!(decision.commands, vec![Command::MoveBox(Point::new(7.0, 8.0))]);
        assert_eq!(decision.next, Next::Stay);

        let anchored = TooltipConfig {
            placement: Placement::Bottom,
            ..TooltipConfig::default()
        };
        let decision = decide(Phase::Display, &anchored, 1.0, Event::pointer_move(7.0, 8.0));
        assert!(decision.commands.is_empty());
    }

    #[test]
    fn fade_direction_reverses_without_touching_ticker() {
        let config = TooltipConfig::default();
        let out = decide(Phase::FadeIn, &config, 0.4, Event::pointer_leave(0.0, 0.0));
        assert_eq!(out, Decision::to(Phase::FadeOut));

        let back = decide(Phase::FadeOut, &config, 0.4, Event::pointer_enter(3.0, 3.0));
        assert_eq!(back.next, Next::To(Phase::FadeIn));
        assert_eq!(back.commands, vec![Command::MoveBox(Point::new(3.0, 3.0))]);
    }

    #[test]
    fn named_targets_resolve_against_phases() {
        assert_eq!(
            Next::Named("Display".into()).resolve(Phase::Pause, EventKind::Timeout),
            Ok(Phase::Display)
        );
        assert_eq!(
            Next::Named("Hidden".into()).resolve(Phase::Pause, EventKind::Timeout),
            Err(TransitionError::UndefinedState {
                target: "Hidden".into(),
                from: Phase::Pause,
                event: EventKind::Timeout,
            })
        );
        assert_eq!(Next::Stay.resolve(Phase::FadeIn, EventKind::Tick), Ok(Phase::FadeIn));
    }

    #[test]
    fn custom_rules_replace_entries() {
        let table = TransitionTable::standard()
            .with(Phase::Inactive, EventKind::Timeout, |_ctx, _event| Decision::stay());
        assert_eq!(table.len(), 18);

        let mut table = table;
        assert!(table.remove(Phase::Inactive, EventKind::PointerLeave).is_some());
        assert!(!table.contains(Phase::Inactive, EventKind::PointerLeave));
    }
}
