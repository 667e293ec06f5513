//! Builder for constructing tooltips.

use crate::builder::error::BuildError;
use crate::config::{ConfigErrors, OptionsPatch, TooltipConfig};
use crate::core::{Event, EventKind, Phase};
use crate::effects::{
    Content, Context, Decision, RenderSurface, TimerService, Tooltip, TransitionTable,
};

/// Builder for a [`Tooltip`] with a fluent API.
///
/// Options are applied in call order: a later [`config`](Self::config)
/// replaces everything set before it, a later [`options`](Self::options)
/// overrides only the fields it carries. The result is validated once, in
/// [`build`](Self::build).
///
/// # Example
///
/// ```rust
/// use fadetip::builder::TooltipBuilder;
/// use fadetip::config::OptionsPatch;
/// use fadetip::core::Placement;
/// use fadetip::effects::{ManualTimers, RecordingSurface};
///
/// let tooltip = TooltipBuilder::new("delete-button")
///     .title("Delete the selected rows")
///     .options(OptionsPatch {
///         placement: Some(Placement::Top),
///         ..OptionsPatch::default()
///     })
///     .surface(RecordingSurface::default())
///     .timers(ManualTimers::new())
///     .build()
///     .unwrap();
///
/// assert_eq!(tooltip.options().placement, Placement::Top);
/// assert_eq!(tooltip.content().to_string(), "Delete the selected rows");
/// ```
pub struct TooltipBuilder<R, T> {
    surface_id: String,
    content: Option<Content>,
    title: Option<String>,
    config: TooltipConfig,
    table: TransitionTable,
    surface: Option<R>,
    timers: Option<T>,
}

impl<R, T> TooltipBuilder<R, T> {
    /// Start building a tooltip for the surface identified by `surface_id`.
    pub fn new(surface_id: impl Into<String>) -> Self {
        Self {
            surface_id: surface_id.into(),
            content: None,
            title: None,
            config: TooltipConfig::default(),
            table: TransitionTable::standard(),
            surface: None,
            timers: None,
        }
    }

    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Text shown when no content is given, usually the surface's title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace all options.
    pub fn config(mut self, config: TooltipConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the options `patch` carries.
    pub fn options(mut self, patch: OptionsPatch) -> Self {
        self.config = self.config.merged(&patch);
        self
    }

    /// Override options from a JSON object such as `{"pauseSeconds": 1}`.
    pub fn options_json(self, json: &str) -> Result<Self, BuildError> {
        let patch = OptionsPatch::from_json(json).map_err(ConfigErrors::from)?;
        Ok(self.options(patch))
    }

    pub fn trace(mut self, enabled: bool) -> Self {
        self.config.trace_enabled = enabled;
        self
    }

    /// Use a different transition table.
    pub fn table(mut self, table: TransitionTable) -> Self {
        self.table = table;
        self
    }

    /// Insert or replace one rule of the table.
    pub fn rule<F>(mut self, phase: Phase, kind: EventKind, rule: F) -> Self
    where
        F: Fn(&Context<'_>, &Event) -> Decision + Send + Sync + 'static,
    {
        self.table = self.table.with(phase, kind, rule);
        self
    }

    /// Remove one rule, making the event unexpected in that phase.
    pub fn without(mut self, phase: Phase, kind: EventKind) -> Self {
        self.table.remove(phase, kind);
        self
    }

    pub fn surface(mut self, surface: R) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn timers(mut self, timers: T) -> Self {
        self.timers = Some(timers);
        self
    }
}

impl<R: RenderSurface, T: TimerService> TooltipBuilder<R, T> {
    /// Build the tooltip.
    /// Returns an error if a collaborator or the content is missing, or if
    /// the options are invalid.
    pub fn build(self) -> Result<Tooltip<R, T>, BuildError> {
        let surface = self.surface.ok_or(BuildError::MissingSurface)?;
        let timers = self.timers.ok_or(BuildError::MissingTimers)?;
        let content = match (self.content, self.title) {
            (Some(content), _) => content,
            (None, Some(title)) if !title.is_empty() => Content::Text(title),
            _ => return Err(BuildError::MissingContent(self.surface_id)),
        };
        let config = self.config.validated()?;

        Ok(Tooltip::new(
            self.surface_id,
            content,
            config,
            self.table,
            surface,
            timers,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::core::Placement;
    use crate::effects::{ManualTimers, Next, RecordingSurface};

    fn builder() -> TooltipBuilder<RecordingSurface, ManualTimers> {
        TooltipBuilder::new("field")
            .surface(RecordingSurface::default())
            .timers(ManualTimers::new())
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = TooltipBuilder::<RecordingSurface, ManualTimers>::new("field")
            .content("tip")
            .timers(ManualTimers::new())
            .build();
        assert!(matches!(result, Err(BuildError::MissingSurface)));

        let result = TooltipBuilder::<RecordingSurface, ManualTimers>::new("field")
            .content("tip")
            .surface(RecordingSurface::default())
            .build();
        assert!(matches!(result, Err(BuildError::MissingTimers)));
    }

    #[test]
    fn builder_requires_content_or_title() {
        let result = builder().build();
        assert!(matches!(result, Err(BuildError::MissingContent(id)) if id == "field"));

        let result = builder().title("").build();
        assert!(matches!(result, Err(BuildError::MissingContent(_))));
    }

    #[test]
    fn content_wins_over_title() {
        let tooltip = builder()
            .title("title text")
            .content(Content::markup("<i>markup</i>"))
            .build()
            .unwrap();
        assert_eq!(tooltip.content(), &Content::markup("<i>markup</i>"));
    }

    #[test]
    fn options_apply_in_call_order() {
        let tooltip = builder()
            .content("tip")
            .options(OptionsPatch {
                pause_seconds: Some(2.0),
                ..OptionsPatch::default()
            })
            .config(TooltipConfig {
                display_seconds: 4.0,
                ..TooltipConfig::default()
            })
            .trace(true)
            .build()
            .unwrap();

        assert_eq!(tooltip.options().pause_seconds, 0.5);
        assert_eq!(tooltip.options().display_seconds, 4.0);
        assert!(tooltip.options().trace_enabled);
    }

    #[test]
    fn options_from_json() {
        let tooltip = builder()
            .content("tip")
            .options_json(r#"{"placementMode": "left", "offsetX": 6}"#)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(tooltip.options().placement, Placement::Left);
        assert_eq!(tooltip.options().offset_x, 6.0);

        let result = builder().options_json("{not json");
        assert!(matches!(result, Err(BuildError::InvalidConfig(_))));
    }

    #[test]
    fn invalid_options_fail_build_with_every_violation() {
        let result = builder()
            .content("tip")
            .options(OptionsPatch {
                opacity_max: Some(-1.0),
                fade_steps_per_second: Some(0),
                ..OptionsPatch::default()
            })
            .build();

        match result {
            Err(BuildError::InvalidConfig(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| *e == ConfigError::ZeroFadeRate));
            }
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn rules_can_be_overridden_and_removed() {
        let tooltip = builder()
            .content("tip")
            .rule(Phase::Display, EventKind::PointerLeave, |_ctx: &Context<'_>, _event: &Event| {
                Decision::stay().then(Next::Stay)
            })
            .without(Phase::Inactive, EventKind::PointerLeave)
            .build()
            .unwrap();

        assert!(tooltip.table().contains(Phase::Display, EventKind::PointerLeave));
        assert!(!tooltip.table().contains(Phase::Inactive, EventKind::PointerLeave));
        assert_eq!(tooltip.table().len(), TransitionTable::standard().len() - 1);
    }
}
