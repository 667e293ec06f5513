//! Per-surface attachment of tooltips.
//!
//! A [`Registry`] owns one [`Tooltip`] per surface key. Attaching a key
//! that already has a tooltip updates it in place instead of stacking a
//! second instance on the same surface. Collaborators for new instances
//! come from a factory closure, so each tooltip gets its own surface
//! handle and timers.

use crate::adapter::{translate, AdapterError};
use crate::builder::{BuildError, TooltipBuilder};
use crate::config::{ConfigErrors, OptionsPatch, TooltipConfig};
use crate::core::{Event, Phase};
use crate::effects::{Content, ManualTimers, RenderSurface, TimerService, Tooltip};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no tooltip attached to {0}")]
    NotAttached(String),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    InvalidOptions(#[from] ConfigErrors),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// Tooltips keyed by the surface they are attached to.
///
/// # Example
///
/// ```rust
/// use fadetip::config::OptionsPatch;
/// use fadetip::core::Phase;
/// use fadetip::effects::{ManualTimers, RecordingSurface};
/// use fadetip::registry::Registry;
///
/// let mut registry =
///     Registry::new(|_key: &&str| (RecordingSurface::default(), ManualTimers::new()));
/// registry
///     .attach("save", None, Some("Save changes"), &OptionsPatch::default())
///     .unwrap();
///
/// assert_eq!(registry.dispatch_raw(&"save", "mouseenter", 5.0, 5.0).unwrap(), Phase::Pause);
/// assert_eq!(registry.content(&"save").unwrap().to_string(), "Save changes");
/// ```
pub struct Registry<K, R: RenderSurface, T: TimerService, F> {
    factory: F,
    defaults: TooltipConfig,
    tooltips: HashMap<K, Tooltip<R, T>>,
}

impl<K, R, T, F> Registry<K, R, T, F>
where
    K: Eq + Hash + fmt::Display,
    R: RenderSurface,
    T: TimerService,
    F: FnMut(&K) -> (R, T),
{
    pub fn new(factory: F) -> Self {
        Self::with_defaults(factory, TooltipConfig::default())
    }

    /// Use `defaults` as the base options every new tooltip starts from.
    pub fn with_defaults(factory: F, defaults: TooltipConfig) -> Self {
        Self {
            factory,
            defaults,
            tooltips: HashMap::new(),
        }
    }

    /// Attach a tooltip to `key`, or update the one already attached.
    ///
    /// Content falls back to a non-empty `title` for new and existing
    /// tooltips alike. For an existing tooltip the options patch is validated
    /// first; when it is rejected neither options nor content change.
    pub fn attach(
        &mut self,
        key: K,
        content: Option<Content>,
        title: Option<&str>,
        options: &OptionsPatch,
    ) -> Result<&mut Tooltip<R, T>, RegistryError> {
        if self.tooltips.contains_key(&key) {
            let tooltip = self.lookup_mut(&key)?;
            tooltip.change_options(options)?;
            let fallback = title.filter(|title| !title.is_empty()).map(Content::from);
            if let Some(content) = content.or(fallback) {
                tooltip.change_content(content);
            }
            return Ok(tooltip);
        }

        let (surface, timers) = (self.factory)(&key);
        let mut builder = TooltipBuilder::new(key.to_string())
            .config(self.defaults.clone())
            .options(options.clone())
            .surface(surface)
            .timers(timers);
        if let Some(content) = content {
            builder = builder.content(content);
        }
        if let Some(title) = title {
            builder = builder.title(title);
        }
        let tooltip = builder.build()?;

        tracing::debug!(surface = %key, instance = %tooltip.id(), "tooltip attached");
        Ok(self.tooltips.entry(key).or_insert(tooltip))
    }

    pub fn update_options(&mut self, key: &K, patch: &OptionsPatch) -> Result<(), RegistryError> {
        self.lookup_mut(key)?.change_options(patch)?;
        Ok(())
    }

    pub fn options(&self, key: &K) -> Result<&TooltipConfig, RegistryError> {
        Ok(self.lookup(key)?.options())
    }

    pub fn content(&self, key: &K) -> Result<&Content, RegistryError> {
        Ok(self.lookup(key)?.content())
    }

    pub fn set_content(
        &mut self,
        key: &K,
        content: impl Into<Content>,
    ) -> Result<(), RegistryError> {
        self.lookup_mut(key)?.change_content(content);
        Ok(())
    }

    /// Stop the tooltip on `key` and detach it.
    pub fn remove(&mut self, key: &K) -> Result<Tooltip<R, T>, RegistryError> {
        let mut tooltip = self
            .tooltips
            .remove(key)
            .ok_or_else(|| RegistryError::NotAttached(key.to_string()))?;
        tooltip.stop();
        tracing::debug!(surface = %key, instance = %tooltip.id(), "tooltip detached");
        Ok(tooltip)
    }

    /// Deliver an event and report the phase it left the tooltip in.
    pub fn dispatch(&mut self, key: &K, event: Event) -> Result<Phase, RegistryError> {
        let tooltip = self.lookup_mut(key)?;
        tooltip.handle(event);
        Ok(tooltip.phase())
    }

    /// Deliver a raw named notification, see [`translate`].
    pub fn dispatch_raw(
        &mut self,
        key: &K,
        name: &str,
        x: f64,
        y: f64,
    ) -> Result<Phase, RegistryError> {
        let event = translate(name, x, y)?;
        self.dispatch(key, event)
    }

    pub fn get(&self, key: &K) -> Option<&Tooltip<R, T>> {
        self.tooltips.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut Tooltip<R, T>> {
        self.tooltips.get_mut(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tooltips.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.tooltips.keys()
    }

    pub fn len(&self) -> usize {
        self.tooltips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tooltips.is_empty()
    }

    fn lookup(&self, key: &K) -> Result<&Tooltip<R, T>, RegistryError> {
        self.tooltips
            .get(key)
            .ok_or_else(|| RegistryError::NotAttached(key.to_string()))
    }

    fn lookup_mut(&mut self, key: &K) -> Result<&mut Tooltip<R, T>, RegistryError> {
        self.tooltips
            .get_mut(key)
            .ok_or_else(|| RegistryError::NotAttached(key.to_string()))
    }
}

impl<K, R, F> Registry<K, R, ManualTimers, F>
where
    K: Eq + Hash + fmt::Display,
    R: RenderSurface,
    F: FnMut(&K) -> (R, ManualTimers),
{
    /// Advance every tooltip's manual clock by `by`.
    pub fn advance(&mut self, by: Duration) {
        for tooltip in self.tooltips.values_mut() {
            tooltip.advance(by);
        }
    }
}
