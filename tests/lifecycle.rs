//! End-to-end tooltip lifecycles through the public API.

use fadetip::adapter::translate;
use fadetip::checkpoint::Snapshot;
use fadetip::config::OptionsPatch;
use fadetip::core::{EventKind, Placement, Point, Rect, Size};
use fadetip::effects::{
    Command, Context, Decision, ManualTimers, RecordingSurface, SurfaceOp, TransitionTable,
};
use fadetip::registry::Registry;
use fadetip::{Event, Phase, TooltipBuilder, TooltipConfig};
use std::time::Duration;

fn surface() -> RecordingSurface {
    RecordingSurface::new(
        Rect::new(300.0, 200.0, 80.0, 20.0),
        Size::new(800.0, 600.0),
        Size::new(120.0, 30.0),
    )
}

#[test]
fn hover_cycle_driven_by_raw_notifications() {
    let mut tooltip = TooltipBuilder::new("link")
        .content("Follow this link")
        .options(OptionsPatch {
            offset_x: Some(10.0),
            offset_y: Some(15.0),
            fade_steps_per_second: Some(10),
            ..OptionsPatch::default()
        })
        .surface(surface())
        .timers(ManualTimers::new())
        .build()
        .unwrap();

    tooltip.handle(translate("mouseenter", 310.0, 205.0).unwrap());
    tooltip.handle(translate("mousemove", 320.0, 208.0).unwrap());
    tooltip.advance(Duration::from_millis(500));

    assert_eq!(tooltip.phase(), Phase::FadeIn);
    assert_eq!(tooltip.surface().position(), Some(Point::new(330.0, 223.0)));

    tooltip.handle(translate("mousemove", 330.0, 210.0).unwrap());
    assert_eq!(tooltip.surface().position(), Some(Point::new(340.0, 225.0)));

    tooltip.advance(Duration::from_secs(1));
    assert_eq!(tooltip.phase(), Phase::Display);

    tooltip.handle(translate("mouseleave", 400.0, 300.0).unwrap());
    assert_eq!(tooltip.phase(), Phase::FadeOut);

    tooltip.advance(Duration::from_secs(4));
    assert_eq!(tooltip.phase(), Phase::Inactive);
    assert_eq!(tooltip.surface().live_box(), None);
    assert_eq!(tooltip.timers().pending(), 0);
}

#[test]
fn anchored_placement_is_clamped_into_the_viewport() {
    let mut tooltip = TooltipBuilder::new("corner")
        .content("Near the edge")
        .options(OptionsPatch {
            placement: Some(Placement::Right),
            fade_in_seconds: Some(0.0),
            ..OptionsPatch::default()
        })
        .surface(RecordingSurface::new(
            Rect::new(760.0, 10.0, 30.0, 20.0),
            Size::new(800.0, 600.0),
            Size::new(120.0, 30.0),
        ))
        .timers(ManualTimers::new())
        .build()
        .unwrap();

    tooltip.handle(Event::pointer_enter(770.0, 15.0));
    tooltip.advance(Duration::from_millis(500));

    assert_eq!(tooltip.phase(), Phase::Display);
    let at = tooltip.surface().position().unwrap();
    assert!(at.x + 120.0 <= 800.0);
    assert!(at.x >= 0.0 && at.y >= 0.0);

    tooltip.handle(Event::pointer_move(0.0, 0.0));
    assert_eq!(tooltip.surface().position(), Some(at));
}

#[test]
fn reversing_fades_never_recreate_the_box() {
    let mut tooltip = TooltipBuilder::new("button")
        .content("Click me")
        .surface(surface())
        .timers(ManualTimers::new())
        .build()
        .unwrap();

    tooltip.handle(Event::pointer_enter(1.0, 1.0));
    tooltip.advance(Duration::from_millis(700));
    for _ in 0..3 {
        tooltip.handle(Event::pointer_leave(1.0, 1.0));
        tooltip.advance(Duration::from_millis(100));
        assert_eq!(tooltip.phase(), Phase::FadeOut);
        tooltip.handle(Event::pointer_enter(1.0, 1.0));
        tooltip.advance(Duration::from_millis(100));
        assert_eq!(tooltip.phase(), Phase::FadeIn);
    }

    assert_eq!(tooltip.surface().created(), 1);
    let destroyed = tooltip
        .surface()
        .ops()
        .iter()
        .filter(|op| matches!(op, SurfaceOp::Destroy { .. }))
        .count();
    assert_eq!(destroyed, 0);
}

#[test]
fn custom_rule_can_skip_the_pause() {
    let mut tooltip = TooltipBuilder::new("instant")
        .content("No waiting")
        .rule(Phase::Inactive, EventKind::PointerEnter, |_ctx: &Context<'_>, event: &Event| {
            let mut decision = Decision::to(Phase::Pause);
            if let Some(at) = event.position() {
                decision = decision.with(Command::SavePointer(at));
            }
            decision.with(Command::StartTimer(Duration::ZERO))
        })
        .surface(surface())
        .timers(ManualTimers::new())
        .build()
        .unwrap();

    tooltip.handle(Event::pointer_enter(5.0, 5.0));
    tooltip.advance(Duration::ZERO);
    assert_eq!(tooltip.phase(), Phase::FadeIn);
}

#[test]
fn empty_table_treats_everything_as_unexpected() {
    let mut tooltip = TooltipBuilder::new("inert")
        .content("never shown")
        .table(TransitionTable::empty())
        .surface(surface())
        .timers(ManualTimers::new())
        .build()
        .unwrap();

    tooltip.handle(Event::pointer_enter(5.0, 5.0));
    assert_eq!(tooltip.phase(), Phase::Inactive);
    assert!(tooltip.last_fault().is_some());
}

#[test]
fn registry_manages_many_surfaces() {
    let mut registry = Registry::new(|_key: &u32| (surface(), ManualTimers::new()));
    for key in 0..3 {
        let title = format!("tip {key}");
        registry
            .attach(key, None, Some(title.as_str()), &OptionsPatch::default())
            .unwrap();
    }

    registry.dispatch_raw(&0, "pointerenter", 1.0, 1.0).unwrap();
    registry.dispatch_raw(&1, "pointerenter", 1.0, 1.0).unwrap();
    registry.advance(Duration::from_millis(500));

    assert_eq!(registry.get(&0).unwrap().phase(), Phase::FadeIn);
    assert_eq!(registry.get(&1).unwrap().phase(), Phase::FadeIn);
    assert_eq!(registry.get(&2).unwrap().phase(), Phase::Inactive);

    registry.remove(&0).unwrap();
    registry.advance(Duration::from_secs(2));
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(&1).unwrap().phase(), Phase::Display);
}

#[test]
fn snapshot_of_a_traced_session() {
    let mut tooltip = TooltipBuilder::new("traced")
        .content("Watch me")
        .config(TooltipConfig {
            trace_enabled: true,
            fade_in_seconds: 0.0,
            ..TooltipConfig::default()
        })
        .surface(surface())
        .timers(ManualTimers::new())
        .build()
        .unwrap();

    tooltip.handle(Event::pointer_enter(2.0, 3.0));
    tooltip.advance(Duration::from_millis(500));

    let snapshot = Snapshot::from_json(&tooltip.snapshot().to_json().unwrap()).unwrap();
    assert_eq!(snapshot.phase, Phase::Display);
    assert_eq!(snapshot.opacity, 1.0);
    assert!(snapshot.timer_active);
    assert_eq!(
        snapshot.history.get_path(),
        vec![&Phase::Inactive, &Phase::Pause, &Phase::Display]
    );
}
