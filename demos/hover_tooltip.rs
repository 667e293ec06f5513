//! Hover Tooltip
//!
//! This example walks one tooltip through a full hover on a manual clock.
//!
//! Key concepts:
//! - Raw pointer notifications translated into events
//! - Pause, fade-in, display and fade-out driven by timers
//! - Reversing a fade when the pointer comes back
//! - Transition tracing through `tracing`
//!
//! Run with: cargo run --example hover_tooltip

use fadetip::adapter::translate;
use fadetip::builder::TooltipBuilder;
use fadetip::config::OptionsPatch;
use fadetip::effects::{ManualTimers, RecordingSurface, SurfaceOp};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let mut tooltip = TooltipBuilder::new("save-button")
        .title("Save the document (Ctrl+S)")
        .options_json(r#"{"offsetX": 12, "offsetY": 18, "fadeStepsPerSecond": 8}"#)?
        .trace(true)
        .surface(RecordingSurface::default())
        .timers(ManualTimers::new())
        .build()?;

    println!("=== Hover Tooltip ===\n");

    let script: &[(u64, &str, f64, f64)] = &[
        (0, "mouseenter", 110.0, 105.0),
        (200, "mousemove", 114.0, 108.0),
        (900, "mouseleave", 200.0, 200.0),
        (300, "mouseenter", 118.0, 110.0),
        (2_000, "mousemove", 120.0, 112.0),
    ];

    for (wait, name, x, y) in script {
        tooltip.advance(Duration::from_millis(*wait));
        tooltip.handle(translate(name, *x, *y)?);
        println!(
            "{:>10} at ({x}, {y}) -> {:<8} opacity {:.3}",
            name,
            tooltip.phase().to_string(),
            tooltip.opacity()
        );
    }

    println!("\nWaiting for the display time to run out...");
    tooltip.advance(Duration::from_secs(14));
    println!("Phase after waiting: {}", tooltip.phase());

    tooltip.change_options(&OptionsPatch {
        fade_out_seconds: Some(0.0),
        ..OptionsPatch::default()
    })?;
    println!("Fade-out disabled: {}", tooltip.options().fade_out_seconds == 0.0);

    let moves = tooltip
        .surface()
        .ops()
        .iter()
        .filter(|op| matches!(op, SurfaceOp::MoveTo { .. }))
        .count();
    println!("\nSurface saw {} operations ({moves} moves)", tooltip.surface().ops().len());
    println!("Recorded path:");
    for transition in tooltip.history().transitions().filter(|t| t.is_change()) {
        println!("  {} --{}--> {}", transition.from, transition.event, transition.to);
    }

    println!("\n{}", tooltip.snapshot().to_json()?);
    Ok(())
}
