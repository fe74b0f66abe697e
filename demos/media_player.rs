//! Media Player Statechart
//!
//! This example demonstrates nested states, concurrent regions and history.
//!
//! Key concepts:
//! - Concurrent regions (transport and volume are active together)
//! - Recursive history (powering back on restores every region)
//! - Context pass-through to entry and exit hooks
//! - Checking the monitor log with a sequence matcher
//!
//! Run with: cargo run --example media_player

use statechart::{HistoryMode, StateBuilder, StatechartBuilder};

fn announced(name: &'static str) -> StateBuilder<&'static str> {
    StateBuilder::new(name)
        .on_enter(move |button| match button {
            Some(button) => println!("  enter {name} ({button})"),
            None => println!("  enter {name}"),
        })
        .on_exit(move |_| println!("  exit {name}"))
}

fn main() {
    println!("=== Media Player Statechart Example ===\n");

    let mut player = StatechartBuilder::new()
        .root(
            StateBuilder::new("player")
                .initial("off")
                .substate(
                    announced("on").history(HistoryMode::Recursive).substate(
                        announced("session")
                            .concurrent()
                            .substate(
                                announced("transport")
                                    .substate(announced("stopped"))
                                    .substate(announced("playing"))
                                    .substate(announced("paused")),
                            )
                            .substate(
                                announced("volume")
                                    .substate(announced("normal"))
                                    .substate(announced("muted")),
                            ),
                    ),
                )
                .substate(announced("off")),
        )
        .monitor_is_active(true)
        .build()
        .unwrap();

    println!("Initial: {:?}\n", player.current_state_names());

    println!("Power on:");
    player.goto_state("on", Some(&"power")).unwrap();
    println!("Active: {:?}\n", player.current_state_names());

    println!("Play and mute:");
    player.goto_state("playing", Some(&"play")).unwrap();
    player.goto_state("muted", Some(&"mute")).unwrap();
    println!("Active: {:?}\n", player.current_state_names());

    println!("Power off:");
    player.goto_state("off", Some(&"power")).unwrap();
    println!("Active: {:?}", player.current_state_names());
    println!(
        "Remembered: transport={:?}, volume={:?}\n",
        player.last_active_substate("transport"),
        player.last_active_substate("volume")
    );

    player.reset_monitor();
    println!("Power on again:");
    player.goto_state("on", Some(&"power")).unwrap();
    println!("Active: {:?}", player.current_state_names());

    let monitor = player.monitor().unwrap();
    println!("Monitor: {monitor}");

    let matched = monitor
        .matcher()
        .begin()
        .exited(["off"])
        .entered(["on", "session"])
        .begin_concurrent()
        .begin_sequence()
        .entered(["volume", "muted"])
        .end_sequence()
        .begin_sequence()
        .entered(["transport", "playing"])
        .end_sequence()
        .end_concurrent()
        .end()
        .unwrap();
    println!("Regions restored in any order: {matched}");

    println!("\nKey Takeaways:");
    println!("- Each region keeps its own active substate");
    println!("- Recursive history recalls every region, not just the first level");
    println!("- Hooks see the context passed to the transition");

    println!("\n=== Example Complete ===");
}
