//! Checkpoint and Resume
//!
//! This example saves a statechart's runtime data and restores it into a
//! freshly built chart, as a long-running process would after a restart.
//!
//! Key concepts:
//! - Checkpoints hold active states, history and the journal by name
//! - Serialization formats (JSON for readability, binary for compactness)
//! - Restore fires no hooks and validates before changing anything
//! - History recorded before the checkpoint still works after restore
//!
//! Run with: cargo run --example checkpoint_resume

use statechart::{Checkpoint, HistoryMode, StateBuilder, StatechartBuilder, StatechartManager};

fn workflow() -> StatechartManager {
    StatechartBuilder::new()
        .root(
            StateBuilder::new("workflow")
                .substate(
                    StateBuilder::new("editing")
                        .history(HistoryMode::Shallow)
                        .substate(StateBuilder::new("drafting"))
                        .substate(StateBuilder::new("reviewing")),
                )
                .substate(StateBuilder::new("suspended"))
                .substate(StateBuilder::new("published")),
        )
        .journal_capacity(Some(16))
        .build()
        .unwrap()
}

fn main() {
    println!("=== Checkpoint and Resume Example ===\n");

    let mut original = workflow();
    original.goto_state("reviewing", None).unwrap();
    original.goto_state("suspended", None).unwrap();
    println!("Before checkpoint: {:?}", original.current_state_names());

    let checkpoint = original.checkpoint();
    let json = checkpoint.to_json().unwrap();
    let binary = checkpoint.to_binary().unwrap();
    println!("JSON checkpoint ({} bytes):\n{json}", json.len());
    println!("Binary checkpoint: {} bytes\n", binary.len());

    println!("Restoring into a new chart...");
    let mut resumed = workflow();
    println!("Fresh chart starts at: {:?}", resumed.current_state_names());

    let loaded = Checkpoint::from_binary(&binary).unwrap();
    resumed.restore(&loaded).unwrap();
    println!("After restore: {:?}", resumed.current_state_names());
    println!("Journal holds {} transitions", resumed.journal().len());

    resumed.goto_state("editing", None).unwrap();
    println!("Back to editing: {:?}", resumed.current_state_names());

    println!("\nRejecting a checkpoint from another chart:");
    let mut foreign = Checkpoint::from_json(&json).unwrap();
    foreign.active_states = vec!["archived".to_string()];
    match resumed.restore(&foreign) {
        Ok(()) => println!("  unexpectedly accepted"),
        Err(e) => println!("  {e}"),
    }
    println!("  still at: {:?}", resumed.current_state_names());

    println!("\nKey Takeaways:");
    println!("- Checkpoints are plain data keyed by state name");
    println!("- Restored history drives later default entries");
    println!("- An invalid checkpoint leaves the chart untouched");

    println!("\n=== Example Complete ===");
}
