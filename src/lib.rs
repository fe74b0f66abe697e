//! Statechart: a hierarchical state machine runtime
//!
//! States form a tree. Entering a state enters its ancestors; a state's
//! substates are either alternatives, of which one is active, or concurrent
//! regions, all active together. Transitions are planned as a pure function
//! of the tree, the active configuration and recorded history, then executed
//! by firing exit hooks deepest first and entry hooks shallowest first.
//!
//! # Core Concepts
//!
//! - **Tree**: immutable arena of [`StateNode`]s, built with [`StatechartBuilder`]
//! - **History**: each parent remembers the child that was active when it was
//!   last exited; transitions can recall one level or the whole chain
//! - **Context**: an optional value of type `C` handed to every hook of a
//!   transition and recorded by the [`Monitor`]
//! - **Monitor**: ordered log of enter/exit notifications with a
//!   [`SequenceMatcher`] for checking it against an expected pattern
//!
//! # Example
//!
//! ```rust
//! use statechart::{HistoryMode, StateBuilder, StatechartBuilder};
//!
//! let mut chart = StatechartBuilder::<String>::new()
//!     .root(
//!         StateBuilder::new("player")
//!             .substate(
//!                 StateBuilder::new("on")
//!                     .history(HistoryMode::Shallow)
//!                     .substate(StateBuilder::new("playing"))
//!                     .substate(StateBuilder::new("paused")),
//!             )
//!             .substate(StateBuilder::new("off")),
//!     )
//!     .monitor_is_active(true)
//!     .build()
//!     .unwrap();
//!
//! chart.goto_state("paused", None).unwrap();
//! chart.goto_state("off", Some(&"power button".to_string())).unwrap();
//!
//! chart.reset_monitor();
//! chart.goto_state("on", None).unwrap();
//! assert_eq!(chart.current_state_names(), vec!["paused"]);
//!
//! let matched = chart
//!     .monitor()
//!     .unwrap()
//!     .matcher()
//!     .begin()
//!     .exited(["off"])
//!     .entered(["on", "paused"])
//!     .end()
//!     .unwrap();
//! assert!(matched);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod engine;
pub mod monitor;

// Re-export commonly used types
pub use builder::{BuildError, StateBuilder, StatechartBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use config::StatechartOptions;
pub use crate::core::{HistoryMode, StateBehavior, StateId, StateNode};
pub use engine::{StatechartError, StatechartManager};
pub use monitor::{Action, MatcherError, Monitor, MonitorRecord, SequenceMatcher};
