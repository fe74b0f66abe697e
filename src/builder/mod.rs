//! Builder API for declaring state trees.
//!
//! States are declared as nested [`StateBuilder`]s and handed to a
//! [`StatechartBuilder`], which flattens them into a [`StateTree`] in
//! depth-first order, validates the whole tree and returns a ready
//! [`StatechartManager`].
//!
//! # Example
//!
//! ```
//! use statechart::builder::{StateBuilder, StatechartBuilder};
//!
//! let chart = StatechartBuilder::<()>::new()
//!     .root(
//!         StateBuilder::new("door")
//!             .initial("closed")
//!             .substate(StateBuilder::new("open"))
//!             .substate(StateBuilder::new("closed")),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(chart.current_state_names(), vec!["closed"]);
//! ```
//!
//! [`StateTree`]: crate::core::StateTree
//! [`StatechartManager`]: crate::engine::StatechartManager

mod error;
mod state;
mod statechart;
mod validation;

pub use error::{BuildError, TreeViolation};
pub use state::StateBuilder;
pub use statechart::StatechartBuilder;
