//! Notebook execution through an external `nbconvert` tool.
//!
//! Tool discovery ([`locator`]) and command construction ([`invocation`])
//! are kept apart from the subprocess itself ([`subprocess`]) so each part
//! can be exercised without spawning real processes. [`runner`] holds the
//! trait the run loop is written against.

pub mod invocation;
pub mod locator;
pub mod runner;
pub mod subprocess;
