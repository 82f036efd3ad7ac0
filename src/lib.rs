//! Puzzlegrid - image tile puzzle core
//!
//! This library provides functionality to:
//! - Slice an uploaded image into a grid of shared, immutable fragments
//! - Apply discrete actions (rotate, toggle transparency, swap, upload,
//!   reset) to immutable grid snapshots through a pure transition function
//! - Undo and redo any action through a back/forward snapshot history
//! - Compose a grid snapshot back into a single image

pub mod cli;
pub mod compose;
pub mod fragment;
pub mod history;
pub mod models;
pub mod output;
pub mod script;
pub mod session;
pub mod tiler;
pub mod transition;
