//! Unit tests
//!
//! These never run pip or PyInstaller and never install anything; fixtures
//! are plain files in temp dirs, so they pass on machines with no Python.

mod config;
mod graph;
