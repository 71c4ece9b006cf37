//! Tests for the configurator runtime.

mod dispatch;
mod runner;
mod support;
