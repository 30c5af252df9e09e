//! Integration tests for the brewsense front-end.
//!
//! These drive the public `FrontEnd` API tick by tick with the production
//! timing, exercising debounce, level, status, blink and indicator stages
//! together.

mod integration;
