//! Display stack for the Aurinko charger
//!
//! This crate provides:
//! - A fixed 5x8 glyph table for the characters the UI uses
//! - A page compositor placing text at pixel positions on a 128x64
//!   monochrome display addressed in 8-pixel-tall pages
//! - `DisplayTransport`, the page sink the renderer streams into
//! - The EA DOGL128-6 command codec and SPI driver
//!
//! # Architecture
//!
//! The renderer never holds a full frame. For every page it rebuilds a
//! single 128-byte line from the positioned texts and hands it to the
//! transport, waiting until the transport is ready before reusing the line.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod dogl;
pub mod font;
pub mod render;

// Re-export key types
pub use backend::{DisplayError, DisplayTransport};
pub use dogl::Dogl128;
pub use render::{compose_page, contribution, PageLine, PlacedText, Renderer, PAGE_COUNT, WIDTH};
