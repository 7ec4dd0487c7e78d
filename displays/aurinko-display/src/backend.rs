//! Display transport trait
//!
//! The renderer streams the display one page at a time into a transport.

use core::future::Future;

use crate::render::PageLine;

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus or pin error talking to the display
    Communication,
    /// Page index outside the display
    InvalidPage,
}

/// Page sink
///
/// Implementations either drive the panel directly or forward the page to
/// whoever does.
pub trait DisplayTransport {
    /// Send the controller init sequence
    fn init(&mut self) -> impl Future<Output = Result<(), DisplayError>>;

    /// Select the page the next line is written to
    fn begin_page(&mut self, page: u8) -> impl Future<Output = Result<(), DisplayError>>;

    /// Write a full 128-column line to the selected page
    fn send_line(&mut self, line: &PageLine) -> impl Future<Output = Result<(), DisplayError>>;

    /// Check if the previous line has been taken over
    fn is_ready(&self) -> bool;
}
