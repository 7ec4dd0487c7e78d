//! Display hand-over
//!
//! The cycle task renders through [`ChannelTransport`]: pages go to the LCD
//! task over a single-slot channel and the transport only reports ready
//! again once the LCD task signals the page as consumed.

use aurinko_display::{DisplayError, DisplayTransport, PageLine, PAGE_COUNT};

use crate::channels::{LcdRequest, LCD_REQUEST, PAGE_CONSUMED};

/// Transport that forwards pages to the LCD task
pub struct ChannelTransport {
    page: u8,
    busy: bool,
}

impl Default for ChannelTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelTransport {
    pub const fn new() -> Self {
        Self { page: 0, busy: false }
    }

    async fn submit(&mut self, request: LcdRequest) {
        self.busy = true;
        PAGE_CONSUMED.reset();
        LCD_REQUEST.send(request).await;
        PAGE_CONSUMED.wait().await;
        self.busy = false;
    }
}

impl DisplayTransport for ChannelTransport {
    async fn init(&mut self) -> Result<(), DisplayError> {
        self.submit(LcdRequest::Init).await;
        Ok(())
    }

    async fn begin_page(&mut self, page: u8) -> Result<(), DisplayError> {
        if page as usize >= PAGE_COUNT {
            return Err(DisplayError::InvalidPage);
        }
        self.page = page;
        Ok(())
    }

    async fn send_line(&mut self, line: &PageLine) -> Result<(), DisplayError> {
        self.submit(LcdRequest::Page {
            page: self.page,
            line: *line,
        })
        .await;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        !self.busy
    }
}
