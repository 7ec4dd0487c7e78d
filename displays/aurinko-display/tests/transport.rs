//! Renderer and DOGL128 driver against recording mocks

use core::convert::Infallible;

use aurinko_display::dogl::{page_address_command, INIT_SEQUENCE};
use aurinko_display::font::FONT;
use aurinko_display::{
    DisplayError, DisplayTransport, Dogl128, PageLine, PlacedText, Renderer, PAGE_COUNT, WIDTH,
};
use embassy_futures::block_on;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal_async::spi::{ErrorType as SpiErrorType, Operation, SpiDevice};

/// Transport recording every page it receives
#[derive(Default)]
struct RecordingTransport {
    pending_page: Option<u8>,
    pages: Vec<(u8, PageLine)>,
    busy_polls: u8,
    polls: core::cell::Cell<u32>,
}

impl DisplayTransport for RecordingTransport {
    async fn init(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    async fn begin_page(&mut self, page: u8) -> Result<(), DisplayError> {
        self.pending_page = Some(page);
        Ok(())
    }

    async fn send_line(&mut self, line: &PageLine) -> Result<(), DisplayError> {
        let page = self.pending_page.take().ok_or(DisplayError::InvalidPage)?;
        self.pages.push((page, *line));
        Ok(())
    }

    fn is_ready(&self) -> bool {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        polls > self.busy_polls as u32
    }
}

#[test]
fn test_renderer_sends_every_page_in_order() {
    let mut transport = RecordingTransport::default();
    let mut renderer = Renderer::new();
    let texts = [PlacedText::new("AKKU", 53, 2), PlacedText::new(">", 5, 54)];

    block_on(renderer.render(&texts, &mut transport)).unwrap();

    assert_eq!(transport.pages.len(), PAGE_COUNT);
    for (i, (page, _)) in transport.pages.iter().enumerate() {
        assert_eq!(*page as usize, i);
    }
    let (_, first) = &transport.pages[0];
    assert_eq!(first[53], FONT[0][0] << 2);
    let (_, last) = &transport.pages[6];
    assert_eq!(last[6], FONT[40][1] << 6);
}

#[test]
fn test_renderer_waits_until_ready() {
    let mut transport = RecordingTransport {
        busy_polls: 3,
        ..Default::default()
    };
    let mut renderer = Renderer::new();
    block_on(renderer.render(&[], &mut transport)).unwrap();
    assert_eq!(transport.pages.len(), PAGE_COUNT);
    assert!(transport.polls.get() >= PAGE_COUNT as u32 + 3);
    assert!(transport.pages.iter().all(|(_, line)| line.iter().all(|&b| b == 0)));
}

/// Bytes written on the bus, tagged with the A0 level
#[derive(Default)]
struct Bus {
    a0_high: bool,
    writes: Vec<(bool, Vec<u8>)>,
}

struct MockSpi<'a>(&'a core::cell::RefCell<Bus>);
struct MockA0<'a>(&'a core::cell::RefCell<Bus>);

impl SpiErrorType for MockSpi<'_> {
    type Error = Infallible;
}

impl SpiDevice for MockSpi<'_> {
    async fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        let mut bus = self.0.borrow_mut();
        let level = bus.a0_high;
        for op in operations {
            if let Operation::Write(bytes) = op {
                bus.writes.push((level, bytes.to_vec()));
            }
        }
        Ok(())
    }
}

impl PinErrorType for MockA0<'_> {
    type Error = Infallible;
}

impl OutputPin for MockA0<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().a0_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().a0_high = true;
        Ok(())
    }
}

#[test]
fn test_dogl_wire_format() {
    let bus = core::cell::RefCell::new(Bus::default());
    let mut lcd = Dogl128::new(MockSpi(&bus), MockA0(&bus));
    let mut renderer = Renderer::new();

    block_on(async {
        lcd.init().await.unwrap();
        renderer
            .render(&[PlacedText::new("OK", 84, 41)], &mut lcd)
            .await
            .unwrap();
    });

    let bus = bus.into_inner();
    assert_eq!(bus.writes.len(), 1 + 2 * PAGE_COUNT);
    assert_eq!(bus.writes[0], (false, INIT_SEQUENCE.to_vec()));
    for page in 0..PAGE_COUNT {
        let (a0, command) = &bus.writes[1 + 2 * page];
        assert!(!a0);
        assert_eq!(command.as_slice(), &page_address_command(page as u8, 0));
        let (a0, data) = &bus.writes[2 + 2 * page];
        assert!(a0);
        assert_eq!(data.len(), WIDTH);
    }
    // y = 41 starts one row into page 5
    assert_eq!(bus.writes[2 + 2 * 5].1[84], FONT[14][0] << 1);
}

#[test]
fn test_dogl_rejects_invalid_page() {
    let bus = core::cell::RefCell::new(Bus::default());
    let mut lcd = Dogl128::new(MockSpi(&bus), MockA0(&bus));
    assert_eq!(block_on(lcd.begin_page(8)), Err(DisplayError::InvalidPage));
    assert!(bus.borrow().writes.is_empty());
}
