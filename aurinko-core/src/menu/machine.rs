//! Menu state machine
//!
//! The menu is driven once per control cycle with the button event, the
//! measurement vector and the calibration in progress. Short clicks move
//! the selection, long clicks act on it. Transitions are looked up in a
//! constant table.

use crate::config::calibration::CalibrationContext;
use crate::measurement::{Channel, Measurements};

use super::calibration_view::CalibrationViewBuilder;
use super::events::{ButtonEvent, TaskCode};
use super::slots::{self, format_measurement, LiveSlots, CLOSING_MARKER, MARKER};
use super::view::{calibration_slot, FieldContent, ViewId};

/// Selection condition of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    Any,
    FirstSelected,
    OtherSelected,
}

impl Guard {
    fn matches(self, selection: u8) -> bool {
        match self {
            Guard::Any => true,
            Guard::FirstSelected => selection == 0,
            Guard::OtherSelected => selection != 0,
        }
    }
}

/// What a matching transition does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Switch view and reset the selection
    Goto(ViewId),
    /// Switch view, keeping the selection
    Enter(ViewId),
    /// Step the selection; past the last entry move on to the next page
    Advance(ViewId),
    /// Step the selection, wrapping within the view
    Cycle,
    /// Act on the selected calibration menu entry
    Confirm,
}

struct Transition {
    from: ViewId,
    event: ButtonEvent,
    guard: Guard,
    action: Action,
    task: TaskCode,
}

const fn on(
    from: ViewId,
    event: ButtonEvent,
    guard: Guard,
    action: Action,
    task: TaskCode,
) -> Transition {
    Transition {
        from,
        event,
        guard,
        action,
        task,
    }
}

use ButtonEvent::{LongClick, ShortClick};
use Guard::{Any, FirstSelected, OtherSelected};
use ViewId::*;

/// Transition table; events with no matching row are ignored
const TRANSITIONS: [Transition; 16] = [
    on(PanelView, ShortClick, Any, Action::Goto(BatteryView), TaskCode::NoAction),
    on(BatteryView, ShortClick, Any, Action::Goto(PanelView), TaskCode::NoAction),
    on(CalibMenu1, ShortClick, Any, Action::Advance(CalibMenu2), TaskCode::NoAction),
    on(CalibMenu2, ShortClick, Any, Action::Advance(CalibMenu3), TaskCode::NoAction),
    on(CalibMenu3, ShortClick, Any, Action::Advance(CalibMenu1), TaskCode::NoAction),
    on(CalibChannel1, ShortClick, Any, Action::Cycle, TaskCode::NoAction),
    on(CalibChannel2, ShortClick, Any, Action::Cycle, TaskCode::NoAction),
    on(PanelView, LongClick, Any, Action::Goto(CalibMenu1), TaskCode::NoAction),
    on(BatteryView, LongClick, Any, Action::Goto(CalibMenu1), TaskCode::NoAction),
    on(CalibMenu1, LongClick, Any, Action::Confirm, TaskCode::NoAction),
    on(CalibMenu2, LongClick, Any, Action::Confirm, TaskCode::NoAction),
    on(CalibMenu3, LongClick, Any, Action::Confirm, TaskCode::NoAction),
    on(CalibChannel1, LongClick, FirstSelected, Action::Goto(CalibMenu1), TaskCode::NoAction),
    on(
        CalibChannel1,
        LongClick,
        OtherSelected,
        Action::Enter(CalibChannel2),
        TaskCode::MeasureFirstPoint,
    ),
    on(CalibChannel2, LongClick, FirstSelected, Action::Goto(CalibChannel1), TaskCode::NoAction),
    on(
        CalibChannel2,
        LongClick,
        OtherSelected,
        Action::Goto(PanelView),
        TaskCode::MeasureSecondPoint,
    ),
];

/// A view field with its text resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedField<'a> {
    /// Text to draw
    pub text: &'a str,
    /// Left column
    pub x: u8,
    /// Top pixel row
    pub y: u8,
}

/// Menu state
#[derive(Debug, Clone)]
pub struct MenuState {
    current: ViewId,
    previous: ViewId,
    selection: u8,
    live: LiveSlots,
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuState {
    /// Create the menu before anything is shown
    pub fn new() -> Self {
        Self {
            current: ViewId::NoView,
            previous: ViewId::NoView,
            selection: 0,
            live: LiveSlots::new(),
        }
    }

    /// Current view
    pub fn view(&self) -> ViewId {
        self.current
    }

    /// View before the last long click
    pub fn previous_view(&self) -> ViewId {
        self.previous
    }

    /// Selected entry of the current view
    pub fn selection(&self) -> u8 {
        self.selection
    }

    /// Live slot contents
    pub fn live_slots(&self) -> &LiveSlots {
        &self.live
    }

    /// Run one menu cycle: handle the event, then refresh the live slots
    pub fn update(
        &mut self,
        event: ButtonEvent,
        measurements: &Measurements,
        calibration: &CalibrationContext,
    ) -> TaskCode {
        let task = self.handle_event(event);
        self.refresh(measurements, calibration);
        task
    }

    /// Apply a button event to the view and selection
    pub fn handle_event(&mut self, event: ButtonEvent) -> TaskCode {
        if event == ButtonEvent::NoClick {
            return TaskCode::NoAction;
        }

        let Some(transition) = TRANSITIONS.iter().find(|t| {
            t.from == self.current && t.event == event && t.guard.matches(self.selection)
        }) else {
            return TaskCode::NoAction;
        };

        if event == ButtonEvent::LongClick {
            self.previous = self.current;
        }

        match transition.action {
            Action::Goto(view) => {
                self.current = view;
                self.selection = 0;
                transition.task
            }
            Action::Enter(view) => {
                self.current = view;
                transition.task
            }
            Action::Advance(next_page) => {
                self.selection += 1;
                if self.selection >= self.current.selectable() {
                    self.current = next_page;
                    self.selection = 0;
                }
                transition.task
            }
            Action::Cycle => {
                self.selection = (self.selection + 1) % self.current.selectable();
                transition.task
            }
            Action::Confirm => self.confirm(),
        }
    }

    fn confirm(&mut self) -> TaskCode {
        let page = self.current.menu_page().unwrap_or(0);
        let entry = page * self.current.selectable() + self.selection;
        self.selection = 0;

        match TaskCode::from_code(entry) {
            Some(task @ TaskCode::Calibrate(_)) => {
                self.current = ViewId::CalibChannel1;
                task
            }
            Some(task @ (TaskCode::Save | TaskCode::Cancel)) => {
                self.current = ViewId::PanelView;
                task
            }
            _ => TaskCode::NoAction,
        }
    }

    /// Rewrite the live slots of the current view
    ///
    /// Before the first refresh nothing is shown; the first refresh always
    /// lands on the panel view.
    pub fn refresh(&mut self, measurements: &Measurements, calibration: &CalibrationContext) {
        if self.current == ViewId::NoView {
            self.current = ViewId::PanelView;
            self.selection = 0;
        }

        match self.current {
            ViewId::PanelView => {
                for channel in &Channel::ALL[..Channel::BatteryVoltage.index()] {
                    self.live.set(channel.index(), measured(measurements, *channel));
                }
            }
            ViewId::BatteryView => {
                self.live.set(0, measured(measurements, Channel::BatteryVoltage));
                self.live.set(1, measured(measurements, Channel::BatteryCurrent));
            }
            ViewId::CalibMenu1 | ViewId::CalibMenu2 | ViewId::CalibMenu3 => {
                for entry in 0..self.current.selectable() {
                    let marker = if entry == self.selection {
                        slots::marker_at(0, MARKER)
                    } else {
                        slots::blank()
                    };
                    self.live.set(entry as usize, marker);
                }
            }
            ViewId::CalibChannel1 | ViewId::CalibChannel2 => {
                if self.current != self.previous {
                    CalibrationViewBuilder::build(self.current, calibration.channel, &mut self.live);
                }
                let (back, choice) = if self.selection == 0 {
                    (slots::marker_at(0, MARKER), slots::marker_at(0, CLOSING_MARKER))
                } else {
                    (slots::blank(), slots::text("   >  <"))
                };
                self.live.set(calibration_slot::BACK_MARKER, back);
                self.live.set(calibration_slot::CHOICE, choice);
                self.live.set(
                    calibration_slot::MEASURED,
                    measured(measurements, calibration.channel),
                );
            }
            ViewId::NoView => {}
        }
    }

    /// Fields of the current view with live fields bound to their slots
    pub fn fields(&self) -> impl Iterator<Item = ResolvedField<'_>> + '_ {
        let mut next_slot = 0;
        self.current.fields().iter().map(move |field| {
            let text = match field.content {
                FieldContent::Fixed(text) => text,
                FieldContent::Live => {
                    let text = self.live.get(next_slot);
                    next_slot += 1;
                    text
                }
            };
            ResolvedField {
                text,
                x: field.x,
                y: field.y,
            }
        })
    }
}

fn measured(measurements: &Measurements, channel: Channel) -> slots::LiveText {
    format_measurement(measurements[channel.index()], channel.quantity().unit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO: Measurements = [0.0; 10];

    fn context() -> CalibrationContext {
        CalibrationContext::default()
    }

    fn started() -> MenuState {
        let mut menu = MenuState::new();
        menu.update(ButtonEvent::NoClick, &ZERO, &context());
        menu
    }

    fn click(menu: &mut MenuState, event: ButtonEvent) -> TaskCode {
        menu.update(event, &ZERO, &context())
    }

    #[test]
    fn test_first_update_shows_panel_view() {
        let mut menu = MenuState::new();
        assert_eq!(menu.view(), ViewId::NoView);
        assert_eq!(
            menu.update(ButtonEvent::LongClick, &ZERO, &context()),
            TaskCode::NoAction
        );
        assert_eq!(menu.view(), ViewId::PanelView);
        assert_eq!(menu.selection(), 0);
    }

    #[test]
    fn test_short_click_toggles_measurement_views() {
        let mut menu = started();
        click(&mut menu, ButtonEvent::ShortClick);
        assert_eq!(menu.view(), ViewId::BatteryView);
        click(&mut menu, ButtonEvent::ShortClick);
        assert_eq!(menu.view(), ViewId::PanelView);
    }

    #[test]
    fn test_no_click_keeps_state() {
        let mut menu = started();
        for _ in 0..10 {
            assert_eq!(click(&mut menu, ButtonEvent::NoClick), TaskCode::NoAction);
        }
        assert_eq!(menu.view(), ViewId::PanelView);
    }

    #[test]
    fn test_menu_pages_wrap() {
        let mut menu = started();
        click(&mut menu, ButtonEvent::LongClick);
        assert_eq!(menu.view(), ViewId::CalibMenu1);
        assert_eq!(menu.previous_view(), ViewId::PanelView);

        for expected in [ViewId::CalibMenu2, ViewId::CalibMenu3, ViewId::CalibMenu1] {
            for selection in 1..4 {
                click(&mut menu, ButtonEvent::ShortClick);
                assert_eq!(menu.selection(), selection);
            }
            click(&mut menu, ButtonEvent::ShortClick);
            assert_eq!(menu.view(), expected);
            assert_eq!(menu.selection(), 0);
        }
    }

    #[test]
    fn test_menu_markers_follow_selection() {
        let mut menu = started();
        click(&mut menu, ButtonEvent::LongClick);
        click(&mut menu, ButtonEvent::ShortClick);
        let slots = menu.live_slots();
        assert_eq!(slots.get(0), "       ");
        assert_eq!(slots.get(1), ">      ");
        assert_eq!(slots.get(2), "       ");
        assert_eq!(slots.get(3), "       ");
    }

    #[test]
    fn test_confirm_calibrate_each_channel() {
        for code in 0u8..10 {
            let mut menu = started();
            click(&mut menu, ButtonEvent::LongClick);
            for _ in 0..code {
                click(&mut menu, ButtonEvent::ShortClick);
            }
            let task = click(&mut menu, ButtonEvent::LongClick);
            assert_eq!(task.code(), code);
            assert_eq!(menu.view(), ViewId::CalibChannel1);
            assert_eq!(menu.selection(), 0);
        }
    }

    #[test]
    fn test_confirm_save_and_cancel() {
        for (steps, expected) in [(10, TaskCode::Save), (11, TaskCode::Cancel)] {
            let mut menu = started();
            click(&mut menu, ButtonEvent::LongClick);
            for _ in 0..steps {
                click(&mut menu, ButtonEvent::ShortClick);
            }
            assert_eq!(menu.view(), ViewId::CalibMenu3);
            assert_eq!(click(&mut menu, ButtonEvent::LongClick), expected);
            assert_eq!(menu.view(), ViewId::PanelView);
            assert_eq!(menu.selection(), 0);
        }
    }

    #[test]
    fn test_calibration_back_returns_to_menu() {
        let mut menu = started();
        click(&mut menu, ButtonEvent::LongClick);
        click(&mut menu, ButtonEvent::LongClick);
        assert_eq!(menu.view(), ViewId::CalibChannel1);
        assert_eq!(click(&mut menu, ButtonEvent::LongClick), TaskCode::NoAction);
        assert_eq!(menu.view(), ViewId::CalibMenu1);
    }

    #[test]
    fn test_second_point_back_returns_to_first() {
        let mut menu = started();
        click(&mut menu, ButtonEvent::LongClick);
        click(&mut menu, ButtonEvent::LongClick);
        click(&mut menu, ButtonEvent::ShortClick);
        assert_eq!(click(&mut menu, ButtonEvent::LongClick), TaskCode::MeasureFirstPoint);
        assert_eq!(menu.view(), ViewId::CalibChannel2);

        click(&mut menu, ButtonEvent::ShortClick);
        assert_eq!(menu.selection(), 0);
        assert_eq!(click(&mut menu, ButtonEvent::LongClick), TaskCode::NoAction);
        assert_eq!(menu.view(), ViewId::CalibChannel1);
        assert_eq!(menu.selection(), 0);
        assert_eq!(menu.live_slots().get(3), "1/2");
    }

    #[test]
    fn test_calibration_slots() {
        let mut menu = started();
        let mut measurements = ZERO;
        measurements[Channel::Panel1Current.index()] = 3.25;
        let calibration = CalibrationContext {
            channel: Channel::Panel1Current,
            samples: [0, 0],
        };

        menu.update(ButtonEvent::LongClick, &measurements, &calibration);
        menu.update(ButtonEvent::ShortClick, &measurements, &calibration);
        menu.update(ButtonEvent::LongClick, &measurements, &calibration);
        assert_eq!(menu.view(), ViewId::CalibChannel1);

        let slots = menu.live_slots();
        assert_eq!(slots.get(0), "PANEELI");
        assert_eq!(slots.get(1), "1");
        assert_eq!(slots.get(2), "VIRTA");
        assert_eq!(slots.get(3), "1/2");
        assert_eq!(slots.get(4), "  1,00A");
        assert_eq!(slots.get(5), ">      ");
        assert_eq!(slots.get(6), "<      ");
        assert_eq!(slots.get(7), "  3,25A");

        menu.update(ButtonEvent::ShortClick, &measurements, &calibration);
        let slots = menu.live_slots();
        assert_eq!(slots.get(5), "       ");
        assert_eq!(slots.get(6), "   >  <");
    }

    #[test]
    fn test_fields_bind_live_slots_in_order() {
        let mut menu = MenuState::new();
        let mut measurements = ZERO;
        measurements[Channel::BatteryVoltage.index()] = 12.5;
        measurements[Channel::BatteryCurrent.index()] = 0.5;
        menu.update(ButtonEvent::NoClick, &measurements, &context());
        menu.update(ButtonEvent::ShortClick, &measurements, &context());

        let mut fields = menu.fields();
        assert_eq!(
            fields.nth(3),
            Some(ResolvedField {
                text: " 12,50V",
                x: 5,
                y: 38
            })
        );
        assert_eq!(
            fields.next(),
            Some(ResolvedField {
                text: "  0,50A",
                x: 70,
                y: 38
            })
        );
        assert_eq!(fields.next(), None);
    }

    #[test]
    fn test_refresh_is_stable() {
        let mut menu = started();
        let mut measurements = ZERO;
        measurements[0] = 17.25;
        menu.refresh(&measurements, &context());
        let first = menu.live_slots().clone();
        menu.refresh(&measurements, &context());
        assert_eq!(menu.live_slots(), &first);
        assert_eq!(first.get(0), " 17,25V");
    }
}
