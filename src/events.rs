use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    #[strum(to_string = "Left", serialize = "primary", serialize = "0")]
    Left,
    #[strum(to_string = "Right", serialize = "secondary", serialize = "1")]
    Right,
    #[strum(to_string = "Middle", serialize = "2")]
    Middle,
    #[strum(to_string = "Back", serialize = "3")]
    Back,
    #[strum(to_string = "Forward", serialize = "4")]
    Forward,
}

impl PointerButton {
    pub fn as_code(&self) -> u32 {
        *self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::iter().nth(code as usize)
    }
}

/// Kind of pointing device driving the widget. Hover only exists where the
/// device reports a position without a button held.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum InputDevice {
    #[default]
    #[strum(to_string = "Desktop", serialize = "mouse")]
    Desktop,
    #[strum(to_string = "Touch", serialize = "mobile")]
    Touch,
}

impl InputDevice {
    pub fn tracks_hover(&self) -> bool {
        matches!(self, Self::Desktop)
    }
}

/// Answer of a selection listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    #[default]
    Accept,
    Veto,
}

type SelectionListener = Box<dyn FnMut(Option<usize>) -> Verdict>;
type IndexListener = Box<dyn FnMut(Option<usize>)>;

/// Typed listener registrations, one list per notification kind. Each
/// listener receives only the new index.
#[derive(Default)]
pub struct Listeners {
    selection: Vec<SelectionListener>,
    highlight: Vec<IndexListener>,
    hover: Vec<IndexListener>,
}

impl Listeners {
    pub fn on_selection_change(&mut self, f: impl FnMut(Option<usize>) -> Verdict + 'static) {
        self.selection.push(Box::new(f));
    }

    pub fn on_highlight_change(&mut self, f: impl FnMut(Option<usize>) + 'static) {
        self.highlight.push(Box::new(f));
    }

    pub fn on_hover_change(&mut self, f: impl FnMut(Option<usize>) + 'static) {
        self.hover.push(Box::new(f));
    }

    /// Every listener sees the change; a single veto cancels it.
    pub fn notify_selection(&mut self, index: Option<usize>) -> Verdict {
        self.selection
            .iter_mut()
            .fold(Verdict::Accept, |verdict, listener| match listener(index) {
                Verdict::Veto => Verdict::Veto,
                Verdict::Accept => verdict,
            })
    }

    pub fn notify_highlight(&mut self, index: Option<usize>) {
        self.highlight.iter_mut().for_each(|listener| listener(index));
    }

    pub fn notify_hover(&mut self, index: Option<usize>) {
        self.hover.iter_mut().for_each(|listener| listener(index));
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("selection", &self.selection.len())
            .field("highlight", &self.highlight.len())
            .field("hover", &self.hover.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_pointer_button_deserialization() {
        let cases = vec![
            ("\"left\"", PointerButton::Left),
            ("\"LEFT\"", PointerButton::Left),
            ("\"primary\"", PointerButton::Left),
            ("\"0\"", PointerButton::Left),
            ("\"Right\"", PointerButton::Right),
            ("\"2\"", PointerButton::Middle),
            ("\"forward\"", PointerButton::Forward),
        ];

        for (json, expected) in cases {
            let deserialized: PointerButton = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<PointerButton>("\"thumb\"").is_err());
    }

    #[test]
    fn test_pointer_button_codes() {
        for button in PointerButton::iter() {
            assert_eq!(PointerButton::from_code(button.as_code()), Some(button));
        }
        assert_eq!(PointerButton::from_code(5), None);
    }

    #[test]
    fn test_display_uses_canonical_names() {
        assert_eq!(PointerButton::Left.to_string(), "Left");
        assert_eq!(PointerButton::Right.to_string(), "Right");
        assert_eq!(PointerButton::Forward.to_string(), "Forward");
        assert_eq!(InputDevice::Touch.to_string(), "Touch");
        assert_eq!(InputDevice::Desktop.to_string(), "Desktop");
    }

    #[test]
    fn test_input_device_hover() {
        let device: InputDevice = serde_json::from_str("\"mobile\"").unwrap();
        assert_eq!(device, InputDevice::Touch);
        assert!(!device.tracks_hover());
        assert!(InputDevice::Desktop.tracks_hover());
    }

    #[test]
    fn test_single_veto_cancels_but_all_listeners_run() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();

        let log = seen.clone();
        listeners.on_selection_change(move |i| {
            log.borrow_mut().push(("first", i));
            Verdict::Veto
        });
        let log = seen.clone();
        listeners.on_selection_change(move |i| {
            log.borrow_mut().push(("second", i));
            Verdict::Accept
        });

        assert_eq!(listeners.notify_selection(Some(2)), Verdict::Veto);
        assert_eq!(
            *seen.borrow(),
            vec![("first", Some(2)), ("second", Some(2))]
        );
        assert_eq!(Listeners::default().notify_selection(None), Verdict::Accept);
    }
}
