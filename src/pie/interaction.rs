use super::geometry::Point;
use super::hit::{HitTester, is_valid_index};
use super::scene::{ActorId, SceneGraph};
use crate::events::{InputDevice, Listeners, PointerButton, Verdict};

/// Indices the widget currently shows as selected, highlighted and hovered.
/// `None` is "no selection".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub selected: Option<usize>,
    pub highlighted: Option<usize>,
    pub hovered: Option<usize>,
    pub default_index: Option<usize>,
}

impl SelectionState {
    pub fn with_default(default_index: Option<usize>) -> Self {
        Self {
            selected: default_index,
            highlighted: default_index,
            hovered: None,
            default_index,
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted == Some(index)
    }

    pub fn is_hovered(&self, index: usize) -> bool {
        self.hovered == Some(index)
    }
}

/// Pointer-driven selection state machine.
///
/// Two independent tracks: highlight then select while the selection button
/// is held, and hover while no button is held (desktop devices only).
#[derive(Debug, Default)]
pub struct InteractionController {
    state: SelectionState,
    selection_button: PointerButton,
    device: InputDevice,
    infinite_range: bool,
    middle_cancel: bool,
    listeners: Listeners,
}

impl InteractionController {
    pub fn new(default_index: Option<usize>) -> Self {
        Self {
            state: SelectionState::with_default(default_index),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.state.highlighted
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.state.hovered
    }

    pub fn default_index(&self) -> Option<usize> {
        self.state.default_index
    }

    pub fn selection_button(&self) -> PointerButton {
        self.selection_button
    }

    pub fn set_selection_button(&mut self, button: PointerButton) {
        self.selection_button = button;
    }

    pub fn device(&self) -> InputDevice {
        self.device
    }

    pub fn set_device(&mut self, device: InputDevice) {
        self.device = device;
        if !device.tracks_hover() {
            self.state.hovered = None;
        }
    }

    pub fn infinite_range(&self) -> bool {
        self.infinite_range
    }

    pub fn set_infinite_range(&mut self, infinite_range: bool) {
        self.infinite_range = infinite_range;
    }

    pub fn middle_cancel(&self) -> bool {
        self.middle_cancel
    }

    /// Releasing inside the inner radius resolves to "no selection".
    pub fn set_middle_cancel(&mut self, middle_cancel: bool) {
        self.middle_cancel = middle_cancel;
    }

    pub fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    /// Valid indices pass through, anything else becomes the default index.
    /// A default outside `[0, count)` maps to no selection.
    pub fn map_index(&self, index: usize, count: usize) -> Option<usize> {
        if is_valid_index(index, count) {
            Some(index)
        } else {
            self.fallback(count)
        }
    }

    fn fallback(&self, count: usize) -> Option<usize> {
        self.state
            .default_index
            .filter(|&index| is_valid_index(index, count))
    }

    fn index_under(&self, tester: &HitTester<'_>, point: Point) -> Option<usize> {
        self.map_index(
            tester.index_at_point(point, self.infinite_range),
            tester.count(),
        )
    }

    pub fn on_pointer_down(
        &mut self,
        tester: &HitTester<'_>,
        point: Point,
        button: PointerButton,
    ) -> bool {
        if button != self.selection_button {
            return false;
        }
        let index = self.index_under(tester, point);
        self.update_highlight(index);
        true
    }

    pub fn on_pointer_dragged(&mut self, tester: &HitTester<'_>, point: Point) {
        self.state.hovered = None;
        let index = self.index_under(tester, point);
        self.update_highlight(index);
    }

    /// Commits the selection. Listeners may veto, in which case the selected
    /// and highlighted indices return to their values before the release.
    pub fn on_pointer_up(
        &mut self,
        tester: &HitTester<'_>,
        point: Point,
        button: PointerButton,
    ) -> bool {
        if button != self.selection_button {
            return false;
        }
        let index = if self.middle_cancel && tester.is_within_inner_radius(point) {
            log::debug!("Selection released inside the inner radius, cancelling");
            self.map_index(tester.count(), tester.count())
        } else {
            self.index_under(tester, point)
        };

        let previous = (self.state.selected, self.state.highlighted);
        self.state.selected = index;
        self.state.highlighted = index;

        if self.listeners.notify_selection(index) == Verdict::Veto {
            log::debug!("Selection of {:?} vetoed, restoring {:?}", index, previous.0);
            (self.state.selected, self.state.highlighted) = previous;
        }
        true
    }

    /// Hover tracking. Returns false when the device has no hover.
    pub fn on_pointer_moved(&mut self, tester: &HitTester<'_>, point: Point) -> bool {
        if !self.device.tracks_hover() {
            return false;
        }
        let index = self.index_under(tester, point);
        self.update_hover(index);
        true
    }

    /// Clears hover unless the pointer moved onto this widget or one of its
    /// children.
    pub fn on_pointer_exit(
        &mut self,
        scene: &impl SceneGraph,
        this: ActorId,
        from: Option<ActorId>,
        to: Option<ActorId>,
    ) {
        if to.is_some_and(|actor| scene.is_within(actor, this)) {
            log::trace!("Pointer moved from {:?} to {:?} inside {}", from, to, this);
            return;
        }
        self.reset_hover();
    }

    pub fn reset_selection(&mut self, count: usize) {
        let fallback = self.fallback(count);
        self.state.selected = fallback;
        self.state.highlighted = fallback;
    }

    pub fn reset_hover(&mut self) {
        self.state.hovered = None;
    }

    pub fn set_default_index(&mut self, default_index: Option<usize>, count: usize) {
        let selection_valid = self
            .state
            .selected
            .is_some_and(|i| is_valid_index(i, count));
        self.state.default_index = default_index;
        if selection_valid {
            return;
        }

        let fallback = self.fallback(count);
        let changed = self.state.selected != fallback;
        self.state.selected = fallback;
        self.state.highlighted = fallback;
        if changed {
            self.listeners.notify_selection(fallback);
        }
    }

    /// Brings the state in line with a new child count. Selected and
    /// highlighted indices that are unset or outside `[0, count)` take the
    /// default, an out-of-range hover is dropped. Only a changed selection is
    /// announced.
    pub fn fit_to_count(&mut self, count: usize) {
        let fits = |index: Option<usize>| index.is_some_and(|i| is_valid_index(i, count));
        let fallback = self.fallback(count);

        if !fits(self.state.highlighted) {
            self.state.highlighted = fallback;
        }
        if !fits(self.state.hovered) {
            self.state.hovered = None;
        }
        if !fits(self.state.selected) && self.state.selected != fallback {
            log::debug!(
                "Selection {:?} does not fit {} children, falling back to {:?}",
                self.state.selected,
                count,
                fallback
            );
            self.state.selected = fallback;
            self.listeners.notify_selection(fallback);
        }
    }

    /// Programmatic selection. Listeners are told, but cannot veto.
    pub fn select_index(&mut self, index: usize, count: usize) {
        let index = self.map_index(index, count);
        let changed = self.state.selected != index;
        self.state.selected = index;
        self.state.highlighted = index;
        if changed {
            self.listeners.notify_selection(index);
        }
    }

    pub fn highlight_index(&mut self, index: usize, count: usize) {
        let index = self.map_index(index, count);
        self.update_highlight(index);
    }

    pub fn hover_index(&mut self, index: usize, count: usize) {
        let index = self.map_index(index, count);
        self.update_hover(index);
    }

    fn update_highlight(&mut self, index: Option<usize>) {
        if self.state.highlighted != index {
            self.state.highlighted = index;
            self.listeners.notify_highlight(index);
        }
    }

    fn update_hover(&mut self, index: Option<usize>) {
        if self.state.hovered != index {
            self.state.hovered = index;
            self.listeners.notify_hover(index);
        }
    }
}
