use super::interaction::SelectionState;
use palette::Srgba;

pub type Color = Srgba<f64>;

pub const TRANSPARENT: Color = Srgba::new(0.0, 0.0, 0.0, 0.0);

/// Colors and stroke widths of the ring. Unset slice colors are skipped during
/// resolution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieStyle {
    pub background: Option<Color>,
    pub slice: Option<Color>,
    pub alternate_slice: Option<Color>,
    pub hovered: Option<Color>,
    pub highlighted: Option<Color>,
    pub selected: Option<Color>,
    pub hovered_and_selected: Option<Color>,
    pub separator: Option<Color>,
    pub separator_width: f64,
    pub circumference: Option<Color>,
    pub circumference_width: f64,
}

/// Replaces the style-driven slice color lookup for one widget.
pub type ColorFn = dyn Fn(usize, &SelectionState, &PieStyle) -> Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SliceState {
    HoveredAndSelected,
    Selected,
    Highlighted,
    Hovered,
    Alternate,
    Base,
}

impl SliceState {
    /// Every state a slice is in, strongest first.
    fn resolve(index: usize, state: &SelectionState) -> impl Iterator<Item = Self> {
        let selected = state.is_selected(index);
        let hovered = state.is_hovered(index);
        [
            (selected && hovered, Self::HoveredAndSelected),
            (selected, Self::Selected),
            (state.is_highlighted(index), Self::Highlighted),
            (hovered, Self::Hovered),
            (index % 2 == 1, Self::Alternate),
            (true, Self::Base),
        ]
        .into_iter()
        .filter_map(|(applies, slice)| applies.then_some(slice))
    }

    fn color(&self, style: &PieStyle) -> Option<Color> {
        match self {
            Self::HoveredAndSelected => style.hovered_and_selected,
            Self::Selected => style.selected,
            Self::Highlighted => style.highlighted,
            Self::Hovered => style.hovered,
            Self::Alternate => style.alternate_slice,
            Self::Base => style.slice,
        }
    }
}

impl PieStyle {
    /// Color of slice `index` for the given selection state, falling through
    /// unset tiers down to fully transparent.
    pub fn slice_color(&self, index: usize, state: &SelectionState) -> Color {
        SliceState::resolve(index, state)
            .find_map(|slice| slice.color(self))
            .unwrap_or(TRANSPARENT)
    }
}

/// Same color with its alpha multiplied by `scale`.
pub fn scale_alpha(color: Color, scale: f64) -> Color {
    Srgba::new(color.red, color.green, color.blue, color.alpha * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Srgba::new(1.0, 0.0, 0.0, 1.0);
    const GREEN: Color = Srgba::new(0.0, 1.0, 0.0, 1.0);
    const BLUE: Color = Srgba::new(0.0, 0.0, 1.0, 1.0);
    const GREY: Color = Srgba::new(0.5, 0.5, 0.5, 1.0);
    const WHITE: Color = Srgba::new(1.0, 1.0, 1.0, 1.0);

    fn state(
        selected: Option<usize>,
        highlighted: Option<usize>,
        hovered: Option<usize>,
    ) -> SelectionState {
        SelectionState {
            selected,
            highlighted,
            hovered,
            default_index: None,
        }
    }

    #[test]
    fn test_hovered_and_selected_wins() {
        let style = PieStyle {
            selected: Some(RED),
            hovered_and_selected: Some(GREEN),
            ..PieStyle::default()
        };
        let both = state(Some(1), None, Some(1));
        assert_eq!(style.slice_color(1, &both), GREEN);

        let style = PieStyle {
            selected: Some(RED),
            ..PieStyle::default()
        };
        assert_eq!(style.slice_color(1, &both), RED);
    }

    #[test]
    fn test_precedence_chain() {
        let style = PieStyle {
            selected: Some(RED),
            highlighted: Some(GREEN),
            hovered: Some(BLUE),
            alternate_slice: Some(GREY),
            slice: Some(WHITE),
            ..PieStyle::default()
        };
        let s = state(Some(0), Some(1), Some(2));
        assert_eq!(style.slice_color(0, &s), RED);
        assert_eq!(style.slice_color(1, &s), GREEN);
        assert_eq!(style.slice_color(2, &s), BLUE);
        assert_eq!(style.slice_color(3, &s), GREY);
        assert_eq!(style.slice_color(4, &s), WHITE);
    }

    #[test]
    fn test_unset_tiers_fall_through() {
        let style = PieStyle {
            slice: Some(WHITE),
            ..PieStyle::default()
        };
        let s = state(Some(1), Some(1), Some(1));
        assert_eq!(style.slice_color(1, &s), WHITE);
        assert_eq!(PieStyle::default().slice_color(1, &s), TRANSPARENT);
    }

    #[test]
    fn test_scale_alpha() {
        let faded = scale_alpha(Srgba::new(0.2, 0.4, 0.6, 0.5), 0.5);
        assert_eq!(faded, Srgba::new(0.2, 0.4, 0.6, 0.25));
    }
}
