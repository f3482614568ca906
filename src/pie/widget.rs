use super::animation::{AnimationController, Direction, Frame};
use super::geometry::{
    DistanceFn, LayoutPositions, Point, SectorPosition, estimated_child_radius, point_at_angle,
};
use super::hit::{self, Hit, HitTester};
use super::interaction::{InteractionController, SelectionState};
use super::radial::{RadialConfig, RadialError};
use super::scene::{ActorId, SceneGraph};
use super::style::{Color, ColorFn, PieStyle, scale_alpha};
use crate::config::{ConfigError, Settings};
use crate::events::{InputDevice, Listeners, PointerButton};

/// Where one child goes this frame, in the widget's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildPlacement {
    pub index: usize,
    pub center: Point,
    /// Center angle of the child's sector, in degrees.
    pub angle: f64,
    pub distance: f64,
    /// Largest radius the child can take without leaving its sector.
    pub max_radius: f64,
}

/// A pie menu: one ring of `child_count` sectors.
///
/// Interaction and animation are optional parts chosen at construction. A
/// menu without an interaction controller never selects anything; one without
/// an animation controller shows and hides instantly.
pub struct PieMenu {
    id: ActorId,
    config: RadialConfig,
    child_count: usize,
    rotation: f64,
    visible: bool,
    style: PieStyle,
    interaction: Option<InteractionController>,
    animation: Option<AnimationController>,
    animation_duration: f64,
    distance_fn: Option<Box<DistanceFn>>,
    color_fn: Option<Box<ColorFn>>,
}

impl std::fmt::Debug for PieMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PieMenu")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("child_count", &self.child_count)
            .field("rotation", &self.rotation)
            .field("visible", &self.is_visible())
            .field("interaction", &self.interaction)
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}

fn ring_tester<'a>(
    config: &'a RadialConfig,
    count: usize,
    rotation: f64,
    animation: Option<&AnimationController>,
) -> HitTester<'a> {
    let sweep = animation.map_or(config.total_degrees_drawn(), |a| a.visual_sweep(config));
    HitTester::new(config, count)
        .with_rotation(rotation)
        .with_sweep(sweep)
}

impl PieMenu {
    pub fn new(id: ActorId, config: RadialConfig) -> Self {
        Self {
            id,
            config,
            child_count: 0,
            rotation: 0.0,
            visible: true,
            style: PieStyle::default(),
            interaction: None,
            animation: None,
            animation_duration: super::DEFAULT_ANIMATION_SECONDS,
            distance_fn: None,
            color_fn: None,
        }
    }

    /// Builds a fully assembled menu from loaded settings.
    pub fn from_settings(id: ActorId, settings: &Settings) -> Result<Self, ConfigError> {
        let mut interaction = InteractionController::new(settings.selection.default_index);
        interaction.set_selection_button(settings.selection.selection_button);
        interaction.set_device(settings.selection.device);
        interaction.set_infinite_range(settings.selection.infinite_range);
        interaction.set_middle_cancel(settings.selection.middle_cancel);

        let mut menu = Self::new(id, settings.ring.to_radial()?)
            .with_style(settings.style.to_style())
            .with_interaction(interaction);
        if settings.animation.enabled {
            menu = menu.with_animation(
                AnimationController::new(settings.animation.easing),
                settings.animation.duration_seconds,
            );
        }
        Ok(menu)
    }

    pub fn with_children(mut self, count: usize) -> Self {
        self.set_child_count(count);
        self
    }

    pub fn with_style(mut self, style: PieStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_interaction(mut self, mut interaction: InteractionController) -> Self {
        interaction.fit_to_count(self.child_count);
        self.interaction = Some(interaction);
        self
    }

    /// Animated menus start closed.
    pub fn with_animation(mut self, animation: AnimationController, duration_seconds: f64) -> Self {
        self.animation = Some(animation);
        self.animation_duration = duration_seconds;
        self
    }

    pub fn with_distance(mut self, distance: impl Fn(usize, f64) -> f64 + 'static) -> Self {
        self.distance_fn = Some(Box::new(distance));
        self
    }

    pub fn with_colors(
        mut self,
        colors: impl Fn(usize, &SelectionState, &PieStyle) -> Color + 'static,
    ) -> Self {
        self.color_fn = Some(Box::new(colors));
        self
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn config(&self) -> &RadialConfig {
        &self.config
    }

    pub fn style(&self) -> &PieStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut PieStyle {
        &mut self.style
    }

    pub fn child_count(&self) -> usize {
        self.child_count
    }

    /// Indices that no longer name a child fall back to the default.
    pub fn set_child_count(&mut self, count: usize) {
        self.child_count = count;
        if let Some(interaction) = &mut self.interaction {
            interaction.fit_to_count(count);
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Accumulated rotation of the widget in the scene, in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), RadialError> {
        self.config
            .set_radius(radius)
            .inspect_err(|e| log::warn!("{}: {}", self.id, e))
    }

    pub fn set_inner_radius_percent(&mut self, percent: f64) -> Result<(), RadialError> {
        self.config
            .set_inner_radius_percent(percent)
            .inspect_err(|e| log::warn!("{}: {}", self.id, e))
    }

    pub fn set_start_offset_degrees(&mut self, degrees: f64) -> Result<(), RadialError> {
        self.config
            .set_start_offset_degrees(degrees)
            .inspect_err(|e| log::warn!("{}: {}", self.id, e))
    }

    pub fn set_total_degrees_drawn(&mut self, degrees: f64) -> Result<(), RadialError> {
        self.config
            .set_total_degrees_drawn(degrees)
            .inspect_err(|e| log::warn!("{}: {}", self.id, e))
    }

    pub fn preferred_size(&self) -> f64 {
        self.config.radius() * 2.0
    }

    pub fn hit_tester(&self) -> HitTester<'_> {
        ring_tester(
            &self.config,
            self.child_count,
            self.rotation,
            self.animation.as_ref(),
        )
    }

    fn infinite_range(&self) -> bool {
        self.interaction
            .as_ref()
            .is_some_and(InteractionController::infinite_range)
    }

    /// Composite hit test: children first, then sectors, then the ring itself
    /// when the selection range is infinite.
    pub fn hit(&self, scene: &impl SceneGraph, point: Point) -> Option<Hit> {
        if !self.is_visible() {
            return None;
        }
        let descendant = scene.hit_descendant(self.id, point);
        self.hit_tester()
            .resolve(point, self.infinite_range(), descendant)
    }

    pub fn is_valid_index(&self, index: usize) -> bool {
        hit::is_valid_index(index, self.child_count)
    }

    pub fn map_index(&self, index: usize) -> Option<usize> {
        match &self.interaction {
            Some(interaction) => interaction.map_index(index, self.child_count),
            None => self.is_valid_index(index).then_some(index),
        }
    }

    // Selection

    pub fn interaction(&self) -> Option<&InteractionController> {
        self.interaction.as_ref()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.interaction
            .as_ref()
            .map(|i| *i.state())
            .unwrap_or_default()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.interaction.as_ref().and_then(|i| i.selected_index())
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.interaction.as_ref().and_then(|i| i.highlighted_index())
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.interaction.as_ref().and_then(|i| i.hovered_index())
    }

    pub fn listeners_mut(&mut self) -> Option<&mut Listeners> {
        self.interaction.as_mut().map(|i| i.listeners_mut())
    }

    pub fn set_selection_button(&mut self, button: PointerButton) {
        if let Some(interaction) = &mut self.interaction {
            interaction.set_selection_button(button);
        }
    }

    pub fn set_infinite_range(&mut self, infinite_range: bool) {
        if let Some(interaction) = &mut self.interaction {
            interaction.set_infinite_range(infinite_range);
        }
    }

    pub fn set_middle_cancel(&mut self, middle_cancel: bool) {
        if let Some(interaction) = &mut self.interaction {
            interaction.set_middle_cancel(middle_cancel);
        }
    }

    pub fn set_device(&mut self, device: InputDevice) {
        if let Some(interaction) = &mut self.interaction {
            interaction.set_device(device);
        }
    }

    pub fn set_default_index(&mut self, default_index: Option<usize>) {
        let count = self.child_count;
        if let Some(interaction) = &mut self.interaction {
            interaction.set_default_index(default_index, count);
        }
    }

    pub fn select_index(&mut self, index: usize) {
        let count = self.child_count;
        if let Some(interaction) = &mut self.interaction {
            interaction.select_index(index, count);
        }
    }

    pub fn highlight_index(&mut self, index: usize) {
        let count = self.child_count;
        if let Some(interaction) = &mut self.interaction {
            interaction.highlight_index(index, count);
        }
    }

    pub fn hover_index(&mut self, index: usize) {
        let count = self.child_count;
        if let Some(interaction) = &mut self.interaction {
            interaction.hover_index(index, count);
        }
    }

    pub fn reset_selection(&mut self) {
        let count = self.child_count;
        if let Some(interaction) = &mut self.interaction {
            interaction.reset_selection(count);
        }
    }

    pub fn reset_hover(&mut self) {
        if let Some(interaction) = &mut self.interaction {
            interaction.reset_hover();
        }
    }

    // Pointer input. `point` is in the widget's local frame.

    pub fn on_pointer_down(&mut self, point: Point, button: PointerButton) -> bool {
        let tester = ring_tester(
            &self.config,
            self.child_count,
            self.rotation,
            self.animation.as_ref(),
        );
        self.interaction
            .as_mut()
            .is_some_and(|i| i.on_pointer_down(&tester, point, button))
    }

    pub fn on_pointer_dragged(&mut self, point: Point) {
        let tester = ring_tester(
            &self.config,
            self.child_count,
            self.rotation,
            self.animation.as_ref(),
        );
        if let Some(interaction) = &mut self.interaction {
            interaction.on_pointer_dragged(&tester, point);
        }
    }

    pub fn on_pointer_up(&mut self, point: Point, button: PointerButton) -> bool {
        let tester = ring_tester(
            &self.config,
            self.child_count,
            self.rotation,
            self.animation.as_ref(),
        );
        self.interaction
            .as_mut()
            .is_some_and(|i| i.on_pointer_up(&tester, point, button))
    }

    pub fn on_pointer_moved(&mut self, point: Point) -> bool {
        let tester = ring_tester(
            &self.config,
            self.child_count,
            self.rotation,
            self.animation.as_ref(),
        );
        self.interaction
            .as_mut()
            .is_some_and(|i| i.on_pointer_moved(&tester, point))
    }

    pub fn on_pointer_exit(
        &mut self,
        scene: &impl SceneGraph,
        from: Option<ActorId>,
        to: Option<ActorId>,
    ) {
        let id = self.id;
        if let Some(interaction) = &mut self.interaction {
            interaction.on_pointer_exit(scene, id, from, to);
        }
    }

    // Visibility and animation

    pub fn animation(&self) -> Option<&AnimationController> {
        self.animation.as_ref()
    }

    pub fn animation_duration(&self) -> f64 {
        self.animation_duration
    }

    pub fn is_visible(&self) -> bool {
        self.animation
            .as_ref()
            .map_or(self.visible, AnimationController::is_visible)
    }

    pub fn is_animating(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(AnimationController::is_animating)
    }

    /// Revealed sweep this frame.
    pub fn visual_sweep(&self) -> f64 {
        self.animation
            .as_ref()
            .map_or(self.config.total_degrees_drawn(), |a| {
                a.visual_sweep(&self.config)
            })
    }

    pub fn show(&mut self) {
        self.visible = true;
        if let Some(animation) = &mut self.animation {
            animation.show(&self.config);
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        if let Some(animation) = &mut self.animation {
            animation.hide();
        }
        self.reset_hover();
    }

    pub fn animate_opening(&mut self, duration_seconds: f64) {
        match &mut self.animation {
            Some(animation) => animation.animate_opening(&self.config, duration_seconds),
            None => self.show(),
        }
    }

    pub fn animate_closing(&mut self, duration_seconds: f64) {
        match &mut self.animation {
            Some(animation) => animation.animate_closing(&self.config, duration_seconds),
            None => self.hide(),
        }
    }

    pub fn transition_to_opening(&mut self, duration_seconds: f64) {
        match &mut self.animation {
            Some(animation) => animation.transition_to_opening(&self.config, duration_seconds),
            None => self.show(),
        }
    }

    pub fn transition_to_closing(&mut self, duration_seconds: f64) {
        match &mut self.animation {
            Some(animation) => animation.transition_to_closing(duration_seconds),
            None => self.hide(),
        }
    }

    pub fn toggle_visibility(&mut self, duration_seconds: f64) {
        match &mut self.animation {
            Some(animation) => animation.toggle_visibility(&self.config, duration_seconds),
            None if self.visible => self.hide(),
            None => self.show(),
        }
    }

    /// Per-frame step. Runs before [`layout`](Self::layout) and drawing.
    pub fn advance(&mut self, delta_seconds: f64) -> Frame {
        let Some(animation) = &mut self.animation else {
            return Frame {
                angle: self.config.total_degrees_drawn(),
                ..Frame::default()
            };
        };
        let frame = animation.advance(&self.config, delta_seconds);
        if frame.completed == Some(Direction::Closing) {
            self.reset_hover();
        }
        frame
    }

    /// Color a child should carry this frame; see
    /// [`AnimationController::fade_color`].
    pub fn fade_child_color(&mut self, child: ActorId, color: Color) -> Color {
        match &mut self.animation {
            Some(animation) => animation.fade_color(&self.config, child, color),
            None => color,
        }
    }

    /// Resolved (and faded) color of slice `index`.
    pub fn slice_color(&self, index: usize) -> Color {
        let state = self.selection_state();
        let color = match &self.color_fn {
            Some(colors) => colors(index, &state, &self.style),
            None => self.style.slice_color(index, &state),
        };
        scale_alpha(color, self.alpha_scale())
    }

    /// Alpha multiplier for everything the ring draws this frame.
    pub fn alpha_scale(&self) -> f64 {
        self.animation
            .as_ref()
            .map_or(1.0, |a| a.alpha_scale(&self.config))
    }

    /// Places every child inside its sector. Spreads children over the visual
    /// sweep while animating so the sectors unfold with the angle.
    pub fn layout(&self) -> Vec<ChildPlacement> {
        let positions = LayoutPositions::new(self.child_count, &self.config)
            .with_sweep(self.visual_sweep());
        let span = positions.span();
        let outer = self.config.radius();
        let inner = self.config.inner_radius_length();

        let place = |p: SectorPosition| ChildPlacement {
            index: p.index,
            center: point_at_angle(Point::default(), p.distance, p.angle.to_radians()),
            angle: p.angle,
            distance: p.distance,
            max_radius: estimated_child_radius(span, p.distance, outer, inner),
        };

        match &self.distance_fn {
            Some(distance) => positions.with_distance(distance.as_ref()).map(place).collect(),
            None => positions.map(place).collect(),
        }
    }
}
