use super::radial::RadialConfig;
use super::scene::ActorId;
use super::style::{Color, scale_alpha};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::collections::HashMap;
use std::f64::consts::FRAC_PI_2;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Interpolation applied to the linear progress of a transition.
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
pub enum Easing {
    #[default]
    Linear,
    Smooth,
    Smooth2,
    Smoother,
    Pow2Out,
    SineOut,
    CircleOut,
}

impl Easing {
    /// Maps `t` in `[0, 1]` onto `[0, 1]`, keeping both ends fixed.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => t * t * (3.0 - 2.0 * t),
            Self::Smooth2 => {
                let t = t * t * (3.0 - 2.0 * t);
                t * t * (3.0 - 2.0 * t)
            }
            Self::Smoother => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
            Self::Pow2Out => 1.0 - (t - 1.0) * (t - 1.0),
            Self::SineOut => (t * FRAC_PI_2).sin(),
            Self::CircleOut => (1.0 - (t - 1.0) * (t - 1.0)).sqrt(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Direction {
    Opening,
    Closing,
}

/// Animated sweep of one widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualAngleState {
    pub current_angle: f64,
    pub is_opening: bool,
    pub is_closing: bool,
    /// Transitions toward open that have not retired yet.
    pub open_count: usize,
    /// Transitions toward closed that have not retired yet.
    pub close_count: usize,
    pub original_colors: HashMap<ActorId, Color>,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    direction: Direction,
    generation: u64,
    start_angle: f64,
    target_angle: f64,
    duration: f64,
    elapsed: f64,
}

/// Result of one [`AnimationController::advance`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub angle: f64,
    /// The sector layout depends on the angle and must be recomputed.
    pub layout_invalidated: bool,
    pub completed: Option<Direction>,
    /// Colors to put back on children now that nothing is animating.
    pub restored_colors: Vec<(ActorId, Color)>,
}

/// Drives the visual angle between 0 and the configured sweep.
///
/// Every open or close request starts a new transition from the current
/// angle and supersedes whatever was running; superseded transitions retire
/// on the next tick. `open_count` and `close_count` track transitions that are
/// still alive, so a burst of open/close/open requests never lets an old
/// transition pick up again with a stale start angle.
#[derive(Debug, Default)]
pub struct AnimationController {
    state: VisualAngleState,
    visible: bool,
    easing: Easing,
    transitions: Vec<Transition>,
    generation: u64,
    /// Captured colors of abandoned animations, handed back on the next tick.
    released: Vec<(ActorId, Color)>,
}

impl AnimationController {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &VisualAngleState {
        &self.state
    }

    pub fn current_angle(&self) -> f64 {
        self.state.current_angle
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_opening(&self) -> bool {
        self.state.is_opening
    }

    pub fn is_closing(&self) -> bool {
        self.state.is_closing
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_opening || self.state.is_closing
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Sweep the layout should spread children over this frame.
    pub fn visual_sweep(&self, config: &RadialConfig) -> f64 {
        if self.is_animating() {
            self.state.current_angle
        } else {
            config.total_degrees_drawn()
        }
    }

    /// Multiplier for child alpha: the revealed fraction while animating, 1
    /// otherwise.
    pub fn alpha_scale(&self, config: &RadialConfig) -> f64 {
        let total = config.total_degrees_drawn();
        if !self.is_animating() || total <= 0.0 {
            return 1.0;
        }
        (self.state.current_angle / total).clamp(0.0, 1.0)
    }

    /// Opens fully and immediately.
    pub fn show(&mut self, config: &RadialConfig) {
        self.drop_transitions();
        self.state.current_angle = config.total_degrees_drawn();
        self.visible = true;
    }

    /// Hides immediately, abandoning any transition.
    pub fn hide(&mut self) {
        self.drop_transitions();
        self.visible = false;
    }

    pub fn animate_opening(&mut self, config: &RadialConfig, duration_seconds: f64) {
        self.state.current_angle = 0.0;
        self.transition_to_opening(config, duration_seconds);
    }

    pub fn animate_closing(&mut self, config: &RadialConfig, duration_seconds: f64) {
        self.state.current_angle = config.total_degrees_drawn();
        self.transition_to_closing(duration_seconds);
    }

    /// Opens from wherever the angle currently is.
    pub fn transition_to_opening(&mut self, config: &RadialConfig, duration_seconds: f64) {
        self.state.is_opening = true;
        self.state.is_closing = false;
        self.state.open_count += 1;
        self.visible = true;
        self.begin(
            Direction::Opening,
            config.total_degrees_drawn(),
            duration_seconds,
        );
    }

    /// Closes from wherever the angle currently is. The widget is hidden once
    /// the angle reaches 0.
    pub fn transition_to_closing(&mut self, duration_seconds: f64) {
        self.state.is_opening = false;
        self.state.is_closing = true;
        self.state.close_count += 1;
        self.begin(Direction::Closing, 0.0, duration_seconds);
    }

    pub fn toggle_visibility(&mut self, config: &RadialConfig, duration_seconds: f64) {
        if self.state.is_opening || (self.visible && !self.state.is_closing) {
            self.transition_to_closing(duration_seconds);
        } else {
            self.transition_to_opening(config, duration_seconds);
        }
    }

    fn begin(&mut self, direction: Direction, target_angle: f64, duration_seconds: f64) {
        self.generation += 1;
        log::debug!(
            "{} from {:.1} to {:.1} degrees over {:.3}s",
            direction,
            self.state.current_angle,
            target_angle,
            duration_seconds
        );
        self.transitions.push(Transition {
            direction,
            generation: self.generation,
            start_angle: self.state.current_angle,
            target_angle,
            duration: duration_seconds.max(0.0),
            elapsed: 0.0,
        });
    }

    /// Steps the live transition by `delta_seconds` and retires superseded
    /// ones. Call once per frame, before layout.
    pub fn advance(&mut self, config: &RadialConfig, delta_seconds: f64) -> Frame {
        let mut frame = Frame {
            angle: self.state.current_angle,
            ..Frame::default()
        };
        let total = config.total_degrees_drawn();
        for mut transition in std::mem::take(&mut self.transitions) {
            if transition.generation != self.generation {
                self.retire(transition.direction);
                continue;
            }

            transition.elapsed += delta_seconds.max(0.0);
            let ratio = if total > 0.0 {
                (transition.target_angle - transition.start_angle).abs() / total
            } else {
                0.0
            };
            let effective = transition.duration * ratio;
            let percent = if effective > 0.0 {
                (transition.elapsed / effective).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let eased = self.easing.apply(percent);
            self.state.current_angle = (transition.start_angle
                + (transition.target_angle - transition.start_angle) * eased)
                .clamp(0.0, total.max(0.0));
            frame.layout_invalidated = true;

            log::trace!(
                "{} at {:.0}%: {:.2} degrees",
                transition.direction,
                percent * 100.0,
                self.state.current_angle
            );

            if percent >= 1.0 {
                self.complete(transition.direction);
                frame.completed = Some(transition.direction);
            } else {
                self.transitions.push(transition);
            }
        }

        if self.state.open_count == 0 && self.state.close_count == 0 {
            self.released.extend(self.state.original_colors.drain());
        }
        frame.restored_colors = std::mem::take(&mut self.released);
        frame.angle = self.state.current_angle;
        frame
    }

    fn complete(&mut self, direction: Direction) {
        match direction {
            Direction::Opening => self.state.is_opening = false,
            Direction::Closing => {
                self.state.is_closing = false;
                self.visible = false;
            }
        }
        self.retire(direction);
        log::debug!("{} finished at {:.1} degrees", direction, self.state.current_angle);
    }

    fn retire(&mut self, direction: Direction) {
        let counter = match direction {
            Direction::Opening => &mut self.state.open_count,
            Direction::Closing => &mut self.state.close_count,
        };
        *counter = counter.saturating_sub(1);
    }

    fn drop_transitions(&mut self) {
        self.transitions.clear();
        self.released.extend(self.state.original_colors.drain());
        self.state.is_opening = false;
        self.state.is_closing = false;
        self.state.open_count = 0;
        self.state.close_count = 0;
    }

    /// Color a child should be drawn with this frame. The first call for a
    /// child during an animation records `color` as its original; later calls
    /// fade that original instead of compounding the fade.
    pub fn fade_color(&mut self, config: &RadialConfig, child: ActorId, color: Color) -> Color {
        if !self.is_animating() {
            return color;
        }
        let scale = self.alpha_scale(config);
        let original = *self.state.original_colors.entry(child).or_insert(color);
        scale_alpha(original, scale)
    }

    /// Colors captured by [`fade_color`](Self::fade_color) that are still
    /// waiting to be restored.
    pub fn pending_restores(&self) -> usize {
        self.state.original_colors.len() + self.released.len()
    }
}
