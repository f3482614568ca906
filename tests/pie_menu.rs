use halo_pie::config::{ConfigError, parse_settings};
use halo_pie::events::{PointerButton, Verdict};
use halo_pie::pie::animation::Direction;
use halo_pie::pie::{ActorId, Color, Hit, PieMenu, Point, SceneGraph};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

const FRAME: f64 = 1.0 / 60.0;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn at(angle_degrees: f64, distance: f64) -> Point {
    let radians = angle_degrees.to_radians();
    Point::new(distance * radians.cos(), distance * radians.sin())
}

/// Children are discs at fixed local positions, parented to one root.
struct Scene {
    root: ActorId,
    children: HashMap<ActorId, (Point, f64)>,
}

impl SceneGraph for Scene {
    fn is_within(&self, actor: ActorId, ancestor: ActorId) -> bool {
        actor == ancestor || (ancestor == self.root && self.children.contains_key(&actor))
    }

    fn hit_descendant(&self, root: ActorId, point: Point) -> Option<ActorId> {
        if root != self.root {
            return None;
        }
        self.children
            .iter()
            .find(|(_, (center, radius))| {
                Point::new(point.x - center.x, point.y - center.y).distance_squared()
                    <= radius * radius
            })
            .map(|(id, _)| *id)
    }
}

fn settings_menu(extra: &str) -> PieMenu {
    let toml = format!(
        "[ring]\nradius = 100.0\ninner_radius_percent = 0.2\n\n[animation]\nduration_seconds = 0.4\n{extra}"
    );
    let settings = parse_settings(&toml).unwrap();
    PieMenu::from_settings(ActorId::new(1), &settings)
        .unwrap()
        .with_children(6)
}

fn run_frames(menu: &mut PieMenu, seconds: f64) -> Vec<Direction> {
    let mut completed = Vec::new();
    let mut elapsed = 0.0;
    while elapsed < seconds - 1e-9 {
        if let Some(direction) = menu.advance(FRAME).completed {
            completed.push(direction);
        }
        elapsed += FRAME;
    }
    completed
}

#[test]
fn open_drag_select_close() {
    init();
    let mut menu = settings_menu("");
    let selections = Rc::new(RefCell::new(Vec::new()));
    let log = selections.clone();
    menu.listeners_mut()
        .unwrap()
        .on_selection_change(move |index| {
            log.borrow_mut().push(index);
            Verdict::Accept
        });

    menu.animate_opening(menu.animation_duration());
    assert!(menu.is_visible());
    assert!(menu.is_animating());
    assert_eq!(run_frames(&mut menu, 0.45), vec![Direction::Opening]);
    assert_eq!(menu.visual_sweep(), 360.0);

    // six sectors of 60 degrees each
    assert!(menu.on_pointer_down(at(30.0, 50.0), PointerButton::Left));
    assert_eq!(menu.highlighted_index(), Some(0));
    menu.on_pointer_dragged(at(200.0, 60.0));
    assert_eq!(menu.highlighted_index(), Some(3));
    assert!(menu.on_pointer_up(at(200.0, 60.0), PointerButton::Left));
    assert_eq!(menu.selected_index(), Some(3));

    menu.transition_to_closing(menu.animation_duration());
    assert_eq!(run_frames(&mut menu, 0.45), vec![Direction::Closing]);
    assert!(!menu.is_visible());
    assert_eq!(menu.selected_index(), Some(3));
    assert_eq!(*selections.borrow(), vec![Some(3)]);
}

#[test]
fn interrupted_opening_closes_in_proportional_time() {
    init();
    let mut menu = settings_menu("");
    menu.animate_opening(0.4);
    menu.advance(0.2);
    assert!((menu.visual_sweep() - 180.0).abs() < 1e-9);

    menu.transition_to_closing(0.4);
    let frame = menu.advance(0.1);
    assert!((frame.angle - 90.0).abs() < 1e-9);
    assert_eq!(frame.completed, None);
    let frame = menu.advance(0.1);
    assert_eq!(frame.angle, 0.0);
    assert_eq!(frame.completed, Some(Direction::Closing));
    assert!(!menu.is_visible());
}

#[test]
fn rapid_toggles_settle_on_last_request() {
    init();
    let mut menu = settings_menu("");
    menu.toggle_visibility(0.4);
    menu.advance(0.1);
    menu.toggle_visibility(0.4);
    menu.advance(FRAME);
    menu.toggle_visibility(0.4);

    let completed = run_frames(&mut menu, 0.5);
    assert_eq!(completed.last(), Some(&Direction::Opening));
    assert!(menu.is_visible());
    assert!(!menu.is_animating());
    assert_eq!(menu.visual_sweep(), 360.0);
}

#[test]
fn vetoed_release_keeps_previous_selection() {
    init();
    let mut menu = settings_menu("[selection]\ndefault_index = 0\n");
    menu.show();
    assert_eq!(menu.selected_index(), Some(0));

    let locked = Rc::new(RefCell::new(true));
    let veto = locked.clone();
    menu.listeners_mut().unwrap().on_selection_change(move |_| {
        if *veto.borrow() {
            Verdict::Veto
        } else {
            Verdict::Accept
        }
    });

    menu.on_pointer_down(at(130.0, 50.0), PointerButton::Left);
    assert_eq!(menu.highlighted_index(), Some(2));
    menu.on_pointer_up(at(130.0, 50.0), PointerButton::Left);
    assert_eq!(menu.selected_index(), Some(0));
    assert_eq!(menu.highlighted_index(), Some(2));

    *locked.borrow_mut() = false;
    menu.on_pointer_down(at(130.0, 50.0), PointerButton::Left);
    menu.on_pointer_up(at(130.0, 50.0), PointerButton::Left);
    assert_eq!(menu.selected_index(), Some(2));

    // a miss falls back to the default
    menu.on_pointer_down(at(130.0, 500.0), PointerButton::Left);
    menu.on_pointer_up(at(130.0, 500.0), PointerButton::Left);
    assert_eq!(menu.selected_index(), Some(0));
}

#[test]
fn configured_button_and_middle_cancel() {
    init();
    let mut menu = settings_menu(
        "[selection]\nselection_button = \"right\"\nmiddle_cancel = true\ninfinite_range = true\n",
    );
    menu.show();

    assert!(!menu.on_pointer_down(at(30.0, 50.0), PointerButton::Left));
    assert_eq!(menu.highlighted_index(), None);

    assert!(menu.on_pointer_down(at(30.0, 50.0), PointerButton::Right));
    menu.on_pointer_dragged(at(90.0, 300.0));
    assert_eq!(menu.highlighted_index(), Some(1));
    menu.on_pointer_up(at(90.0, 10.0), PointerButton::Right);
    assert_eq!(menu.selected_index(), None);
}

#[test]
fn children_take_precedence_and_keep_hover() {
    init();
    let mut menu = settings_menu("");
    menu.show();

    let layout = menu.layout();
    assert_eq!(layout.len(), 6);
    let child = ActorId::new(11);
    let scene = Scene {
        root: menu.id(),
        children: HashMap::from([(child, (layout[0].center, layout[0].max_radius))]),
    };

    assert_eq!(menu.hit(&scene, layout[0].center), Some(Hit::Descendant(child)));
    assert_eq!(menu.hit(&scene, at(150.0, 60.0)), Some(Hit::Sector(2)));
    assert_eq!(menu.hit(&scene, at(150.0, 10.0)), None);

    assert!(menu.on_pointer_moved(at(150.0, 60.0)));
    assert_eq!(menu.hovered_index(), Some(2));
    menu.on_pointer_exit(&scene, Some(menu.id()), Some(child));
    assert_eq!(menu.hovered_index(), Some(2));
    menu.on_pointer_exit(&scene, Some(child), Some(ActorId::new(99)));
    assert_eq!(menu.hovered_index(), None);
}

#[test]
fn invalid_ring_settings_are_rejected() {
    init();
    let settings = parse_settings("[ring]\ntotal_degrees_drawn = 0.0").unwrap();
    assert!(matches!(
        PieMenu::from_settings(ActorId::new(1), &settings),
        Err(ConfigError::Ring(_))
    ));
}

#[test]
fn show_mid_animation_restores_child_colors() {
    init();
    let mut menu = settings_menu("");
    let ids = 10..13;
    let base = |i: u64| Color::new(i as f64 / 50.0, 0.5, 0.5, 1.0);

    menu.animate_opening(0.4);
    menu.advance(0.1);
    for i in ids.clone() {
        let faded = menu.fade_child_color(ActorId::new(i), base(i));
        assert!((faded.alpha - 0.25).abs() < 1e-9);
    }

    menu.show();
    let mut restored = menu.advance(FRAME).restored_colors;
    restored.sort_by_key(|(id, _)| *id);
    let expected: Vec<_> = ids.map(|i| (ActorId::new(i), base(i))).collect();
    assert_eq!(restored, expected);
    assert!(menu.advance(FRAME).restored_colors.is_empty());

    // fully shown, so colors pass through untouched
    assert_eq!(menu.fade_child_color(ActorId::new(10), base(0)), base(0));
}

#[test]
fn removing_children_keeps_selection_in_range() {
    init();
    let mut menu = settings_menu("[selection]\ndefault_index = 1\n");
    menu.show();
    let selections = Rc::new(RefCell::new(Vec::new()));
    let log = selections.clone();
    menu.listeners_mut().unwrap().on_selection_change(move |index| {
        log.borrow_mut().push(index);
        Verdict::Accept
    });

    menu.on_pointer_down(at(310.0, 50.0), PointerButton::Left);
    menu.on_pointer_up(at(310.0, 50.0), PointerButton::Left);
    assert_eq!(menu.selected_index(), Some(5));

    menu.set_child_count(3);
    assert_eq!(menu.selected_index(), Some(1));
    assert_eq!(menu.highlighted_index(), Some(1));
    assert_eq!(*selections.borrow(), vec![Some(5), Some(1)]);

    // three sectors of 120 degrees now
    menu.on_pointer_moved(at(250.0, 50.0));
    assert_eq!(menu.hovered_index(), Some(2));
    menu.set_child_count(1);
    assert_eq!(menu.hovered_index(), None);
    assert_eq!(menu.selected_index(), None);
}
