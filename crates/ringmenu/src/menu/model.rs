use super::EPSILON;
use super::item::MenuItem;
use super::phase::{Phase, Transition};
use super::view::{self, Surface};
use crate::config::Config;
use crate::geometry::lerp;
use crate::input::{Action, Input};
use std::f64::consts::TAU;

/// Result of one [`Menu::draw`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawOutcome {
    /// Set only on the frame the confirm key closed the menu.
    pub confirmed: bool,
    /// `None` while the menu holds no items.
    pub selected: Option<usize>,
}

/// A ring of items around the screen center, driven one frame at a time by
/// [`Menu::update`] and [`Menu::draw`].
#[derive(Debug, Clone, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
    config: Config,
    phase: Phase,
    progress: f64,
    target_angle: f64,
    current_angle: f64,
    selected: usize,
}

impl Menu {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn add(&mut self, item: MenuItem) {
        self.items.push(item);
        self.realign();
    }

    /// Removes the item at `index`. The selection stays on the same slot, wrapping when the
    /// slot no longer exists. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<MenuItem> {
        if index >= self.items.len() {
            log::warn!(
                "Ignoring removal of item {} from a menu of {}",
                index,
                self.items.len()
            );
            return None;
        }

        let item = self.items.remove(index);
        if self.items.is_empty() {
            self.shut();
        } else {
            self.selected %= self.items.len();
            self.realign();
        }
        Some(item)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.shut();
    }

    /// An empty menu has nothing left to animate and no key reaches it, so it closes on the
    /// spot.
    fn shut(&mut self) {
        if self.phase != Phase::Closed {
            log::debug!("Menu {} -> {} (no items left)", self.phase, Phase::Closed);
        }
        self.phase = Phase::Closed;
        self.progress = 0.0;
        self.selected = 0;
        self.target_angle = 0.0;
        self.current_angle = 0.0;
    }

    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    pub fn selected(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.selected)
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.items.get(self.selected)
    }

    /// Applies `action` as if its key had been pressed. Returns whether it confirmed the
    /// selection. An empty menu ignores everything.
    pub fn trigger(&mut self, action: Action) -> bool {
        if self.items.is_empty() {
            return false;
        }

        match action {
            Action::RotateCw | Action::RotateCcw => {
                if self.phase.accepts_rotation() {
                    self.rotate(action == Action::RotateCw);
                }
                false
            }
            _ => self
                .phase
                .on(action)
                .map(|transition| self.enter(transition))
                .unwrap_or(false),
        }
    }

    fn enter(&mut self, transition: Transition) -> bool {
        log::debug!("Menu {} -> {}", self.phase, transition.phase);
        self.phase = transition.phase;
        self.progress = transition.progress;
        transition.confirmed
    }

    fn angular_step(&self) -> f64 {
        TAU / self.items.len() as f64
    }

    fn rotate(&mut self, clockwise: bool) {
        let count = self.items.len();
        let step = self.angular_step();
        if clockwise {
            self.selected = (self.selected + 1) % count;
            self.target_angle -= step;
        } else {
            self.selected = (self.selected + count - 1) % count;
            self.target_angle += step;
        }
    }

    /// Snaps the target angle to the selection after the angular step changed, keeping the
    /// number of full turns already accumulated.
    fn realign(&mut self) {
        let want = -(self.selected as f64) * self.angular_step();
        let turns = ((self.target_angle - want) / TAU).round();
        self.target_angle = want + turns * TAU;
    }

    /// Advances the open/close animation and the ring rotation by `delta` seconds.
    pub fn update(&mut self, delta: f64) {
        let step = delta * self.config.anim_speed;
        if step.is_nan() {
            return;
        }

        let (phase, progress) = self.phase.advance(self.progress, step);
        if phase != self.phase {
            log::debug!("Menu {} -> {}", self.phase, phase);
        }
        self.phase = phase;
        self.progress = progress;

        self.current_angle = lerp(self.current_angle, self.target_angle, step.clamp(0.0, 1.0));
        if (self.target_angle - self.current_angle).abs() <= EPSILON {
            self.current_angle = self.target_angle;
        }
    }

    /// Reacts to this frame's key presses and draws the menu unless it is closed.
    pub fn draw<I, S>(&mut self, input: &I, surface: &mut S) -> Result<DrawOutcome, S::Error>
    where
        I: Input + ?Sized,
        S: Surface,
    {
        if self.items.is_empty() {
            return Ok(DrawOutcome::default());
        }

        let confirmed = self.poll(input);
        let outcome = DrawOutcome {
            confirmed,
            selected: self.selected(),
        };

        if !self.is_closed() {
            view::draw(surface, self)?;
        }
        Ok(outcome)
    }

    fn poll<I: Input + ?Sized>(&mut self, input: &I) -> bool {
        let keys = &self.config.keys;
        let pressed = |action| input.is_key_pressed(keys.key(action));

        let fired = [Action::Open, Action::Close, Action::Confirm]
            .into_iter()
            .find(|&action| pressed(action) && self.phase.on(action).is_some());
        let rotations: Vec<_> = [Action::RotateCw, Action::RotateCcw]
            .into_iter()
            .filter(|&action| pressed(action))
            .collect();

        let confirmed = fired.is_some_and(|action| self.trigger(action));
        for action in rotations {
            self.trigger(action);
        }
        confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, KeyLatch};
    use crate::testing::RecordingSurface;

    fn menu(labels: &[&str]) -> Menu {
        let mut menu = Menu::new(Config {
            anim_speed: 2.0,
            ..Config::default()
        });
        for label in labels {
            menu.add(MenuItem::new(*label));
        }
        menu
    }

    /// Draws one frame with the keys bound to `actions` pressed.
    fn frame(menu: &mut Menu, actions: &[Action]) -> DrawOutcome {
        let mut latch = KeyLatch::new();
        for &action in actions {
            latch.press(menu.config().keys.key(action).clone());
        }
        let mut surface = RecordingSurface::new(800.0, 600.0);
        menu.draw(&latch, &mut surface).unwrap()
    }

    #[test]
    fn test_open_then_progress_clamps() {
        let mut menu = menu(&["A", "B", "C", "D", "E"]);
        frame(&mut menu, &[Action::Open]);
        assert_eq!(menu.phase(), Phase::Opening);
        assert_eq!(menu.progress(), 0.0);

        menu.update(0.5);
        assert_eq!(menu.progress(), 1.0);
        assert_eq!(menu.phase(), Phase::Opening);

        menu.update(10.0);
        assert_eq!(menu.progress(), 1.0);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut menu = menu(&["A", "B", "C"]);
        frame(&mut menu, &[Action::Open]);
        assert_eq!(menu.selected(), Some(0));

        assert_eq!(frame(&mut menu, &[Action::RotateCw]).selected, Some(1));
        frame(&mut menu, &[Action::RotateCw]);
        assert_eq!(frame(&mut menu, &[Action::RotateCw]).selected, Some(0));

        assert_eq!(frame(&mut menu, &[Action::RotateCcw]).selected, Some(2));
    }

    #[test]
    fn test_full_turn_returns_to_start() {
        let mut menu = menu(&["A", "B", "C", "D", "E", "F", "G"]);
        menu.trigger(Action::Open);
        menu.trigger(Action::RotateCcw);
        let start = menu.selected();

        for _ in 0..menu.len() {
            let outcome = frame(&mut menu, &[Action::RotateCw]);
            assert!(outcome.selected.is_some_and(|i| i < menu.len()));
        }
        assert_eq!(menu.selected(), start);
        assert!((menu.target_angle() + TAU / 7.0 * 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_moves_target_angle() {
        let mut menu = menu(&["A", "B", "C", "D"]);
        menu.trigger(Action::Open);
        frame(&mut menu, &[Action::RotateCw]);
        assert_eq!(menu.target_angle(), -TAU / 4.0);
        frame(&mut menu, &[Action::RotateCcw]);
        frame(&mut menu, &[Action::RotateCcw]);
        assert_eq!(menu.selected(), Some(3));
        assert_eq!(menu.target_angle(), TAU / 4.0);
    }

    #[test]
    fn test_held_rotate_key_steps_once() {
        let mut menu = menu(&["A", "B", "C", "D"]);
        menu.trigger(Action::Open);

        let mut latch = KeyLatch::new();
        let ccw = menu.config().keys.rotate_ccw.clone();
        let mut surface = RecordingSurface::new(800.0, 600.0);

        latch.press(ccw.clone());
        latch.press(ccw.clone());
        menu.draw(&latch, &mut surface).unwrap();
        assert_eq!(menu.selected(), Some(3));

        // auto-repeat on the next frame while still held
        latch.end_frame();
        latch.press(ccw);
        menu.draw(&latch, &mut surface).unwrap();
        assert_eq!(menu.selected(), Some(3));
    }

    #[test]
    fn test_both_rotations_in_one_frame_cancel() {
        let mut menu = menu(&["A", "B", "C"]);
        menu.trigger(Action::Open);
        frame(&mut menu, &[Action::RotateCw, Action::RotateCcw]);
        assert_eq!(menu.selected(), Some(0));
        assert!(menu.target_angle().abs() < 1e-12);
    }

    #[test]
    fn test_closed_menu_ignores_everything_but_open() {
        let mut menu = menu(&["A", "B", "C"]);
        let outcome = frame(
            &mut menu,
            &[Action::Close, Action::Confirm, Action::RotateCw],
        );
        assert!(!outcome.confirmed);
        assert_eq!(outcome.selected, Some(0));
        assert_eq!(menu.phase(), Phase::Closed);
        assert_eq!(menu.target_angle(), 0.0);
    }

    #[test]
    fn test_closed_menu_draws_nothing() {
        let mut menu = menu(&["A"]);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        menu.draw(&|_: &KeyCode| false, &mut surface).unwrap();
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn test_confirm_fires_once() {
        let mut menu = menu(&["A", "B"]);
        frame(&mut menu, &[Action::Open]);
        menu.update(1.0);
        frame(&mut menu, &[Action::RotateCw]);

        let outcome = frame(&mut menu, &[Action::Confirm]);
        assert!(outcome.confirmed);
        assert_eq!(outcome.selected, Some(1));
        assert_eq!(menu.phase(), Phase::Closing);
        assert_eq!(menu.progress(), 1.0);

        // still pressed while closing
        assert!(!frame(&mut menu, &[Action::Confirm]).confirmed);
        menu.update(0.1);
        assert!(!frame(&mut menu, &[]).confirmed);
    }

    #[test]
    fn test_first_trigger_wins() {
        let mut menu = menu(&["A", "B"]);
        menu.trigger(Action::Open);
        let outcome = frame(&mut menu, &[Action::Close, Action::Confirm]);
        assert!(!outcome.confirmed);
        assert_eq!(menu.phase(), Phase::Closing);
    }

    #[test]
    fn test_open_key_while_open_falls_through() {
        let mut menu = menu(&["A", "B"]);
        menu.trigger(Action::Open);
        assert!(frame(&mut menu, &[Action::Open, Action::Confirm]).confirmed);
    }

    #[test]
    fn test_closing_reaches_closed_and_stays_at_zero() {
        let mut menu = menu(&["A", "B"]);
        menu.trigger(Action::Open);
        menu.update(1.0);
        menu.trigger(Action::Close);

        menu.update(0.25);
        assert_eq!(menu.phase(), Phase::Closing);
        assert_eq!(menu.progress(), 0.5);

        menu.update(0.25);
        assert_eq!(menu.phase(), Phase::Closed);
        assert_eq!(menu.progress(), 0.0);

        for delta in [1.0, -1.0, 1e9] {
            menu.update(delta);
            assert_eq!(menu.progress(), 0.0);
        }

        menu.trigger(Action::Open);
        menu.update(0.1);
        assert!(menu.progress() > 0.0);
    }

    #[test]
    fn test_rotation_allowed_while_closing() {
        let mut menu = menu(&["A", "B", "C"]);
        menu.trigger(Action::Open);
        menu.trigger(Action::Close);
        frame(&mut menu, &[Action::RotateCw]);
        assert_eq!(menu.selected(), Some(1));
    }

    #[test]
    fn test_progress_stays_in_range() {
        let mut menu = menu(&["A", "B"]);
        menu.trigger(Action::Open);
        for delta in [0.3, -5.0, 1e12, f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 0.0] {
            menu.update(delta);
            assert!((0.0..=1.0).contains(&menu.progress()), "{delta}");
        }

        menu.trigger(Action::Close);
        for delta in [-1e12, 0.1, f64::NAN] {
            menu.update(delta);
            assert!((0.0..=1.0).contains(&menu.progress()), "{delta}");
        }
    }

    #[test]
    fn test_angle_converges_and_snaps() {
        let mut menu = menu(&["A", "B", "C", "D"]);
        menu.trigger(Action::Open);
        menu.trigger(Action::RotateCw);

        menu.update(0.25);
        let half_way = -TAU / 8.0;
        assert!((menu.current_angle() - half_way).abs() < 1e-12);

        for _ in 0..100 {
            menu.update(0.25);
        }
        assert_eq!(menu.current_angle(), menu.target_angle());
    }

    #[test]
    fn test_long_frame_does_not_overshoot() {
        let mut menu = menu(&["A", "B", "C", "D"]);
        menu.trigger(Action::Open);
        menu.trigger(Action::RotateCw);
        menu.update(5.0);
        assert_eq!(menu.current_angle(), -TAU / 4.0);
    }

    #[test]
    fn test_removing_last_item() {
        let mut menu = menu(&["A"]);
        menu.trigger(Action::Open);
        menu.update(1.0);
        assert!(menu.remove(0).is_some());

        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut latch = KeyLatch::new();
        latch.press(menu.config().keys.confirm.clone());
        let outcome = menu.draw(&latch, &mut surface).unwrap();

        assert_eq!(outcome, DrawOutcome::default());
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn test_emptying_an_open_menu_closes_it() {
        let mut cleared = menu(&["A"]);
        cleared.trigger(Action::Open);
        cleared.update(1.0);
        cleared.clear();

        let mut removed = menu(&["A"]);
        removed.trigger(Action::Open);
        removed.update(1.0);
        removed.trigger(Action::Close);
        removed.update(0.1);
        assert_eq!(removed.phase(), Phase::Closing);
        removed.remove(0);

        for menu in [&mut cleared, &mut removed] {
            assert_eq!(menu.phase(), Phase::Closed);
            assert_eq!(menu.progress(), 0.0);
            menu.update(1.0);
            assert!(menu.is_closed());

            // refilling starts from a closed menu that opens normally
            menu.add(MenuItem::new("B"));
            assert!(menu.is_closed());
            menu.trigger(Action::Open);
            assert_eq!(menu.phase(), Phase::Opening);
        }
    }

    #[test]
    fn test_remove_rewraps_selection() {
        let mut menu = menu(&["A", "B", "C"]);
        menu.trigger(Action::Open);
        menu.trigger(Action::RotateCcw);
        assert_eq!(menu.selected(), Some(2));

        assert_eq!(menu.remove(2).map(|i| i.label), Some("C".to_string()));
        assert_eq!(menu.selected(), Some(0));
        assert_eq!(menu.target_angle(), 0.0);
    }

    #[test]
    fn test_remove_before_selection_keeps_slot() {
        let mut menu = menu(&["A", "B", "C", "D"]);
        menu.trigger(Action::Open);
        menu.trigger(Action::RotateCw);
        menu.trigger(Action::RotateCw);

        menu.remove(0);
        assert_eq!(menu.selected(), Some(2));
        assert_eq!(menu.selected_item().map(|i| i.label.as_str()), Some("D"));
        assert!((menu.target_angle() + 2.0 * TAU / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let mut menu = menu(&["A", "B"]);
        assert_eq!(menu.remove(2), None);
        assert_eq!(menu.len(), 2);
    }

    #[test]
    fn test_realign_keeps_accumulated_turns() {
        let mut menu = menu(&["A", "B"]);
        menu.trigger(Action::Open);
        for _ in 0..4 {
            menu.trigger(Action::RotateCw);
        }
        assert!((menu.target_angle() + 2.0 * TAU).abs() < 1e-12);

        menu.add(MenuItem::new("C"));
        assert!((menu.target_angle() + 2.0 * TAU).abs() < 1e-12);
    }

    #[test]
    fn test_clear_resets() {
        let mut menu = menu(&["A", "B", "C"]);
        menu.trigger(Action::Open);
        menu.trigger(Action::RotateCw);
        menu.clear();

        assert!(menu.is_empty());
        assert_eq!(menu.selected(), None);
        assert_eq!(menu.target_angle(), 0.0);
        assert!(!menu.trigger(Action::Confirm));
    }

    #[test]
    fn test_set_config_replaces_bindings() {
        let mut menu = menu(&["A", "B"]);
        let mut config = menu.config().clone();
        config.keys.open = KeyCode::new("space");
        menu.set_config(config);

        frame(&mut menu, &[Action::Open]);
        assert_eq!(menu.phase(), Phase::Opening);

        let mut latch = KeyLatch::new();
        latch.press(KeyCode::new("tab"));
        menu.trigger(Action::Close);
        menu.update(10.0);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        menu.draw(&latch, &mut surface).unwrap();
        assert_eq!(menu.phase(), Phase::Closed);
    }
}
