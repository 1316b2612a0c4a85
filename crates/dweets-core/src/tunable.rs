//! Live-tunable demo parameters bound to keys.
//!
//! Two binding styles exist:
//!
//! - [`Tunable`]: a floating point constant nudged every frame while its key
//!   is held, optionally reset to its original value.
//! - [`Keymap`]: integer parameters behind a per-key cooldown, so a held key
//!   fires at most once per cooldown window.

use crate::input::{Key, KeyboardState};

/// A named numeric parameter that remembers its original value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tunable {
    pub key: Key,
    pub name: &'static str,
    original: f64,
    value: f64,
    step: f64,
}

impl Tunable {
    /// A parameter adjusted by a fixed `step` per frame.
    pub fn new(key: Key, name: &'static str, original: f64, step: f64) -> Self {
        Self {
            key,
            name,
            original,
            value: original,
            step,
        }
    }

    /// A parameter adjusted by a fraction of its original value per frame.
    pub fn proportional(key: Key, name: &'static str, original: f64, fraction: f64) -> Self {
        Self::new(key, name, original, original * fraction)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn original(&self) -> f64 {
        self.original
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Move the value one step; a negative `direction` moves it down.
    pub fn nudge(&mut self, direction: f64) {
        self.value += direction.signum() * self.step;
    }

    pub fn reset(&mut self) {
        self.value = self.original;
    }
}

/// What a held ctrl modifier does to a [`Tunable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlAction {
    /// Ctrl is ignored; the key adjusts as usual.
    Ignore,
    /// Ctrl resets the parameter to its original value.
    Reset,
}

/// Apply one frame of held-key adjustments.
///
/// Shift inverts the direction. Returns whether any parameter changed.
pub fn adjust_held(params: &mut [Tunable], keys: &KeyboardState, ctrl: CtrlAction) -> bool {
    let modifiers = keys.modifiers();
    let direction = if modifiers.shift() { -1.0 } else { 1.0 };
    let mut changed = false;
    for param in params.iter_mut().filter(|p| keys.is_held(p.key)) {
        if ctrl == CtrlAction::Reset && modifiers.ctrl() {
            param.reset();
        } else {
            param.nudge(direction);
        }
        changed = true;
    }
    changed
}

/// A key that can only fire once per `cooldown` frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownKey {
    pub key: Key,
    pub cooldown: u32,
    heat: u32,
}

impl CooldownKey {
    pub fn new(key: Key, cooldown: u32) -> Self {
        Self {
            key,
            cooldown,
            heat: 0,
        }
    }

    pub fn heat(&self) -> u32 {
        self.heat
    }

    /// Held and cooled down.
    pub fn is_ready(&self, keys: &KeyboardState) -> bool {
        keys.is_held(self.key) && self.heat == 0
    }

    /// Cool down by one frame.
    pub fn cool(&mut self) {
        self.heat = self.heat.saturating_sub(1);
    }

    /// Mark the key as just fired.
    pub fn fire(&mut self) {
        self.heat = self.cooldown;
    }
}

/// Typed access to integer parameters by an identifier.
pub trait ParamTarget<P> {
    fn get(&self, param: P) -> i64;
    fn set(&mut self, param: P, value: i64);
}

/// A key bound to a parameter with a per-press amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding<P> {
    pub key: CooldownKey,
    pub param: P,
    pub amount: i64,
}

/// A table of cooldown bindings resolved once at startup.
#[derive(Debug, Clone)]
pub struct Keymap<P> {
    bindings: Vec<Binding<P>>,
}

impl<P: Copy> Keymap<P> {
    /// Bind each `(key, param, amount)` triple with a shared cooldown.
    pub fn new(cooldown: u32, bindings: impl IntoIterator<Item = (Key, P, i64)>) -> Self {
        let bindings = bindings
            .into_iter()
            .map(|(key, param, amount)| Binding {
                key: CooldownKey::new(key, cooldown),
                param,
                amount,
            })
            .collect();
        Self { bindings }
    }

    pub fn bindings(&self) -> &[Binding<P>] {
        &self.bindings
    }

    /// Run one frame: cool every key, then fire the held, cooled ones.
    ///
    /// Returns the parameters that changed.
    pub fn update<T: ParamTarget<P>>(&mut self, keys: &KeyboardState, target: &mut T) -> Vec<P> {
        for binding in &mut self.bindings {
            binding.key.cool();
        }
        let sign = if keys.modifiers().shift() { -1 } else { 1 };
        let mut fired = Vec::new();
        for binding in &mut self.bindings {
            if binding.key.is_ready(keys) {
                let value = target.get(binding.param);
                target.set(binding.param, value + sign * binding.amount);
                binding.key.fire();
                fired.push(binding.param);
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyPress, Modifiers};

    #[derive(Debug, Default)]
    struct Counter {
        value: i64,
    }

    impl ParamTarget<()> for Counter {
        fn get(&self, _: ()) -> i64 {
            self.value
        }

        fn set(&mut self, _: (), value: i64) {
            self.value = value;
        }
    }

    fn held(c: char, modifiers: Modifiers) -> KeyboardState {
        let mut keys = KeyboardState::with_releases();
        keys.press(KeyPress::new(Key::Char(c), modifiers));
        keys
    }

    #[test]
    fn test_proportional_step() {
        let t = Tunable::proportional(Key::Char('z'), "z", 1e5, 0.005);
        assert_eq!(t.step(), 500.0);
    }

    #[test]
    fn test_adjust_held_with_shift() {
        let mut params = [Tunable::new(Key::Char('h'), "voffset", 0.1, 0.005)];
        adjust_held(&mut params, &held('h', Modifiers::NONE), CtrlAction::Ignore);
        assert!((params[0].value() - 0.105).abs() < 1e-12);
        adjust_held(&mut params, &held('h', Modifiers::SHIFT), CtrlAction::Ignore);
        adjust_held(&mut params, &held('h', Modifiers::SHIFT), CtrlAction::Ignore);
        assert!((params[0].value() - 0.095).abs() < 1e-12);
    }

    #[test]
    fn test_adjust_held_ignores_other_keys() {
        let mut params = [Tunable::new(Key::Char('h'), "voffset", 0.1, 0.005)];
        assert!(!adjust_held(
            &mut params,
            &held('d', Modifiers::NONE),
            CtrlAction::Ignore
        ));
        assert_eq!(params[0].value(), 0.1);
    }

    #[test]
    fn test_ctrl_reset() {
        let mut params = [Tunable::proportional(Key::Char('x'), "x", 9.0, 0.005)];
        for _ in 0..37 {
            adjust_held(&mut params, &held('x', Modifiers::NONE), CtrlAction::Reset);
        }
        assert_ne!(params[0].value(), 9.0);
        adjust_held(&mut params, &held('x', Modifiers::CTRL), CtrlAction::Reset);
        assert_eq!(params[0].value(), 9.0);
    }

    #[test]
    fn test_cooldown_limits_changes() {
        let cooldown = 15;
        let mut keymap = Keymap::new(cooldown, [(Key::Char('w'), (), 1)]);
        let mut target = Counter::default();
        let keys = held('w', Modifiers::NONE);
        let mut changes = 0;
        let mut last = target.value;
        for _ in 0..2 * cooldown {
            keymap.update(&keys, &mut target);
            if target.value != last {
                changes += 1;
                last = target.value;
            }
        }
        assert_eq!(changes, 2);
    }

    #[test]
    fn test_cooldown_key_heat() {
        let mut key = CooldownKey::new(Key::Char('a'), 3);
        key.fire();
        assert_eq!(key.heat(), 3);
        key.cool();
        key.cool();
        key.cool();
        key.cool();
        assert_eq!(key.heat(), 0);
    }
}
