use crate::simulation::Simulation;

/// Capability a slide exposes to the presentation controller so its
/// content can be switched on and off with the slide.
pub trait Activation {
    fn name(&self) -> &str;

    /// Idempotent. Coming from inactive it runs the activation hook and then
    /// resumes (or pauses) the underlying simulation.
    fn activate(&mut self);

    /// Idempotent. Suspends without resetting any state.
    fn deactivate(&mut self);

    fn is_active(&self) -> bool;

    /// Whether the handler receives frame updates.
    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;

    fn tick(&mut self, dt: f32);

    fn is_running(&self) -> bool;

    /// Simulated seconds the handler has run for.
    fn elapsed(&self) -> f32;

    fn phase(&self) -> f32;
}

type Hook<S> = Box<dyn FnMut(&mut S)>;

/// Binds a [`Simulation`] to a slide.
pub struct SimulationActivator<S: Simulation> {
    name: String,
    simulation: S,
    auto_play: bool,
    active: bool,
    enabled: bool,
    on_activate: Option<Hook<S>>,
}

impl<S: Simulation> SimulationActivator<S> {
    pub fn new(name: impl Into<String>, simulation: S) -> Self {
        Self {
            name: name.into(),
            simulation,
            auto_play: true,
            active: false,
            enabled: false,
            on_activate: None,
        }
    }

    /// Start paused instead of resuming on activation.
    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    /// Runs each time the activator goes from inactive to active, before the
    /// simulation is resumed.
    pub fn on_activate(mut self, hook: impl FnMut(&mut S) + 'static) -> Self {
        self.on_activate = Some(Box::new(hook));
        self
    }
}

impl<S: Simulation> Activation for SimulationActivator<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;

        match self.on_activate.as_mut() {
            Some(hook) => hook(&mut self.simulation),
            None => log::debug!("{} has no activation hook", self.name),
        }

        if self.auto_play {
            self.simulation.resume();
        } else {
            self.simulation.pause();
        }
    }

    fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.simulation.pause();
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn tick(&mut self, dt: f32) {
        if self.active && self.enabled {
            self.simulation.step(dt);
        }
    }

    fn is_running(&self) -> bool {
        self.active && self.simulation.is_running()
    }

    fn elapsed(&self) -> f32 {
        self.simulation.elapsed()
    }

    fn phase(&self) -> f32 {
        self.simulation.phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    impl<S: Simulation> SimulationActivator<S> {
        pub(crate) fn simulation(&self) -> &S {
            &self.simulation
        }
    }

    #[derive(Default)]
    struct Counting {
        resumes: u32,
        pauses: u32,
        running: bool,
        elapsed: f32,
    }

    impl Simulation for Counting {
        fn resume(&mut self) {
            self.resumes += 1;
            self.running = true;
        }

        fn pause(&mut self) {
            self.pauses += 1;
            self.running = false;
        }

        fn is_running(&self) -> bool {
            self.running
        }

        fn step(&mut self, dt: f32) {
            if self.running {
                self.elapsed += dt;
            }
        }

        fn elapsed(&self) -> f32 {
            self.elapsed
        }

        fn phase(&self) -> f32 {
            self.elapsed.fract()
        }
    }

    #[test]
    fn test_activate_twice_resumes_once() {
        let calls = Rc::new(RefCell::new(0));
        let hook_calls = Rc::clone(&calls);
        let mut act = SimulationActivator::new("sim", Counting::default())
            .on_activate(move |_| *hook_calls.borrow_mut() += 1);

        act.activate();
        act.activate();

        assert!(act.is_active());
        assert!(act.is_running());
        assert_eq!(act.simulation().resumes, 1);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_hook_runs_before_resume() {
        let seen_running = Rc::new(RefCell::new(None));
        let seen = Rc::clone(&seen_running);
        let mut act = SimulationActivator::new("sim", Counting::default())
            .on_activate(move |sim: &mut Counting| *seen.borrow_mut() = Some(sim.running));

        act.activate();
        assert_eq!(*seen_running.borrow(), Some(false));
        assert!(act.simulation().running);
    }

    #[test]
    fn test_start_paused() {
        let mut act = SimulationActivator::new("sim", Counting::default()).with_auto_play(false);
        act.activate();
        assert!(act.is_active());
        assert!(!act.is_running());
        assert_eq!(act.simulation().resumes, 0);
        assert_eq!(act.simulation().pauses, 1);
    }

    #[test]
    fn test_deactivate_keeps_state() {
        let mut act = SimulationActivator::new("sim", Counting::default());
        act.set_enabled(true);
        act.activate();
        act.tick(0.5);

        act.deactivate();
        act.deactivate();
        act.tick(0.5);

        assert!(!act.is_active());
        assert_eq!(act.simulation().pauses, 1);
        assert_eq!(act.elapsed(), 0.5);

        act.activate();
        act.tick(0.25);
        assert_eq!(act.elapsed(), 0.75);
    }

    #[test]
    fn test_disabled_handler_does_not_step() {
        let mut act = SimulationActivator::new("sim", Counting::default());
        act.activate();
        act.tick(1.0);
        assert_eq!(act.elapsed(), 0.0);
    }
}
