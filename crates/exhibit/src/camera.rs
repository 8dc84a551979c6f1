use serde::{Deserialize, Serialize};

/// Where the shared camera should sit for a slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub look_at: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
}

fn default_fov() -> f32 {
    60.0
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -10.0],
            look_at: [0.0; 3],
            fov: default_fov(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraEvent {
    Bound(usize),
    Released(usize),
}

/// The one camera every slide shares. At most one slide holds it at a time.
#[derive(Debug, Clone, Default)]
pub struct CameraRig {
    pose: CameraPose,
    holder: Option<usize>,
    history: Vec<CameraEvent>,
}

impl CameraRig {
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn holder(&self) -> Option<usize> {
        self.holder
    }

    /// Hand the camera to `slide`. Refused while another slide holds it.
    pub fn bind(&mut self, slide: usize) -> bool {
        match self.holder {
            Some(current) if current == slide => true,
            Some(current) => {
                log::warn!("camera is still bound to slide {current}, not binding slide {slide}");
                false
            }
            None => {
                self.holder = Some(slide);
                self.history.push(CameraEvent::Bound(slide));
                true
            }
        }
    }

    pub fn release(&mut self, slide: usize) {
        if self.holder == Some(slide) {
            self.holder = None;
            self.history.push(CameraEvent::Released(slide));
            log::debug!(
                "camera released by slide {slide} ({} bind/release events)",
                self.history.len()
            );
        }
    }

    fn apply(&mut self, pose: CameraPose) {
        self.pose = pose;
    }
}

/// Per-slide handle onto the shared [`CameraRig`].
#[derive(Debug, Clone)]
pub struct CameraBinding {
    pose: CameraPose,
    assigned: bool,
}

impl CameraBinding {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            assigned: false,
        }
    }

    /// Take the camera for `slide` and move it into this binding's pose.
    pub fn assign(&mut self, rig: &mut CameraRig, slide: usize) {
        if !rig.bind(slide) {
            return;
        }
        self.assigned = true;
        rig.apply(self.pose);
    }

    pub fn release(&mut self, rig: &mut CameraRig, slide: usize) {
        if self.assigned {
            rig.release(slide);
            self.assigned = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl CameraBinding {
        pub(crate) fn is_assigned(&self) -> bool {
            self.assigned
        }
    }

    impl CameraRig {
        pub(crate) fn history(&self) -> &[CameraEvent] {
            &self.history
        }
    }

    fn pose(z: f32) -> CameraPose {
        CameraPose {
            position: [0.0, 0.0, z],
            ..CameraPose::default()
        }
    }

    #[test]
    fn test_assign_moves_camera() {
        let mut rig = CameraRig::default();
        let mut binding = CameraBinding::new(pose(-3.0));
        binding.assign(&mut rig, 1);

        assert!(binding.is_assigned());
        assert_eq!(rig.holder(), Some(1));
        assert_eq!(rig.pose().position, [0.0, 0.0, -3.0]);
    }

    #[test]
    fn test_bind_refused_while_held() {
        let mut rig = CameraRig::default();
        let mut first = CameraBinding::new(pose(-1.0));
        let mut second = CameraBinding::new(pose(-2.0));

        first.assign(&mut rig, 0);
        second.assign(&mut rig, 1);

        assert!(!second.is_assigned());
        assert_eq!(rig.holder(), Some(0));
        assert_eq!(rig.pose().position[2], -1.0);
    }

    #[test]
    fn test_release_then_bind() {
        let mut rig = CameraRig::default();
        let mut first = CameraBinding::new(pose(-1.0));
        let mut second = CameraBinding::new(pose(-2.0));

        first.assign(&mut rig, 0);
        first.release(&mut rig, 0);
        second.assign(&mut rig, 1);

        assert_eq!(
            rig.history(),
            &[
                CameraEvent::Bound(0),
                CameraEvent::Released(0),
                CameraEvent::Bound(1)
            ]
        );
    }

    #[test]
    fn test_release_without_assign_is_noop() {
        let mut rig = CameraRig::default();
        let mut binding = CameraBinding::new(pose(-1.0));
        binding.release(&mut rig, 0);
        assert!(rig.history().is_empty());
    }
}
