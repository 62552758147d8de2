pub mod assignment;
pub mod bbox;
pub mod config;
pub mod detection;
pub mod error;
pub mod frame;
pub mod math;
pub mod motion;
pub mod record;
pub mod scene;

mod track;

pub use bbox::{Point, Rect};
pub use config::TrackerConfig;
pub use detection::{Detection, RawDetection};
pub use frame::Frame;
pub use record::{TrackHandle, TrackRecord};
pub use scene::Scene;
pub use track::Track;

use error::Error;
use std::collections::HashMap;
use std::rc::Rc;

pub trait Tracking {
    fn update(&mut self, frames: &[Frame], src: &str) -> Result<(), error::Error>;
    fn tracks(&self, src: &str) -> Rc<[Track]>;
}

/// IOU tracker keeping a separate scene for every video source
pub struct IouTracker {
    config: TrackerConfig,
    scenes: HashMap<String, Scene>,
}

impl IouTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            scenes: HashMap::new(),
        }
    }

    #[inline]
    pub fn scene(&self, src: &str) -> Option<&Scene> {
        self.scenes.get(src)
    }

    pub fn remove_source(&mut self, src: &str) -> Option<Scene> {
        self.scenes.remove(src)
    }

    #[inline]
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }
}

impl Default for IouTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl crate::Tracking for IouTracker {
    fn update(&mut self, frames: &[Frame], src: &str) -> Result<(), Error> {
        let mut frames = frames.iter();

        // a source only gets a scene once one of its frames was accepted
        if !self.scenes.contains_key(src) {
            let Some(first) = frames.next() else {
                return Ok(());
            };

            let mut scene = Scene::new(self.config.clone());
            scene.track_frame(first)?;

            log::debug!("new source {}", src);
            self.scenes.insert(src.to_string(), scene);
        }

        let Some(scene) = self.scenes.get_mut(src) else {
            return Ok(());
        };

        for frame in frames {
            scene.track_frame(frame)?;
        }

        Ok(())
    }

    #[inline]
    fn tracks(&self, src: &str) -> Rc<[Track]> {
        if let Some(scene) = self.scenes.get(src) {
            return scene.tracks().into_boxed_slice().into();
        }

        Rc::new([])
    }
}
