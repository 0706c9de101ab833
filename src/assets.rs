//! Image registry and scale-to-fit placement.

use std::collections::{BTreeSet, HashMap};

use crate::model::ImageKey;

/// Loaded images keyed by folder/index. Filled once during preload, read-only after.
#[derive(Debug)]
pub struct AssetRegistry<T> {
    images: HashMap<ImageKey, T>,
    failed: BTreeSet<ImageKey>,
}

impl<T> Default for AssetRegistry<T> {
    fn default() -> Self {
        Self {
            images: HashMap::new(),
            failed: BTreeSet::new(),
        }
    }
}

impl<T> AssetRegistry<T> {
    pub fn insert(&mut self, key: ImageKey, image: T) {
        self.failed.remove(&key);
        self.images.insert(key, image);
    }

    /// A load failure drops the entry; later draws of that key are skipped.
    pub fn mark_failed(&mut self, key: &ImageKey) {
        log::error!("failed to load {}", key.path());
        self.images.remove(key);
        self.failed.insert(key.clone());
    }

    pub fn get(&self, key: &ImageKey) -> Option<&T> {
        self.images.get(key)
    }

    /// Records a lookup miss. True only for the first miss of a key that was
    /// neither loaded nor already known to have failed.
    pub fn note_missing(&mut self, key: &ImageKey) -> bool {
        !self.images.contains_key(key) && self.failed.insert(key.clone())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Largest rect with the image's aspect ratio that fits the surface, centered.
pub fn fit_rect(surface_w: f64, surface_h: f64, image_w: f64, image_h: f64) -> Option<Rect> {
    if image_w <= 0.0 || image_h <= 0.0 {
        return None;
    }
    let scale = (surface_w / image_w).min(surface_h / image_h);
    let w = image_w * scale;
    let h = image_h * scale;
    Some(Rect {
        x: (surface_w - w) / 2.0,
        y: (surface_h - h) / 2.0,
        w,
        h,
    })
}
