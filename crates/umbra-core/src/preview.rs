//! Interactive preview: keeps an overlay up to date as analysis parameters
//! change and pushes each new rendering to subscribers.

use crate::buffer::{ImageBuffer, IntensityBuffer};
use crate::darkness::AnalysisResult;
use crate::error::Result;
use crate::highlight::{paint_regions, Overlay};
use crate::params::{AnalysisParams, Rgb};
use crate::regions::{extract_regions, filter_regions, Region};

/// Handle returned by [`PreviewSession::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// One rendering of the preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewUpdate {
    pub params: AnalysisParams,
    pub overlay: Overlay,
}

impl PreviewUpdate {
    pub fn analysis(&self) -> &AnalysisResult {
        &self.overlay.analysis
    }
}

type Subscriber = Box<dyn FnMut(&PreviewUpdate)>;

/// Unfiltered regions for one threshold
struct ExtractionCache {
    threshold: u8,
    regions: Vec<Region>,
}

/// Holds one image and the current parameters.
///
/// Every parameter change recomputes the overlay and notifies subscribers;
/// setting a parameter to its current value does nothing. Regions are
/// extracted once per threshold, so moving only the minimum area re-filters
/// the cached extraction.
pub struct PreviewSession {
    image: ImageBuffer,
    intensity: IntensityBuffer,
    color: Rgb,
    params: AnalysisParams,
    cache: Option<ExtractionCache>,
    current: PreviewUpdate,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl PreviewSession {
    pub fn new(image: ImageBuffer, params: AnalysisParams, color: Rgb) -> Self {
        let intensity = image.to_intensity();
        let placeholder = PreviewUpdate {
            params,
            overlay: Overlay {
                image: image.clone(),
                analysis: AnalysisResult::from_regions(&Default::default(), image.area()),
            },
        };

        let mut session = Self {
            image,
            intensity,
            color,
            params,
            cache: None,
            current: placeholder,
            subscribers: Vec::new(),
            next_id: 0,
        };
        session.current = session.render();
        session
    }

    pub fn params(&self) -> AnalysisParams {
        self.params
    }

    /// Latest rendering
    pub fn current(&self) -> &PreviewUpdate {
        &self.current
    }

    /// Register `callback` for future updates.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&PreviewUpdate) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Returns whether subscribers were notified.
    pub fn set_threshold(&mut self, threshold: i64) -> Result<bool> {
        let params = self.params.with_threshold(threshold)?;
        Ok(self.set_params(params))
    }

    /// Returns whether subscribers were notified.
    pub fn set_min_area(&mut self, min_area: f64) -> Result<bool> {
        let params = self.params.with_min_area(min_area)?;
        Ok(self.set_params(params))
    }

    /// Replace both parameters at once. Returns whether subscribers were
    /// notified.
    pub fn set_params(&mut self, params: AnalysisParams) -> bool {
        if params == self.params {
            return false;
        }
        self.params = params;
        self.refresh();
        true
    }

    /// Re-render with the current parameters and notify every subscriber.
    pub fn refresh(&mut self) {
        self.current = self.render();
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.current);
        }
    }

    fn render(&mut self) -> PreviewUpdate {
        let threshold = self.params.threshold();
        let stale = self
            .cache
            .as_ref()
            .map_or(true, |cache| cache.threshold != threshold);
        if stale {
            tracing::debug!(threshold, "extracting regions");
            self.cache = Some(ExtractionCache {
                threshold,
                regions: extract_regions(&self.intensity, threshold),
            });
        }

        let extracted = self
            .cache
            .as_ref()
            .map(|cache| cache.regions.as_slice())
            .unwrap_or_default();
        let regions = filter_regions(extracted, self.params.min_area());

        let mut image = self.image.clone();
        paint_regions(&mut image, &regions.regions, self.color);

        PreviewUpdate {
            params: self.params,
            overlay: Overlay {
                image,
                analysis: AnalysisResult::from_regions(&regions, self.image.area()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::highlight::render_overlay;
    use crate::params::DEFAULT_HIGHLIGHT_COLOR;

    fn blocks_image() -> ImageBuffer {
        // A 4x4 block (area 9) and a 10x10 block (area 81)
        let mut image = ImageBuffer::gray(40, 40, 200);
        for y in 0..40usize {
            for x in 0..40usize {
                let small = (2..6).contains(&x) && (2..6).contains(&y);
                let large = (20..30).contains(&x) && (20..30).contains(&y);
                if small || large {
                    image.data[y * 40 + x] = 10;
                }
            }
        }
        image
    }

    fn session() -> PreviewSession {
        let params = AnalysisParams::new(50, 0.0).unwrap();
        PreviewSession::new(blocks_image(), params, DEFAULT_HIGHLIGHT_COLOR)
    }

    #[test]
    fn test_initial_render_matches_overlay() {
        let session = session();
        let expected = render_overlay(&blocks_image(), &session.params(), DEFAULT_HIGHLIGHT_COLOR);
        assert_eq!(session.current().overlay, expected);
        assert_eq!(session.current().analysis().region_count, 2);
    }

    #[test]
    fn test_min_area_change_notifies_with_refiltered_result() {
        let mut session = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |update| sink.borrow_mut().push(update.analysis().region_count));

        assert!(session.set_min_area(20.0).unwrap());
        assert!(session.set_min_area(100.0).unwrap());
        assert_eq!(*seen.borrow(), vec![1, 0]);
    }

    #[test]
    fn test_unchanged_parameters_do_not_notify() {
        let mut session = session();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        session.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(!session.set_threshold(50).unwrap());
        assert!(!session.set_min_area(0.0).unwrap());
        assert_eq!(*count.borrow(), 0);

        assert!(session.set_threshold(5).unwrap());
        assert_eq!(*count.borrow(), 1);
        assert_eq!(session.current().analysis().region_count, 0);
    }

    #[test]
    fn test_invalid_update_is_rejected_and_state_kept() {
        let mut session = session();
        assert!(session.set_threshold(300).is_err());
        assert!(session.set_min_area(-1.0).is_err());
        assert_eq!(session.params().threshold(), 50);
        assert_eq!(session.params().min_area(), 0.0);
    }

    #[test]
    fn test_unsubscribe_stops_updates() {
        let mut session = session();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = session.subscribe(move |_| *sink.borrow_mut() += 1);

        session.refresh();
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.refresh();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_every_update_matches_fresh_render() {
        let mut session = session();
        let steps = [(50, 20.0), (120, 20.0), (120, 0.0), (5, 0.0), (50, 50.0)];
        for (threshold, min_area) in steps {
            let params = AnalysisParams::new(threshold, min_area).unwrap();
            session.set_params(params);
            let expected = render_overlay(&blocks_image(), &params, DEFAULT_HIGHLIGHT_COLOR);
            assert_eq!(session.current().overlay, expected);
            assert_eq!(session.current().params, params);
        }
    }
}
