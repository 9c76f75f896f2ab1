//! Element-eraser occlusion.
//!
//! An element eraser does not paint anything. Instead, every earlier shape
//! that one of its points lands on is hidden for the whole render pass. The
//! resolver is stateless: visibility is recomputed from the ordered record
//! list on every pass and never persisted.


#[cfg(test)]
mod tests;

use crate::annotation::Annotation;
use crate::config::StatusConfig;
use crate::config::types::{
    CURVE_SAMPLE_STEP_RANGE, clamp_curve_sample_step, default_curve_sample_step,
};
use crate::draw::Shape;
use crate::util::Viewport;

pub use hit_test::{
    covers, is_in_box, is_in_ellipse_band, is_in_rect_band, is_near_curve, is_near_segment,
};

/// Computes per-annotation visibility for one pass.
#[derive(Debug, Clone)]
pub struct OcclusionResolver<'a> {
    statuses: &'a StatusConfig,
    curve_step: f64,
}

impl<'a> OcclusionResolver<'a> {
    pub fn new(statuses: &'a StatusConfig) -> Self {
        Self {
            statuses,
            curve_step: default_curve_sample_step(),
        }
    }

    /// Overrides the parameter step used to sample pencil curves.
    ///
    /// The step is clamped to 0.001-0.25, the same range the config accepts.
    pub fn with_curve_step(mut self, step: f64) -> Self {
        if !CURVE_SAMPLE_STEP_RANGE.contains(&step) {
            log::warn!("curve sample step {step} out of range, clamping to 0.001-0.25");
        }
        self.curve_step = clamp_curve_sample_step(step);
        self
    }

    pub fn curve_step(&self) -> f64 {
        self.curve_step
    }

    /// Returns one flag per annotation, in input order.
    ///
    /// Element erasers are always `false`. Any other entry is `false` only when
    /// a later element eraser covers it; shapes never hide each other otherwise.
    pub fn resolve(&self, annotations: &[Annotation], viewport: Viewport) -> Vec<bool> {
        let shapes: Vec<Option<Shape>> = annotations
            .iter()
            .map(|annotation| Shape::from_annotation(annotation, viewport, self.statuses))
            .collect();

        let mut visible = vec![true; annotations.len()];

        for (i, annotation) in annotations.iter().enumerate() {
            if !annotation.is_element_eraser() {
                continue;
            }
            visible[i] = false;

            let Some(Shape::ElementEraser { points }) = &shapes[i] else {
                log::debug!("element eraser {} has no points", annotation.id);
                continue;
            };

            for j in 0..i {
                if !visible[j] || annotations[j].is_element_eraser() {
                    continue;
                }
                let Some(target) = &shapes[j] else {
                    continue;
                };
                if points
                    .iter()
                    .any(|point| covers(target, *point, self.curve_step))
                {
                    log::trace!(
                        "element eraser {} hides annotation {}",
                        annotation.id,
                        annotations[j].id
                    );
                    visible[j] = false;
                }
            }
        }

        visible
    }
}

/// Convenience wrapper around [`OcclusionResolver::resolve`] with the default curve step.
pub fn compute_visibility(
    annotations: &[Annotation],
    viewport: Viewport,
    statuses: &StatusConfig,
) -> Vec<bool> {
    OcclusionResolver::new(statuses).resolve(annotations, viewport)
}
