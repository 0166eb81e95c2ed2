//! Per-sample debug capture, enabled with the `debug` feature.

use crate::math::Point2d;
#[cfg(feature = "debug")]
use serde_json::json;

#[cfg(feature = "debug")]
thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

#[allow(unused)]
pub(crate) fn debug_sample(index: usize, t: f64, position: Point2d, heading: f64) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "sample",
            "index": index,
            "t": t,
            "point": [position.x, position.y],
            "heading": heading,
        }))
    })
}

#[allow(unused)]
pub(crate) fn debug_speeds(index: usize, linear_speed: f64, angular_speed: f64) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "speeds",
            "index": index,
            "linear": linear_speed,
            "angular": angular_speed,
        }))
    })
}

/// Takes everything recorded on this thread since the last call.
#[cfg(feature = "debug")]
pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
