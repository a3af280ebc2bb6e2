/*
 * Debug Information Module
 *
 * Frame metrics and simulation readouts shown by the control panel and the
 * optional on-screen overlay.
 */

use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub fish_count: usize,
    pub boost: f64,
    pub boost_countdown: i64,
}
