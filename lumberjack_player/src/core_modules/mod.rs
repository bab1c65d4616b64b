pub mod action_executor;
pub mod action_planner;
pub mod clock;
pub mod color;
pub mod frame;
pub mod frame_sampler;
pub mod geometry;
pub mod obstacle_detector;
pub mod pacer;
pub mod scan_region;
pub mod trace_writer;
pub mod utils;
