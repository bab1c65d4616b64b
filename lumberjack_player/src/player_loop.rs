// THEORY:
// The `player_loop` module is the top-level API of the player. It wires the
// sampler, detector, planner, executor, pacer and trace writer into a single
// synchronous loop. Each stage runs to completion before the next one starts:
//
//     sample -> detect -> plan -> execute -> trace -> pace
//
// The loop owns all mutable state (the executor's recorded direction and the
// pacer's schedule). Nothing is global, so a loop built from scripted screen,
// keyboard and clock implementations can be driven step by step in tests.

use crate::config::PlayerConfig;
use crate::core_modules::action_executor::{ActionExecutor, Execution, KeyEmitter, PlannerState};
use crate::core_modules::action_planner::{Action, plan_for};
use crate::core_modules::clock::Clock;
use crate::core_modules::frame_sampler::{FrameSampler, ScreenSource};
use crate::core_modules::obstacle_detector::{Detection, ObstacleDetector};
use crate::core_modules::pacer::Pacer;
use crate::core_modules::scan_region::Side;
use crate::core_modules::trace_writer::TraceWriter;
use crate::error::Result;
use tracing::{debug, info};

/// What happened during one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub detection: Detection,
    pub execution: Execution,
    /// Time spent from capture to the end of tracing.
    pub elapsed_ms: u64,
    /// Time the pacer slept afterwards.
    pub paced_ms: u64,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub iterations: u64,
    pub moves_left: u64,
    pub moves_right: u64,
    pub continues: u64,
    pub reversals: u64,
}

impl RunSummary {
    fn record(&mut self, report: &StepReport) {
        self.iterations += 1;
        match report.execution.action {
            Action::MoveLeft => self.moves_left += 1,
            Action::MoveRight => self.moves_right += 1,
            Action::Continue => self.continues += 1,
        }
        if report.execution.reversed {
            self.reversals += 1;
        }
    }
}

/// The single controller that owns every stage of the loop.
pub struct PlayerLoop<S, K, C> {
    sampler: FrameSampler<S>,
    detector: ObstacleDetector,
    executor: ActionExecutor<K, C>,
    pacer: Pacer<C>,
    trace: TraceWriter,
    clock: C,
    iterations: u64,
}

impl<S, K, C> PlayerLoop<S, K, C>
where
    S: ScreenSource,
    K: KeyEmitter,
    C: Clock + Clone,
{
    pub fn new(config: &PlayerConfig, screen: S, keys: K, clock: C) -> Result<Self> {
        config.validate()?;
        let trace = TraceWriter::new(config.trace_dir.clone(), config.log_images)?;
        Ok(Self {
            sampler: FrameSampler::new(screen, config.capture_area),
            detector: ObstacleDetector::new(
                config.left_region,
                config.right_region,
                config.target_color,
            ),
            executor: ActionExecutor::new(keys, clock.clone(), config.nap_if_change_direction),
            pacer: Pacer::new(clock.clone(), config.fps)?,
            trace,
            clock,
            iterations: config.iterations,
        })
    }

    pub fn planner_state(&self) -> PlannerState {
        self.executor.state()
    }

    pub fn keys(&self) -> &K {
        self.executor.keys()
    }

    /// Runs one full iteration, including the pacing delay.
    pub fn step(&mut self) -> Result<StepReport> {
        let started = self.clock.now_millis();

        let frame = self.sampler.sample()?;
        let detection = self.detector.detect(&frame);
        for side in [Side::Left, Side::Right] {
            if let Some(point) = detection.on(side) {
                self.trace
                    .record_found(&frame, point, self.clock.epoch_millis());
            }
        }

        let action = plan_for(&detection);
        let execution = self.executor.execute(action)?;
        self.trace
            .record_step(&frame, action, self.clock.epoch_millis());

        let elapsed_ms = self.clock.now_millis().saturating_sub(started);
        debug!(
            left = detection.obstacle_left(),
            right = detection.obstacle_right(),
            %action,
            emitted = %execution.emitted,
            elapsed_ms,
            "step done"
        );

        let paced_ms = self.pacer.throttle();
        Ok(StepReport {
            detection,
            execution,
            elapsed_ms,
            paced_ms,
        })
    }

    /// Runs the configured number of iterations, or forever when that number is
    /// zero. The first capture or input failure ends the run.
    pub fn run(&mut self) -> Result<RunSummary> {
        info!(
            area = %self.sampler.area(),
            target = %self.detector.target(),
            iterations = self.iterations,
            tracing_images = self.trace.is_enabled(),
            "starting player loop"
        );

        let mut summary = RunSummary::default();
        while self.iterations == 0 || summary.iterations < self.iterations {
            let report = self.step()?;
            summary.record(&report);
        }

        info!(
            iterations = summary.iterations,
            moves_left = summary.moves_left,
            moves_right = summary.moves_right,
            continues = summary.continues,
            reversals = summary.reversals,
            "player loop finished"
        );
        Ok(summary)
    }
}
