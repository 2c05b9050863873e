use crate::task::TaskConfig;
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Progress Dialog - a demonstration of a modal progress dialog backed by a
/// cancellable background task
pub struct Settings {
    /// Number of work iterations per task run
    #[clap(long, default_value_t = 10)]
    pub steps: u32,

    /// Pause per iteration, in milliseconds
    #[clap(long, default_value_t = 2000)]
    pub step_millis: u64,
}

impl Settings {
    pub fn task_config(&self) -> TaskConfig {
        TaskConfig {
            steps: self.steps,
            step_delay: Duration::from_millis(self.step_millis),
        }
    }
}
