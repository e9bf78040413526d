pub mod notifier;
pub mod poll_loop;
pub mod retry;
pub mod selection;

pub use notifier::{AlertAction, AlertOutcome, NotificationController, NotifierState};
pub use poll_loop::{IterationReport, LoopExit, PollLoop, PollSettings};
pub use retry::{run_with_retry, RetryPolicy};
pub use selection::select_within;
