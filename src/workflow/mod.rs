//! The `commit` and `pr` flows: gather git input, generate text, hand the
//! result back to `git` or `gh`.
//!
//! ```text
//! commit:  diff(options) -> generate_commit_message -> git commit -em
//! pr:      branch/log/diff --stat/template -> generate_pr -> split -> gh pr create
//! ```

pub mod commit;
pub mod pr;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use commit::{CommitDraft, CommitRequest, prepare_commit, run_commit};
pub use pr::{PrRequest, prepare_pr, run_pr};

/// Spinner on stderr shown while a backend call is in flight.
fn spinner(message: &'static str) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.yellow} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
