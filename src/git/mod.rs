//! Git and GitHub CLI access by shelling out to the installed binaries.

pub mod github;
pub mod options;
pub mod repo;
pub mod tool;

pub use github::{GitHubCli, OpenPrParams};
pub use options::{GitOption, compose};
pub use repo::{CommitFlag, Git};
pub use tool::{ExternalTool, RunMode};
