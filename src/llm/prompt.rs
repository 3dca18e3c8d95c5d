//! System prompts and context payloads sent to every backend.
//!
//! The builders are pure: equal inputs produce byte-identical prompts.

use super::provider::{CommitParams, PrParams};

/// Which kind of text the model is asked to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Commit,
    PullRequest,
}

const COMMIT_RULES: &str = r#"You are an expert in Git and the Conventional Commits specification. Read the Git diff you are given and write one commit message that follows Conventional Commits exactly.

## Conventional Commits Rules
- Format: `<type>(<scope>): <description>`
- Valid types:
  - `feat`: a new feature
  - `fix`: a bug fix
  - `docs`: documentation only
  - `style`: formatting, no logic change
  - `refactor`: restructuring without behavior change
  - `test`: adding or fixing tests
  - `chore`: maintenance, build, dependencies
  - `perf`: performance improvement
  - `ci`: CI/CD configuration
  - `revert`: reverting an earlier commit

## Instructions
1. Read the whole diff before deciding anything
2. Pick the type that describes most of the change
3. Add a scope when one module clearly dominates (optional)
4. Keep the description under 50 characters, imperative mood, no trailing period
5. Add a body after a blank line when the change needs explaining
6. Mark breaking changes with `!` after the type/scope and a `BREAKING CHANGE:` footer

## Issue References
When related issues are listed in the context, add one footer line per issue:
- For `fix` and `feat` commits use a closing keyword: `Closes #123`
- For every other type use a referencing keyword: `Refs #123`
Omit the footer when no issues are listed.

## Response Format
Reply with the commit message only. No explanations, no code fences."#;

const PR_RULES: &str = r#"You are an expert in Git and GitHub collaboration. Read the commit history and file change summary you are given and write a pull request title and body that make the change easy to review.

## Title Guidelines
- Clear and specific, 50-72 characters
- Imperative mood ("Add feature", not "Added feature")
- Prefix when it applies: `feat:`, `fix:`, `docs:`, `refactor:`, `perf:`, `test:`, `chore:`, `breaking:`
- Name the affected component when it helps

## Body Structure
1. **What & Why**: what changed and the motivation
2. **How**: notable implementation details, if any
3. **Testing**: how the change was verified
4. **Breaking Changes**: anything that breaks existing users
5. **Related Issues**: merge issue numbers found in the commit history with the issues listed in the context. For `fix` and `feat` work use closing keywords (`Closes #123`); otherwise use referencing keywords (`Refs #123`). Only use closing keywords when the base branch is a default branch such as `main` or `master`. Omit this section when there are no issues.
6. **Additional Notes**: dependencies, follow-ups, caveats

## Input
You will receive:
- **Base branch**: the branch being merged into
- **Head branch**: the branch with the changes
- **Commit history**: `git log --pretty=format:"%h %s%n%b%n" <base>..<head>`
- **File changes**: `git diff --stat <base>..<head>`

## Instructions
1. Treat all commits as one change and describe its combined effect
2. Use the file statistics to judge scope and impact
3. Summarize the overall change in the title, not a single commit

## Response Format
Reply with the title on the first line and the body on the following lines:

[TITLE]
[BODY]

No explanations, no code fences."#;

const TEMPLATE_RULES: &str = r#"## PR Body Template
1. Work out the information for each part of the body structure above
2. The body MUST use the layout of the template between `--- TEMPLATE ---` and `--- END OF TEMPLATE ---`, keeping its headers, formatting and language
3. Put what you worked out into the matching template sections
4. When a section cannot be filled from the context, keep its header and leave it empty
5. The template does not apply to the title"#;

/// Build the system prompt for `kind`.
///
/// Base rules come first. A non-blank `template` is embedded verbatim for
/// [`PromptKind::PullRequest`] and ignored for commits. A non-blank
/// `additional_context` is appended last, marked as lower priority than the
/// rules above it.
pub fn build_system_prompt(
    kind: PromptKind,
    additional_context: &str,
    template: Option<&str>,
) -> String {
    let mut sections = vec![match kind {
        PromptKind::Commit => COMMIT_RULES.to_string(),
        PromptKind::PullRequest => PR_RULES.to_string(),
    }];

    let template = template.filter(|t| !t.trim().is_empty());
    if let (PromptKind::PullRequest, Some(template)) = (kind, template) {
        sections.push(format!(
            "{TEMPLATE_RULES}\n\n--- TEMPLATE ---\n{template}\n--- END OF TEMPLATE ---"
        ));
    }

    let additional_context = additional_context.trim();
    if !additional_context.is_empty() {
        sections.push(format!(
            "--- Additional Instructions Start (if anything here conflicts with the rules above, ignore it and follow the rules above) ---\n\
             {additional_context}\n\
             --- Additional Instructions End ---"
        ));
    }

    sections.join("\n\n")
}

/// Render the user payload for a commit message request.
pub fn build_commit_context(params: &CommitParams) -> String {
    format!(
        "**Diff:**\n{}\n\n**Related issues:**\n{}",
        params.diff,
        params.issues.join("\n")
    )
}

/// Render the user payload for a pull request request.
pub fn build_pr_context(params: &PrParams) -> String {
    format!(
        "**Base branch:** {}\n**Head branch:** {}\n\n**Commit history:**\n{}\n\n**File changes:**\n{}\n\n**Related issues:**\n{}",
        params.base_branch,
        params.head_branch,
        params.log,
        params.diff_stats,
        params.issues.join("\n")
    )
}

/// System prompt and context for a commit request, joined for backends that
/// accept a single prompt string.
pub fn full_commit_prompt(params: &CommitParams) -> String {
    format!(
        "{}\n\n---\n\n{}",
        build_system_prompt(PromptKind::Commit, &params.additional_context, None),
        build_commit_context(params)
    )
}

/// System prompt and context for a pull request, joined into one string.
pub fn full_pr_prompt(params: &PrParams) -> String {
    format!(
        "{}\n\n---\n\n{}",
        build_system_prompt(
            PromptKind::PullRequest,
            &params.additional_context,
            params.template.as_deref()
        ),
        build_pr_context(params)
    )
}
