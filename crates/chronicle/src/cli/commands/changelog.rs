//! Changelog command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info};

use chronicle_changelog::{
    Boundary, ChangelogGenerator, ChangelogOutput, ChangelogRules, MergeMode, RuleSetRegistry,
};
use chronicle_core::config::load_config_or_default;
use chronicle_core::error::GitError;
use chronicle_core::workflow::{read_changelog, write_changelog};
use chronicle_git::GitRepo;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Generate the changelog from commit history
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Print the generated changelog instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Only regenerate what the existing changelog is missing
    #[arg(long)]
    pub incremental: bool,

    /// Only consider commits after this revision (tag, branch or hash)
    #[arg(long, value_name = "REV")]
    pub start_rev: Option<String>,

    /// Changelog file (defaults to the configured file)
    #[arg(long, value_name = "PATH")]
    pub file_name: Option<PathBuf>,
}

/// A finished generation, not yet persisted
#[derive(Debug)]
pub struct ChangelogRun {
    /// Where the document belongs
    pub path: PathBuf,
    /// Generated content and merged document
    pub output: ChangelogOutput,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            dry_run = self.dry_run,
            incremental = self.incremental,
            start_rev = ?self.start_rev,
            "executing changelog command"
        );
        let root = cli.root()?;
        let run = self.run(&root, cli.rules.as_deref())?;

        if self.dry_run {
            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&run.output.releases)?);
                }
                OutputFormat::Text => print!("{}", run.output.content),
            }
            return Ok(());
        }

        write_changelog(&run.path, &run.output.document)?;

        match cli.format {
            OutputFormat::Json => {
                let summary = serde_json::json!({
                    "file": run.path,
                    "releases": run.output.releases,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Text if !cli.quiet => {
                output::success(&format!(
                    "Changelog written to {}",
                    output::path_style().apply_to(run.path.display())
                ));
            }
            OutputFormat::Text => {}
        }

        Ok(())
    }

    /// Generate the changelog for the project at `root` without writing it
    pub fn run(&self, root: &Path, rules_override: Option<&str>) -> anyhow::Result<ChangelogRun> {
        let (config, config_path) = load_config_or_default(root)?;
        debug!(config = ?config_path, "configuration resolved");

        let rules_name = rules_override.unwrap_or(&config.changelog.rules);
        let rules = ChangelogRules::resolve(rules_name, &config.changelog, &RuleSetRegistry::new())?;

        let repo = GitRepo::discover(root)?;
        let commits = match &self.start_rev {
            Some(rev) => repo.commits_since(rev)?,
            None => repo.all_commits()?,
        };
        if commits.is_empty() {
            return Err(GitError::NoCommits.into());
        }

        let boundaries: Vec<Boundary> = repo
            .release_tags(config.git.tag_pattern.as_deref())?
            .iter()
            .map(Boundary::from)
            .collect();

        let path = root.join(
            self.file_name
                .as_ref()
                .unwrap_or(&config.changelog.file),
        );

        let mode = if self.incremental || config.changelog.incremental {
            MergeMode::Incremental
        } else {
            MergeMode::Full
        };
        let existing = match mode {
            MergeMode::Incremental => read_changelog(&path)?,
            MergeMode::Full => None,
        };

        info!(
            commits = commits.len(),
            boundaries = boundaries.len(),
            path = %path.display(),
            ?mode,
            "generating changelog"
        );

        let generator =
            ChangelogGenerator::new(rules).with_date_format(&config.changelog.date_format);
        let output = generator.generate(&commits, &boundaries, existing.as_deref(), mode);

        Ok(ChangelogRun { path, output })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_core::error::{ChangelogError, ChronicleError};
    use clap::Parser;
    use git2::{Oid, Repository, Signature, Time};
    use tempfile::TempDir;

    // 2020-04-22T00:00:00Z
    const BASE_TIME: i64 = 1_587_513_600;

    struct Project {
        dir: TempDir,
        repo: Repository,
        clock: i64,
    }

    impl Project {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let repo = Repository::init(dir.path()).unwrap();
            Self {
                dir,
                repo,
                clock: 0,
            }
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }

        fn commit(&mut self, message: &str) -> Oid {
            self.clock += 60;
            let file = format!("file-{}.txt", self.clock);
            std::fs::write(self.root().join(&file), message).unwrap();

            let mut index = self.repo.index().unwrap();
            index.add_path(Path::new(&file)).unwrap();
            index.write().unwrap();
            let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();

            let sig =
                Signature::new("Test", "test@example.com", &Time::new(BASE_TIME + self.clock, 0))
                    .unwrap();
            let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
            let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
            self.repo
                .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
                .unwrap()
        }

        fn tag(&self, name: &str) {
            let head = self.repo.head().unwrap().peel_to_commit().unwrap();
            self.repo
                .tag_lightweight(name, head.as_object(), false)
                .unwrap();
        }

        fn write(&self, name: &str, content: &str) {
            std::fs::write(self.root().join(name), content).unwrap();
        }

        fn read(&self, name: &str) -> String {
            std::fs::read_to_string(self.root().join(name)).unwrap()
        }
    }

    fn command() -> ChangelogCommand {
        ChangelogCommand {
            dry_run: false,
            incremental: false,
            start_rev: None,
            file_name: None,
        }
    }

    fn incremental() -> ChangelogCommand {
        ChangelogCommand {
            incremental: true,
            ..command()
        }
    }

    fn persist(run: &ChangelogRun) {
        write_changelog(&run.path, &run.output.document).unwrap();
    }

    #[test]
    fn test_empty_repository_fails_with_no_commits() {
        let project = Project::new();
        let err = command().run(project.root(), None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GitError>(),
            Some(GitError::NoCommits)
        ));
    }

    #[test]
    fn test_unsupported_rule_set_is_fatal() {
        let mut project = Project::new();
        project.commit("feat: new file");
        let err = command().run(project.root(), Some("jira")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChronicleError>(),
            Some(ChronicleError::Changelog(ChangelogError::UnsupportedRuleSet(_)))
        ));
        assert_eq!(
            err.to_string(),
            "'jira' rule set does not support changelog"
        );
    }

    #[test]
    fn test_start_rev_dry_run() {
        let mut project = Project::new();
        project.commit("feat: new file");
        project.commit("refactor: not in changelog");
        project.tag("0.2.0");
        project.commit("feat: after 0.2.0");
        project.commit("feat: after 0.2");

        let cmd = ChangelogCommand {
            dry_run: true,
            start_rev: Some("0.2.0".to_string()),
            ..command()
        };
        let run = cmd.run(project.root(), None).unwrap();
        assert_eq!(
            run.output.content,
            "\n## Unreleased \n\n### Feat\n\n- after 0.2\n- after 0.2.0\n"
        );
    }

    #[test]
    fn test_unknown_start_rev() {
        let mut project = Project::new();
        project.commit("feat: new file");
        let cmd = ChangelogCommand {
            start_rev: Some("9.9.9".to_string()),
            ..command()
        };
        let err = cmd.run(project.root(), None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GitError>(),
            Some(GitError::RevisionNotFound(_))
        ));
    }

    #[test]
    fn test_full_history_skips_non_conventional() {
        let mut project = Project::new();
        project.commit("feat: new file");
        project.commit("refactor: is in changelog");
        project.commit("Merge into master");

        let run = command().run(project.root(), None).unwrap();
        assert_eq!(
            run.output.content,
            "\n## Unreleased \n\n### Refactor\n\n- is in changelog\n\n### Feat\n\n- new file\n"
        );
        assert_eq!(run.path, project.root().join("CHANGELOG.md"));
    }

    #[test]
    fn test_incremental_keeps_history_and_notes() {
        let mut project = Project::new();
        project.commit("feat: add new output");
        project.commit("fix: output glitch");
        project.commit("Merge into master");
        project.tag("0.2.0");

        persist(&command().run(project.root(), None).unwrap());
        let mut document = project.read("CHANGELOG.md");
        document.push_str("\nnote: this should be persisted using increment\n");
        project.write("CHANGELOG.md", &document);

        project.commit("fix: mama gotta work");
        project.commit("feat: add more stuff");
        project.commit("Merge into master");

        persist(&incremental().run(project.root(), None).unwrap());
        assert_eq!(
            project.read("CHANGELOG.md"),
            "\n\n## Unreleased \n\n### Feat\n\n- add more stuff\n\n### Fix\n\n- mama gotta work\n\n## 0.2.0 (2020-04-22)\n\n### Fix\n\n- output glitch\n\n### Feat\n\n- add new output\n\nnote: this should be persisted using increment\n"
        );
    }

    #[test]
    fn test_incremental_keep_a_changelog() {
        let mut project = Project::new();
        project.write(
            "CHANGELOG.md",
            "# Changelog\n\n## [Unreleased]\n\n## [1.0.0] - 2017-06-20\n### Added\n- Version navigation.\n",
        );
        project.commit("irrelevant commit");
        project.tag("1.0.0");
        project.commit("feat: add new output");
        project.commit("fix: output glitch");
        project.commit("fix: mama gotta work");
        project.commit("feat: add more stuff");
        project.commit("Merge into master");

        persist(&incremental().run(project.root(), None).unwrap());
        assert_eq!(
            project.read("CHANGELOG.md"),
            "# Changelog\n\n\n## Unreleased \n\n### Feat\n\n- add more stuff\n- add new output\n\n### Fix\n\n- mama gotta work\n- output glitch\n\n## [1.0.0] - 2017-06-20\n### Added\n- Version navigation.\n"
        );
    }

    #[test]
    fn test_incremental_angular_prerelease() {
        let angular = "# [10.0.0-next.3](https://github.com/angular/angular/compare/10.0.0-next.2...10.0.0-next.3) (2020-04-22)\n\n### Bug Fixes\n* **common:** format day-periods that cross midnight ([#36611](https://github.com/angular/angular/issues/36611)) ([c6e5fc4](https://github.com/angular/angular/commit/c6e5fc4)), closes [#36566](https://github.com/angular/angular/issues/36566)\n";

        let mut project = Project::new();
        project.write("CHANGELOG.md", angular);
        project.commit("irrelevant commit");
        project.tag("10.0.0-next.3");
        project.commit("feat: add new output");
        project.commit("fix: output glitch");
        project.commit("fix: mama gotta work");
        project.commit("feat: add more stuff");
        project.commit("Merge into master");

        let run = incremental().run(project.root(), None).unwrap();
        assert_eq!(run.output.releases.len(), 1);
        persist(&run);
        assert_eq!(
            project.read("CHANGELOG.md"),
            format!(
                "\n## Unreleased \n\n### Feat\n\n- add more stuff\n- add new output\n\n### Fix\n\n- mama gotta work\n- output glitch\n\n{}",
                angular
            )
        );
    }

    #[test]
    fn test_body_line_right_after_header_not_in_entry() {
        let mut project = Project::new();
        project.commit("feat: add thing\nBREAKING CHANGE: drops y");

        let run = command().run(project.root(), None).unwrap();
        assert_eq!(
            run.output.content,
            "\n## Unreleased \n\n### Feat\n\n- add thing\n"
        );
    }

    #[test]
    fn test_config_enables_incremental_and_custom_file() {
        let mut project = Project::new();
        project.write(
            "chronicle.toml",
            "[changelog]\nfile = \"docs/CHANGES.md\"\nincremental = true\n",
        );
        std::fs::create_dir_all(project.root().join("docs")).unwrap();
        project.write("docs/CHANGES.md", "# Changes\n");
        project.commit("feat: new file");

        let run = command().run(project.root(), None).unwrap();
        assert_eq!(run.path, project.root().join("docs/CHANGES.md"));
        assert_eq!(
            run.output.document,
            "# Changes\n\n## Unreleased \n\n### Feat\n\n- new file\n"
        );
    }

    #[test]
    fn test_execute_dry_run_writes_nothing() {
        let mut project = Project::new();
        project.commit("feat: new file");
        let root = project.root().to_str().unwrap();

        let cli = Cli::try_parse_from(["chronicle", "-C", root, "changelog", "--dry-run"]).unwrap();
        cli.execute().unwrap();
        assert!(!project.root().join("CHANGELOG.md").exists());

        let cli = Cli::try_parse_from(["chronicle", "-q", "-C", root, "changelog"]).unwrap();
        cli.execute().unwrap();
        assert_eq!(
            project.read("CHANGELOG.md"),
            "\n## Unreleased \n\n### Feat\n\n- new file\n"
        );
    }
}
