use git_rollback::error::{GitError, Result};
use git_rollback::git::{CommitInfo, RemoteInfo, VcsAdapter, WorkingTreeStatus};
use git_rollback::rollback::{
    Decision, Resolution, Rollback, RollbackAction, RollbackEvent, RollbackOptions,
    RollbackOutcome, RollbackOverrides, RunConfig, TargetOverrides, plan,
};
use std::cell::RefCell;

/// In-memory repository recording every call it receives
#[derive(Debug, Default)]
struct FakeVcs {
    remotes: Vec<&'static str>,
    branch: Option<&'static str>,
    local_log: Vec<CommitInfo>,
    remote_log: Vec<CommitInfo>,
    status: WorkingTreeStatus,
    fail_fetch: bool,
    fail_history_reset: bool,
    calls: RefCell<Vec<String>>,
}

impl FakeVcs {
    fn synced(hashes: &[&str], remote_head: &str) -> Self {
        Self {
            remotes: vec!["origin"],
            branch: Some("main"),
            local_log: commits(hashes),
            remote_log: commits(&[remote_head]),
            ..Default::default()
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with("reset"))
            .collect()
    }
}

impl VcsAdapter for FakeVcs {
    async fn get_remotes(&self) -> Result<Vec<RemoteInfo>> {
        self.record("remotes");
        Ok(self
            .remotes
            .iter()
            .map(|name| RemoteInfo {
                name: name.to_string(),
                fetch_url: format!("https://example.com/{}.git", name),
                push_url: format!("https://example.com/{}.git", name),
            })
            .collect())
    }

    async fn current_branch(&self) -> Result<Option<String>> {
        self.record("branch");
        Ok(self.branch.map(str::to_string))
    }

    async fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("fetch {} {}", remote, branch));
        if self.fail_fetch {
            return Err(GitError::CommandFailed {
                command: format!("fetch {} {}", remote, branch),
                reason: "unreachable".to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn recent_commits(&self, max_count: usize) -> Result<Vec<CommitInfo>> {
        self.record(format!("log HEAD {}", max_count));
        Ok(self.local_log.iter().take(max_count).cloned().collect())
    }

    async fn ref_commits(&self, reference: &str, max_count: usize) -> Result<Vec<CommitInfo>> {
        self.record(format!("log {} {}", reference, max_count));
        Ok(self.remote_log.iter().take(max_count).cloned().collect())
    }

    async fn status(&self) -> Result<WorkingTreeStatus> {
        self.record("status");
        Ok(self.status.clone())
    }

    async fn reset_to_commit(&self, revision: &str) -> Result<()> {
        self.record(format!("reset --hard {}", revision));
        if self.fail_history_reset {
            return Err(GitError::CommandFailed {
                command: format!("reset --hard {}", revision),
                reason: "index.lock exists".to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn reset_working_tree(&self) -> Result<()> {
        self.record("reset --hard");
        Ok(())
    }
}

fn commits(hashes: &[&str]) -> Vec<CommitInfo> {
    hashes
        .iter()
        .map(|hash| CommitInfo::new(*hash, format!("message {}", hash)))
        .collect()
}

fn dirty_status() -> WorkingTreeStatus {
    WorkingTreeStatus {
        modified: vec!["a.txt".to_string()],
        created: vec!["b.txt".to_string()],
        ..Default::default()
    }
}

fn forced() -> Rollback {
    Rollback::new(RollbackOverrides {
        force: Some(true),
        ..Default::default()
    })
}

#[tokio::test]
async fn test_history_ahead_schedules_reset_to_remote_head() {
    let vcs = FakeVcs::synced(&["c5", "c4", "c3", "c2", "c1"], "c3");
    let mut events: Vec<RollbackEvent> = Vec::new();

    let plan = plan(&vcs, &RollbackOptions::default(), &mut events)
        .await
        .unwrap();

    assert_eq!(
        plan.actions().collect::<Vec<_>>(),
        vec![&RollbackAction::HistoryReset {
            target_hash: "c3".to_string()
        }]
    );
    assert_eq!(
        plan.confirmations().collect::<Vec<_>>(),
        vec!["Rolling back 2 commits:\n  message c5\n  message c4"]
    );
    assert_eq!(
        vcs.calls(),
        vec![
            "remotes",
            "branch",
            "fetch origin main",
            "log HEAD 100",
            "log origin/main 1",
            "status"
        ]
    );
    assert!(events.contains(&RollbackEvent::CleanWorkingTree));
}

#[tokio::test]
async fn test_dirty_files_flattened_in_category_order() {
    let vcs = FakeVcs {
        status: dirty_status(),
        ..Default::default()
    };
    let options = RollbackOptions::merged(RollbackOverrides {
        rollback: Some(TargetOverrides {
            history: Some(false),
            working_tree: None,
        }),
        ..Default::default()
    });

    let plan = plan(&vcs, &options, &mut Vec::<RollbackEvent>::new()).await.unwrap();

    assert_eq!(plan.len(), 1);
    assert_eq!(plan.steps()[0].action, RollbackAction::WorkingTreeReset);
    // created comes before modified
    assert_eq!(plan.steps()[0].confirmation, "Rolling back 2 files:\n  b.txt\n  a.txt");
    assert_eq!(vcs.calls(), vec!["status"]);
}

#[tokio::test]
async fn test_history_step_precedes_working_tree_step() {
    let vcs = FakeVcs {
        status: dirty_status(),
        ..FakeVcs::synced(&["c2", "c1"], "c1")
    };

    let plan = plan(&vcs, &RollbackOptions::default(), &mut Vec::<RollbackEvent>::new())
        .await
        .unwrap();

    let actions: Vec<_> = plan.actions().cloned().collect();
    assert_eq!(
        actions,
        vec![
            RollbackAction::HistoryReset {
                target_hash: "c1".to_string()
            },
            RollbackAction::WorkingTreeReset
        ]
    );
}

#[tokio::test]
async fn test_missing_remote_skips_history() {
    let vcs = FakeVcs {
        remotes: vec!["upstream"],
        ..FakeVcs::synced(&["c2", "c1"], "c1")
    };
    let mut events: Vec<RollbackEvent> = Vec::new();

    let outcome = forced().run(&vcs, RunConfig::default(), &mut events).await.unwrap();

    assert_eq!(outcome, RollbackOutcome::NothingToRollBack);
    assert_eq!(
        events,
        vec![
            RollbackEvent::RemoteNotFound {
                remote: "origin".to_string(),
                branch: Some("main".to_string())
            },
            RollbackEvent::CleanWorkingTree,
            RollbackEvent::NothingToRollBack,
        ]
    );
    assert!(!vcs.calls().iter().any(|call| call.starts_with("fetch")));
}

#[tokio::test]
async fn test_detached_head_skips_history() {
    let vcs = FakeVcs {
        branch: None,
        ..FakeVcs::synced(&["c2", "c1"], "c1")
    };
    let mut events: Vec<RollbackEvent> = Vec::new();

    Rollback::default()
        .run(&vcs, RunConfig::default(), &mut events)
        .await
        .unwrap();

    assert_eq!(
        events[0],
        RollbackEvent::RemoteNotFound {
            remote: "origin".to_string(),
            branch: None
        }
    );
}

#[tokio::test]
async fn test_custom_remote_is_fetched() {
    let vcs = FakeVcs {
        remotes: vec!["origin", "upstream"],
        ..FakeVcs::synced(&["c1"], "c1")
    };
    let rollback = Rollback::new(RollbackOverrides {
        remote: Some("upstream".to_string()),
        ..Default::default()
    });

    rollback
        .run(&vcs, RunConfig::default(), &mut Vec::<RollbackEvent>::new())
        .await
        .unwrap();

    assert!(vcs.calls().contains(&"fetch upstream main".to_string()));
    assert!(vcs.calls().contains(&"log upstream/main 1".to_string()));
}

#[tokio::test]
async fn test_empty_logs_report_distinct_skips() {
    let no_local = FakeVcs::synced(&[], "c1");
    let mut events: Vec<RollbackEvent> = Vec::new();
    Rollback::default()
        .run(&no_local, RunConfig::default(), &mut events)
        .await
        .unwrap();
    assert!(events.contains(&RollbackEvent::NoLocalCommits));

    let no_remote = FakeVcs {
        remote_log: Vec::new(),
        ..FakeVcs::synced(&["c1"], "c1")
    };
    let mut events: Vec<RollbackEvent> = Vec::new();
    Rollback::default()
        .run(&no_remote, RunConfig::default(), &mut events)
        .await
        .unwrap();
    assert!(events.contains(&RollbackEvent::NoRemoteCommits {
        remote_ref: "origin/main".to_string()
    }));
}

#[tokio::test]
async fn test_in_sync_history_schedules_nothing() {
    let vcs = FakeVcs::synced(&["c3", "c2", "c1"], "c3");
    let mut events: Vec<RollbackEvent> = Vec::new();

    let outcome = forced().run(&vcs, RunConfig::default(), &mut events).await.unwrap();

    assert_eq!(outcome, RollbackOutcome::NothingToRollBack);
    assert!(events.contains(&RollbackEvent::NoCommitsToRollBack));
    assert!(vcs.mutating_calls().is_empty());
}

#[tokio::test]
async fn test_remote_head_outside_window_skips_with_warning() {
    let vcs = FakeVcs::synced(&["c3", "c2", "c1"], "r1");
    let mut events: Vec<RollbackEvent> = Vec::new();

    let outcome = forced().run(&vcs, RunConfig::default(), &mut events).await.unwrap();

    assert_eq!(outcome, RollbackOutcome::NothingToRollBack);
    assert!(events.contains(&RollbackEvent::RemoteCommitNotFound {
        remote_ref: "origin/main".to_string(),
        hash: "r1".to_string(),
        window: 3,
    }));
    assert!(vcs.mutating_calls().is_empty());
}

#[tokio::test]
async fn test_history_window_limits_search() {
    let vcs = FakeVcs::synced(&["c4", "c3", "c2", "c1"], "c1");
    let rollback = Rollback::new(RollbackOverrides {
        max_history: Some(2),
        force: Some(true),
        ..Default::default()
    });
    let mut events: Vec<RollbackEvent> = Vec::new();

    rollback.run(&vcs, RunConfig::default(), &mut events).await.unwrap();

    assert!(vcs.calls().contains(&"log HEAD 2".to_string()));
    assert!(events.iter().any(|event| matches!(
        event,
        RollbackEvent::RemoteCommitNotFound { window: 2, .. }
    )));
}

#[tokio::test]
async fn test_both_rollbacks_disabled_never_touches_repo() {
    let vcs = FakeVcs {
        status: dirty_status(),
        ..FakeVcs::synced(&["c2", "c1"], "c1")
    };
    let rollback = Rollback::new(RollbackOverrides {
        rollback: Some(TargetOverrides {
            working_tree: Some(false),
            history: Some(false),
        }),
        force: Some(true),
        ..Default::default()
    });
    let mut events: Vec<RollbackEvent> = Vec::new();

    let outcome = rollback.run(&vcs, RunConfig::default(), &mut events).await.unwrap();

    assert_eq!(outcome, RollbackOutcome::NothingToRollBack);
    assert_eq!(events, vec![RollbackEvent::NothingToRollBack]);
    assert!(vcs.calls().is_empty());
}

#[tokio::test]
async fn test_dry_run_reports_without_mutating() {
    let vcs = FakeVcs {
        status: dirty_status(),
        ..FakeVcs::synced(&["c2", "c1"], "c1")
    };
    let mut events: Vec<RollbackEvent> = Vec::new();

    let outcome = forced().run(&vcs, RunConfig { dry: true }, &mut events).await.unwrap();

    let summary = "Rolling back 1 commits:\n  message c2\nRolling back 2 files:\n  b.txt\n  a.txt";
    assert_eq!(
        outcome,
        RollbackOutcome::DryRun {
            summary: summary.to_string()
        }
    );
    assert_eq!(
        events.last(),
        Some(&RollbackEvent::DryRun {
            summary: summary.to_string()
        })
    );
    assert!(vcs.mutating_calls().is_empty());
}

#[tokio::test]
async fn test_forced_run_executes_in_order() {
    let vcs = FakeVcs {
        status: dirty_status(),
        ..FakeVcs::synced(&["c5", "c4", "c3"], "c3")
    };
    let mut events: Vec<RollbackEvent> = Vec::new();

    let outcome = forced().run(&vcs, RunConfig::default(), &mut events).await.unwrap();

    let RollbackOutcome::Executed(report) = outcome else {
        panic!("expected execution, got {:?}", outcome);
    };
    assert_eq!(report.actions.len(), 2);
    assert_eq!(vcs.mutating_calls(), vec!["reset --hard c3", "reset --hard"]);
    assert_eq!(
        events[events.len() - 5..],
        [
            RollbackEvent::RollingBackHistory {
                hash: "c3".to_string()
            },
            RollbackEvent::HistoryRolledBack {
                hash: "c3".to_string()
            },
            RollbackEvent::RollingBackWorkingTree,
            RollbackEvent::WorkingTreeRolledBack,
            RollbackEvent::RollbackPerformed,
        ]
    );
}

#[tokio::test]
async fn test_confirmation_required_without_force() {
    let vcs = FakeVcs {
        status: dirty_status(),
        ..Default::default()
    };
    let mut events: Vec<RollbackEvent> = Vec::new();

    let outcome = Rollback::default()
        .run(&vcs, RunConfig::default(), &mut events)
        .await
        .unwrap();

    let RollbackOutcome::AwaitingConfirmation(pending) = outcome else {
        panic!("expected confirmation request, got {:?}", outcome);
    };
    assert_eq!(
        pending.prompt(),
        "Rolling back 2 files:\n  b.txt\n  a.txt\nPress enter to confirm:"
    );
    assert!(vcs.mutating_calls().is_empty());

    let resolution = pending
        .resume(&vcs, Decision::Confirm, &mut events)
        .await
        .unwrap();

    assert!(matches!(resolution, Resolution::Executed(_)));
    assert_eq!(vcs.mutating_calls(), vec!["reset --hard"]);
    assert_eq!(events.last(), Some(&RollbackEvent::RollbackPerformed));
}

#[tokio::test]
async fn test_declined_confirmation_executes_nothing() {
    let vcs = FakeVcs {
        status: dirty_status(),
        ..Default::default()
    };
    let mut events: Vec<RollbackEvent> = Vec::new();

    let RollbackOutcome::AwaitingConfirmation(pending) = Rollback::default()
        .run(&vcs, RunConfig::default(), &mut events)
        .await
        .unwrap()
    else {
        panic!("expected confirmation request");
    };

    let resolution = pending
        .resume(&vcs, Decision::Decline, &mut events)
        .await
        .unwrap();

    assert_eq!(resolution, Resolution::Declined);
    assert!(vcs.mutating_calls().is_empty());
    assert_eq!(events.last(), Some(&RollbackEvent::ConfirmationDeclined));
}

#[tokio::test]
async fn test_fetch_failure_aborts_run() {
    let vcs = FakeVcs {
        fail_fetch: true,
        status: dirty_status(),
        ..FakeVcs::synced(&["c2", "c1"], "c1")
    };

    let err = forced()
        .run(&vcs, RunConfig::default(), &mut Vec::<RollbackEvent>::new())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("unreachable"));
    assert!(vcs.mutating_calls().is_empty());
    assert!(!vcs.calls().contains(&"status".to_string()));
}

#[tokio::test]
async fn test_failed_action_stops_remaining_actions() {
    let vcs = FakeVcs {
        fail_history_reset: true,
        status: dirty_status(),
        ..FakeVcs::synced(&["c2", "c1"], "c1")
    };
    let mut events: Vec<RollbackEvent> = Vec::new();

    let err = forced()
        .run(&vcs, RunConfig::default(), &mut events)
        .await
        .unwrap_err();

    assert!(err.may_have_mutated());
    assert_eq!(vcs.mutating_calls(), vec!["reset --hard c1"]);
    assert!(!events.contains(&RollbackEvent::RollbackPerformed));
}
