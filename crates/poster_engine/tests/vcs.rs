mod common;

use std::path::Path;

use common::RecordingVcs;
use poster_engine::{commit_marker, CommitOutcome, VcsError};
use pretty_assertions::assert_eq;

#[test]
fn clean_tree_is_a_no_op() {
    let vcs = RecordingVcs::clean();
    let outcome = commit_marker(
        &vcs,
        Path::new("/work/.github/.lastPost.txt"),
        "bot@example.com",
        "Bot",
        "Update Last Post File",
    )
    .unwrap();

    assert_eq!(outcome, CommitOutcome::NothingToCommit);
    assert_eq!(
        vcs.calls(),
        vec!["config bot@example.com Bot", "status .lastPost.txt"]
    );
}

#[test]
fn changes_are_added_committed_and_pushed() {
    let vcs = RecordingVcs::with_changes();
    let outcome = commit_marker(
        &vcs,
        Path::new("/work/.github/.lastPost.txt"),
        "bot@example.com",
        "Bot",
        "Update Last Post File",
    )
    .unwrap();

    assert_eq!(outcome, CommitOutcome::Pushed);
    assert_eq!(
        vcs.calls(),
        vec![
            "config bot@example.com Bot",
            "status .lastPost.txt",
            "add .lastPost.txt",
            "commit Update Last Post File",
            "push",
        ]
    );
}

#[test]
fn push_failure_propagates() {
    let vcs = RecordingVcs {
        fail_push: true,
        ..RecordingVcs::with_changes()
    };
    let err = commit_marker(
        &vcs,
        Path::new(".lastPost.txt"),
        "bot@example.com",
        "Bot",
        "msg",
    )
    .unwrap_err();
    assert!(matches!(err, VcsError::Command { .. }));
    assert_eq!(vcs.calls().last().map(String::as_str), Some("push"));
}
