#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `apply` command: rc file creation, managed
//! block replacement, backups and dry runs.

mod common;

use std::fs;

use common::{IntegrationTestContext, TWO_PROFILES, capture, quiet_logger};
use gpx_cli::cli::ApplyOpts;
use gpx_cli::commands;

fn opts(ctx: &IntegrationTestContext, profile: &str) -> ApplyOpts {
    ApplyOpts {
        profile: profile.to_string(),
        rc: Some(ctx.rc_path()),
        shell: "zsh".to_string(),
        dry_run: false,
        backup: false,
    }
}

fn apply(ctx: &IntegrationTestContext, opts: &ApplyOpts) -> String {
    let mgr = ctx.manager();
    let log = quiet_logger();
    capture(|out| commands::apply::run(&mgr, opts, out, &log))
}

fn backups(ctx: &IntegrationTestContext) -> Vec<String> {
    fs::read_dir(ctx.root_path())
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(".zshrc.gpx.") && name.ends_with(".bak"))
        .collect()
}

// ---------------------------------------------------------------------------
// Snapshot: managed block in an existing rc file
// ---------------------------------------------------------------------------

/// Snapshot of an rc file after applying two different profiles in turn.
///
/// User content on either side of the block must survive and only one block
/// may exist at the end.
#[test]
fn apply_replaces_block_between_user_content() {
    let ctx = IntegrationTestContext::with_config(TWO_PROFILES);
    fs::write(ctx.rc_path(), "export PATH=\"$HOME/bin:$PATH\"\n").unwrap();

    apply(&ctx, &opts(&ctx, "public"));
    fs::write(
        ctx.rc_path(),
        fs::read_to_string(ctx.rc_path()).unwrap() + "alias ll='ls -la'\n",
    )
    .unwrap();
    apply(&ctx, &opts(&ctx, "corp"));

    let content = fs::read_to_string(ctx.rc_path()).unwrap();
    insta::assert_snapshot!("apply_replaces_block", content);
}

// ---------------------------------------------------------------------------
// Behaviour
// ---------------------------------------------------------------------------

#[test]
fn apply_creates_rc_and_reports_next_step() {
    let ctx = IntegrationTestContext::with_config(TWO_PROFILES);
    let text = apply(&ctx, &opts(&ctx, "public"));
    let rc = ctx.rc_path().display().to_string();
    assert_eq!(
        text,
        format!("Applied profile \"public\" to {rc}\nNext: source {rc} (or restart shell)\n")
    );
    assert_eq!(
        fs::read_to_string(ctx.rc_path()).unwrap(),
        "# GPX_BEGIN\nexport GOPROXY='https://proxy.golang.org,direct'\n# GPX_END\n"
    );
    assert_eq!(ctx.active_profile().as_deref(), Some("public"));
    assert!(backups(&ctx).is_empty());
}

#[test]
fn apply_twice_is_idempotent() {
    let ctx = IntegrationTestContext::with_config(TWO_PROFILES);
    fs::write(ctx.rc_path(), "# mine\n").unwrap();
    apply(&ctx, &opts(&ctx, "corp"));
    let once = fs::read_to_string(ctx.rc_path()).unwrap();
    apply(&ctx, &opts(&ctx, "corp"));
    assert_eq!(fs::read_to_string(ctx.rc_path()).unwrap(), once);
}

#[test]
fn apply_with_backup_copies_previous_content() {
    let ctx = IntegrationTestContext::with_config(TWO_PROFILES);
    fs::write(ctx.rc_path(), "# original\n").unwrap();
    let mut o = opts(&ctx, "corp");
    o.backup = true;

    let text = apply(&ctx, &o);
    let found = backups(&ctx);
    assert_eq!(found.len(), 1, "got: {found:?}");
    let backup = ctx.root_path().join(&found[0]);
    assert_eq!(fs::read_to_string(&backup).unwrap(), "# original\n");
    assert!(
        text.contains(&format!("Backup: {}\n", backup.display())),
        "got: {text}"
    );
}

#[test]
fn apply_backup_skipped_when_rc_missing() {
    let ctx = IntegrationTestContext::with_config(TWO_PROFILES);
    let mut o = opts(&ctx, "corp");
    o.backup = true;
    let text = apply(&ctx, &o);
    assert!(!text.contains("Backup:"), "got: {text}");
    assert!(backups(&ctx).is_empty());
}

#[test]
fn dry_run_prints_content_and_writes_nothing() {
    let ctx = IntegrationTestContext::with_config(TWO_PROFILES);
    fs::write(ctx.rc_path(), "# original\n").unwrap();
    let mut o = opts(&ctx, "public");
    o.dry_run = true;
    o.backup = true;

    let text = apply(&ctx, &o);
    assert_eq!(
        text,
        "# original\n\n# GPX_BEGIN\nexport GOPROXY='https://proxy.golang.org,direct'\n# GPX_END\n"
    );
    assert_eq!(fs::read_to_string(ctx.rc_path()).unwrap(), "# original\n");
    assert!(backups(&ctx).is_empty());
    // Even a dry run records the profile as last used.
    assert_eq!(ctx.active_profile().as_deref(), Some("public"));
}

#[test]
fn apply_unknown_profile_leaves_rc_alone() {
    let ctx = IntegrationTestContext::with_config(TWO_PROFILES);
    fs::write(ctx.rc_path(), "# original\n").unwrap();
    let mgr = ctx.manager();
    let log = quiet_logger();
    let mut out = Vec::new();
    let err = commands::apply::run(&mgr, &opts(&ctx, "staging"), &mut out, &log).unwrap_err();
    assert!(err.to_string().contains("staging"), "got: {err}");
    assert!(out.is_empty());
    assert_eq!(fs::read_to_string(ctx.rc_path()).unwrap(), "# original\n");
}

#[test]
fn apply_rejects_unsupported_shell_without_rc() {
    let ctx = IntegrationTestContext::with_config(TWO_PROFILES);
    let mut o = opts(&ctx, "corp");
    o.rc = None;
    o.shell = "fish".to_string();
    let mgr = ctx.manager();
    let log = quiet_logger();
    let mut out = Vec::new();
    let err = commands::apply::run(&mgr, &o, &mut out, &log).unwrap_err();
    assert!(err.to_string().contains("unsupported shell"), "got: {err}");
}
