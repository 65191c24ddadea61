//! Share, section and service operations over a temporary configuration

mod common;

use std::collections::BTreeMap;

use common::Harness;
use pretty_assertions::assert_eq;
use share_acl::{AclStep, RecordingAclBackend};
use share_conf::{PrincipalKind, Section};
use share_core::{Error, StatusClass};
use share_test_utils::TestConf;

#[test]
fn test_list_shares_excludes_reserved_sections() {
    let h = Harness::new();

    let shares = h.ctx.list_shares().unwrap();

    assert_eq!(shares.keys().collect::<Vec<_>>(), vec!["media", "scratch"]);
    assert_eq!(shares["media"].get("valid users"), Some("@family"));
}

#[test]
fn test_get_share_rejects_reserved_and_missing() {
    let h = Harness::new();

    for name in ["global", "printers", "nope"] {
        let err = h.ctx.get_share(name).unwrap_err();
        assert_eq!(err.status_class(), StatusClass::NotFound, "{name}");
    }
    assert_eq!(h.ctx.get_share("scratch").unwrap().path(), Some("/srv/scratch"));
}

#[test]
fn test_preview_upsert_does_not_write() {
    let h = Harness::new();
    let before = h.conf.read_conf();
    let share = Section::new().with("path", "/srv/docs");

    let preview = h.ctx.preview_upsert("docs", &share).unwrap();

    assert_eq!(preview.before, before);
    assert!(preview.after.ends_with("\n[docs]\n    path = /srv/docs\n"));
    assert!(!preview.is_unchanged());
    assert_eq!(h.conf.read_conf(), before);
    assert_eq!(h.reloads(), 0);
}

#[test]
fn test_delete_share_drops_block_and_reloads() {
    let h = Harness::new();

    h.ctx.delete_share("media").unwrap();

    h.conf.assert_conf_not_contains("[media]");
    h.conf.assert_conf_not_contains("/data/media");
    h.conf.assert_conf_contains("# media library, managed by hand\n[scratch]\n");
    assert_eq!(h.reloads(), 1);
}

#[test]
fn test_delete_missing_share_is_not_found() {
    let h = Harness::new();
    let before = h.conf.read_conf();

    let err = h.ctx.delete_share("ghost").unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(h.conf.read_conf(), before);
    assert_eq!(h.reloads(), 0);
}

#[test]
fn test_delete_reserved_section_is_rejected() {
    let h = Harness::new();

    let err = h.ctx.delete_share("global").unwrap_err();

    assert_eq!(err.status_class(), StatusClass::BadRequest);
    h.conf.assert_conf_contains("[global]");
}

#[test]
fn test_preview_delete_shows_removal() {
    let h = Harness::new();

    let preview = h.ctx.preview_delete("scratch").unwrap();

    assert!(preview.before.contains("[scratch]"));
    assert!(!preview.after.contains("[scratch]"));
    h.conf.assert_conf_contains("[scratch]");
}

#[test]
fn test_update_global_section_keeps_shares() {
    let h = Harness::new();
    let global = Section::new()
        .with("workgroup", "HOME")
        .with("server string", "%h server (Samba)");

    h.ctx.update_section("global", &global).unwrap();

    let text = h.conf.read_conf();
    assert!(text.starts_with("# Global parameters\n[global]\n    workgroup = HOME\n"));
    assert!(text.contains("   ; logging\n"));
    assert!(!text.contains("log file"));
    assert!(text.contains("[media]\n   path = /data/media\n   read only = yes\n"));
    assert_eq!(h.ctx.get_section("global").unwrap(), global);
    assert_eq!(h.reloads(), 1);
    assert!(h.acl.calls().is_empty());
}

#[test]
fn test_update_section_rejects_multiline_value() {
    let h = Harness::new();
    let before = h.conf.read_conf();
    let params = Section::new().with("comment", "one\n[evil]");

    let err = h.ctx.update_section("media", &params).unwrap_err();

    assert_eq!(err.status_class(), StatusClass::BadRequest);
    assert_eq!(h.conf.read_conf(), before);
}

#[test]
fn test_update_sections_writes_once() {
    let h = Harness::new();
    let sections = BTreeMap::from([
        ("global".to_string(), Section::new().with("workgroup", "HOME")),
        ("extra".to_string(), Section::new().with("path", "/srv/extra")),
    ]);

    h.ctx.update_sections(&sections).unwrap();

    assert_eq!(h.ctx.get_section("global").unwrap().get("workgroup"), Some("HOME"));
    assert_eq!(h.ctx.get_section("extra").unwrap().path(), Some("/srv/extra"));
    assert_eq!(h.reloads(), 1);
}

#[test]
fn test_get_missing_section_is_empty() {
    let h = Harness::new();
    assert!(h.ctx.get_section("nothing").unwrap().is_empty());
}

#[test]
fn test_sections_include_reserved() {
    let h = Harness::new();
    let names: Vec<String> = h.ctx.sections().unwrap().into_keys().collect();
    assert_eq!(names, vec!["global", "media", "print$", "printers", "scratch"]);
}

#[test]
fn test_refresh_acls_covers_every_share_with_path() {
    let h = Harness::new();

    let refreshed = h.ctx.refresh_acls().unwrap();

    assert_eq!(refreshed, 2);
    let cleared: Vec<_> = h
        .acl
        .calls()
        .into_iter()
        .filter(|c| c.step == AclStep::Clear)
        .map(|c| c.path)
        .collect();
    assert_eq!(
        cleared,
        vec![
            std::path::PathBuf::from("/data/media"),
            std::path::PathBuf::from("/srv/scratch"),
        ]
    );
}

#[test]
fn test_refresh_acls_stops_at_first_failure() {
    let h = Harness::with_acl(TestConf::new(), RecordingAclBackend::failing_at(0));

    let err = h.ctx.refresh_acls().unwrap_err();

    assert!(matches!(err, Error::Acl(_)));
    assert_eq!(h.acl.calls().len(), 1);
}

#[test]
fn test_restart_service_refreshes_then_reloads() {
    let h = Harness::new();

    h.ctx.restart_service().unwrap();

    assert!(!h.acl.calls().is_empty());
    assert_eq!(h.reloads(), 1);
}

#[test]
fn test_restart_service_skips_reload_when_acl_fails() {
    let h = Harness::with_acl(TestConf::new(), RecordingAclBackend::failing_at(0));

    assert!(h.ctx.restart_service().is_err());
    assert_eq!(h.reloads(), 0);
}

#[test]
fn test_save_raw_config_replaces_file_and_restarts() {
    let h = Harness::new();
    let text = "[global]\n  workgroup = X\n\n[only]\n  path = /srv/only\n  write list = bob\n";

    h.ctx.save_raw_config(text).unwrap();

    assert_eq!(h.ctx.raw_config().unwrap(), text);
    assert_eq!(h.ctx.list_shares().unwrap().keys().collect::<Vec<_>>(), vec!["only"]);
    assert!(h.acl.calls().iter().all(|c| c.path.to_str() == Some("/srv/only")));
    assert_eq!(h.reloads(), 1);
}

#[test]
fn test_share_acl_reports_applied_entries() {
    let h = Harness::new();
    h.ctx.refresh_acls().unwrap();

    let acl = h.ctx.share_acl("scratch").unwrap();

    assert_eq!(acl.path, "/srv/scratch");
    assert_eq!(acl.permission_of(PrincipalKind::User, "alice", false), Some("rwx"));
    assert_eq!(acl.permission_of(PrincipalKind::User, "alice", true), Some("rwx"));
}

#[test]
fn test_share_acl_errors() {
    let h = Harness::new();
    h.ctx
        .update_section("nopath", &Section::new().with("comment", "no dir"))
        .unwrap();

    assert_eq!(
        h.ctx.share_acl("ghost").unwrap_err().status_class(),
        StatusClass::NotFound
    );
    let err = h.ctx.share_acl("nopath").unwrap_err();
    assert_eq!(err.status_class(), StatusClass::BadRequest);
    assert_eq!(err.to_string(), "Share 'nopath' has no path defined");
}

#[test]
fn test_service_status_passes_through() {
    let h = Harness::new();

    let status = h.ctx.service_status().unwrap();

    assert!(status.active);
    assert_eq!(status.status, "running");
    assert_eq!(status.uptime, "N/A");
}

#[test]
fn test_share_usage_attributes_to_mounts() {
    let h = Harness::new();

    let usage = h.ctx.share_usage().unwrap();

    let names: Vec<_> = usage.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["media", "scratch"]);
    assert_eq!(usage[0].size, "1.8T");
    assert_eq!(usage[1].size, "98G");
    assert!(usage.iter().all(|u| u.used == "1.0G"));
}

#[test]
fn test_filesystem_usage_lists_every_row() {
    let h = Harness::new();

    let filesystems = h.ctx.filesystem_usage().unwrap();

    assert_eq!(filesystems.len(), 5);
    assert_eq!(filesystems.iter().filter(|f| f.is_virtual).count(), 3);
}
