//! Integration tests for ConfigStore read / merge-write behaviour

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use share_conf::{ConfigStore, Section};
use std::path::PathBuf;
use tempfile::TempDir;

const SMB_CONF: &str = "\
# This is the main Samba configuration file.
#
[global]
   workgroup = WORKGROUP
   ; keep the server string short
   server string = %h server (Samba)
   log file = /var/log/samba/log.%m

[printers]
   comment = All Printers
   browseable = no

[print$]
   path = /var/lib/samba/printers

[A]
   path = /srv/a
   read only = yes

# B is the team share
[B]
   path = /srv/b
   valid users = bob
";

fn setup(content: &str) -> (TempDir, PathBuf, ConfigStore) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("smb.conf");
    std::fs::write(&path, content).unwrap();
    let store = ConfigStore::new(&path);
    (dir, path, store)
}

/// Text of the block starting at `[name]` up to the next header.
fn block_of(text: &str, name: &str) -> String {
    let header = format!("[{}]", name);
    let start = text.find(&header).unwrap();
    let rest = &text[start + header.len()..];
    let end = rest.find("\n[").map(|i| i + 1).unwrap_or(rest.len());
    format!("{}{}", header, &rest[..end])
}

#[test]
fn test_write_with_no_changes_is_byte_identical() {
    let (_dir, path, store) = setup(SMB_CONF);

    let doc = store.read().unwrap();
    store.write(&doc, Vec::<String>::new()).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), SMB_CONF);
}

#[test]
fn test_selective_merge_touches_only_changed_section() {
    let (_dir, path, store) = setup(SMB_CONF);

    let mut doc = store.read().unwrap();
    doc.set_section(
        "A",
        Section::new()
            .with("path", "/srv/a2")
            .with("write list", "alice"),
    );
    store.write(&doc, ["A"]).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(block_of(&written, "global"), block_of(SMB_CONF, "global"));
    assert_eq!(block_of(&written, "B"), block_of(SMB_CONF, "B"));
    assert_eq!(
        block_of(&written, "A"),
        "[A]\n    path = /srv/a2\n    write list = alice\n\n# B is the team share\n"
    );

    let reread = store.read().unwrap();
    assert_eq!(reread.section("A").unwrap().get("path"), Some("/srv/a2"));
    assert_eq!(reread.section("A").unwrap().get("read only"), None);
}

#[test]
fn test_reserved_sections_never_listed_as_shares() {
    let (_dir, _path, store) = setup(SMB_CONF);

    let shares = store.read().unwrap().share_map();

    assert_eq!(shares.keys().collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn test_delete_share_drops_block_and_keeps_neighbours() {
    let (_dir, path, store) = setup(SMB_CONF);

    let mut doc = store.read().unwrap();
    doc.remove_section("A");
    store.write(&doc, ["A"]).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(!written.contains("[A]"));
    assert!(!written.contains("/srv/a"));
    assert!(written.contains("[B]\n   path = /srv/b\n"));
    assert!(written.contains("[print$]\n   path = /var/lib/samba/printers\n"));
    assert!(!store.read().unwrap().contains("A"));
}

#[test]
fn test_new_share_appended_and_readable() {
    let (_dir, path, store) = setup(SMB_CONF);

    let mut doc = store.read().unwrap();
    doc.set_section(
        "docs",
        Section::new()
            .with("path", "/srv/docs")
            .with("valid users", "bob,@eng")
            .with("write list", "alice"),
    );
    store.write(&doc, ["docs"]).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with(SMB_CONF));
    assert!(written.ends_with(
        "\n\n[docs]\n    path = /srv/docs\n    valid users = bob,@eng\n    write list = alice\n"
    ));

    let docs = store.read().unwrap().share_map().remove("docs").unwrap();
    assert_eq!(docs.len(), 3);
}

#[test]
fn test_global_edit_preserves_comment_placement() {
    let (_dir, path, store) = setup(SMB_CONF);

    let mut doc = store.read().unwrap();
    doc.section_mut("global").unwrap().set("workgroup", "OFFICE");
    store.write(&doc, ["global"]).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# This is the main Samba configuration file.\n#\n[global]\n    workgroup = OFFICE\n    server string = %h server (Samba)\n    log file = /var/log/samba/log.%m\n   ; keep the server string short\n"));
    assert_eq!(block_of(&written, "printers"), block_of(SMB_CONF, "printers"));
}

#[test]
fn test_write_to_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::new(dir.path().join("missing.conf"));

    let result = store.write(&share_conf::ConfigDocument::new(), ["x"]);

    assert!(matches!(result, Err(share_conf::Error::NotFound { .. })));
}

fn config_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z$]{1,8}".prop_map(|n| format!("[{}]", n)),
        "[a-z ]{1,10}=[ -~]{0,12}".prop_map(|s| format!("   {}", s)),
        "[#;][ -~]{0,20}",
        "[ -~]{0,20}",
    ]
}

proptest! {
    #[test]
    fn prop_write_without_changes_round_trips(
        lines in prop::collection::vec(config_line(), 0..30),
        crlf in any::<bool>(),
        trailing in any::<bool>(),
    ) {
        let sep = if crlf { "\r\n" } else { "\n" };
        let mut text = lines.join(sep);
        if trailing {
            text.push_str(sep);
        }

        let (_dir, path, store) = setup(&text);
        let doc = store.read().unwrap();
        store.write(&doc, Vec::<String>::new()).unwrap();

        prop_assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }
}
