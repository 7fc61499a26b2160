//! Shell-script stand-ins for a Drush executable.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

/// Held while a stub is written and executed: forking while another thread
/// still has a script open for writing fails with ETXTBSY.
static STUB_LOCK: Mutex<()> = Mutex::new(());

pub const CATALOG: &str = r#"{
  "core": {"commands": {
    "status": {"command": "status", "aliases": ["st"], "scope": "site",
               "options": {"show-passwords": "Show database password."},
               "description": "Provides a birds-eye view of the current Drupal installation."},
    "site-set": {"command": "site-set", "aliases": ["use"], "options": [], "description": "Set a site alias."},
    "site-alias": {"command": "site-alias", "aliases": ["sa"],
                   "options": {"local": "Local sites only.", "fields": {"description": "Fields to output."}},
                   "description": "Print site alias records."}
  }},
  "pm": {"commands": {
    "pm-info": {"command": "pm-info", "aliases": ["pmi"], "scope": "site",
                "options": {"no-cache": "Skip the cache."},
                "description": "Show detailed info for one or more extensions."},
    "pm-list": {"command": "pm-list", "aliases": ["pml"], "hidden": true, "options": [],
                "description": "Show a list of available extensions."}
  }}
}"#;

pub struct Stub {
    _dir: TempDir,
    pub path: PathBuf,
    _guard: MutexGuard<'static, ()>,
}

impl Stub {
    pub fn path_str(&self) -> &str {
        self.path.to_str().expect("utf-8 temp path")
    }
}

/// A Drush 8 stub that knows `help`, `status`, `site-alias`, `pm-info`,
/// `fail` and `garbage`. `@dev` has views enabled, `@prod` does not,
/// anything else is an unknown alias.
pub fn drush_stub() -> Stub {
    write_stub(&format!(
        r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo " Drush Version   :  8.1.15 "
  exit 0
fi
ALIAS=""
case "$1" in
  @*) ALIAS="$1"; shift ;;
esac
cmd="$1"; shift
case "$cmd" in
  help)
    cat <<'JSON'
{CATALOG}
JSON
    ;;
  status)
    printf '{{"alias":"%s","args":"%s"}}\n' "$ALIAS" "$*"
    ;;
  site-alias)
    case "$1" in
      @dev|@prod) printf '{{"%s":{{}}}}\n' "$1" ;;
      @*) echo "Not found: $1" >&2; exit 1 ;;
      *) echo '{{"dev":{{"name":"dev","root":"/var/www/d7","context_type":"site"}},"prod":{{"name":"prod","root":"/var/www/d8","context_type":"site"}}}}' ;;
    esac
    ;;
  pm-info)
    if [ "$ALIAS" = "@dev" ]; then state=enabled; else state=disabled; fi
    printf '{{"%s":{{"status":"%s"}}}}\n' "$1" "$state"
    ;;
  fail)
    echo "boom" >&2
    exit 3
    ;;
  garbage)
    echo "not json"
    ;;
  *)
    echo "unknown command $cmd" >&2
    exit 1
    ;;
esac
"#
    ))
}

/// A stub reporting an unsupported Drush version.
pub fn old_drush_stub() -> Stub {
    write_stub("#!/bin/sh\necho ' Drush Version   :  5.9 '\n")
}

fn write_stub(script: &str) -> Stub {
    let guard = STUB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("drush");
    fs::write(&path, script).expect("write stub");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
    Stub {
        _dir: dir,
        path,
        _guard: guard,
    }
}
