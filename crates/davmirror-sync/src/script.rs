//! Offline sync-script rendering
//!
//! Emits a shell script with one directory-creation and one fetch
//! command pair per index entry, in lexicographic path order, for
//! environments where the mirror must be pulled manually. Each fetch
//! line tolerates its own failure so one broken transfer never aborts
//! the rest of the script.

use davmirror_core::domain::path_index::PathIndex;

/// Renders the fetch script for `index`.
///
/// Deterministic: the same index always renders the identical script.
pub fn render(index: &PathIndex) -> String {
    let mut out = String::new();
    out.push_str("#!/bin/sh\n");
    out.push_str("# Fetch script generated by davmirror.\n");
    out.push_str("# Commands are independent; a failed fetch does not stop the rest.\n\n");

    for (path, entry) in index.iter() {
        let dir = path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or(".");
        out.push_str(&format!("mkdir -p '{dir}'\n"));
        out.push_str(&format!(
            "curl -fLsS -o '{path}' '{url}' || echo 'fetch failed: {path}' >&2\n",
            url = entry.url
        ));
    }

    out
}
