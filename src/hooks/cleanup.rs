//! What git does to the message after a commit hook returns
//!
//! `git commit` cleans the message once every hook has run. With the
//! `strip` cleanup, lines starting with the comment marker are dropped, so a
//! prefix such as `#42 - ` would take the whole subject line with it.

/// Comment marker git uses unless configured otherwise
pub const DEFAULT_COMMENT: &str = "#";

/// The comment marker git will strip from the final message, if any
///
/// `cleanup` is the `commit.cleanup` setting and `comment` is
/// `core.commentString` or `core.commentChar`. Under the default cleanup,
/// comments are only stripped when the message went through the editor.
pub fn stripped_comment(
    cleanup: Option<&str>,
    comment: Option<&str>,
    editor_used: bool,
) -> Option<String> {
    let strips = match cleanup.map(str::trim) {
        Some("strip") => true,
        Some("verbatim") | Some("whitespace") | Some("scissors") => false,
        _ => editor_used,
    };
    if !strips {
        return None;
    }

    match comment.filter(|marker| !marker.is_empty()) {
        // "auto" picks an unused marker before the hook runs, usually '#'
        None | Some("auto") => Some(DEFAULT_COMMENT.to_string()),
        Some(marker) => Some(marker.to_string()),
    }
}

/// Whether git will open an editor for this commit
///
/// Git sets `GIT_EDITOR=:` in the hook environment when it will not.
pub fn editor_used(git_editor: Option<&str>) -> bool {
    git_editor != Some(":")
}
