//! # Matcher Module
//!
//! Pairs a processed file with the original it was derived from.
//!
//! Processing pipelines tend to keep the original name and add a prefix
//! or suffix (`clip_0001.mov` becomes `clip_0001_final.mp4`), so a source
//! matches when its base name is contained in the target's base name.
//! Sources are tried in their sorted order and the first hit wins, which
//! keeps ambiguous cases reproducible but not necessarily correct.

use std::path::Path;

/// File name with directory and last extension removed.
///
/// Only the final `.ext` is stripped: `a.b.mov` gives `a.b`, and a name
/// that is all extension (`.mov`) gives an empty string.
pub fn base_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match name.rfind('.') {
        Some(dot) => name[..dot].to_string(),
        None => name,
    }
}

/// Whether `target_base` could have been produced from `source_base`.
///
/// Case-sensitive substring test. Empty names never match: a source
/// named just `.mov` has an empty base, and an empty string is contained
/// in every target, so a plain containment check would pair it with
/// every file. Such sources are rejected instead.
pub fn is_derived_name(source_base: &str, target_base: &str) -> bool {
    !source_base.is_empty() && !target_base.is_empty() && target_base.contains(source_base)
}

/// Find the first source whose base name is contained in `target_base`
pub fn find_source<'a, P>(target_base: &str, sources: &'a [P]) -> Option<&'a Path>
where
    P: AsRef<Path>,
{
    if target_base.is_empty() {
        return None;
    }

    sources
        .iter()
        .map(AsRef::as_ref)
        .find(|source| is_derived_name(&base_name(source), target_base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sources(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/raw").join(n)).collect()
    }

    #[test]
    fn base_name_strips_directory_and_last_extension() {
        assert_eq!(base_name(Path::new("/raw/clip_0001.mov")), "clip_0001");
        assert_eq!(base_name(Path::new("/raw/clip.v2.mov")), "clip.v2");
        assert_eq!(base_name(Path::new("/raw/noext")), "noext");
        assert_eq!(base_name(Path::new("/raw/.mov")), "");
    }

    #[test]
    fn suffixed_target_matches_its_original() {
        let list = sources(&["clip_0001.mov", "clip_0002.mov"]);

        let found = find_source("clip_0001_final", &list);

        assert_eq!(found, Some(Path::new("/raw/clip_0001.mov")));
    }

    #[test]
    fn prefixed_target_matches_its_original() {
        let list = sources(&["clip_0001.mov", "clip_0002.mov"]);

        let found = find_source("hdr_clip_0002", &list);

        assert_eq!(found, Some(Path::new("/raw/clip_0002.mov")));
    }

    #[test]
    fn unrelated_target_has_no_match() {
        let list = sources(&["clip_0001.mov", "clip_0002.mov"]);

        assert_eq!(find_source("unrelated_clip", &list), None);
    }

    #[test]
    fn empty_target_never_matches() {
        let list = sources(&["clip_0001.mov"]);

        assert_eq!(find_source("", &list), None);
    }

    #[test]
    fn empty_source_base_never_matches() {
        let list = sources(&[".mov", "clip.mov"]);

        assert_eq!(find_source("clip_final", &list), Some(Path::new("/raw/clip.mov")));
        assert!(!is_derived_name("", "anything"));
    }

    #[test]
    fn extension_only_source_is_not_a_catch_all() {
        let list = sources(&[".mov"]);

        for target in ["clip_final", "a", "unrelated_clip"] {
            assert_eq!(find_source(target, &list), None);
        }
    }

    #[test]
    fn first_candidate_in_order_wins() {
        // Both "clip" and "clip_0001" are contained in the target.
        let list = sources(&["clip.mov", "clip_0001.mov"]);

        for _ in 0..3 {
            assert_eq!(
                find_source("clip_0001_final", &list),
                Some(Path::new("/raw/clip.mov"))
            );
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!is_derived_name("CLIP", "clip_final"));
        assert!(is_derived_name("clip", "clip_final"));
    }

    #[test]
    fn source_extension_is_ignored() {
        let list = sources(&["video001.mov"]);

        assert_eq!(
            find_source("video001_encoded", &list),
            Some(Path::new("/raw/video001.mov"))
        );
    }
}
