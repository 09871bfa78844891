//! Filename, link, and breadcrumb derivation.
//!
//! Filenames are a pure function of the hierarchy path: safe-encoded
//! segment names joined with `.`, skipping the model-root and entry-point
//! levels, with an `_{overload - 1}` suffix disambiguating the second and
//! later overloads of a same-named callable. The overload index is the sole
//! disambiguator, so the mapping is collision-free over a valid model.

use std::fmt::Write;

use apiref_model::{EntityKind, EntityPath};

/// Fixed filename of the model root page.
const INDEX_FILENAME: &str = "index.html";

/// One breadcrumb entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    /// Link text.
    pub title: String,
    /// Same-directory link target.
    pub href: String,
}

/// The stable relative filename for the entity at `path`.
#[must_use]
pub fn filename_for(path: &EntityPath) -> String {
    let mut parts: Vec<String> = Vec::new();
    for seg in path.segments() {
        if matches!(seg.kind, EntityKind::Model | EntityKind::EntryPoint) {
            continue;
        }
        let mut name = safe_filename(&seg.name);
        if seg.overload_index > 1 {
            write!(name, "_{}", seg.overload_index - 1)
                .expect("writing to a String cannot fail");
        }
        parts.push(name);
    }
    if parts.is_empty() {
        return INDEX_FILENAME.to_owned();
    }
    format!("{}.html", parts.join("."))
}

/// Same-directory link to the entity at `path`.
#[must_use]
pub fn link_for(path: &EntityPath) -> String {
    format!("./{}", filename_for(path))
}

/// Breadcrumb trail for the page at `path`: Home first, then one crumb per
/// hierarchy entry down to the entity itself, skipping the model-root and
/// entry-point levels.
#[must_use]
pub fn breadcrumbs(path: &EntityPath) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb {
        title: "Home".to_owned(),
        href: format!("./{INDEX_FILENAME}"),
    }];
    for (i, seg) in path.segments().iter().enumerate() {
        if matches!(seg.kind, EntityKind::Model | EntityKind::EntryPoint) {
            continue;
        }
        crumbs.push(Crumb {
            title: seg.name.clone(),
            href: link_for(&path.prefix(i + 1)),
        });
    }
    crumbs
}

/// Encode one hierarchy segment name as a filename part: lowercase, with
/// anything outside `[a-z0-9_\-.]` replaced by `_`.
fn safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use apiref_model::ApiEntity;
    use pretty_assertions::assert_eq;

    use super::*;

    fn segment(kind: EntityKind, name: &str, overload_index: u32) -> ApiEntity {
        ApiEntity {
            overload_index,
            ..ApiEntity::new(kind, name)
        }
    }

    fn path(entities: &[ApiEntity]) -> EntityPath {
        entities
            .iter()
            .fold(EntityPath::root(), |p, e| p.join(e))
    }

    #[test]
    fn test_model_root_is_index() {
        assert_eq!(filename_for(&EntityPath::root()), "index.html");
    }

    #[test]
    fn test_segments_joined_with_dots() {
        let p = path(&[
            segment(EntityKind::Package, "toolkit", 0),
            segment(EntityKind::EntryPoint, "", 0),
            segment(EntityKind::Class, "Widget", 0),
            segment(EntityKind::Method, "render", 0),
        ]);
        assert_eq!(filename_for(&p), "toolkit.widget.render.html");
    }

    #[test]
    fn test_overload_suffix_rule() {
        let mut entities = vec![
            segment(EntityKind::Package, "pkg", 0),
            segment(EntityKind::Function, "parse", 0),
        ];
        assert_eq!(filename_for(&path(&entities)), "pkg.parse.html");

        entities[1].overload_index = 1;
        assert_eq!(filename_for(&path(&entities)), "pkg.parse.html");

        entities[1].overload_index = 2;
        assert_eq!(filename_for(&path(&entities)), "pkg.parse_1.html");

        entities[1].overload_index = 3;
        assert_eq!(filename_for(&path(&entities)), "pkg.parse_2.html");
    }

    #[test]
    fn test_filename_pure_and_injective_over_overloads() {
        let first = path(&[
            segment(EntityKind::Package, "pkg", 0),
            segment(EntityKind::Function, "parse", 1),
        ]);
        let second = path(&[
            segment(EntityKind::Package, "pkg", 0),
            segment(EntityKind::Function, "parse", 2),
        ]);
        assert_eq!(filename_for(&first), filename_for(&first));
        assert_ne!(filename_for(&first), filename_for(&second));
    }

    #[test]
    fn test_safe_filename_encoding() {
        let p = path(&[segment(EntityKind::Package, "@scope/My Pkg!", 0)]);
        assert_eq!(filename_for(&p), "_scope_my_pkg_.html");
    }

    #[test]
    fn test_link_for_same_directory_prefix() {
        let p = path(&[segment(EntityKind::Package, "pkg", 0)]);
        assert_eq!(link_for(&p), "./pkg.html");
    }

    #[test]
    fn test_breadcrumbs_skip_root_and_entry_point() {
        let p = path(&[
            segment(EntityKind::Package, "toolkit", 0),
            segment(EntityKind::EntryPoint, "", 0),
            segment(EntityKind::Class, "Widget", 0),
        ]);
        let crumbs = breadcrumbs(&p);
        assert_eq!(crumbs.len(), 3);
        assert_eq!(crumbs[0].title, "Home");
        assert_eq!(crumbs[0].href, "./index.html");
        assert_eq!(crumbs[1].title, "toolkit");
        assert_eq!(crumbs[1].href, "./toolkit.html");
        assert_eq!(crumbs[2].title, "Widget");
        assert_eq!(crumbs[2].href, "./toolkit.widget.html");
    }

    #[test]
    fn test_breadcrumbs_for_root_page() {
        let crumbs = breadcrumbs(&EntityPath::root());
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].title, "Home");
    }
}
