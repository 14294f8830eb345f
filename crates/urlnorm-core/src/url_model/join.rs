//! Joining a base URL with further path components.
//!
//! One routine covers both plain appending (`mirror/build_cache` + `pkg`) and
//! href resolution (`s3://bucket/index.html` + `../other/doc.txt`); the two
//! differ only in whether the base's last path segment survives.

use std::fmt;

use super::parsed::{parse, parse_opaque, ParsedUrl};
use super::platform::{normalize_windows_path, Platform};
use super::split::{collapse_segments, split_all, ROOT};

/// Joins `base` with `components` using the host [`Platform`].
///
/// With `resolve_href`, the components are resolved the way a browser
/// resolves a relative link found in the document at `base`. Otherwise
/// they are appended to `base`'s path.
///
/// # Examples
///
/// - `join("https://mirror.example/build_cache", &["pkg"], false)` → `"https://mirror.example/build_cache/pkg"`
/// - `join("s3://bucket/index.html", &["../other/doc.txt"], true)` → `"s3://other/doc.txt"`
pub fn join<B, C>(base: B, components: &[C], resolve_href: bool) -> String
where
    B: fmt::Display,
    C: fmt::Display,
{
    UrlJoin::new(base)
        .components(components)
        .resolve_href(resolve_href)
        .finish()
}

/// Builder for a join; accepts strings and [`ParsedUrl`]s alike.
#[derive(Debug, Clone)]
pub struct UrlJoin {
    platform: Option<Platform>,
    args: Vec<String>,
    resolve_href: bool,
}

impl UrlJoin {
    pub fn new<B: fmt::Display>(base: B) -> Self {
        Self {
            platform: None,
            args: vec![base.to_string()],
            resolve_href: false,
        }
    }

    /// Use `platform` instead of detecting the host when a working directory
    /// is needed.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn component<C: fmt::Display>(mut self, component: C) -> Self {
        self.args.push(component.to_string());
        self
    }

    pub fn components<C: fmt::Display>(mut self, components: &[C]) -> Self {
        self.args.extend(components.iter().map(ToString::to_string));
        self
    }

    pub fn resolve_href(mut self, resolve_href: bool) -> Self {
        self.resolve_href = resolve_href;
        self
    }

    /// Runs the join and formats the result. The result never has a fragment.
    pub fn finish(self) -> String {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| normalize_windows_path(a))
            .collect();

        let (base, relatives) = match effective_base(&args) {
            Some(eb) if eb.index + 1 == args.len() => {
                let platform = self.platform;
                return finish_lone(eb.url, || platform.unwrap_or_else(Platform::current));
            }
            Some(eb) => (parse(&eb.url.to_string()), &args[eb.index + 1..]),
            None => (parse(&args[0]), &args[1..]),
        };

        resolve(base, relatives, self.resolve_href).to_string()
    }
}

/// The last absolute component of a join and where it sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveBase {
    pub index: usize,
    pub url: ParsedUrl,
}

/// Finds the component that everything after it is joined onto.
///
/// Scans from the last argument back. The first one with a recognized scheme
/// or a `/`-rooted path wins. A rooted winner without a scheme takes the
/// scheme of the nearest earlier argument that has one. A winner with its own
/// host (`//cdn.example/x`) keeps it; otherwise it also takes the donor's
/// authority, unless that scheme is `s3` (there the first path segment is the
/// bucket). Returns `None` when every argument is relative.
pub fn effective_base<S: AsRef<str>>(args: &[S]) -> Option<EffectiveBase> {
    for (index, arg) in args.iter().enumerate().rev() {
        let url = parse_opaque(arg.as_ref());
        if url.has_recognized_scheme() {
            tracing::trace!(index, url = %url, "absolute component");
            return Some(EffectiveBase { index, url });
        }
        if !url.path().starts_with('/') && url.authority().is_empty() {
            continue;
        }

        let inherited = args[..index]
            .iter()
            .rev()
            .map(|earlier| parse_opaque(earlier.as_ref()))
            .find(ParsedUrl::has_recognized_scheme);

        let url = match inherited {
            Some(donor) if !url.authority().is_empty() => url.with_scheme(donor.scheme()),
            Some(donor) if donor.scheme() == "s3" => {
                let rest = url.path().trim_start_matches('/');
                let (bucket, key) = match rest.find('/') {
                    Some(i) => (&rest[..i], &rest[i..]),
                    None => (rest, ""),
                };
                url.clone()
                    .with_scheme("s3")
                    .with_authority(bucket)
                    .with_path(key)
            }
            Some(donor) => url.with_scheme(donor.scheme()).with_authority(donor.authority()),
            None => url,
        };
        tracing::debug!(index, url = %url, "rooted component wins");
        return Some(EffectiveBase { index, url });
    }
    None
}

/// A join that collapsed to a single absolute component.
///
/// `platform` is only consulted to fold a `file://` authority into the path.
fn finish_lone<P>(url: ParsedUrl, platform: P) -> String
where
    P: FnOnce() -> Platform,
{
    let url = match url.scheme() {
        "" => url.with_scheme("file"),
        // `#` in a local path is part of the name.
        "file" => url,
        _ => parse(&url.to_string()).without_fragment(),
    };
    if url.scheme() == "file" && !url.authority().is_empty() {
        // `file://a/b` means the path `a/b`, not host `a`.
        let folded = format!("{}{}", url.authority(), url.path());
        let path = platform().absolutize(&folded);
        tracing::debug!(%folded, %path, "folded file authority into path");
        return url.with_authority("").with_path(&path).to_string();
    }
    url.to_string()
}

/// Appends (or href-resolves) `relatives` onto `base`.
fn resolve<S: AsRef<str>>(base: ParsedUrl, relatives: &[S], resolve_href: bool) -> ParsedUrl {
    let scheme = base.scheme().to_string();
    let anchored = base.has_recognized_scheme()
        || !base.authority().is_empty()
        || base.path().starts_with('/');

    let mut segments: Vec<String> = Vec::new();
    if scheme == "s3" && !base.authority().is_empty() {
        segments.push(base.authority().to_string());
    }
    segments.extend(split_all(base.path()).into_iter().filter(|s| s != ROOT));

    let base_path = base.path().trim_start_matches('/');
    if resolve_href && !base_path.is_empty() && !base_path.ends_with('/') {
        segments.pop();
    }

    for relative in relatives {
        segments.extend(
            split_all(relative.as_ref())
                .into_iter()
                .filter(|s| !s.is_empty() && s != ROOT),
        );
    }
    tracing::trace!(?segments, anchored, resolve_href, "joining segments");

    let mut segments = collapse_segments(segments, anchored);

    let mut authority = base.authority().to_string();
    if scheme == "s3" && !segments.is_empty() {
        authority = segments.remove(0);
        tracing::debug!(bucket = %authority, "s3 bucket taken from first segment");
    }

    let path = if segments.is_empty() {
        if anchored && scheme != "s3" {
            ROOT.to_string()
        } else {
            String::new()
        }
    } else if anchored {
        format!("/{}", segments.join("/"))
    } else {
        segments.join("/")
    };

    base.without_fragment()
        .with_authority(&authority)
        .with_path(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_model::PathStyle;

    fn platform() -> Platform {
        Platform::new(PathStyle::Posix, "/work")
    }

    fn join_in<S: AsRef<str>>(base: &str, components: &[S], href: bool) -> String {
        let components: Vec<&str> = components.iter().map(AsRef::as_ref).collect();
        UrlJoin::new(base)
            .platform(platform())
            .components(&components)
            .resolve_href(href)
            .finish()
    }

    #[test]
    fn append_to_mirror_prefix() {
        assert_eq!(
            join_in("https://mirror.example/build_cache", &["pkg"], false),
            "https://mirror.example/build_cache/pkg"
        );
        assert_eq!(
            join_in("https://mirror.example/build_cache", &["a", "b/c", "d.tar.gz"], false),
            "https://mirror.example/build_cache/a/b/c/d.tar.gz"
        );
    }

    #[test]
    fn href_drops_last_base_segment() {
        assert_eq!(
            join_in("https://mirror.example/build_cache", &["pkg"], true),
            "https://mirror.example/pkg"
        );
        assert_eq!(
            join_in("https://host/docs/index.html", &["img/logo.png"], true),
            "https://host/docs/img/logo.png"
        );
    }

    #[test]
    fn href_keeps_directory_base() {
        assert_eq!(
            join_in("https://host/docs/", &["page.html"], true),
            "https://host/docs/page.html"
        );
    }

    #[test]
    fn s3_href_can_change_bucket() {
        assert_eq!(
            join_in("s3://bucket/index.html", &["../other/doc.txt"], true),
            "s3://other/doc.txt"
        );
    }

    #[test]
    fn s3_plain_append_keeps_bucket() {
        assert_eq!(join_in("s3://bucket/a/b", &["c"], false), "s3://bucket/a/b/c");
        assert_eq!(join_in("s3://bucket", &["key"], false), "s3://bucket/key");
        assert_eq!(
            join_in("s3://bucket/index.html", &["../other/doc.txt"], false),
            "s3://bucket/other/doc.txt"
        );
    }

    #[test]
    fn s3_href_on_bare_bucket_keeps_bucket() {
        assert_eq!(join_in("s3://bucket", &["key"], true), "s3://bucket/key");
    }

    #[test]
    fn last_absolute_component_wins() {
        assert_eq!(
            join_in("https://a.example/x", &["y", "https://b.example/z", "w"], false),
            "https://b.example/z/w"
        );
        assert_eq!(join_in("https://a.example/x", &["gs://b/o"], false), "gs://b/o");
    }

    #[test]
    fn rooted_component_inherits_scheme_and_host() {
        assert_eq!(join_in("https://host/a", &["/b"], false), "https://host/b");
        assert_eq!(join_in("https://host/a", &["/b", "c"], false), "https://host/b/c");
    }

    #[test]
    fn network_path_component_keeps_its_host() {
        for href in [false, true] {
            assert_eq!(
                join_in("https://a/x", &["//cdn.example/lib.js"], href),
                "https://cdn.example/lib.js"
            );
        }
        assert_eq!(
            join_in("https://a/x", &["//cdn.example/lib", "v.js"], false),
            "https://cdn.example/lib/v.js"
        );
        assert_eq!(join_in("https://a/x", &["//cdn.example"], true), "https://cdn.example");
    }

    #[test]
    fn rooted_component_under_s3_names_bucket() {
        assert_eq!(join_in("s3://bucket/x", &["y", "/z"], false), "s3://z");
        assert_eq!(join_in("s3://bucket/x", &["/other/key", "k2"], false), "s3://other/key/k2");
    }

    #[test]
    fn lone_rooted_path_becomes_file_url() {
        assert_eq!(join_in::<&str>("/tmp/mirror", &[], false), "file:///tmp/mirror");
        assert_eq!(join_in("relative", &["/abs/dir"], false), "file:///abs/dir");
    }

    #[test]
    fn zero_components_returns_base() {
        assert_eq!(
            join_in::<&str>("https://mirror.example/build_cache", &[], false),
            "https://mirror.example/build_cache"
        );
        assert_eq!(join_in::<&str>("relative/dir", &[], false), "relative/dir");
    }

    #[test]
    fn file_authority_is_folded_into_path() {
        assert_eq!(join_in::<&str>("file://local/dir", &[], false), "file:///work/local/dir");
        assert_eq!(join_in("https://h/x", &["file://mirror/p"], false), "file:///work/mirror/p");
        assert_eq!(join_in::<&str>("file:///abs/dir", &[], false), "file:///abs/dir");
    }

    #[test]
    fn file_url_append() {
        assert_eq!(join_in("file:///srv/mirror", &["pkg", "v1"], false), "file:///srv/mirror/pkg/v1");
    }

    #[test]
    fn dot_segments_collapse() {
        assert_eq!(join_in("https://host/a/b", &["../c", "./d"], false), "https://host/a/c/d");
        assert_eq!(join_in("https://host/a", &["../../.."], false), "https://host/");
    }

    #[test]
    fn relative_base_stays_relative() {
        assert_eq!(join_in("a/b", &["c"], false), "a/b/c");
        assert_eq!(join_in("a", &["../../b"], false), "../b");
    }

    #[test]
    fn unrecognized_scheme_does_not_anchor() {
        assert_eq!(join_in("name:tag", &["x"], false), "name:tag/x");
    }

    #[test]
    fn rooted_base_without_scheme_stays_rooted() {
        assert_eq!(join_in("/x", &["y"], false), "/x/y");
    }

    #[test]
    fn windows_components_are_normalized() {
        assert_eq!(
            join_in("https://mirror.example/cache", &["sub\\dir\\file.zip"], false),
            "https://mirror.example/cache/sub/dir/file.zip"
        );
        assert_eq!(join_in("C:\\base", &["x"], false), "C:/base/x");
    }

    #[test]
    fn lone_url_loses_fragment() {
        assert_eq!(join_in::<&str>("https://h/x#frag", &[], false), "https://h/x");
        assert_eq!(join_in("relative", &["https://h/a?q=1#top"], false), "https://h/a?q=1");
        assert_eq!(join_in("https://h/x", &["/b#sec"], false), "https://h/b");
    }

    #[test]
    fn lone_file_path_keeps_hash() {
        assert_eq!(join_in::<&str>("/tmp/a#b", &[], false), "file:///tmp/a#b");
    }

    #[test]
    fn lone_join_reads_platform_only_for_file_authority() {
        let no_platform = || -> Platform { panic!("platform not needed") };
        assert_eq!(finish_lone(parse_opaque("https://h/x"), no_platform), "https://h/x");
        assert_eq!(finish_lone(parse_opaque("/srv/m"), no_platform), "file:///srv/m");
        assert_eq!(
            finish_lone(parse_opaque("file://m/p"), platform),
            "file:///work/m/p"
        );
    }

    #[test]
    fn query_kept_fragment_dropped() {
        assert_eq!(join_in("https://host/a?token=1#frag", &["b"], false), "https://host/a/b?token=1");
    }

    #[test]
    fn parsed_urls_are_accepted() {
        let base = parse("https://mirror.example/build_cache");
        let out = UrlJoin::new(&base)
            .platform(platform())
            .component(parse("pkg"))
            .component("v1")
            .finish();
        assert_eq!(out, "https://mirror.example/build_cache/pkg/v1");
    }

    #[test]
    fn effective_base_scan() {
        assert_eq!(effective_base(&["a", "b"]), None);

        let eb = effective_base(&["https://h/a", "x", "/b", "c"]).unwrap();
        assert_eq!(eb.index, 2);
        assert_eq!(eb.url.to_string(), "https://h/b");

        let eb = effective_base(&["/a", "b"]).unwrap();
        assert_eq!(eb.index, 0);
        assert_eq!(eb.url.scheme(), "");

        let eb = effective_base(&["s3://bucket/x", "/z/k"]).unwrap();
        assert_eq!(eb.url.authority(), "z");
        assert_eq!(eb.url.path(), "/k");
    }

    #[test]
    fn free_function_matches_builder() {
        assert_eq!(
            join("https://mirror.example/build_cache", &["pkg"], false),
            "https://mirror.example/build_cache/pkg"
        );
    }
}
