//! Groups a page of the home timeline into reply-chain slices.
//!
//! The feed arrives newest first. Entries are walked oldest to newest so a
//! newer reply can extend a chain built from older entries, and whichever
//! slice was touched last is moved to the front. The result reads
//! "latest activity on top" without a second sort.

use crate::models::{FeedItem, FeedResponse};
use crate::slice::Slice;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::Infallible;

pub type TimelineSlice = Slice<FeedItem>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Cid of the newest post in the page, used to detect new content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    pub slices: Vec<TimelineSlice>,
}

impl TimelinePage {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn post_count(&self) -> usize {
        self.slices.iter().map(Slice::len).sum()
    }
}

/// Assembles a page without filtering.
pub fn assemble(response: &FeedResponse) -> TimelinePage {
    match assemble_filtered(response, |_, _| Ok::<_, Infallible>(true)) {
        Ok(page) => page,
        Err(never) => match never {},
    }
}

/// Assembles a page, keeping only the slices `filter` accepts.
///
/// The filter sees every cid placed on the page. The first error it returns
/// aborts assembly and is handed back unchanged.
pub fn assemble_filtered<F, E>(response: &FeedResponse, mut filter: F) -> Result<TimelinePage, E>
where
    F: FnMut(&TimelineSlice, &HashSet<String>) -> Result<bool, E>,
{
    let (slices, seen) = build_slices(&response.feed);

    let total = slices.len();
    let mut kept = Vec::with_capacity(total);
    for slice in slices {
        if filter(&slice, &seen)? {
            kept.push(slice);
        } else {
            tracing::trace!(root = ?slice.root_cid(), "slice rejected by filter");
        }
    }
    tracing::debug!(
        items = response.feed.len(),
        slices = kept.len(),
        filtered = total - kept.len(),
        "assembled timeline page"
    );

    Ok(TimelinePage {
        cursor: response.cursor.clone(),
        cid: response.feed.first().map(|item| item.post.cid.clone()),
        slices: kept,
    })
}

fn build_slices(feed: &[FeedItem]) -> (Vec<TimelineSlice>, HashSet<String>) {
    let mut slices: Vec<TimelineSlice> = Vec::new();
    let mut seen: HashSet<String> = HashSet::with_capacity(feed.len());

    for item in feed.iter().rev() {
        if !seen.insert(item.post.cid.clone()) {
            tracing::trace!(cid = %item.post.cid, "skipping duplicate feed entry");
            continue;
        }

        let mut placed = false;
        for idx in 0..slices.len() {
            let slice = &mut slices[idx];
            if slice.is_next_in_thread(item) {
                slice.items.push(item.clone());
            } else if slice.is_first_in_thread(item) {
                slice.items.insert(0, item.clone());
            } else {
                continue;
            }
            if idx != 0 {
                let touched = slices.remove(idx);
                slices.insert(0, touched);
            }
            placed = true;
            break;
        }

        if !placed {
            slices.insert(0, Slice::new(item.clone()));
        }
    }

    (slices, seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, RepostInfo};
    use crate::slice::tests::post;

    fn item(cid: &str, parent: Option<&str>) -> FeedItem {
        FeedItem {
            post: post(cid, parent),
            reply: None,
            reason: None,
        }
    }

    fn repost(cid: &str, by: &str) -> FeedItem {
        FeedItem {
            reason: Some(RepostInfo {
                by: Author {
                    did: by.into(),
                    handle: String::new(),
                    display_name: None,
                },
                indexed_at: None,
            }),
            ..item(cid, None)
        }
    }

    fn response(feed: Vec<FeedItem>) -> FeedResponse {
        FeedResponse {
            feed,
            cursor: Some("cursor-1".into()),
        }
    }

    fn cids(page: &TimelinePage) -> Vec<Vec<&str>> {
        page.slices
            .iter()
            .map(|s| s.posts().map(|p| p.cid.as_str()).collect())
            .collect()
    }

    #[test]
    fn unrelated_posts_stay_newest_first() {
        let page = assemble(&response(vec![
            item("a", None),
            item("b", None),
            item("c", None),
        ]));
        assert_eq!(cids(&page), vec![vec!["a"], vec!["b"], vec!["c"]]);
        assert_eq!(page.cid.as_deref(), Some("a"));
        assert_eq!(page.cursor.as_deref(), Some("cursor-1"));
    }

    #[test]
    fn reply_extends_older_chain() {
        let page = assemble(&response(vec![
            item("a", None),
            item("b", Some("c")),
            item("c", None),
        ]));
        assert_eq!(cids(&page), vec![vec!["a"], vec!["c", "b"]]);
    }

    #[test]
    fn parent_seen_after_child_is_prepended() {
        // "b" is older in the page than its own parent "a" (e.g. "a" was reposted).
        let page = assemble(&response(vec![item("a", None), item("b", Some("a"))]));
        assert_eq!(cids(&page), vec![vec!["a", "b"]]);
    }

    #[test]
    fn touched_slice_moves_to_front() {
        let page = assemble(&response(vec![
            item("c2", Some("c1")),
            item("x", None),
            item("c1", None),
        ]));
        assert_eq!(cids(&page), vec![vec!["c1", "c2"], vec!["x"]]);
    }

    #[test]
    fn duplicate_keeps_oldest_occurrence() {
        let page = assemble(&response(vec![
            repost("p", "did:plc:reposter"),
            item("other", None),
            item("p", None),
        ]));
        assert_eq!(cids(&page), vec![vec!["other"], vec!["p"]]);
        let kept = page.slices[1].first().expect("slice has an item");
        assert!(!kept.is_repost());
        // the page identity still points at the newest entry
        assert_eq!(page.cid.as_deref(), Some("p"));
    }

    #[test]
    fn first_matching_slice_wins() {
        // "x" could extend [p] or head [k]; [k] is nearer the front so it
        // takes "x" and [p] is left alone.
        let page = assemble(&response(vec![
            item("x", Some("p")),
            item("k", Some("x")),
            item("p", None),
        ]));
        assert_eq!(cids(&page), vec![vec!["x", "k"], vec!["p"]]);
    }

    #[test]
    fn empty_feed_has_no_identity() {
        let page = assemble(&FeedResponse::default());
        assert!(page.is_empty());
        assert_eq!(page.cid, None);
        assert_eq!(page.cursor, None);
    }

    #[test]
    fn filter_receives_seen_set_and_drops_slices() {
        let feed = response(vec![item("a", None), item("b", Some("c")), item("c", None)]);
        let page = assemble_filtered(&feed, |slice, seen| {
            assert_eq!(seen.len(), 3);
            Ok::<_, Infallible>(!slice.contains_cid("a"))
        })
        .expect("infallible");
        assert_eq!(cids(&page), vec![vec!["c", "b"]]);
        assert_eq!(page.post_count(), 2);
    }

    #[test]
    fn filter_error_propagates() {
        let feed = response(vec![item("a", None)]);
        let result = assemble_filtered(&feed, |_, _| Err("policy failure"));
        assert_eq!(result, Err("policy failure"));
    }

    #[test]
    fn assembling_twice_is_stable() {
        let feed = response(vec![
            item("a", Some("b")),
            item("b", None),
            repost("b", "did:plc:x"),
        ]);
        assert_eq!(assemble(&feed), assemble(&feed));
    }
}
