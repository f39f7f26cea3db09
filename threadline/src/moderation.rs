use crate::timeline::TimelineSlice;
use std::collections::HashSet;

/// Slice predicate hiding muted authors and muted conversations.
#[derive(Debug, Clone, Default)]
pub struct MuteFilter {
    muted_authors: HashSet<String>,
    muted_threads: HashSet<String>,
}

impl MuteFilter {
    pub fn new<A, T>(muted_authors: A, muted_threads: T) -> Self
    where
        A: IntoIterator<Item = String>,
        T: IntoIterator<Item = String>,
    {
        Self {
            muted_authors: muted_authors.into_iter().collect(),
            muted_threads: muted_threads.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.muted_authors.is_empty() && self.muted_threads.is_empty()
    }

    pub fn is_author_muted(&self, did: &str) -> bool {
        self.muted_authors.contains(did)
    }

    /// Whether `slice` may be shown. The page's `seen` set is not consulted.
    pub fn accepts(&self, slice: &TimelineSlice, _seen: &HashSet<String>) -> bool {
        if let Some(root) = slice.root_cid() {
            if self.muted_threads.contains(root) {
                return false;
            }
        }
        !slice.items.iter().any(|item| {
            self.is_author_muted(&item.post.author.did)
                || item
                    .reason
                    .as_ref()
                    .map(|reason| self.is_author_muted(&reason.by.did))
                    .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, FeedItem, RepostInfo};
    use crate::slice::tests::{post, post_in};
    use crate::slice::Slice;

    fn feed_item(post: crate::models::Post) -> FeedItem {
        FeedItem {
            post,
            reply: None,
            reason: None,
        }
    }

    #[test]
    fn muted_author_anywhere_in_chain_hides_slice() {
        let mut slice = Slice::new(feed_item(post("a", None)));
        slice.items.push(feed_item(post("b", Some("a"))));

        let filter = MuteFilter::new(vec!["did:plc:b".to_string()], vec![]);
        assert!(!filter.accepts(&slice, &HashSet::new()));

        let filter = MuteFilter::new(vec!["did:plc:z".to_string()], vec![]);
        assert!(filter.accepts(&slice, &HashSet::new()));
    }

    #[test]
    fn muted_reposter_hides_slice() {
        let mut item = feed_item(post("a", None));
        item.reason = Some(RepostInfo {
            by: Author {
                did: "did:plc:noisy".into(),
                handle: "noisy.test".into(),
                display_name: None,
            },
            indexed_at: None,
        });
        let slice = Slice::new(item);
        let filter = MuteFilter::new(vec!["did:plc:noisy".to_string()], vec![]);
        assert!(!filter.accepts(&slice, &HashSet::new()));
    }

    #[test]
    fn muted_thread_matches_reply_root() {
        let slice = Slice::new(feed_item(post_in("c", Some("b"), Some("root"))));
        let filter = MuteFilter::new(vec![], vec!["root".to_string()]);
        assert!(!filter.accepts(&slice, &HashSet::new()));

        let standalone = Slice::new(feed_item(post("root", None)));
        assert!(!filter.accepts(&standalone, &HashSet::new()));

        let other = Slice::new(feed_item(post("other", None)));
        assert!(filter.accepts(&other, &HashSet::new()));
    }

    #[test]
    fn empty_filter_accepts_everything() {
        let filter = MuteFilter::default();
        assert!(filter.is_empty());
        let slice = Slice::new(feed_item(post("a", None)));
        assert!(filter.accepts(&slice, &HashSet::new()));
    }
}
