use crate::models::{FeedItem, Post};
use serde::{Deserialize, Serialize};

/// Anything that sits in a reply chain: it has an id and may point at a parent.
pub trait Chained {
    fn post(&self) -> &Post;

    fn cid(&self) -> &str {
        &self.post().cid
    }

    fn parent_cid(&self) -> Option<&str> {
        self.post().parent_cid()
    }
}

impl Chained for Post {
    fn post(&self) -> &Post {
        self
    }
}

impl Chained for FeedItem {
    fn post(&self) -> &Post {
        &self.post
    }
}

/// A contiguous run of a reply chain observed within one page.
///
/// Every item after the first replies to the item before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice<T> {
    pub items: Vec<T>,
}

impl<T: Chained> Slice<T> {
    pub fn new(first: T) -> Self {
        Self { items: vec![first] }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.items.iter().map(Chained::post)
    }

    /// More than one post was chained together.
    pub fn is_thread(&self) -> bool {
        self.items.len() > 1
    }

    /// The chain starts at the conversation's root post.
    pub fn is_full_thread(&self) -> bool {
        self.first()
            .map(|item| item.parent_cid().is_none())
            .unwrap_or(false)
    }

    /// Root of the conversation this slice belongs to.
    pub fn root_cid(&self) -> Option<&str> {
        let first = self.first()?.post();
        Some(first.root_cid().unwrap_or(&first.cid))
    }

    pub fn contains_cid(&self, cid: &str) -> bool {
        self.items.iter().any(|item| item.cid() == cid)
    }

    /// `candidate` replies to the current tail of this slice.
    pub(crate) fn is_next_in_thread(&self, candidate: &T) -> bool {
        match (candidate.parent_cid(), self.last()) {
            (Some(parent), Some(last)) => parent == last.cid(),
            _ => false,
        }
    }

    /// The current head of this slice replies to `candidate`.
    pub(crate) fn is_first_in_thread(&self, candidate: &T) -> bool {
        self.first()
            .and_then(Chained::parent_cid)
            .map(|parent| parent == candidate.cid())
            .unwrap_or(false)
    }
}
