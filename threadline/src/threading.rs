use crate::models::{Post, ThreadNode};
use crate::slice::{Chained, Slice};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

pub type ThreadSlice = Slice<Post>;

/// A thread flattened into reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearizedThread {
    pub post: Post,
    /// Oldest ancestor first, immediate parent last.
    pub ancestors: Vec<Post>,
    /// Depth-first, highest-scoring sibling first. Excludes `post`.
    pub descendants: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadPage {
    pub post: Post,
    pub ancestors: Vec<Post>,
    pub descendants: Vec<ThreadSlice>,
}

pub fn linearize(thread: &ThreadNode) -> LinearizedThread {
    let ancestors = collect_ancestors(thread);
    let descendants = collect_descendants(thread);
    tracing::debug!(
        cid = %thread.post.cid,
        ancestors = ancestors.len(),
        descendants = descendants.len(),
        "linearized thread"
    );
    LinearizedThread {
        post: thread.post.clone(),
        ancestors,
        descendants,
    }
}

fn collect_ancestors(thread: &ThreadNode) -> Vec<Post> {
    let mut ancestors = Vec::new();
    let mut cursor = thread.parent.as_deref();
    while let Some(node) = cursor {
        ancestors.push(node.post.clone());
        cursor = node.parent.as_deref();
    }
    ancestors.reverse();
    ancestors
}

/// Pre-order walk over the reply tree with an explicit stack.
///
/// Replies of every node below the root are visited highest score first
/// (stable on ties). The root's own replies keep the order the server sent.
fn collect_descendants(thread: &ThreadNode) -> Vec<Post> {
    let mut descendants = Vec::new();
    let mut stack: Vec<&ThreadNode> = vec![thread];

    while let Some(node) = stack.pop() {
        // No replies array: the server stopped here. The node's own post is
        // not emitted either.
        let Some(replies) = node.replies.as_ref() else {
            continue;
        };
        let mut replies: Vec<&ThreadNode> = replies.iter().collect();
        if !std::ptr::eq(node, thread) {
            descendants.push(node.post.clone());
            replies.sort_by_key(|reply| Reverse(reply.post.score()));
        }
        stack.extend(replies.into_iter().rev());
    }

    descendants
}

/// Regroups a linearized thread's descendants into reply chains hanging
/// directly off the focused post.
///
/// Descendants arrive depth first, so a post's predecessor is either the tail
/// of the most recently opened slice or not on the page at all. Posts that
/// chain onto neither the focused post nor that tail are dropped.
pub fn build_thread_page(linearized: &LinearizedThread) -> ThreadPage {
    let root_cid = linearized.post.cid.as_str();
    let mut slices: Vec<ThreadSlice> = Vec::new();
    let mut dropped = 0usize;

    for post in &linearized.descendants {
        let Some(parent) = post.parent_cid() else {
            dropped += 1;
            continue;
        };
        if parent == root_cid {
            slices.push(Slice::new(post.clone()));
            continue;
        }
        match slices.last_mut() {
            Some(slice) if slice.last().map(Chained::cid) == Some(parent) => {
                slice.items.push(post.clone());
            }
            _ => {
                tracing::trace!(cid = %post.cid, parent, "reply does not extend open slice");
                dropped += 1;
            }
        }
    }

    tracing::debug!(
        cid = %root_cid,
        slices = slices.len(),
        dropped,
        "built thread page"
    );

    ThreadPage {
        post: linearized.post.clone(),
        ancestors: linearized.ancestors.clone(),
        descendants: slices,
    }
}
