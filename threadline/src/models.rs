use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub did: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Pointer to another record by content id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrongRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub cid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRef {
    pub root: StrongRef,
    pub parent: StrongRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub cid: String,
    pub author: Author,
    #[serde(default)]
    pub record: PostRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<serde_json::Value>,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub repost_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_at: Option<String>,
}

impl Post {
    /// Engagement score used to rank sibling replies.
    pub fn score(&self) -> u64 {
        self.reply_count
            .saturating_add(self.repost_count)
            .saturating_add(self.like_count)
    }

    pub fn is_reply(&self) -> bool {
        self.record.reply.is_some()
    }

    pub fn parent_cid(&self) -> Option<&str> {
        self.record.reply.as_ref().map(|r| r.parent.cid.as_str())
    }

    pub fn root_cid(&self) -> Option<&str> {
        self.record.reply.as_ref().map(|r| r.root.cid.as_str())
    }
}

/// The `reason` attached to a feed entry that exists because someone reposted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepostInfo {
    pub by: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_at: Option<String>,
}

/// Hydrated parent and root posts the timeline API ships alongside a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyContext {
    pub parent: Post,
    pub root: Post,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub post: Post,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<RepostInfo>,
}

impl FeedItem {
    pub fn cid(&self) -> &str {
        &self.post.cid
    }

    pub fn is_repost(&self) -> bool {
        self.reason.is_some()
    }

    pub fn is_reply(&self) -> bool {
        self.post.is_reply()
    }
}

/// One page of the timeline as returned by the feed endpoint, newest entry first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    #[serde(default)]
    pub feed: Vec<FeedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// A post together with its materialized ancestor chain and reply tree.
///
/// `replies` is `None` when the server stopped expanding at its depth limit;
/// that is read as "no further descendants".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadNode {
    pub post: Post,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<ThreadNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<ThreadNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub thread: ThreadNode,
}
