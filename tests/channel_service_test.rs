/// Channel service tests - use case orchestration against mocked repositories
///
/// Tests cover:
/// - Title checks before anything is written
/// - Subscription guards (self, unknown ids, no-op)
/// - What gets handed to `save` for video and comment mutations
use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use mockall::predicate::eq;
use std::collections::HashMap;
use std::sync::Arc;

use vidhub::modules::channel::{
    Channel, ChannelRelations, ChannelRepository, ChannelService, NewChannel, ReplyDeletion,
};
use vidhub::modules::comment::{Comment, CommentRepository};
use vidhub::modules::video::{Video, VideoRepository};
use vidhub::shared::domain::{ChannelId, CommentId, MemberId, VideoId};
use vidhub::shared::errors::{AppError, AppResult};

mock! {
    pub ChannelRepo {}

    #[async_trait]
    impl ChannelRepository for ChannelRepo {
        async fn insert(&self, channel: &NewChannel) -> AppResult<Channel>;
        async fn find_by_id(&self, id: ChannelId) -> AppResult<Option<Channel>>;
        async fn find_by_ids(&self, ids: &[ChannelId]) -> AppResult<Vec<Channel>>;
        async fn find_by_title(&self, title: &str) -> AppResult<Option<Channel>>;
        async fn exists_by_title(&self, title: &str) -> AppResult<bool>;
        async fn save(&self, channel: &Channel) -> AppResult<Channel>;
        async fn delete(&self, id: ChannelId) -> AppResult<()>;
        async fn subscriber_count(&self, id: ChannelId) -> AppResult<i64>;
        async fn find_subscribed_channels(&self, id: ChannelId) -> AppResult<Vec<Channel>>;
        async fn find_subscribers(&self, id: ChannelId) -> AppResult<Vec<Channel>>;
    }
}

mock! {
    pub VideoRepo {}

    #[async_trait]
    impl VideoRepository for VideoRepo {
        async fn find_by_id(&self, id: VideoId) -> AppResult<Option<Video>>;
    }
}

mock! {
    pub CommentRepo {}

    #[async_trait]
    impl CommentRepository for CommentRepo {
        async fn find_by_id(&self, id: CommentId) -> AppResult<Option<Comment>>;
    }
}

fn channel(id: i64, title: &str) -> Channel {
    let now = Utc::now();
    Channel::restore(
        ChannelId(id),
        Channel::create(title, None, MemberId(1)),
        None,
        now,
        now,
    )
}

fn service(
    channels: MockChannelRepo,
    videos: MockVideoRepo,
    comments: MockCommentRepo,
) -> ChannelService {
    ChannelService::new(Arc::new(channels), Arc::new(videos), Arc::new(comments))
}

/// Channel repository that serves the given channels by id.
fn repo_with(channels: Vec<Channel>) -> MockChannelRepo {
    let by_id: HashMap<ChannelId, Channel> = channels.into_iter().map(|c| (c.id(), c)).collect();
    let mut repo = MockChannelRepo::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok(by_id.get(&id).cloned()));
    repo
}

// ================================================================================================
// CREATE / UPDATE
// ================================================================================================

#[tokio::test]
async fn create_channel_rejects_taken_title() {
    let mut channels = MockChannelRepo::new();
    channels
        .expect_exists_by_title()
        .withf(|title| title == "cooking")
        .times(1)
        .returning(|_| Ok(true));
    channels.expect_insert().times(0);

    let err = service(channels, MockVideoRepo::new(), MockCommentRepo::new())
        .create_channel("cooking".to_string(), None, MemberId(1))
        .await
        .unwrap_err();

    assert_eq!(err.violated_field(), Some("title"));
}

#[tokio::test]
async fn create_channel_checks_lengths_before_any_query() {
    // No expectations: any repository call would panic
    let svc = service(
        MockChannelRepo::new(),
        MockVideoRepo::new(),
        MockCommentRepo::new(),
    );

    let err = svc
        .create_channel("x".repeat(16), None, MemberId(1))
        .await
        .unwrap_err();
    assert_eq!(err.violated_field(), Some("title"));

    let err = svc
        .create_channel("ok".to_string(), Some("d".repeat(71)), MemberId(1))
        .await
        .unwrap_err();
    assert_eq!(err.violated_field(), Some("description"));
}

#[tokio::test]
async fn create_channel_inserts_new_channel() {
    let mut channels = MockChannelRepo::new();
    channels.expect_exists_by_title().returning(|_| Ok(false));
    channels
        .expect_insert()
        .withf(|new| new.title == "cooking" && new.member_id == MemberId(7))
        .times(1)
        .returning(|new| {
            let now = Utc::now();
            Ok(Channel::restore(ChannelId(1), new.clone(), None, now, now))
        });

    let created = service(channels, MockVideoRepo::new(), MockCommentRepo::new())
        .create_channel("cooking".to_string(), Some("recipes".to_string()), MemberId(7))
        .await
        .unwrap();

    assert_eq!(created.id, ChannelId(1));
    assert_eq!(created.description.as_deref(), Some("recipes"));
}

#[tokio::test]
async fn update_channel_rejects_title_of_another_channel() {
    let mut channels = repo_with(vec![channel(1, "mine")]);
    channels
        .expect_find_by_title()
        .returning(|_| Ok(Some(channel(2, "theirs"))));
    channels.expect_save().times(0);

    let err = service(channels, MockVideoRepo::new(), MockCommentRepo::new())
        .update_channel(ChannelId(1), Some("theirs".to_string()), None)
        .await
        .unwrap_err();

    assert_eq!(err.violated_field(), Some("title"));
}

#[tokio::test]
async fn update_channel_keeps_missing_fields() {
    let mut channels = repo_with(vec![channel(1, "mine")]);
    channels
        .expect_save()
        .times(1)
        .returning(|c| Ok(c.clone()));

    let updated = service(channels, MockVideoRepo::new(), MockCommentRepo::new())
        .update_channel(ChannelId(1), None, Some("about me".to_string()))
        .await
        .unwrap();

    assert_eq!(updated.title, "mine");
    assert_eq!(updated.description.as_deref(), Some("about me"));
}

#[tokio::test]
async fn get_unknown_channel_is_not_found() {
    let channels = repo_with(vec![]);

    let err = service(channels, MockVideoRepo::new(), MockCommentRepo::new())
        .get_channel(ChannelId(5))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

// ================================================================================================
// SUBSCRIPTIONS
// ================================================================================================

#[tokio::test]
async fn subscribing_to_self_is_invalid() {
    let svc = service(
        MockChannelRepo::new(),
        MockVideoRepo::new(),
        MockCommentRepo::new(),
    );

    let err = svc.subscribe(ChannelId(1), ChannelId(1)).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn subscribing_to_unknown_channel_is_not_found() {
    let channels = repo_with(vec![channel(1, "a")]);

    let err = service(channels, MockVideoRepo::new(), MockCommentRepo::new())
        .subscribe(ChannelId(1), ChannelId(2))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn subscribe_saves_the_subscribing_side() {
    let mut channels = repo_with(vec![channel(1, "a"), channel(2, "b")]);
    channels
        .expect_save()
        .withf(|c| c.id() == ChannelId(1) && c.subscribed_channels().contains(&ChannelId(2)))
        .times(1)
        .returning(|c| Ok(c.clone()));

    let changed = service(channels, MockVideoRepo::new(), MockCommentRepo::new())
        .subscribe(ChannelId(1), ChannelId(2))
        .await
        .unwrap();

    assert!(changed);
}

#[tokio::test]
async fn repeated_subscribe_writes_nothing() {
    let a = channel(1, "a").with_relations(ChannelRelations {
        subscribed_channels: [ChannelId(2)].into_iter().collect(),
        ..Default::default()
    });
    let mut channels = repo_with(vec![a, channel(2, "b")]);
    channels.expect_save().times(0);

    let changed = service(channels, MockVideoRepo::new(), MockCommentRepo::new())
        .subscribe(ChannelId(1), ChannelId(2))
        .await
        .unwrap();

    assert!(!changed);
}

#[tokio::test]
async fn subscribers_of_lists_summaries() {
    let mut channels = repo_with(vec![channel(2, "b")]);
    channels
        .expect_find_subscribers()
        .with(eq(ChannelId(2)))
        .returning(|_| Ok(vec![channel(1, "a")]));

    let followers = service(channels, MockVideoRepo::new(), MockCommentRepo::new())
        .subscribers_of(ChannelId(2))
        .await
        .unwrap();

    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].title, "a");
}

// ================================================================================================
// VIDEOS
// ================================================================================================

#[tokio::test]
async fn remove_video_saves_channel_without_it() {
    let owner = channel(1, "owner").with_relations(ChannelRelations {
        videos: [VideoId(10), VideoId(11)].into_iter().collect(),
        ..Default::default()
    });
    let mut channels = repo_with(vec![owner]);
    channels
        .expect_save()
        .withf(|c| {
            c.videos().len() == 1
                && c.videos().contains(&VideoId(11))
                && c.pending_changes().videos.removed().contains(&VideoId(10))
        })
        .times(1)
        .returning(|c| Ok(c.clone()));

    let mut videos = MockVideoRepo::new();
    videos
        .expect_find_by_id()
        .with(eq(VideoId(10)))
        .returning(|id| Ok(Some(Video::new(id, ChannelId(1), "clip"))));

    let response = service(channels, videos, MockCommentRepo::new())
        .remove_video(ChannelId(1), VideoId(10))
        .await
        .unwrap();

    assert_eq!(response.videos, vec![VideoId(11)]);
}

#[tokio::test]
async fn like_unknown_video_is_not_found() {
    let channels = repo_with(vec![channel(1, "fan")]);
    let mut videos = MockVideoRepo::new();
    videos.expect_find_by_id().returning(|_| Ok(None));

    let err = service(channels, videos, MockCommentRepo::new())
        .like_video(ChannelId(1), VideoId(3))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

// ================================================================================================
// COMMENTS
// ================================================================================================

fn thread() -> Comment {
    let nested = Comment::new(CommentId(3), ChannelId(1), "nested");
    let reply = Comment::new(CommentId(2), ChannelId(1), "reply").with_reply(nested);
    Comment::new(CommentId(1), ChannelId(1), "root").with_reply(reply)
}

fn author() -> Channel {
    channel(1, "author").with_relations(ChannelRelations {
        comments: [CommentId(1), CommentId(2), CommentId(3)].into_iter().collect(),
        ..Default::default()
    })
}

fn comment_repo() -> MockCommentRepo {
    let mut comments = MockCommentRepo::new();
    comments.expect_find_by_id().returning(|_| Ok(Some(thread())));
    comments
}

#[tokio::test]
async fn delete_comment_defaults_to_direct_replies() {
    let mut channels = repo_with(vec![author()]);
    channels
        .expect_save()
        .withf(|c| {
            c.comments().len() == 1
                && c.comments().contains(&CommentId(3))
                && !c.pending_changes().comments.removed().contains(&CommentId(3))
        })
        .times(1)
        .returning(|c| Ok(c.clone()));

    let svc = service(channels, MockVideoRepo::new(), comment_repo());
    assert_eq!(svc.reply_deletion(), ReplyDeletion::DirectReplies);

    svc.delete_comment(ChannelId(1), CommentId(1)).await.unwrap();
}

#[tokio::test]
async fn delete_comment_can_clear_whole_thread() {
    let mut channels = repo_with(vec![author()]);
    channels
        .expect_save()
        .withf(|c| c.comments().is_empty())
        .times(1)
        .returning(|c| Ok(c.clone()));

    service(channels, MockVideoRepo::new(), comment_repo())
        .with_reply_deletion(ReplyDeletion::WholeThread)
        .delete_comment(ChannelId(1), CommentId(1))
        .await
        .unwrap();
}

#[tokio::test]
async fn deleting_someone_elses_comment_is_invalid() {
    let mut channels = repo_with(vec![channel(9, "stranger")]);
    channels.expect_save().times(0);

    let err = service(channels, MockVideoRepo::new(), comment_repo())
        .delete_comment(ChannelId(9), CommentId(1))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn like_comment_records_the_like() {
    let mut channels = repo_with(vec![channel(4, "fan")]);
    channels
        .expect_save()
        .withf(|c| c.comments_like_lists().contains(&CommentId(1)))
        .times(1)
        .returning(|c| Ok(c.clone()));

    let response = service(channels, MockVideoRepo::new(), comment_repo())
        .like_comment(ChannelId(4), CommentId(1))
        .await
        .unwrap();

    assert_eq!(response.comments_like_lists, vec![CommentId(1)]);
}
