//! Integration tests for chats: find-or-create semantics, participant
//! checks, message ordering, decision-notification idempotence, and live
//! delivery through the chat hub.

mod common;

use common::*;
use test_context::test_context;

use foundly_core::domains::chats::actions::{notify_decision, send_message};
use foundly_core::domains::chats::models::{ChatRecord, MessageKind, MessageRecord};

#[test_context(TestHarness)]
#[tokio::test]
async fn find_or_create_returns_the_same_chat(ctx: &TestHarness) {
    let owner = create_test_user(&ctx.db_pool, "Dana").await.unwrap();
    let claimant = create_test_user(&ctx.db_pool, "Riley").await.unwrap();
    let post_id = create_test_post(&ctx.db_pool, owner.id, "Lost Phone")
        .await
        .unwrap();

    let a = ChatRecord::find_or_create(post_id, owner.id, claimant.id, &ctx.db_pool)
        .await
        .unwrap();
    let b = ChatRecord::find_or_create(post_id, owner.id, claimant.id, &ctx.db_pool)
        .await
        .unwrap();
    // Participant order doesn't matter
    let c = ChatRecord::find_or_create(post_id, claimant.id, owner.id, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(a.id, b.id);
    assert_eq!(a.id, c.id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn messages_are_ordered_and_typed(ctx: &TestHarness) {
    let owner = create_test_user(&ctx.db_pool, "Dana").await.unwrap();
    let claimant = create_test_user(&ctx.db_pool, "Riley").await.unwrap();
    let post_id = create_test_post(&ctx.db_pool, owner.id, "Lost Hat")
        .await
        .unwrap();
    let chat = ChatRecord::find_or_create(post_id, owner.id, claimant.id, &ctx.db_pool)
        .await
        .unwrap();

    send_message(owner.id, chat.id, "Hi, can you describe it?".to_string(), &ctx.deps)
        .await
        .unwrap();
    send_message(claimant.id, chat.id, "Wool, dark green.".to_string(), &ctx.deps)
        .await
        .unwrap();

    let messages = MessageRecord::find_for_chat(chat.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "Hi, can you describe it?");
    assert_eq!(messages[1].content, "Wool, dark green.");
    assert!(messages
        .iter()
        .all(|m| m.kind_enum().unwrap() == MessageKind::User));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn non_participants_cannot_send(ctx: &TestHarness) {
    let owner = create_test_user(&ctx.db_pool, "Dana").await.unwrap();
    let claimant = create_test_user(&ctx.db_pool, "Riley").await.unwrap();
    let stranger = create_test_user(&ctx.db_pool, "Jordan").await.unwrap();
    let post_id = create_test_post(&ctx.db_pool, owner.id, "Lost Gloves")
        .await
        .unwrap();
    let chat = ChatRecord::find_or_create(post_id, owner.id, claimant.id, &ctx.db_pool)
        .await
        .unwrap();

    let err = send_message(stranger.id, chat.id, "hello".to_string(), &ctx.deps)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not a participant"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn empty_messages_are_rejected(ctx: &TestHarness) {
    let owner = create_test_user(&ctx.db_pool, "Dana").await.unwrap();
    let claimant = create_test_user(&ctx.db_pool, "Riley").await.unwrap();
    let post_id = create_test_post(&ctx.db_pool, owner.id, "Lost Charger")
        .await
        .unwrap();
    let chat = ChatRecord::find_or_create(post_id, owner.id, claimant.id, &ctx.db_pool)
        .await
        .unwrap();

    let err = send_message(owner.id, chat.id, "   ".to_string(), &ctx.deps)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("empty"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn decision_notifications_are_idempotent(ctx: &TestHarness) {
    let owner = create_test_user(&ctx.db_pool, "Dana").await.unwrap();
    let claimant = create_test_user(&ctx.db_pool, "Riley").await.unwrap();
    let post_id = create_test_post(&ctx.db_pool, owner.id, "Lost Book")
        .await
        .unwrap();

    let key = format!("{}:decision", post_id);
    let (chat_a, msg_a) = notify_decision(
        post_id,
        owner.id,
        claimant.id,
        "Dana has accepted Riley's claim for \"Lost Book\". Start chatting!",
        &key,
        &ctx.deps,
    )
    .await
    .unwrap();
    let (chat_b, msg_b) = notify_decision(
        post_id,
        owner.id,
        claimant.id,
        "Dana has accepted Riley's claim for \"Lost Book\". Start chatting!",
        &key,
        &ctx.deps,
    )
    .await
    .unwrap();

    assert_eq!(chat_a, chat_b);
    assert_eq!(msg_a.id, msg_b.id);

    let messages = MessageRecord::find_for_chat(chat_a, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind_enum().unwrap(), MessageKind::System);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn sent_messages_reach_live_subscribers(ctx: &TestHarness) {
    let owner = create_test_user(&ctx.db_pool, "Dana").await.unwrap();
    let claimant = create_test_user(&ctx.db_pool, "Riley").await.unwrap();
    let post_id = create_test_post(&ctx.db_pool, owner.id, "Lost Bike Lock")
        .await
        .unwrap();
    let chat = ChatRecord::find_or_create(post_id, owner.id, claimant.id, &ctx.db_pool)
        .await
        .unwrap();

    let mut rx = ctx.deps.chat_hub.subscribe(chat.id).await;

    send_message(owner.id, chat.id, "combination is 0420".to_string(), &ctx.deps)
        .await
        .unwrap();

    let payload = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for broadcast")
        .unwrap();
    assert_eq!(payload["content"], "combination is 0420");
    assert_eq!(payload["kind"], "user");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn start_chat_and_send_via_graphql(ctx: &TestHarness) {
    let owner = create_test_user(&ctx.db_pool, "Dana").await.unwrap();
    let claimant = create_test_user(&ctx.db_pool, "Riley").await.unwrap();
    let post_id = create_test_post(&ctx.db_pool, owner.id, "Lost Camera")
        .await
        .unwrap();

    let claimant_client = ctx.graphql_as(*claimant.id.as_uuid(), &claimant.email);

    let started = claimant_client
        .execute(&format!(
            r#"mutation {{ startChat(postId: "{}") {{ id postId }} }}"#,
            post_id
        ))
        .await;
    assert!(started.is_ok(), "errors: {:?}", started.errors);
    let chat_id = started.get("startChat.id");
    let chat_id = chat_id.as_str().unwrap();

    let sent = claimant_client
        .execute(&format!(
            r#"mutation {{ sendMessage(chatId: "{}", content: "Is this still around?") {{ content kind }} }}"#,
            chat_id
        ))
        .await;
    assert!(sent.is_ok(), "errors: {:?}", sent.errors);
    assert_eq!(sent.get("sendMessage.kind"), "user");

    let listed = claimant_client
        .execute(&format!(
            r#"{{ messages(chatId: "{}") {{ content }} }}"#,
            chat_id
        ))
        .await;
    assert!(listed.is_ok());
    assert_eq!(listed.get("messages")[0]["content"], "Is this still around?");

    // The owner sees the chat too; a third party does not
    let owner_client = ctx.graphql_as(*owner.id.as_uuid(), &owner.email);
    let owner_chats = owner_client.execute("{ myChats { id } }").await;
    assert!(owner_chats.is_ok());
    assert_eq!(owner_chats.get("myChats")[0]["id"], chat_id);

    let stranger = create_test_user(&ctx.db_pool, "Jordan").await.unwrap();
    let stranger_client = ctx.graphql_as(*stranger.id.as_uuid(), &stranger.email);
    let denied = stranger_client
        .execute(&format!(
            r#"{{ messages(chatId: "{}") {{ content }} }}"#,
            chat_id
        ))
        .await;
    assert!(!denied.is_ok());
}
