//! GraphQL schema definition.

use juniper::{EmptySubscription, FieldResult, RootNode};

use super::context::GraphQLContext;

use crate::domains::chats::data::{ChatData, MessageData};
use crate::domains::chats::edges as chat_edges;
use crate::domains::claims::data::{ClaimData, ClaimDecisionData, SubmitClaimInput};
use crate::domains::claims::edges as claim_edges;
use crate::domains::identity::data::{UpdateProfileInput, UserData};
use crate::domains::identity::edges as identity_edges;
use crate::domains::posts::data::{CreatePostInput, PostData, TimeRangeData};
use crate::domains::posts::edges as post_edges;

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    /// The current user's profile
    async fn me(ctx: &GraphQLContext) -> FieldResult<Option<UserData>> {
        identity_edges::me(ctx).await
    }

    /// Posts within a recency window (default: last seven days)
    async fn posts(
        ctx: &GraphQLContext,
        time_range: Option<TimeRangeData>,
    ) -> FieldResult<Vec<PostData>> {
        post_edges::posts(ctx, time_range).await
    }

    /// A single post by id
    async fn post(ctx: &GraphQLContext, id: String) -> FieldResult<Option<PostData>> {
        post_edges::post(ctx, id).await
    }

    /// The current user's own posts
    async fn my_posts(ctx: &GraphQLContext) -> FieldResult<Vec<PostData>> {
        post_edges::my_posts(ctx).await
    }

    /// Claims the current user has submitted
    async fn my_claims(ctx: &GraphQLContext) -> FieldResult<Vec<ClaimData>> {
        claim_edges::my_claims(ctx).await
    }

    /// Incoming claims against the current user's posts
    async fn claims_on_my_posts(ctx: &GraphQLContext) -> FieldResult<Vec<ClaimData>> {
        claim_edges::claims_on_my_posts(ctx).await
    }

    /// Claims against one post (owner only)
    async fn claims_for_post(ctx: &GraphQLContext, post_id: String) -> FieldResult<Vec<ClaimData>> {
        claim_edges::claims_for_post(ctx, post_id).await
    }

    /// The current user's chats
    async fn my_chats(ctx: &GraphQLContext) -> FieldResult<Vec<ChatData>> {
        chat_edges::my_chats(ctx).await
    }

    /// A single chat (participants only)
    async fn chat(ctx: &GraphQLContext, id: String) -> FieldResult<ChatData> {
        chat_edges::chat(ctx, id).await
    }

    /// Messages in a chat, oldest first (participants only)
    async fn messages(ctx: &GraphQLContext, chat_id: String) -> FieldResult<Vec<MessageData>> {
        chat_edges::messages(ctx, chat_id).await
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    /// Ensure a profile row exists for the authenticated principal
    async fn ensure_profile(ctx: &GraphQLContext) -> FieldResult<UserData> {
        identity_edges::ensure_profile(ctx).await
    }

    /// Update the current user's names and profile picture
    async fn update_profile(
        ctx: &GraphQLContext,
        input: UpdateProfileInput,
    ) -> FieldResult<UserData> {
        identity_edges::update_profile(ctx, input).await
    }

    /// Delete the current user's account and everything it owns
    async fn delete_account(ctx: &GraphQLContext) -> FieldResult<bool> {
        identity_edges::delete_account(ctx).await
    }

    /// Publish a lost/found item post
    async fn create_post(ctx: &GraphQLContext, input: CreatePostInput) -> FieldResult<PostData> {
        post_edges::create_post_mutation(ctx, input).await
    }

    /// Mark a claimed post as handed over
    async fn mark_resolved(ctx: &GraphQLContext, post_id: String) -> FieldResult<PostData> {
        post_edges::mark_resolved(ctx, post_id).await
    }

    /// Submit a verification questionnaire against an active post
    async fn submit_claim(ctx: &GraphQLContext, input: SubmitClaimInput) -> FieldResult<ClaimData> {
        claim_edges::submit_claim_mutation(ctx, input).await
    }

    /// Approve a pending claim (post owner only)
    async fn approve_claim(ctx: &GraphQLContext, claim_id: String) -> FieldResult<ClaimDecisionData> {
        claim_edges::approve_claim(ctx, claim_id).await
    }

    /// Reject a pending claim (post owner only)
    async fn reject_claim(ctx: &GraphQLContext, claim_id: String) -> FieldResult<ClaimDecisionData> {
        claim_edges::reject_claim(ctx, claim_id).await
    }

    /// Start (or return the existing) chat with a post's owner
    async fn start_chat(ctx: &GraphQLContext, post_id: String) -> FieldResult<ChatData> {
        chat_edges::start_chat(ctx, post_id).await
    }

    /// Send a message to a chat the current user participates in
    async fn send_message(
        ctx: &GraphQLContext,
        chat_id: String,
        content: String,
    ) -> FieldResult<MessageData> {
        chat_edges::send_message(ctx, chat_id, content).await
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
