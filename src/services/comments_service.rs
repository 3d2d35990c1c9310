use crate::{
    db::models::comment::{CommentWithAuthor, CreateCommentRequest, NewComment},
    db::store::Store,
    error::AppResult,
    services::{context::RequestContext, tasks_service::TasksService},
};

pub struct CommentsService;

impl CommentsService {
    pub fn list(
        store: &dyn Store,
        ctx: &RequestContext,
        raw_task_id: &str,
    ) -> AppResult<Vec<CommentWithAuthor>> {
        let task = TasksService::owned(store, ctx, raw_task_id)?;
        store.list_comments_by_task(task.id)
    }

    pub fn create(
        store: &dyn Store,
        ctx: &RequestContext,
        raw_task_id: &str,
        req: CreateCommentRequest,
    ) -> AppResult<CommentWithAuthor> {
        let task = TasksService::owned(store, ctx, raw_task_id)?;
        store.insert_comment(NewComment::new(task.id, ctx.user_id, req.content))
    }
}
