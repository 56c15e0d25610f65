use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::{
    app_state::AppState,
    graphql::helpers::parse_id,
    models::{
        domain::ResultSummary,
        dto::{
            request::QuestionQueryParams,
            response::{QuestionPage, SessionSnapshot, SubjectDto},
        },
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn subjects(&self, ctx: &Context<'_>) -> Result<Vec<SubjectDto>> {
        let state = ctx.data::<AppState>()?;
        Ok(state.question_service.subjects())
    }

    /// Browse a subject's question bank. Answers are included.
    async fn questions(
        &self,
        ctx: &Context<'_>,
        subject: String,
        page: Option<u64>,
        limit: Option<u64>,
        topic: Option<String>,
        difficulty: Option<String>,
    ) -> Result<QuestionPage> {
        let state = ctx.data::<AppState>()?;
        let params = QuestionQueryParams {
            page,
            limit,
            topic,
            difficulty,
        };

        state
            .question_service
            .list_questions(&subject, &params)
            .await
            .map_err(|e| e.extend())
    }

    async fn session(&self, ctx: &Context<'_>, id: ID) -> Result<SessionSnapshot> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;

        state
            .session_service
            .snapshot(&id)
            .await
            .map_err(|e| e.extend())
    }

    async fn session_result(&self, ctx: &Context<'_>, id: ID) -> Result<ResultSummary> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;

        state
            .session_service
            .result(&id)
            .await
            .map_err(|e| e.extend())
    }
}
