use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::{
    app_state::AppState,
    graphql::helpers::parse_id,
    models::{
        domain::ResultSummary,
        dto::{
            request::{CombinedQuestionsRequest, SelectAnswerRequest, StartTestRequest},
            response::{CombinedQuestionsResponse, DeleteSessionResponse, SessionSnapshot},
        },
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_session(&self, ctx: &Context<'_>) -> Result<SessionSnapshot> {
        let state = ctx.data::<AppState>()?;
        state
            .session_service
            .create_session()
            .await
            .map_err(|e| e.extend())
    }

    async fn start_session(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: StartTestRequest,
    ) -> Result<SessionSnapshot> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;
        let configuration = input.into_configuration().map_err(|e| e.extend())?;

        state
            .session_service
            .start(&id, configuration)
            .await
            .map_err(|e| e.extend())
    }

    async fn select_answer(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: SelectAnswerRequest,
    ) -> Result<SessionSnapshot> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;

        state
            .session_service
            .select_answer(&id, &input.question_id, &input.option)
            .await
            .map_err(|e| e.extend())
    }

    async fn submit_session(&self, ctx: &Context<'_>, id: ID) -> Result<ResultSummary> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;

        state
            .session_service
            .submit(&id)
            .await
            .map_err(|e| e.extend())
    }

    async fn reset_session(&self, ctx: &Context<'_>, id: ID) -> Result<SessionSnapshot> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;

        state
            .session_service
            .reset(&id)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_session(&self, ctx: &Context<'_>, id: ID) -> Result<DeleteSessionResponse> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).map_err(|e| e.extend())?;

        state
            .session_service
            .delete_session(&id)
            .await
            .map_err(|e| e.extend())?;

        Ok(DeleteSessionResponse {
            message: format!("Session {} deleted", id),
        })
    }

    async fn combined_questions(
        &self,
        ctx: &Context<'_>,
        input: CombinedQuestionsRequest,
    ) -> Result<CombinedQuestionsResponse> {
        let state = ctx.data::<AppState>()?;
        state
            .question_service
            .combined_questions(input)
            .await
            .map_err(|e| e.extend())
    }
}
