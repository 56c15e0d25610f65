pub mod graphql_handler;
pub mod health_handler;
pub mod question_handler;
pub mod session_handler;

use actix_web::web;

pub use graphql_handler::{graphiql, graphql};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use question_handler::{combined_questions, list_questions, list_subjects};
pub use session_handler::{
    create_session, delete_session, get_result, get_session, reset_session, select_answer,
    start_session, submit_session,
};

/// Registers every REST route. The GraphQL endpoints need the schema as app
/// data and are mounted separately.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_ready)
        .service(health_check_live)
        .service(list_subjects)
        .service(combined_questions)
        .service(list_questions)
        .service(create_session)
        .service(get_session)
        .service(start_session)
        .service(select_answer)
        .service(submit_session)
        .service(reset_session)
        .service(get_result)
        .service(delete_session);
}
