pub mod countdown;
pub mod question_service;
pub mod sampler_service;
pub mod scoring_service;
pub mod session_service;
