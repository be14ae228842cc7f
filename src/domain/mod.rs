pub mod compliance;
pub mod error;
pub mod llm_config;
pub mod requirement;
pub mod test_case_result;
