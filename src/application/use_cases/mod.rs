pub mod compliance_tagger;
pub mod generate_test_cases;
pub mod generation;
pub mod resolver;
pub mod result_store;
pub mod session_registry;
