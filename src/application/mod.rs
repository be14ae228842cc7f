pub mod use_cases;

pub use use_cases::generate_test_cases::GenerateTestCasesUseCase;
pub use use_cases::generation::{GenerationBackend, TestCaseGenerator};
pub use use_cases::resolver::Resolver;
pub use use_cases::result_store::ResultStore;
pub use use_cases::session_registry::SessionRegistry;
