use super::result_store::ResultStore;
use crate::domain::error::{AppError, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Owns every live session's result store. Callers borrow a store through
/// `with_store`, which keeps the lock scoped to a synchronous closure.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, ResultStore>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> Result<String> {
        let session_id = Uuid::new_v4().to_string();
        self.lock()?.insert(session_id.clone(), ResultStore::new());
        Ok(session_id)
    }

    pub fn remove(&self, session_id: &str) -> Result<()> {
        self.lock()?
            .remove(session_id)
            .map(|_| ())
            .ok_or_else(|| not_found(session_id))
    }

    pub fn contains(&self, session_id: &str) -> Result<bool> {
        Ok(self.lock()?.contains_key(session_id))
    }

    pub fn session_count(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn with_store<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut ResultStore) -> T,
    ) -> Result<T> {
        let mut sessions = self.lock()?;
        let store = sessions
            .get_mut(session_id)
            .ok_or_else(|| not_found(session_id))?;
        Ok(f(store))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, ResultStore>>> {
        self.sessions
            .lock()
            .map_err(|_| AppError::Internal("Session registry lock poisoned".to_string()))
    }
}

fn not_found(session_id: &str) -> AppError {
    AppError::NotFound(format!("Session {} does not exist", session_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_case_result::GeneratedTestCase;
    use chrono::Local;

    fn generated() -> GeneratedTestCase {
        GeneratedTestCase {
            requirement: "r".to_string(),
            test_cases: "t".to_string(),
            compliance_tags: vec!["General Healthcare".to_string()],
        }
    }

    #[test]
    fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new();
        let first = registry.create().unwrap();
        let second = registry.create().unwrap();
        assert_ne!(first, second);

        registry
            .with_store(&first, |store| {
                store.append(generated(), Local::now());
                store.append(generated(), Local::now());
            })
            .unwrap();
        let id = registry
            .with_store(&second, |store| {
                store.append(generated(), Local::now()).traceability_id.clone()
            })
            .unwrap();

        assert_eq!(id, "REQ-001");
        assert_eq!(registry.with_store(&first, |s| s.len()).unwrap(), 2);
    }

    #[test]
    fn test_unknown_session() {
        let registry = SessionRegistry::new();
        let err = registry.with_store("missing", |s| s.len()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(matches!(registry.remove("missing"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_remove_drops_results() {
        let registry = SessionRegistry::new();
        let id = registry.create().unwrap();
        assert_eq!(registry.session_count().unwrap(), 1);
        registry.remove(&id).unwrap();
        assert!(!registry.contains(&id).unwrap());
        assert_eq!(registry.session_count().unwrap(), 0);
    }
}
