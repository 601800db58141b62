use std::sync::Arc;

use tokio::sync::Mutex;

use super::{CompatibilityResult, PersonInput, compute_compatibility};
use crate::{analysis::CompatibilityEngine, locale::Locale};

/// Remembers the most recent result and reuses it while the inputs stay the same.
#[derive(Default)]
pub struct CompatibilityMemo {
    last: Mutex<Option<Memoized>>,
}

struct Memoized {
    persons: Vec<PersonInput>,
    locale: Locale,
    result: Arc<CompatibilityResult>,
}

impl CompatibilityMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_compute(
        &self,
        engine: &dyn CompatibilityEngine,
        persons: Vec<PersonInput>,
        locale: Locale,
    ) -> Arc<CompatibilityResult> {
        let mut guard = self.last.lock().await;

        if let Some(memo) = guard.as_ref()
            && memo.locale == locale
            && memo.persons == persons
        {
            return Arc::clone(&memo.result);
        }

        let result = Arc::new(compute_compatibility(engine, persons.clone(), locale));
        *guard = Some(Memoized {
            persons,
            locale,
            result: Arc::clone(&result),
        });
        result
    }
}
