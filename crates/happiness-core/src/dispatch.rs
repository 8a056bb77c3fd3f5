use crate::counter::VisitCounter;
use crate::error::StorageError;
use crate::token::VisitResult;

impl VisitCounter {
    /// Hook for a served page. An absent or empty token is not a visit and
    /// never touches storage.
    pub fn page_served(&self, token: Option<&str>) -> Option<Result<VisitResult, StorageError>> {
        let token = token.filter(|t| !t.is_empty())?;
        Some(self.record_visit(token))
    }
}
