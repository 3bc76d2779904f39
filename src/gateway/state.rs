use std::path::PathBuf;
use std::sync::Arc;

use crate::model::{CompanyProfile, Regulation};
use crate::narrative::NarrativeGenerator;
use crate::scoring::RelevanceScorer;
use crate::storage::AnalysisStore;

#[derive(Clone)]
pub struct HandlerState {
    pub scorer: Arc<RelevanceScorer>,

    pub store: Arc<dyn AnalysisStore>,

    /// Directory behind `store`, when file-backed. Checked by `/ready`.
    pub storage_path: Option<PathBuf>,

    /// Used when a request omits `profile`.
    pub default_profile: Option<Arc<CompanyProfile>>,

    /// Used when a report request omits `regulations`.
    pub default_regulations: Arc<Vec<Regulation>>,

    pub narrator: Option<Arc<dyn NarrativeGenerator>>,
}

impl HandlerState {
    pub fn new(scorer: Arc<RelevanceScorer>, store: Arc<dyn AnalysisStore>) -> Self {
        Self {
            scorer,
            store,
            storage_path: None,
            default_profile: None,
            default_regulations: Arc::new(Vec::new()),
            narrator: None,
        }
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn with_default_profile(mut self, profile: CompanyProfile) -> Self {
        self.default_profile = Some(Arc::new(profile));
        self
    }

    pub fn with_default_regulations(mut self, regulations: Vec<Regulation>) -> Self {
        self.default_regulations = Arc::new(regulations);
        self
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn NarrativeGenerator>) -> Self {
        self.narrator = Some(narrator);
        self
    }
}
