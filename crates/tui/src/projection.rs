//! Pure derivation of renderable view state from a run.
//!
//! Nothing in here mutates the run. The only UI-local state is the
//! [`FileSelection`], which survives between frames.

use sc_protocol::run_models::{GeneratedFile, PipelineRun};
use sc_protocol::stage_models::{StageId, StageStatus};
use uuid::Uuid;

/// How a stage card is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageBadge {
    Waiting,
    Active,
    Completed,
    Failed,
}

impl From<StageStatus> for StageBadge {
    fn from(status: StageStatus) -> Self {
        match status {
            StageStatus::Waiting => StageBadge::Waiting,
            StageStatus::Working => StageBadge::Active,
            StageStatus::Completed => StageBadge::Completed,
            StageStatus::Failed => StageBadge::Failed,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    /// Badge per stage, in pipeline order.
    pub stages: Vec<(StageId, StageBadge)>,
    pub active_stage: Option<StageId>,
    pub completed: Vec<StageId>,
    /// Progress bar fill, 0 to 100.
    pub progress: u8,
    pub show_files: bool,
    pub file_names: Vec<String>,
    pub selected_file: Option<usize>,
    pub show_preview: bool,
    pub preview_url: Option<String>,
    pub show_download: bool,
    pub download_url: Option<String>,
    /// Client-side validation message, else the run error. Validation is
    /// cleared on every start or reset, so when set it is the newer of the two.
    pub error_banner: Option<String>,
    pub can_start: bool,
    pub can_reset: bool,
    pub can_push: bool,
}

/// Derive the view model for `run`.
pub fn project(
    run: &PipelineRun,
    selection: &FileSelection,
    validation_error: Option<&str>,
) -> ViewModel {
    let files = &run.artifacts.files;

    ViewModel {
        stages: StageId::ALL
            .into_iter()
            .map(|stage| (stage, run.status_of(stage).into()))
            .collect(),
        active_stage: run.active_stage(),
        completed: run.completed.clone(),
        progress: run.progress.min(100),
        show_files: !files.is_empty(),
        file_names: files.iter().map(|f| f.name.clone()).collect(),
        selected_file: selection.selected_index(run),
        show_preview: run.artifacts.preview_url.is_some(),
        preview_url: run.artifacts.preview_url.clone(),
        show_download: run.is_completed(StageId::Deployer),
        download_url: run.artifacts.download_url.clone(),
        error_banner: validation_error
            .map(str::to_string)
            .or_else(|| run.error.clone()),
        can_start: !run.is_active,
        can_reset: true,
        can_push: !files.is_empty(),
    }
}

/// Identity of a file list: the run that produced it and its file names.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileListIdentity {
    run_id: Uuid,
    names: Vec<String>,
}

impl FileListIdentity {
    fn of(run: &PipelineRun) -> Option<Self> {
        if run.artifacts.files.is_empty() {
            return None;
        }
        Some(Self {
            run_id: run.id,
            names: run.artifacts.files.iter().map(|f| f.name.clone()).collect(),
        })
    }
}

/// Which generated file is shown.
///
/// Falls back to the first file whenever the file list changes identity,
/// such as when a new build replaces it.
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    identity: Option<FileListIdentity>,
    index: usize,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the current choice if the run's file list changed.
    pub fn sync(&mut self, run: &PipelineRun) {
        let identity = FileListIdentity::of(run);
        if identity != self.identity {
            self.identity = identity;
            self.index = 0;
        }
    }

    /// Selected index into the run's files, or `None` when there are none.
    pub fn selected_index(&self, run: &PipelineRun) -> Option<usize> {
        let len = run.artifacts.files.len();
        if len == 0 {
            return None;
        }
        if self.identity != FileListIdentity::of(run) {
            return Some(0);
        }
        Some(self.index.min(len - 1))
    }

    pub fn selected_file<'a>(&self, run: &'a PipelineRun) -> Option<&'a GeneratedFile> {
        self.selected_index(run)
            .and_then(|index| run.artifacts.files.get(index))
    }

    pub fn select_next(&mut self, run: &PipelineRun) {
        self.sync(run);
        if self.index + 1 < run.artifacts.files.len() {
            self.index += 1;
        }
    }

    pub fn select_previous(&mut self, run: &PipelineRun) {
        self.sync(run);
        self.index = self.index.saturating_sub(1);
    }
}
