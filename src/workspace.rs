// src/workspace.rs
//! A recruiter's live dashboard: one screen per record kind, the record collaborator
//! behind them, and the pending latches that keep collaborator calls non-reentrant.

use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::app_log;
use crate::core::{CopyFeedback, CopyResult, LinkSharer, PendingFlag, RecordApi};
use crate::dashboard::{DashboardSummary, JobStats};
use crate::error::{DashboardError, DashboardResult};
use crate::job_posting::{
    ApplicationForm, FormView, JobDraft, JobPreview, NewQuestion, PostingMode, PostingReceipt,
};
use crate::lfd::{
    ActionOutcome, FilterState, ListView, PanelView, Record, RecordId, RecordKind, RecordStore,
    Screen, StatusFilter,
};
use crate::profile::{find_plan, plan_views, AccountProfile, PlanView, ProfileEditor, Subscription};
use crate::types::{Application, Candidate, Job, JobStatus};
use crate::usage::{ActivityEntry, UsageReport, UsageTracker};
use crate::utils::new_job_id;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub struct WorkspaceState {
    pub jobs: Screen<Job>,
    pub candidates: Screen<Candidate>,
    /// Applications screens, one per job, loaded on first visit.
    pub applications: HashMap<RecordId, Screen<Application>>,
    pub usage: UsageTracker,
    pub profile: ProfileEditor,
    pub subscription: Subscription,
    pub link_feedback: CopyFeedback,
    /// Application forms of postings that have been customized.
    pub forms: HashMap<RecordId, ApplicationForm>,
}

/// Record kinds that have a screen in the workspace.
pub trait Screened: Record {
    /// Name used in activity entries.
    fn display_name(&self) -> &str;

    fn screen<'a>(
        state: &'a mut WorkspaceState,
        scope: Option<&RecordId>,
    ) -> DashboardResult<&'a mut Screen<Self>>;
}

impl Screened for Application {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn screen<'a>(
        state: &'a mut WorkspaceState,
        scope: Option<&RecordId>,
    ) -> DashboardResult<&'a mut Screen<Self>> {
        let job_id = scope
            .ok_or_else(|| DashboardError::invalid("job_id", "Applications are listed per job"))?;
        state
            .applications
            .get_mut(job_id)
            .ok_or_else(|| DashboardError::not_found(RecordKind::Job, job_id))
    }
}

impl Screened for Candidate {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn screen<'a>(
        state: &'a mut WorkspaceState,
        _scope: Option<&RecordId>,
    ) -> DashboardResult<&'a mut Screen<Self>> {
        Ok(&mut state.candidates)
    }
}

impl Screened for Job {
    fn display_name(&self) -> &str {
        &self.title
    }

    fn screen<'a>(
        state: &'a mut WorkspaceState,
        _scope: Option<&RecordId>,
    ) -> DashboardResult<&'a mut Screen<Self>> {
        Ok(&mut state.jobs)
    }
}

pub struct Workspace {
    api: Arc<dyn RecordApi>,
    links: LinkSharer,
    state: Mutex<WorkspaceState>,
    application_update: PendingFlag,
    candidate_update: PendingFlag,
    job_update: PendingFlag,
    job_submit: PendingFlag,
    profile_save: PendingFlag,
    plan_change: PendingFlag,
}

impl Workspace {
    /// Loads jobs and candidates up front; applications follow per job on demand.
    pub async fn load(api: Arc<dyn RecordApi>, links: LinkSharer) -> DashboardResult<Self> {
        let jobs = fetch::<Job>(api.as_ref(), None).await?;
        let candidates = fetch::<Candidate>(api.as_ref(), None).await?;
        app_log!(
            info,
            "Workspace loaded with {} jobs and {} candidates",
            jobs.len(),
            candidates.len()
        );

        let state = WorkspaceState {
            jobs: Screen::with_filter(
                jobs,
                FilterState::new("", StatusFilter::Only(JobStatus::Open)),
            ),
            candidates: Screen::new(candidates),
            applications: HashMap::new(),
            usage: UsageTracker::builtin(),
            profile: ProfileEditor::new(AccountProfile::builtin()),
            subscription: Subscription::builtin(),
            link_feedback: CopyFeedback::default(),
            forms: HashMap::new(),
        };

        Ok(Self {
            api,
            links,
            state: Mutex::new(state),
            application_update: PendingFlag::new("application update"),
            candidate_update: PendingFlag::new("candidate update"),
            job_update: PendingFlag::new("job update"),
            job_submit: PendingFlag::new("job submission"),
            profile_save: PendingFlag::new("profile save"),
            plan_change: PendingFlag::new("plan change"),
        })
    }

    fn status_flag(&self, kind: RecordKind) -> &PendingFlag {
        match kind {
            RecordKind::Application => &self.application_update,
            RecordKind::Candidate => &self.candidate_update,
            RecordKind::Job => &self.job_update,
        }
    }

    /// Whether a collaborator call is in flight for `kind`'s status updates.
    pub fn is_updating(&self, kind: RecordKind) -> bool {
        self.status_flag(kind).is_pending()
    }

    pub fn is_submitting_job(&self) -> bool {
        self.job_submit.is_pending()
    }

    async fn ensure_applications(&self, job_id: &RecordId) -> DashboardResult<()> {
        if self.state.lock().await.applications.contains_key(job_id) {
            return Ok(());
        }

        let store = fetch::<Application>(self.api.as_ref(), Some(job_id)).await?;
        app_log!(info, "Loaded {} applications for job {}", store.len(), job_id);

        self.state
            .lock()
            .await
            .applications
            .entry(job_id.clone())
            .or_insert_with(|| Screen::new(store));
        Ok(())
    }

    async fn prepare<R: Screened>(&self, scope: Option<&RecordId>) -> DashboardResult<()> {
        match (R::KIND, scope) {
            (RecordKind::Application, Some(job_id)) => self.ensure_applications(job_id).await,
            _ => Ok(()),
        }
    }

    /// Re-reads one screen's records from the collaborator.
    pub async fn refresh<R: Screened>(&self, scope: Option<&RecordId>) -> DashboardResult<usize> {
        self.prepare::<R>(scope).await?;
        let store = fetch::<R>(self.api.as_ref(), scope).await?;
        let count = store.len();

        let mut state = self.state.lock().await;
        R::screen(&mut state, scope)?.reload(store);
        Ok(count)
    }

    /// Applies the given filter inputs (absent ones keep their current value) and renders the list.
    pub async fn list<R: Screened>(
        &self,
        scope: Option<&RecordId>,
        query: Option<&str>,
        status: Option<&str>,
    ) -> DashboardResult<ListView<R>> {
        self.prepare::<R>(scope).await?;
        let status = status
            .map(|s| StatusFilter::parse::<R>(Some(s)))
            .transpose()?;

        let mut state = self.state.lock().await;
        let screen = R::screen(&mut state, scope)?;
        if let Some(query) = query {
            screen.set_query(query);
        }
        if let Some(status) = status {
            screen.set_status_filter(status);
        }
        Ok(screen.list())
    }

    /// Records the list currently shows, for export.
    pub async fn visible<R: Screened>(
        &self,
        scope: Option<&RecordId>,
    ) -> DashboardResult<Vec<Arc<R>>> {
        self.prepare::<R>(scope).await?;
        let mut state = self.state.lock().await;
        Ok(R::screen(&mut state, scope)?.visible())
    }

    pub async fn select<R: Screened>(
        &self,
        scope: Option<&RecordId>,
        id: &RecordId,
    ) -> DashboardResult<PanelView<R>> {
        self.prepare::<R>(scope).await?;
        let mut state = self.state.lock().await;
        let screen = R::screen(&mut state, scope)?;
        let record = screen.select(id)?;
        Ok(PanelView::for_record(record.as_ref()))
    }

    pub async fn close_panel<R: Screened>(&self, scope: Option<&RecordId>) -> DashboardResult<()> {
        self.prepare::<R>(scope).await?;
        let mut state = self.state.lock().await;
        R::screen(&mut state, scope)?.close_panel();
        if R::KIND == RecordKind::Job {
            state.link_feedback.clear();
        }
        Ok(())
    }

    pub async fn panel<R: Screened>(
        &self,
        scope: Option<&RecordId>,
    ) -> DashboardResult<Option<PanelView<R>>> {
        self.prepare::<R>(scope).await?;
        let mut state = self.state.lock().await;
        Ok(R::screen(&mut state, scope)?.panel())
    }

    /// Runs a panel action on the open record. Status-changing actions go through the
    /// collaborator first; the store and panel only change once it has confirmed.
    pub async fn invoke<R: Screened>(
        &self,
        scope: Option<&RecordId>,
        action: R::Action,
    ) -> DashboardResult<ActionOutcome<R>> {
        self.prepare::<R>(scope).await?;
        let _guard = self.status_flag(R::KIND).try_begin()?;

        let planned = {
            let mut state = self.state.lock().await;
            R::screen(&mut state, scope)?.plan_action(action)?
        };

        let confirmed = match planned.target_status() {
            Some(target) => {
                let confirmed = self
                    .api
                    .update_record_status(R::KIND, planned.record.id(), &target.to_string())
                    .await
                    .map_err(|e| {
                        app_log!(
                            warn,
                            "Record service rejected {} on {} {}: {}",
                            action,
                            R::KIND,
                            planned.record.id(),
                            e
                        );
                        e
                    })?;
                Some(R::try_from_any(confirmed)?)
            }
            None => None,
        };

        let mut state = self.state.lock().await;
        let outcome = R::screen(&mut state, scope)?.complete_action(planned, confirmed)?;

        match &outcome {
            ActionOutcome::Dispatched { record, label } => {
                state.usage.record(ActivityEntry::new(
                    *label,
                    today(),
                    record.display_name(),
                    "Included",
                ));
            }
            ActionOutcome::Transitioned {
                panel_closed: true, ..
            } if R::KIND == RecordKind::Job => state.link_feedback.clear(),
            ActionOutcome::Transitioned { .. } => {}
        }

        Ok(outcome)
    }

    /// Row-level close. Unlike the panel action, an open panel stays open on the closed job.
    pub async fn close_job(&self, id: &RecordId) -> DashboardResult<Arc<Job>> {
        let _guard = self.job_update.try_begin()?;
        self.state
            .lock()
            .await
            .jobs
            .check_transition(id, JobStatus::Closed)?;

        let confirmed = self
            .api
            .update_record_status(RecordKind::Job, id, &JobStatus::Closed.to_string())
            .await?;
        let confirmed = Job::try_from_any(confirmed)?;

        self.state
            .lock()
            .await
            .jobs
            .apply_confirmed(id, confirmed, JobStatus::Closed)
    }

    pub async fn closed_jobs(&self) -> Vec<Arc<Job>> {
        let state = self.state.lock().await;
        state
            .jobs
            .store()
            .as_slice()
            .iter()
            .filter(|job| !job.is_open())
            .cloned()
            .collect()
    }

    pub async fn job_stats(&self) -> JobStats {
        JobStats::compute(self.state.lock().await.jobs.store())
    }

    async fn job(&self, id: &RecordId) -> DashboardResult<Arc<Job>> {
        self.state
            .lock()
            .await
            .jobs
            .store()
            .get(id)
            .ok_or_else(|| DashboardError::not_found(RecordKind::Job, id))
    }

    /// Edit-mode form contents for an existing posting.
    pub async fn job_draft(&self, id: &RecordId) -> DashboardResult<JobDraft> {
        Ok(JobDraft::from_job(self.job(id).await?.as_ref()))
    }

    pub async fn preview(&self, draft: &JobDraft) -> JobPreview {
        let state = self.state.lock().await;
        draft.preview(&state.profile.saved().company_name)
    }

    /// Validates, then creates or updates the posting through the collaborator.
    /// A second submit while one is in flight is rejected with `Busy`.
    pub async fn submit_job(
        &self,
        mode: PostingMode,
        draft: &JobDraft,
    ) -> DashboardResult<PostingReceipt> {
        let validated = draft.validate()?;
        let _guard = self.job_submit.try_begin()?;

        let saved = match &mode {
            PostingMode::Create => {
                let job = validated.into_new_job(RecordId::new(new_job_id()), today());
                self.api.create_job(job).await?
            }
            PostingMode::Edit(id) => {
                let existing = self.job(id).await?;
                self.api.update_job(validated.apply_to(&existing)).await?
            }
        };

        let updated = matches!(mode, PostingMode::Edit(_));
        let mut state = self.state.lock().await;
        if updated {
            state.jobs.replace(saved.clone())?;
        } else {
            state.jobs.insert(saved.clone())?;
            state.usage.increment("Job Postings");
        }
        state.usage.record(ActivityEntry::new(
            if updated { "Job Updated" } else { "Job Posted" },
            today(),
            saved.title.clone(),
            "Free",
        ));

        app_log!(
            info,
            "Job {} {}: {}",
            saved.id,
            if updated { "updated" } else { "posted" },
            saved.title
        );

        Ok(PostingReceipt {
            link: self.links.link_for(&saved.id),
            job: saved,
            updated,
        })
    }

    pub async fn job_link(&self, id: &RecordId) -> DashboardResult<String> {
        let job = self.job(id).await?;
        Ok(self.links.link_for(&job.id))
    }

    /// Copies the apply link and returns the result with the button label to show.
    pub async fn copy_job_link(
        &self,
        id: &RecordId,
    ) -> DashboardResult<(CopyResult, &'static str)> {
        let job = self.job(id).await?;
        let result = self.links.copy(&job.id).await;

        let mut state = self.state.lock().await;
        if result.copied {
            state.link_feedback.mark(&job.id);
        }
        Ok((result, state.link_feedback.label(&job.id)))
    }

    pub async fn copy_label(&self, id: &RecordId) -> &'static str {
        self.state.lock().await.link_feedback.label(id)
    }

    /// Application form of a posting. One never customized has the default fields only.
    pub async fn application_form(&self, id: &RecordId) -> DashboardResult<FormView> {
        let state = self.state.lock().await;
        let job = posting(&state, id)?;
        Ok(match state.forms.get(id) {
            Some(form) => form.view(&job),
            None => ApplicationForm::default().view(&job),
        })
    }

    pub async fn add_form_question(
        &self,
        id: &RecordId,
        question: &NewQuestion,
    ) -> DashboardResult<FormView> {
        let mut state = self.state.lock().await;
        let job = posting(&state, id)?;
        let form = state.forms.entry(id.clone()).or_default();

        let added = form.add_question(question)?;
        app_log!(
            info,
            "Question {} '{}' ({}) added to the form of job {}",
            added.id,
            added.label,
            added.kind,
            id
        );
        Ok(form.view(&job))
    }

    pub async fn remove_form_question(
        &self,
        id: &RecordId,
        question_id: &str,
    ) -> DashboardResult<FormView> {
        let mut state = self.state.lock().await;
        let job = posting(&state, id)?;
        let form = state.forms.entry(id.clone()).or_default();

        let removed = form.remove_question(question_id)?;
        app_log!(info, "Question {} removed from the form of job {}", removed.id, id);
        Ok(form.view(&job))
    }

    pub async fn publish_form(&self, id: &RecordId) -> DashboardResult<FormView> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let job = posting(state, id)?;

        let form = state.forms.entry(id.clone()).or_default();
        form.publish();
        state.usage.record(ActivityEntry::new(
            "Form Published",
            today(),
            job.title.clone(),
            "Free",
        ));
        app_log!(
            info,
            "Application form of job {} published with {} custom questions",
            id,
            form.questions().len()
        );
        Ok(form.view(&job))
    }

    pub async fn usage_report(&self) -> DashboardResult<UsageReport> {
        let state = self.state.lock().await;
        let plan = state.subscription.plan()?;
        Ok(state.usage.report(plan.name, state.subscription.renews_on))
    }

    pub async fn profile(&self) -> AccountProfile {
        self.state.lock().await.profile.saved().clone()
    }

    /// Edit session in one step: begin from saved values, apply `changes`, validate, save.
    pub async fn save_profile(&self, changes: AccountProfile) -> DashboardResult<AccountProfile> {
        let ready = {
            let mut state = self.state.lock().await;
            *state.profile.begin() = changes;
            match state.profile.prepare_save() {
                Ok(ready) => ready,
                Err(e) => {
                    state.profile.cancel();
                    return Err(e);
                }
            }
        };

        let _guard = self.profile_save.try_begin()?;
        let saved = self.api.save_account(ready).await?;

        let mut state = self.state.lock().await;
        state.profile.commit(saved.clone());
        app_log!(info, "Account profile saved for {}", saved.company_name);
        Ok(saved)
    }

    pub async fn plans(&self) -> Vec<PlanView> {
        plan_views(&self.state.lock().await.subscription.plan_id)
    }

    pub async fn upgrade_plan(&self, plan_id: &str) -> DashboardResult<Subscription> {
        let plan = find_plan(plan_id)?;
        let _guard = self.plan_change.try_begin()?;
        self.api.change_plan(plan.id).await?;

        let mut state = self.state.lock().await;
        state.subscription.plan_id = plan.id.to_string();
        state.usage.record(ActivityEntry::new(
            "Plan Changed",
            today(),
            plan.name,
            &format!("${}/month", plan.monthly_price),
        ));
        app_log!(info, "Subscription moved to {}", plan.name);
        Ok(state.subscription.clone())
    }

    pub async fn dashboard(&self) -> DashboardSummary {
        let state = self.state.lock().await;
        DashboardSummary::build(state.jobs.store(), state.candidates.store())
    }
}

fn posting(state: &WorkspaceState, id: &RecordId) -> DashboardResult<Arc<Job>> {
    state
        .jobs
        .store()
        .get(id)
        .ok_or_else(|| DashboardError::not_found(RecordKind::Job, id))
}

async fn fetch<R: Record>(
    api: &dyn RecordApi,
    scope: Option<&RecordId>,
) -> DashboardResult<RecordStore<R>> {
    let records = api
        .list_records(R::KIND, scope)
        .await?
        .into_iter()
        .map(R::try_from_any)
        .collect::<DashboardResult<Vec<R>>>()?;
    Ok(RecordStore::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MemoryClipboard, MockRecordApi};
    use crate::job_posting::QuestionType;
    use crate::types::{AnyRecord, ApplicationAction, ApplicationStatus, JobAction, SeedData};
    use std::time::Duration;

    /// Collaborator that annotates every record it confirms, the way a screening
    /// service fills in its own fields.
    struct AnnotatingApi(MockRecordApi);

    #[rocket::async_trait]
    impl RecordApi for AnnotatingApi {
        async fn list_records(
            &self,
            kind: RecordKind,
            scope: Option<&RecordId>,
        ) -> DashboardResult<Vec<AnyRecord>> {
            self.0.list_records(kind, scope).await
        }

        async fn update_record_status(
            &self,
            kind: RecordKind,
            id: &RecordId,
            status: &str,
        ) -> DashboardResult<AnyRecord> {
            let mut record = self.0.update_record_status(kind, id, status).await?;
            match &mut record {
                AnyRecord::Application(app) => {
                    app.reason = "Confirmed by screening service".to_string()
                }
                AnyRecord::Job(job) => job.location = "Archived".to_string(),
                AnyRecord::Candidate(_) => {}
            }
            Ok(record)
        }

        async fn create_job(&self, job: Job) -> DashboardResult<Job> {
            self.0.create_job(job).await
        }

        async fn update_job(&self, job: Job) -> DashboardResult<Job> {
            self.0.update_job(job).await
        }

        async fn save_account(&self, profile: AccountProfile) -> DashboardResult<AccountProfile> {
            self.0.save_account(profile).await
        }

        async fn change_plan(&self, plan_id: &str) -> DashboardResult<()> {
            self.0.change_plan(plan_id).await
        }
    }

    fn slow_api() -> Arc<MockRecordApi> {
        Arc::new(MockRecordApi::new(
            SeedData::builtin(),
            Duration::from_millis(1000),
        ))
    }

    async fn workspace_with(api: Arc<MockRecordApi>) -> Workspace {
        let links = LinkSharer::new("http://localhost:3000", Box::new(MemoryClipboard::default()));
        Workspace::load(api, links).await.unwrap()
    }

    async fn workspace() -> (Workspace, Arc<MockRecordApi>) {
        let api = Arc::new(MockRecordApi::builtin());
        (workspace_with(Arc::clone(&api)).await, api)
    }

    fn job_one() -> RecordId {
        RecordId::from("1")
    }

    fn draft() -> JobDraft {
        JobDraft {
            title: "Data Engineer".to_string(),
            department: "engineering".to_string(),
            location: "Berlin".to_string(),
            positions: "1".to_string(),
            requirements: "SQL".to_string(),
            application_open_date: "2025-01-10".to_string(),
            application_open_time: "09:00".to_string(),
            application_close_date: "2025-03-01".to_string(),
            application_close_time: "17:00".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_jobs_list_defaults_to_open() {
        let (ws, _) = workspace().await;
        let view = ws.list::<Job>(None, None, None).await.unwrap();
        assert_eq!(view.rows.len(), 3);

        let all = ws.list::<Job>(None, None, Some("all")).await.unwrap();
        assert_eq!(all.rows.len(), 4);
        assert_eq!(ws.closed_jobs().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_qualified_round_trip() {
        let (ws, api) = workspace().await;
        let scope = job_one();

        ws.select::<Application>(Some(&scope), &RecordId::from("4"))
            .await
            .unwrap();
        ws.invoke::<Application>(Some(&scope), ApplicationAction::MarkQualified)
            .await
            .unwrap();

        let panel = ws.panel::<Application>(Some(&scope)).await.unwrap().unwrap();
        assert_eq!(panel.record.status, ApplicationStatus::Qualified);

        let remote = api
            .list_records(RecordKind::Application, Some(&scope))
            .await
            .unwrap();
        let remote = Application::try_from_any(remote[3].clone()).unwrap();
        assert_eq!(remote.status, ApplicationStatus::Qualified);
    }

    #[tokio::test]
    async fn test_collaborator_failure_leaves_state_untouched() {
        let (ws, api) = workspace().await;
        let scope = job_one();
        ws.select::<Application>(Some(&scope), &RecordId::from("4"))
            .await
            .unwrap();

        api.fail_next(DashboardError::TransientIo("timeout".to_string()))
            .await;
        let err = ws
            .invoke::<Application>(Some(&scope), ApplicationAction::MarkNotQualified)
            .await
            .unwrap_err();
        assert!(err.is_transient());
        assert!(!ws.is_updating(RecordKind::Application));

        let panel = ws.panel::<Application>(Some(&scope)).await.unwrap().unwrap();
        assert_eq!(panel.record.status, ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn test_action_on_removed_record_is_not_found() {
        let (ws, api) = workspace().await;
        let scope = job_one();
        ws.select::<Application>(Some(&scope), &RecordId::from("4"))
            .await
            .unwrap();

        api.remove(RecordKind::Application, &RecordId::from("4")).await;
        let err = ws
            .invoke::<Application>(Some(&scope), ApplicationAction::MarkQualified)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        assert!(ws.panel::<Application>(Some(&scope)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_outward_action_is_logged_as_activity() {
        let (ws, _) = workspace().await;
        let scope = job_one();
        ws.select::<Application>(Some(&scope), &RecordId::from("1"))
            .await
            .unwrap();
        ws.invoke::<Application>(Some(&scope), ApplicationAction::SendOffer)
            .await
            .unwrap();

        let report = ws.usage_report().await.unwrap();
        assert_eq!(report.activity[0].action, "Send Offer");
        assert_eq!(report.activity[0].details, "Sarah Chen");
    }

    #[tokio::test]
    async fn test_unknown_job_scope() {
        let (ws, _) = workspace().await;
        let err = ws
            .list::<Application>(Some(&RecordId::from("999")), None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");

        let err = ws.list::<Application>(None, None, None).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_close_job_from_panel_and_row() {
        let (ws, _) = workspace().await;
        ws.select::<Job>(None, &RecordId::from("2")).await.unwrap();
        ws.invoke::<Job>(None, JobAction::Close).await.unwrap();
        assert!(ws.panel::<Job>(None).await.unwrap().is_none());

        ws.select::<Job>(None, &RecordId::from("3")).await.unwrap();
        ws.close_job(&RecordId::from("3")).await.unwrap();
        let panel = ws.panel::<Job>(None).await.unwrap().unwrap();
        assert_eq!(panel.status, "closed");

        // closing again is a no-op
        ws.close_job(&RecordId::from("3")).await.unwrap();
        assert_eq!(ws.job_stats().await.active_postings, 1);
        assert_eq!(ws.closed_jobs().await.len(), 3);
    }

    #[tokio::test]
    async fn test_submit_creates_job_and_activity() {
        let (ws, _) = workspace().await;
        let receipt = ws.submit_job(PostingMode::Create, &draft()).await.unwrap();

        assert!(!receipt.updated);
        assert_eq!(receipt.job.id.as_str().len(), 9);
        assert_eq!(
            receipt.link,
            format!("http://localhost:3000/apply/{}", receipt.job.id)
        );

        let jobs = ws.list::<Job>(None, Some("data engineer"), None).await.unwrap();
        assert_eq!(jobs.rows.len(), 1);

        let report = ws.usage_report().await.unwrap();
        assert_eq!(report.activity[0].action, "Job Posted");
        assert_eq!(report.metrics[0].value, 6);
    }

    #[tokio::test]
    async fn test_submit_invalid_draft_touches_nothing() {
        let (ws, _) = workspace().await;
        let err = ws
            .submit_job(PostingMode::Create, &JobDraft::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(ws.list::<Job>(None, None, Some("all")).await.unwrap().total, 4);
    }

    #[tokio::test]
    async fn test_edit_job_keeps_identity() {
        let (ws, _) = workspace().await;
        let mut edit = ws.job_draft(&RecordId::from("2")).await.unwrap();
        edit.positions = "3".to_string();

        let receipt = ws
            .submit_job(PostingMode::Edit(RecordId::from("2")), &edit)
            .await
            .unwrap();
        assert!(receipt.updated);
        assert_eq!(receipt.job.positions, 3);
        assert_eq!(receipt.job.applications, 18);
        assert_eq!(receipt.link, "http://localhost:3000/apply/2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_submit_creates_one_job() {
        let ws = Arc::new(workspace_with(slow_api()).await);

        let first = {
            let ws = Arc::clone(&ws);
            tokio::spawn(async move { ws.submit_job(PostingMode::Create, &draft()).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(ws.is_submitting_job());

        let second = ws.submit_job(PostingMode::Create, &draft()).await;
        assert!(matches!(second, Err(DashboardError::Busy(_))));

        first.await.unwrap().unwrap();
        assert!(!ws.is_submitting_job());
        assert_eq!(ws.list::<Job>(None, None, Some("all")).await.unwrap().total, 5);
    }

    #[tokio::test]
    async fn test_store_keeps_record_confirmed_by_service() {
        let api = Arc::new(AnnotatingApi(MockRecordApi::builtin()));
        let links = LinkSharer::new("http://localhost:3000", Box::new(MemoryClipboard::default()));
        let ws = Workspace::load(api, links).await.unwrap();
        let scope = job_one();

        ws.select::<Application>(Some(&scope), &RecordId::from("4"))
            .await
            .unwrap();
        ws.invoke::<Application>(Some(&scope), ApplicationAction::MarkQualified)
            .await
            .unwrap();

        let panel = ws.panel::<Application>(Some(&scope)).await.unwrap().unwrap();
        assert_eq!(panel.record.status, ApplicationStatus::Qualified);
        assert_eq!(panel.record.reason, "Confirmed by screening service");

        let closed = ws.close_job(&RecordId::from("3")).await.unwrap();
        assert_eq!(closed.location, "Archived");
        let view = ws.list::<Job>(None, Some("archived"), Some("closed")).await.unwrap();
        assert_eq!(view.rows.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_update_in_flight_rejects_second() {
        let ws = Arc::new(workspace_with(slow_api()).await);
        let scope = job_one();
        ws.select::<Application>(Some(&scope), &RecordId::from("4"))
            .await
            .unwrap();

        let first = {
            let ws = Arc::clone(&ws);
            tokio::spawn(async move {
                let scope = job_one();
                ws.invoke::<Application>(Some(&scope), ApplicationAction::MarkQualified)
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(ws.is_updating(RecordKind::Application));

        let second = ws
            .invoke::<Application>(Some(&scope), ApplicationAction::MarkNotQualified)
            .await;
        assert!(matches!(second, Err(DashboardError::Busy(_))));

        first.await.unwrap().unwrap();
        assert!(!ws.is_updating(RecordKind::Application));

        let panel = ws.panel::<Application>(Some(&scope)).await.unwrap().unwrap();
        assert_eq!(panel.record.status, ApplicationStatus::Qualified);
        let view = ws
            .list::<Application>(Some(&scope), None, Some("not_qualified"))
            .await
            .unwrap();
        assert_eq!(view.rows.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_row_close_in_flight_rejects_second() {
        let ws = Arc::new(workspace_with(slow_api()).await);

        let first = {
            let ws = Arc::clone(&ws);
            tokio::spawn(async move { ws.close_job(&RecordId::from("1")).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(ws.is_updating(RecordKind::Job));

        let second = ws.close_job(&RecordId::from("2")).await;
        assert!(matches!(second, Err(DashboardError::Busy(_))));

        first.await.unwrap().unwrap();
        assert!(!ws.is_updating(RecordKind::Job));
        assert_eq!(ws.closed_jobs().await.len(), 2);
    }

    #[tokio::test]
    async fn test_application_form_builder() {
        let (ws, _) = workspace().await;
        let id = job_one();

        let form = ws.application_form(&id).await.unwrap();
        assert_eq!(form.job_title, "Senior Frontend Developer");
        assert_eq!(form.fields.len(), 4);

        let question = NewQuestion {
            label: "Notice period (weeks)".to_string(),
            kind: QuestionType::Number,
        };
        let form = ws.add_form_question(&id, &question).await.unwrap();
        assert_eq!(form.fields.len(), 5);
        let question_id = form.fields[4].id.clone().unwrap();

        let blank = NewQuestion::default();
        let err = ws.add_form_question(&id, &blank).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(ws.application_form(&id).await.unwrap().fields.len(), 5);

        let form = ws.publish_form(&id).await.unwrap();
        assert!(form.published);
        let report = ws.usage_report().await.unwrap();
        assert_eq!(report.activity[0].action, "Form Published");

        let form = ws.remove_form_question(&id, &question_id).await.unwrap();
        assert_eq!(form.fields.len(), 4);

        // other postings keep their own form
        let other = ws.application_form(&RecordId::from("2")).await.unwrap();
        assert!(!other.published);

        let err = ws.application_form(&RecordId::from("99")).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_copy_link_feedback_resets_on_close() {
        let (ws, _) = workspace().await;
        let id = RecordId::from("1");
        ws.select::<Job>(None, &id).await.unwrap();

        let (result, label) = ws.copy_job_link(&id).await.unwrap();
        assert!(result.copied);
        assert_eq!(label, "Copied!");

        ws.close_panel::<Job>(None).await.unwrap();
        assert_eq!(ws.copy_label(&id).await, "Copy");

        assert!(ws.copy_job_link(&RecordId::from("77")).await.is_err());
    }

    #[tokio::test]
    async fn test_profile_and_plan() {
        let (ws, _) = workspace().await;
        let mut changes = ws.profile().await;
        changes.company_name = "Globex".to_string();
        assert_eq!(ws.save_profile(changes).await.unwrap().company_name, "Globex");

        let mut bad = ws.profile().await;
        bad.company_email = "nope".to_string();
        assert!(ws.save_profile(bad).await.is_err());
        assert_eq!(ws.profile().await.company_email, "careers@acmecorp.com");

        let sub = ws.upgrade_plan("premium").await.unwrap();
        assert_eq!(sub.plan_id, "premium");
        assert_eq!(ws.usage_report().await.unwrap().plan.name, "Premium");
        assert!(matches!(
            ws.upgrade_plan("gold").await,
            Err(DashboardError::UnknownPlan(_))
        ));
    }

    #[tokio::test]
    async fn test_refresh_picks_up_remote_changes() {
        let (ws, api) = workspace().await;
        api.remove(RecordKind::Candidate, &RecordId::from("4")).await;
        assert_eq!(ws.refresh::<Candidate>(None).await.unwrap(), 3);
        assert_eq!(ws.dashboard().await.shortlisted_candidates, 3);
    }
}
