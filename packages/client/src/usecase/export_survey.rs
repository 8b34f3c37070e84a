//! UseCase: エクスポートジョブの実行とポーリング
//!
//! ## 状態遷移
//!
//! ```text
//! queued -> processing -> {done, failed}
//! ```
//!
//! 一定間隔でステータスを問い合わせ、`done`（またはファイル本体の応答）で
//! 停止して成果物を返す。`failed` でも停止する。終端状態に達した後は
//! リクエストを一切送らない。
//!
//! 通信エラー・タイムアウト・5xx・429 は一時的なエラーとして次の間隔で
//! 再試行し、連続 `max_transient_failures` 回に達したら失敗とする。
//! 429 の場合は Retry-After の秒数だけ待ってから再試行する。
//! それ以外のエラーは即座に失敗とする。
//!
//! 上限時間は実行中のリクエストにも適用され、応答を待つ間に超過した
//! 時点でタイムアウトとなる。
//!
//! キャンセルは Future の drop で行う。drop すると実行中のリクエストも
//! 破棄されるため、キャンセル後に遅れて届いた応答が状態を変えることはない。

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::time::MissedTickBehavior;

use crate::domain::{
    ExportArtifact, ExportFormat, ExportJob, ExportRepository, ExportStatus, JobId, PollResponse,
    RepositoryError, SurveyId, TimeRange,
};

use super::{
    error::{ExportError, GuardError},
    session_guard::SessionGuard,
};

/// Default interval between status requests
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Shortest interval the poller will tick at
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Default number of consecutive transient failures tolerated
pub const DEFAULT_MAX_TRANSIENT_FAILURES: u32 = 3;

/// ポーリングの設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerSettings {
    pub interval: Duration,
    /// 連続した一時的エラーの許容回数。0 なら最初のエラーで失敗する
    pub max_transient_failures: u32,
    /// ポーリング全体の上限時間
    pub deadline: Option<Duration>,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_transient_failures: DEFAULT_MAX_TRANSIENT_FAILURES,
            deadline: None,
        }
    }
}

/// エクスポートのユースケース
pub struct ExportSurveyUseCase {
    repository: Arc<dyn ExportRepository>,
    guard: SessionGuard,
    settings: PollerSettings,
}

impl ExportSurveyUseCase {
    /// 新しい ExportSurveyUseCase を作成
    pub fn new(
        repository: Arc<dyn ExportRepository>,
        guard: SessionGuard,
        mut settings: PollerSettings,
    ) -> Self {
        // tokio's interval panics on a zero period
        settings.interval = settings.interval.max(MIN_POLL_INTERVAL);
        Self {
            repository,
            guard,
            settings,
        }
    }

    /// エクスポートジョブを作成する
    pub async fn start(
        &self,
        survey_id: &SurveyId,
        format: ExportFormat,
        range: &TimeRange,
    ) -> Result<ExportJob, ExportError> {
        let job = self
            .guard
            .call(|| self.repository.create_export(survey_id, format, range))
            .await
            .map_err(|e| match e {
                GuardError::LoginRequired(reason) => ExportError::LoginRequired(reason),
                GuardError::Repository(e) => ExportError::StartFailed(e),
            })?;
        tracing::info!(
            survey_id = %survey_id,
            job_id = %job.id,
            status = %job.status,
            %format,
            "export job created"
        );
        Ok(job)
    }

    /// ステータスを1回だけ問い合わせる
    pub async fn status(&self, job_id: &JobId) -> Result<PollResponse, ExportError> {
        self.guard
            .call(|| self.repository.poll_export(job_id))
            .await
            .map_err(|e| poll_error(job_id, e))
    }

    /// ジョブが終端状態になるまでポーリングし、成果物を返す
    ///
    /// `observer` はステータスが報告されるたびに呼ばれる。
    ///
    /// # Returns
    ///
    /// * `Ok(ExportArtifact)` - 完了したエクスポートファイル
    /// * `Err(ExportError::JobFailed)` - ジョブが failed になった
    /// * `Err(ExportError::PollFailed)` - 恒久的なエラー、または一時的なエラーの連続
    /// * `Err(ExportError::TimedOut)` - 上限時間の超過
    pub async fn wait<F>(&self, job: ExportJob, mut observer: F) -> Result<ExportArtifact, ExportError>
    where
        F: FnMut(&ExportJob),
    {
        let started = Instant::now();
        let mut job = job;
        let mut ticker = tokio::time::interval(self.settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the initial status came from
        // the creation call, so wait a full interval before the first poll.
        ticker.tick().await;
        let mut consecutive_failures = 0u32;
        let mut attempt = 0u32;

        loop {
            match job.status {
                ExportStatus::Done => return self.download(&job.id).await,
                ExportStatus::Failed => {
                    return Err(ExportError::JobFailed {
                        job_id: job.id,
                        reason: job.error,
                    });
                }
                ExportStatus::Queued | ExportStatus::Processing => {}
            }

            ticker.tick().await;
            let remaining = self.remaining(started);
            if remaining.is_some_and(|r| r.is_zero()) {
                return Err(timed_out(job.id, started));
            }

            attempt += 1;
            let poll = self.guard.call(|| self.repository.poll_export(&job.id));
            let result = match remaining {
                Some(remaining) => match tokio::time::timeout(remaining, poll).await {
                    Ok(result) => result,
                    Err(_) => return Err(timed_out(job.id.clone(), started)),
                },
                None => poll.await,
            };
            match result {
                Ok(PollResponse::File(artifact)) => {
                    tracing::info!(job_id = %job.id, attempt, "export file received");
                    job.status = ExportStatus::Done;
                    observer(&job);
                    return Ok(artifact);
                }
                Ok(PollResponse::Job(next)) => {
                    consecutive_failures = 0;
                    tracing::debug!(job_id = %next.id, status = %next.status, attempt, "export status");
                    observer(&next);
                    job = next;
                }
                Err(GuardError::Repository(error))
                    if error.is_transient()
                        && consecutive_failures < self.settings.max_transient_failures =>
                {
                    consecutive_failures += 1;
                    tracing::warn!(
                        job_id = %job.id,
                        attempt,
                        consecutive_failures,
                        %error,
                        "export status request failed; retrying"
                    );
                    if let RepositoryError::RateLimited { retry_after_secs } = error
                        && retry_after_secs > 0
                    {
                        let pause = Duration::from_secs(retry_after_secs);
                        let pause = self.remaining(started).map_or(pause, |r| pause.min(r));
                        tokio::time::sleep(pause).await;
                        ticker.reset_immediately();
                    }
                }
                Err(error) => return Err(poll_error(&job.id, error)),
            }
        }
    }

    /// 作成からダウンロードまでを実行する
    pub async fn execute<F>(
        &self,
        survey_id: &SurveyId,
        format: ExportFormat,
        range: &TimeRange,
        mut observer: F,
    ) -> Result<ExportArtifact, ExportError>
    where
        F: FnMut(&ExportJob),
    {
        let job = self.start(survey_id, format, range).await?;
        observer(&job);
        self.wait(job, observer).await
    }

    /// Time left before the deadline, if one is set
    fn remaining(&self, started: Instant) -> Option<Duration> {
        self.settings
            .deadline
            .map(|deadline| deadline.saturating_sub(started.elapsed()))
    }

    async fn download(&self, job_id: &JobId) -> Result<ExportArtifact, ExportError> {
        self.guard
            .call(|| self.repository.download_export(job_id))
            .await
            .map_err(|e| match e {
                GuardError::LoginRequired(reason) => ExportError::LoginRequired(reason),
                GuardError::Repository(source) => ExportError::DownloadFailed {
                    job_id: job_id.clone(),
                    source,
                },
            })
    }
}

fn timed_out(job_id: JobId, started: Instant) -> ExportError {
    ExportError::TimedOut {
        job_id,
        waited_secs: started.elapsed().as_secs(),
    }
}

fn poll_error(job_id: &JobId, error: GuardError) -> ExportError {
    match error {
        GuardError::LoginRequired(reason) => ExportError::LoginRequired(reason),
        GuardError::Repository(source) => ExportError::PollFailed {
            job_id: job_id.clone(),
            source,
        },
    }
}

/// Default file name for a survey export
pub fn default_export_file_name(survey_id: &SurveyId, format: ExportFormat) -> String {
    format!("survey-{survey_id}-export.{}", format.extension())
}

/// 成果物をディレクトリに保存し、保存先のパスを返す
pub async fn save_artifact(
    artifact: &ExportArtifact,
    dir: &Path,
    fallback_name: &str,
) -> Result<PathBuf, ExportError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ExportError::Save(format!("create {}: {e}", dir.display())))?;
    let path = dir.join(artifact.file_name_or(fallback_name));
    tokio::fs::write(&path, &artifact.bytes)
        .await
        .map_err(|e| ExportError::Save(format!("write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), bytes = artifact.bytes.len(), "export saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            AccessToken, LoginReason, Session,
            repository::{MockExportRepository, MockLoginPrompt},
        },
        infrastructure::session::InMemorySessionStore,
    };
    use async_trait::async_trait;
    use std::collections::VecDeque;

    /// Status requests never answer
    struct StalledExports;

    #[async_trait]
    impl ExportRepository for StalledExports {
        async fn create_export(
            &self,
            _survey_id: &SurveyId,
            _format: ExportFormat,
            _range: &TimeRange,
        ) -> Result<ExportJob, RepositoryError> {
            Ok(job(ExportStatus::Queued))
        }

        async fn poll_export(&self, _job_id: &JobId) -> Result<PollResponse, RepositoryError> {
            std::future::pending().await
        }

        async fn download_export(&self, job_id: &JobId) -> Result<ExportArtifact, RepositoryError> {
            Err(RepositoryError::NotFound(job_id.to_string()))
        }
    }

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - done の応答を受け取るまで done にならないこと
    // - 終端状態の後にリクエストを送らないこと（times で検証）
    // - 一時的なエラーの再試行と上限
    // - 恒久的なエラーは即座に失敗すること
    // - 応答待ちの間も上限時間が効くこと
    // - 429 の Retry-After を待ってから再試行すること
    // ========================================

    fn guard() -> SessionGuard {
        let store = InMemorySessionStore::with_session(Session {
            token: AccessToken::new("token").unwrap(),
            user: None,
        });
        let mut prompt = MockLoginPrompt::new();
        prompt.expect_open().return_const(());
        SessionGuard::new(Arc::new(store), Arc::new(prompt))
    }

    fn settings(max_transient_failures: u32) -> PollerSettings {
        PollerSettings {
            interval: Duration::from_millis(1),
            max_transient_failures,
            deadline: None,
        }
    }

    fn job(status: ExportStatus) -> ExportJob {
        ExportJob {
            id: JobId::new("job-1").unwrap(),
            status,
            file_path: None,
            error: None,
        }
    }

    fn artifact() -> ExportArtifact {
        ExportArtifact {
            file_name: Some("report.csv".to_string()),
            content_type: Some("text/csv".to_string()),
            bytes: b"id,answer\n1,yes\n".to_vec(),
        }
    }

    fn scripted_polls(
        repository: &mut MockExportRepository,
        responses: Vec<Result<PollResponse, RepositoryError>>,
    ) {
        let count = responses.len();
        let mut queue: VecDeque<_> = responses.into();
        repository
            .expect_poll_export()
            .times(count)
            .returning(move |_| queue.pop_front().expect("scripted response"));
    }

    #[tokio::test]
    async fn test_poller_reaches_done_only_after_completion_response() {
        // テスト項目: done の応答を受け取った後にだけ完了し、それ以降は問い合わせない
        // given (前提条件):
        let mut repository = MockExportRepository::new();
        scripted_polls(
            &mut repository,
            vec![
                Ok(PollResponse::Job(job(ExportStatus::Queued))),
                Ok(PollResponse::Job(job(ExportStatus::Processing))),
                Ok(PollResponse::Job(job(ExportStatus::Done))),
            ],
        );
        repository
            .expect_download_export()
            .times(1)
            .returning(|_| Ok(artifact()));
        let usecase = ExportSurveyUseCase::new(Arc::new(repository), guard(), settings(3));
        let mut seen = Vec::new();

        // when (操作):
        let result = usecase
            .wait(job(ExportStatus::Queued), |j| seen.push(j.status))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(artifact()));
        assert_eq!(
            seen,
            vec![
                ExportStatus::Queued,
                ExportStatus::Processing,
                ExportStatus::Done
            ]
        );
    }

    #[tokio::test]
    async fn test_poller_accepts_file_payload_as_done() {
        // テスト項目: ファイル本体の応答は done として扱い、ダウンロードは行わない
        let mut repository = MockExportRepository::new();
        scripted_polls(
            &mut repository,
            vec![
                Ok(PollResponse::Job(job(ExportStatus::Processing))),
                Ok(PollResponse::File(artifact())),
            ],
        );
        repository.expect_download_export().times(0);
        let usecase = ExportSurveyUseCase::new(Arc::new(repository), guard(), settings(3));

        let result = usecase.wait(job(ExportStatus::Queued), |_| {}).await;

        assert_eq!(result, Ok(artifact()));
    }

    #[tokio::test]
    async fn test_poller_stops_after_failed_status() {
        // テスト項目: failed になったら停止し、ダウンロードもしない
        // given (前提条件):
        let mut repository = MockExportRepository::new();
        let mut failed = job(ExportStatus::Failed);
        failed.error = Some("worker crashed".to_string());
        scripted_polls(
            &mut repository,
            vec![
                Ok(PollResponse::Job(job(ExportStatus::Processing))),
                Ok(PollResponse::Job(failed)),
            ],
        );
        repository.expect_download_export().times(0);
        let usecase = ExportSurveyUseCase::new(Arc::new(repository), guard(), settings(3));

        // when (操作):
        let result = usecase.wait(job(ExportStatus::Queued), |_| {}).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ExportError::JobFailed {
                job_id: JobId::new("job-1").unwrap(),
                reason: Some("worker crashed".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_already_done_job_is_downloaded_without_polling() {
        // テスト項目: 作成時点で done のジョブはポーリングせずにダウンロードする
        let mut repository = MockExportRepository::new();
        repository.expect_poll_export().times(0);
        repository
            .expect_download_export()
            .times(1)
            .returning(|_| Ok(artifact()));
        let usecase = ExportSurveyUseCase::new(Arc::new(repository), guard(), settings(3));

        let result = usecase.wait(job(ExportStatus::Done), |_| {}).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        // テスト項目: 一時的なエラーは再試行され、その後の done で完了する
        let mut repository = MockExportRepository::new();
        scripted_polls(
            &mut repository,
            vec![
                Err(RepositoryError::Transport("connection reset".to_string())),
                Err(RepositoryError::Api {
                    status: 502,
                    message: "bad gateway".to_string(),
                }),
                Ok(PollResponse::Job(job(ExportStatus::Done))),
            ],
        );
        repository
            .expect_download_export()
            .times(1)
            .returning(|_| Ok(artifact()));
        let usecase = ExportSurveyUseCase::new(Arc::new(repository), guard(), settings(2));

        let result = usecase.wait(job(ExportStatus::Processing), |_| {}).await;

        assert_eq!(result, Ok(artifact()));
    }

    #[tokio::test]
    async fn test_transient_error_limit_fails_job() {
        // テスト項目: 一時的なエラーが上限を超えて連続すると失敗し、以降は問い合わせない
        // given (前提条件): 上限 2 回 → 3 回目のエラーで失敗
        let mut repository = MockExportRepository::new();
        scripted_polls(
            &mut repository,
            vec![
                Err(RepositoryError::Transport("down".to_string())),
                Err(RepositoryError::Transport("down".to_string())),
                Err(RepositoryError::Transport("down".to_string())),
            ],
        );
        let usecase = ExportSurveyUseCase::new(Arc::new(repository), guard(), settings(2));

        // when (操作):
        let result = usecase.wait(job(ExportStatus::Queued), |_| {}).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ExportError::PollFailed {
                job_id: JobId::new("job-1").unwrap(),
                source: RepositoryError::Transport("down".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_success_resets_transient_failure_count() {
        // テスト項目: 成功応答で連続エラー回数がリセットされる
        let mut repository = MockExportRepository::new();
        scripted_polls(
            &mut repository,
            vec![
                Err(RepositoryError::Transport("blip".to_string())),
                Ok(PollResponse::Job(job(ExportStatus::Processing))),
                Err(RepositoryError::Transport("blip".to_string())),
                Ok(PollResponse::File(artifact())),
            ],
        );
        let usecase = ExportSurveyUseCase::new(Arc::new(repository), guard(), settings(1));

        let result = usecase.wait(job(ExportStatus::Queued), |_| {}).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_permanent_error_fails_immediately() {
        // テスト項目: 404 などの恒久的なエラーは再試行せずに失敗する
        let mut repository = MockExportRepository::new();
        scripted_polls(
            &mut repository,
            vec![Err(RepositoryError::NotFound("job-1".to_string()))],
        );
        let usecase = ExportSurveyUseCase::new(Arc::new(repository), guard(), settings(5));

        let result = usecase.wait(job(ExportStatus::Queued), |_| {}).await;

        assert!(matches!(result, Err(ExportError::PollFailed { .. })));
    }

    #[tokio::test]
    async fn test_unauthorized_poll_requires_login() {
        // テスト項目: ポーリング中の 401 はログイン要求になる
        let mut repository = MockExportRepository::new();
        scripted_polls(&mut repository, vec![Err(RepositoryError::Unauthorized)]);
        let usecase = ExportSurveyUseCase::new(Arc::new(repository), guard(), settings(5));

        let result = usecase.wait(job(ExportStatus::Queued), |_| {}).await;

        assert_eq!(result, Err(ExportError::LoginRequired(LoginReason::Rejected)));
    }

    #[tokio::test]
    async fn test_deadline_stops_polling() {
        // テスト項目: 上限時間を超えるとタイムアウトになる
        let mut repository = MockExportRepository::new();
        repository
            .expect_poll_export()
            .returning(|_| Ok(PollResponse::Job(job(ExportStatus::Processing))));
        let usecase = ExportSurveyUseCase::new(
            Arc::new(repository),
            guard(),
            PollerSettings {
                interval: Duration::from_millis(5),
                max_transient_failures: 0,
                deadline: Some(Duration::from_millis(20)),
            },
        );

        let result = usecase.wait(job(ExportStatus::Queued), |_| {}).await;

        assert!(matches!(result, Err(ExportError::TimedOut { .. })));
    }

    #[tokio::test]
    async fn test_deadline_bounds_a_stalled_status_request() {
        // テスト項目: 応答の無いステータス問い合わせも上限時間でタイムアウトになる
        // given (前提条件):
        let usecase = ExportSurveyUseCase::new(
            Arc::new(StalledExports),
            guard(),
            PollerSettings {
                interval: Duration::from_millis(5),
                max_transient_failures: 3,
                deadline: Some(Duration::from_millis(50)),
            },
        );
        let started = Instant::now();

        // when (操作):
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            usecase.wait(job(ExportStatus::Queued), |_| {}),
        )
        .await
        .expect("poller should give up at its deadline");

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ExportError::TimedOut {
                job_id: JobId::new("job-1").unwrap(),
                waited_secs: 0,
            })
        );
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_rate_limit_waits_for_retry_after() {
        // テスト項目: 429 の後は Retry-After の秒数だけ待ってから問い合わせる
        // given (前提条件):
        let mut repository = MockExportRepository::new();
        scripted_polls(
            &mut repository,
            vec![
                Err(RepositoryError::RateLimited { retry_after_secs: 1 }),
                Ok(PollResponse::File(artifact())),
            ],
        );
        let usecase = ExportSurveyUseCase::new(Arc::new(repository), guard(), settings(3));
        let started = Instant::now();

        // when (操作):
        let result = usecase.wait(job(ExportStatus::Queued), |_| {}).await;

        // then (期待する結果):
        assert_eq!(result, Ok(artifact()));
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_retry_after_is_cut_short_by_deadline() {
        // テスト項目: Retry-After が上限時間を超える場合は上限時間でタイムアウトになる
        // given (前提条件):
        let mut repository = MockExportRepository::new();
        scripted_polls(
            &mut repository,
            vec![Err(RepositoryError::RateLimited { retry_after_secs: 60 })],
        );
        let usecase = ExportSurveyUseCase::new(
            Arc::new(repository),
            guard(),
            PollerSettings {
                interval: Duration::from_millis(1),
                max_transient_failures: 3,
                deadline: Some(Duration::from_millis(50)),
            },
        );
        let started = Instant::now();

        // when (操作):
        let result = usecase.wait(job(ExportStatus::Queued), |_| {}).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ExportError::TimedOut { .. })));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_zero_interval_is_raised_to_minimum() {
        // テスト項目: 間隔 0 の設定でもパニックせずにポーリングできる
        // given (前提条件):
        let mut repository = MockExportRepository::new();
        scripted_polls(&mut repository, vec![Ok(PollResponse::File(artifact()))]);
        let usecase = ExportSurveyUseCase::new(
            Arc::new(repository),
            guard(),
            PollerSettings {
                interval: Duration::ZERO,
                max_transient_failures: 0,
                deadline: None,
            },
        );

        // when (操作):
        let result = usecase.wait(job(ExportStatus::Queued), |_| {}).await;

        // then (期待する結果):
        assert_eq!(usecase.settings.interval, MIN_POLL_INTERVAL);
        assert_eq!(result, Ok(artifact()));
    }

    #[tokio::test]
    async fn test_dropping_wait_cancels_polling() {
        // テスト項目: wait の Future を drop するとポーリングが止まる
        // given (前提条件):
        let polls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = polls.clone();
        let mut repository = MockExportRepository::new();
        repository.expect_poll_export().returning(move |_| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(PollResponse::Job(job(ExportStatus::Processing)))
        });
        let usecase = ExportSurveyUseCase::new(Arc::new(repository), guard(), settings(0));

        // when (操作):
        let _ = tokio::time::timeout(
            Duration::from_millis(30),
            usecase.wait(job(ExportStatus::Queued), |_| {}),
        )
        .await;
        let after_cancel = polls.load(std::sync::atomic::Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;

        // then (期待する結果):
        assert!(after_cancel > 0);
        assert_eq!(polls.load(std::sync::atomic::Ordering::SeqCst), after_cancel);
    }

    #[tokio::test]
    async fn test_save_artifact_uses_server_file_name() {
        // テスト項目: 成果物はサーバーのファイル名で保存される
        let dir = tempfile::tempdir().unwrap();

        let path = save_artifact(&artifact(), dir.path(), "fallback.csv")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("report.csv"));
        assert_eq!(std::fs::read(path).unwrap(), artifact().bytes);
    }

    #[test]
    fn test_default_export_file_name() {
        // テスト項目: 既定のファイル名にサーベイ ID と拡張子が含まれる
        let name = default_export_file_name(&SurveyId::new("42").unwrap(), ExportFormat::Xlsx);
        assert_eq!(name, "survey-42-export.xlsx");
    }
}
