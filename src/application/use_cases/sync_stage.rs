use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::application::services::session_service::open_session;
use crate::common::error::SumanError;
use crate::common::result::{ManagerResultExt, OptionExt, SumanResult};
use crate::domain::entities::{Environment, EnvironmentStatus, InputData};
use crate::domain::value_objects::AuthContext;
use crate::infrastructure::manager::ManagerProxy;

/// ビルド完了待ちのポーリング間隔のデフォルト
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// ステージ同期の設定
#[derive(Debug, Clone)]
pub struct SyncStageConfig {
    /// ポーリング間隔
    pub poll_interval: Duration,

    /// 待機の上限（Noneの場合は無制限）
    pub wait_timeout: Option<Duration>,
}

impl Default for SyncStageConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            wait_timeout: None,
        }
    }
}

impl SyncStageConfig {
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_wait_timeout(mut self, wait_timeout: Option<Duration>) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }
}

/// 実行した操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// 最初のステージのビルド
    Build,
    /// 前段の環境からのプロモート
    Promote { from: String },
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Build => write!(f, "build"),
            SyncAction::Promote { from } => write!(f, "promote from {}", from),
        }
    }
}

/// ステージ同期の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncStageResult {
    /// 実行した操作
    pub action: SyncAction,

    /// 待機した場合の最終状態
    pub final_status: Option<EnvironmentStatus>,

    /// 待機中の環境参照回数
    pub polls: usize,
}

/// 環境のビルド・プロモートのユースケース
pub struct SyncStageUseCase {
    /// SUSE Manager API
    proxy: Arc<dyn ManagerProxy>,

    /// 接続先サーバー
    host: String,

    /// 入力
    input: InputData,

    /// 設定
    config: SyncStageConfig,
}

impl SyncStageUseCase {
    /// 新しいSyncStageUseCaseインスタンスを作成
    pub fn new(
        proxy: Arc<dyn ManagerProxy>,
        host: impl Into<String>,
        input: InputData,
        config: SyncStageConfig,
    ) -> Self {
        Self {
            proxy,
            host: host.into(),
            input,
            config,
        }
    }

    /// ステージ同期を実行
    pub async fn execute(&self) -> SumanResult<SyncStageResult> {
        // 1. 必須入力のチェック
        self.check_mandatory_inputs()?;

        // 2. ログイン
        let auth = open_session(self.proxy.as_ref(), &self.host).await?;

        // 3. プロジェクト・環境・前段環境のチェック
        self.validate(&auth).await?;

        // 4. ビルドまたはプロモート
        let action = self.trigger(&auth).await?;

        // 5. 完了待ち
        let mut result = SyncStageResult {
            action,
            final_status: None,
            polls: 0,
        };
        if self.input.wait {
            let (status, polls) = self.wait_until_built(&auth).await?;
            result.final_status = Some(status);
            result.polls = polls;
        }

        Ok(result)
    }

    /// 必須入力のチェック
    fn check_mandatory_inputs(&self) -> SumanResult<()> {
        if self.input.project.is_empty() {
            return Err(SumanError::mandatory_input("Project"));
        }
        if self.input.environment.is_empty() {
            return Err(SumanError::mandatory_input("Environment"));
        }
        Ok(())
    }

    /// プロジェクトと環境の存在、前段の環境の状態をチェック
    async fn validate(&self, auth: &AuthContext) -> SumanResult<()> {
        let project = self.input.project.as_str();

        self.proxy
            .project_lookup(auth, project)
            .await
            .for_operation("ProjectLookup")?
            .ok_or_not_found("project", project)?;

        let environment = self.lookup_environment(auth, &self.input.environment).await?;

        if let Some(previous) = environment.previous() {
            let previous_env = self.lookup_environment(auth, previous).await?;
            let status = previous_env.status;
            if status == EnvironmentStatus::Unknown || status.is_in_progress() {
                return Err(SumanError::predecessor_not_ready(previous, status));
            }
        }

        Ok(())
    }

    /// 対象環境を再取得してビルドまたはプロモートを開始
    async fn trigger(&self, auth: &AuthContext) -> SumanResult<SyncAction> {
        let project = self.input.project.as_str();
        let environment = self.lookup_environment(auth, &self.input.environment).await?;

        match environment.previous() {
            None => {
                self.proxy
                    .project_build(auth, project)
                    .await
                    .for_operation("ProjectBuild")?;
                info!(project, environment = %environment.label, "build started");
                Ok(SyncAction::Build)
            }
            Some(previous) => {
                self.proxy
                    .project_promote(auth, project, previous)
                    .await
                    .for_operation("ProjectPromote")?;
                info!(
                    project,
                    from = previous,
                    to = %environment.label,
                    "promotion started"
                );
                Ok(SyncAction::Promote {
                    from: previous.to_string(),
                })
            }
        }
    }

    /// 環境がbuiltになるまでポーリング
    async fn wait_until_built(
        &self,
        auth: &AuthContext,
    ) -> SumanResult<(EnvironmentStatus, usize)> {
        let started = Instant::now();
        let mut polls = 0;

        loop {
            let environment = self.lookup_environment(auth, &self.input.environment).await?;
            polls += 1;

            if environment.status.is_built() {
                info!(
                    project = %self.input.project,
                    environment = %environment.label,
                    "environment is built"
                );
                return Ok((environment.status, polls));
            }

            info!(
                project = %self.input.project,
                environment = %environment.label,
                status = %environment.status,
                "waiting for environment to be built"
            );

            // 最後の待機は期限までの残り時間に切り詰める
            let mut pause = self.config.poll_interval;
            if let Some(timeout) = self.config.wait_timeout {
                let elapsed = started.elapsed();
                if elapsed >= timeout {
                    return Err(SumanError::timeout(timeout.as_secs()));
                }
                pause = pause.min(timeout - elapsed);
            }

            tokio::time::sleep(pause).await;
        }
    }

    async fn lookup_environment(
        &self,
        auth: &AuthContext,
        environment: &str,
    ) -> SumanResult<Environment> {
        self.proxy
            .environment_lookup(auth, &self.input.project, environment)
            .await
            .for_operation("EnvironmentLookup")?
            .ok_or_not_found("environment", environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::return_codes::ReturnCode;
    use crate::domain::entities::Project;
    use crate::infrastructure::manager::MockManagerProxy;

    fn mock_with_project() -> MockManagerProxy {
        let mut proxy = MockManagerProxy::new();
        proxy
            .expect_login()
            .times(1)
            .returning(|| Ok("key".to_string()));
        proxy
            .expect_project_lookup()
            .returning(|_, label| Ok(Some(Project::new(label))));
        proxy
    }

    fn use_case(proxy: MockManagerProxy, input: InputData) -> SyncStageUseCase {
        SyncStageUseCase::new(
            Arc::new(proxy),
            "suma",
            input,
            SyncStageConfig::default().with_poll_interval(Duration::ZERO),
        )
    }

    #[test]
    fn test_default_config() {
        let config = SyncStageConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert!(config.wait_timeout.is_none());
    }

    #[tokio::test]
    async fn test_missing_environment_rejected_before_login() {
        let mut proxy = MockManagerProxy::new();
        proxy.expect_login().never();

        let error = use_case(proxy, InputData::new("p1"))
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            SumanError::MandatoryInputError { ref field } if field == "Environment"
        ));
    }

    #[tokio::test]
    async fn test_absent_project_is_not_found() {
        let mut proxy = MockManagerProxy::new();
        proxy.expect_login().returning(|| Ok("key".to_string()));
        proxy.expect_project_lookup().returning(|_, _| Ok(None));
        proxy.expect_project_build().never();
        proxy.expect_project_promote().never();

        let error = use_case(proxy, InputData::new("p1").with_environment("dev"))
            .execute()
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "project p1 does not exist");
        assert_eq!(error.return_code(), ReturnCode::ErrNotFound);
    }

    #[tokio::test]
    async fn test_unbuilt_predecessor_blocks_promotion() {
        let mut proxy = mock_with_project();
        proxy.expect_environment_lookup().returning(|_, _, env| {
            Ok(Some(match env {
                "test" => Environment::new("test").with_previous("dev"),
                _ => Environment::new("dev").with_status(EnvironmentStatus::Unknown),
            }))
        });
        proxy.expect_project_promote().never();

        let error = use_case(proxy, InputData::new("p1").with_environment("test"))
            .execute()
            .await
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "previous environment dev has not been built yet, build it first"
        );
    }

    #[tokio::test]
    async fn test_first_stage_is_built() {
        let mut proxy = mock_with_project();
        proxy
            .expect_environment_lookup()
            .returning(|_, _, env| Ok(Some(Environment::new(env))));
        proxy
            .expect_project_build()
            .withf(|_, project| project == "p1")
            .times(1)
            .returning(|_, _| Ok(()));
        proxy.expect_project_promote().never();

        let result = use_case(proxy, InputData::new("p1").with_environment("dev"))
            .execute()
            .await
            .unwrap();
        assert_eq!(result.action, SyncAction::Build);
        assert_eq!(result.final_status, None);
        assert_eq!(result.polls, 0);
    }

    #[tokio::test]
    async fn test_wait_timeout() {
        let mut proxy = mock_with_project();
        proxy.expect_environment_lookup().returning(|_, _, env| {
            Ok(Some(
                Environment::new(env).with_status(EnvironmentStatus::Building),
            ))
        });
        proxy.expect_project_build().returning(|_, _| Ok(()));

        let use_case = SyncStageUseCase::new(
            Arc::new(proxy),
            "suma",
            InputData::new("p1").with_environment("dev").with_wait(true),
            SyncStageConfig::default()
                .with_poll_interval(Duration::ZERO)
                .with_wait_timeout(Some(Duration::ZERO)),
        );
        let error = use_case.execute().await.unwrap_err();
        assert_eq!(error.return_code(), ReturnCode::ErrTimeout);
    }

    #[tokio::test]
    async fn test_wait_timeout_shortens_last_pause() {
        let mut proxy = mock_with_project();
        proxy.expect_environment_lookup().returning(|_, _, env| {
            Ok(Some(
                Environment::new(env).with_status(EnvironmentStatus::Building),
            ))
        });
        proxy.expect_project_build().returning(|_, _| Ok(()));

        let use_case = SyncStageUseCase::new(
            Arc::new(proxy),
            "suma",
            InputData::new("p1").with_environment("dev").with_wait(true),
            SyncStageConfig::default()
                .with_poll_interval(Duration::from_secs(3600))
                .with_wait_timeout(Some(Duration::from_millis(50))),
        );

        let started = Instant::now();
        let error = tokio::time::timeout(Duration::from_secs(10), use_case.execute())
            .await
            .expect("deadline must cut the poll interval short")
            .unwrap_err();
        assert_eq!(error.return_code(), ReturnCode::ErrTimeout);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_action_display() {
        assert_eq!(SyncAction::Build.to_string(), "build");
        assert_eq!(
            SyncAction::Promote { from: "dev".into() }.to_string(),
            "promote from dev"
        );
    }
}
