use std::sync::Arc;

use tracing::info;

use crate::application::services::channel_source_service::{
    ChannelAction, ChannelSourceReport, ChannelSourceService,
};
use crate::application::services::session_service::open_session;
use crate::common::error::SumanError;
use crate::common::result::{ManagerResultExt, SumanResult};
use crate::domain::entities::InputData;
use crate::domain::value_objects::{AuthContext, LabelList};
use crate::infrastructure::manager::ManagerProxy;

/// プロジェクト作成・更新の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateProjectResult {
    /// プロジェクトを新規作成したか
    pub project_created: bool,

    /// 作成した環境（作成順）
    pub environments_created: Vec<String>,

    /// チャンネル操作の結果
    pub channels: ChannelSourceReport,
}

/// ソフトウェアプロジェクト作成のユースケース
///
/// プロジェクトが存在しなければ作成して環境チェーンとチャンネルを設定し、
/// 既に存在する場合はチャンネルの追加・削除のみを行う。
pub struct CreateSoftwareProjectUseCase {
    /// SUSE Manager API
    proxy: Arc<dyn ManagerProxy>,

    /// 接続先サーバー
    host: String,

    /// 入力
    input: InputData,
}

impl CreateSoftwareProjectUseCase {
    /// 新しいCreateSoftwareProjectUseCaseインスタンスを作成
    pub fn new(proxy: Arc<dyn ManagerProxy>, host: impl Into<String>, input: InputData) -> Self {
        Self {
            proxy,
            host: host.into(),
            input,
        }
    }

    /// プロジェクトの作成・更新を実行
    pub async fn execute(&self) -> SumanResult<CreateProjectResult> {
        // 1. 必須入力のチェック
        self.check_mandatory_inputs()?;

        // 2. ログイン
        let auth = open_session(self.proxy.as_ref(), &self.host).await?;

        // 3. ベースチャンネルの存在チェック
        self.check_base_channel(&auth).await?;

        // 4. プロジェクトの状態に応じて作成または更新
        let project = self
            .proxy
            .project_lookup(&auth, &self.input.project)
            .await
            .for_operation("ProjectLookup")?;

        let mut result = CreateProjectResult::default();
        match project {
            None => self.create_project(&auth, &mut result).await?,
            Some(_) => {
                info!(
                    project = %self.input.project,
                    "project already exists, only channels will be added or deleted"
                );
                self.update_channels(&auth, &mut result).await?;
            }
        }

        Ok(result)
    }

    /// 必須入力のチェック
    fn check_mandatory_inputs(&self) -> SumanResult<()> {
        if self.input.project.is_empty() {
            return Err(SumanError::mandatory_input("Project"));
        }
        if self.input.base_channel.is_empty() {
            return Err(SumanError::mandatory_input("BaseChannel"));
        }
        if self.input.environments().is_empty() {
            return Err(SumanError::mandatory_input("Environment"));
        }
        Ok(())
    }

    /// ベースチャンネルがSUSE Manager上に存在するかチェック
    async fn check_base_channel(&self, auth: &AuthContext) -> SumanResult<()> {
        let exists = self
            .proxy
            .channel_exists(auth, &self.input.base_channel)
            .await
            .for_operation("ChannelExists")?;

        if !exists {
            return Err(SumanError::not_found("channel", &self.input.base_channel));
        }
        Ok(())
    }

    /// プロジェクト、環境チェーン、チャンネルを新規に設定
    async fn create_project(
        &self,
        auth: &AuthContext,
        result: &mut CreateProjectResult,
    ) -> SumanResult<()> {
        let project = self.input.project.as_str();
        let description = self.input.effective_description();

        self.proxy
            .project_create(auth, project, project, description)
            .await
            .for_operation("ProjectCreate")?;
        result.project_created = true;
        info!(project, "project created");

        // 環境は指定順に前段の環境へ繋げる
        for (previous, environment) in self.input.environments().chain() {
            self.proxy
                .environment_create(auth, project, previous, environment, environment, description)
                .await
                .for_operation("EnvironmentCreate")?;
            info!(project, environment, previous, "environment created");
            result.environments_created.push(environment.to_string());
        }

        let child_channels = self.initial_channels(auth).await?;
        let service = ChannelSourceService::new(Arc::clone(&self.proxy));
        service
            .apply(
                auth,
                project,
                &child_channels,
                ChannelAction::Add,
                &mut result.channels,
            )
            .await?;

        let delete_channels = self.input.delete_channels();
        if !delete_channels.is_empty() {
            service
                .apply(
                    auth,
                    project,
                    &delete_channels,
                    ChannelAction::Delete,
                    &mut result.channels,
                )
                .await?;
        }

        Ok(())
    }

    /// 新規プロジェクトに追加するチャンネル列
    ///
    /// 先頭は常にベースチャンネル。追加チャンネルの指定がなければ
    /// ベースチャンネルの子チャンネルを一覧順に使う。
    async fn initial_channels(&self, auth: &AuthContext) -> SumanResult<LabelList> {
        let add_channels = self.input.add_channels();
        if !add_channels.is_empty() {
            return Ok(add_channels.prepend(&self.input.base_channel));
        }

        let children = self
            .proxy
            .channel_list_children(auth, &self.input.base_channel)
            .await
            .for_operation("ChannelListChildren")?;

        Ok(LabelList::from_labels(children.into_iter().map(|c| c.label))
            .prepend(&self.input.base_channel))
    }

    /// 既存プロジェクトのチャンネルを追加・削除
    async fn update_channels(
        &self,
        auth: &AuthContext,
        result: &mut CreateProjectResult,
    ) -> SumanResult<()> {
        let project = self.input.project.as_str();
        let service = ChannelSourceService::new(Arc::clone(&self.proxy));

        let add_channels = self.input.add_channels();
        if !add_channels.is_empty() {
            service
                .apply(auth, project, &add_channels, ChannelAction::Add, &mut result.channels)
                .await?;
        }

        let delete_channels = self.input.delete_channels();
        if !delete_channels.is_empty() {
            service
                .apply(
                    auth,
                    project,
                    &delete_channels,
                    ChannelAction::Delete,
                    &mut result.channels,
                )
                .await?;
        }

        Ok(())
    }
}
