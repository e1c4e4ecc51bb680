use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::common::result::{ManagerResultExt, SumanResult};
use crate::domain::value_objects::{AuthContext, LabelList};
use crate::infrastructure::manager::{ManagerProxy, SourceType};

/// チャンネルに対する操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelAction {
    /// プロジェクトにソースとして追加
    Add,
    /// プロジェクトのソースから削除
    Delete,
}

impl fmt::Display for ChannelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelAction::Add => write!(f, "add"),
            ChannelAction::Delete => write!(f, "delete"),
        }
    }
}

/// チャンネル操作の結果（呼び出し順）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSourceReport {
    /// 追加されたチャンネル
    pub attached: Vec<String>,

    /// 削除されたチャンネル
    pub detached: Vec<String>,

    /// SUSE Manager上に存在しないためスキップしたチャンネル
    pub skipped: Vec<String>,
}

impl ChannelSourceReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 変更されたチャンネル数
    pub fn changed_count(&self) -> usize {
        self.attached.len() + self.detached.len()
    }
}

/// プロジェクトのソースチャンネルを追加・削除するサービス
pub struct ChannelSourceService {
    proxy: Arc<dyn ManagerProxy>,
}

impl ChannelSourceService {
    /// 新しいChannelSourceServiceを作成
    pub fn new(proxy: Arc<dyn ManagerProxy>) -> Self {
        Self { proxy }
    }

    /// チャンネル列を順番に追加または削除する
    ///
    /// 存在しないチャンネルはdebugログを出してスキップする。
    /// SUSE Managerのエラーは即座に返し、適用済みの変更は戻さない。
    pub async fn apply(
        &self,
        auth: &AuthContext,
        project: &str,
        channels: &LabelList,
        action: ChannelAction,
        report: &mut ChannelSourceReport,
    ) -> SumanResult<()> {
        for channel in channels.iter() {
            let exists = self
                .proxy
                .channel_exists(auth, channel)
                .await
                .for_operation("ChannelExists")?;

            if !exists {
                debug!(project, channel, %action, "channel not found, skipping");
                report.skipped.push(channel.to_string());
                continue;
            }

            match action {
                ChannelAction::Add => {
                    self.proxy
                        .attach_source(auth, project, SourceType::Software, channel)
                        .await
                        .for_operation("AttachSource")?;
                    info!(project, channel, "channel attached");
                    report.attached.push(channel.to_string());
                }
                ChannelAction::Delete => {
                    self.proxy
                        .detach_source(auth, project, SourceType::Software, channel)
                        .await
                        .for_operation("DetachSource")?;
                    info!(project, channel, "channel detached");
                    report.detached.push(channel.to_string());
                }
            }
        }

        Ok(())
    }
}
