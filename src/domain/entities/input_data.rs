use crate::domain::value_objects::label_list::LabelList;
use serde::{Deserialize, Serialize};

/// オペレーターが指定した入力
///
/// 文字列はCLIから受け取ったまま保持し、リストとしての解釈は
/// アクセサで行う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputData {
    /// プロジェクトラベル
    pub project: String,

    /// ベースチャンネル（create-project のみ）
    pub base_channel: String,

    /// 環境（create-project ではカンマ区切りのステージ列、sync-stage では単一ラベル）
    pub environment: String,

    /// 追加するチャンネル（カンマ区切り）
    pub add_channel: String,

    /// 削除するチャンネル（カンマ区切り）
    pub delete_channel: String,

    /// プロジェクトの説明
    pub description: String,

    /// ビルド完了まで待つか（sync-stage のみ）
    pub wait: bool,
}

impl InputData {
    /// プロジェクトを指定して作成
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Default::default()
        }
    }

    pub fn with_base_channel(mut self, base_channel: impl Into<String>) -> Self {
        self.base_channel = base_channel.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_add_channel(mut self, add_channel: impl Into<String>) -> Self {
        self.add_channel = add_channel.into();
        self
    }

    pub fn with_delete_channel(mut self, delete_channel: impl Into<String>) -> Self {
        self.delete_channel = delete_channel.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// ステージ列
    pub fn environments(&self) -> LabelList {
        LabelList::parse(&self.environment)
    }

    /// 追加チャンネル列
    pub fn add_channels(&self) -> LabelList {
        LabelList::parse(&self.add_channel)
    }

    /// 削除チャンネル列
    pub fn delete_channels(&self) -> LabelList {
        LabelList::parse(&self.delete_channel)
    }

    /// 説明（空の場合はプロジェクトラベル）
    pub fn effective_description(&self) -> &str {
        if self.description.is_empty() {
            &self.project
        } else {
            &self.description
        }
    }
}
