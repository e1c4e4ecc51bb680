use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Content Lifecycleプロジェクト（SUSE Managerから取得した状態）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// プロジェクトラベル
    pub label: String,

    /// 表示名
    #[serde(default)]
    pub name: String,

    /// 説明
    #[serde(default)]
    pub description: Option<String>,
}

impl Project {
    /// 新しいProjectを作成
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            name: label.clone(),
            label,
            description: None,
        }
    }

    /// 説明を設定
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// プロジェクト内の環境（ステージ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// 環境ラベル
    pub label: String,

    /// 表示名
    #[serde(default)]
    pub name: String,

    /// 前段の環境ラベル（空の場合は最初のステージ）
    #[serde(default, deserialize_with = "null_as_empty")]
    pub previous_environment_label: String,

    /// ビルド状態
    #[serde(default)]
    pub status: EnvironmentStatus,
}

impl Environment {
    /// 新しいEnvironmentを作成
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            name: label.clone(),
            label,
            previous_environment_label: String::new(),
            status: EnvironmentStatus::Unknown,
        }
    }

    /// 前段の環境を設定
    pub fn with_previous(mut self, previous: impl Into<String>) -> Self {
        self.previous_environment_label = previous.into();
        self
    }

    /// 状態を設定
    pub fn with_status(mut self, status: EnvironmentStatus) -> Self {
        self.status = status;
        self
    }

    /// 前段の環境ラベル（最初のステージならNone）
    pub fn previous(&self) -> Option<&str> {
        if self.previous_environment_label.is_empty() {
            None
        } else {
            Some(&self.previous_environment_label)
        }
    }

    /// 最初のステージかどうか
    pub fn is_first_stage(&self) -> bool {
        self.previous().is_none()
    }
}

/// サーバーがnullを返すラベルは空文字列として扱う
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 環境のビルド状態
///
/// `unknown -> building -> generating_repodata -> built` の順に遷移する。
/// それ以外の値はそのまま`Other`として保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnvironmentStatus {
    /// 未ビルド
    Unknown,
    /// ビルド中
    Building,
    /// リポジトリメタデータ生成中
    GeneratingRepodata,
    /// ビルド済み
    Built,
    /// 上記以外のサーバー側の状態
    Other(String),
}

impl Default for EnvironmentStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

impl EnvironmentStatus {
    /// ステータス文字列
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown => "unknown",
            Self::Building => "building",
            Self::GeneratingRepodata => "generating_repodata",
            Self::Built => "built",
            Self::Other(other) => other,
        }
    }

    /// ビルド処理が進行中かどうか
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Building | Self::GeneratingRepodata)
    }

    /// ビルド済みかどうか
    pub fn is_built(&self) -> bool {
        matches!(self, Self::Built)
    }
}

impl From<String> for EnvironmentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" | "unknown" => Self::Unknown,
            "building" => Self::Building,
            "generating_repodata" => Self::GeneratingRepodata,
            "built" => Self::Built,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for EnvironmentStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<EnvironmentStatus> for String {
    fn from(status: EnvironmentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for EnvironmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ソフトウェアチャンネル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// チャンネルラベル
    pub label: String,

    /// 表示名
    #[serde(default)]
    pub name: String,
}

impl Channel {
    /// 新しいChannelを作成
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            name: label.clone(),
            label,
        }
    }
}
