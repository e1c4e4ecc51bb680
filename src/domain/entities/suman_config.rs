use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use validator::Validate;

/// 設定ファイル（config.yaml）の構造
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// SUSE Manager接続設定
    #[validate(nested)]
    pub suman: SumanConfig,

    /// ログ設定
    #[serde(default)]
    pub log: LogConfig,
}

/// SUSE Manager接続設定
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct SumanConfig {
    /// サーバーのホスト名またはURL
    #[validate(length(min = 1, message = "Server must not be empty"))]
    pub server: String,

    /// APIユーザー
    #[validate(length(min = 1, message = "User must not be empty"))]
    pub user: String,

    /// APIパスワード（SUMAN_PASSWORDで上書き可能）
    #[serde(default)]
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,

    /// API呼び出し毎のタイムアウト（秒）
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1, message = "Timeout must be at least 1 second"))]
    pub timeout: u64,

    /// 通信エラー時の再試行回数
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// TLS証明書を検証するか
    #[serde(default = "default_ssl_certificate_check")]
    pub ssl_certificate_check: bool,
}

impl SumanConfig {
    /// 新しい接続設定を作成
    pub fn new(
        server: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            user: user.into(),
            password: password.into(),
            timeout: default_timeout(),
            retry_count: default_retry_count(),
            ssl_certificate_check: default_ssl_certificate_check(),
        }
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_ssl_certificate_check(mut self, check: bool) -> Self {
        self.ssl_certificate_check = check;
        self
    }
}

impl fmt::Debug for SumanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SumanConfig")
            .field("server", &self.server)
            .field("user", &self.user)
            .field("password", &"***")
            .field("timeout", &self.timeout)
            .field("retry_count", &self.retry_count)
            .field("ssl_certificate_check", &self.ssl_certificate_check)
            .finish()
    }
}

/// ログ設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogConfig {
    /// ログレベル（trace, debug, info, warn, error）
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 出力先ファイル（未指定の場合は標準エラー）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_timeout() -> u64 {
    60
}

fn default_retry_count() -> u32 {
    3
}

fn default_ssl_certificate_check() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
