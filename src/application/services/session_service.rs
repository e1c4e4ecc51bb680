use tracing::info;

use crate::common::error::SumanError;
use crate::common::result::SumanResult;
use crate::domain::value_objects::AuthContext;
use crate::infrastructure::manager::ManagerProxy;

/// SUSE Managerにログインしてセッションを開始する
///
/// ユースケースの実行毎に一度だけ呼び出す。
pub async fn open_session(proxy: &dyn ManagerProxy, host: &str) -> SumanResult<AuthContext> {
    let session_key = proxy
        .login()
        .await
        .map_err(|e| SumanError::authentication_error(host, e))?;

    info!(host, "logged in to SUSE Manager");
    Ok(AuthContext::new(host, session_key))
}
