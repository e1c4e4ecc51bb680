use crate::common::error::SumanError;
use crate::infrastructure::manager::ManagerError;

/// suman全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use suman::common::result::SumanResult;
/// use suman::common::error::SumanError;
///
/// fn example_function() -> SumanResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> SumanResult<()> {
///     Err(SumanError::internal_error("Something went wrong"))
/// }
/// ```
pub type SumanResult<T> = Result<T, SumanError>;

/// ManagerProxyのエラーに呼び出し名を付与するヘルパー
pub trait ManagerResultExt<T> {
    /// ManagerErrorをSumanError::ManagerCallErrorに変換する
    ///
    /// 元のエラーはそのままsourceとして保持される。
    ///
    /// # Examples
    ///
    /// ```
    /// use suman::common::result::{ManagerResultExt, SumanResult};
    /// use suman::infrastructure::manager::ManagerError;
    ///
    /// let result: Result<(), ManagerError> =
    ///     Err(ManagerError::api_fault("contentmanagement.buildProject", "no sources"));
    /// let result: SumanResult<()> = result.for_operation("ProjectBuild");
    /// assert!(result.unwrap_err().to_string().contains("ProjectBuild"));
    /// ```
    fn for_operation(self, operation: &str) -> SumanResult<T>;
}

impl<T> ManagerResultExt<T> for Result<T, ManagerError> {
    fn for_operation(self, operation: &str) -> SumanResult<T> {
        self.map_err(|e| SumanError::manager_call(operation, e))
    }
}

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// NoneをNotFoundErrorに変換する
    ///
    /// # Examples
    ///
    /// ```
    /// use suman::common::result::{OptionExt, SumanResult};
    ///
    /// let none_value: Option<String> = None;
    /// let result: SumanResult<String> = none_value.ok_or_not_found("project", "p1");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_not_found(self, kind: &str, label: &str) -> SumanResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, kind: &str, label: &str) -> SumanResult<T> {
        self.ok_or_else(|| SumanError::not_found(kind, label))
    }
}
