/// UUID v7 ベースの ID 型を定義する宣言型マクロ
///
/// 以下を一括生成する:
/// - Newtype 構造体（`Uuid` をラップ）
/// - `derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: UUID v7 を生成
/// - `from_uuid()` / `as_uuid()`
/// - `parse_str()`: 文字列から復元（パスパラメータ用）
/// - `Default` impl（`new()` に委譲）
///
/// # 使用例
///
/// ```rust
/// use todo_domain::todo::TodoId;
///
/// let id = TodoId::new();
/// let restored = TodoId::parse_str(&id.to_string()).unwrap();
/// assert_eq!(id, restored);
/// assert!(TodoId::parse_str("7").is_err());
/// ```
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        #[serde(transparent)]
        $vis struct $Name(uuid::Uuid);

        impl $Name {
            /// 新しい ID を生成する（UUID v7）
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// 既存の UUID から ID を作成する
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// 内部の UUID 参照を取得する
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            /// 文字列表現から ID を復元する
            ///
            /// # エラー
            ///
            /// UUID として解釈できない場合は `DomainError::Validation` を返す。
            pub fn parse_str(value: &str) -> Result<Self, $crate::DomainError> {
                uuid::Uuid::parse_str(value).map(Self).map_err(|_| {
                    $crate::DomainError::Validation(format!(
                        "{} の形式が不正です: {}",
                        stringify!($Name),
                        value
                    ))
                })
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
