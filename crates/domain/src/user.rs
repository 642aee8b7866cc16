//! # ユーザー
//!
//! サインアップで作成され、ログインで参照されるユーザーエンティティ。
//! このシステムでは更新・削除を行わない。
//!
//! ```rust
//! use todo_domain::{
//!     password::PasswordHash,
//!     user::{Email, User, UserId},
//! };
//!
//! let user = User::new(
//!     UserId::new(),
//!     Email::new("a@x.com"),
//!     PasswordHash::new("$argon2id$..."),
//!     chrono::Utc::now(),
//! );
//! assert_eq!(user.email().as_str(), "a@x.com");
//! ```

use chrono::{DateTime, Utc};

use crate::password::PasswordHash;

define_uuid_id! {
    /// ユーザー ID（UUID v7）
    ///
    /// トークンの `sub` クレームにもこの値が入る。
    pub struct UserId;
}

/// メールアドレス
///
/// 保存時の値そのままで比較する（大文字小文字を区別する）。
/// 形式の検証は行わない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// ユーザーエンティティ
///
/// # 不変条件
///
/// - `email` はシステム全体で一意（DB の UNIQUE 制約で保証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:            UserId,
    email:         Email,
    password_hash: PasswordHash,
    created_at:    DateTime<Utc>,
}

impl User {
    /// 新規ユーザーを作成する
    pub fn new(
        id: UserId,
        email: Email,
        password_hash: PasswordHash,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at: now,
        }
    }

    /// DB の行から復元する
    pub fn from_db(
        id: UserId,
        email: Email,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_新規ユーザーの作成時刻は引数の時刻() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let user = User::new(
            UserId::new(),
            Email::new("a@x.com"),
            PasswordHash::new("hash"),
            now,
        );

        assert_eq!(user.created_at(), now);
        assert_eq!(user.email().as_str(), "a@x.com");
        assert_eq!(user.password_hash().as_str(), "hash");
    }

    #[rstest]
    fn test_メールアドレスは大文字小文字を区別する() {
        assert_ne!(Email::new("A@x.com"), Email::new("a@x.com"));
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("7")]
    fn test_uuidでない文字列からはユーザーidを復元できない(#[case] input: &str) {
        assert!(UserId::parse_str(input).is_err());
    }

    #[rstest]
    fn test_ユーザーidは文字列表現から復元できる() {
        let id = UserId::new();

        let restored = UserId::parse_str(&id.to_string()).unwrap();

        assert_eq!(restored, id);
    }
}
